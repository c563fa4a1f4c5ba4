use auth::AuthenticationError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Form;
use axum::Json;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;
use crate::inbound::http::session::SessionRecord;
use crate::inbound::http::validation;
use crate::inbound::http::validation::FieldErrors;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// `GET /sign-in`.
///
/// A cookie already naming a user short-circuits to their page; otherwise
/// respond with a clearing cookie so stale session state never lingers on
/// the sign-in page.
pub async fn sign_in_form(jar: PrivateCookieJar) -> Response {
    if let Some(record) = session::load(&jar) {
        return Redirect::to(&format!("/user/{}", record.user_id)).into_response();
    }

    (session::clear(jar), StatusCode::OK).into_response()
}

/// `POST /sign-in`.
///
/// Unknown email and wrong password produce the same `invalidCredentials`
/// flag so the response never reveals which one was wrong.
pub async fn sign_in_submit(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<SignInForm>,
) -> Result<Response, ApiError> {
    let field_errors = validation::validate_sign_in(&form.email, &form.password);
    if !field_errors.is_empty() {
        return Ok(SignInFeedback::field_errors(field_errors).into_response());
    }

    let user = match state.user_service.get_user_by_email(&form.email).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            return Ok(SignInFeedback::invalid_credentials().into_response());
        }
        Err(e) => return Err(ApiError::from(e)),
    };

    let token = match state
        .authenticator
        .sign_in(&form.password, &user.password_hash, &user.id.to_string())
    {
        Ok(token) => token,
        Err(AuthenticationError::InvalidCredentials) => {
            return Ok(SignInFeedback::invalid_credentials().into_response());
        }
        Err(AuthenticationError::Token(e)) => {
            return Err(ApiError::InternalServerError(format!(
                "Token issuance failed: {}",
                e
            )));
        }
    };

    tracing::info!(user_id = %user.id, "User signed in");

    let record = SessionRecord {
        user_id: user.id.to_string(),
        token,
    };
    let jar = session::store(jar, &record);

    Ok((jar, Redirect::to(&format!("/user/{}", user.id))).into_response())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Failure feedback for the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInFeedback {
    #[serde(rename = "fieldErrors")]
    pub field_errors: FieldErrors,
    #[serde(rename = "invalidCredentials")]
    pub invalid_credentials: bool,
}

impl SignInFeedback {
    fn field_errors(field_errors: FieldErrors) -> (StatusCode, Json<Self>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Self {
                field_errors,
                invalid_credentials: false,
            }),
        )
    }

    fn invalid_credentials() -> (StatusCode, Json<Self>) {
        (
            StatusCode::UNAUTHORIZED,
            Json(Self {
                field_errors: FieldErrors::new(),
                invalid_credentials: true,
            }),
        )
    }
}
