use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateAccountCommand;
use crate::domain::user::models::User;
use crate::inbound::http::guard::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation;
use crate::inbound::http::validation::FieldErrors;
use crate::user::ports::UserServicePort;

/// `GET /user/:user_id` (guarded): the account page data.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<AccountData>, ApiError> {
    let user = state.user_service.get_user(&auth.user_id).await?;
    Ok(Json(AccountData::from(&user)))
}

/// `POST /user/:user_id` (guarded): update display name and email.
pub async fn update_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Form(form): Form<AccountForm>,
) -> Result<Response, ApiError> {
    let field_errors = validation::validate_account_info(&form.name, &form.email);
    if !field_errors.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(AccountFeedback { field_errors }),
        )
            .into_response());
    }

    let command = form.try_into_command()?;

    let user = state
        .user_service
        .update_account(&auth.user_id, command)
        .await?;

    tracing::info!(user_id = %user.id, "Account details updated");

    Ok(Json(AccountData::from(&user)).into_response())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountForm {
    pub name: String,
    pub email: String,
}

impl AccountForm {
    fn try_into_command(self) -> Result<UpdateAccountCommand, ApiError> {
        // A blank name clears the display name entirely.
        let name = if self.name.trim().is_empty() {
            None
        } else {
            Some(
                PersonName::new(self.name)
                    .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
            )
        };

        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(UpdateAccountCommand { name, email })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountFeedback {
    #[serde(rename = "fieldErrors")]
    pub field_errors: FieldErrors,
}

/// Account data exposed to the page; the password hash never leaves the
/// domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

impl From<&User> for AccountData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_ref().map(|n| n.as_str().to_string()),
            email: user.email.as_str().to_string(),
        }
    }
}
