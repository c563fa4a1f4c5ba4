use std::collections::HashMap;

use axum::extract::MatchedPath;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::PrivateCookieJar;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;

/// Verified session subject, inserted into request extensions for the
/// handlers behind the guard.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Access guard shared by every route with a `:user_id` segment.
///
/// The path parameter is untrusted input: the only authority is the verified
/// token subject. An invalid or missing session bounces to sign-in with the
/// stale cookie cleared; a subject/parameter mismatch silently redirects to
/// the caller's own copy of the same page instead of erroring.
pub async fn require_owner(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(params): Path<HashMap<String, String>>,
    matched: MatchedPath,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(record) = session::load(&jar) else {
        return sign_in_redirect(jar);
    };

    let claims = match state.authenticator.verify_token(&record.token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            return sign_in_redirect(jar);
        }
    };

    let Some(requested) = params.get("user_id") else {
        return sign_in_redirect(jar);
    };

    if *requested != claims.sub {
        let target = canonical_path(matched.as_str(), &params, &claims.sub);
        return Redirect::to(&target).into_response();
    }

    let user_id = match UserId::from_string(&claims.sub) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Token subject is not a user id");
            return sign_in_redirect(jar);
        }
    };

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    next.run(req).await
}

fn sign_in_redirect(jar: PrivateCookieJar) -> Response {
    (session::clear(jar), Redirect::to("/sign-in")).into_response()
}

/// Rebuild the requested route with the user segment replaced by the
/// verified subject, keeping every other parameter as requested.
fn canonical_path(pattern: &str, params: &HashMap<String, String>, subject: &str) -> String {
    let segments: Vec<&str> = pattern
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some("user_id") => subject,
            Some(name) => params.get(name).map(String::as_str).unwrap_or(segment),
            None => segment,
        })
        .collect();

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_path_swaps_user_segment() {
        let params = params(&[("user_id", "user-a")]);
        assert_eq!(
            canonical_path("/todos/:user_id", &params, "user-b"),
            "/todos/user-b"
        );
    }

    #[test]
    fn test_canonical_path_keeps_other_parameters() {
        let params = params(&[("user_id", "user-a"), ("todo_id", "todo-7")]);
        assert_eq!(
            canonical_path("/todos/:user_id/todo/:todo_id", &params, "user-b"),
            "/todos/user-b/todo/todo-7"
        );
    }

    #[test]
    fn test_canonical_path_passes_static_segments_through() {
        let params = params(&[("user_id", "user-a")]);
        assert_eq!(
            canonical_path("/user/:user_id", &params, "user-b"),
            "/user/user-b"
        );
    }
}
