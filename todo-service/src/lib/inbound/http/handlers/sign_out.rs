use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::PrivateCookieJar;

use crate::inbound::http::session;

/// `POST /sign-out`: clear the session cookie and return to sign-in.
///
/// The token itself stays valid until it expires; forgetting the cookie is
/// all a stateless session can do.
pub async fn sign_out(jar: PrivateCookieJar) -> Response {
    (session::clear(jar), Redirect::to("/sign-in")).into_response()
}
