use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::FromRef;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::guard::require_owner;
use super::handlers::account::get_account;
use super::handlers::account::update_account;
use super::handlers::home::home;
use super::handlers::sign_in::sign_in_form;
use super::handlers::sign_in::sign_in_submit;
use super::handlers::sign_out::sign_out;
use super::handlers::todo::edit_todo;
use super::handlers::todo::get_todo;
use super::handlers::todos::list_todos;
use super::handlers::todos::todos_action;
use crate::domain::todo::service::TodoService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::todo::PostgresTodoRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub todo_service: Arc<TodoService<PostgresTodoRepository>>,
    pub authenticator: Arc<Authenticator>,
    pub cookie_key: Key,
}

// Lets PrivateCookieJar pull its encryption key straight from the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    todo_service: Arc<TodoService<PostgresTodoRepository>>,
    authenticator: Arc<Authenticator>,
    cookie_key: Key,
) -> Router {
    let state = AppState {
        user_service,
        todo_service,
        authenticator,
        cookie_key,
    };

    let public_routes = Router::new()
        .route("/", get(home))
        .route("/sign-in", get(sign_in_form).post(sign_in_submit))
        .route("/sign-out", post(sign_out));

    let protected_routes = Router::new()
        .route("/user/:user_id", get(get_account).post(update_account))
        .route("/todos/:user_id", get(list_todos).post(todos_action))
        .route(
            "/todos/:user_id/todo/:todo_id",
            get(get_todo).post(edit_todo),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .with_state(state)
}
