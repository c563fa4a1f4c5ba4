use axum::extract::Path;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use axum::Json;
use serde::Deserialize;

use super::todos::TodoData;
use super::todos::TodoFeedback;
use super::ApiError;
use crate::domain::todo::models::parse_deadline;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoName;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::inbound::http::guard::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation;
use crate::todo::errors::TodoError;
use crate::todo::ports::TodoServicePort;

/// `GET /todos/:user_id/todo/:todo_id` (guarded): a single todo.
///
/// A missing, foreign, or malformed id bounces to the list; deleted and
/// never-existed are indistinguishable on purpose.
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((_, todo_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let list = format!("/todos/{}", auth.user_id);

    let Ok(todo_id) = TodoId::from_string(&todo_id) else {
        return Ok(Redirect::to(&list).into_response());
    };

    match state.todo_service.get_todo(&auth.user_id, &todo_id).await {
        Ok(todo) => Ok(Json(TodoData::from(&todo)).into_response()),
        Err(TodoError::NotFound(_)) => Ok(Redirect::to(&list).into_response()),
        Err(e) => Err(ApiError::from(e)),
    }
}

/// `POST /todos/:user_id/todo/:todo_id` (guarded): full-field edit.
pub async fn edit_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((_, todo_id)): Path<(String, String)>,
    Form(form): Form<EditTodoForm>,
) -> Result<Response, ApiError> {
    let list = format!("/todos/{}", auth.user_id);

    let Ok(todo_id) = TodoId::from_string(&todo_id) else {
        return Ok(Redirect::to(&list).into_response());
    };

    let field_errors = validation::validate_todo_form(&form.todo_name, &form.todo_priority);
    if !field_errors.is_empty() {
        return Ok(TodoFeedback::rejected(field_errors).into_response());
    }

    let command = UpdateTodoCommand {
        name: TodoName::new(form.todo_name)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
        description: if form.todo_description.trim().is_empty() {
            None
        } else {
            Some(form.todo_description)
        },
        priority: Priority::from_form_value(&form.todo_priority),
        deadline: parse_deadline(&form.todo_deadline),
    };

    match state
        .todo_service
        .update_todo(&auth.user_id, &todo_id, command)
        .await
    {
        Ok(todo) => {
            tracing::info!(todo_id = %todo.id, user_id = %auth.user_id, "Todo updated");
            Ok(TodoFeedback::success().into_response())
        }
        Err(TodoError::NotFound(_)) => Ok(Redirect::to(&list).into_response()),
        Err(e) => Err(ApiError::from(e)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditTodoForm {
    #[serde(rename = "todoName", default)]
    pub todo_name: String,
    #[serde(rename = "todoDescription", default)]
    pub todo_description: String,
    #[serde(rename = "todoPriority", default)]
    pub todo_priority: String,
    #[serde(rename = "todoDeadline", default)]
    pub todo_deadline: String,
}
