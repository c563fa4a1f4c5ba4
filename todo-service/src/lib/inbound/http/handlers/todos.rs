use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum::Form;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::todo::models::parse_deadline;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoName;
use crate::inbound::http::guard::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation;
use crate::inbound::http::validation::FieldErrors;
use crate::todo::errors::TodoError;
use crate::todo::ports::TodoServicePort;

/// `GET /todos/:user_id` (guarded): the owner's todo list.
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<TodoListData>, ApiError> {
    let todos = state.todo_service.list_todos(&auth.user_id).await?;

    Ok(Json(TodoListData {
        todos: todos.iter().map(TodoData::from).collect(),
    }))
}

/// `POST /todos/:user_id` (guarded): multi-action endpoint.
///
/// The form carries an `action` discriminator; dispatch happens through a
/// tagged union so each variant validates its own fields.
pub async fn todos_action(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Form(form): Form<TodosActionForm>,
) -> Result<Response, ApiError> {
    match TodosAction::try_from(form)? {
        TodosAction::AddTodo {
            name,
            description,
            priority,
            deadline,
        } => {
            let field_errors = validation::validate_todo_form(&name, &priority);
            if !field_errors.is_empty() {
                return Ok(TodoFeedback::rejected(field_errors).into_response());
            }

            let command = CreateTodoCommand {
                // Non-emptiness was just validated; this cannot fail here.
                name: TodoName::new(name)
                    .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
                description,
                priority: Priority::from_form_value(&priority),
                deadline,
            };

            let todo = state.todo_service.create_todo(&auth.user_id, command).await?;
            tracing::info!(todo_id = %todo.id, user_id = %auth.user_id, "Todo created");

            Ok(TodoFeedback::success().into_response())
        }

        TodosAction::DeleteTodo { todo_id } => {
            match state.todo_service.delete_todo(&auth.user_id, &todo_id).await {
                // A missing or foreign id deletes nothing; from the caller's
                // perspective the todo is gone either way.
                Ok(()) | Err(TodoError::NotFound(_)) => {
                    tracing::info!(todo_id = %todo_id, user_id = %auth.user_id, "Todo deleted");
                    Ok(TodoFeedback::success().into_response())
                }
                Err(e) => Err(ApiError::from(e)),
            }
        }
    }
}

/// Raw multi-action form body; one flat struct because url-encoded bodies
/// cannot express a tagged enum directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodosActionForm {
    pub action: String,
    #[serde(rename = "todoName", default)]
    pub todo_name: String,
    #[serde(rename = "todoDescription", default)]
    pub todo_description: String,
    #[serde(rename = "todoPriority", default)]
    pub todo_priority: String,
    #[serde(rename = "todoDeadline", default)]
    pub todo_deadline: String,
    #[serde(rename = "todoId", default)]
    pub todo_id: String,
}

/// Dispatched action, built at the handler boundary.
#[derive(Debug)]
enum TodosAction {
    AddTodo {
        name: String,
        description: Option<String>,
        priority: String,
        deadline: Option<NaiveDate>,
    },
    DeleteTodo {
        todo_id: TodoId,
    },
}

impl TryFrom<TodosActionForm> for TodosAction {
    type Error = ApiError;

    fn try_from(form: TodosActionForm) -> Result<Self, ApiError> {
        match form.action.as_str() {
            "addTodo" => Ok(TodosAction::AddTodo {
                name: form.todo_name,
                description: if form.todo_description.trim().is_empty() {
                    None
                } else {
                    Some(form.todo_description)
                },
                priority: form.todo_priority,
                deadline: parse_deadline(&form.todo_deadline),
            }),
            "deleteTodo" => Ok(TodosAction::DeleteTodo {
                todo_id: TodoId::from_string(&form.todo_id)
                    .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
            }),
            other => Err(ApiError::UnprocessableEntity(format!(
                "Unknown action: {}",
                other
            ))),
        }
    }
}

/// Feedback for the add/delete modals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoFeedback {
    pub success: bool,
    #[serde(rename = "fieldErrors")]
    pub field_errors: FieldErrors,
}

impl TodoFeedback {
    pub fn success() -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                field_errors: FieldErrors::new(),
            }),
        )
    }

    pub fn rejected(field_errors: FieldErrors) -> (StatusCode, Json<Self>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Self {
                success: false,
                field_errors,
            }),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoListData {
    pub todos: Vec<TodoData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub priority: i32,
    #[serde(rename = "priorityLabel")]
    pub priority_label: &'static str,
    pub deadline: Option<NaiveDate>,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            name: todo.name.as_str().to_string(),
            description: todo.description.clone(),
            priority: todo.priority.code(),
            priority_label: todo.priority.label(),
            deadline: todo.deadline,
        }
    }
}
