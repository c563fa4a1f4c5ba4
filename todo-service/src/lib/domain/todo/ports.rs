use async_trait::async_trait;

use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;

/// Port for todo domain service operations; every operation is scoped to
/// the owning user.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List an owner's todos, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, owner: &UserId) -> Result<Vec<Todo>, TodoError>;

    /// Create a todo for an owner.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        owner: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Retrieve one of an owner's todos. A todo belonging to someone else
    /// reads as not-found.
    ///
    /// # Errors
    /// * `NotFound` - Todo missing or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, owner: &UserId, id: &TodoId) -> Result<Todo, TodoError>;

    /// Replace a todo's mutable fields.
    ///
    /// # Errors
    /// * `NotFound` - Todo missing or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete one of an owner's todos. Scoped by `(owner, id)` so one user
    /// can never delete another's todo, even knowing its id.
    ///
    /// # Errors
    /// * `NotFound` - Todo missing or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for the todo aggregate.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Retrieve all todos belonging to an owner, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Todo>, TodoError>;

    /// Persist a new todo.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Retrieve a todo by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// Replace a todo's mutable fields in storage.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove a todo, matching both owner and id.
    ///
    /// # Errors
    /// * `NotFound` - No row matched the owner and id together
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}
