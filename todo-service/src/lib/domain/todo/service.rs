use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;
use crate::todo::ports::TodoRepository;
use crate::todo::ports::TodoServicePort;

/// Domain service implementation for todo operations.
///
/// Ownership checks live here, not in handlers: a todo that exists but
/// belongs to another user is indistinguishable from one that never did.
pub struct TodoService<R>
where
    R: TodoRepository,
{
    repository: Arc<R>,
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn find_owned(&self, owner: &UserId, id: &TodoId) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))?;

        if todo.user_id != *owner {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(todo)
    }
}

#[async_trait]
impl<R> TodoServicePort for TodoService<R>
where
    R: TodoRepository,
{
    async fn list_todos(&self, owner: &UserId) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_by_owner(owner).await
    }

    async fn create_todo(
        &self,
        owner: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = Todo {
            id: TodoId::new(),
            user_id: *owner,
            name: command.name,
            description: command.description,
            priority: command.priority,
            deadline: command.deadline,
            created_at: Utc::now(),
        };

        self.repository.create(todo).await
    }

    async fn get_todo(&self, owner: &UserId, id: &TodoId) -> Result<Todo, TodoError> {
        self.find_owned(owner, id).await
    }

    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.find_owned(owner, id).await?;

        todo.name = command.name;
        todo.description = command.description;
        todo.priority = command.priority;
        todo.deadline = command.deadline;

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete(owner, id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::todo::models::Priority;
    use crate::domain::todo::models::TodoName;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Todo>, TodoError>;
            async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
        }
    }

    fn sample_todo(owner: UserId, id: TodoId) -> Todo {
        Todo {
            id,
            user_id: owner,
            name: TodoName::new("Buy groceries".to_string()).unwrap(),
            description: Some("Milk, Bread, Cheese, Eggs".to_string()),
            priority: Priority::High,
            deadline: NaiveDate::from_ymd_opt(2025, 12, 1),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_todo_assigns_owner_and_id() {
        let mut repository = MockTestTodoRepository::new();
        let owner = UserId::new();

        repository
            .expect_create()
            .withf(move |todo| {
                todo.user_id == owner && todo.name.as_str() == "Buy groceries"
            })
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository));

        let command = CreateTodoCommand {
            name: TodoName::new("Buy groceries".to_string()).unwrap(),
            description: None,
            priority: Priority::Medium,
            deadline: None,
        };

        let created = service.create_todo(&owner, command).await.unwrap();
        assert_eq!(created.user_id, owner);
    }

    #[tokio::test]
    async fn test_get_todo_hides_foreign_todos() {
        let mut repository = MockTestTodoRepository::new();

        let other_owner = UserId::new();
        let todo_id = TodoId::new();
        let foreign = sample_todo(other_owner, todo_id);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(foreign.clone())));

        let service = TodoService::new(Arc::new(repository));

        let result = service.get_todo(&UserId::new(), &todo_id).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_todo_replaces_all_mutable_fields() {
        let mut repository = MockTestTodoRepository::new();

        let owner = UserId::new();
        let todo_id = TodoId::new();
        let existing = sample_todo(owner, todo_id);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|todo| {
                todo.name.as_str() == "Workout"
                    && todo.description.is_none()
                    && todo.priority == Priority::Low
                    && todo.deadline.is_none()
            })
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository));

        let command = UpdateTodoCommand {
            name: TodoName::new("Workout".to_string()).unwrap(),
            description: None,
            priority: Priority::Low,
            deadline: None,
        };

        let updated = service.update_todo(&owner, &todo_id, command).await.unwrap();
        assert_eq!(updated.name.as_str(), "Workout");
    }

    #[tokio::test]
    async fn test_update_todo_missing_is_not_found() {
        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = TodoService::new(Arc::new(repository));

        let command = UpdateTodoCommand {
            name: TodoName::new("Workout".to_string()).unwrap(),
            description: None,
            priority: Priority::Low,
            deadline: None,
        };

        let result = service
            .update_todo(&UserId::new(), &TodoId::new(), command)
            .await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_todo_passes_owner_scope_through() {
        let mut repository = MockTestTodoRepository::new();

        let owner = UserId::new();
        let todo_id = TodoId::new();
        repository
            .expect_delete()
            .withf(move |o, id| *o == owner && *id == todo_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = TodoService::new(Arc::new(repository));

        assert!(service.delete_todo(&owner, &todo_id).await.is_ok());
    }
}
