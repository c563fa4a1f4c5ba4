use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoName;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_todo(row: PgRow) -> Result<Todo, TodoError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;
    let user_id: Uuid = row
        .try_get("user_id")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;
    let priority: i32 = row
        .try_get("priority")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;
    let deadline: Option<NaiveDate> = row
        .try_get("deadline")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

    Ok(Todo {
        id: TodoId(id),
        user_id: UserId(user_id),
        name: TodoName::new(name)?,
        description,
        priority: Priority::from_code(priority),
        deadline,
        created_at,
    })
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, description, priority, deadline, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(row_to_todo).collect()
    }

    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, user_id, name, description, priority, deadline, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.user_id.0)
        .bind(todo.name.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.priority.code())
        .bind(todo.deadline)
        .bind(todo.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, description, priority, deadline, created_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.map(row_to_todo).transpose()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET name = $2, description = $3, priority = $4, deadline = $5
            WHERE id = $1
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.name.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.priority.code())
        .bind(todo.deadline)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        // Both owner and id must match; a foreign todo deletes zero rows and
        // reads as not-found.
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
