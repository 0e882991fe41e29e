// src/todo.rs
//
// Owner-scoped CRUD over the todos table. Every statement filters on
// owner_id, so a row belonging to someone else is indistinguishable from a
// row that does not exist.
use sqlx::PgPool;

use crate::models::{CreateTodoSchema, Todo, UpdateTodoSchema};

pub async fn create_todo(
    db: &PgPool,
    owner_id: i32,
    fields: CreateTodoSchema,
) -> Result<Todo, sqlx::Error> {
    // state is left to its column default (TODO); the creation payload
    // cannot set it.
    sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (title, description, deadline, owner_id)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.deadline)
    .bind(owner_id)
    .fetch_one(db)
    .await
}

pub async fn list_todos(
    db: &PgPool,
    owner_id: i32,
    skip: i64,
    limit: i64,
) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>(
        "SELECT * FROM todos WHERE owner_id = $1 ORDER BY id OFFSET $2 LIMIT $3",
    )
    .bind(owner_id)
    .bind(skip)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn get_todo(db: &PgPool, owner_id: i32, id: i32) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
}

pub async fn update_todo(
    db: &PgPool,
    owner_id: i32,
    id: i32,
    patch: UpdateTodoSchema,
) -> Result<Option<Todo>, sqlx::Error> {
    let Some(mut todo) = get_todo(db, owner_id, id).await? else {
        return Ok(None);
    };

    patch.apply(&mut todo);

    sqlx::query_as::<_, Todo>(
        "UPDATE todos SET
            title = $1,
            description = $2,
            deadline = $3,
            state = $4,
            updated_at = NOW()
         WHERE id = $5 AND owner_id = $6
         RETURNING *",
    )
    .bind(todo.title)
    .bind(todo.description)
    .bind(todo.deadline)
    .bind(todo.state)
    .bind(id)
    .bind(owner_id)
    .fetch_optional(db)
    .await
}

pub async fn delete_todo(db: &PgPool, owner_id: i32, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
