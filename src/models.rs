// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

// --- 1. Todo model ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "task_state", rename_all = "UPPERCASE")]
pub enum TaskState {
    Todo,
    Doing,
    Done,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub state: TaskState,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoSchema {
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial patch: a field absent from the JSON body is left untouched, while
/// a field present as `null` clears the column. The outer `Option` tracks
/// presence, the inner one nullability.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTodoSchema {
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub state: Option<TaskState>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTodoSchema {
    /// Merges the fields carried by the patch into an existing row.
    pub fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(deadline) = self.deadline {
            todo.deadline = deadline;
        }
        if let Some(state) = self.state {
            todo.state = state;
        }
    }
}

// --- 2. Auth models ---

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterSchema {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 30, message = "username must be 3-30 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginSchema {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_todo() -> Todo {
        let now = Utc::now();
        Todo {
            id: 1,
            title: "Buy milk".to_string(),
            description: Some("2 liters".to_string()),
            deadline: None,
            state: TaskState::Todo,
            owner_id: 7,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn task_state_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TaskState::Todo).unwrap(), "\"TODO\"");
        assert_eq!(serde_json::to_string(&TaskState::Doing).unwrap(), "\"DOING\"");
        let parsed: TaskState = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(parsed, TaskState::Done);
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: UpdateTodoSchema = serde_json::from_str(r#"{"state":"DONE"}"#).unwrap();
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert_eq!(patch.state, Some(TaskState::Done));

        let patch: UpdateTodoSchema = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert!(patch.deadline.is_none());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut todo = sample_todo();
        let patch: UpdateTodoSchema = serde_json::from_str("{}").unwrap();
        patch.apply(&mut todo);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description.as_deref(), Some("2 liters"));
        assert_eq!(todo.state, TaskState::Todo);
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut todo = sample_todo();
        let patch: UpdateTodoSchema =
            serde_json::from_str(r#"{"title":"Buy bread","description":null}"#).unwrap();
        patch.apply(&mut todo);
        assert_eq!(todo.title, "Buy bread");
        assert_eq!(todo.description, None);
        // untouched fields keep their prior values
        assert_eq!(todo.state, TaskState::Todo);
        assert_eq!(todo.owner_id, 7);
    }

    #[test]
    fn patch_can_move_state_forward() {
        let mut todo = sample_todo();
        let patch: UpdateTodoSchema = serde_json::from_str(r#"{"state":"DOING"}"#).unwrap();
        patch.apply(&mut todo);
        assert_eq!(todo.state, TaskState::Doing);
        assert_eq!(todo.title, "Buy milk");
    }
}
