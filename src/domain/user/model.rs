use chrono::{DateTime, Utc};

/// User model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
            created_at: Utc::now(),
        }
    }
}
