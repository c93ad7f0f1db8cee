// src/types/employer.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account authorized to post jobs. The id is the identity provider's
/// opaque account id; the row is created once at registration and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employer {
    pub id: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}
