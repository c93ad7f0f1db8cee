// src/types/job.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A posted position as handed to clients. The store-assigned id stays at
/// the store boundary and is not part of this entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub requirements: String,
    pub qualifications: String,
    pub posted_at_millis: i64,
    pub employer_id: String,
}

/// A job posting before persistence. The timestamp and id are assigned by
/// the repository at insert time, the employer id comes from the session.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub requirements: String,
    pub qualifications: String,
}

impl NewJob {
    /// All five fields are required and must be non-empty after trimming.
    /// Checked before any store call ever happens.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("title", &self.title),
            ("company_name", &self.company_name),
            ("location", &self.location),
            ("requirements", &self.requirements),
            ("qualifications", &self.qualifications),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError { field: name });
            }
        }

        Ok(())
    }
}

/// A required field was empty. Reported to the user once, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required field '{}' is empty", self.field)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_job() -> NewJob {
        NewJob {
            title: "Android Developer".to_string(),
            company_name: "TechZone".to_string(),
            location: "Lahore".to_string(),
            requirements: "Kotlin, Jetpack Compose".to_string(),
            qualifications: "BSCS or equivalent".to_string(),
        }
    }

    #[test]
    fn test_validate_complete_job() {
        assert!(complete_job().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_qualifications() {
        let mut job = complete_job();
        job.qualifications = String::new();
        assert_eq!(
            job.validate(),
            Err(ValidationError {
                field: "qualifications"
            })
        );
    }

    #[test]
    fn test_validate_whitespace_only_title() {
        let mut job = complete_job();
        job.title = "   ".to_string();
        assert_eq!(job.validate(), Err(ValidationError { field: "title" }));
    }

    #[test]
    fn test_validation_error_message_names_the_field() {
        let err = ValidationError { field: "location" };
        assert_eq!(err.to_string(), "required field 'location' is empty");
    }
}
