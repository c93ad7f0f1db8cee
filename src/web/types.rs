// src/web/types.rs
use crate::types::{Employer, Job};
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RegisterRequest {
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PostJobRequest {
    pub title: String,
    /// Defaults to the employer's registered company name when omitted
    pub company_name: Option<String>,
    pub location: String,
    pub requirements: String,
    pub qualifications: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SessionResponse {
    pub success: bool,
    pub account_id: String,
    pub id_token: String,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct EmployerInfo {
    pub id: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Employer> for EmployerInfo {
    fn from(employer: &Employer) -> Self {
        Self {
            id: employer.id.clone(),
            company_name: employer.company_name.clone(),
            email: employer.email.clone(),
            phone: employer.phone.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct MeResponse {
    pub success: bool,
    pub employer: Option<EmployerInfo>,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobsResponse {
    pub success: bool,
    pub jobs: Vec<Job>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code: error_code.to_string(),
            suggestions,
        }
    }
}
