// src/web/handlers/job_handlers.rs

use crate::auth::AuthenticatedEmployer;
use crate::database::{DatabaseConfig, JobRepository};
use crate::search::filter_jobs;
use crate::types::NewJob;
use crate::web::types::{ActionResponse, ErrorResponse, JobsResponse, PostJobRequest};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

fn store_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Store error occurred".to_string(),
        "STORE_ERROR",
        vec!["Try again in a few moments".to_string()],
    ))
}

pub async fn list_jobs_handler(
    title: Option<String>,
    location: Option<String>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobsResponse>, Json<ErrorResponse>> {
    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(store_error());
        }
    };

    let jobs = match JobRepository::new(pool).list_all().await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to list jobs: {}", e);
            return Err(store_error());
        }
    };

    let jobs = filter_jobs(
        jobs,
        title.as_deref().unwrap_or(""),
        location.as_deref().unwrap_or(""),
    );

    Ok(Json(JobsResponse {
        success: true,
        jobs,
    }))
}

pub async fn my_jobs_handler(
    auth: AuthenticatedEmployer,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobsResponse>, Json<ErrorResponse>> {
    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(store_error());
        }
    };

    match JobRepository::new(pool)
        .list_by_employer(&auth.account_id)
        .await
    {
        Ok(jobs) => Ok(Json(JobsResponse {
            success: true,
            jobs,
        })),
        Err(e) => {
            error!(
                "Failed to list jobs for employer {}: {}",
                auth.account_id, e
            );
            Err(store_error())
        }
    }
}

pub async fn post_job_handler(
    request: Json<PostJobRequest>,
    auth: AuthenticatedEmployer,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<ErrorResponse>> {
    let request = request.into_inner();

    info!(
        "Employer {} posting job: {}",
        auth.employer.company_name, request.title
    );

    // The company field is prefilled from the employer profile on the
    // client; an omitted or blank value keeps the registered name.
    let company_name = request
        .company_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| auth.employer.company_name.clone());

    let new_job = NewJob {
        title: request.title,
        company_name,
        location: request.location,
        requirements: request.requirements,
        qualifications: request.qualifications,
    };

    if let Err(e) = new_job.validate() {
        return Err(Json(ErrorResponse::new(
            "Please fill all fields".to_string(),
            "VALIDATION_ERROR",
            vec![format!("Provide a value for '{}'", e.field)],
        )));
    }

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(store_error());
        }
    };

    match JobRepository::new(pool)
        .create(&new_job, &auth.account_id)
        .await
    {
        Ok(_) => Ok(Json(ActionResponse {
            success: true,
            message: "Job Posted Successfully!".to_string(),
        })),
        Err(e) => {
            error!(
                "Failed to post job for employer {}: {}",
                auth.account_id, e
            );
            Err(Json(ErrorResponse::new(
                "Failed to post job".to_string(),
                "STORE_ERROR",
                vec!["Try again in a few moments".to_string()],
            )))
        }
    }
}
