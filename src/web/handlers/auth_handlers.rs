// src/web/handlers/auth_handlers.rs

use crate::auth::AuthenticatedEmployer;
use crate::database::{DatabaseConfig, EmployerRepository};
use crate::identity::{IdentityClient, SIGN_IN_REJECTED_MESSAGE};
use crate::web::types::{
    EmployerInfo, ErrorResponse, LoginRequest, MeResponse, RegisterRequest, SessionResponse,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn register_handler(
    request: Json<RegisterRequest>,
    identity: &State<IdentityClient>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<SessionResponse>, Json<ErrorResponse>> {
    info!("Employer registration requested for {}", request.email);

    let session = match identity.sign_up(&request.email, &request.password).await {
        Ok(session) => session,
        Err(e) => {
            error!("Sign-up rejected for {}: {}", request.email, e);
            return Err(Json(ErrorResponse::new(
                e.to_string(),
                "AUTH_ERROR",
                vec!["Check the email address and try again".to_string()],
            )));
        }
    };

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(Json(ErrorResponse::new(
                "Store error occurred".to_string(),
                "STORE_ERROR",
                vec!["Try again in a few moments".to_string()],
            )));
        }
    };

    // Profile fields are stored as given; only the provider call required
    // email and password to be present.
    if let Err(e) = EmployerRepository::new(pool)
        .create(
            &session.account_id,
            &request.company_name,
            &request.email,
            &request.phone,
        )
        .await
    {
        error!("Failed to store employer {}: {}", request.email, e);
        return Err(Json(ErrorResponse::new(
            "Failed to store employer record".to_string(),
            "STORE_ERROR",
            vec!["Try again in a few moments".to_string()],
        )));
    }

    Ok(Json(SessionResponse {
        success: true,
        account_id: session.account_id,
        id_token: session.id_token,
        message: "Employer Registered!".to_string(),
    }))
}

pub async fn login_handler(
    request: Json<LoginRequest>,
    identity: &State<IdentityClient>,
) -> Result<Json<SessionResponse>, Json<ErrorResponse>> {
    match identity.sign_in(&request.email, &request.password).await {
        Ok(session) => {
            info!("Employer logged in: {}", request.email);
            Ok(Json(SessionResponse {
                success: true,
                account_id: session.account_id,
                id_token: session.id_token,
                message: "Logged in".to_string(),
            }))
        }
        Err(e) => {
            // One coarse message no matter the underlying cause
            error!("Sign-in rejected for {}: {}", request.email, e);
            Err(Json(ErrorResponse::new(
                SIGN_IN_REJECTED_MESSAGE.to_string(),
                "AUTH_ERROR",
                vec![],
            )))
        }
    }
}

pub async fn me_handler(auth: AuthenticatedEmployer) -> Json<MeResponse> {
    let employer = &auth.employer;
    Json(MeResponse {
        success: true,
        employer: Some(EmployerInfo::from(employer)),
        message: format!("Authenticated as {}", employer.company_name),
    })
}
