// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::auth::{AuthConfig, AuthenticatedEmployer, OptionalAuth};
use crate::database::DatabaseConfig;
use crate::environment::EnvironmentConfig;
use crate::identity::IdentityClient;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{get, post, routes, Request, Response, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/auth/register", data = "<request>")]
pub async fn register(
    request: Json<RegisterRequest>,
    identity: &State<IdentityClient>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<SessionResponse>, Json<ErrorResponse>> {
    handlers::register_handler(request, identity, db_config).await
}

#[post("/auth/login", data = "<request>")]
pub async fn login(
    request: Json<LoginRequest>,
    identity: &State<IdentityClient>,
) -> Result<Json<SessionResponse>, Json<ErrorResponse>> {
    handlers::login_handler(request, identity).await
}

#[get("/jobs?<title>&<location>")]
pub async fn list_jobs(
    title: Option<String>,
    location: Option<String>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobsResponse>, Json<ErrorResponse>> {
    handlers::list_jobs_handler(title, location, db_config).await
}

#[get("/jobs/mine")]
pub async fn my_jobs(
    auth: AuthenticatedEmployer,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<JobsResponse>, Json<ErrorResponse>> {
    handlers::my_jobs_handler(auth, db_config).await
}

#[post("/jobs", data = "<request>")]
pub async fn post_job(
    request: Json<PostJobRequest>,
    auth: AuthenticatedEmployer,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<ErrorResponse>> {
    handlers::post_job_handler(request, auth, db_config).await
}

#[get("/me")]
pub async fn get_current_employer(auth: AuthenticatedEmployer) -> Json<MeResponse> {
    handlers::me_handler(auth).await
}

// Handle authentication errors with a proper error body
#[get("/me", rank = 2)]
pub async fn get_current_employer_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Authentication required or no employer account registered".to_string(),
        "AUTH_ERROR",
        vec!["Log in or register as an employer first".to_string()],
    ))
}

// Public health check with optional employer info
#[get("/health")]
pub async fn health(auth: OptionalAuth) -> Json<&'static str> {
    if let Some(auth) = auth.employer {
        info!(
            "Health check by authenticated employer: {}",
            auth.employer.company_name
        );
    } else {
        info!("Health check by anonymous user");
    }
    Json("OK")
}

// Handle OPTIONS requests for CORS preflight
#[rocket::options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

pub async fn start_web_server(config: EnvironmentConfig, port: u16) -> Result<()> {
    // Initialize database
    let mut db_config = DatabaseConfig::new(config.database_path.clone());

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    let identity = IdentityClient::new(
        config.identity_base_url.clone(),
        config.identity_api_key.clone(),
    )?;

    let mut auth_config = AuthConfig::new(config.identity_project_id.clone());
    if let Err(e) = auth_config.update_public_keys().await {
        error!("Failed to fetch identity provider keys: {}", e);
        return Err(e);
    }

    info!("Starting JobAlert API server on port {}", port);
    info!("Database: {}", db_config.database_path.display());
    info!("Protected endpoints require an identity provider ID token");

    let figment = rocket::Config::figment().merge(("port", port));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(auth_config)
        .manage(db_config)
        .manage(identity)
        .mount(
            "/api",
            routes![
                register,
                login,
                list_jobs,
                my_jobs,
                post_job,
                get_current_employer,
                get_current_employer_error,
                health,
                options
            ],
        )
        .launch()
        .await;

    Ok(())
}
