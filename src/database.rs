// src/database.rs
use crate::types::{Employer, Job, NewJob};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());
        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool.as_ref().ok_or_else(|| {
            anyhow::anyhow!("Database pool not initialized. Call init_pool() first.")
        })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        run_migrations(self.pool()?).await
    }
}

/// Create the `employers` and `jobs` tables with their indexes
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employers (
            id TEXT PRIMARY KEY,
            company_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            company_name TEXT NOT NULL,
            location TEXT NOT NULL,
            requirements TEXT NOT NULL,
            qualifications TEXT NOT NULL,
            posted_at_millis INTEGER NOT NULL,
            employer_id TEXT NOT NULL REFERENCES employers(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_employer_id ON jobs(employer_id);")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_employers_email ON employers(email);")
        .execute(pool)
        .await?;

    info!("Database migrations completed successfully");
    Ok(())
}

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch every job in insertion order. An empty collection yields the
    /// fixed fallback demo set instead; stored jobs are never mixed with
    /// the fallback.
    pub async fn list_all(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT title, company_name, location, requirements, qualifications,
                   posted_at_millis, employer_id
            FROM jobs
            ORDER BY rowid ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        if jobs.is_empty() {
            info!("Job collection is empty, serving fallback demo set");
            return Ok(sample_jobs());
        }

        Ok(jobs)
    }

    /// Fetch only the jobs posted by the given employer, in store order.
    /// Unlike `list_all`, an empty result stays empty.
    pub async fn list_by_employer(&self, employer_id: &str) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT title, company_name, location, requirements, qualifications,
                   posted_at_millis, employer_id
            FROM jobs
            WHERE employer_id = ?
            ORDER BY rowid ASC
            "#,
        )
        .bind(employer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(jobs)
    }

    /// Insert a new job with a server-assigned id and the current timestamp.
    /// Validation runs first, so an incomplete posting never reaches the
    /// store; the owning employer must already exist.
    pub async fn create(&self, new_job: &NewJob, employer_id: &str) -> Result<Job> {
        new_job.validate()?;

        let employer_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employers WHERE id = ?")
                .bind(employer_id)
                .fetch_one(self.pool)
                .await?;
        if employer_exists == 0 {
            anyhow::bail!("No employer account found for id: {}", employer_id);
        }

        let id = Uuid::new_v4().to_string();
        let posted_at_millis = Utc::now().timestamp_millis();

        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, company_name, location, requirements,
                              qualifications, posted_at_millis, employer_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new_job.title)
        .bind(&new_job.company_name)
        .bind(&new_job.location)
        .bind(&new_job.requirements)
        .bind(&new_job.qualifications)
        .bind(posted_at_millis)
        .bind(employer_id)
        .execute(self.pool)
        .await?;

        info!(
            "Job posted: {} at {} by employer {}",
            new_job.title, new_job.location, employer_id
        );

        Ok(Job {
            title: new_job.title.clone(),
            company_name: new_job.company_name.clone(),
            location: new_job.location.clone(),
            requirements: new_job.requirements.clone(),
            qualifications: new_job.qualifications.clone(),
            posted_at_millis,
            employer_id: employer_id.to_string(),
        })
    }
}

pub struct EmployerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EmployerRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find an employer by account id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Employer>> {
        let employer = sqlx::query_as::<_, Employer>(
            r#"
            SELECT id, company_name, email, phone, created_at
            FROM employers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(employer)
    }

    /// Find an employer by registration email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Employer>> {
        let employer = sqlx::query_as::<_, Employer>(
            r#"
            SELECT id, company_name, email, phone, created_at
            FROM employers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(employer)
    }

    /// Create the employer row keyed by the provider-assigned account id.
    /// Called exactly once, right after a successful sign-up.
    pub async fn create(
        &self,
        id: &str,
        company_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Employer> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO employers (id, company_name, email, phone, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(company_name)
        .bind(email)
        .bind(phone)
        .bind(now)
        .execute(self.pool)
        .await?;

        info!("Registered employer: {} ({})", company_name, email);

        Ok(Employer {
            id: id.to_string(),
            company_name: company_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            created_at: now,
        })
    }

    /// List every registered employer, oldest first
    pub async fn list(&self) -> Result<Vec<Employer>> {
        let employers = sqlx::query_as::<_, Employer>(
            r#"
            SELECT id, company_name, email, phone, created_at
            FROM employers
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(employers)
    }
}

/// Demo jobs shown when the store's job collection is empty
pub fn sample_jobs() -> Vec<Job> {
    let demo = [
        (
            "Android Developer",
            "TechZone",
            "Lahore",
            "Kotlin, Jetpack Compose, Firebase",
            "BSCS or equivalent",
        ),
        (
            "AI Engineer",
            "FutureAI",
            "Karachi",
            "Python, ML, TensorFlow",
            "BS/MS in AI or Data Science",
        ),
        (
            "Backend Developer",
            "NetSol",
            "Islamabad",
            "Rust or Go, SQL, REST APIs",
            "BS in Computer Science",
        ),
        (
            "UI/UX Designer",
            "System Ltd",
            "Lahore",
            "Figma, design systems",
            "Portfolio of shipped work",
        ),
    ];

    demo.iter()
        .map(
            |(title, company_name, location, requirements, qualifications)| Job {
                title: title.to_string(),
                company_name: company_name.to_string(),
                location: location.to_string(),
                requirements: requirements.to_string(),
                qualifications: qualifications.to_string(),
                posted_at_millis: 0,
                employer_id: "demo".to_string(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationError;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        run_migrations(&pool).await.expect("migrations");
        pool
    }

    async fn register_employer(pool: &SqlitePool, id: &str, company: &str) {
        EmployerRepository::new(pool)
            .create(id, company, &format!("{}@example.com", id), "0300-0000000")
            .await
            .expect("employer insert");
    }

    fn new_job(title: &str, company: &str, location: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            company_name: company.to_string(),
            location: location.to_string(),
            requirements: "2+ years experience".to_string(),
            qualifications: "BS in Computer Science".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_all_empty_store_returns_fallback_set() {
        let pool = test_pool().await;
        let jobs = JobRepository::new(&pool).list_all().await.unwrap();
        assert_eq!(jobs, sample_jobs());
    }

    #[tokio::test]
    async fn test_list_all_nonempty_store_never_mixes_fallback() {
        let pool = test_pool().await;
        register_employer(&pool, "e1", "TechZone").await;

        let repo = JobRepository::new(&pool);
        repo.create(&new_job("Data Scientist", "TechZone", "Karachi"), "e1")
            .await
            .unwrap();

        let jobs = repo.list_all().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Data Scientist");
    }

    #[tokio::test]
    async fn test_list_by_employer_returns_exact_subset_in_store_order() {
        let pool = test_pool().await;
        register_employer(&pool, "e1", "TechZone").await;
        register_employer(&pool, "e2", "FutureAI").await;

        let repo = JobRepository::new(&pool);
        repo.create(&new_job("Android Developer", "TechZone", "Lahore"), "e1")
            .await
            .unwrap();
        repo.create(&new_job("AI Engineer", "FutureAI", "Karachi"), "e2")
            .await
            .unwrap();
        repo.create(&new_job("Web Developer", "TechZone", "Islamabad"), "e1")
            .await
            .unwrap();

        let mine = repo.list_by_employer("e1").await.unwrap();
        let titles: Vec<&str> = mine.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Android Developer", "Web Developer"]);
        assert!(mine.iter().all(|j| j.employer_id == "e1"));
    }

    #[tokio::test]
    async fn test_list_by_employer_empty_stays_empty() {
        let pool = test_pool().await;
        let jobs = JobRepository::new(&pool)
            .list_by_employer("nobody")
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_qualifications_without_writing() {
        let pool = test_pool().await;
        register_employer(&pool, "e1", "TechZone").await;

        let mut job = new_job("Android Developer", "TechZone", "Lahore");
        job.qualifications = String::new();

        let repo = JobRepository::new(&pool);
        let err = repo.create(&job, "e1").await.unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_employer() {
        let pool = test_pool().await;
        let repo = JobRepository::new(&pool);
        let result = repo
            .create(&new_job("Android Developer", "TechZone", "Lahore"), "ghost")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let pool = test_pool().await;
        register_employer(&pool, "e1", "TechZone").await;

        let posting = new_job("Game Developer", "TechZone", "Lahore");
        let before = Utc::now().timestamp_millis();
        JobRepository::new(&pool)
            .create(&posting, "e1")
            .await
            .unwrap();
        let after = Utc::now().timestamp_millis();

        let jobs = JobRepository::new(&pool)
            .list_by_employer("e1")
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, posting.title);
        assert_eq!(job.company_name, posting.company_name);
        assert_eq!(job.location, posting.location);
        assert_eq!(job.requirements, posting.requirements);
        assert_eq!(job.qualifications, posting.qualifications);
        assert!(job.posted_at_millis >= before && job.posted_at_millis <= after);
    }

    #[tokio::test]
    async fn test_employer_lookup_by_email() {
        let pool = test_pool().await;
        register_employer(&pool, "e1", "TechZone").await;

        let repo = EmployerRepository::new(&pool);
        let found = repo.find_by_email("e1@example.com").await.unwrap();
        assert_eq!(found.map(|e| e.id), Some("e1".to_string()));

        let missing = repo.find_by_email("unknown@example.com").await.unwrap();
        assert!(missing.is_none());
    }
}
