// src/admin_cli.rs
use crate::database::{DatabaseConfig, EmployerRepository, JobRepository};
use crate::types::NewJob;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jobalert-admin")]
#[command(about = "Inspect and maintain the job board database")]
pub struct AdminCli {
    #[command(subcommand)]
    pub command: AdminCommand,

    #[arg(long, default_value = "data/jobalert.db")]
    pub database_path: PathBuf,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List all registered employers
    ListEmployers,
    /// List stored jobs, optionally for one employer
    ListJobs {
        #[arg(long)]
        employer: Option<String>,
    },
    /// Check whether an employer account exists for an email
    Check { email: String },
    /// Import jobs from a CSV file
    /// (title,company_name,location,requirements,qualifications,employer_id)
    Import { csv_file: PathBuf },
    /// Initialize the database
    Init,
}

pub async fn handle_admin_command(cli: AdminCli) -> Result<()> {
    // Initialize database
    let mut db_config = DatabaseConfig::new(cli.database_path.clone());
    db_config.init_pool().await?;
    db_config.migrate().await?;

    let pool = db_config.pool()?;
    let employer_repo = EmployerRepository::new(pool);
    let job_repo = JobRepository::new(pool);

    match cli.command {
        AdminCommand::ListEmployers => match employer_repo.list().await {
            Ok(employers) => {
                if employers.is_empty() {
                    info!("No employers registered.");
                } else {
                    info!(
                        "{:<38} {:<20} {:<25} {:<20}",
                        "ID", "Company", "Email", "Registered"
                    );
                    info!("{}", "-".repeat(103));
                    for employer in employers {
                        info!(
                            "{:<38} {:<20} {:<25} {:<20}",
                            employer.id,
                            employer.company_name,
                            employer.email,
                            employer.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }
            Err(e) => {
                error!("Failed to list employers: {}", e);
            }
        },

        AdminCommand::ListJobs { employer } => {
            let jobs = match employer.as_deref() {
                Some(id) => job_repo.list_by_employer(id).await,
                None => job_repo.list_all().await,
            };
            match jobs {
                Ok(jobs) => {
                    if jobs.is_empty() {
                        info!("No jobs stored.");
                    } else {
                        for job in jobs {
                            info!(
                                "{} | {} | {} (employer: {})",
                                job.title, job.company_name, job.location, job.employer_id
                            );
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to list jobs: {}", e);
                }
            }
        }

        AdminCommand::Check { email } => match employer_repo.find_by_email(&email).await {
            Ok(Some(employer)) => {
                info!(
                    "Email '{}' belongs to employer: {} (id {})",
                    email, employer.company_name, employer.id
                );
                info!(
                    "Registered: {}",
                    employer.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            Ok(None) => {
                info!("No employer account found for email: {}", email);
            }
            Err(e) => {
                error!("Failed to check email: {}", e);
            }
        },

        AdminCommand::Import { csv_file } => {
            if !csv_file.exists() {
                error!("CSV file not found: {}", csv_file.display());
                return Ok(());
            }

            let content = tokio::fs::read_to_string(&csv_file).await?;
            let mut reader = csv::Reader::from_reader(content.as_bytes());

            let mut success_count = 0;
            let mut error_count = 0;

            for result in reader.records() {
                match result {
                    Ok(record) => {
                        if record.len() < 6 {
                            error_count += 1;
                            info!("Skipping invalid record (expected 6 columns)");
                            continue;
                        }

                        let new_job = NewJob {
                            title: record.get(0).unwrap_or("").trim().to_string(),
                            company_name: record.get(1).unwrap_or("").trim().to_string(),
                            location: record.get(2).unwrap_or("").trim().to_string(),
                            requirements: record.get(3).unwrap_or("").trim().to_string(),
                            qualifications: record.get(4).unwrap_or("").trim().to_string(),
                        };
                        let employer_id = record.get(5).unwrap_or("").trim().to_string();

                        match job_repo.create(&new_job, &employer_id).await {
                            Ok(_) => {
                                success_count += 1;
                                info!("Imported: {} ({})", new_job.title, new_job.company_name);
                            }
                            Err(e) => {
                                error_count += 1;
                                info!("Failed to import '{}': {}", new_job.title, e);
                            }
                        }
                    }
                    Err(e) => {
                        error_count += 1;
                        info!("CSV parsing error: {}", e);
                    }
                }
            }

            info!("Import completed:");
            info!("  Success: {}", success_count);
            info!("  Errors:  {}", error_count);
        }

        AdminCommand::Init => {
            info!(
                "Database initialized at: {}",
                cli.database_path.display()
            );
            info!("Tables created: employers, jobs");
        }
    }

    Ok(())
}
