// src/types/mod.rs
//! Entity and validation types shared across the repository and web layers

pub mod employer;
pub mod job;

pub use employer::Employer;
pub use job::{Job, NewJob, ValidationError};
