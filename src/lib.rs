// src/lib.rs
pub mod admin_cli;
pub mod auth;
pub mod database;
pub mod environment;
pub mod identity;
pub mod search;
pub mod types;
pub mod web;

pub use web::start_web_server;
