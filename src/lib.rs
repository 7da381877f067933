pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod sources;
pub mod templates_structs;
