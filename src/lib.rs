pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pacing;
pub mod scheduler;
pub mod services;
pub mod sources;
