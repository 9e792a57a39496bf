pub mod app;
pub mod cli;
pub mod configs;
pub mod download;
pub mod error;
pub mod location;
pub mod logger;
