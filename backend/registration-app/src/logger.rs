pub mod config;

pub mod setup;
pub use setup::setup;

pub use tracing::{debug, error, info, warn};
