pub mod geocoding;
pub mod merchant_client;
pub mod service;
pub use service::*;
