pub mod device;
pub mod merchant_api;
