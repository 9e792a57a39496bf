//! Capabilities the hosting device provides to the form

use common_utils::errors::CustomResult;
use domain_types::{
    errors::{DownloadError, LocationError},
    location::Coordinates,
};

/// Source of the device's current position.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    /// Fails with [`LocationError::PermissionDenied`] when the user refused
    /// access and [`LocationError::Unsupported`] when the device has no
    /// positioning at all.
    async fn current_position(&self) -> CustomResult<Coordinates, LocationError>;
}

/// Hands a rendered file over to the user.
#[async_trait::async_trait]
pub trait FileDownloader: Send + Sync {
    /// Saves the resource behind `data_url` under `file_name`.
    async fn download(&self, file_name: &str, data_url: &str) -> CustomResult<(), DownloadError>;
}
