use common_utils::errors::CustomResult;
use domain_types::{errors::LocationError, location::Coordinates};
use error_stack::report;
use interfaces::device::LocationProvider;

/// Position fixed up front, typically from command line flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLocationProvider {
    position: Result<Coordinates, LocationError>,
}

impl StaticLocationProvider {
    pub fn new(position: Result<Coordinates, LocationError>) -> Self {
        Self { position }
    }

    /// No coordinates means the device has no positioning; a single one, or
    /// one outside the valid range, is an unavailable position.
    pub fn from_args(latitude: Option<f64>, longitude: Option<f64>, deny: bool) -> Self {
        let position = match (deny, latitude, longitude) {
            (true, _, _) => Err(LocationError::PermissionDenied),
            (false, None, None) => Err(LocationError::Unsupported),
            (false, Some(latitude), Some(longitude))
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Ok(Coordinates::new(latitude, longitude))
            }
            _ => Err(LocationError::PositionUnavailable),
        };
        Self::new(position)
    }
}

#[async_trait::async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn current_position(&self) -> CustomResult<Coordinates, LocationError> {
        self.position.map_err(|error| report!(error))
    }
}
