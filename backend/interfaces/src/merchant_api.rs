//! Remote HTTP collaborators of the registration form

#![warn(missing_docs)]

use common_utils::errors::CustomResult;
use domain_types::{
    errors::ApiClientError,
    location::Coordinates,
    merchant::{CreateMerchantRequest, MerchantApiResponse, MerchantLookupResponse},
};

/// The merchant onboarding REST API.
#[async_trait::async_trait]
pub trait MerchantApi: Send + Sync {
    /// `POST /api/merchant/create`.
    ///
    /// Success and error statuses (2xx, 4xx, 5xx) come back as a
    /// [`MerchantApiResponse`]. Transport failures and other statuses end up in
    /// the error variant.
    async fn create_merchant(
        &self,
        request: &CreateMerchantRequest,
    ) -> CustomResult<MerchantApiResponse, ApiClientError>;

    /// `GET /api/merchant/{campaign_id}`. Non-success statuses are errors.
    async fn campaign_merchants(
        &self,
        campaign_id: &str,
    ) -> CustomResult<MerchantLookupResponse, ApiClientError>;
}

/// Resolves coordinates into a human readable address.
#[async_trait::async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Display address for `coordinates`, or the "not found" placeholder when
    /// the service knows none.
    async fn reverse(&self, coordinates: Coordinates) -> CustomResult<String, ApiClientError>;
}
