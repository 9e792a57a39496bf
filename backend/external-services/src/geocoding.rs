use common_utils::{
    consts,
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, RequestBuilder},
};
use domain_types::{
    errors::ApiClientError,
    location::Coordinates,
    types::{GeocodingParams, HttpParams},
};
use error_stack::{report, ResultExt};
use interfaces::merchant_api::ReverseGeocoder;

use crate::service::call_api;

#[derive(Debug, Default, serde::Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    display_name: Option<String>,
}

/// Reverse geocoding against a Nominatim compatible service.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    params: GeocodingParams,
    http_params: HttpParams,
}

impl NominatimClient {
    pub fn new(params: GeocodingParams, http_params: HttpParams) -> Self {
        Self {
            params,
            http_params,
        }
    }

    fn reverse_url(&self, coordinates: Coordinates) -> CustomResult<url::Url, ApiClientError> {
        let mut url = url::Url::parse(&format!(
            "{}{}",
            self.params.base_url.trim_end_matches('/'),
            consts::REVERSE_GEOCODE_PATH
        ))
        .change_context(ApiClientError::UrlEncodingFailed)?;
        url.query_pairs_mut()
            .append_pair("lat", &coordinates.latitude.to_string())
            .append_pair("lon", &coordinates.longitude.to_string())
            .append_pair("format", "json");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ReverseGeocoder for NominatimClient {
    #[tracing::instrument(skip(self))]
    async fn reverse(&self, coordinates: Coordinates) -> CustomResult<String, ApiClientError> {
        let url = self.reverse_url(coordinates)?;
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(url.as_str())
            .attach_default_headers()
            .header("user-agent", &self.params.user_agent)
            .build();

        match call_api(&self.http_params, request, "reverse_geocode").await? {
            Ok(response) => {
                let body = response
                    .response
                    .parse_struct::<ReverseGeocodeResponse>("ReverseGeocodeResponse")
                    .change_context(ApiClientError::ResponseDecodingFailed)?;
                Ok(body
                    .display_name
                    .filter(|address| !address.trim().is_empty())
                    .unwrap_or_else(|| consts::ADDRESS_NOT_FOUND.to_string()))
            }
            Err(response) => Err(report!(ApiClientError::ErrorResponse {
                status_code: response.status_code,
            })),
        }
    }
}
