use common_utils::{
    consts,
    errors::CustomResult,
    ext_traits::{BytesExt, Encode},
    request::{Method, RequestBuilder},
};
use domain_types::{
    errors::ApiClientError,
    merchant::{
        CreateMerchantRequest, CreateMerchantResponse, MerchantApiResponse,
        MerchantLookupResponse,
    },
    types::{HttpParams, MerchantApiParams},
};
use error_stack::{report, ResultExt};
use interfaces::merchant_api::MerchantApi;
use serde_json::json;

use crate::service::{call_api, info_log, warn_log};

/// reqwest-backed client of the merchant onboarding API.
#[derive(Debug, Clone)]
pub struct MerchantClient {
    params: MerchantApiParams,
    http_params: HttpParams,
}

impl MerchantClient {
    pub fn new(params: MerchantApiParams, http_params: HttpParams) -> Self {
        Self {
            params,
            http_params,
        }
    }

    fn base_url(&self) -> CustomResult<&str, ApiClientError> {
        self.params
            .base_url()
            .map(|base_url| base_url.trim_end_matches('/'))
            .ok_or_else(|| report!(ApiClientError::MissingBaseUrl))
    }

    fn create_url(&self) -> CustomResult<String, ApiClientError> {
        Ok(format!("{}{}", self.base_url()?, consts::MERCHANT_CREATE_PATH))
    }

    fn lookup_url(&self, campaign_id: &str) -> CustomResult<url::Url, ApiClientError> {
        let mut url = url::Url::parse(&format!(
            "{}{}",
            self.base_url()?,
            consts::MERCHANT_LOOKUP_PATH
        ))
        .change_context(ApiClientError::UrlEncodingFailed)?;
        url.path_segments_mut()
            .map_err(|()| report!(ApiClientError::UrlEncodingFailed))?
            .push(campaign_id);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl MerchantApi for MerchantClient {
    #[tracing::instrument(skip_all, fields(campaign_id = %request.campaign_id()))]
    async fn create_merchant(
        &self,
        request: &CreateMerchantRequest,
    ) -> CustomResult<MerchantApiResponse, ApiClientError> {
        let url = self.create_url()?;
        tracing::info!(form = ?request.form(), "creating merchant");

        let body = request
            .encode_to_value()
            .change_context(ApiClientError::RequestEncodingFailed)?;
        let http_request = RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .attach_default_headers()
            .set_body(body)
            .build();

        match call_api(&self.http_params, http_request, "create_merchant").await? {
            Ok(response) => {
                let body = response
                    .response
                    .parse_struct::<CreateMerchantResponse>("CreateMerchantResponse")
                    .change_context(ApiClientError::ResponseDecodingFailed)?;
                Ok(MerchantApiResponse {
                    status_code: response.status_code,
                    body,
                })
            }
            Err(response) => {
                // error bodies are best effort, the status alone decides the outcome
                let body = response
                    .response
                    .parse_struct::<CreateMerchantResponse>("CreateMerchantResponse")
                    .unwrap_or_else(|error| {
                        warn_log(
                            "CREATE_MERCHANT_ERROR_BODY",
                            &json!(format!("Unparseable error body: {error:?}")),
                        );
                        CreateMerchantResponse::default()
                    });
                info_log(
                    "CREATE_MERCHANT_REJECTED",
                    &json!({ "status_code": response.status_code }),
                );
                Ok(MerchantApiResponse {
                    status_code: response.status_code,
                    body,
                })
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn campaign_merchants(
        &self,
        campaign_id: &str,
    ) -> CustomResult<MerchantLookupResponse, ApiClientError> {
        let url = self.lookup_url(campaign_id)?;
        let http_request = RequestBuilder::new()
            .method(Method::Get)
            .url(url.as_str())
            .attach_default_headers()
            .build();

        match call_api(&self.http_params, http_request, "campaign_merchants").await? {
            Ok(response) => response
                .response
                .parse_struct::<MerchantLookupResponse>("MerchantLookupResponse")
                .change_context(ApiClientError::ResponseDecodingFailed),
            Err(response) => Err(report!(ApiClientError::ErrorResponse {
                status_code: response.status_code,
            })),
        }
    }
}
