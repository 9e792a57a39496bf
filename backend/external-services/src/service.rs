use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{errors::ApiClientError, types::HttpParams};
use error_stack::{report, ResultExt};
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

/// Raw answer of a remote call.
#[derive(Clone, Debug)]
pub struct Response {
    pub response: bytes::Bytes,
    pub status_code: u16,
}

/// Sends `request` and sorts the answer by status: `Ok` for 2xx/3xx, `Err`
/// for 4xx/5xx. Transport failures are reported as [`ApiClientError`].
#[tracing::instrument(
    name = "call_external_api",
    skip_all,
    fields(
        request.url = Empty,
        request.method = Empty,
        response.status_code = Empty,
        message_ = "Golden Log Line (outgoing)",
        flow = %flow_name,
        latency = Empty,
    )
)]
pub async fn call_api(
    http_params: &HttpParams,
    request: Request,
    flow_name: &str,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let start = tokio::time::Instant::now();
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = http_params
        .proxy
        .bypass_proxy_urls
        .iter()
        .any(|bypass| url.as_str().starts_with(bypass.as_str()));

    let client = create_client(http_params, should_bypass_proxy)?;

    tracing::Span::current().record("request.url", tracing::field::display(&url));
    tracing::Span::current().record("request.method", tracing::field::display(request.method));

    let headers = request.headers.construct_header_map()?;

    let request_builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => client.post(url),
        Method::Put => client.put(url),
        Method::Delete => client.delete(url),
        Method::Patch => client.patch(url),
    };
    let request_builder = match request.body {
        Some(RequestContent::Json(payload)) => request_builder.json(&payload),
        None => request_builder,
    }
    .add_headers(headers);

    let response = request_builder.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!(format!("Unable to send request to {flow_name}.")),
        );
        report!(api_error)
    });

    let result = handle_response(response).await;

    let latency = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::Span::current().record("latency", latency);
    if let Ok(Ok(response) | Err(response)) = &result {
        tracing::Span::current().record("response.status_code", response.status_code);
    }
    tracing::info!(tag = ?Tag::OutgoingApi, "external call completed");

    result
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

pub fn create_client(
    http_params: &HttpParams,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if http_params.proxy.is_proxy_configured(should_bypass_proxy) {
        &PROXIED_CLIENT
    } else {
        &NON_PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(http_params, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    http_params: &HttpParams,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let proxy_config = &http_params.proxy;
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if let Some(timeout) = http_params.request_timeout_secs {
        client_builder = client_builder.timeout(Duration::from_secs(timeout));
    }

    if !proxy_config.is_proxy_configured(should_bypass_proxy) {
        return Ok(client_builder.no_proxy());
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    response: CustomResult<reqwest::Response, ApiClientError>,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let resp = response?;
    let status_code = resp.status().as_u16();
    match status_code {
        200..=299 | 302 => {
            let response = resp
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                response,
                status_code,
            }))
        }
        400..=599 => {
            let bytes = resp.bytes().await.map_err(|error| {
                report!(error).change_context(ApiClientError::ResponseDecodingFailed)
            })?;

            Ok(Err(Response {
                response: bytes,
                status_code,
            }))
        }
        _ => {
            info_log(
                "UNEXPECTED_RESPONSE",
                &json!(format!("Unexpected response from server with status {status_code}.")),
            );
            Err(report!(ApiClientError::UnexpectedServerResponse))
        }
    }
}

pub(crate) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(crate) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Default, serde::Deserialize, Clone, strum::EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}
