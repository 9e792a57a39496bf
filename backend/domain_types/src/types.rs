use common_utils::consts;
use serde::{Deserialize, Serialize};

/// Where the merchant onboarding API lives and how the form uses it.
#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq, Eq)]
pub struct MerchantApiParams {
    /// base url, e.g. `https://api.example.com`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Take the QR link from the campaign merchant listing instead of the
    /// creation response.
    #[serde(default)]
    pub resolve_qr_via_lookup: bool,
}

impl MerchantApiParams {
    /// The configured base url, with blank values treated as missing.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|base_url| !base_url.is_empty())
    }
}

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct GeocodingParams {
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Sent as `User-Agent`; the public Nominatim instance rejects anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GeocodingParams {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_geocoding_base_url() -> String {
    consts::DEFAULT_GEOCODING_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    consts::DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq, Hash)]
pub struct Proxy {
    #[serde(default)]
    pub http_url: Option<String>,
    #[serde(default)]
    pub https_url: Option<String>,
    #[serde(default)]
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    pub fn is_proxy_configured(&self, should_bypass_proxy: bool) -> bool {
        !should_bypass_proxy && (self.http_url.is_some() || self.https_url.is_some())
    }
}

/// Settings shared by every outbound HTTP client.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct HttpParams {
    #[serde(default)]
    pub proxy: Proxy,
    /// Whole-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_base_url_is_missing() {
        let params = MerchantApiParams {
            base_url: Some("  ".to_string()),
            resolve_qr_via_lookup: false,
        };
        assert_eq!(params.base_url(), None);

        let params = MerchantApiParams {
            base_url: Some("https://api.example.com".to_string()),
            resolve_qr_via_lookup: false,
        };
        assert_eq!(params.base_url(), Some("https://api.example.com"));
    }

    #[test]
    fn test_proxy_configuration() {
        let proxy = Proxy::default();
        assert!(!proxy.is_proxy_configured(false));

        let proxy = Proxy {
            https_url: Some("http://proxy.internal:3128".to_string()),
            ..Proxy::default()
        };
        assert!(proxy.is_proxy_configured(false));
        assert!(!proxy.is_proxy_configured(true));
    }
}
