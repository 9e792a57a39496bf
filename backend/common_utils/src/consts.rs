/// Prefix for environment variable overrides, e.g. `MERCHANT_FORM__MERCHANT_API__BASE_URL`.
pub const ENV_PREFIX: &str = "MERCHANT_FORM";

/// Environment variable selecting the config file to load.
pub const RUN_ENV: &str = "RUN_ENV";

/// Path of the merchant creation endpoint, relative to the API base url.
pub const MERCHANT_CREATE_PATH: &str = "/api/merchant/create";

/// Path prefix of the campaign merchant lookup endpoint.
pub const MERCHANT_LOOKUP_PATH: &str = "/api/merchant";

/// Path of the reverse geocoding endpoint, relative to the geocoder base url.
pub const REVERSE_GEOCODE_PATH: &str = "/reverse";

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";

pub const DEFAULT_USER_AGENT: &str = "merchant-registration-form/0.1";

/// Success message used when the creation endpoint sends none.
pub const MERCHANT_CREATED_MESSAGE: &str = "Merchant created successfully";

/// Shown when the geocoder answers without a `display_name`.
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

// Qr image data source starts with this string
// The base64 image data will be appended to it to image data source
pub const QR_IMAGE_DATA_SOURCE_STRING: &str = "data:image/png;base64";

pub const QR_IMAGE_SIZE: u32 = 400;

/// Quiet zone around the QR symbol, in modules.
pub const QR_MARGIN_MODULES: u32 = 1;

pub const QR_FILE_SUFFIX: &str = "_qr.png";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Environment selected through `RUN_ENV`, development when unset or unknown.
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
