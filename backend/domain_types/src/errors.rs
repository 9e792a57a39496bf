use common_utils::errors::ErrorSwitchFrom;

/// Errors raised while talking to a remote HTTP collaborator.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiClientError {
    #[error("Base url for the merchant API is not configured")]
    MissingBaseUrl,
    #[error("URL encoding of request failed")]
    UrlEncodingFailed,
    #[error("Request body encoding failed")]
    RequestEncodingFailed,
    #[error("Failed to construct API client")]
    ClientConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Failed to send request: {0}")]
    RequestNotSent(String),
    #[error("Server responded with a request timeout")]
    RequestTimeoutReceived,
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with status code {status_code}")]
    ErrorResponse { status_code: u16 },
    #[error("Unexpected response from server")]
    UnexpectedServerResponse,
}

/// Client-side field validation failures, in the exact wording shown to the user.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Merchant name is required")]
    MerchantNameRequired,
    #[error("Mobile number is required")]
    MobileNumberRequired,
    #[error("Please enter a valid 10-digit mobile number")]
    InvalidMobileNumber,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error(
        "Location access is required to proceed. Please enable location sharing and refresh the page"
    )]
    LocationRequired,
    #[error("UPI ID is required")]
    UpiIdRequired,
    #[error("Please enter a valid UPI ID")]
    InvalidUpiId,
    #[error("Company name is required")]
    CompanyRequired,
    #[error("Campaign ID is missing")]
    CampaignIdMissing,
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location access denied. Please enable location sharing and refresh the page")]
    PermissionDenied,
    #[error("Unable to retrieve your location. Please try again")]
    PositionUnavailable,
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Failed to get address")]
    ReverseGeocodingFailed,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("QR image is not a base64 PNG data url")]
    InvalidDataUrl,
    #[error("Failed to write the downloaded file")]
    WriteFailed,
}

/// Everything the form can show in its error slot.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Campaign ID is required")]
    CampaignIdRequired,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("API base URL is not configured")]
    ApiUrlNotConfigured,
    #[error("{message}")]
    MerchantCreationFailed { message: String },
    #[error("Something went wrong while creating the merchant. Please try again")]
    MerchantCreationUnavailable,
    #[error("Failed to generate QR code")]
    QrGenerationFailed,
    #[error("QR code is not available")]
    QrNotAvailable,
    #[error("Failed to download QR code")]
    DownloadFailed,
}

pub const MERCHANT_CREATION_FALLBACK_MESSAGE: &str = "Failed to create merchant";

impl RegistrationError {
    /// Failure reported by the creation endpoint, with the generic wording
    /// when the server sent no message.
    pub fn creation_failed(message: Option<String>) -> Self {
        Self::MerchantCreationFailed {
            message: message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| MERCHANT_CREATION_FALLBACK_MESSAGE.to_string()),
        }
    }
}

impl ErrorSwitchFrom<ApiClientError> for RegistrationError {
    fn switch_from(error: &ApiClientError) -> Self {
        match error {
            ApiClientError::MissingBaseUrl => Self::ApiUrlNotConfigured,
            ApiClientError::ErrorResponse { .. } => Self::creation_failed(None),
            ApiClientError::UrlEncodingFailed
            | ApiClientError::RequestEncodingFailed
            | ApiClientError::ClientConstructionFailed
            | ApiClientError::InvalidProxyConfiguration
            | ApiClientError::HeaderMapConstructionFailed
            | ApiClientError::RequestNotSent(_)
            | ApiClientError::RequestTimeoutReceived
            | ApiClientError::ResponseDecodingFailed
            | ApiClientError::UnexpectedServerResponse => Self::MerchantCreationUnavailable,
        }
    }
}

impl ErrorSwitchFrom<DownloadError> for RegistrationError {
    fn switch_from(_error: &DownloadError) -> Self {
        Self::DownloadFailed
    }
}
