use domain_types::{errors::RegistrationError, merchant::MerchantRecord, validation::DetailsCheck};

use crate::utils::qr_code::QrImage;

/// The two pages of the form. Payment info can only be entered with a
/// passed details check in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    Details,
    PaymentInfo(DetailsCheck),
}

impl FormStep {
    /// One-based page number shown to the user.
    pub const fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::PaymentInfo(_) => 2,
        }
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FormPhase {
    Details,
    PaymentInfo,
    Submitting,
    Done,
}

/// Result of a single [`crate::RegistrationForm::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SubmitOutcome {
    /// Details passed, the payment page is now shown.
    AdvancedToPaymentInfo,
    /// A field rule failed, nothing was sent.
    Rejected,
    /// The merchant exists and the completion dialog is open.
    Created,
    /// The creation call failed or was refused.
    Failed,
    /// Another action is still running.
    Busy,
}

/// Transient presentation state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub error: Option<RegistrationError>,
    pub success: Option<String>,
    pub loading: bool,
    pub location_loading: bool,
    pub qr_loading: bool,
    pub dialog_open: bool,
    pub qr_image: Option<QrImage>,
    pub submission: Option<MerchantRecord>,
}

impl UiState {
    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.location_loading
    }
}
