//! Step-wise validation of the registration form.
//!
//! Each step reports the first rule that fails, in the order listed on the
//! step function.

use std::str::FromStr;

use common_utils::{pii::Email, PeekInterface};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{errors::ValidationError, form::FormData, merchant::CreateMerchantRequest};

#[allow(clippy::expect_used)]
static MOBILE_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid mobile number regex"));

// ASCII word characters, dots and hyphens on both sides of a single `@`
#[allow(clippy::expect_used)]
static UPI_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+$").expect("Invalid UPI ID regex")
});

/// Proof that the merchant details step passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsCheck {
    _private: (),
}

/// A form that passed both steps, ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReady {
    request: CreateMerchantRequest,
}

impl SubmissionReady {
    pub fn request(&self) -> &CreateMerchantRequest {
        &self.request
    }
}

pub fn is_valid_mobile_number(mobile: &str) -> bool {
    MOBILE_NUMBER_REGEX.is_match(mobile)
}

pub fn is_valid_upi_id(upi_id: &str) -> bool {
    UPI_ID_REGEX.is_match(upi_id)
}

/// Step 1 rules:
/// 1. merchant name present
/// 2. mobile number present
/// 3. mobile number is exactly ten digits
/// 4. email, when given, contains `@`
/// 5. both coordinates known
pub fn validate_details(form: &FormData) -> Result<DetailsCheck, ValidationError> {
    if form.merchant_name.trim().is_empty() {
        return Err(ValidationError::MerchantNameRequired);
    }

    let mobile = form.merchant_mobile.peek();
    if mobile.is_empty() {
        return Err(ValidationError::MobileNumberRequired);
    }
    if !is_valid_mobile_number(mobile) {
        return Err(ValidationError::InvalidMobileNumber);
    }

    if let Some(email) = form.merchant_email.as_ref() {
        Email::from_str(email.peek()).map_err(|_| ValidationError::InvalidEmail)?;
    }

    if form.coordinates().is_none() {
        return Err(ValidationError::LocationRequired);
    }

    Ok(DetailsCheck { _private: () })
}

/// Step 2 rules:
/// 1. UPI ID present
/// 2. UPI ID has the `name@handle` shape
/// 3. company present
/// 4. campaign present
pub fn validate_payment_info(
    form: &FormData,
    _details: DetailsCheck,
) -> Result<SubmissionReady, ValidationError> {
    let upi_id = form.upi_id.peek();
    if upi_id.is_empty() {
        return Err(ValidationError::UpiIdRequired);
    }
    if !is_valid_upi_id(upi_id) {
        return Err(ValidationError::InvalidUpiId);
    }

    if form.company.trim().is_empty() {
        return Err(ValidationError::CompanyRequired);
    }

    if form.campaign_id.trim().is_empty() {
        return Err(ValidationError::CampaignIdMissing);
    }

    Ok(SubmissionReady {
        request: CreateMerchantRequest::new(form.clone()),
    })
}
