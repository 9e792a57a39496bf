use serde::{Deserialize, Serialize};

use crate::form::FormData;

/// Body of `POST /api/merchant/create`.
///
/// Only step-2 validation can build one (see [`crate::validation::SubmissionReady`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CreateMerchantRequest(FormData);

impl CreateMerchantRequest {
    pub(crate) fn new(form: FormData) -> Self {
        Self(form)
    }

    pub fn form(&self) -> &FormData {
        &self.0
    }

    pub fn campaign_id(&self) -> &str {
        &self.0.campaign_id
    }
}

/// The merchant record returned after a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub merchant_name: String,
    pub merchant_code: String,
    #[serde(default)]
    pub qr_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateMerchantResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub merchant: Option<MerchantRecord>,
}

/// A creation call that reached the server, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantApiResponse {
    pub status_code: u16,
    pub body: CreateMerchantResponse,
}

impl MerchantApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Body of `GET /api/merchant/{campaignId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MerchantLookupResponse {
    #[serde(default)]
    pub merchants: Vec<CampaignMerchant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMerchant {
    pub merchant_code: MerchantCodeRef,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub qr_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MerchantCodeRef {
    #[serde(rename = "_id")]
    pub id: String,
}

impl MerchantLookupResponse {
    /// QR link of the campaign merchant whose code matches `merchant_code`.
    pub fn qr_link_for(&self, merchant_code: &str) -> Option<&str> {
        self.merchants
            .iter()
            .find(|merchant| merchant.merchant_code.id == merchant_code)
            .and_then(|merchant| merchant.qr_link.as_deref())
    }
}
