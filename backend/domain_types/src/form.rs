use common_utils::{
    pii::{EmailStrategy, PhoneNumberStrategy, UpiVpaStrategy},
    Secret,
};
use serde::Serialize;

use crate::location::Coordinates;

/// User-editable fields of the registration form, addressed by their wire names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    MerchantName,
    UpiId,
    MerchantMobile,
    MerchantEmail,
    Company,
    Address,
    CampaignId,
}

/// The record posted to the merchant creation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub merchant_name: String,
    pub upi_id: Secret<String, UpiVpaStrategy>,
    pub merchant_mobile: Secret<String, PhoneNumberStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_email: Option<Secret<String, EmailStrategy>>,
    pub company: String,
    pub address: String,
    pub campaign_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl FormData {
    /// Defaults for a fresh form, with campaign and company taken from the page query.
    pub fn seeded(query: &QueryParams) -> Self {
        Self {
            campaign_id: query.campaign.clone().unwrap_or_default(),
            company: query.company.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Stores a trimmed input value into `field`. An empty email is stored as absent.
    pub fn set(&mut self, field: FormField, value: &str) {
        let value = value.trim().to_string();
        match field {
            FormField::MerchantName => self.merchant_name = value,
            FormField::UpiId => self.upi_id = Secret::new(value),
            FormField::MerchantMobile => self.merchant_mobile = Secret::new(value),
            FormField::MerchantEmail => {
                self.merchant_email = (!value.is_empty()).then(|| Secret::new(value))
            }
            FormField::Company => self.company = value,
            FormField::Address => self.address = value,
            FormField::CampaignId => self.campaign_id = value,
        }
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.latitude
            .zip(self.longitude)
            .map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            })
    }
}

/// Identifiers read once from the page query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub campaign: Option<String>,
    pub company: Option<String>,
}

impl QueryParams {
    /// Parses a raw query string. `campaign` wins over its `campaignId` alias;
    /// blank values count as absent.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut campaign = None;
        let mut campaign_alias = None;
        let mut company = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match &*key {
                "campaign" => campaign = campaign.or_else(|| Some(value.to_string())),
                "campaignId" => campaign_alias = campaign_alias.or_else(|| Some(value.to_string())),
                "company" => company = company.or_else(|| Some(value.to_string())),
                _ => {}
            }
        }

        Self {
            campaign: campaign.or(campaign_alias),
            company,
        }
    }
}
