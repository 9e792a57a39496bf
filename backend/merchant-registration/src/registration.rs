use std::{str::FromStr, sync::Arc};

use common_utils::{
    consts::{MERCHANT_CREATED_MESSAGE, QR_FILE_SUFFIX},
    errors::{CustomResult, ReportSwitchExt},
};
use domain_types::{
    errors::{LocationError, RegistrationError},
    form::{FormData, FormField, QueryParams},
    merchant::{MerchantApiResponse, MerchantRecord},
    validation::{self, SubmissionReady},
};
use error_stack::ResultExt;
use interfaces::{
    device::{FileDownloader, LocationProvider},
    merchant_api::{MerchantApi, ReverseGeocoder},
};

use crate::{
    state::{FormPhase, FormStep, SubmitOutcome, UiState},
    utils::qr_code::{QrCodeError, QrImage},
};

/// Side-effect collaborators of the form.
#[derive(Clone)]
pub struct FormServices {
    pub merchant_api: Arc<dyn MerchantApi>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub location: Arc<dyn LocationProvider>,
    pub downloader: Arc<dyn FileDownloader>,
}

impl std::fmt::Debug for FormServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormServices").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Take the QR link from the campaign merchant listing instead of the
    /// creation response.
    pub resolve_qr_via_lookup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

/// Two-step merchant registration form.
///
/// All user-visible failures end up in [`UiState::error`]; none of the
/// actions return them to the caller.
#[derive(Debug)]
pub struct RegistrationForm {
    query: QueryParams,
    form: FormData,
    step: FormStep,
    ui: UiState,
    services: FormServices,
    options: FormOptions,
}

impl RegistrationForm {
    pub fn new(query: QueryParams, services: FormServices, options: FormOptions) -> Self {
        let mut ui = UiState::default();
        if query.campaign.is_none() {
            ui.error = Some(RegistrationError::CampaignIdRequired);
        }
        Self {
            form: FormData::seeded(&query),
            query,
            step: FormStep::Details,
            ui,
            services,
            options,
        }
    }

    /// Runs the initial location lookup. A missing campaign stays the
    /// message on display afterwards.
    pub async fn mount(&mut self) {
        self.detect_location().await;
        if self.query.campaign.is_none() {
            self.ui.error = Some(RegistrationError::CampaignIdRequired);
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn detect_location(&mut self) {
        self.ui.clear_messages();
        self.ui.location_loading = true;

        let result = self.locate().await;

        self.ui.location_loading = false;
        if let Err(error) = result {
            tracing::warn!(?error, "location detection failed");
            self.ui.error = Some(RegistrationError::from(*error.current_context()));
        }
    }

    async fn locate(&mut self) -> CustomResult<(), LocationError> {
        let coordinates = self.services.location.current_position().await?;
        self.form.set_coordinates(coordinates);

        let address = self
            .services
            .geocoder
            .reverse(coordinates)
            .await
            .change_context(LocationError::ReverseGeocodingFailed)?;
        self.form.set(FormField::Address, &address);
        tracing::info!(?coordinates, "location detected");
        Ok(())
    }

    pub fn handle_change(&mut self, field: FormField, value: &str) {
        self.form.set(field, value);
        self.ui.error = None;
    }

    pub fn handle_named_change(&mut self, name: &str, value: &str) -> Result<(), UnknownField> {
        let field = FormField::from_str(name).map_err(|_| UnknownField(name.to_string()))?;
        self.handle_change(field, value);
        Ok(())
    }

    /// Returns to the details page, keeping every entered value.
    pub fn back(&mut self) {
        if let FormStep::PaymentInfo(_) = self.step {
            self.step = FormStep::Details;
            self.ui.error = None;
        }
    }

    #[tracing::instrument(skip(self), fields(step = self.step.number()))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.ui.is_busy() {
            return SubmitOutcome::Busy;
        }
        self.ui.clear_messages();

        match self.step {
            FormStep::Details => match validation::validate_details(&self.form) {
                Ok(details) => {
                    self.step = FormStep::PaymentInfo(details);
                    SubmitOutcome::AdvancedToPaymentInfo
                }
                Err(error) => {
                    self.ui.error = Some(error.into());
                    SubmitOutcome::Rejected
                }
            },
            FormStep::PaymentInfo(_) => {
                // details may have been edited through handle_change since
                let details = match validation::validate_details(&self.form) {
                    Ok(details) => details,
                    Err(error) => {
                        self.step = FormStep::Details;
                        self.ui.error = Some(error.into());
                        return SubmitOutcome::Rejected;
                    }
                };
                match validation::validate_payment_info(&self.form, details) {
                    Ok(ready) => self.create_merchant(ready).await,
                    Err(error) => {
                        self.ui.error = Some(error.into());
                        SubmitOutcome::Rejected
                    }
                }
            }
        }
    }

    async fn create_merchant(&mut self, ready: SubmissionReady) -> SubmitOutcome {
        self.ui.clear_messages();
        self.ui.submission = None;
        self.ui.loading = true;

        let result: CustomResult<MerchantApiResponse, RegistrationError> = self
            .services
            .merchant_api
            .create_merchant(ready.request())
            .await
            .switch();

        let outcome = match result {
            Ok(response) if response.is_success() => match response.body.merchant {
                Some(merchant) => {
                    self.complete(merchant, response.body.message, ready.request().campaign_id())
                        .await
                }
                None => self.fail(RegistrationError::creation_failed(response.body.message)),
            },
            Ok(response) => {
                tracing::warn!(status_code = response.status_code, "merchant creation refused");
                self.fail(RegistrationError::creation_failed(response.body.message))
            }
            Err(error) => {
                tracing::error!(?error, "merchant creation failed");
                self.fail(error.current_context().clone())
            }
        };

        self.ui.loading = false;
        outcome
    }

    fn fail(&mut self, error: RegistrationError) -> SubmitOutcome {
        self.ui.error = Some(error);
        SubmitOutcome::Failed
    }

    async fn complete(
        &mut self,
        merchant: MerchantRecord,
        message: Option<String>,
        campaign_id: &str,
    ) -> SubmitOutcome {
        tracing::info!(merchant_code = %merchant.merchant_code, "merchant created");
        self.ui.success = Some(
            message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| MERCHANT_CREATED_MESSAGE.to_string()),
        );

        if let Some(qr_link) = self.resolve_qr_link(&merchant, campaign_id).await {
            self.ui.qr_loading = true;
            match render_qr(qr_link).await {
                Ok(qr_image) => self.ui.qr_image = Some(qr_image),
                Err(error) => {
                    tracing::error!(?error, "qr code rendering failed");
                    self.ui.error = Some(RegistrationError::QrGenerationFailed);
                }
            }
            self.ui.qr_loading = false;
        }

        self.ui.submission = Some(merchant);
        self.form = FormData::seeded(&self.query);
        self.step = FormStep::Details;
        self.ui.dialog_open = true;
        SubmitOutcome::Created
    }

    async fn resolve_qr_link(&self, merchant: &MerchantRecord, campaign_id: &str) -> Option<String> {
        if self.options.resolve_qr_via_lookup {
            match self.services.merchant_api.campaign_merchants(campaign_id).await {
                Ok(listing) => match listing.qr_link_for(&merchant.merchant_code) {
                    Some(qr_link) => return Some(qr_link.to_string()),
                    None => tracing::warn!(
                        merchant_code = %merchant.merchant_code,
                        "merchant missing from campaign listing"
                    ),
                },
                Err(error) => tracing::warn!(?error, "campaign merchant lookup failed"),
            }
        }
        merchant
            .qr_link
            .clone()
            .filter(|qr_link| !qr_link.trim().is_empty())
    }

    /// Hands the rendered QR image to the downloader as `{merchantName}_qr.png`.
    #[tracing::instrument(skip(self))]
    pub async fn download_qr(&mut self) {
        self.ui.error = None;
        let Some(qr_image) = self.ui.qr_image.as_ref() else {
            self.ui.error = Some(RegistrationError::QrNotAvailable);
            return;
        };

        let merchant_name = self
            .ui
            .submission
            .as_ref()
            .map(|merchant| merchant.merchant_name.as_str())
            .unwrap_or("merchant");
        let file_name = format!("{merchant_name}{QR_FILE_SUFFIX}");

        let result: CustomResult<(), RegistrationError> = self
            .services
            .downloader
            .download(&file_name, &qr_image.data)
            .await
            .switch();
        if let Err(error) = result {
            tracing::error!(?error, "qr code download failed");
            self.ui.error = Some(error.current_context().clone());
        }
    }

    pub fn close_dialog(&mut self) {
        self.ui.dialog_open = false;
        self.ui.qr_image = None;
    }

    pub fn phase(&self) -> FormPhase {
        if self.ui.loading {
            FormPhase::Submitting
        } else if self.ui.dialog_open {
            FormPhase::Done
        } else {
            match self.step {
                FormStep::Details => FormPhase::Details,
                FormStep::PaymentInfo(_) => FormPhase::PaymentInfo,
            }
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn form_data(&self) -> &FormData {
        &self.form
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }
}

async fn render_qr(qr_link: String) -> CustomResult<QrImage, QrCodeError> {
    tokio::task::spawn_blocking(move || QrImage::new_from_data(qr_link))
        .await
        .change_context(QrCodeError::RenderingInterrupted)?
}
