use std::{fmt, sync::Arc};

use domain_types::{
    form::{FormField, QueryParams},
    merchant::MerchantRecord,
};
use external_services::{geocoding::NominatimClient, merchant_client::MerchantClient};
use merchant_registration::{FormOptions, FormServices, RegistrationForm, SubmitOutcome};

use crate::{
    cli::Cli, configs::Config, download::FilesystemDownloader, location::StaticLocationProvider,
};

/// What a run of the form ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: SubmitOutcome,
    pub merchant: Option<MerchantRecord>,
    pub success: Option<String>,
    pub error: Option<String>,
    pub qr_saved: bool,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome == SubmitOutcome::Created && self.error.is_none()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(success) = &self.success {
            writeln!(f, "{success}")?;
        }
        if let Some(merchant) = &self.merchant {
            writeln!(
                f,
                "Merchant: {} ({})",
                merchant.merchant_name, merchant.merchant_code
            )?;
        }
        if self.qr_saved {
            writeln!(f, "QR code saved")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "Error: {error}")?;
        }
        write!(f, "Outcome: {}", self.outcome)
    }
}

/// Services backed by the configured HTTP endpoints and the command line.
pub fn build_services(config: &Config, cli: &Cli) -> FormServices {
    let http_params = config.http_params();
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.download.output_dir.clone());

    FormServices {
        merchant_api: Arc::new(MerchantClient::new(
            config.merchant_api.clone(),
            http_params.clone(),
        )),
        geocoder: Arc::new(NominatimClient::new(config.geocoding.clone(), http_params)),
        location: Arc::new(StaticLocationProvider::from_args(
            cli.latitude,
            cli.longitude,
            cli.deny_location,
        )),
        downloader: Arc::new(FilesystemDownloader::new(output_dir)),
    }
}

pub async fn run(config: &Config, cli: &Cli) -> RunReport {
    let options = FormOptions {
        resolve_qr_via_lookup: config.merchant_api.resolve_qr_via_lookup,
    };
    let form = RegistrationForm::new(
        QueryParams::parse(&cli.query),
        build_services(config, cli),
        options,
    );
    drive(form, &cli.field_inputs()).await
}

/// Mounts the form, fills it, walks both pages and saves the QR code when
/// one was rendered.
#[tracing::instrument(skip_all)]
pub async fn drive(mut form: RegistrationForm, inputs: &[(FormField, &str)]) -> RunReport {
    form.mount().await;
    for (field, value) in inputs {
        form.handle_change(*field, value);
    }

    let mut outcome = form.submit().await;
    if outcome == SubmitOutcome::AdvancedToPaymentInfo {
        outcome = form.submit().await;
    }
    tracing::info!(%outcome, "form submitted");

    let mut qr_saved = false;
    if form.ui().dialog_open {
        // no image means no qr link, or a rendering error already on display
        if form.ui().qr_image.is_some() {
            form.download_qr().await;
            qr_saved = form.ui().error.is_none();
        }
        form.close_dialog();
    }

    let ui = form.ui();
    RunReport {
        outcome,
        merchant: ui.submission.clone(),
        success: ui.success.clone(),
        error: ui.error_message(),
        qr_saved,
    }
}
