use std::path::PathBuf;

use clap::Parser;
use domain_types::form::FormField;

/// Registers a merchant for a campaign and saves its payment QR code.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "registration-app", version)]
pub struct Cli {
    /// Config file to load instead of `config/<RUN_ENV>.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page query string, e.g. `campaign=abc123&company=Acme`.
    #[arg(long, default_value = "")]
    pub query: String,

    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Behave as if the user refused location access.
    #[arg(long)]
    pub deny_location: bool,

    #[arg(long)]
    pub merchant_name: Option<String>,

    #[arg(long)]
    pub mobile: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub upi_id: Option<String>,

    /// Overrides the company taken from the query string.
    #[arg(long)]
    pub company: Option<String>,

    /// Overrides the address found by reverse geocoding.
    #[arg(long)]
    pub address: Option<String>,

    /// Directory for the QR image, defaults to `download.output_dir`.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    /// Field values given on the command line, in form order.
    pub fn field_inputs(&self) -> Vec<(FormField, &str)> {
        [
            (FormField::MerchantName, &self.merchant_name),
            (FormField::MerchantMobile, &self.mobile),
            (FormField::MerchantEmail, &self.email),
            (FormField::Address, &self.address),
            (FormField::UpiId, &self.upi_id),
            (FormField::Company, &self.company),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}
