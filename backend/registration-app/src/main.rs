use std::process::ExitCode;

use clap::Parser;
use registration_app::{app, cli::Cli, configs, logger};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match configs::Config::load(cli.config.clone()) {
        Ok(config) => config,
        Err(error) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("{error}");
            }
            return ExitCode::FAILURE;
        }
    };

    let _guard = logger::setup(
        &config.log,
        env!("CARGO_PKG_NAME"),
        [
            env!("CARGO_PKG_NAME"),
            "merchant_registration",
            "external_services",
        ],
    );

    let report = app::run(&config, &cli).await;
    logger::info!(outcome = %report.outcome, "registration finished");

    #[allow(clippy::print_stdout)]
    {
        println!("{report}");
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
