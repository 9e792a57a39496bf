use std::path::PathBuf;

use common_utils::consts;
use domain_types::types::{GeocodingParams, HttpParams, MerchantApiParams, Proxy};

use crate::{error::ConfigurationError, logger::config::Log};

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub merchant_api: MerchantApiParams,
    #[serde(default)]
    pub geocoding: GeocodingParams,
    #[serde(default)]
    pub proxy: Proxy,
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub download: Download,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: consts::Env,
}

impl Common {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let Self { environment } = self;
        match environment {
            consts::Env::Development | consts::Env::Production | consts::Env::Sandbox => Ok(()),
        }
    }
}

#[derive(Clone, serde::Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Http {
    /// Unset means outbound requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Where downloaded QR images are written.
#[derive(Clone, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct Download {
    pub output_dir: PathBuf,
}

impl Default for Download {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Reads the configuration and rejects values the clients cannot use.
    pub fn load(explicit_config_path: Option<PathBuf>) -> Result<Self, ConfigurationError> {
        let config = Self::new_with_config_path(explicit_config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Function to build the configuration by picking it from default locations
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(&env, explicit_config_path);

        let config = Self::builder(&env)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("proxy.bypass_proxy_urls"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        config.common.validate()?;

        Ok(config)
    }

    pub fn builder(
        environment: &consts::Env,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            // "env" is fixed by RUN_ENV and can't be altered by a config field
            .set_override("env", environment.to_string())
    }

    /// Config path.
    pub fn config_path(
        environment: &consts::Env,
        explicit_config_path: Option<PathBuf>,
    ) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            let config_directory: String = "config".into();
            let config_file_name = environment.config_path();

            config_path.push(workspace_path());
            config_path.push(config_directory);
            config_path.push(config_file_name);
        }
        config_path
    }

    /// Settings shared by the merchant API and geocoding clients.
    pub fn http_params(&self) -> HttpParams {
        HttpParams {
            proxy: self.proxy.clone(),
            request_timeout_secs: self.http.request_timeout_secs,
        }
    }

    /// Checks values the deserializer accepts but the clients cannot use.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.geocoding.user_agent.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                field: "geocoding.user_agent",
                message: "must not be empty".to_string(),
            });
        }
        if self.http.request_timeout_secs == Some(0) {
            return Err(ConfigurationError::InvalidValue {
                field: "http.request_timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        // a missing merchant api base url is reported by the form itself
        Ok(())
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}
