use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf, time::Duration};
use stos_core::{DebugDump, StatusPoller};
use stos_webclient::{stos, StosClient, Url};

use crate::{
    cmd::{GlobalArgs, PollArgs},
    util,
};

pub const APP_NAME: &str = "stos-cli";

/// User-wide settings read from `~/.config/stos-cli/stos-cli.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_base_url")]
    pub base_url: Url,

    #[serde(default = "GlobalConfig::default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default)]
    pub poll_timeout_secs: Option<u64>,

    #[serde(default = "GlobalConfig::default_context")]
    pub context: String,

    #[serde(default = "GlobalConfig::default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            base_url: Self::default_base_url(),
            poll_interval_secs: Self::default_poll_interval_secs(),
            poll_timeout_secs: None,
            context: Self::default_context(),
            accept_invalid_certs: Self::default_accept_invalid_certs(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "stos-cli.toml";

    pub fn filepath() -> PathBuf {
        let dir = dirs::config_dir().unwrap_or_else(|| {
            eprintln!("Failed to get user's config dir path");
            std::process::exit(1)
        });
        dir.join(APP_NAME).join(Self::FILENAME)
    }

    fn default_base_url() -> Url {
        Url::parse(stos::DEFAULT_BASE_URL).unwrap_or_else(|e| {
            panic!("Invalid default url {:?}: {}", stos::DEFAULT_BASE_URL, e)
        })
    }

    fn default_poll_interval_secs() -> u64 {
        StatusPoller::DEFAULT_INTERVAL.as_secs()
    }

    fn default_context() -> String {
        stos::DEFAULT_CONTEXT.to_owned()
    }

    fn default_accept_invalid_certs() -> bool {
        true
    }

    pub fn from_file_or_default() -> Self {
        let path = Self::filepath();
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        toml::from_str(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            base_url,
        } = args;

        if let Some(url) = base_url {
            self.base_url = url.clone();
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }

    pub fn new_client(&self) -> anyhow::Result<StosClient> {
        let cli = StosClient::new(self.base_url.clone(), self.accept_invalid_certs)?;
        Ok(cli.context(&self.context))
    }

    /// Command line flags take precedence over the file.
    pub fn poller(&self, args: &PollArgs) -> StatusPoller {
        let interval = args.interval.unwrap_or(self.poll_interval_secs);
        let timeout = args.timeout.or(self.poll_timeout_secs);
        StatusPoller::new()
            .interval(Duration::from_secs(interval))
            .timeout(timeout.map(Duration::from_secs))
    }
}

/// Settings read from `STOS_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvConfig {
    /// Where to write the last page fetched from STOS.
    pub debug_file: Option<PathBuf>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        envy::prefixed("STOS_").from_env().unwrap_or_else(|e| {
            log::warn!("Ignoring invalid STOS_* environment: {}", e);
            Self::default()
        })
    }

    pub fn debug_dump(&self) -> DebugDump {
        DebugDump::new(self.debug_file.clone())
    }
}
