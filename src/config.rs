use crate::error::{WarcalcError, WcResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENGINE_URL: &str = "http://localhost:8080/api/calculate";
pub const DEFAULT_STORAGE_KEY: &str = "warhammer_army";
pub const DEFAULT_POINTS_LIMIT: u32 = 2000;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint of the calculation engine.
    #[arg(global = true, long, default_value = DEFAULT_ENGINE_URL)]
    pub engine_url: String,

    /// Directory holding persisted rosters.
    #[arg(global = true, long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(global = true, long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    #[arg(global = true, long, default_value_t = DEFAULT_POINTS_LIMIT)]
    pub points_limit: u32,

    /// 0 disables the timeout.
    #[arg(global = true, long, default_value_t = 0)]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            points_limit: DEFAULT_POINTS_LIMIT,
            request_timeout_secs: 0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WcResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WarcalcError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            WarcalcError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Copies every field the user typed on the command line over the
    /// file-provided values. Defaults filled in by clap are ignored.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(engine_url, "engine_url");
        update_if_present!(data_dir, "data_dir");
        update_if_present!(storage_key, "storage_key");
        update_if_present!(points_limit, "points_limit");
        update_if_present!(request_timeout_secs, "request_timeout_secs");
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
