use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".birthdays.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file parse failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn default_output() -> String {
    String::from("polar")
}

fn default_report() -> String {
    String::from("report.csv")
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_report")]
    pub report: String,
    /// source header -> canonical column name
    #[serde(default)]
    pub columns: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: None,
            output: default_output(),
            report: default_report(),
            columns: HashMap::new(),
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        let reader = File::open(filename)?;
        let config: Config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Like `new`, but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        if filename.as_ref().exists() {
            Config::new(filename)
        } else {
            Ok(Config::default())
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
