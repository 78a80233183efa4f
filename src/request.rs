//! Resolves the run's [`GenerationRequest`] from either a JSON config file or
//! command-line flags.
//!
//! The two sources never mix: when a config file is given it supplies every
//! field and the flags are not consulted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_OUTDIR: &str = "qrs";

/// Keys every config file must carry, in the order they are reported.
pub const REQUIRED_CONFIG_KEYS: [&str; 4] = ["pallet_id", "item_id", "name", "cantidad"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

fn default_outdir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTDIR)
}

/// Everything one batch needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationRequest {
    pub pallet_id: String,
    pub item_id: String,
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl GenerationRequest {
    /// Picks the config file when one is given, the flags otherwise.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let request = match &cli.config {
            Some(path) => Self::from_config_file(path)?,
            None => Self::from_flags(cli)?,
        };
        debug!(?request, "resolved generation request");
        Ok(request)
    }

    /// Loads a request from a UTF-8 JSON object.
    ///
    /// Missing required keys are all reported together. A key with the wrong
    /// JSON type (for example `"cantidad": "25"`) is rejected here rather than
    /// during generation.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_config_str(path, &text)
    }

    fn from_config_str(path: &Path, text: &str) -> Result<Self> {
        let format_err = |source| Error::ConfigFormat {
            path: path.to_path_buf(),
            source,
        };

        let object: Map<String, Value> = serde_json::from_str(text).map_err(format_err)?;
        let missing: Vec<String> = REQUIRED_CONFIG_KEYS
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Config {
                path: path.to_path_buf(),
                missing,
            });
        }

        serde_json::from_value(Value::Object(object)).map_err(format_err)
    }

    /// Builds a request from flags; all four generation flags are required.
    pub fn from_flags(cli: &Cli) -> Result<Self> {
        let missing: Vec<String> = [
            ("--pallet-id", cli.pallet_id.is_none()),
            ("--item-id", cli.item_id.is_none()),
            ("--name", cli.name.is_none()),
            ("--cantidad", cli.cantidad.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(flag, _)| flag.to_string())
        .collect();

        match (&cli.pallet_id, &cli.item_id, &cli.name, cli.cantidad) {
            (Some(pallet_id), Some(item_id), Some(name), Some(quantity)) => Ok(Self {
                pallet_id: pallet_id.clone(),
                item_id: item_id.clone(),
                name: name.clone(),
                quantity,
                outdir: cli.outdir.clone(),
                format: cli.format,
            }),
            _ => Err(Error::MissingArguments(missing)),
        }
    }
}
