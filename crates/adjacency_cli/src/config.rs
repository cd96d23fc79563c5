//! Configuration parsing for neighbor discovery runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Run configuration. Every key is optional in the TOML file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Tag appended to the output file stem (`brain` -> `brain_<tag>`).
	pub output_tag: String,
	/// Log filter used when `RUST_LOG` is not set.
	pub log_level: String,
	/// Log every label's neighbor row.
	pub log_rows: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			output_tag: "neighbors".to_string(),
			log_level: "info".to_string(),
			log_rows: true,
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate TOML content.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		if self.output_tag.is_empty() {
			anyhow::bail!("output_tag must not be empty");
		}
		if self.output_tag.contains(['/', '\\']) {
			anyhow::bail!(
				"output_tag must not contain path separators, got {:?}",
				self.output_tag
			);
		}
		Ok(())
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
