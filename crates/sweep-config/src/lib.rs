//! Configuration loading for the sweep engine.
//!
//! Configuration is read from a TOML file with `${VAR}` environment
//! substitution, deserialized into [`SweepConfig`], and validated before
//! the engine is constructed. The sponsor allowlist in particular is fixed
//! here: it cannot be changed without reloading the whole engine.

use std::collections::HashSet;
use std::env;
use std::path::Path;
use thiserror::Error;

mod types;

pub use types::{CostSchedule, EngineSettings, IntentBounds, RoutingConfig, SweepConfig};

/// Smallest and largest accepted sponsor allowlist sizes.
pub const MIN_SPONSORS: usize = 1;
pub const MAX_SPONSORS: usize = 3;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("file not found: {0}")]
	FileNotFound(String),

	#[error("parse error: {0}")]
	ParseError(String),

	#[error("validation error: {0}")]
	ValidationError(String),

	#[error("environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("io error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self { file_path: None }
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub async fn load(&self) -> Result<SweepConfig, ConfigError> {
		let file_path = self
			.file_path
			.as_ref()
			.ok_or_else(|| ConfigError::FileNotFound("no configuration file specified".to_string()))?;

		let content = tokio::fs::read_to_string(file_path).await?;
		let config = Self::parse(&content)?;
		validate(&config)?;
		Ok(config)
	}

	/// Parses configuration from an in-memory TOML string, after
	/// substituting `${VAR}` references from the environment.
	pub fn parse(content: &str) -> Result<SweepConfig, ConfigError> {
		let substituted = substitute_env_vars(content)?;
		toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))
	}
}

fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let mut result = content.to_string();

	let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static pattern");
	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let env_value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
		result = result.replace(full_match, &env_value);
	}

	Ok(result)
}

/// Startup validation of a parsed configuration.
pub fn validate(config: &SweepConfig) -> Result<(), ConfigError> {
	let sponsor_count = config.sponsors.len();
	if !(MIN_SPONSORS..=MAX_SPONSORS).contains(&sponsor_count) {
		return Err(ConfigError::ValidationError(format!(
			"sponsor allowlist must hold between {} and {} entries, got {}",
			MIN_SPONSORS, MAX_SPONSORS, sponsor_count
		)));
	}

	let unique: HashSet<_> = config.sponsors.iter().collect();
	if unique.len() != sponsor_count {
		return Err(ConfigError::ValidationError(
			"sponsor allowlist contains duplicate entries".to_string(),
		));
	}

	let bounds = &config.bounds;
	if bounds.min_overhead > bounds.max_overhead {
		return Err(ConfigError::ValidationError(
			"min_overhead exceeds max_overhead".to_string(),
		));
	}
	if bounds.max_reimb_price_cap == 0 {
		return Err(ConfigError::ValidationError(
			"max_reimb_price_cap must be positive".to_string(),
		));
	}

	if config.engine.domain_name.is_empty() || config.engine.domain_version.is_empty() {
		return Err(ConfigError::ValidationError(
			"signing domain name and version must be set".to_string(),
		));
	}

	Ok(())
}
