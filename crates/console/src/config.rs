//! Console configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for path completion in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
	/// Prefix selecting the local (client-side) path tree on a client.
	#[serde(default = "default_client_prefix")]
	pub client_prefix: String,
	/// Label shown next to the client prefix suggestion.
	#[serde(default = "default_client_hint")]
	pub client_hint: String,
}

fn default_client_prefix() -> String {
	"/c".to_string()
}

fn default_client_hint() -> String {
	"Client-side paths".to_string()
}

impl Default for ConsoleConfig {
	fn default() -> Self {
		Self {
			client_prefix: default_client_prefix(),
			client_hint: default_client_hint(),
		}
	}
}

impl ConsoleConfig {
	/// Parses settings from TOML; missing keys take their defaults.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		if config.client_prefix.is_empty() {
			return Err(ConfigError::EmptyClientPrefix);
		}
		Ok(config)
	}
}
