//! Router configuration.

use crate::error::SettingsError;
use routekit_urls::QueryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_responder_prefix() -> String {
	"on_".to_string()
}

/// Settings of a [`Router`](crate::Router).
///
/// # Examples
///
/// ```
/// use routekit_router::RouterSettings;
///
/// let settings = RouterSettings::from_toml_str("strict = true").unwrap();
/// assert!(settings.strict);
/// assert_eq!(settings.responder_prefix, "on_");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSettings {
	/// Validate responder signatures before registering them.
	#[serde(default)]
	pub strict: bool,

	/// Required responder name prefix under strict mode; empty disables the check.
	#[serde(default = "default_responder_prefix")]
	pub responder_prefix: String,

	/// Policy for query values with non-scalar sequence elements.
	#[serde(default)]
	pub query_policy: QueryPolicy,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			strict: false,
			responder_prefix: default_responder_prefix(),
			query_policy: QueryPolicy::default(),
		}
	}
}

impl RouterSettings {
	pub fn strict() -> Self {
		Self::default().with_strict(true)
	}

	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn with_responder_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.responder_prefix = prefix.into();
		self
	}

	pub fn with_query_policy(mut self, policy: QueryPolicy) -> Self {
		self.query_policy = policy;
		self
	}

	/// Parses settings from TOML text; missing keys take their defaults.
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))
	}

	/// Loads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&contents)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = RouterSettings::default();
		assert!(!settings.strict);
		assert_eq!(settings.responder_prefix, "on_");
		assert_eq!(settings.query_policy, QueryPolicy::SkipMalformed);
	}

	#[rstest]
	fn test_empty_toml_gives_defaults() {
		assert_eq!(
			RouterSettings::from_toml_str("").unwrap(),
			RouterSettings::default()
		);
	}

	#[rstest]
	fn test_full_toml() {
		// Arrange
		let contents = r#"
strict = true
responder_prefix = "handle_"
query_policy = "reject"
"#;

		// Act
		let settings = RouterSettings::from_toml_str(contents).unwrap();

		// Assert
		assert_eq!(
			settings,
			RouterSettings::strict()
				.with_responder_prefix("handle_")
				.with_query_policy(QueryPolicy::Reject)
		);
	}

	#[rstest]
	#[case("strict = \"yes\"")]
	#[case("query_policy = \"explode\"")]
	#[case("strict = ")]
	fn test_invalid_toml(#[case] contents: &str) {
		let err = RouterSettings::from_toml_str(contents).unwrap_err();
		assert!(matches!(err, SettingsError::ParseError(_)));
	}

	#[rstest]
	fn test_missing_file() {
		let err = RouterSettings::from_file("/nonexistent/routekit.toml").unwrap_err();
		assert!(matches!(err, SettingsError::FileError(_)));
	}

	#[rstest]
	fn test_round_trips_through_toml() {
		// Arrange
		let settings = RouterSettings::strict().with_responder_prefix("");

		// Act
		let text = toml::to_string(&settings).unwrap();

		// Assert
		assert_eq!(RouterSettings::from_toml_str(&text).unwrap(), settings);
	}
}
