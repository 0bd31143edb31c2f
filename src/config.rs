//! Build-time configuration.

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Where the REST API lives. WASM has no process environment, so this is baked in at
/// compile time from `KG_API_URL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	pub base_url: String,
}

impl ApiConfig {
	pub fn from_env() -> Self {
		Self::from_value(option_env!("KG_API_URL"))
	}

	fn from_value(value: Option<&str>) -> Self {
		let base_url = value
			.map(str::trim)
			.filter(|v| !v.is_empty())
			.unwrap_or(DEFAULT_API_URL)
			.to_string();
		Self { base_url }
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::from_value(None)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn falls_back_to_localhost() {
		assert_eq!(ApiConfig::default().base_url, DEFAULT_API_URL);
		assert_eq!(ApiConfig::from_value(Some("  ")).base_url, DEFAULT_API_URL);
	}

	#[test]
	fn uses_configured_url() {
		let config = ApiConfig::from_value(Some("https://kg.example.com"));
		assert_eq!(config.base_url, "https://kg.example.com");
	}
}
