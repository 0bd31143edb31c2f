//! REST client for the knowledge graph backend.

mod error;
mod types;

pub use error::{ApiError, check_status};
pub use types::{
	Decision, DecisionSource, Entity, EntityKind, FilterCounts, GraphData, GraphEdge, GraphNode,
	NodePayload,
};

use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;

/// Query parameters for `GET /api/graph`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphQuery {
	pub include_similarity: bool,
	pub include_temporal: bool,
	pub include_entity_relations: bool,
	pub source_filter: Option<String>,
	pub project_filter: Option<String>,
}

impl Default for GraphQuery {
	fn default() -> Self {
		Self {
			include_similarity: true,
			include_temporal: true,
			include_entity_relations: true,
			source_filter: None,
			project_filter: None,
		}
	}
}

impl GraphQuery {
	/// Append this query to `url`. Unset filters are left out of the query string entirely.
	pub fn apply_to(&self, url: &mut Url) {
		let mut pairs = url.query_pairs_mut();
		pairs.append_pair("include_similarity", bool_param(self.include_similarity));
		pairs.append_pair("include_temporal", bool_param(self.include_temporal));
		pairs.append_pair(
			"include_entity_relations",
			bool_param(self.include_entity_relations),
		);
		if let Some(source) = &self.source_filter {
			pairs.append_pair("source_filter", source);
		}
		if let Some(project) = &self.project_filter {
			pairs.append_pair("project_filter", project);
		}
	}
}

fn bool_param(v: bool) -> &'static str {
	if v { "true" } else { "false" }
}

/// Thin wrapper over `reqwest` that maps failures onto [`ApiError`].
#[derive(Clone, Debug)]
pub struct ApiClient {
	base: Url,
}

impl ApiClient {
	/// The base may carry a path prefix; endpoints are resolved below it.
	pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
		let mut base = Url::parse(&config.base_url)?;
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());
			base.set_path(&path);
		}
		Ok(Self { base })
	}

	fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
		Ok(self.base.join(path)?)
	}

	pub fn graph_url(&self, query: &GraphQuery) -> Result<Url, ApiError> {
		let mut url = self.endpoint("api/graph")?;
		query.apply_to(&mut url);
		Ok(url)
	}

	pub async fn graph(&self, query: &GraphQuery) -> Result<GraphData, ApiError> {
		let url = self.graph_url(query)?;
		get_json(url).await
	}

	pub async fn sources(&self) -> Result<FilterCounts, ApiError> {
		get_json(self.endpoint("api/graph/sources")?).await
	}

	pub async fn projects(&self) -> Result<FilterCounts, ApiError> {
		get_json(self.endpoint("api/graph/projects")?).await
	}
}

async fn get_json<T: DeserializeOwned>(url: Url) -> Result<T, ApiError> {
	debug!("GET {url}");
	let response = reqwest::get(url).await?;
	let status = response.status();
	check_status(status.as_u16(), status.canonical_reason().unwrap_or(""))?;
	let body = response.text().await?;
	decode(&body)
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
	Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client() -> ApiClient {
		ApiClient::new(&ApiConfig {
			base_url: "http://localhost:8000".into(),
		})
		.unwrap()
	}

	#[test]
	fn default_query_sends_only_include_flags() {
		let url = client().graph_url(&GraphQuery::default()).unwrap();
		assert_eq!(url.path(), "/api/graph");
		assert_eq!(
			url.query(),
			Some("include_similarity=true&include_temporal=true&include_entity_relations=true")
		);
		assert!(!url.as_str().contains("source_filter"));
		assert!(!url.as_str().contains("project_filter"));
	}

	#[test]
	fn filters_are_appended_when_set() {
		let query = GraphQuery {
			include_temporal: false,
			source_filter: Some("interview".into()),
			project_filter: Some("my project".into()),
			..GraphQuery::default()
		};
		let url = client().graph_url(&query).unwrap();
		let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
		assert!(pairs.contains(&("include_temporal".into(), "false".into())));
		assert!(pairs.contains(&("source_filter".into(), "interview".into())));
		assert!(pairs.contains(&("project_filter".into(), "my project".into())));
	}

	#[test]
	fn endpoints_stay_under_the_base_path() {
		for base in ["https://host.example/backend", "https://host.example/backend/"] {
			let client = ApiClient::new(&ApiConfig {
				base_url: base.into(),
			})
			.unwrap();
			let url = client.graph_url(&GraphQuery::default()).unwrap();
			assert_eq!(url.path(), "/backend/api/graph");
			assert_eq!(
				client.endpoint("api/graph/projects").unwrap().as_str(),
				"https://host.example/backend/api/graph/projects"
			);
		}
	}

	#[test]
	fn invalid_base_url_is_rejected() {
		let err = ApiClient::new(&ApiConfig {
			base_url: "not a url".into(),
		})
		.unwrap_err();
		assert!(matches!(err, ApiError::InvalidUrl(_)));
	}

	#[test]
	fn decode_reports_malformed_body() {
		let err = decode::<GraphData>("<html>").unwrap_err();
		assert!(matches!(err, ApiError::Parse(_)));
		let counts: FilterCounts = decode(r#"{"alpha": 4}"#).unwrap();
		assert_eq!(counts.get("alpha"), Some(&4));
	}
}
