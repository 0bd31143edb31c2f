use leptos::prelude::*;
use log::{info, warn};

use crate::api::{ApiClient, ApiError, FilterCounts, GraphData, GraphNode, GraphQuery};
use crate::components::knowledge_graph::{FilterChange, FilterState, KnowledgeGraph};
use crate::config::ApiConfig;

fn graph_query(filters: FilterState) -> GraphQuery {
	GraphQuery {
		source_filter: filters.source,
		project_filter: filters.project,
		..GraphQuery::default()
	}
}

async fn fetch_graph(config: ApiConfig, query: GraphQuery) -> Result<GraphData, ApiError> {
	ApiClient::new(&config)?.graph(&query).await
}

/// Count endpoints only feed the filter panels; a failure hides the panel.
async fn fetch_counts(config: ApiConfig, projects: bool) -> Option<FilterCounts> {
	let kind = if projects { "project" } else { "source" };
	let result = match ApiClient::new(&config) {
		Ok(client) if projects => client.projects().await,
		Ok(client) => client.sources().await,
		Err(e) => Err(e),
	};
	result
		.inspect_err(|e| warn!("failed to load {kind} counts: {e}"))
		.ok()
}

/// Payload to show for a resource state. Pending and failed fetches yield nothing so the
/// last good graph stays on screen.
fn resolved(result: Option<Result<GraphData, ApiError>>) -> Option<GraphData> {
	result.and_then(Result::ok)
}

fn fetch_outcome(result: &Option<Result<GraphData, ApiError>>) -> Option<Result<(), ApiError>> {
	result.as_ref().map(|r| r.as_ref().map(|_| ()).map_err(Clone::clone))
}

/// Graph page: owns the filter state and refetches the graph whenever it changes.
///
/// The graph view is mounted once and fed the latest payload, so a refetch keeps the
/// selection and the viewport. Fetch errors are reported next to it.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<ApiConfig>().unwrap_or_default();
	let filters = RwSignal::new(FilterState::default());

	let graph = LocalResource::new({
		let config = config.clone();
		move || fetch_graph(config.clone(), graph_query(filters.get()))
	});
	let sources = LocalResource::new({
		let config = config.clone();
		move || fetch_counts(config.clone(), false)
	});
	let projects = LocalResource::new(move || fetch_counts(config.clone(), true));

	let latest = RwSignal::new(None::<GraphData>);
	Effect::new(move |_| {
		if let Some(data) = resolved(graph.get()) {
			latest.set(Some(data));
		}
	});

	let source_counts = Signal::derive(move || sources.get().flatten());
	let project_counts = Signal::derive(move || projects.get().flatten());
	let current_filters = Signal::derive(move || Some(filters.get()));

	let on_node_click = Callback::new(|node: GraphNode| info!("selected {} ({})", node.label, node.id));
	let on_source_filter_change = Callback::new(move |source: Option<String>| {
		filters.update(|f| *f = std::mem::take(f).with_change(FilterChange::Source(source)));
	});
	let on_project_filter_change = Callback::new(move |project: Option<String>| {
		filters.update(|f| *f = std::mem::take(f).with_change(FilterChange::Project(project)));
	});

	view! {
		<div class="fullscreen-graph">
			<Show when=move || graph.with(Option::is_none)>
				<p class="graph-loading">"Loading knowledge graph..."</p>
			</Show>
			<Show when=move || latest.with(Option::is_some)>
				<KnowledgeGraph
					data=latest
					source_counts=source_counts
					project_counts=project_counts
					filters=current_filters
					on_node_click=on_node_click
					on_source_filter_change=on_source_filter_change
					on_project_filter_change=on_project_filter_change
				/>
			</Show>
			<ErrorBoundary fallback=move |errors| {
				view! {
					<div class="graph-error">
						<h1>"Uh oh! Something went wrong!"</h1>

						<p>"Errors: "</p>
						<ul>
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
						<button on:click=move |_| graph.refetch()>"Retry"</button>
					</div>
				}
			}>{move || graph.with(fetch_outcome)}</ErrorBoundary>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn filters_map_onto_query() {
		let query = graph_query(FilterState {
			source: Some("interview".into()),
			project: None,
		});
		assert_eq!(query.source_filter.as_deref(), Some("interview"));
		assert_eq!(query.project_filter, None);
		assert!(query.include_similarity && query.include_temporal && query.include_entity_relations);
	}

	#[test]
	fn only_successful_fetches_replace_the_graph() {
		let data = GraphData::default();
		assert_eq!(resolved(Some(Ok(data.clone()))), Some(data));
		assert_eq!(resolved(None), None);
		let failed = Some(Err(ApiError::Network("offline".into())));
		assert_eq!(resolved(failed.clone()), None);
		assert!(matches!(fetch_outcome(&failed), Some(Err(ApiError::Network(_)))));
		assert!(fetch_outcome(&None).is_none());
	}
}
