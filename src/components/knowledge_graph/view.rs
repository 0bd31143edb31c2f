use leptos::prelude::*;
use log::debug;

use super::detail::NodeDetailPanel;
use super::filter::FilterState;
use super::filter_panel::FilterPanels;
use super::normalize::{GraphStats, normalize};
use super::panels::{EmptyGraph, GraphLegend, GraphStatsPanel, GraphTips, ViewportToolbar};
use super::selection::{Selection, SelectionAction};
use crate::api::{FilterCounts, GraphData, GraphNode};
use crate::components::force_graph::{ForceGraphCanvas, RenderGraph, ViewportControls};

/// Empty or missing payloads get the empty state instead of a canvas.
fn show_empty(graph: &RenderGraph) -> bool {
	graph.is_empty()
}

/// A node click does two independent things: it selects the node for the detail panel and,
/// when the id resolves, hands the node to the caller's callback. Each happens once.
fn node_click(
	selection: Selection,
	graph: &RenderGraph,
	id: String,
	on_node_click: Option<Callback<GraphNode>>,
) -> Selection {
	let node = graph.node(&id).map(|n| n.node.clone());
	if let (Some(cb), Some(node)) = (on_node_click, node) {
		cb.run(node);
	}
	selection.next(SelectionAction::Click(id))
}

/// Knowledge graph with its overlay panels.
///
/// Filtering of the payload happens upstream through a refetch; the filters are still applied
/// locally so an edge never points at a node that is not on screen.
#[component]
pub fn KnowledgeGraph(
	#[prop(into)] data: Signal<Option<GraphData>>,
	#[prop(optional, into)] source_counts: MaybeProp<FilterCounts>,
	#[prop(optional, into)] project_counts: MaybeProp<FilterCounts>,
	#[prop(optional, into)] filters: MaybeProp<FilterState>,
	#[prop(optional)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(optional)] on_source_filter_change: Option<Callback<Option<String>>>,
	#[prop(optional)] on_project_filter_change: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let filters = Signal::derive(move || filters.get().unwrap_or_default());
	let graph = Memo::new(move |_| data.with(|d| normalize(d.as_ref(), &filters.get())));
	let stats = Signal::derive(move || GraphStats::of(&graph.get()));
	let has_nodes = move || !graph.with(show_empty);

	let selection = RwSignal::new(Selection::default());
	let selected_id = Signal::derive(move || selection.with(|s| s.selected_id().map(str::to_string)));
	let selected_node = Memo::new(move |_| {
		let id = selected_id.get()?;
		graph.with(|g| g.node(&id).map(|n| n.node.clone()))
	});
	let controls = ViewportControls::new();

	let handle_node_click = Callback::new(move |id: String| {
		debug!("node clicked: {id}");
		let next = graph.with_untracked(|g| {
			node_click(selection.get_untracked(), g, id, on_node_click)
		});
		selection.set(next);
	});
	let handle_close = Callback::new(move |_: ()| {
		selection.update(|s| *s = std::mem::take(s).next(SelectionAction::Close));
	});

	let source_counts = Signal::derive(move || source_counts.get());
	let project_counts = Signal::derive(move || project_counts.get());

	view! {
		<div class="h-full w-full relative">
			<Show when=has_nodes fallback=|| view! { <EmptyGraph /> }>
				<div class="h-full w-full bg-zinc-950 relative overflow-hidden rounded-lg border border-zinc-800">
					<ForceGraphCanvas
						data=graph
						selected=selected_id
						on_node_click=handle_node_click
						controls=controls
					/>
					<GraphStatsPanel stats=stats />
					<ViewportToolbar controls=controls />
					<GraphLegend />
					<GraphTips />
					{move || {
						selected_node
							.get()
							.map(|node| view! { <NodeDetailPanel node=node on_close=handle_close /> })
					}}
				</div>
			</Show>
			// Outside the canvas branch so a filter that empties the graph can be undone.
			<FilterPanels
				source_counts=source_counts
				project_counts=project_counts
				filters=filters
				on_source_filter_change=on_source_filter_change
				on_project_filter_change=on_project_filter_change
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::*;
	use crate::components::knowledge_graph::normalize::tests::sample;

	fn rendered() -> RenderGraph {
		normalize(Some(&sample()), &FilterState::default())
	}

	#[test]
	fn empty_state_only_without_nodes() {
		assert!(show_empty(&normalize(None, &FilterState::default())));
		assert!(show_empty(&RenderGraph::default()));
		assert!(!show_empty(&rendered()));
	}

	#[test]
	fn click_selects_and_notifies_once() {
		let clicked = Arc::new(Mutex::new(Vec::new()));
		let on_node_click = {
			let clicked = clicked.clone();
			Callback::new(move |node: GraphNode| clicked.lock().unwrap().push(node.id))
		};
		let graph = rendered();

		let selection = node_click(Selection::default(), &graph, "kafka".into(), Some(on_node_click));
		assert_eq!(selection.selected_id(), Some("kafka"));
		assert_eq!(*clicked.lock().unwrap(), vec!["kafka".to_string()]);

		let selection = node_click(selection, &graph, "d1".into(), Some(on_node_click));
		assert_eq!(selection.selected_id(), Some("d1"));
		assert_eq!(*clicked.lock().unwrap(), vec!["kafka".to_string(), "d1".to_string()]);
	}

	#[test]
	fn click_without_callback_still_selects() {
		let selection = node_click(Selection::default(), &rendered(), "events".into(), None);
		assert_eq!(selection, Selection::Selected("events".into()));
	}
}
