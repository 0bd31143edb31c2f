//! Overlay panels around the canvas.

use leptos::prelude::*;

use super::normalize::GraphStats;
use crate::components::force_graph::{EdgeStyle, NodeKind, ViewportControls};

pub const EMPTY_TITLE: &str = "Your Knowledge Graph is Empty";

#[component]
pub fn EmptyGraph() -> impl IntoView {
	view! {
		<div class="h-full w-full flex flex-col items-center justify-center gap-2 text-center bg-zinc-950 rounded-lg border border-zinc-800">
			<h2 class="text-lg font-semibold text-white">{EMPTY_TITLE}</h2>
			<p class="text-sm text-zinc-400 max-w-sm">
				"Decisions captured from conversations, interviews or manual entry will show up here, linked to the entities they involve."
			</p>
		</div>
	}
}

#[component]
pub fn GraphStatsPanel(#[prop(into)] stats: Signal<GraphStats>) -> impl IntoView {
	view! {
		<div class="absolute top-4 left-4 bg-zinc-900/90 border border-zinc-800 rounded-lg px-4 py-3 shadow-xl z-10 text-sm">
			<h3 class="text-xs font-bold uppercase text-zinc-500 mb-2">"Graph Stats"</h3>
			<div class="flex gap-4">
				<span class="text-white font-medium">{move || stats.get().nodes_label()}</span>
				<span class="text-white font-medium">{move || stats.get().edges_label()}</span>
			</div>
			<div class="flex gap-4 text-xs text-zinc-500 mt-1">
				<span>{move || format!("{} decisions", stats.get().decisions)}</span>
				<span>{move || format!("{} entities", stats.get().entities)}</span>
			</div>
		</div>
	}
}

#[component]
pub fn GraphLegend() -> impl IntoView {
	view! {
		<div class="absolute bottom-4 left-4 bg-zinc-900/90 border border-zinc-800 rounded-lg p-4 shadow-xl pointer-events-none z-10">
			<h3 class="text-xs font-bold uppercase text-zinc-500 mb-3">"Nodes"</h3>
			<div class="space-y-1.5 text-xs">
				{NodeKind::legend()
					.into_iter()
					.map(|kind| {
						view! {
							<div class="flex items-center gap-2">
								<span
									class="w-3 h-3 rounded-full"
									style=format!("background-color: {}", kind.color())
								></span>
								<span class="text-zinc-300">{kind.label()}</span>
							</div>
						}
					})
					.collect_view()}
			</div>
			<h3 class="text-xs font-bold uppercase text-zinc-500 mt-4 mb-3">"Relationships"</h3>
			<div class="space-y-1.5 text-xs">
				{EdgeStyle::all()
					.into_iter()
					.map(|edge_style| {
						let border = if edge_style.dash().is_some() { "dashed" } else { "solid" };
						view! {
							<div class="flex items-center gap-2">
								<span
									class="w-5 h-0 border-t-2"
									style=format!("border-color: {}; border-top-style: {border}", edge_style.css_color())
								></span>
								<span class="text-zinc-300">{edge_style.label()}</span>
							</div>
						}
					})
					.collect_view()}
			</div>
		</div>
	}
}

#[component]
pub fn GraphTips() -> impl IntoView {
	view! {
		<div class="absolute bottom-4 right-4 max-w-xs bg-zinc-900/90 border border-zinc-800 rounded-lg p-3 shadow-xl pointer-events-none z-10 text-xs text-zinc-400">
			<p class="font-bold uppercase text-zinc-500 mb-1">"Tips"</p>
			<ul class="space-y-0.5">
				<li>"Click a node to inspect it."</li>
				<li>"Drag nodes to reposition, drag the background to pan."</li>
				<li>"Scroll to zoom."</li>
			</ul>
		</div>
	}
}

#[component]
pub fn ViewportToolbar(controls: ViewportControls) -> impl IntoView {
	view! {
		<div class="absolute top-4 left-1/2 -translate-x-1/2 flex bg-zinc-900/90 border border-zinc-800 rounded-lg shadow-xl z-10">
			<button
				class="p-2.5 hover:bg-zinc-800 text-zinc-400 hover:text-white transition-colors rounded-l-lg"
				title="Zoom In"
				on:click=move |_| controls.zoom_in()
			>
				"+"
			</button>
			<button
				class="p-2.5 hover:bg-zinc-800 text-zinc-400 hover:text-white transition-colors"
				title="Zoom Out"
				on:click=move |_| controls.zoom_out()
			>
				"−"
			</button>
			<button
				class="p-2.5 hover:bg-zinc-800 text-zinc-400 hover:text-white transition-colors rounded-r-lg"
				title="Fit View"
				on:click=move |_| controls.fit()
			>
				"Fit"
			</button>
		</div>
	}
}
