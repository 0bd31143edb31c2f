use leptos::prelude::*;

use crate::api::{Decision, Entity, GraphNode, NodePayload};

#[derive(Clone, Debug, PartialEq)]
pub enum DetailValue {
	Text(String),
	List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailField {
	pub label: &'static str,
	pub value: DetailValue,
}

impl DetailField {
	fn text(label: &'static str, value: impl Into<String>) -> Self {
		Self {
			label,
			value: DetailValue::Text(value.into()),
		}
	}
}

/// Rows of the detail panel for a node, in display order.
pub fn detail_fields(payload: &NodePayload) -> Vec<DetailField> {
	match payload {
		NodePayload::Decision(decision) => decision_fields(decision),
		NodePayload::Entity(entity) => entity_fields(entity),
	}
}

fn decision_fields(d: &Decision) -> Vec<DetailField> {
	let mut fields = vec![
		DetailField::text("Trigger", &d.trigger),
		DetailField::text("Context", &d.context),
		DetailField::text("Decision", &d.decision),
		DetailField::text("Rationale", &d.rationale),
	];
	if !d.options.is_empty() {
		fields.push(DetailField {
			label: "Options",
			value: DetailValue::List(d.options.clone()),
		});
	}
	fields.push(DetailField::text(
		"Confidence",
		format!("{}%", d.confidence_percent()),
	));
	fields.push(DetailField::text("Source", d.source_or_unknown().label()));
	fields.push(DetailField::text(
		"Project",
		d.project_name.as_deref().unwrap_or("Unassigned"),
	));
	fields.push(DetailField::text("Created", &d.created_at));
	if !d.entities.is_empty() {
		fields.push(DetailField {
			label: "Related Entities",
			value: DetailValue::List(
				d.entities
					.iter()
					.map(|e| format!("{} ({})", e.name, e.kind))
					.collect(),
			),
		});
	}
	fields
}

fn entity_fields(e: &Entity) -> Vec<DetailField> {
	vec![
		DetailField::text("Name", &e.name),
		DetailField::text("Type", e.kind.as_str()),
	]
}

/// Side panel for the selected node.
#[component]
pub fn NodeDetailPanel(node: GraphNode, on_close: Callback<()>) -> impl IntoView {
	let heading = if node.is_decision() {
		"Decision"
	} else {
		"Entity"
	};
	let fields = detail_fields(&node.payload);

	view! {
		<aside class="absolute top-4 right-4 w-80 max-h-[calc(100%-2rem)] overflow-y-auto bg-zinc-900/95 border border-zinc-800 rounded-lg shadow-xl z-20">
			<header class="flex items-start justify-between gap-2 p-4 border-b border-zinc-800">
				<div>
					<span class="text-xs font-bold uppercase text-zinc-500">{heading}</span>
					<h2 class="text-sm font-semibold text-white">{node.label.clone()}</h2>
				</div>
				<button
					class="p-1 text-zinc-400 hover:text-white"
					title="Close"
					on:click=move |_| on_close.run(())
				>
					"×"
				</button>
			</header>
			<dl class="p-4 space-y-3 text-sm">
				{fields
					.into_iter()
					.map(|field| {
						view! {
							<div>
								<dt class="text-xs font-bold uppercase text-zinc-500 mb-1">{field.label}</dt>
								<dd class="text-zinc-200">
									{match field.value {
										DetailValue::Text(text) => view! { <p>{text}</p> }.into_any(),
										DetailValue::List(items) => {
											view! {
												<ul class="list-disc list-inside space-y-0.5">
													{items
														.into_iter()
														.map(|item| view! { <li>{item}</li> })
														.collect_view()}
												</ul>
											}
												.into_any()
										}
									}}
								</dd>
							</div>
						}
					})
					.collect_view()}
			</dl>
		</aside>
	}
}
