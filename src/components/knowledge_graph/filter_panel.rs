use leptos::prelude::*;

use super::filter::{FilterAction, FilterChange, FilterState};
use crate::api::{DecisionSource, FilterCounts};

/// One toggle button in a filter panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
	pub key: String,
	pub label: String,
	pub count: usize,
	pub active: bool,
}

pub fn source_label(key: &str) -> String {
	let source = DecisionSource::from_key(key);
	if source.key() == key {
		source.label().to_string()
	} else {
		key.to_string()
	}
}

pub fn filter_options(
	counts: &FilterCounts,
	selected: Option<&str>,
	label: impl Fn(&str) -> String,
) -> Vec<FilterOption> {
	counts
		.iter()
		.map(|(key, &count)| FilterOption {
			key: key.clone(),
			label: label(key),
			count,
			active: selected == Some(key.as_str()),
		})
		.collect()
}

/// Run the reducer and forward the change to the one callback it concerns.
pub fn dispatch(
	current: FilterState,
	action: FilterAction,
	on_source: Option<Callback<Option<String>>>,
	on_project: Option<Callback<Option<String>>>,
) {
	let (_, change) = current.apply(action);
	match change {
		FilterChange::Source(source) => {
			if let Some(cb) = on_source {
				cb.run(source);
			}
		}
		FilterChange::Project(project) => {
			if let Some(cb) = on_project {
				cb.run(project);
			}
		}
	}
}

fn button_class(active: bool) -> &'static str {
	if active {
		"w-full flex justify-between gap-2 px-2 py-1 text-xs rounded bg-purple-500/20 border border-purple-500/50 text-purple-300"
	} else {
		"w-full flex justify-between gap-2 px-2 py-1 text-xs rounded bg-zinc-800 border border-zinc-700 text-zinc-400 hover:text-white"
	}
}

#[component]
fn FilterButton(option: FilterOption, on_click: Callback<String>) -> impl IntoView {
	let key = option.key.clone();
	view! {
		<button class=button_class(option.active) on:click=move |_| on_click.run(key.clone())>
			<span class="truncate">{option.label}</span>
			<span class="text-zinc-500">{option.count}</span>
		</button>
	}
}

#[component]
pub fn SourceFilterPanel(
	counts: FilterCounts,
	filters: FilterState,
	on_change: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let options = filter_options(&counts, filters.source.as_deref(), source_label);
	let all_active = filters.source.is_none();
	let current = filters.clone();
	let select = Callback::new(move |key: String| {
		dispatch(
			current.clone(),
			FilterAction::SelectSource(Some(key)),
			on_change,
			None,
		);
	});
	let select_all = move |_| {
		dispatch(
			filters.clone(),
			FilterAction::SelectSource(None),
			on_change,
			None,
		)
	};

	view! {
		<section class="space-y-1">
			<h3 class="text-xs font-bold uppercase text-zinc-500 mb-2">"Sources"</h3>
			<button class=button_class(all_active) on:click=select_all>
				<span>"All Sources"</span>
			</button>
			{options
				.into_iter()
				.map(|option| view! { <FilterButton option=option on_click=select /> })
				.collect_view()}
		</section>
	}
}

#[component]
pub fn ProjectFilterPanel(
	counts: FilterCounts,
	filters: FilterState,
	on_change: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let options = filter_options(&counts, filters.project.as_deref(), str::to_string);
	let all_active = filters.project.is_none();
	let current = filters.clone();
	let select = Callback::new(move |name: String| {
		dispatch(
			current.clone(),
			FilterAction::SelectProject(name),
			None,
			on_change,
		);
	});
	let select_all = move |_| dispatch(filters.clone(), FilterAction::AllProjects, None, on_change);

	view! {
		<section class="space-y-1">
			<h3 class="text-xs font-bold uppercase text-zinc-500 mb-2">"Projects"</h3>
			<button class=button_class(all_active) on:click=select_all>
				<span>"All Projects"</span>
			</button>
			{options
				.into_iter()
				.map(|option| view! { <FilterButton option=option on_click=select /> })
				.collect_view()}
		</section>
	}
}

/// Source and project panels stacked; either one is left out when its counts are missing.
#[component]
pub fn FilterPanels(
	#[prop(into)] source_counts: Signal<Option<FilterCounts>>,
	#[prop(into)] project_counts: Signal<Option<FilterCounts>>,
	#[prop(into)] filters: Signal<FilterState>,
	on_source_filter_change: Option<Callback<Option<String>>>,
	on_project_filter_change: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let sources = move || source_counts.get().filter(|c| !c.is_empty());
	let projects = move || project_counts.get().filter(|c| !c.is_empty());

	view! {
		<Show when=move || sources().is_some() || projects().is_some()>
			<div class="absolute top-24 left-4 w-56 max-h-[60%] overflow-y-auto space-y-4 bg-zinc-900/90 border border-zinc-800 rounded-lg p-4 shadow-xl z-10">
				{move || {
					sources()
						.map(|counts| {
							view! {
								<SourceFilterPanel
									counts=counts
									filters=filters.get()
									on_change=on_source_filter_change
								/>
							}
						})
				}}
				{move || {
					projects()
						.map(|counts| {
							view! {
								<ProjectFilterPanel
									counts=counts
									filters=filters.get()
									on_change=on_project_filter_change
								/>
							}
						})
				}}
			</div>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::*;

	fn counts(pairs: &[(&str, usize)]) -> FilterCounts {
		pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
	}

	type Calls = Arc<Mutex<Vec<Option<String>>>>;

	fn recorder(calls: &Calls) -> Callback<Option<String>> {
		let calls = calls.clone();
		Callback::new(move |value: Option<String>| calls.lock().unwrap().push(value))
	}

	#[test]
	fn source_counts_render_verbatim() {
		let counts = counts(&[("claude_logs", 5), ("interview", 3), ("manual", 2)]);
		let options = filter_options(&counts, Some("interview"), source_label);
		let rendered: Vec<(String, usize, bool)> = options
			.into_iter()
			.map(|o| (o.label, o.count, o.active))
			.collect();
		assert_eq!(
			rendered,
			vec![
				("Claude Logs".to_string(), 5, false),
				("Interview".to_string(), 3, true),
				("Manual".to_string(), 2, false),
			]
		);
	}

	#[test]
	fn unknown_source_keys_keep_their_name() {
		assert_eq!(source_label("slack"), "slack");
		assert_eq!(source_label("unknown"), "Unknown");
	}

	#[test]
	fn project_toggle_reaches_only_project_callback() {
		let sources: Calls = Default::default();
		let projects: Calls = Default::default();
		let on_source = Some(recorder(&sources));
		let on_project = Some(recorder(&projects));

		let mut state = FilterState::default();
		for _ in 0..2 {
			dispatch(
				state.clone(),
				FilterAction::SelectProject("alpha".into()),
				on_source,
				on_project,
			);
			if let Some(last) = projects.lock().unwrap().last().cloned() {
				state = state.with_change(FilterChange::Project(last));
			}
		}
		dispatch(
			state.clone(),
			FilterAction::SelectProject("beta".into()),
			on_source,
			on_project,
		);

		assert_eq!(
			*projects.lock().unwrap(),
			vec![Some("alpha".into()), None, Some("beta".into())]
		);
		assert!(sources.lock().unwrap().is_empty());
	}

	#[test]
	fn source_selection_reaches_only_source_callback() {
		let sources: Calls = Default::default();
		let projects: Calls = Default::default();

		dispatch(
			FilterState::default(),
			FilterAction::SelectSource(Some("manual".into())),
			Some(recorder(&sources)),
			Some(recorder(&projects)),
		);
		dispatch(
			FilterState::default(),
			FilterAction::SelectSource(None),
			Some(recorder(&sources)),
			Some(recorder(&projects)),
		);

		assert_eq!(*sources.lock().unwrap(), vec![Some("manual".into()), None]);
		assert!(projects.lock().unwrap().is_empty());
	}
}
