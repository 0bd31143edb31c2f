//! Source and project filter state.
//!
//! The panels are stateless: they build the current [`FilterState`] from their props, run
//! the reducer on a click and forward the resulting [`FilterChange`] to exactly one callback.

use crate::api::Decision;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
	pub source: Option<String>,
	pub project: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterAction {
	/// `None` is "All Sources".
	SelectSource(Option<String>),
	SelectProject(String),
	AllProjects,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterChange {
	Source(Option<String>),
	Project(Option<String>),
}

impl FilterState {
	pub fn apply(self, action: FilterAction) -> (FilterState, FilterChange) {
		match action {
			FilterAction::SelectSource(source) => (
				FilterState {
					source: source.clone(),
					..self
				},
				FilterChange::Source(source),
			),
			FilterAction::SelectProject(project) => {
				// Clicking the active project again clears it.
				let next = if self.project.as_deref() == Some(project.as_str()) {
					None
				} else {
					Some(project)
				};
				(
					FilterState {
						project: next.clone(),
						..self
					},
					FilterChange::Project(next),
				)
			}
			FilterAction::AllProjects => (
				FilterState {
					project: None,
					..self
				},
				FilterChange::Project(None),
			),
		}
	}

	pub fn with_change(self, change: FilterChange) -> FilterState {
		match change {
			FilterChange::Source(source) => FilterState { source, ..self },
			FilterChange::Project(project) => FilterState { project, ..self },
		}
	}

	/// Both predicates must hold.
	pub fn matches_decision(&self, decision: &Decision) -> bool {
		let source_ok = self
			.source
			.as_deref()
			.is_none_or(|key| decision.source_or_unknown().key() == key);
		let project_ok = self
			.project
			.as_deref()
			.is_none_or(|name| decision.project_name.as_deref() == Some(name));
		source_ok && project_ok
	}
}
