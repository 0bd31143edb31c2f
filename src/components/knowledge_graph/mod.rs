//! Knowledge graph view: payload normalization, filter and selection state, overlay panels.

mod detail;
mod filter;
mod filter_panel;
pub(crate) mod normalize;
mod panels;
mod selection;
mod view;

pub use filter::{FilterChange, FilterState};
pub use view::KnowledgeGraph;
