mod component;
mod render;
mod state;
mod types;
mod viewport;

pub use component::ForceGraphCanvas;
pub use types::{EdgeStyle, NodeKind, RenderEdge, RenderGraph, RenderNode};
pub use viewport::ViewportControls;
