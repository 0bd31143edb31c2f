use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{CLICK_SLOP, ForceGraphState};
use super::types::RenderGraph;
use super::viewport::ViewportControls;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn measure(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed canvas for a [`RenderGraph`].
///
/// Layout is left to the `force_graph` simulation; this component seeds positions, forwards
/// pointer input, and reports node clicks through `on_node_click` with the node id.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<RenderGraph>,
	#[prop(into)] selected: Signal<Option<String>>,
	on_node_click: Callback<String>,
	controls: ViewportControls,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animate_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = measure(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("2d canvas context unavailable");
			return;
		};
		let mut initial = ForceGraphState::new(&data.get_untracked(), w, h);
		initial.set_selected(selected.get_untracked().as_deref());
		debug!(
			"graph canvas {w}x{h}: {} nodes, {} edges",
			initial.node_count(),
			initial.edge_count()
		);
		*state_init.borrow_mut() = Some(initial);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = measure(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, canvas_anim) =
			(state_init.clone(), animate_init.clone(), canvas.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Unmounted: stop scheduling frames.
			if !canvas_anim.is_connected() {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// New payload: rebuild the simulation at the current size.
	let state_data = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			let mut next = ForceGraphState::new(&graph, s.width, s.height);
			next.transform = s.transform.clone();
			next.set_selected(selected.get_untracked().as_deref());
			*s = next;
		}
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.set_selected(id.as_deref());
		}
	});

	let state_cmd = state.clone();
	let mut cursor = controls.cursor();
	Effect::new(move |_| {
		if let Some(cmd) = controls.take_next(&mut cursor) {
			if let Some(ref mut s) = *state_cmd.borrow_mut() {
				s.apply(cmd);
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Update hover state when not dragging
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				let (sdx, sdy) = (x - s.drag.start_x, y - s.drag.start_y);
				if !s.drag.moved && (sdx * sdx + sdy * sdy).sqrt() > CLICK_SLOP {
					s.drag.moved = true;
				}
				if let (true, Some(idx)) = (s.drag.moved, s.drag.node_idx) {
					let (dx, dy) = (sdx / s.transform.k, sdy / s.transform.k);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| {
			let idx = s.release()?;
			s.node_id(idx)
		});
		// State borrow is released before handing control to the caller.
		if let Some(id) = clicked {
			on_node_click.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag = Default::default();
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.transform.zoom_about(factor, x, y);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
