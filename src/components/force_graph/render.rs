use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use super::viewport::Minimap;

const BACKGROUND: &str = "#09090b";
const GRID_SPACING: f64 = 40.0;
const MINIMAP_W: f64 = 160.0;
const MINIMAP_H: f64 = 110.0;
const MINIMAP_MARGIN: f64 = 16.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((len, gap)) => js_sys::Array::of2(&JsValue::from_f64(len), &JsValue::from_f64(gap)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_minimap(state, ctx);
}

/// Screen-space grid that follows pan and zoom.
fn draw_grid(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let step = GRID_SPACING * state.transform.k;
	if step < 8.0 {
		return;
	}
	let (ox, oy) = (
		state.transform.x.rem_euclid(step),
		state.transform.y.rem_euclid(step),
	);
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.04)");
	ctx.set_line_width(1.0);
	set_dash(ctx, None);
	ctx.begin_path();
	let mut x = ox;
	while x < state.width {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, state.height);
		x += step;
	}
	let mut y = oy;
	while y < state.height {
		ctx.move_to(0.0, y);
		ctx.line_to(state.width, y);
		y += step;
	}
	ctx.stroke();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k, 8.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);
	let positions = state.positions();

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = state.is_highlighted(edge.source) && state.is_highlighted(edge.target);

		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let base_width = line_width * edge.width_scale;
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, base_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, base_width * (1.0 - 0.3 * t))
		};
		let (r, g, b) = edge.style.rgb();

		ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {edge_alpha})"));
		ctx.set_line_width(width);
		let dash = edge.style.dash().map(|(len, gap)| (len / k, gap / k));
		set_dash(ctx, dash);
		if let (true, Some((len, gap))) = (edge.style.animated(), dash) {
			ctx.set_line_dash_offset(-(state.flow_time * 30.0 / k) % (len + gap));
		} else {
			ctx.set_line_dash_offset(0.0);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		let (r1, r2) = (state.radius(edge.source), state.radius(edge.target));
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		set_dash(ctx, None);
		ctx.set_fill_style_str(&format!("rgba({r}, {g}, {b}, {arrow_alpha})"));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	set_dash(ctx, None);
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64, k: f64, color: &str) {
	ctx.set_fill_style_str(color);
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
	let _ = ctx.fill_text(label, x, y);
}

fn draw_selection_ring(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, k: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius + 4.0 / k, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str("rgba(250, 204, 21, 0.95)");
	ctx.set_line_width(2.0 / k);
	ctx.stroke();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if state.is_selected(idx) {
			draw_selection_ring(ctx, x, y, radius, k);
		}
		draw_label(
			ctx,
			&info.label,
			x + radius + 3.0,
			y + 3.0,
			k,
			&format!("rgba(255, 255, 255, {})", alpha * 0.8),
		);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(info.radius * (1.0 + 0.35 * t), info.radius * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.4 + 0.6 * t))
		} else {
			(info.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
		if state.is_selected(idx) {
			draw_selection_ring(ctx, x, y, radius, k);
		}

		draw_label(ctx, &info.label, x + radius + 3.0, y + 3.0, k, "white");
	});
}

/// Overview in the bottom-right corner with the visible area outlined.
fn draw_minimap(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(bounds) = state.bounds() else {
		return;
	};
	if state.width < MINIMAP_W * 3.0 || state.height < MINIMAP_H * 3.0 {
		return;
	}
	let (mx, my) = (
		state.width - MINIMAP_W - MINIMAP_MARGIN,
		state.height - MINIMAP_H - MINIMAP_MARGIN - 120.0,
	);
	let map = Minimap::new(bounds, mx + 8.0, my + 8.0, MINIMAP_W - 16.0, MINIMAP_H - 16.0);

	ctx.set_fill_style_str("rgba(24, 24, 27, 0.9)");
	ctx.fill_rect(mx, my, MINIMAP_W, MINIMAP_H);
	ctx.set_stroke_style_str("rgba(63, 63, 70, 1)");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(mx, my, MINIMAP_W, MINIMAP_H);

	state.graph.visit_nodes(|node| {
		let (px, py) = map.project(node.x() as f64, node.y() as f64);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill_rect(px - 1.0, py - 1.0, 2.0, 2.0);
	});

	let (x0, y0) = state.transform.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.transform.screen_to_graph(state.width, state.height);
	let (vx0, vy0) = map.project(x0, y0);
	let (vx1, vy1) = map.project(x1, y1);
	ctx.save();
	ctx.begin_path();
	ctx.rect(mx, my, MINIMAP_W, MINIMAP_H);
	ctx.clip();
	ctx.set_stroke_style_str("rgba(250, 204, 21, 0.8)");
	ctx.stroke_rect(vx0, vy0, vx1 - vx0, vy1 - vy0);
	ctx.restore();
}
