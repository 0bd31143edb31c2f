use leptos::prelude::*;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const BUTTON_ZOOM: f64 = 1.25;
const FIT_PADDING: f64 = 40.0;

/// Screen = world * k + (x, y).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Scale by `factor` keeping the screen point `(cx, cy)` fixed.
	pub fn zoom_about(&mut self, factor: f64, cx: f64, cy: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = cx - (cx - self.x) * ratio;
		self.y = cy - (cy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Axis-aligned box around a set of world points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			})
		})
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}

/// Transform that shows all of `bounds` inside a `width` x `height` viewport.
pub fn fit_transform(bounds: Option<Bounds>, width: f64, height: f64) -> ViewTransform {
	let Some(bounds) = bounds else {
		return ViewTransform::centered(width, height);
	};
	let avail_w = (width - 2.0 * FIT_PADDING).max(1.0);
	let avail_h = (height - 2.0 * FIT_PADDING).max(1.0);
	let k = (avail_w / bounds.width().max(1.0))
		.min(avail_h / bounds.height().max(1.0))
		.clamp(MIN_ZOOM, MAX_ZOOM);
	let (cx, cy) = bounds.center();
	ViewTransform {
		x: width / 2.0 - cx * k,
		y: height / 2.0 - cy * k,
		k,
	}
}

/// Maps world bounds into a fixed screen-space box, preserving aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	scale: f64,
	origin: (f64, f64),
}

impl Minimap {
	pub fn new(bounds: Bounds, x: f64, y: f64, width: f64, height: f64) -> Self {
		let scale = (width / bounds.width().max(1.0)).min(height / bounds.height().max(1.0));
		let (cx, cy) = bounds.center();
		Self {
			x,
			y,
			width,
			height,
			scale,
			origin: (cx, cy),
		}
	}

	pub fn project(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			self.x + self.width / 2.0 + (gx - self.origin.0) * self.scale,
			self.y + self.height / 2.0 + (gy - self.origin.1) * self.scale,
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportCommand {
	ZoomIn,
	ZoomOut,
	Fit,
}

impl ViewportCommand {
	/// Apply to `transform` for a viewport of the given size; `Fit` needs the node bounds.
	pub fn apply(
		self,
		transform: &mut ViewTransform,
		width: f64,
		height: f64,
		bounds: Option<Bounds>,
	) {
		match self {
			ViewportCommand::ZoomIn => transform.zoom_about(BUTTON_ZOOM, width / 2.0, height / 2.0),
			ViewportCommand::ZoomOut => {
				transform.zoom_about(1.0 / BUTTON_ZOOM, width / 2.0, height / 2.0)
			}
			ViewportCommand::Fit => *transform = fit_transform(bounds, width, height),
		}
	}
}

/// Camera handle shared between the toolbar and the canvas.
///
/// Each call bumps a sequence number so repeating the same command still fires.
#[derive(Clone, Copy, Debug)]
pub struct ViewportControls {
	command: RwSignal<(u64, Option<ViewportCommand>)>,
}

impl ViewportControls {
	pub fn new() -> Self {
		Self {
			command: RwSignal::new((0, None)),
		}
	}

	fn send(&self, cmd: ViewportCommand) {
		self.command.update(|(seq, last)| {
			*seq += 1;
			*last = Some(cmd);
		});
	}

	pub fn zoom_in(&self) {
		self.send(ViewportCommand::ZoomIn);
	}

	pub fn zoom_out(&self) {
		self.send(ViewportCommand::ZoomOut);
	}

	pub fn fit(&self) {
		self.send(ViewportCommand::Fit);
	}

	/// Cursor positioned after every command sent so far.
	pub fn cursor(&self) -> CommandCursor {
		CommandCursor {
			seen: self.command.with_untracked(|(seq, _)| *seq),
		}
	}

	/// Next command past `cursor`, tracked.
	pub fn take_next(&self, cursor: &mut CommandCursor) -> Option<ViewportCommand> {
		self.command.with(|&(seq, cmd)| cursor.advance(seq, cmd))
	}
}

/// Read position in a [`ViewportControls`] stream. A canvas mounted against existing
/// controls starts at the current position and never replays an old command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommandCursor {
	seen: u64,
}

impl CommandCursor {
	fn advance(&mut self, seq: u64, cmd: Option<ViewportCommand>) -> Option<ViewportCommand> {
		if seq <= self.seen {
			return None;
		}
		self.seen = seq;
		cmd
	}
}

impl Default for ViewportControls {
	fn default() -> Self {
		Self::new()
	}
}
