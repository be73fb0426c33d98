use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::collection::{EdgeCollection, NodeCollection};
use super::state::{PendingConnection, ViewTransform, source_anchor, target_anchor};

const BACKGROUND: &str = "#1a1a2e";
const GRID_SPACING: f64 = 24.0;

pub struct Frame<'a> {
	pub nodes: &'a NodeCollection,
	pub edges: &'a EdgeCollection,
	pub pending: Option<&'a PendingConnection>,
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
}

pub fn render(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, frame.width, frame.height);
	ctx.save();
	let _ = ctx.translate(frame.transform.x, frame.transform.y);
	let _ = ctx.scale(frame.transform.k, frame.transform.k);
	draw_grid(frame, ctx);
	draw_edges(frame, ctx);
	draw_pending(frame, ctx);
	ctx.restore();
}

fn draw_grid(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d) {
	let k = frame.transform.k;
	if k < 0.4 {
		return;
	}
	let (x0, y0) = frame.transform.screen_to_graph(0.0, 0.0);
	let (x1, y1) = frame.transform.screen_to_graph(frame.width, frame.height);
	let (start_x, start_y) = (
		(x0 / GRID_SPACING).floor() * GRID_SPACING,
		(y0 / GRID_SPACING).floor() * GRID_SPACING,
	);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.08)");
	let size = 1.5 / k;
	let mut x = start_x;
	while x <= x1 {
		let mut y = start_y;
		while y <= y1 {
			ctx.fill_rect(x - size / 2.0, y - size / 2.0, size, size);
			y += GRID_SPACING;
		}
		x += GRID_SPACING;
	}
}

fn draw_edges(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d) {
	let k = frame.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	if frame.edges.is_empty() || frame.nodes.is_empty() {
		return;
	}

	for edge in frame.edges.iter() {
		let (Some(source), Some(target)) =
			(frame.nodes.get(&edge.source), frame.nodes.get(&edge.target))
		else {
			continue;
		};
		let (x1, y1) = source_anchor(source);
		let (x2, y2) = target_anchor(target);
		draw_arrow(
			ctx,
			(x1, y1),
			(x2, y2),
			"rgba(100, 180, 255, 0.7)",
			line_width,
			Some((dash, gap)),
			arrow_size,
		);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_pending(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d) {
	let Some(pending) = frame.pending else {
		return;
	};
	let Some(source) = frame.nodes.get(&pending.source) else {
		return;
	};
	let k = frame.transform.k;
	draw_arrow(
		ctx,
		source_anchor(source),
		pending.cursor,
		"rgba(255, 89, 65, 0.9)",
		2.0 / k,
		None,
		8.0 / k,
	);
}

fn draw_arrow(
	ctx: &CanvasRenderingContext2d,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	color: &str,
	width: f64,
	dash: Option<(f64, f64)>,
	arrow_size: f64,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	let pattern = match dash {
		Some((dash, gap)) => js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);

	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2 - ux * arrow_size, y2 - uy * arrow_size);
	ctx.stroke();

	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(color);
	let (back_x, back_y) = (x2 - ux * arrow_size, y2 - uy * arrow_size);
	let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(x2, y2);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}
