use super::types::{DiagramNode, EntityData, NodeId, Position};

pub const NODE_WIDTH: f64 = 260.0;
pub const NODE_PADDING: f64 = 8.0;
pub const GRIP_HEIGHT: f64 = 14.0;
pub const CONTROL_HEIGHT: f64 = 36.0;
pub const CONTROL_GAP: f64 = 8.0;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Rendered height of an entity box. Mirrors the fixed row metrics in `style/main.css`.
pub fn entity_height(data: &EntityData) -> f64 {
	let closed = 2.0 * NODE_PADDING + GRIP_HEIGHT + CONTROL_HEIGHT + CONTROL_GAP + CONTROL_HEIGHT;
	if !data.open {
		return closed;
	}
	let rows = data.attributes.len() as f64;
	closed + CONTROL_GAP + rows * (CONTROL_HEIGHT + CONTROL_GAP) + CONTROL_HEIGHT
}

/// Where outgoing edges leave a node: bottom centre.
pub fn source_anchor(node: &DiagramNode) -> (f64, f64) {
	(
		node.position.x + NODE_WIDTH / 2.0,
		node.position.y + entity_height(&node.data),
	)
}

/// Where incoming edges enter a node: top centre.
pub fn target_anchor(node: &DiagramNode) -> (f64, f64) {
	(node.position.x + NODE_WIDTH / 2.0, node.position.y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
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
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zoom one wheel step around the screen point `(sx, sy)`, keeping it fixed.
	pub fn zoomed_at(&self, sx: f64, sy: f64, delta_y: f64) -> Self {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	/// CSS transform for the node layer so DOM nodes line up with the canvas.
	pub fn css(&self) -> String {
		format!("translate({}px, {}px) scale({})", self.x, self.y, self.k)
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

impl DragState {
	/// New node position for the pointer at screen `(x, y)`.
	pub fn position_at(&self, x: f64, y: f64, transform: &ViewTransform) -> Position {
		Position::new(
			self.node_start.x + (x - self.start_x) / transform.k,
			self.node_start.y + (y - self.start_y) / transform.k,
		)
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Edge being dragged out of a source handle, in graph coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingConnection {
	pub source: NodeId,
	pub cursor: (f64, f64),
}

#[derive(Clone, Debug, Default)]
pub struct PointerState {
	pub drag: DragState,
	pub pan: PanState,
}

impl PointerState {
	pub fn release(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::diagram::types::Attribute;

	fn data(rows: usize, open: bool) -> EntityData {
		EntityData {
			name: "User".into(),
			attributes: (0..rows).map(|i| Attribute::new(format!("a{i}"), "string")).collect(),
			open,
		}
	}

	#[test]
	fn height_ignores_rows_when_closed() {
		assert_eq!(entity_height(&data(0, false)), entity_height(&data(5, false)));
	}

	#[test]
	fn height_grows_per_row_when_open() {
		let one = entity_height(&data(1, true));
		let two = entity_height(&data(2, true));
		assert_eq!(two - one, CONTROL_HEIGHT + CONTROL_GAP);
		assert!(entity_height(&data(0, true)) > entity_height(&data(0, false)));
	}

	#[test]
	fn anchors_sit_on_horizontal_centre() {
		let node = DiagramNode::new("e1", Position::new(100.0, 50.0), data(0, false));
		let (sx, sy) = source_anchor(&node);
		let (tx, ty) = target_anchor(&node);
		assert_eq!(sx, 100.0 + NODE_WIDTH / 2.0);
		assert_eq!(tx, sx);
		assert_eq!(ty, 50.0);
		assert_eq!(sy, 50.0 + entity_height(&node.data));
	}

	#[test]
	fn screen_to_graph_undoes_pan_and_zoom() {
		let transform = ViewTransform {
			x: 30.0,
			y: -12.0,
			k: 2.0,
		};
		assert_eq!(transform.screen_to_graph(130.0, 88.0), (50.0, 50.0));
		assert_eq!(ViewTransform::default().screen_to_graph(7.0, 9.0), (7.0, 9.0));
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let transform = ViewTransform::default();
		let zoomed = transform.zoomed_at(200.0, 100.0, -1.0);
		let before = transform.screen_to_graph(200.0, 100.0);
		let after = zoomed.screen_to_graph(200.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		assert!(zoomed.k > transform.k);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut transform = ViewTransform::default();
		for _ in 0..100 {
			transform = transform.zoomed_at(0.0, 0.0, 1.0);
		}
		assert_eq!(transform.k, MIN_ZOOM);
		for _ in 0..200 {
			transform = transform.zoomed_at(0.0, 0.0, -1.0);
		}
		assert_eq!(transform.k, MAX_ZOOM);
	}

	#[test]
	fn drag_scales_with_zoom() {
		let drag = DragState {
			node: Some("e1".into()),
			start_x: 10.0,
			start_y: 10.0,
			node_start: Position::new(100.0, 100.0),
		};
		let transform = ViewTransform {
			k: 2.0,
			..ViewTransform::default()
		};
		assert_eq!(drag.position_at(30.0, 0.0, &transform), Position::new(110.0, 95.0));
	}
}
