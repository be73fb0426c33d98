use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render::{self, Frame};
use super::state::{DragState, PanState, PendingConnection, PointerState, ViewTransform};
use super::store::use_diagram;
use super::types::NodeId;
use crate::components::entity_node::EntityNode;

const SOURCE_HANDLE: &str = "[data-handle='source']";
const TARGET_HANDLE: &str = "[data-handle='target']";
const GRIP: &str = "[data-grip]";

/// Full-size editing surface for the diagram provided through context.
///
/// Edges are painted on a 2D canvas; entity nodes are DOM elements in a layer that shares the
/// canvas' pan and zoom.
#[component]
pub fn DiagramCanvas(
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let store = use_diagram();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let transform = RwSignal::new(ViewTransform::default());
	let pending = RwSignal::new(None::<PendingConnection>);
	let size = RwSignal::new(viewport_size(width, height));
	let pointer = Rc::new(RefCell::new(PointerState::default()));

	if let Some(window) = web_sys::window() {
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			size.set(viewport_size(width, height));
		});
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		// Lives as long as the page.
		on_resize.forget();
	}

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = size.get();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("2d canvas context unavailable, skipping frame");
			return;
		};
		let transform = transform.get();
		pending.with(|pending| {
			store.with_graph(|nodes, edges| {
				let frame = Frame {
					nodes,
					edges,
					pending: pending.as_ref(),
					transform,
					width: w,
					height: h,
				};
				render::render(&frame, &ctx);
			})
		});
	});

	let pointer_md = pointer.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (Some(container), Some(element)) = (container_ref.get(), event_element(&ev)) else {
			return;
		};
		let (x, y) = local_point(&container, &ev);
		let view = transform.get_untracked();

		if let Some(source) = handle_owner(&element, SOURCE_HANDLE) {
			ev.prevent_default();
			let cursor = view.screen_to_graph(x, y);
			pending.set(Some(PendingConnection { source, cursor }));
		} else if let Some(id) = handle_owner(&element, GRIP) {
			ev.prevent_default();
			let Some(node_start) =
				store.with_nodes_untracked(|nodes| nodes.get(&id).map(|node| node.position))
			else {
				return;
			};
			pointer_md.borrow_mut().drag = DragState {
				node: Some(id),
				start_x: x,
				start_y: y,
				node_start,
			};
		} else if !inside(&element, ".entity-node") {
			pointer_md.borrow_mut().pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: view.x,
				transform_start_y: view.y,
			};
		}
	};

	let pointer_mm = pointer.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let (x, y) = local_point(&container, &ev);
		let view = transform.get_untracked();

		if pending.with_untracked(Option::is_some) {
			let cursor = view.screen_to_graph(x, y);
			pending.update(|pending| {
				if let Some(pending) = pending {
					pending.cursor = cursor;
				}
			});
			return;
		}

		let state = pointer_mm.borrow();
		if let Some(id) = &state.drag.node {
			let position = state.drag.position_at(x, y, &view);
			store.set_nodes(|nodes| nodes.update(id, |node| Some(node.with_position(position))));
		} else if state.pan.active {
			transform.update(|t| {
				t.x = state.pan.transform_start_x + (x - state.pan.start_x);
				t.y = state.pan.transform_start_y + (y - state.pan.start_y);
			});
		}
	};

	let pointer_mu = pointer.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some(connection) = pending.get_untracked() {
			pending.set(None);
			let target = event_element(&ev).and_then(|el| handle_owner(&el, TARGET_HANDLE));
			if let Some(target) = target {
				info!("connecting {} -> {}", connection.source, target);
				store.set_edges(|edges| edges.connected(&connection.source, &target));
			}
		}
		pointer_mu.borrow_mut().release();
	};

	let pointer_ml = pointer.clone();
	let on_mouseleave = move |_: MouseEvent| {
		pending.set(None);
		pointer_ml.borrow_mut().release();
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(container) = container_ref.get() else {
			return;
		};
		let (x, y) = local_point(&container, &ev);
		transform.update(|t| *t = t.zoomed_at(x, y, ev.delta_y()));
	};

	view! {
		<div
			node_ref=container_ref
			class="diagram-canvas"
			style:width=move || format!("{}px", size.get().0)
			style:height=move || format!("{}px", size.get().1)
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
		>
			<canvas node_ref=canvas_ref class="diagram-canvas__edges" />
			<div class="diagram-canvas__nodes" style:transform=move || transform.get().css()>
				<For
					each=move || store.node_ids()
					key=|id| id.clone()
					children=move |id| view! { <PositionedEntity id=id /> }
				/>
			</div>
		</div>
	}
}

#[component]
fn PositionedEntity(id: NodeId) -> impl IntoView {
	let store = use_diagram();
	let position = Memo::new({
		let id = id.clone();
		move |_| store.node(&id).map(|node| node.position).unwrap_or_default()
	});

	view! {
		<div
			class="diagram-node"
			style:left=move || format!("{}px", position.get().x)
			style:top=move || format!("{}px", position.get().y)
		>
			<EntityNode id=id />
		</div>
	}
}

fn viewport_size(width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let window = web_sys::window();
	let measure = |dimension: Option<Result<JsValue, JsValue>>, fallback: f64| {
		dimension
			.and_then(Result::ok)
			.and_then(|v| v.as_f64())
			.unwrap_or_else(|| {
				warn!("window size unavailable, using {fallback}px");
				fallback
			})
	};
	(
		width.unwrap_or_else(|| measure(window.as_ref().map(|w| w.inner_width()), 800.0)),
		height.unwrap_or_else(|| measure(window.as_ref().map(|w| w.inner_height()), 600.0)),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn local_point(container: &Element, ev: &MouseEvent) -> (f64, f64) {
	let rect = container.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn event_element(ev: &MouseEvent) -> Option<Element> {
	ev.target()?.dyn_into::<Element>().ok()
}

fn inside(element: &Element, selector: &str) -> bool {
	matches!(element.closest(selector), Ok(Some(_)))
}

/// Id of the entity owning the closest ancestor of `element` matching `selector`.
fn handle_owner(element: &Element, selector: &str) -> Option<NodeId> {
	element
		.closest(selector)
		.ok()
		.flatten()?
		.closest("[data-node-id]")
		.ok()
		.flatten()?
		.get_attribute("data-node-id")
		.map(NodeId::from)
}
