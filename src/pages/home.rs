use leptos::prelude::*;
use log::info;

use crate::components::diagram::{
	Attribute, DiagramCanvas, DiagramEdge, DiagramNode, DiagramStore, EdgeCollection,
	EntityData, NodeCollection, Position, TypeVocabulary, use_type_vocabulary,
};

/// A small blog schema to start from.
fn sample_diagram(vocabulary: &TypeVocabulary) -> (NodeCollection, EdgeCollection) {
	let entity = |id: &str, x: f64, y: f64, name: &str, attributes: &[(&str, &str)]| {
		DiagramNode::new(
			id,
			Position::new(x, y),
			EntityData {
				name: name.into(),
				attributes: attributes
					.iter()
					.map(|(name, ty)| Attribute::new(*name, *ty))
					.collect(),
				open: true,
			},
		)
	};
	let id_type = vocabulary.default_type();

	let nodes = [
		entity("entity-1", 80.0, 80.0, "User", &[("id", id_type), ("email", "string")]),
		entity(
			"entity-2",
			420.0,
			80.0,
			"Post",
			&[("id", id_type), ("title", "string"), ("published", "boolean")],
		),
		entity("entity-3", 420.0, 420.0, "Comment", &[("id", id_type), ("body", "string")]),
	]
	.into_iter()
	.collect();

	let edges = [
		DiagramEdge::new("entity-1", "entity-2"),
		DiagramEdge::new("entity-2", "entity-3"),
		DiagramEdge::new("entity-1", "entity-3"),
	]
	.into_iter()
	.collect();

	(nodes, edges)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let vocabulary = use_type_vocabulary();
	let (nodes, edges) = sample_diagram(&vocabulary);
	let store = DiagramStore::provide(nodes, edges);

	let add_entity = move |_| {
		store.set_nodes(|nodes| {
			let id = nodes.next_entity_id();
			let offset = 24.0 * nodes.len() as f64;
			info!("adding entity {id}");
			nodes.with_node(DiagramNode::new(
				id.clone(),
				Position::new(40.0 + offset, 40.0 + offset),
				EntityData {
					name: id.to_string(),
					attributes: Vec::new(),
					open: true,
				},
			))
		});
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-diagram">
				<DiagramCanvas />
				<div class="diagram-overlay">
					<h1>"Entity Diagram"</h1>
					<p class="subtitle">
						"Drag the top strip to move an entity. Drag from the bottom handle to another entity's top handle to connect."
					</p>
					<button class="diagram-overlay__add" on:click=add_entity>
						"Add entity"
					</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_edges_reference_sample_nodes() {
		let (nodes, edges) = sample_diagram(&TypeVocabulary::default());
		assert_eq!(nodes.len(), 3);
		assert_eq!(edges.iter().count(), 3);
		assert!(edges
			.iter()
			.all(|edge| nodes.contains(&edge.source) && nodes.contains(&edge.target)));
	}

	#[test]
	fn sample_ids_seed_from_vocabulary() {
		let vocabulary = TypeVocabulary::new(["uuid", "string"]).unwrap();
		let (nodes, _) = sample_diagram(&vocabulary);
		assert!(nodes.ids().iter().all(|id| {
			nodes.get(id).unwrap().data.attributes[0] == Attribute::new("id", "uuid")
		}));
	}
}
