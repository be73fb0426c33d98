use std::sync::Arc;

use leptos::prelude::*;

use super::collection::{EdgeCollection, NodeCollection};
use super::types::{DiagramNode, EntityData, NodeId, TypeVocabulary};

/// Shared node and edge collections for one diagram.
///
/// Updates go through [`DiagramStore::set_nodes`] and [`DiagramStore::set_edges`], which take
/// a pure transform of the previous collection. Subscribers are only notified when the
/// transform returns something other than the collection it was given.
#[derive(Clone, Copy)]
pub struct DiagramStore {
	nodes: RwSignal<NodeCollection>,
	edges: RwSignal<EdgeCollection>,
}

impl DiagramStore {
	pub fn new(nodes: NodeCollection, edges: EdgeCollection) -> Self {
		Self {
			nodes: RwSignal::new(nodes),
			edges: RwSignal::new(edges),
		}
	}

	/// Create a store and make it available to descendants through [`use_diagram`].
	pub fn provide(nodes: NodeCollection, edges: EdgeCollection) -> Self {
		let store = Self::new(nodes, edges);
		provide_context(store);
		store
	}

	pub fn node_ids(&self) -> Vec<NodeId> {
		self.nodes.with(|nodes| nodes.ids().to_vec())
	}

	pub fn node(&self, id: &NodeId) -> Option<Arc<DiagramNode>> {
		self.nodes.with(|nodes| nodes.get(id).cloned())
	}

	pub fn entity(&self, id: &NodeId) -> Option<EntityData> {
		self.nodes
			.with(|nodes| nodes.get(id).map(|node| node.data.clone()))
	}

	pub fn with_graph<R>(&self, f: impl FnOnce(&NodeCollection, &EdgeCollection) -> R) -> R {
		self.nodes.with(|nodes| self.edges.with(|edges| f(nodes, edges)))
	}

	pub fn with_nodes_untracked<R>(&self, f: impl FnOnce(&NodeCollection) -> R) -> R {
		self.nodes.with_untracked(f)
	}

	pub fn set_nodes(&self, f: impl FnOnce(&NodeCollection) -> NodeCollection) {
		self.nodes.maybe_update(|nodes| {
			let next = f(nodes);
			if next.same_as(nodes) {
				return false;
			}
			*nodes = next;
			true
		});
	}

	pub fn set_edges(&self, f: impl FnOnce(&EdgeCollection) -> EdgeCollection) {
		self.edges.maybe_update(|edges| {
			let next = f(edges);
			if next.same_as(edges) {
				return false;
			}
			*edges = next;
			true
		});
	}
}

/// The diagram provided by an ancestor via [`DiagramStore::provide`].
pub fn use_diagram() -> DiagramStore {
	expect_context::<DiagramStore>()
}

/// The vocabulary provided by an ancestor, or the built-in default.
pub fn use_type_vocabulary() -> TypeVocabulary {
	use_context::<TypeVocabulary>().unwrap_or_default()
}
