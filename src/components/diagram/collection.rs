//! Immutable node and edge collections.
//!
//! Every operation returns a new collection. Nodes and edges are shared through `Arc`, so
//! an update only allocates the entry it replaces and [`NodeCollection::same_as`] can tell
//! an unchanged collection apart without comparing values.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::constants::ENTITY_ID_PREFIX;

use super::types::{DiagramEdge, DiagramNode, NodeId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeCollection {
	order: Vec<NodeId>,
	by_id: HashMap<NodeId, Arc<DiagramNode>>,
}

impl NodeCollection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	pub fn get(&self, id: &NodeId) -> Option<&Arc<DiagramNode>> {
		self.by_id.get(id)
	}

	pub fn contains(&self, id: &NodeId) -> bool {
		self.by_id.contains_key(id)
	}

	pub fn ids(&self) -> &[NodeId] {
		&self.order
	}

	/// Locate `id` and replace it with whatever `f` produces.
	///
	/// Returns an unchanged copy when the node is missing or `f` declines with `None`.
	/// Other nodes keep their slot and their `Arc`.
	pub fn update<F>(&self, id: &NodeId, f: F) -> Self
	where
		F: FnOnce(&DiagramNode) -> Option<DiagramNode>,
	{
		let Some(node) = self.by_id.get(id) else {
			debug!("node {id} not found, leaving nodes unchanged");
			return self.clone();
		};
		let Some(next) = f(node) else {
			return self.clone();
		};
		debug_assert_eq!(next.id, *id, "node updates must keep the node id");

		let mut by_id = self.by_id.clone();
		by_id.insert(id.clone(), Arc::new(next));
		Self {
			order: self.order.clone(),
			by_id,
		}
	}

	/// Append `node`, or replace the node with the same id in place.
	pub fn with_node(&self, node: DiagramNode) -> Self {
		let mut next = self.clone();
		if !next.by_id.contains_key(&node.id) {
			next.order.push(node.id.clone());
		}
		next.by_id.insert(node.id.clone(), Arc::new(node));
		next
	}

	pub fn without(&self, id: &NodeId) -> Self {
		if !self.contains(id) {
			return self.clone();
		}
		let mut next = self.clone();
		next.order.retain(|existing| existing != id);
		next.by_id.remove(id);
		next
	}

	/// True when both collections hold the very same node allocations in the same order.
	pub fn same_as(&self, other: &Self) -> bool {
		self.order == other.order
			&& self.order.iter().all(|id| {
				match (self.by_id.get(id), other.by_id.get(id)) {
					(Some(a), Some(b)) => Arc::ptr_eq(a, b),
					_ => false,
				}
			})
	}

	/// First id of the form `entity-N` not present in the collection.
	pub fn next_entity_id(&self) -> NodeId {
		(self.len() + 1..)
			.map(|n| NodeId::from(format!("{ENTITY_ID_PREFIX}{n}")))
			.find(|id| !self.contains(id))
			.unwrap_or_else(|| NodeId::from(ENTITY_ID_PREFIX))
	}
}

impl FromIterator<DiagramNode> for NodeCollection {
	fn from_iter<I: IntoIterator<Item = DiagramNode>>(iter: I) -> Self {
		iter.into_iter()
			.fold(Self::new(), |nodes, node| nodes.with_node(node))
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeCollection(Vec<Arc<DiagramEdge>>);

impl EdgeCollection {
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Arc<DiagramEdge>> {
		self.0.iter()
	}

	pub fn contains(&self, source: &NodeId, target: &NodeId) -> bool {
		self.0
			.iter()
			.any(|edge| edge.source == *source && edge.target == *target)
	}

	/// Every edge except those whose source or target is `id`.
	pub fn detached_from(&self, id: &NodeId) -> Self {
		Self(
			self.0
				.iter()
				.filter(|edge| !edge.touches(id))
				.cloned()
				.collect(),
		)
	}

	/// Adds `source -> target` unless it already exists or would loop onto one node.
	pub fn connected(&self, source: &NodeId, target: &NodeId) -> Self {
		if source == target || self.contains(source, target) {
			debug!("ignoring connection {source} -> {target}");
			return self.clone();
		}
		let mut next = self.clone();
		next.0
			.push(Arc::new(DiagramEdge::new(source.clone(), target.clone())));
		next
	}

	pub fn same_as(&self, other: &Self) -> bool {
		self.0.len() == other.0.len()
			&& self.0.iter().zip(&other.0).all(|(a, b)| Arc::ptr_eq(a, b))
	}
}

impl FromIterator<DiagramEdge> for EdgeCollection {
	fn from_iter<I: IntoIterator<Item = DiagramEdge>>(iter: I) -> Self {
		Self(iter.into_iter().map(Arc::new).collect())
	}
}
