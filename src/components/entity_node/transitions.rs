//! State transitions behind the entity node's controls.
//!
//! Each function takes the current collection and returns the next one. A missing node or
//! an attribute index past the end leaves the collection as it was.

use log::{debug, info};

use crate::components::diagram::{
	Attribute, EdgeCollection, EntityData, NodeCollection, NodeId, TypeVocabulary,
};

/// Entity-level text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityField {
	Name,
}

/// New value for one field of an attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeEdit {
	Name(String),
	Type(String),
}

impl AttributeEdit {
	fn apply(self, attribute: &Attribute) -> Attribute {
		match self {
			AttributeEdit::Name(name) => Attribute {
				name,
				..attribute.clone()
			},
			AttributeEdit::Type(ty) => Attribute {
				ty,
				..attribute.clone()
			},
		}
	}
}

fn update_entity<F>(nodes: &NodeCollection, id: &NodeId, f: F) -> NodeCollection
where
	F: FnOnce(&EntityData) -> Option<EntityData>,
{
	nodes.update(id, |node| f(&node.data).map(|data| node.with_data(data)))
}

pub fn edit_entity(
	nodes: &NodeCollection,
	id: &NodeId,
	field: EntityField,
	value: String,
) -> NodeCollection {
	update_entity(nodes, id, |data| {
		Some(match field {
			EntityField::Name => EntityData {
				name: value,
				..data.clone()
			},
		})
	})
}

pub fn edit_attribute(
	nodes: &NodeCollection,
	id: &NodeId,
	index: usize,
	edit: AttributeEdit,
) -> NodeCollection {
	update_entity(nodes, id, |data| {
		let Some(current) = data.attributes.get(index) else {
			debug!("attribute {index} of {id} out of range, ignoring edit");
			return None;
		};
		let mut attributes = data.attributes.clone();
		attributes[index] = edit.apply(current);
		Some(EntityData {
			attributes,
			..data.clone()
		})
	})
}

/// Append an unnamed attribute typed with the vocabulary's first entry.
pub fn add_attribute(
	nodes: &NodeCollection,
	id: &NodeId,
	vocabulary: &TypeVocabulary,
) -> NodeCollection {
	update_entity(nodes, id, |data| {
		let mut attributes = data.attributes.clone();
		attributes.push(Attribute::new("", vocabulary.default_type()));
		Some(EntityData {
			attributes,
			..data.clone()
		})
	})
}

pub fn remove_attribute(nodes: &NodeCollection, id: &NodeId, index: usize) -> NodeCollection {
	update_entity(nodes, id, |data| {
		if index >= data.attributes.len() {
			debug!("attribute {index} of {id} out of range, nothing to remove");
			return None;
		}
		let mut attributes = data.attributes.clone();
		attributes.remove(index);
		Some(EntityData {
			attributes,
			..data.clone()
		})
	})
}

pub fn toggle_open(nodes: &NodeCollection, id: &NodeId) -> NodeCollection {
	update_entity(nodes, id, |data| {
		Some(EntityData {
			open: !data.open,
			..data.clone()
		})
	})
}

/// First half of a delete: drop every edge that starts or ends at `id`.
pub fn detach_entity(edges: &EdgeCollection, id: &NodeId) -> EdgeCollection {
	edges.detached_from(id)
}

/// Second half of a delete: drop the node itself.
pub fn remove_entity(nodes: &NodeCollection, id: &NodeId) -> NodeCollection {
	if nodes.contains(id) {
		info!("removing entity {id}");
	}
	nodes.without(id)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::diagram::{DiagramEdge, DiagramNode, Position};

	fn vocabulary() -> TypeVocabulary {
		TypeVocabulary::new(["string", "number", "boolean"]).unwrap()
	}

	fn entity(id: &str, name: &str, attributes: &[(&str, &str)], open: bool) -> DiagramNode {
		DiagramNode::new(
			id,
			Position::new(1.0, 2.0),
			EntityData {
				name: name.into(),
				attributes: attributes
					.iter()
					.map(|(name, ty)| Attribute::new(*name, *ty))
					.collect(),
				open,
			},
		)
	}

	fn diagram() -> NodeCollection {
		[
			entity("e1", "User", &[("id", "string")], true),
			entity("e2", "Post", &[("id", "string"), ("title", "string")], false),
			entity("e3", "Tag", &[], true),
		]
		.into_iter()
		.collect()
	}

	fn data(nodes: &NodeCollection, id: &str) -> EntityData {
		nodes.get(&id.into()).unwrap().data.clone()
	}

	fn attributes(nodes: &NodeCollection, id: &str) -> Vec<Attribute> {
		data(nodes, id).attributes
	}

	#[test]
	fn rename_changes_only_target_node() {
		let nodes = diagram();
		let next = edit_entity(&nodes, &"e2".into(), EntityField::Name, "Article".into());

		assert_eq!(data(&next, "e2").name, "Article");
		assert_eq!(data(&next, "e2").attributes, data(&nodes, "e2").attributes);
		assert_eq!(next.ids(), nodes.ids());
		for id in ["e1", "e3"] {
			assert_eq!(next.get(&id.into()), nodes.get(&id.into()));
			assert!(Arc::ptr_eq(
				next.get(&id.into()).unwrap(),
				nodes.get(&id.into()).unwrap()
			));
		}
	}

	#[test]
	fn rename_keeps_id_and_position() {
		let next = edit_entity(&diagram(), &"e1".into(), EntityField::Name, String::new());
		let node = next.get(&"e1".into()).unwrap();
		assert_eq!(node.id.as_str(), "e1");
		assert_eq!(node.position, Position::new(1.0, 2.0));
		assert_eq!(node.data.name, "");
	}

	#[test]
	fn operations_on_missing_node_are_identity() {
		let nodes = diagram();
		let missing = NodeId::from("gone");
		let results = [
			edit_entity(&nodes, &missing, EntityField::Name, "x".into()),
			edit_attribute(&nodes, &missing, 0, AttributeEdit::Name("x".into())),
			add_attribute(&nodes, &missing, &vocabulary()),
			remove_attribute(&nodes, &missing, 0),
			toggle_open(&nodes, &missing),
			remove_entity(&nodes, &missing),
		];
		for next in results {
			assert_eq!(next, nodes);
			assert!(next.same_as(&nodes));
		}
	}

	#[test]
	fn attribute_edits_update_in_place() {
		let nodes = diagram();
		let next = edit_attribute(&nodes, &"e2".into(), 1, AttributeEdit::Name("body".into()));
		let next = edit_attribute(&next, &"e2".into(), 0, AttributeEdit::Type("number".into()));

		assert_eq!(
			attributes(&next, "e2"),
			vec![Attribute::new("id", "number"), Attribute::new("body", "string")]
		);
		assert_eq!(data(&next, "e2").name, "Post");
		assert!(!data(&next, "e2").open);
	}

	#[test]
	fn attribute_edit_out_of_range_is_noop() {
		let nodes = diagram();
		let next = edit_attribute(&nodes, &"e1".into(), 1, AttributeEdit::Type("number".into()));
		assert!(next.same_as(&nodes));
		assert_eq!(attributes(&next, "e1"), vec![Attribute::new("id", "string")]);
	}

	#[test]
	fn add_appends_default_attribute() {
		let nodes = diagram();
		let next = add_attribute(&nodes, &"e2".into(), &vocabulary());
		let before = attributes(&nodes, "e2");
		let after = attributes(&next, "e2");

		assert_eq!(after.len(), before.len() + 1);
		assert_eq!(after[..before.len()], before[..]);
		assert_eq!(after.last(), Some(&Attribute::new("", "string")));
	}

	#[test]
	fn add_uses_first_vocabulary_entry() {
		let vocabulary = TypeVocabulary::new(["uuid", "string"]).unwrap();
		let next = add_attribute(&diagram(), &"e3".into(), &vocabulary);
		assert_eq!(attributes(&next, "e3"), vec![Attribute::new("", "uuid")]);
	}

	#[test]
	fn remove_shifts_later_attributes_left() {
		let nodes: NodeCollection = [entity(
			"e1",
			"User",
			&[("id", "string"), ("email", "string"), ("age", "number")],
			true,
		)]
		.into_iter()
		.collect();
		let next = remove_attribute(&nodes, &"e1".into(), 1);
		assert_eq!(
			attributes(&next, "e1"),
			vec![Attribute::new("id", "string"), Attribute::new("age", "number")]
		);
	}

	#[test]
	fn remove_out_of_range_is_noop() {
		let nodes = diagram();
		let next = remove_attribute(&nodes, &"e2".into(), 2);
		assert!(next.same_as(&nodes));
		assert_eq!(attributes(&next, "e2").len(), 2);
	}

	#[test]
	fn toggle_is_an_involution() {
		let nodes = diagram();
		let once = toggle_open(&nodes, &"e1".into());
		assert!(!data(&once, "e1").open);
		assert_eq!(data(&once, "e1").attributes, data(&nodes, "e1").attributes);
		assert_eq!(data(&once, "e1").name, "User");

		let twice = toggle_open(&once, &"e1".into());
		assert_eq!(twice, nodes);
	}

	#[test]
	fn edits_work_while_closed() {
		let nodes = diagram();
		assert!(!data(&nodes, "e2").open);
		let next = add_attribute(&nodes, &"e2".into(), &vocabulary());
		assert_eq!(attributes(&next, "e2").len(), 3);
		assert!(!data(&next, "e2").open);
	}

	#[test]
	fn delete_cascades_to_edges() {
		let nodes = diagram();
		let edges: EdgeCollection = [
			DiagramEdge::new("e1", "e2"),
			DiagramEdge::new("e3", "e1"),
			DiagramEdge::new("e2", "e3"),
		]
		.into_iter()
		.collect();
		let id = NodeId::from("e1");

		let edges = detach_entity(&edges, &id);
		let nodes = remove_entity(&nodes, &id);

		assert!(!nodes.contains(&id));
		assert_eq!(nodes.len(), 2);
		assert!(edges.iter().all(|edge| !edge.touches(&id)));
		assert_eq!(edges.iter().count(), 1);

		let edges_again = detach_entity(&edges, &id);
		let nodes_again = remove_entity(&nodes, &id);
		assert_eq!(edges_again, edges);
		assert_eq!(nodes_again, nodes);
	}

	#[test]
	fn add_then_remove_first_attribute() {
		let nodes: NodeCollection = [entity("e1", "User", &[("id", "string")], true)]
			.into_iter()
			.collect();
		let vocabulary = vocabulary();
		let id = NodeId::from("e1");

		let nodes = add_attribute(&nodes, &id, &vocabulary);
		assert_eq!(
			attributes(&nodes, "e1"),
			vec![
				Attribute::new("id", "string"),
				Attribute::new("", vocabulary.default_type())
			]
		);

		let nodes = remove_attribute(&nodes, &id, 0);
		assert_eq!(
			attributes(&nodes, "e1"),
			vec![Attribute::new("", vocabulary.default_type())]
		);
	}
}
