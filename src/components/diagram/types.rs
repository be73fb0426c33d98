use std::fmt;
use std::sync::Arc;

/// Identifier of a node in the diagram. Owned by the store, never rewritten by node operations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Arc<str>);

impl NodeId {
	pub fn new(id: impl Into<Arc<str>>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		Self::new(id)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// One named, typed field of an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribute {
	pub name: String,
	pub ty: String,
}

impl Attribute {
	pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			ty: ty.into(),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityData {
	pub name: String,
	pub attributes: Vec<Attribute>,
	/// Whether the attribute editor is shown. Has no effect on `attributes`.
	pub open: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramNode {
	pub id: NodeId,
	pub position: Position,
	pub data: EntityData,
}

impl DiagramNode {
	pub fn new(id: impl Into<NodeId>, position: Position, data: EntityData) -> Self {
		Self {
			id: id.into(),
			position,
			data,
		}
	}

	/// Copy of this node carrying `data`; id and position are kept.
	pub fn with_data(&self, data: EntityData) -> Self {
		Self {
			id: self.id.clone(),
			position: self.position,
			data,
		}
	}

	pub fn with_position(&self, position: Position) -> Self {
		Self {
			position,
			..self.clone()
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagramEdge {
	pub source: NodeId,
	pub target: NodeId,
}

impl DiagramEdge {
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}

	pub fn touches(&self, id: &NodeId) -> bool {
		self.source == *id || self.target == *id
	}
}

/// Ordered list of allowed attribute type names. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeVocabulary(Arc<[String]>);

impl TypeVocabulary {
	/// Returns `None` when `types` is empty, since new attributes need a default type.
	pub fn new<I, S>(types: I) -> Option<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let types: Arc<[String]> = types.into_iter().map(Into::into).collect();
		(!types.is_empty()).then_some(Self(types))
	}

	/// Type given to newly added attributes.
	pub fn default_type(&self) -> &str {
		&self.0[0]
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

/// Plain-text only, for trees that were not handed a vocabulary.
impl Default for TypeVocabulary {
	fn default() -> Self {
		Self(Arc::from([String::from("string")]))
	}
}
