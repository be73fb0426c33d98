mod collection;
mod component;
mod render;
mod state;
mod store;
mod types;

pub use collection::{EdgeCollection, NodeCollection};
pub use component::DiagramCanvas;
pub use store::{DiagramStore, use_diagram, use_type_vocabulary};
pub use types::{Attribute, DiagramEdge, DiagramNode, EntityData, NodeId, Position, TypeVocabulary};
