mod component;
pub mod transitions;

pub use component::EntityNode;
