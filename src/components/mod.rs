pub mod diagram;
pub mod entity_node;
