//! Compile-time defaults for the editor.

/// Attribute types offered by the editor. The first entry is the type of a freshly added
/// attribute.
pub const ATTRIBUTE_TYPES: &[&str] = &[
	"string", "number", "boolean", "date", "datetime", "uuid", "json",
];

/// Prefix of ids handed out to entities created from the editor.
pub const ENTITY_ID_PREFIX: &str = "entity-";
