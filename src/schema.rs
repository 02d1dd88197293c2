use crate::error::{MutationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One accessible member field of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub descriptor: String,
    pub is_static: bool,
}

/// The statically resolved member-field schema of one class.
///
/// Built once when a type's metadata is loaded; field order is preserved and
/// drives candidate ordering, so it must be stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassSchema {
    /// JVM internal name, e.g. `com/example/Account`.
    pub name: String,
    pub fields: Vec<FieldInfo>,
}

/// Pure lookup API over pre-resolved type metadata.
///
/// Implementations must not do any class loading or other fallible discovery
/// at lookup time; an unknown name is reported as `UnresolvedType` and the
/// caller degrades gracefully.
pub trait TypeMetadata: Sync {
    fn class_schema(&self, class_name: &str) -> Result<&ClassSchema>;
}

/// In-memory `TypeMetadata` provider keyed by internal class name.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    classes: HashMap<String, ClassSchema>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: ClassSchema) {
        self.classes.insert(schema.name.clone(), schema);
    }
}

impl TypeMetadata for SchemaTable {
    fn class_schema(&self, class_name: &str) -> Result<&ClassSchema> {
        self.classes
            .get(class_name)
            .ok_or_else(|| MutationError::UnresolvedType {
                class: class_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lookup() {
        let mut table = SchemaTable::new();
        table.insert(ClassSchema {
            name: "com/example/Account".to_string(),
            fields: vec![FieldInfo {
                name: "balance".to_string(),
                descriptor: "J".to_string(),
                is_static: false,
            }],
        });

        let schema = table.class_schema("com/example/Account").unwrap();
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].name, "balance");
    }

    #[test]
    fn test_unknown_class_is_unresolved() {
        let table = SchemaTable::new();
        let err = table.class_schema("com/example/Missing").unwrap_err();
        match err {
            MutationError::UnresolvedType { class } => {
                assert_eq!(class, "com/example/Missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
