//! Error types for descriptor loading and schema validation.

use thiserror::Error;

/// Error type for descriptor decoding and loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Protobuf decoding error.
    #[error("descriptor decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// File not present in the descriptor set.
    #[error("file '{name}' not found in descriptor set")]
    FileNotFound {
        /// File name.
        name: String,
    },

    /// Imported file not present in the descriptor set.
    #[error("import '{import}' of file '{file}' not found in descriptor set")]
    MissingImport {
        /// Importing file.
        file: String,
        /// Imported file name.
        import: String,
    },

    /// Field type reference that is neither scalar, message nor enum.
    #[error("unknown type '{type_name}' referenced in field '{field}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Missing required descriptor attribute.
    #[error("missing required attribute '{attribute}' on {element}")]
    MissingAttribute {
        /// Descriptor element.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid descriptor attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on {element}")]
    InvalidAttribute {
        /// Descriptor element.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Loading error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Declaration without a name.
    #[error("unnamed {kind} in '{scope}'")]
    EmptyName {
        /// Kind of declaration (field, enum value, ...).
        kind: String,
        /// Enclosing scope.
        scope: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}' in '{scope}'")]
    DuplicateDefinition {
        /// Kind of definition (message, field, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
        /// Enclosing scope.
        scope: String,
    },
}

impl ParseError {
    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl SchemaError {
    /// Creates an empty name error.
    pub fn empty_name(kind: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::EmptyName {
            kind: kind.into(),
            scope: scope.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(
        kind: impl Into<String>,
        name: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
            scope: scope.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_display() {
        let err = ParseError::unknown_type(".pkg.Missing", "value");
        assert_eq!(
            err.to_string(),
            "unknown type '.pkg.Missing' referenced in field 'value'"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let err = SchemaError::duplicate("field", "id", "pkg.Order");
        assert_eq!(
            err.to_string(),
            "duplicate field definition: 'id' in 'pkg.Order'"
        );
    }

    #[test]
    fn test_schema_error_from_parse_error() {
        let err: SchemaError = ParseError::missing_attr("field", "name").into();
        assert!(matches!(err, SchemaError::Parse(_)));
        assert!(err.to_string().contains("missing required attribute 'name'"));
    }
}
