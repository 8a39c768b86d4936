//! Schema type definitions.
//!
//! This module contains the data structures representing one protobuf file:
//! the file itself, its imports, enums and the scalar type taxonomy.

use crate::messages::{ExtensionDef, MessageDef, ServiceDef};

/// Complete schema of one protobuf file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// File name as known to the compiler (e.g. `dir/orders.proto`).
    pub name: String,
    /// Package name (may be empty).
    pub package: String,
    /// Imported files, in declaration order.
    pub imports: Vec<ImportRef>,
    /// Top-level enums.
    pub enums: Vec<EnumDef>,
    /// Top-level messages.
    pub messages: Vec<MessageDef>,
    /// Services.
    pub services: Vec<ServiceDef>,
    /// Top-level extension declarations.
    pub extensions: Vec<ExtensionDef>,
}

impl SchemaFile {
    /// Creates a new empty schema file.
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            imports: Vec::new(),
            enums: Vec::new(),
            messages: Vec::new(),
            services: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Adds an import.
    pub fn add_import(&mut self, import: ImportRef) {
        self.imports.push(import);
    }

    /// Adds a top-level enum.
    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.enums.push(enum_def);
    }

    /// Adds a top-level message.
    pub fn add_message(&mut self, message: MessageDef) {
        self.messages.push(message);
    }

    /// Adds a service.
    pub fn add_service(&mut self, service: ServiceDef) {
        self.services.push(service);
    }

    /// Adds an extension declaration.
    pub fn add_extension(&mut self, extension: ExtensionDef) {
        self.extensions.push(extension);
    }
}

/// Reference to an imported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    /// Imported file name (e.g. `common/types.proto`).
    pub name: String,
    /// Package of the imported file.
    pub package: String,
}

impl ImportRef {
    /// Creates a new import reference.
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Fully-qualified name (no leading dot).
    pub full_name: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            values: Vec::new(),
        }
    }

    /// Adds a value to the enum.
    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    /// Builder-style variant of [`EnumDef::add_value`].
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.add_value(EnumValue::new(name, number));
        self
    }
}

/// Enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Numeric value.
    pub number: i32,
}

impl EnumValue {
    /// Creates a new enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

/// Protobuf scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 64-bit floating point.
    Double,
    /// 32-bit floating point.
    Float,
    /// Signed 64-bit varint.
    Int64,
    /// Unsigned 64-bit varint.
    Uint64,
    /// Signed 32-bit varint.
    Int32,
    /// Fixed-width unsigned 64-bit.
    Fixed64,
    /// Fixed-width unsigned 32-bit.
    Fixed32,
    /// Boolean.
    Bool,
    /// UTF-8 text.
    String,
    /// Raw bytes.
    Bytes,
    /// Unsigned 32-bit varint.
    Uint32,
    /// Fixed-width signed 32-bit.
    Sfixed32,
    /// Fixed-width signed 64-bit.
    Sfixed64,
    /// Zigzag signed 32-bit varint.
    Sint32,
    /// Zigzag signed 64-bit varint.
    Sint64,
}

impl ScalarKind {
    /// Returns the protobuf keyword for this scalar.
    #[must_use]
    pub const fn proto_name(&self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Fixed64 => "fixed64",
            Self::Fixed32 => "fixed32",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Uint32 => "uint32",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
        }
    }
}

/// Type reference of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Scalar value.
    Scalar(ScalarKind),
    /// Message, by fully-qualified name.
    Message(String),
    /// Enum, by fully-qualified name.
    Enum(String),
}

impl FieldType {
    /// Returns true if this refers to an enum.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Returns the referenced type name for message and enum references.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Message(name) | Self::Enum(name) => Some(name),
        }
    }
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    /// Singular field (proto3 default).
    #[default]
    Optional,
    /// proto2 required field.
    Required,
    /// Repeated field.
    Repeated,
}

/// Joins a scope and a name with a dot, skipping an empty scope.
#[must_use]
pub fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
