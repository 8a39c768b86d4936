//! Message and service definitions.
//!
//! This module contains the data structures representing protobuf messages
//! (with their nested declarations and fields) and services.

use crate::types::{EnumDef, FieldType, Label, ScalarKind};

/// Message definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDef {
    /// Fully-qualified name (no leading dot).
    pub full_name: String,
    /// Nested enums.
    pub enums: Vec<EnumDef>,
    /// Nested messages.
    pub messages: Vec<MessageDef>,
    /// Fields.
    pub fields: Vec<FieldDef>,
    /// Synthetic key/value wrapper generated for a map field.
    pub map_entry: bool,
}

impl MessageDef {
    /// Creates a new message definition.
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            enums: Vec::new(),
            messages: Vec::new(),
            fields: Vec::new(),
            map_entry: false,
        }
    }

    /// Creates a synthetic map-entry message with `key` and `value` fields.
    #[must_use]
    pub fn map_entry(full_name: impl Into<String>, key: FieldType, value: FieldType) -> Self {
        let mut msg = Self::new(full_name);
        msg.map_entry = true;
        msg.add_field(FieldDef::new("key", key));
        msg.add_field(FieldDef::new("value", value));
        msg
    }

    /// Adds a field to the message.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Adds a nested enum.
    pub fn add_nested_enum(&mut self, enum_def: EnumDef) {
        self.enums.push(enum_def);
    }

    /// Adds a nested message.
    pub fn add_nested_message(&mut self, message: MessageDef) {
        self.messages.push(message);
    }

    /// Builder-style variant of [`MessageDef::add_field`].
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.add_field(FieldDef::new(name, ty));
        self
    }
}

/// Field definition within a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: FieldType,
    /// Cardinality.
    pub label: Label,
}

impl FieldDef {
    /// Creates a new singular field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            label: Label::Optional,
        }
    }

    /// Creates a scalar field.
    #[must_use]
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, FieldType::Scalar(kind))
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }
}

/// Service definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDef {
    /// Service name (unqualified).
    pub name: String,
    /// Methods in declaration order.
    pub methods: Vec<MethodDef>,
}

impl ServiceDef {
    /// Creates a new service definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Adds a method to the service.
    pub fn add_method(&mut self, method: MethodDef) {
        self.methods.push(method);
    }

    /// Builder-style variant of [`ServiceDef::add_method`].
    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.add_method(method);
        self
    }
}

/// RPC method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Fully-qualified request message.
    pub input_type: String,
    /// Fully-qualified response message.
    pub output_type: String,
    /// Client streams requests.
    pub client_streaming: bool,
    /// Server streams responses.
    pub server_streaming: bool,
}

impl MethodDef {
    /// Creates a new unary method definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    /// Returns true if either side streams.
    #[must_use]
    pub const fn is_streaming(&self) -> bool {
        self.client_streaming || self.server_streaming
    }
}

/// Extension field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDef {
    /// Fully-qualified name of the extended message.
    pub extendee: String,
    /// The extension field.
    pub field: FieldDef,
}

impl ExtensionDef {
    /// Creates a new extension declaration.
    #[must_use]
    pub fn new(extendee: impl Into<String>, field: FieldDef) -> Self {
        Self {
            extendee: extendee.into(),
            field,
        }
    }
}
