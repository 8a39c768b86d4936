//! Protobuf descriptor loader.
//!
//! This module converts the `FileDescriptorProto` messages produced by
//! `protoc` (either inside a plugin `CodeGeneratorRequest` or a
//! `FileDescriptorSet`) into the internal schema representation.

use crate::error::ParseError;
use crate::messages::{ExtensionDef, FieldDef, MessageDef, MethodDef, ServiceDef};
use crate::types::{
    EnumDef, EnumValue, FieldType, ImportRef, Label, ScalarKind, SchemaFile, qualify,
};
use prost::Message as _;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label as ProtoLabel, Type as ProtoType};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, ServiceDescriptorProto,
};
use std::collections::HashMap;

/// Decodes a plugin request as sent by `protoc` on stdin.
///
/// # Errors
/// Returns `ParseError::Decode` if the bytes are not a valid request.
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest, ParseError> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Decodes a descriptor set as written by `protoc --descriptor_set_out`.
///
/// # Errors
/// Returns `ParseError::Decode` if the bytes are not a valid descriptor set.
pub fn decode_descriptor_set(bytes: &[u8]) -> Result<FileDescriptorSet, ParseError> {
    Ok(FileDescriptorSet::decode(bytes)?)
}

/// Kind of a named declaration in the descriptor pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Message type.
    Message,
    /// Enum type.
    Enum,
}

/// Index over a set of file descriptors.
///
/// Files are addressed by name and declarations by fully-qualified name
/// (without the leading dot), so that imports and field types can be resolved.
#[derive(Debug)]
pub struct DescriptorIndex<'a> {
    files: HashMap<&'a str, &'a FileDescriptorProto>,
    kinds: HashMap<String, DeclarationKind>,
}

impl<'a> DescriptorIndex<'a> {
    /// Indexes every file and every message/enum they declare.
    #[must_use]
    pub fn new(files: &'a [FileDescriptorProto]) -> Self {
        let mut index = Self {
            files: HashMap::new(),
            kinds: HashMap::new(),
        };

        for file in files {
            index.files.insert(file.name(), file);
            for enum_type in &file.enum_type {
                index
                    .kinds
                    .insert(qualify(file.package(), enum_type.name()), DeclarationKind::Enum);
            }

            let mut pending: Vec<(String, &DescriptorProto)> = file
                .message_type
                .iter()
                .map(|m| (file.package().to_string(), m))
                .collect();
            while let Some((scope, msg)) = pending.pop() {
                let full_name = qualify(&scope, msg.name());
                for enum_type in &msg.enum_type {
                    index
                        .kinds
                        .insert(qualify(&full_name, enum_type.name()), DeclarationKind::Enum);
                }
                for nested in &msg.nested_type {
                    pending.push((full_name.clone(), nested));
                }
                index.kinds.insert(full_name, DeclarationKind::Message);
            }
        }

        index
    }

    /// Loads one file of the index into a [`SchemaFile`].
    ///
    /// # Arguments
    /// * `name` - File name as listed in the descriptor set
    ///
    /// # Errors
    /// Returns `ParseError` if the file or one of its imports is missing, or a
    /// field type cannot be resolved to a scalar, message or enum.
    pub fn load(&self, name: &str) -> Result<SchemaFile, ParseError> {
        let file = self
            .files
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::FileNotFound {
                name: name.to_string(),
            })?;
        tracing::debug!("Loading descriptor for {}", name);

        let mut schema = SchemaFile::new(file.name(), file.package());

        for dependency in &file.dependency {
            let imported =
                self.files
                    .get(dependency.as_str())
                    .ok_or_else(|| ParseError::MissingImport {
                        file: name.to_string(),
                        import: dependency.clone(),
                    })?;
            schema.add_import(ImportRef::new(dependency.as_str(), imported.package()));
        }

        for enum_type in &file.enum_type {
            schema.add_enum(load_enum(enum_type, file.package())?);
        }

        for message in &file.message_type {
            schema.add_message(self.load_message(message, file.package())?);
        }

        for service in &file.service {
            schema.add_service(load_service(service)?);
        }

        for extension in &file.extension {
            let field = self.load_field(extension, file.package())?;
            let extendee = extension.extendee().trim_start_matches('.');
            schema.add_extension(ExtensionDef::new(extendee, field));
        }

        Ok(schema)
    }

    /// Loads a message and everything nested in it.
    fn load_message(&self, msg: &DescriptorProto, scope: &str) -> Result<MessageDef, ParseError> {
        if msg.name().is_empty() {
            return Err(ParseError::missing_attr(format!("message in '{scope}'"), "name"));
        }

        let mut message = MessageDef::new(qualify(scope, msg.name()));
        message.map_entry = msg.options.as_ref().is_some_and(|o| o.map_entry());

        for enum_type in &msg.enum_type {
            let nested = load_enum(enum_type, &message.full_name)?;
            message.add_nested_enum(nested);
        }

        for nested in &msg.nested_type {
            let nested = self.load_message(nested, &message.full_name)?;
            message.add_nested_message(nested);
        }

        for field in &msg.field {
            let field = self.load_field(field, &message.full_name)?;
            message.add_field(field);
        }

        Ok(message)
    }

    /// Loads a field, resolving its type reference.
    fn load_field(
        &self,
        field: &FieldDescriptorProto,
        scope: &str,
    ) -> Result<FieldDef, ParseError> {
        if field.name().is_empty() {
            return Err(ParseError::missing_attr(format!("field in '{scope}'"), "name"));
        }

        let ty = match field.r#type {
            Some(raw) => {
                let proto_type = ProtoType::try_from(raw).map_err(|_| {
                    ParseError::invalid_attr(
                        format!("field '{}'", field.name()),
                        "type",
                        raw.to_string(),
                    )
                })?;
                self.field_type(proto_type, field, scope)?
            }
            None => self.resolve_type_name(field, scope)?,
        };

        let label = match field.label() {
            ProtoLabel::Optional => Label::Optional,
            ProtoLabel::Required => Label::Required,
            ProtoLabel::Repeated => Label::Repeated,
        };

        Ok(FieldDef::new(field.name(), ty).with_label(label))
    }

    /// Maps a declared descriptor type onto a field type.
    fn field_type(
        &self,
        proto_type: ProtoType,
        field: &FieldDescriptorProto,
        scope: &str,
    ) -> Result<FieldType, ParseError> {
        let scalar = match proto_type {
            ProtoType::Double => ScalarKind::Double,
            ProtoType::Float => ScalarKind::Float,
            ProtoType::Int64 => ScalarKind::Int64,
            ProtoType::Uint64 => ScalarKind::Uint64,
            ProtoType::Int32 => ScalarKind::Int32,
            ProtoType::Fixed64 => ScalarKind::Fixed64,
            ProtoType::Fixed32 => ScalarKind::Fixed32,
            ProtoType::Bool => ScalarKind::Bool,
            ProtoType::String => ScalarKind::String,
            ProtoType::Bytes => ScalarKind::Bytes,
            ProtoType::Uint32 => ScalarKind::Uint32,
            ProtoType::Sfixed32 => ScalarKind::Sfixed32,
            ProtoType::Sfixed64 => ScalarKind::Sfixed64,
            ProtoType::Sint32 => ScalarKind::Sint32,
            ProtoType::Sint64 => ScalarKind::Sint64,
            ProtoType::Message | ProtoType::Group | ProtoType::Enum => {
                let resolved = self.resolve_type_name(field, scope)?;
                let expected_enum = proto_type == ProtoType::Enum;
                if resolved.is_enum() != expected_enum {
                    return Err(ParseError::unknown_type(field.type_name(), field.name()));
                }
                return Ok(resolved);
            }
        };
        Ok(FieldType::Scalar(scalar))
    }

    /// Resolves `type_name` against the index.
    ///
    /// Fully-qualified names (leading dot) are looked up directly. Relative
    /// names are searched from the innermost enclosing scope outwards.
    fn resolve_type_name(
        &self,
        field: &FieldDescriptorProto,
        scope: &str,
    ) -> Result<FieldType, ParseError> {
        let type_name = field.type_name();
        if type_name.is_empty() {
            return Err(ParseError::missing_attr(
                format!("field '{}'", field.name()),
                "type_name",
            ));
        }

        let candidates: Vec<String> = match type_name.strip_prefix('.') {
            Some(absolute) => vec![absolute.to_string()],
            None => {
                let mut out = Vec::new();
                let mut current = scope;
                loop {
                    out.push(qualify(current, type_name));
                    match current.rsplit_once('.') {
                        Some((outer, _)) => current = outer,
                        None if !current.is_empty() => current = "",
                        None => break,
                    }
                }
                out
            }
        };

        candidates
            .into_iter()
            .find_map(|candidate| match self.kinds.get(&candidate) {
                Some(DeclarationKind::Message) => Some(FieldType::Message(candidate)),
                Some(DeclarationKind::Enum) => Some(FieldType::Enum(candidate)),
                None => None,
            })
            .ok_or_else(|| ParseError::unknown_type(type_name, field.name()))
    }
}

/// Loads an enum definition.
fn load_enum(enum_type: &EnumDescriptorProto, scope: &str) -> Result<EnumDef, ParseError> {
    if enum_type.name().is_empty() {
        return Err(ParseError::missing_attr(format!("enum in '{scope}'"), "name"));
    }

    let mut enum_def = EnumDef::new(qualify(scope, enum_type.name()));
    for value in &enum_type.value {
        enum_def.add_value(EnumValue::new(value.name(), value.number()));
    }
    Ok(enum_def)
}

/// Loads a service definition.
fn load_service(service: &ServiceDescriptorProto) -> Result<ServiceDef, ParseError> {
    if service.name().is_empty() {
        return Err(ParseError::missing_attr("service", "name"));
    }

    let mut service_def = ServiceDef::new(service.name());
    for method in &service.method {
        if method.input_type().is_empty() {
            return Err(ParseError::missing_attr(
                format!("method '{}'", method.name()),
                "input_type",
            ));
        }
        if method.output_type().is_empty() {
            return Err(ParseError::missing_attr(
                format!("method '{}'", method.name()),
                "output_type",
            ));
        }

        let mut method_def = MethodDef::new(
            method.name(),
            method.input_type().trim_start_matches('.'),
            method.output_type().trim_start_matches('.'),
        );
        method_def.client_streaming = method.client_streaming();
        method_def.server_streaming = method.server_streaming();
        service_def.add_method(method_def);
    }
    Ok(service_def)
}
