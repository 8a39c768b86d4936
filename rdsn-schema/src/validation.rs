//! Schema validation utilities.
//!
//! The descriptor tree is produced by an upstream compiler and is expected to
//! be well formed. This module checks the properties the generator relies on
//! so that a broken tree fails loudly instead of producing a broken script.

use crate::error::SchemaError;
use crate::messages::{MessageDef, ServiceDef};
use crate::types::{EnumDef, SchemaFile};
use std::collections::HashSet;

/// Validates a schema file for correctness.
///
/// # Arguments
/// * `file` - The schema file to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(file: &SchemaFile) -> Result<(), SchemaError> {
    if file.name.is_empty() {
        return Err(SchemaError::empty_name("file", file.package.as_str()));
    }

    let mut declared = HashSet::new();

    for enum_def in &file.enums {
        validate_enum(enum_def, &file.name)?;
        if !declared.insert(enum_def.full_name.as_str()) {
            return Err(SchemaError::duplicate("enum", &enum_def.full_name, &file.name));
        }
    }

    let mut pending: Vec<&MessageDef> = file.messages.iter().rev().collect();
    while let Some(msg) = pending.pop() {
        validate_message(msg, &file.name)?;
        if !declared.insert(msg.full_name.as_str()) {
            return Err(SchemaError::duplicate("message", &msg.full_name, &file.name));
        }
        for enum_def in &msg.enums {
            validate_enum(enum_def, &msg.full_name)?;
            if !declared.insert(enum_def.full_name.as_str()) {
                return Err(SchemaError::duplicate("enum", &enum_def.full_name, &msg.full_name));
            }
        }
        pending.extend(msg.messages.iter().rev());
    }

    validate_services(file)?;
    Ok(())
}

/// Validates an enum definition.
fn validate_enum(enum_def: &EnumDef, scope: &str) -> Result<(), SchemaError> {
    if enum_def.full_name.is_empty() {
        return Err(SchemaError::empty_name("enum", scope));
    }

    // Numbers may repeat (allow_alias), names may not.
    let mut seen_names = HashSet::new();
    for value in &enum_def.values {
        if value.name.is_empty() {
            return Err(SchemaError::empty_name("enum value", &enum_def.full_name));
        }
        if !seen_names.insert(&value.name) {
            return Err(SchemaError::duplicate(
                "enum value",
                &value.name,
                &enum_def.full_name,
            ));
        }
    }

    Ok(())
}

/// Validates the fields of a message.
fn validate_message(msg: &MessageDef, scope: &str) -> Result<(), SchemaError> {
    if msg.full_name.is_empty() {
        return Err(SchemaError::empty_name("message", scope));
    }

    let mut seen_names = HashSet::new();
    for field in &msg.fields {
        if field.name.is_empty() {
            return Err(SchemaError::empty_name("field", &msg.full_name));
        }
        if field.ty.type_name().is_some_and(str::is_empty) {
            return Err(SchemaError::empty_name("field type", &msg.full_name));
        }
        if !seen_names.insert(&field.name) {
            return Err(SchemaError::duplicate("field", &field.name, &msg.full_name));
        }
    }

    Ok(())
}

/// Validates all services of the file.
fn validate_services(file: &SchemaFile) -> Result<(), SchemaError> {
    let mut seen_services = HashSet::new();
    for service in &file.services {
        if service.name.is_empty() {
            return Err(SchemaError::empty_name("service", &file.name));
        }
        if !seen_services.insert(&service.name) {
            return Err(SchemaError::duplicate("service", &service.name, &file.name));
        }
        validate_methods(service)?;
    }
    Ok(())
}

/// Validates the methods of a service.
fn validate_methods(service: &ServiceDef) -> Result<(), SchemaError> {
    let mut seen_methods = HashSet::new();
    for method in &service.methods {
        if method.name.is_empty() {
            return Err(SchemaError::empty_name("method", &service.name));
        }
        if method.input_type.is_empty() || method.output_type.is_empty() {
            return Err(SchemaError::empty_name("method type", &method.name));
        }
        if !seen_methods.insert(&method.name) {
            return Err(SchemaError::duplicate("method", &method.name, &service.name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{FieldDef, MethodDef};
    use crate::types::{FieldType, ScalarKind};

    fn valid_file() -> SchemaFile {
        let mut order = MessageDef::new("shop.Order")
            .with_field("id", FieldType::Scalar(ScalarKind::Int64))
            .with_field("status", FieldType::Enum("shop.Order.Status".to_string()));
        order.add_nested_enum(
            EnumDef::new("shop.Order.Status")
                .with_value("NEW", 0)
                .with_value("FRESH", 0),
        );

        let mut file = SchemaFile::new("shop.proto", "shop");
        file.add_message(order);
        file.add_service(
            ServiceDef::new("Shop")
                .with_method(MethodDef::new("Get", "shop.Order", "shop.Order")),
        );
        file
    }

    #[test]
    fn test_validate_valid_schema() {
        assert!(validate_schema(&valid_file()).is_ok());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let mut file = valid_file();
        file.messages[0].add_field(FieldDef::scalar("id", ScalarKind::String));
        let result = validate_schema(&file);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateDefinition { ref kind, .. }) if kind == "field"
        ));
    }

    #[test]
    fn test_validate_duplicate_enum_value_name() {
        let mut file = valid_file();
        file.add_enum(EnumDef::new("shop.Color").with_value("RED", 0).with_value("RED", 1));
        assert!(validate_schema(&file).is_err());
    }

    #[test]
    fn test_validate_duplicate_nested_message() {
        let mut file = valid_file();
        file.messages[0].add_nested_message(MessageDef::new("shop.Order.Item"));
        file.messages[0].add_nested_message(MessageDef::new("shop.Order.Item"));
        let err = validate_schema(&file).unwrap_err();
        assert!(err.to_string().contains("shop.Order.Item"));
    }

    #[test]
    fn test_validate_duplicate_method() {
        let mut file = valid_file();
        file.services[0].add_method(MethodDef::new("Get", "shop.Order", "shop.Order"));
        assert!(validate_schema(&file).is_err());
    }

    #[test]
    fn test_validate_empty_field_name() {
        let mut file = valid_file();
        file.messages[0].add_field(FieldDef::scalar("", ScalarKind::Bool));
        assert!(matches!(
            validate_schema(&file),
            Err(SchemaError::EmptyName { .. })
        ));
    }
}
