//! Struct declaration generation.

use crate::error::CodegenError;
use crate::script::resolver::type_token;
use crate::writer::{Arg, ScriptWriter};
use rdsn_schema::MessageDef;
use std::io::Write;

const STRUCT_DECL: &str = "$tmp = new t_struct($_PROG, @name@);";
const STRUCT_FIELD: &str = "$tmp->add_field(@name@, @type@);";

/// Generator for struct declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructGenerator;

impl StructGenerator {
    /// Creates a new struct generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits the declaration of a single message followed by a blank line.
    ///
    /// Nested declarations are not emitted here; callers walk
    /// `SchemaIr::emission_order`, which lists them before their enclosing
    /// message and leaves map entries out. A map-entry message passed in
    /// directly produces no output.
    ///
    /// # Errors
    /// Returns `CodegenError` if writing fails.
    pub fn emit<W: Write>(
        &self,
        msg: &MessageDef,
        out: &mut ScriptWriter<W>,
    ) -> Result<(), CodegenError> {
        if msg.map_entry {
            tracing::debug!("Skipping map entry {}", msg.full_name);
            return Ok(());
        }

        tracing::debug!("Emitting struct {}", msg.full_name);
        out.statement(STRUCT_DECL, &[("name", Arg::Str(&msg.full_name))])?;
        for field in &msg.fields {
            out.statement(
                STRUCT_FIELD,
                &[
                    ("name", Arg::Str(&field.name)),
                    ("type", Arg::Str(type_token(&field.ty))),
                ],
            )?;
        }
        out.blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdsn_schema::{FieldType, ScalarKind};

    fn emit(msg: &MessageDef) -> String {
        let mut out = ScriptWriter::in_memory();
        StructGenerator::new().emit(msg, &mut out).expect("emit failed");
        out.into_string().expect("utf-8")
    }

    #[test]
    fn test_generate_struct_fields() {
        let point = MessageDef::new("geo.Point")
            .with_field("x", FieldType::Scalar(ScalarKind::Double))
            .with_field("y", FieldType::Scalar(ScalarKind::Double));

        assert_eq!(
            emit(&point),
            "$tmp = new t_struct($_PROG, \"geo.Point\");\n\
             $tmp->add_field(\"x\", \"double\");\n\
             $tmp->add_field(\"y\", \"double\");\n\
             \n"
        );
    }

    #[test]
    fn test_generate_reference_fields() {
        let order = MessageDef::new("shop.Order")
            .with_field("status", FieldType::Enum("shop.Order.Status".to_string()))
            .with_field("tags", FieldType::Message("shop.Order.TagsEntry".to_string()));
        let output = emit(&order);

        assert!(output.contains("$tmp->add_field(\"status\", \"shop.Order.Status\");\n"));
        // The map entry is still named where a field refers to it.
        assert!(output.contains("$tmp->add_field(\"tags\", \"shop.Order.TagsEntry\");\n"));
    }

    #[test]
    fn test_generate_nested_declarations_left_to_caller() {
        let mut order = MessageDef::new("shop.Order");
        order.add_nested_message(MessageDef::new("shop.Order.Address"));
        assert!(!emit(&order).contains("shop.Order.Address"));
    }

    #[test]
    fn test_generate_map_entry_is_silent() {
        let entry = MessageDef::map_entry(
            "pkg.Entry",
            FieldType::Scalar(ScalarKind::Int64),
            FieldType::Enum("pkg.Color".to_string()),
        );
        assert!(emit(&entry).is_empty());
    }

    #[test]
    fn test_generate_empty_struct() {
        let empty = MessageDef::new("pkg.Empty");
        assert_eq!(emit(&empty), "$tmp = new t_struct($_PROG, \"pkg.Empty\");\n\n");
    }
}
