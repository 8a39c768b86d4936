//! Enum declaration generation.

use crate::error::CodegenError;
use crate::writer::{Arg, ScriptWriter};
use rdsn_schema::EnumDef;
use std::io::Write;

const ENUM_DECL: &str = "$tmp = new t_enum($_PROG, @name@);";
const ENUM_VALUE: &str = "$tmp->add_value(@key@, @val@);";

/// Generator for enum declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumGenerator;

impl EnumGenerator {
    /// Creates a new enum generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits one enum declaration followed by a blank line.
    ///
    /// Values keep their declaration order.
    ///
    /// # Errors
    /// Returns `CodegenError` if writing fails.
    pub fn emit<W: Write>(
        &self,
        enum_def: &EnumDef,
        out: &mut ScriptWriter<W>,
    ) -> Result<(), CodegenError> {
        tracing::debug!("Emitting enum {}", enum_def.full_name);
        out.statement(ENUM_DECL, &[("name", Arg::Str(&enum_def.full_name))])?;
        for value in &enum_def.values {
            out.statement(
                ENUM_VALUE,
                &[
                    ("key", Arg::Str(&value.name)),
                    ("val", Arg::Int(i64::from(value.number))),
                ],
            )?;
        }
        out.blank()
    }
}
