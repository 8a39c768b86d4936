//! Per-file rDSN IDL script generator.

use crate::config::GeneratorConfig;
use crate::context::GeneratorContext;
use crate::error::CodegenError;
use crate::script::{EnumGenerator, ServiceGenerator, StructGenerator};
use crate::writer::{Arg, ScriptWriter};
use rdsn_schema::{DeclKind, SchemaFile, SchemaIr, validate_schema};
use std::io::Write;

const PREAMBLE: &str = "<?php";
const PROGRAM_DECL: &str = "$_PROG = new t_program(@name@);";
const NAMESPACE_DECL: &str = "$_PROG->namespaces[@lang@] = @package@;";
const IMPORT_DECL: &str = "$tmp = new t_program(@name@);";
const IMPORT_INCLUDE: &str = "$_PROG->includes[$tmp->name] = $tmp;";
const IMPORT_NAMESPACE: &str = "$tmp->namespaces[@lang@] = @package@;";
const CLOSING: &str = "?>";

/// Extensions stripped from a `.proto` file name to form its base name.
const PROTO_EXTENSIONS: [&str; 2] = [".protodevel", ".proto"];

/// Main code generator.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the output path for a schema file.
    ///
    /// The directory part of the file name is kept, so `a/common.proto` and
    /// `b/common.proto` map to distinct outputs.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the file name has no base name.
    pub fn output_file_name(&self, file: &SchemaFile) -> Result<String, CodegenError> {
        base_name(&file.name)?;
        Ok(format!("{}{}", strip_proto(&file.name), self.config.suffix()))
    }

    /// Generates the script for one file into the sink `ctx` opens for it.
    ///
    /// The file is validated first; nothing is opened for an invalid file.
    /// The sink is released on every path and flushed on success.
    ///
    /// # Returns
    /// The name of the generated file.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation fails, the sink cannot be opened,
    /// or a write fails.
    pub fn generate_file(
        &self,
        file: &SchemaFile,
        ctx: &mut dyn GeneratorContext,
    ) -> Result<String, CodegenError> {
        validate_schema(file)?;
        let output_name = self.output_file_name(file)?;

        let sink = ctx.open(&output_name)?;
        let mut out = ScriptWriter::new(sink);
        self.write_script(file, &mut out)?;
        let statements = out.statements();
        out.finish()?;

        tracing::info!(
            "Generated {} from {} ({} statements)",
            output_name,
            file.name,
            statements
        );
        Ok(output_name)
    }

    /// Generates the script for one file into a string.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation or generation fails.
    pub fn generate_to_string(&self, file: &SchemaFile) -> Result<String, CodegenError> {
        validate_schema(file)?;
        let mut out = ScriptWriter::in_memory();
        self.write_script(file, &mut out)?;
        out.into_string()
    }

    fn write_script<W: Write>(
        &self,
        file: &SchemaFile,
        out: &mut ScriptWriter<W>,
    ) -> Result<(), CodegenError> {
        let base = base_name(&file.name)?;

        out.statement(PREAMBLE, &[])?;
        out.statement(PROGRAM_DECL, &[("name", Arg::Str(base))])?;
        out.blank()?;

        for lang in self.config.namespace_languages() {
            out.statement(
                NAMESPACE_DECL,
                &[("lang", Arg::Str(lang)), ("package", Arg::Str(&file.package))],
            )?;
        }
        out.blank()?;

        self.write_imports(file, out)?;

        let ir = SchemaIr::from_file(file);
        let enums = EnumGenerator::new();
        let structs = StructGenerator::new();
        for id in ir.emission_order() {
            match ir.node(id).kind {
                DeclKind::Enum(enum_def) => enums.emit(enum_def, out)?,
                DeclKind::Message(msg) => structs.emit(msg, out)?,
            }
        }

        let services = ServiceGenerator::new(self.config.request_param_name());
        for service in &file.services {
            services.emit(service, out)?;
        }

        for extension in &file.extensions {
            tracing::debug!(
                "Skipping extension {} of {}",
                extension.field.name,
                extension.extendee
            );
        }

        out.statement(CLOSING, &[])
    }

    /// Writes the import group; the trailing blank line is written only when
    /// the group is non-empty, so an import-free file has no doubled blank.
    fn write_imports<W: Write>(
        &self,
        file: &SchemaFile,
        out: &mut ScriptWriter<W>,
    ) -> Result<(), CodegenError> {
        for import in &file.imports {
            tracing::debug!("Emitting import {}", import.name);
            out.statement(IMPORT_DECL, &[("name", Arg::Str(&import.name))])?;
            out.statement(IMPORT_INCLUDE, &[])?;
            for lang in self.config.namespace_languages() {
                out.statement(
                    IMPORT_NAMESPACE,
                    &[("lang", Arg::Str(lang)), ("package", Arg::Str(&import.package))],
                )?;
            }
        }

        if !file.imports.is_empty() {
            out.blank()?;
        }
        Ok(())
    }
}

/// Returns the file name without its `.proto` or `.protodevel` extension.
fn strip_proto(file_name: &str) -> &str {
    PROTO_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(*ext))
        .unwrap_or(file_name)
}

/// Returns the file name without directories and without its `.proto` or
/// `.protodevel` extension.
///
/// # Errors
/// Returns `CodegenError::Generation` if nothing is left.
pub fn base_name(file_name: &str) -> Result<&str, CodegenError> {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let base = strip_proto(name);

    if base.is_empty() {
        return Err(CodegenError::generation(format!(
            "cannot derive an output name from '{file_name}'"
        )));
    }
    Ok(base)
}
