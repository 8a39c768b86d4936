//! # protoc-gen-rdsn
//!
//! `protoc` plugin emitting rDSN IDL scripts.
//!
//! `protoc` sends a `CodeGeneratorRequest` on stdin and expects a
//! `CodeGeneratorResponse` on stdout. Every file listed in
//! `file_to_generate` becomes one `<dir>/<base>.pb.php` script, next to
//! where `protoc` found the input.

use anyhow::{Context, Result};
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use rdsn_codegen::{Generator, GeneratorConfig, MemoryContext};
use rdsn_schema::DescriptorIndex;

/// Features advertised to `protoc`.
pub const SUPPORTED_FEATURES: u64 = Feature::Proto3Optional as u64;

/// Handles one plugin request.
///
/// Failures are reported through `CodeGeneratorResponse::error`; no files are
/// returned in that case.
#[must_use]
pub fn run(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    match generate_files(request) {
        Ok(file) => CodeGeneratorResponse {
            file,
            supported_features: Some(SUPPORTED_FEATURES),
            ..Default::default()
        },
        Err(e) => error_response(&e),
    }
}

/// Builds a response carrying only an error message.
#[must_use]
pub fn error_response(error: &anyhow::Error) -> CodeGeneratorResponse {
    tracing::warn!("Generation failed: {:#}", error);
    CodeGeneratorResponse {
        error: Some(format!("{error:#}")),
        supported_features: Some(SUPPORTED_FEATURES),
        ..Default::default()
    }
}

/// Generates one script per requested file.
///
/// # Errors
/// Returns an error if the parameter string is invalid, a requested file is
/// missing from the request, or generation of any file fails.
pub fn generate_files(request: &CodeGeneratorRequest) -> Result<Vec<File>> {
    let config = GeneratorConfig::from_parameter(request.parameter())
        .context("Failed to parse plugin parameter")?;
    let generator = Generator::new(config);
    let index = DescriptorIndex::new(&request.proto_file);
    let mut ctx = MemoryContext::new();

    for name in &request.file_to_generate {
        let file = index
            .load(name)
            .with_context(|| format!("Failed to load {name}"))?;
        generator
            .generate_file(&file, &mut ctx)
            .with_context(|| format!("Failed to generate {name}"))?;
    }

    let mut files = Vec::with_capacity(ctx.len());
    for (name, content) in ctx.into_files() {
        let content =
            String::from_utf8(content).with_context(|| format!("{name} is not UTF-8"))?;
        files.push(File {
            name: Some(name),
            content: Some(content),
            ..Default::default()
        });
    }
    Ok(files)
}
