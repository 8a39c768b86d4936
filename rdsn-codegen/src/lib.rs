//! # rdsn-codegen
//!
//! rDSN IDL script generation from protobuf schemas.
//!
//! This crate provides:
//! - Enum, struct and service declaration emitters
//! - A per-file driver writing `<dir>/<base>.pb.php` scripts
//! - Directory and in-memory output sinks
//! - `protoc` parameter parsing into a generator configuration

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod script;
pub mod writer;

pub use config::GeneratorConfig;
pub use context::{DirectoryContext, GeneratorContext, MemoryContext};
pub use error::CodegenError;
pub use generator::{Generator, base_name};
pub use writer::{Arg, ScriptWriter};

use rdsn_schema::{DescriptorIndex, decode_descriptor_set};

/// Generates the script for one file of an encoded `FileDescriptorSet`.
///
/// # Arguments
/// * `bytes` - Encoded descriptor set, as written by `protoc --descriptor_set_out`
/// * `file_name` - Name of the file to generate, as recorded in the set
/// * `config` - Generator settings
///
/// # Returns
/// The output file name and the generated script.
///
/// # Errors
/// Returns `CodegenError` if decoding, loading, or generation fails.
pub fn generate_from_descriptor_set(
    bytes: &[u8],
    file_name: &str,
    config: GeneratorConfig,
) -> Result<(String, String), CodegenError> {
    let set = decode_descriptor_set(bytes)?;
    let index = DescriptorIndex::new(&set.file);
    let file = index.load(file_name)?;

    let generator = Generator::new(config);
    let output_name = generator.output_file_name(&file)?;
    Ok((output_name, generator.generate_to_string(&file)?))
}

/// Generates a script from a descriptor set file on disk into `ctx`.
///
/// # Errors
/// Returns `CodegenError` if reading, loading, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    file_name: &str,
    config: GeneratorConfig,
    ctx: &mut dyn GeneratorContext,
) -> Result<String, CodegenError> {
    let bytes = std::fs::read(path)?;
    let set = decode_descriptor_set(&bytes)?;
    let index = DescriptorIndex::new(&set.file);
    let file = index.load(file_name)?;
    Generator::new(config).generate_file(&file, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;
    use prost_types::{
        DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FileDescriptorProto,
        FileDescriptorSet,
    };

    fn encoded_set() -> Vec<u8> {
        let file = FileDescriptorProto {
            name: Some("proto/ping.proto".to_string()),
            package: Some("net".to_string()),
            message_type: vec![DescriptorProto {
                name: Some("Ping".to_string()),
                ..Default::default()
            }],
            enum_type: vec![EnumDescriptorProto {
                name: Some("Mode".to_string()),
                value: vec![EnumValueDescriptorProto {
                    name: Some("FAST".to_string()),
                    number: Some(7),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        FileDescriptorSet { file: vec![file] }.encode_to_vec()
    }

    #[test]
    fn test_generate_from_descriptor_set() {
        let config = GeneratorConfig::new();
        let (name, script) =
            generate_from_descriptor_set(&encoded_set(), "proto/ping.proto", config).unwrap();

        assert_eq!(name, "proto/ping.pb.php");
        assert!(script.contains("$_PROG = new t_program(\"ping\");\n"));
        assert!(script.contains("$tmp->add_value(\"FAST\", 7);\n"));
        assert!(script.contains("$tmp = new t_struct($_PROG, \"net.Ping\");\n"));
    }

    #[test]
    fn test_generate_from_descriptor_set_unknown_file() {
        let config = GeneratorConfig::new();
        let err =
            generate_from_descriptor_set(&encoded_set(), "missing.proto", config).unwrap_err();
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_generate_from_descriptor_set_garbage() {
        let config = GeneratorConfig::new();
        assert!(generate_from_descriptor_set(&[0xff, 0xff], "x.proto", config).is_err());
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let set_path = dir.path().join("ping.pb");
        std::fs::write(&set_path, encoded_set()).unwrap();

        let mut ctx = MemoryContext::new();
        let name =
            generate_from_file(&set_path, "proto/ping.proto", GeneratorConfig::new(), &mut ctx)
                .unwrap();
        assert_eq!(name, "proto/ping.pb.php");
        assert!(ctx.get_str(&name).unwrap().ends_with("?>\n"));
    }
}
