//! # rdsn-schema
//!
//! Typed protobuf schema model for the rDSN IDL generator.
//!
//! This crate provides:
//! - Type definitions for files, messages, enums, fields and services
//! - Loading of `protoc` file descriptors into that model
//! - Schema validation
//! - An arena representation that yields declaration emission order

pub mod descriptor;
pub mod error;
pub mod ir;
pub mod messages;
pub mod types;
pub mod validation;

pub use descriptor::{DescriptorIndex, decode_descriptor_set, decode_request};
pub use error::{ParseError, SchemaError};
pub use ir::{DeclId, DeclKind, SchemaIr};
pub use messages::{ExtensionDef, FieldDef, MessageDef, MethodDef, ServiceDef};
pub use types::{EnumDef, EnumValue, FieldType, ImportRef, Label, ScalarKind, SchemaFile};
pub use validation::validate_schema;
