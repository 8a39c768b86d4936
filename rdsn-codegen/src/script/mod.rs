//! rDSN IDL script generation modules.

pub mod enums;
pub mod resolver;
pub mod services;
pub mod structs;

pub use enums::EnumGenerator;
pub use resolver::type_token;
pub use services::ServiceGenerator;
pub use structs::StructGenerator;
