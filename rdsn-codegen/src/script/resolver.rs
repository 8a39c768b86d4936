//! Type token resolution.

use rdsn_schema::{FieldType, MethodDef};

/// Returns the type token emitted for a field type.
///
/// Messages and enums resolve to their fully-qualified names, scalars to
/// their protobuf keyword.
#[must_use]
pub fn type_token(ty: &FieldType) -> &str {
    match ty {
        FieldType::Scalar(kind) => kind.proto_name(),
        FieldType::Message(full_name) => full_name,
        FieldType::Enum(full_name) => full_name,
    }
}

/// Returns the type token of a method's request message.
#[must_use]
pub fn request_token(method: &MethodDef) -> &str {
    &method.input_type
}

/// Returns the type token of a method's response message.
#[must_use]
pub fn response_token(method: &MethodDef) -> &str {
    &method.output_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdsn_schema::ScalarKind;

    #[test]
    fn test_scalar_tokens() {
        assert_eq!(type_token(&FieldType::Scalar(ScalarKind::Int32)), "int32");
        assert_eq!(type_token(&FieldType::Scalar(ScalarKind::Sfixed64)), "sfixed64");
        assert_eq!(type_token(&FieldType::Scalar(ScalarKind::Bytes)), "bytes");
        assert_eq!(type_token(&FieldType::Scalar(ScalarKind::Bool)), "bool");
    }

    #[test]
    fn test_named_tokens_are_fully_qualified() {
        let msg = FieldType::Message("shop.Order.Address".to_string());
        let en = FieldType::Enum("shop.Order.Status".to_string());
        assert_eq!(type_token(&msg), "shop.Order.Address");
        assert_eq!(type_token(&en), "shop.Order.Status");
    }

    #[test]
    fn test_method_tokens() {
        let method = MethodDef::new("Get", "pkg.GetRequest", "pkg.GetResponse");
        assert_eq!(request_token(&method), "pkg.GetRequest");
        assert_eq!(response_token(&method), "pkg.GetResponse");
    }
}
