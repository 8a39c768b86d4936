//! Service declaration generation.

use crate::error::CodegenError;
use crate::script::resolver::{request_token, response_token};
use crate::writer::{Arg, ScriptWriter};
use rdsn_schema::ServiceDef;
use std::io::Write;

const SERVICE_DECL: &str = "$tmp = new t_service($_PROG, @name@);";
const SERVICE_FUNCTION: &str = "$tmp2 = $tmp->add_function(@return_type@, @name@);";
const FUNCTION_PARAM: &str = "$tmp2->add_param(@name@, @type@);";

/// Generator for service declarations.
#[derive(Debug, Clone)]
pub struct ServiceGenerator<'a> {
    request_param: &'a str,
}

impl<'a> ServiceGenerator<'a> {
    /// Creates a new service generator.
    ///
    /// # Arguments
    /// * `request_param` - Name given to the single request parameter
    #[must_use]
    pub const fn new(request_param: &'a str) -> Self {
        Self { request_param }
    }

    /// Emits one service declaration followed by a blank line.
    ///
    /// Each method becomes a function returning the response message with a
    /// single parameter of the request message type.
    ///
    /// # Errors
    /// Returns `CodegenError` if writing fails.
    pub fn emit<W: Write>(
        &self,
        service: &ServiceDef,
        out: &mut ScriptWriter<W>,
    ) -> Result<(), CodegenError> {
        tracing::debug!("Emitting service {}", service.name);
        out.statement(SERVICE_DECL, &[("name", Arg::Str(&service.name))])?;

        for method in &service.methods {
            if method.is_streaming() {
                tracing::debug!(
                    "Method {}.{} streams; emitting request/response shape only",
                    service.name,
                    method.name
                );
            }
            out.statement(
                SERVICE_FUNCTION,
                &[
                    ("return_type", Arg::Str(response_token(method))),
                    ("name", Arg::Str(&method.name)),
                ],
            )?;
            out.statement(
                FUNCTION_PARAM,
                &[
                    ("name", Arg::Str(self.request_param)),
                    ("type", Arg::Str(request_token(method))),
                ],
            )?;
        }

        out.blank()
    }
}
