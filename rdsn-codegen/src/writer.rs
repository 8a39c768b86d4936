//! Statement writer for rDSN IDL scripts.
//!
//! Statements are rendered from templates with `@key@` placeholders. String
//! arguments are always inserted as quoted PHP literals so that identifiers
//! can never be read as code; integer arguments are inserted bare. `@@`
//! renders a literal `@`.

use crate::error::CodegenError;
use std::io::Write;

/// Template argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Inserted as a double-quoted, escaped string literal.
    Str(&'a str),
    /// Inserted as a bare integer literal.
    Int(i64),
}

impl Arg<'_> {
    fn render_into(&self, out: &mut String) {
        match self {
            Self::Str(s) => push_string_literal(out, s),
            Self::Int(n) => out.push_str(&n.to_string()),
        }
    }
}

/// Renders a template, substituting every `@key@` placeholder.
///
/// # Errors
/// Returns `CodegenError::Template` if a placeholder is unterminated or has
/// no matching argument.
pub fn render(template: &str, args: &[(&str, Arg<'_>)]) -> Result<String, CodegenError> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(start) = rest.find('@') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('@')
            .ok_or_else(|| CodegenError::template(template, "unterminated placeholder"))?;
        let key = &after[..end];

        if key.is_empty() {
            out.push('@');
        } else {
            let (_, arg) = args.iter().find(|(name, _)| *name == key).ok_or_else(|| {
                CodegenError::template(template, format!("no value bound to '{key}'"))
            })?;
            arg.render_into(&mut out);
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn push_string_literal(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Line-oriented writer threaded through every emitter.
///
/// Every statement is terminated by a single `\n`.
pub struct ScriptWriter<W: Write> {
    out: W,
    statements: usize,
}

impl<W: Write> ScriptWriter<W> {
    /// Wraps an output sink.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out, statements: 0 }
    }

    /// Renders a template and writes it as one statement.
    ///
    /// # Errors
    /// Returns `CodegenError` if the template is malformed or the sink fails.
    pub fn statement(
        &mut self,
        template: &str,
        args: &[(&str, Arg<'_>)],
    ) -> Result<(), CodegenError> {
        let mut line = render(template, args)?;
        line.push('\n');
        self.out.write_all(line.as_bytes())?;
        self.statements += 1;
        Ok(())
    }

    /// Writes a blank separator line.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the sink fails.
    pub fn blank(&mut self) -> Result<(), CodegenError> {
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Returns the number of statements written so far.
    #[must_use]
    pub const fn statements(&self) -> usize {
        self.statements
    }

    /// Flushes the sink and returns it.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if flushing fails.
    pub fn finish(mut self) -> Result<W, CodegenError> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl ScriptWriter<Vec<u8>> {
    /// Creates a writer over an in-memory buffer.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    /// Finishes the writer and returns the script text.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the buffer is not valid UTF-8.
    pub fn into_string(self) -> Result<String, CodegenError> {
        let bytes = self.finish()?;
        String::from_utf8(bytes)
            .map_err(|e| CodegenError::generation(format!("script is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_render_quotes_strings_and_keeps_integers_bare() {
        let out = render(
            "$tmp->add_value(@key@, @val@);",
            &[("key", Arg::Str("RED")), ("val", Arg::Int(-3))],
        )
        .expect("render failed");
        assert_eq!(out, "$tmp->add_value(\"RED\", -3);");
    }

    #[test]
    fn test_render_escapes_string_literals() {
        let out = render("@v@", &[("v", Arg::Str("a\"b$c\\d"))]).expect("render failed");
        assert_eq!(out, r#""a\"b\$c\\d""#);

        let out = render("@v@", &[("v", Arg::Str("x\ny\t"))]).expect("render failed");
        assert_eq!(out, "\"x\\ny\\t\"");
    }

    #[test]
    fn test_render_literal_at() {
        let out = render("mail@@host", &[]).expect("render failed");
        assert_eq!(out, "mail@host");
    }

    #[test]
    fn test_render_unbound_placeholder() {
        let err = render("new t_enum(@name@);", &[("other", Arg::Int(1))]).unwrap_err();
        assert!(matches!(err, CodegenError::Template { .. }));
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_render_unterminated_placeholder() {
        assert!(render("oops @name", &[("name", Arg::Str("x"))]).is_err());
    }

    #[test]
    fn test_writer_terminates_statements() {
        let mut writer = ScriptWriter::in_memory();
        writer.statement("<?php", &[]).unwrap();
        writer.blank().unwrap();
        writer.statement("?>", &[]).unwrap();

        assert_eq!(writer.statements(), 2);
        assert_eq!(writer.into_string().unwrap(), "<?php\n\n?>\n");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_into_string_rejects_invalid_utf8() {
        let mut writer = ScriptWriter::in_memory();
        writer.statement("<?php", &[]).unwrap();
        writer.out.extend_from_slice(&[0xc3, 0x28]);

        let err = writer.into_string().unwrap_err();
        assert!(matches!(err, CodegenError::Generation { .. }));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_writer_propagates_io_errors() {
        let mut writer = ScriptWriter::new(FailingSink);
        let err = writer.statement("<?php", &[]).unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
        assert_eq!(writer.statements(), 0);
    }
}
