//! Generator configuration.

use crate::error::CodegenError;

/// Default namespace language bound to the file package.
pub const DEFAULT_NAMESPACE: &str = "cpp";

/// Default name of the request parameter of every service function.
pub const DEFAULT_REQUEST_PARAM: &str = "req";

/// Default suffix appended to the base name of the output file.
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".pb.php";

/// Settings shared by every file a generator emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    namespaces: Vec<String>,
    request_param: String,
    output_suffix: String,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespaces: vec![DEFAULT_NAMESPACE.to_string()],
            request_param: DEFAULT_REQUEST_PARAM.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }

    /// Replaces the namespace languages.
    #[must_use]
    pub fn namespaces<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the request parameter name.
    #[must_use]
    pub fn request_param(mut self, name: impl Into<String>) -> Self {
        self.request_param = name.into();
        self
    }

    /// Sets the output file suffix.
    #[must_use]
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Returns the namespace languages, in emission order.
    #[must_use]
    pub fn namespace_languages(&self) -> &[String] {
        &self.namespaces
    }

    /// Returns the request parameter name.
    #[must_use]
    pub fn request_param_name(&self) -> &str {
        &self.request_param
    }

    /// Returns the output file suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.output_suffix
    }

    /// Parses a `protoc` parameter string.
    ///
    /// The string is a comma-separated list of `key[=value]` pairs. The only
    /// recognised key is `namespace=<lang>`; it may repeat, and the languages
    /// it names replace the default `cpp` binding. An empty string yields the
    /// defaults.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` for unknown keys or empty values.
    pub fn from_parameter(parameter: &str) -> Result<Self, CodegenError> {
        let mut config = Self::new();
        let mut languages: Vec<String> = Vec::new();

        for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (pair, ""),
            };

            match key {
                "namespace" => {
                    if value.is_empty() {
                        return Err(CodegenError::config(pair, "namespace needs a language"));
                    }
                    if !languages.iter().any(|l| l == value) {
                        languages.push(value.to_string());
                    }
                }
                _ => return Err(CodegenError::config(pair, "unknown parameter")),
            }
        }

        if !languages.is_empty() {
            config = config.namespaces(languages);
        }
        Ok(config)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
