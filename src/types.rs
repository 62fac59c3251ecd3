//! Core types for schema text conversion.

use crate::error::ConvertError;

/// Opening bracket of every call-like construct in the source rendering.
pub const SOURCE_OPEN: char = '(';

/// Closing bracket of every call-like construct in the source rendering.
pub const SOURCE_CLOSE: char = ')';

/// Opening symbol of the target sequence literal.
pub const TARGET_LIST_OPEN: &str = "[";

/// Closing symbol of the target sequence literal.
pub const TARGET_LIST_CLOSE: &str = "]";

/// Target spelling of the true literal.
pub const TARGET_TRUE: &str = "True";

/// Target spelling of the false literal.
pub const TARGET_FALSE: &str = "False";

/// Suffix turning a bare type reference into a zero-argument call.
pub const TARGET_CALL_SUFFIX: &str = "()";

/// Quote used for target string literals.
pub const TARGET_QUOTE: char = '"';

/// Tokens of the source rendering recognized by the transformer.
///
/// Defaults match the textual form of a Spark `StructType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Constructor of an ordered sequence, rewritten to `[...]`.
    pub container_token: String,
    /// Constructor of a single named field.
    pub field_token: String,
    /// Truthy marker in the last argument position.
    pub true_token: String,
    /// Falsy marker in the last argument position.
    pub false_token: String,
    /// Suffix that identifies a type singleton reference.
    pub type_suffix: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            container_token: "List".to_string(),
            field_token: "StructField".to_string(),
            true_token: "true".to_string(),
            false_token: "false".to_string(),
            type_suffix: "Type".to_string(),
        }
    }
}

impl Grammar {
    /// Set the container constructor token.
    pub fn container_token(mut self, token: impl Into<String>) -> Self {
        self.container_token = token.into();
        self
    }

    /// Set the field constructor token.
    pub fn field_token(mut self, token: impl Into<String>) -> Self {
        self.field_token = token.into();
        self
    }

    /// Set the boolean markers.
    pub fn boolean_tokens(mut self, true_token: impl Into<String>, false_token: impl Into<String>) -> Self {
        self.true_token = true_token.into();
        self.false_token = false_token.into();
        self
    }

    /// Set the type reference suffix.
    pub fn type_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.type_suffix = suffix.into();
        self
    }

    /// Check that every token is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InvalidGrammar` for empty tokens, identical
    /// boolean markers, or tokens containing brackets.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let tokens = [
            ("container token", &self.container_token),
            ("field token", &self.field_token),
            ("true token", &self.true_token),
            ("false token", &self.false_token),
            ("type suffix", &self.type_suffix),
        ];

        for (label, token) in tokens {
            if token.is_empty() {
                return Err(ConvertError::InvalidGrammar {
                    message: format!("{} is empty", label),
                });
            }
            if token.contains([SOURCE_OPEN, SOURCE_CLOSE]) {
                return Err(ConvertError::InvalidGrammar {
                    message: format!("{} \"{}\" contains a bracket", label, token),
                });
            }
        }

        if self.true_token == self.false_token {
            return Err(ConvertError::InvalidGrammar {
                message: format!(
                    "true and false tokens are both \"{}\"",
                    self.true_token
                ),
            });
        }

        Ok(())
    }
}

/// One pass of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// `List(...)` becomes `[...]`.
    Containers,
    /// Trailing `true`/`false` arguments become `True`/`False`.
    Booleans,
    /// Bare `NameType` before a boolean becomes `NameType()`.
    TypeCalls,
    /// The first argument of a field constructor is quoted.
    FieldNames,
}

impl Stage {
    /// Every stage in the order the passes depend on each other.
    pub const ALL: [Stage; 4] = [
        Stage::Containers,
        Stage::Booleans,
        Stage::TypeCalls,
        Stage::FieldNames,
    ];

    /// Stable name used on the command line and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Containers => "containers",
            Stage::Booleans => "booleans",
            Stage::TypeCalls => "types",
            Stage::FieldNames => "fields",
        }
    }

    /// Parse a stage from its name.
    ///
    /// Returns `None` for unknown names (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "containers" => Some(Stage::Containers),
            "booleans" => Some(Stage::Booleans),
            "types" => Some(Stage::TypeCalls),
            "fields" => Some(Stage::FieldNames),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
