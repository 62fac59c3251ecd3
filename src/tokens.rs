//! Token passes - boolean literals, type calls and field-name quoting.
//!
//! Each pass is one global substitution with a fixed pattern. Only the
//! `core` group is rewritten; the context around it must match but is not
//! consumed, so the trailing context of one match may lead into the next.

use regex::{Captures, Regex};

use crate::error::ConvertError;
use crate::types::{Grammar, TARGET_CALL_SUFFIX, TARGET_FALSE, TARGET_QUOTE, TARGET_TRUE};

/// Compiled patterns for the three token passes of one grammar.
#[derive(Debug, Clone)]
pub struct TokenPatterns {
    true_token: String,
    booleans: Regex,
    type_calls: Regex,
    field_names: Regex,
}

impl TokenPatterns {
    /// Compile the token patterns for `grammar`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InvalidPattern` if a pattern fails to compile.
    pub fn new(grammar: &Grammar) -> Result<Self, ConvertError> {
        // `,true)` / `, false]`: last positional argument only
        let booleans = compile(
            "booleans",
            &format!(
                r",\s*(?P<core>{}|{})[)\]]",
                regex::escape(&grammar.true_token),
                regex::escape(&grammar.false_token)
            ),
        )?;

        // `(IntegerType,True` / `[StringType, False`
        let type_calls = compile(
            "types",
            &format!(
                r"[,(\[]\s*(?P<core>[a-zA-Z]+{})\s*,\s*(?:{}|{})",
                regex::escape(&grammar.type_suffix),
                TARGET_TRUE,
                TARGET_FALSE
            ),
        )?;

        let field_names = compile(
            "fields",
            &format!(r"{}\(\s*(?P<core>\w+)\s*,", regex::escape(&grammar.field_token)),
        )?;

        Ok(Self {
            true_token: grammar.true_token.clone(),
            booleans,
            type_calls,
            field_names,
        })
    }

    /// Rewrite trailing boolean markers to the target literals.
    pub fn rewrite_booleans(&self, text: &str) -> String {
        replace_core(&self.booleans, text, |core| {
            if core == self.true_token {
                TARGET_TRUE.to_string()
            } else {
                TARGET_FALSE.to_string()
            }
        })
    }

    /// Turn bare type references in front of a boolean into zero-argument calls.
    pub fn rewrite_type_calls(&self, text: &str) -> String {
        replace_core(&self.type_calls, text, |core| {
            format!("{}{}", core, TARGET_CALL_SUFFIX)
        })
    }

    /// Quote the name argument of every field constructor.
    pub fn quote_field_names(&self, text: &str) -> String {
        replace_core(&self.field_names, text, |core| {
            format!("{}{}{}", TARGET_QUOTE, core, TARGET_QUOTE)
        })
    }
}

fn compile(stage: &'static str, pattern: &str) -> Result<Regex, ConvertError> {
    Regex::new(pattern).map_err(|source| ConvertError::InvalidPattern { stage, source })
}

/// Replace the `core` group of every match of `re`, leaving context untouched.
///
/// The next search starts where the previous core ended, not where the
/// whole match ended.
fn replace_core(re: &Regex, text: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos <= text.len() {
        let Some(core) = re
            .captures_at(text, pos)
            .and_then(|caps: Captures<'_>| caps.name("core"))
        else {
            break;
        };

        out.push_str(&text[copied..core.start()]);
        out.push_str(&rewrite(core.as_str()));
        copied = core.end();
        pos = core.end();
    }

    out.push_str(&text[copied..]);
    out
}
