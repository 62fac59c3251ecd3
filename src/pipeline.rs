//! Conversion pipeline - ordered stages from source rendering to literal.

use std::sync::OnceLock;

use crate::brackets::rewrite_containers;
use crate::error::ConvertError;
use crate::tokens::TokenPatterns;
use crate::types::{Grammar, Stage, SOURCE_OPEN};

/// An ordered list of conversion stages over one grammar.
///
/// Each stage is a pure `&str -> String` function. The default order is
/// `Stage::ALL`; later stages expect the earlier ones to have run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    grammar: Grammar,
    patterns: TokenPatterns,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Build a pipeline running every stage for `grammar`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InvalidGrammar` if the grammar has unusable
    /// tokens, or `ConvertError::InvalidPattern` if a pattern fails to compile.
    pub fn new(grammar: Grammar) -> Result<Self, ConvertError> {
        grammar.validate()?;
        let patterns = TokenPatterns::new(&grammar)?;
        Ok(Self {
            grammar,
            patterns,
            stages: Stage::ALL.to_vec(),
        })
    }

    /// Replace the stages to run, in the given order.
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run a single stage.
    pub fn run_stage(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::Containers => rewrite_containers(text, &self.grammar.container_token),
            Stage::Booleans => self.patterns.rewrite_booleans(text),
            Stage::TypeCalls => self.patterns.rewrite_type_calls(text),
            Stage::FieldNames => self.patterns.quote_field_names(text),
        }
    }

    /// Run every configured stage; each stage consumes the previous output.
    pub fn run(&self, text: &str) -> String {
        let mut current = text.to_string();
        for &stage in &self.stages {
            let next = self.run_stage(stage, &current);
            if next != current {
                log::debug!("stage {} rewrote {} -> {} bytes", stage, current.len(), next.len());
            } else {
                log::debug!("stage {} left text unchanged", stage);
            }
            current = next;
        }
        current
    }
}

fn default_pipeline() -> Option<&'static Pipeline> {
    static PIPELINE: OnceLock<Option<Pipeline>> = OnceLock::new();
    PIPELINE
        .get_or_init(|| Pipeline::new(Grammar::default()).ok())
        .as_ref()
}

/// Convert a schema rendering with the default grammar and every stage.
///
/// Never fails: input the stages do not recognize passes through unchanged.
pub fn convert_schema(text: &str) -> String {
    match default_pipeline() {
        Some(pipeline) => pipeline.run(text),
        None => text.to_string(),
    }
}

/// Put every field constructor on its own line.
pub fn split_fields(text: &str, field_token: &str) -> String {
    let anchor = format!("{}{}", field_token, SOURCE_OPEN);
    text.replace(&anchor, &format!("\n{}", anchor))
}
