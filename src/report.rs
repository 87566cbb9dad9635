use crate::error::Diagnostics;
use crate::printer::AstPrinter;
use crate::token::Token;
use crate::value::Value;
use crate::Run;
use serde::Serialize;

/// Machine-readable summary of a run, printed by `--json`.
///
/// Follows the same rule as the plain output: when syntax errors exist, no
/// tokens, tree or value are included.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub tokens: Option<&'a [Token]>,
    pub ast: Option<String>,
    pub value: Option<&'a Value>,
    pub syntax_errors: Vec<String>,
    pub runtime_errors: Vec<String>,
}

impl<'a> Report<'a> {
    /// Builds the report and drains both error sequences of `diagnostics`.
    pub fn from_run(run: &'a Run, diagnostics: &mut Diagnostics) -> Self {
        let syntax_errors: Vec<String> = diagnostics
            .drain_syntax()
            .iter()
            .map(|err| err.to_string())
            .collect();
        let runtime_errors: Vec<String> = diagnostics
            .drain_runtime()
            .iter()
            .map(|err| err.to_string())
            .collect();

        if !syntax_errors.is_empty() {
            return Self {
                tokens: None,
                ast: None,
                value: None,
                syntax_errors,
                runtime_errors,
            };
        }

        Self {
            tokens: Some(&run.tokens),
            ast: run.expr.as_ref().map(|expr| AstPrinter.print(expr)),
            value: run.value.as_ref(),
            syntax_errors,
            runtime_errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.syntax_errors.is_empty() && self.runtime_errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
