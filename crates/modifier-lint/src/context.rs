use crate::diagnostic::Diagnostic;

/// Mutable linting context shared across rules.
#[derive(Debug, Default)]
pub struct LintContext {
    diagnostics: Vec<Diagnostic>,
}

impl LintContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
