//! Collector for accumulating diagnostics across scanning stages.

use crate::error::Diagnostic;

/// Accumulates diagnostics in the order they are emitted.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Emit every diagnostic, shifting its spans right by `offset`.
    pub fn extend_offset(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>, offset: usize) {
        for diagnostic in diagnostics {
            self.emit(diagnostic.with_offset(offset));
        }
    }

    /// Finish collection and return every diagnostic.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
