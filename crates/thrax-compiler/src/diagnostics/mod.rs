//! Span-based diagnostics.
//!
//! The library never prints. Syntax errors, unsupported constructs and
//! sentinel substitutions all end up here and are rendered by the caller.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Fix, RelatedInfo};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Starts a diagnostic with the kind's default message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// Diagnostics with cascading errors removed.
    ///
    /// 1. A diagnostic starting inside another one's suppression range is
    ///    hidden when the outer kind has higher priority.
    /// 2. At the same start position, a missing-token error hides an
    ///    unclosed-delimiter error.
    pub fn filtered(&self) -> Diagnostics {
        let mut suppressed = vec![false; self.messages.len()];

        for (i, a) in self.messages.iter().enumerate() {
            for (j, b) in self.messages.iter().enumerate() {
                if i == j || suppressed[i] || suppressed[j] {
                    continue;
                }

                if span_strictly_contains(a.suppression_range, b.range)
                    && a.kind.suppresses(&b.kind)
                {
                    suppressed[j] = true;
                    continue;
                }

                if a.range.start() == b.range.start() {
                    let root_over_structural =
                        a.kind.is_root_cause_error() && b.kind.is_structural_error();
                    let structural_over_root =
                        a.kind.is_structural_error() && b.kind.is_root_cause_error();
                    if root_over_structural
                        || (!structural_over_root && a.kind.suppresses(&b.kind))
                    {
                        suppressed[j] = true;
                    }
                }
            }
        }

        let messages = self
            .messages
            .iter()
            .zip(suppressed)
            .filter(|(_, hidden)| !hidden)
            .map(|(m, _)| m.clone())
            .collect();
        Diagnostics { messages }
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Custom detail, rendered through the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix::new(replacement, description));
        self
    }

    pub fn suppression_range(mut self, range: TextRange) -> Self {
        self.message.suppression_range = range;
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

fn span_strictly_contains(outer: TextRange, inner: TextRange) -> bool {
    outer.start() < inner.start() && inner.end() <= outer.end()
}
