//! Rendering of collected diagnostics.
//!
//! Without a source each diagnostic is one `severity at start..end: message`
//! line. With a source, annotate-snippets draws the offending line, the place
//! an unclosed delimiter was opened, and a preview of the fix.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Fix, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
    summary: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
            summary: false,
        }
    }

    /// Switches to annotated snippets of `source`.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in snippet headers.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Ends the output with an `N errors, M warnings` line.
    pub fn summary(mut self, value: bool) -> Self {
        self.summary = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source {
                Some(source) => self.write_snippet(w, source, diag)?,
                None => write!(w, "{diag}")?,
            }
        }
        if self.summary
            && let Some(line) = summary_line(self.diagnostics)
        {
            w.write_char('\n')?;
            w.write_str(&line)?;
        }
        Ok(())
    }

    fn write_snippet(
        &self,
        w: &mut impl Write,
        source: &str,
        diag: &DiagnosticMessage,
    ) -> fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut report = vec![self.annotated(source, diag)];
        if let Some(fix) = &diag.fix {
            report.push(suggestion(source, diag.range, fix));
        }
        write!(w, "{}", renderer.render(&report))
    }

    fn annotated<'a>(&'a self, source: &'a str, diag: &'a DiagnosticMessage) -> Group<'a> {
        let primary = AnnotationKind::Primary
            .span(visible(diag.range, source))
            .label(&diag.message);
        let mut snippet = Snippet::source(source).line_start(1).annotation(primary);
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(visible(related.range, source))
                    .label(&related.message),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        level.primary_title(&diag.message).element(snippet)
    }
}

/// The source with `fix` applied over `range`.
fn suggestion<'a>(source: &'a str, range: TextRange, fix: &'a Fix) -> Group<'a> {
    let span: Range<usize> = range.start().into()..range.end().into();
    Level::HELP.secondary_title(&fix.description).element(
        Snippet::source(source)
            .line_start(1)
            .patch(Patch::new(span, &fix.replacement)),
    )
}

/// Empty ranges, such as a missing `;`, are widened to one character so the
/// caret shows.
fn visible(range: TextRange, source: &str) -> Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    if start < end {
        start..end
    } else {
        start..(start + 1).min(source.len())
    }
}

fn summary_line(diagnostics: &Diagnostics) -> Option<String> {
    let count = |n: usize, noun: &str| match n {
        1 => format!("1 {noun}"),
        n => format!("{n} {noun}s"),
    };
    match (diagnostics.error_count(), diagnostics.warning_count()) {
        (0, 0) => None,
        (errors, 0) => Some(count(errors, "error")),
        (0, warnings) => Some(count(warnings, "warning")),
        (errors, warnings) => Some(format!(
            "{}, {}",
            count(errors, "error"),
            count(warnings, "warning")
        )),
    }
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
