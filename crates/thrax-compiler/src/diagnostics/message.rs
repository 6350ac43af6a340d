use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When an error's suppression range contains another diagnostic, the
/// higher-priority kind hides the lower one. Unclosed delimiters and strings
/// come first because everything after them is usually noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascading structural errors
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,
    UnterminatedString,

    // Something required is missing
    ExpectedExpression,
    ExpectedName,
    ExpectedNumber,
    ExpectedSemicolon,

    // Something present does not belong
    UnexpectedToken,
    InvalidRepetitionBound,
    InvalidNumericEscape,

    // Accepted, but replaced or dropped while building
    UndefinedReference,
    OutputNotLiteral,
    WeightNotSupported,
    FunctionNotSupported,
    ImportNotSupported,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UndefinedReference
            | Self::OutputNotLiteral
            | Self::WeightNotSupported
            | Self::FunctionNotSupported
            | Self::ImportNotSupported => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Lower discriminant wins.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace
        )
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedExpression
                | Self::ExpectedName
                | Self::ExpectedNumber
                | Self::ExpectedSemicolon
        )
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedBrace => "missing closing `}`",
            Self::UnterminatedString => "unterminated string literal",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedName => "expected a name",
            Self::ExpectedNumber => "expected a number",
            Self::ExpectedSemicolon => "expected `;`",

            Self::UnexpectedToken => "unexpected token",
            Self::InvalidRepetitionBound => "repetition bound must be a non-negative integer",
            Self::InvalidNumericEscape => "invalid numeric escape",

            Self::UndefinedReference => "undefined reference",
            Self::OutputNotLiteral => "output side must be a string literal",
            Self::WeightNotSupported => "weights are not supported",
            Self::FunctionNotSupported => "functions are not supported",
            Self::ImportNotSupported => "imports are not supported",
        }
    }

    /// Template for caller-provided detail; `{}` is replaced by the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace => {
                format!("{}; {{}}", self.fallback_message())
            }
            Self::ExpectedExpression
            | Self::ExpectedName
            | Self::ExpectedNumber
            | Self::ExpectedSemicolon => format!("{} {{}}", self.fallback_message()),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` gives the fallback message, `Some(detail)` fills the template.
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output.
    pub(crate) range: TextRange,
    /// Diagnostics starting inside this range may be hidden as cascades.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            suppression_range: range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
