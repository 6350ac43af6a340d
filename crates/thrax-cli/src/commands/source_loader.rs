use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the grammar text comes from: inline text wins over a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    path: Option<PathBuf>,
    text: Option<String>,
}

impl SourceInput {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        Self { path, text }
    }

    /// Label for rendered diagnostics.
    pub fn display_name(&self) -> String {
        if self.text.is_some() {
            return "<expr>".to_string();
        }
        match &self.path {
            Some(path) if is_stdin(path) => "<stdin>".to_string(),
            Some(path) => path.display().to_string(),
            None => "<none>".to_string(),
        }
    }

    pub fn load(&self) -> Result<String, String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        match &self.path {
            Some(path) if is_stdin(path) => load_stdin(),
            Some(path) => load_file(path),
            None => Err("grammar is required: use a positional FILE, `-` for stdin, or -e/--expr"
                .to_string()),
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn load_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
