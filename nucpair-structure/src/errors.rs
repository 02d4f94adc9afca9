use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building structures or loading base templates
#[derive(Debug, Error)]
pub enum StructureError {
    /// An `ATOM` / `HETATM` line is shorter than the fixed-column format requires
    #[error("coordinate line too short ({length} characters): {line}")]
    AtomLineTooShort { line: String, length: usize },
    /// A fixed-column field failed to parse
    #[error("can't parse the {field} field from a coordinate line: {line}")]
    AtomFieldParse { field: &'static str, line: String },
    /// I/O failure while reading a template file
    #[error("I/O error while reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    /// A base template file is missing from the template directory
    #[error("base template file not found: {path}")]
    TemplateNotFound { path: PathBuf },
    /// A template file was read but contained no atoms
    #[error("base template file contains no atoms: {path}")]
    TemplateEmpty { path: PathBuf },
}
