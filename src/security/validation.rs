use std::fmt;
use std::path::Path;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyInput,
    NullBytes,
    NotAFile(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyInput => write!(f, "Please select both databases."),
            ValidationError::NullBytes => write!(f, "Path contains null bytes"),
            ValidationError::NotAFile(path) => write!(f, "'{}' is not a file", path),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a user-supplied database path before opening it.
///
/// Only shallow checks happen here; whether the file is actually a SQLite
/// database is decided by the connector when it opens the handle.
pub fn validate_db_path(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if input.contains('\0') {
        return Err(ValidationError::NullBytes);
    }

    if !Path::new(input).is_file() {
        return Err(ValidationError::NotAFile(input.to_string()));
    }

    Ok(())
}

/// Quote a SQL identifier for interpolation into a statement.
///
/// Table names come from the database's own catalog, but they still cannot
/// be bound as parameters, so they are double-quoted with embedded quotes
/// doubled per SQLite's quoting rules.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Strip control characters from a string for safe terminal display.
/// Preserves tabs; newlines cannot appear inside a single rendered cell.
pub fn sanitize_for_display(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .collect()
}
