pub mod validation;

pub use validation::{quote_identifier, sanitize_for_display, validate_db_path, ValidationError};
