//! Unified error handling.
//!
//! A macro generates the error enum together with stable error codes and
//! human-readable type names.

use std::fmt;

/// Defines the crate-wide error type.
///
/// Generates:
/// - the enum definition
/// - `code()` - stable error code
/// - `error_type()` - error type name
/// - `message()` - error detail
/// - snake_case convenience constructors
macro_rules! define_sims_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SimsError {
            $($variant(String),)*
        }

        impl SimsError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(SimsError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SimsError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(SimsError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SimsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SimsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_sims_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
}

impl SimsError {
    /// Colored output for development builds.
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SimsError {}

impl From<sea_orm::DbErr> for SimsError {
    fn from(err: sea_orm::DbErr) -> Self {
        SimsError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SimsError {
    fn from(err: std::io::Error) -> Self {
        SimsError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SimsError {
    fn from(err: serde_json::Error) -> Self {
        SimsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SimsError {
    fn from(err: chrono::ParseError) -> Self {
        SimsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SimsError::cache_connection("test").code(), "E001");
        assert_eq!(SimsError::database_operation("test").code(), "E005");
        assert_eq!(SimsError::validation("test").code(), "E006");
        assert_eq!(SimsError::authorization("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SimsError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SimsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SimsError::validation("Invalid marks");
        assert_eq!(err.message(), "Invalid marks");
    }

    #[test]
    fn test_format_simple() {
        let err = SimsError::date_parse("bad date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Date Parse Error"));
        assert!(formatted.contains("bad date"));
    }
}
