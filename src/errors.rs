use std::fmt;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Network or parse failure while talking to the backend gateway.
    ///
    /// Transport errors, non-2xx statuses and JSON decode failures all
    /// land here; the detail lives in the message.
    Gateway(String),
    /// Operator input rejected before any request was made
    /// (bad phone number, unknown status/source).
    InvalidInput(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Gateway(msg) => write!(f, "Backend gateway error: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Gateway(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for reqwest::Error to add context
impl<T> ResultExt<T> for Result<T, reqwest::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Gateway(e.to_string())),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Gateway(e.to_string())),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_detail() {
        let error = AppError::Gateway("connection refused".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Backend gateway error"));
        assert!(display.contains("connection refused"));

        let error = AppError::InvalidInput("unknown lead status".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Invalid input"));
        assert!(display.contains("unknown lead status"));
    }

    #[test]
    fn context_chain_keeps_the_source() {
        let result: Result<(), AppError> = Err(AppError::Gateway("boom".to_string()));
        let err = result.context("refreshing stats").unwrap_err();

        assert_eq!(
            err.to_string(),
            "refreshing stats: Backend gateway error: boom"
        );
        let source = std::error::Error::source(&err).expect("context keeps its source");
        assert!(source.to_string().contains("boom"));
    }

    #[test]
    fn lazy_context_is_only_built_on_error() {
        let ok: Result<u8, AppError> = Ok(7);
        let value = ok
            .with_context(|| unreachable!("context must not run on success"))
            .unwrap();
        assert_eq!(value, 7);
    }
}
