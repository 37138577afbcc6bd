//! Generic error handling utilities
//!
//! Provides unified fatal-error logging across the error types of the host
//! (plugin discovery, configuration, logging setup).

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` returns
/// `Some(message)` with a helpful, actionable message. When it returns
/// `false`, `user_message()` returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on
    /// directly (a missing plugin directory, a bad config value)
    fn is_user_actionable(&self) -> bool;

    /// The specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<String>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context. Full detail is always available at debug level.
///
/// ```rust,no_run
/// # use plughost::core::error_handling::log_error_with_context;
/// # use plughost::plugin::api::PluginError;
/// let err = PluginError::DirectoryNotFound { path: "plugins".into() };
/// log_error_with_context(&err, "Plugin discovery");
/// // Logs: "FATAL: Plugins directory 'plugins' not found."
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {} failed: {}", operation_context, error),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
