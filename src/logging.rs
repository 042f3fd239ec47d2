/// Conditional logging module for development builds
///
/// The `log!` macro provides informational console logging that is compiled out
/// in production (release) builds by default. Errors should continue using
/// `leptos::logging::error!`. `log_warn!` is compiled into every build.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// # Examples
///
/// ```rust,ignore
/// use station_map::logging::log;
///
/// log!("Indexed {} stations", count);
/// ```
/// Conditionally log to console in development builds
///
/// Expands to `web_sys::console::log_1()` in debug builds or when the
/// `console_logging` feature is enabled, and to nothing otherwise. Off the
/// wasm target the message goes to stderr so native tests and benches don't
/// call into a missing JS runtime.
#[macro_export]
macro_rules! log {
    ($($arg:tt)+) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            $crate::logging::emit_log(&format!($($arg)+));
        }
    };
}

/// Log a warning to the console in every build
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::logging::emit_warn(&format!($($arg)+));
    };
}

pub use log;
pub use log_warn;

#[doc(hidden)]
pub fn emit_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

#[doc(hidden)]
pub fn emit_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {message}");
}
