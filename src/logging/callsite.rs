//! Call-site context for verbose log lines
//!
//! The leveled macros capture `file!()`, `line!()` and the enclosing function name
//! into a `CallSite` and hand it to the logger with the argument list.

use std::path::Path;

/// Where a log call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file as reported by `file!()`
    pub file: &'static str,
    /// Line number
    pub line: u32,
    /// Name of the calling function
    pub function: &'static str,
}

impl CallSite {
    pub fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Final path component of the source file
    pub fn file_name(&self) -> &str {
        Path::new(self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(self.file)
    }

    /// Prefix `message` with `[file:line] [function]`
    pub fn format_message(&self, message: &str) -> String {
        format!(
            "[{}:{}] [{}] {}",
            self.file_name(),
            self.line,
            self.function,
            message
        )
    }
}

/// Reduce a marker function's type name to the name of the function enclosing it
///
/// `type_name` of a nested marker looks like `krate::module::caller::marker`, with
/// `::{{closure}}` segments when called inside closures.
#[doc(hidden)]
pub fn function_name(marker_type_name: &'static str) -> &'static str {
    let mut name = marker_type_name;
    if let Some(idx) = name.rfind("::") {
        name = &name[..idx];
    }
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    match name.rfind("::") {
        Some(idx) => &name[idx + 2..],
        None => name,
    }
}

/// Build a [`CallSite`] for the current location
#[macro_export]
macro_rules! callsite {
    () => {{
        fn __trail_marker() {}
        fn __trail_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logging::CallSite::new(
            file!(),
            line!(),
            $crate::logging::function_name(__trail_type_name_of(__trail_marker)),
        )
    }};
}

/// Log at Debug level: `debug!(logger, "a", value, ...)`
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug(&$crate::callsite!(), &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log at Info level: `info!(logger, "a", value, ...)`
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info(&$crate::callsite!(), &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log at Warning level: `warning!(logger, "a", value, ...)`
#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warning(&$crate::callsite!(), &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log at Error level: `error!(logger, "a", value, ...)`
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error(&$crate::callsite!(), &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Debug-build trace to stderr without a logger: `dlog!("a", value, ...)`
///
/// Prints `[file:line] [function] message`. The body is compiled out of the calling
/// crate when `debug_assertions` is off.
#[macro_export]
macro_rules! dlog {
    ($($arg:expr),* $(,)?) => {{
        #[cfg(debug_assertions)]
        {
            let site = $crate::callsite!();
            let message =
                $crate::logging::join_args(&[$(&$arg as &dyn ::std::fmt::Display),*]);
            ::std::eprintln!("{}", site.format_message(&message));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_strips_directories() {
        let site = CallSite::new("src/logging/callsite.rs", 10, "f");
        assert_eq!(site.file_name(), "callsite.rs");

        let site = CallSite::new("main.rs", 1, "main");
        assert_eq!(site.file_name(), "main.rs");
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name("app::net::connect::marker"), "connect");
        assert_eq!(
            function_name("app::net::connect::{{closure}}::marker"),
            "connect"
        );
        assert_eq!(function_name("main::marker"), "main");
    }

    #[test]
    fn test_callsite_macro_captures_location() {
        let site = crate::callsite!();
        assert_eq!(site.file_name(), "callsite.rs");
        assert_eq!(site.function, "test_callsite_macro_captures_location");
        assert!(site.line > 0);
    }

    #[test]
    fn test_format_message() {
        let site = CallSite::new("src/net/client.rs", 88, "connect");
        assert_eq!(
            site.format_message("timed out"),
            "[client.rs:88] [connect] timed out"
        );
        assert_eq!(site.format_message(""), "[client.rs:88] [connect] ");
    }

    #[test]
    fn test_dlog_accepts_argument_lists() {
        let attempts = 3;
        crate::dlog!("connect failed after", attempts, "attempts");
        crate::dlog!("trailing comma",);
        crate::dlog!();
    }

    #[test]
    fn test_callsite_macro_in_closure() {
        let capture = || crate::callsite!();
        assert_eq!(capture().function, "test_callsite_macro_in_closure");
    }
}
