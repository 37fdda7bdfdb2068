//! Process details written at the top of a fresh log file

use std::fmt;

const UNKNOWN: &str = "unknown";

/// Identity of the running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDetails {
    pub name: String,
    pub version: String,
    pub build: String,
    pub pid: u32,
}

impl AppDetails {
    /// Details of the current process
    ///
    /// The name comes from the executable's file stem. Version and build are unknown
    /// at this level; use `app_details!()` to fill them from the calling crate.
    pub fn from_process() -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            name,
            version: UNKNOWN.to_string(),
            build: UNKNOWN.to_string(),
            pid: std::process::id(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }
}

impl Default for AppDetails {
    fn default() -> Self {
        Self::from_process()
    }
}

impl fmt::Display for AppDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Appname: {}] [Version: {}] [Build: {}] [PID: {}]",
            self.name, self.version, self.build, self.pid
        )
    }
}

/// Build [`AppDetails`] with the calling crate's version and `BUILD_NUMBER`
#[macro_export]
macro_rules! app_details {
    () => {
        $crate::logging::AppDetails::from_process()
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_build(option_env!("BUILD_NUMBER").unwrap_or("dev"))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let details = AppDetails {
            name: "demo".to_string(),
            version: "1.2.0".to_string(),
            build: "42".to_string(),
            pid: 7,
        };
        assert_eq!(
            details.to_string(),
            "[Appname: demo] [Version: 1.2.0] [Build: 42] [PID: 7]"
        );
    }

    #[test]
    fn test_from_process_uses_current_pid() {
        let details = AppDetails::from_process();
        assert_eq!(details.pid, std::process::id());
        assert!(!details.name.is_empty());
    }

    #[test]
    fn test_app_details_macro_fills_version() {
        let details = crate::app_details!();
        assert_eq!(details.version, env!("CARGO_PKG_VERSION"));
        assert!(!details.build.is_empty());
    }
}
