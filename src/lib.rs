//! trail - a small leveled logger and a hashable-value set
//!
//! The logger writes timestamped lines to the console and/or a single log file and
//! manages that file's lifecycle. `KeyedSet` is a minimal set over a hash map.

pub mod config;
pub mod keyed_set;
pub mod logging;

pub use config::LoggerConfig;
pub use keyed_set::KeyedSet;
pub use logging::{CallSite, LogLevel, Logger};
