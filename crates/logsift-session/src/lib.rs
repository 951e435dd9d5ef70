//! Log-session engine for logsift
//!
//! This crate parses raw logcat lines, follows the target process across
//! restarts, filters by tag and renders the surviving lines. It talks to the
//! outside world only through collaborator traits ([`LogLineSource`],
//! [`ProcessListingSource`], [`DevicePropertyLookup`], [`OutputSink`]), so
//! the whole pipeline runs against in-memory line sequences in tests.

mod color;
mod filter;
mod parser;
mod render;
mod resolver;
mod session;
mod sources;

pub use color::TagColorizer;
pub use filter::TagFilter;
pub use parser::parse_line;
pub use render::Renderer;
pub use resolver::resolve_pid;
pub use session::{SessionTracker, run_session};
pub use sources::{DevicePropertyLookup, LogLineSource, OutputSink, ProcessListingSource};

// Re-export types used in our public API
pub use logsift_types::{DeviceProps, FilterConfig, LogRecord, Priority, ProcessRecord};
