//! Shared types for logsift
//!
//! This crate contains data structures used across multiple logsift crates.

use crossterm::style::Color;
use std::collections::HashSet;

// ============================================================================
// Log Line Types
// ============================================================================

/// Log priority code as emitted by logcat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    #[default]
    Unknown,
}

impl Priority {
    /// Parse a priority from its one-character logcat code
    pub fn from_code(s: &str) -> Self {
        match s {
            "V" => Self::Verbose,
            "D" => Self::Debug,
            "I" => Self::Info,
            "W" => Self::Warn,
            "E" => Self::Error,
            "F" => Self::Fatal,
            _ => Self::Unknown,
        }
    }

    /// One-character display code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Verbose => "V",
            Self::Debug => "D",
            Self::Info => "I",
            Self::Warn => "W",
            Self::Error => "E",
            Self::Fatal => "F",
            Self::Unknown => "?",
        }
    }

    /// Foreground/background colors for the priority glyph.
    ///
    /// Returns `None` for priorities with no styling of their own.
    pub fn colors(&self) -> Option<PriorityStyle> {
        match self {
            Self::Verbose => Some(PriorityStyle {
                fg: Color::White,
                bg: Color::Black,
                bold: true,
            }),
            Self::Debug => Some(PriorityStyle {
                fg: Color::Black,
                bg: Color::Blue,
                bold: false,
            }),
            Self::Info => Some(PriorityStyle {
                fg: Color::Black,
                bg: Color::Green,
                bold: false,
            }),
            Self::Warn => Some(PriorityStyle {
                fg: Color::Black,
                bg: Color::Yellow,
                bold: false,
            }),
            Self::Error | Self::Fatal => Some(PriorityStyle {
                fg: Color::Black,
                bg: Color::Red,
                bold: false,
            }),
            Self::Unknown => None,
        }
    }
}

/// Styling for a priority glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriorityStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

/// One parsed logcat line.
///
/// Built fresh for every raw line and discarded after rendering. `tag` never
/// keeps the `:` separator that delimits it from the message; `message` is
/// the untouched remainder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogRecord {
    /// Clock time of the line (the leading date token is not carried)
    pub time: String,

    /// Process id the line was emitted by
    pub pid: String,

    /// Thread id the line was emitted by
    pub tid: String,

    /// Log priority
    pub priority: Priority,

    /// Tag identifying the line's logical source
    pub tag: String,

    /// Raw message remainder, not yet trimmed
    pub message: String,
}

// ============================================================================
// Process Listing Types
// ============================================================================

/// One parsed row of a `ps` process listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    pub user_id: String,
    pub pid: String,
    pub parent_pid: String,
    pub package: String,
}

impl ProcessRecord {
    /// Parse a whitespace-delimited `ps` row.
    ///
    /// Fields are positional: user id, pid and parent pid lead the row and
    /// the package (command) name sits in column 8. Rows with fewer than 9
    /// columns are malformed and yield `None`, never a partial record.
    pub fn from_row(row: &str) -> Option<Self> {
        let columns: Vec<&str> = row.split_whitespace().collect();
        if columns.len() < 9 {
            return None;
        }

        Some(Self {
            user_id: columns[0].to_string(),
            pid: columns[1].to_string(),
            parent_pid: columns[2].to_string(),
            package: columns[8].to_string(),
        })
    }
}

// ============================================================================
// Session Configuration
// ============================================================================

/// Default width of the tag column in annotated output
pub const DEFAULT_TAG_WIDTH: usize = 23;

/// Colors handed out to tags, in assignment order
pub const TAG_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Immutable per-run filtering and formatting options.
///
/// A non-empty `include_tags` takes exclusive precedence: `exclude_tags` is
/// ignored entirely while any include tag is set.
#[derive(Clone, Debug)]
pub struct FilterConfig {
    /// Render only records with these tags
    pub include_tags: HashSet<String>,

    /// Drop records with these tags
    pub exclude_tags: HashSet<String>,

    /// Messages only, no tag or priority metadata
    pub raw: bool,

    /// Copy & paste friendly layout
    pub copy_paste: bool,

    /// Width of the tag column
    pub tag_width: usize,
}

impl FilterConfig {
    /// Tag column width in effect; raw mode has no column at all
    pub fn effective_tag_width(&self) -> usize {
        if self.raw { 0 } else { self.tag_width }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_tags: HashSet::new(),
            exclude_tags: HashSet::new(),
            raw: false,
            copy_paste: false,
            tag_width: DEFAULT_TAG_WIDTH,
        }
    }
}

/// Device identity shown in the copy & paste header
#[derive(Clone, Debug, Default)]
pub struct DeviceProps {
    pub manufacturer: String,
    pub sdk: String,
    pub serial: String,
    pub abi: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_code() {
        assert_eq!(Priority::from_code("I"), Priority::Info);
        assert_eq!(Priority::from_code("F"), Priority::Fatal);
        assert_eq!(Priority::from_code(""), Priority::Unknown);
        assert_eq!(Priority::from_code("X"), Priority::Unknown);
    }

    #[test]
    fn test_unknown_priority_has_no_style() {
        assert!(Priority::Unknown.colors().is_none());
        assert!(Priority::Verbose.colors().is_some());
    }

    #[test]
    fn test_process_record_from_row() {
        let row = "u0_a101  1234  567  1052955 90004 SyS_epoll_ 0 S com.example.app";
        let record = ProcessRecord::from_row(row).unwrap();
        assert_eq!(record.user_id, "u0_a101");
        assert_eq!(record.pid, "1234");
        assert_eq!(record.parent_pid, "567");
        assert_eq!(record.package, "com.example.app");
    }

    #[test]
    fn test_process_record_short_row_is_none() {
        assert!(ProcessRecord::from_row("u0_a101 1234 567").is_none());
        assert!(ProcessRecord::from_row("").is_none());
    }

    #[test]
    fn test_effective_tag_width_zero_in_raw_mode() {
        let config = FilterConfig {
            raw: true,
            ..FilterConfig::default()
        };
        assert_eq!(config.effective_tag_width(), 0);
        assert_eq!(FilterConfig::default().effective_tag_width(), DEFAULT_TAG_WIDTH);
    }
}
