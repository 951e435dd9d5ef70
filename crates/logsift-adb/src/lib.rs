//! adb bridge for logsift
//!
//! This crate shells out to `adb` for everything the session engine treats
//! as a collaborator: the live logcat feed, `ps` snapshots, `getprop`
//! lookups and the currently focused app.

mod shell;

pub use shell::{AdbError, AdbLogcat, AdbProcessListing, AdbShell, DeviceSelector, ShellLines};
