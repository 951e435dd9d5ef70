use logsift_types::ProcessRecord;

/// Scan a process listing for the pid of `package`.
///
/// Rows that do not parse as process records are skipped, not errors. The
/// first exact package match wins; `None` means the process is not (yet)
/// running and the caller is expected to take a fresh snapshot and retry.
pub fn resolve_pid<'a, I>(package: &str, rows: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    rows.into_iter()
        .filter_map(ProcessRecord::from_row)
        .find(|record| record.package == package)
        .map(|record| record.pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &[&str] = &[
        "USER     PID   PPID  VSIZE  RSS   WCHAN      PC          NAME",
        "u0_a1    1234  567   104855 9000  SyS_epoll_ 00000000 S com.example.app",
        "u0_a2    999   1     104855 9000  SyS_epoll_ 00000000 S other.pkg",
    ];

    #[test]
    fn test_resolve_finds_first_match() {
        let pid = resolve_pid("com.example.app", LISTING.iter().copied());
        assert_eq!(pid.as_deref(), Some("1234"));
    }

    #[test]
    fn test_resolve_requires_exact_package() {
        assert!(resolve_pid("com.example", LISTING.iter().copied()).is_none());
        assert!(resolve_pid("other.pkg2", LISTING.iter().copied()).is_none());
    }

    #[test]
    fn test_resolve_skips_malformed_rows() {
        let rows = ["too few columns", "u0_a1 1234 567 x x x x x com.example.app"];
        let pid = resolve_pid("com.example.app", rows.iter().copied());
        assert_eq!(pid.as_deref(), Some("1234"));
    }

    #[test]
    fn test_resolve_empty_listing() {
        assert!(resolve_pid("com.example.app", std::iter::empty()).is_none());
    }
}
