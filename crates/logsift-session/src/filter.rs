use std::collections::HashSet;

use logsift_types::FilterConfig;

/// Tag include/exclude filter.
///
/// Comparison is exact and case-sensitive, against the display tag (after
/// colon stripping and truncation), so filters match what is on screen.
#[derive(Clone, Debug)]
pub struct TagFilter {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl TagFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            include: config.include_tags.clone(),
            exclude: config.exclude_tags.clone(),
        }
    }

    /// Whether a record with this tag should be rendered.
    ///
    /// A non-empty include set takes exclusive precedence; the exclude set
    /// only applies when no include tags are configured.
    pub fn should_render(&self, tag: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.contains(tag);
        }

        !self.exclude.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(include: &[&str], exclude: &[&str]) -> FilterConfig {
        FilterConfig {
            include_tags: include.iter().map(|t| t.to_string()).collect(),
            exclude_tags: exclude.iter().map(|t| t.to_string()).collect(),
            ..FilterConfig::default()
        }
    }

    #[test]
    fn test_include_mode() {
        let filter = TagFilter::new(&config(&["Net"], &[]));
        assert!(filter.should_render("Net"));
        assert!(!filter.should_render("UI"));
    }

    #[test]
    fn test_include_overrides_exclude() {
        // Exclude set is ignored entirely while include tags exist.
        let filter = TagFilter::new(&config(&["Net"], &["Net", "UI"]));
        assert!(filter.should_render("Net"));
        assert!(!filter.should_render("UI"));
    }

    #[test]
    fn test_exclude_mode() {
        let filter = TagFilter::new(&config(&[], &["EGL_emulation"]));
        assert!(!filter.should_render("EGL_emulation"));
        assert!(filter.should_render("Net"));
    }

    #[test]
    fn test_no_filters_render_everything() {
        let filter = TagFilter::new(&config(&[], &[]));
        assert!(filter.should_render("anything"));
        assert!(filter.should_render(""));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let filter = TagFilter::new(&config(&["Net"], &[]));
        assert!(!filter.should_render("net"));
    }
}
