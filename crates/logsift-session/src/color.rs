use std::collections::{HashMap, VecDeque};

use crossterm::style::Color;

use logsift_types::TAG_PALETTE;

/// Stable per-tag color assignment plus consecutive-tag collapsing.
///
/// The palette is a fixed-size ring: an unseen tag takes the front (least
/// recently assigned) color, which then rotates to the back. A tag keeps its
/// color for the rest of the run, and reuse does not refresh recency, so on
/// logs with more distinct tags than palette slots colors eventually repeat.
/// That trade keeps the state tiny and the output stable.
#[derive(Clone, Debug)]
pub struct TagColorizer {
    assigned: HashMap<String, Color>,
    ring: VecDeque<Color>,
    last_tag: String,
}

impl TagColorizer {
    pub fn new() -> Self {
        Self {
            assigned: HashMap::new(),
            ring: TAG_PALETTE.into_iter().collect(),
            last_tag: String::new(),
        }
    }

    /// Color for `tag`, assigning one from the ring on first sight
    pub fn color_for(&mut self, tag: &str) -> Color {
        if let Some(color) = self.assigned.get(tag) {
            return *color;
        }

        // The ring always holds exactly one entry per palette slot.
        let color = self.ring.pop_front().unwrap_or(TAG_PALETTE[0]);
        self.ring.push_back(color);
        self.assigned.insert(tag.to_string(), color);
        color
    }

    /// Blank the tag when it repeats the previously rendered one.
    ///
    /// Independent of color assignment: a blanked tag keeps its color for
    /// the priority glyph.
    pub fn collapse(&mut self, tag: &str) -> String {
        if self.last_tag == tag {
            String::new()
        } else {
            self.last_tag = tag.to_string();
            tag.to_string()
        }
    }
}

impl Default for TagColorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_keeps_color_for_run() {
        let mut colorizer = TagColorizer::new();
        let first = colorizer.color_for("Net");
        colorizer.color_for("UI");
        colorizer.color_for("Audio");
        assert_eq!(colorizer.color_for("Net"), first);
    }

    #[test]
    fn test_distinct_tags_get_distinct_colors_within_palette() {
        let mut colorizer = TagColorizer::new();
        let tags = ["A", "B", "C", "D", "E", "F"];
        let colors: Vec<Color> = tags.iter().map(|t| colorizer.color_for(t)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_palette_wraps_after_exhaustion() {
        let mut colorizer = TagColorizer::new();
        let first = colorizer.color_for("A");
        for tag in ["B", "C", "D", "E", "F"] {
            colorizer.color_for(tag);
        }
        // Seventh distinct tag reuses the oldest assignment.
        assert_eq!(colorizer.color_for("G"), first);
    }

    #[test]
    fn test_reuse_does_not_refresh_recency() {
        let mut colorizer = TagColorizer::new();
        let first = colorizer.color_for("A");
        for tag in ["B", "C", "D", "E", "F"] {
            colorizer.color_for(tag);
        }
        // Hitting "A" again must not move its slot to the back of the ring.
        colorizer.color_for("A");
        assert_eq!(colorizer.color_for("G"), first);
    }

    #[test]
    fn test_collapse_consecutive_tags() {
        let mut colorizer = TagColorizer::new();
        assert_eq!(colorizer.collapse("Net"), "Net");
        assert_eq!(colorizer.collapse("Net"), "");
        assert_eq!(colorizer.collapse("UI"), "UI");
        assert_eq!(colorizer.collapse("Net"), "Net");
    }
}
