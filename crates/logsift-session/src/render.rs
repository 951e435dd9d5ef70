use std::io;

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use logsift_types::{DeviceProps, FilterConfig, LogRecord};

use crate::sources::OutputSink;

/// Marker opening every copy & paste header block
const HEADER_MARKER: &str = "➜";

/// Formats filtered records into terminal output.
///
/// Two layouts: the default annotated one with a fixed-width colored tag
/// column, and a copy & paste friendly one that emits a header block per tag
/// change followed by undecorated message lines.
pub struct Renderer {
    config: FilterConfig,
    package: String,
    device: DeviceProps,
}

impl Renderer {
    pub fn new(config: FilterConfig, package: &str, device: DeviceProps) -> Self {
        Self {
            config,
            package: package.to_string(),
            device,
        }
    }

    /// Post-process a parsed tag into its display form.
    ///
    /// Outside raw mode this strips one trailing `:` and truncates to the
    /// configured column width. Filters compare against this form, not the
    /// raw parsed tag.
    pub fn display_tag(&self, tag: &str) -> String {
        if self.config.raw {
            return tag.to_string();
        }

        let tag = tag.strip_suffix(':').unwrap_or(tag);
        if tag.chars().count() > self.config.tag_width {
            tag.chars().take(self.config.tag_width).collect()
        } else {
            tag.to_string()
        }
    }

    /// Write `record` to the sink. `tag` is the display tag after collapsing
    /// (empty when it repeats the previous line's tag); `color` is its
    /// palette assignment.
    pub fn render<O: OutputSink>(
        &self,
        record: &LogRecord,
        tag: &str,
        color: Color,
        out: &mut O,
    ) -> io::Result<()> {
        let message = record.message.trim();

        if self.config.copy_paste {
            self.render_copy_paste(record, tag, color, message, out)
        } else {
            self.render_annotated(record, tag, color, message, out)
        }
    }

    fn render_annotated<O: OutputSink>(
        &self,
        record: &LogRecord,
        tag: &str,
        color: Color,
        message: &str,
        out: &mut O,
    ) -> io::Result<()> {
        if self.config.raw {
            return out.write_text(&format!("{message}\n"));
        }

        let width = self.config.effective_tag_width();
        let pad = width.saturating_sub(UnicodeWidthStr::width(tag));
        let column = format!("{}{}", " ".repeat(pad), tag);

        out.write_text(&format!(
            "{} {} {}\n",
            column.with(color),
            self.glyph(record),
            message
        ))
    }

    fn render_copy_paste<O: OutputSink>(
        &self,
        record: &LogRecord,
        tag: &str,
        color: Color,
        message: &str,
        out: &mut O,
    ) -> io::Result<()> {
        if !tag.is_empty() {
            out.write_text(&format!(
                "\n{HEADER_MARKER}  {} {}  [{}][{}][{}][{}][{}]\n\n",
                tag.to_string().with(color),
                self.glyph(record),
                self.package,
                self.device.manufacturer,
                self.device.sdk,
                self.device.serial,
                self.device.abi,
            ))?;
        }

        out.write_text(&format!("{message}\n"))
    }

    /// Priority glyph, one character in a colored cell
    fn glyph(&self, record: &LogRecord) -> String {
        if self.config.raw {
            return String::new();
        }

        let glyph = format!(" {} ", record.priority.code());
        match record.priority.colors() {
            Some(style) => {
                let mut styled = glyph.with(style.fg).on(style.bg);
                if style.bold {
                    styled = styled.bold();
                }
                styled.to_string()
            }
            None => glyph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    fn renderer(config: FilterConfig) -> Renderer {
        let device = DeviceProps {
            manufacturer: "Google".to_string(),
            sdk: "34".to_string(),
            serial: "emulator-5554".to_string(),
            abi: "arm64-v8a".to_string(),
        };
        Renderer::new(config, "com.example.app", device)
    }

    fn rendered(renderer: &Renderer, record: &LogRecord, tag: &str) -> String {
        let mut out = Vec::new();
        renderer
            .render(record, tag, Color::Red, &mut out)
            .expect("write to vec");
        strip_ansi_escapes::strip_str(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn test_display_tag_strips_colon_and_truncates() {
        let r = renderer(FilterConfig {
            tag_width: 6,
            ..FilterConfig::default()
        });
        assert_eq!(r.display_tag("Net:"), "Net");
        assert_eq!(r.display_tag("ALongTagName"), "ALongT");
        assert_eq!(r.display_tag("Short"), "Short");
    }

    #[test]
    fn test_display_tag_untouched_in_raw_mode() {
        let r = renderer(FilterConfig {
            raw: true,
            tag_width: 3,
            ..FilterConfig::default()
        });
        assert_eq!(r.display_tag("ALongTagName"), "ALongTagName");
    }

    #[test]
    fn test_annotated_layout() {
        let r = renderer(FilterConfig {
            tag_width: 10,
            ..FilterConfig::default()
        });
        let record = parse_line("01-01 12:00:00.000 1234 5678 I Net:   hello  ");
        assert_eq!(rendered(&r, &record, "Net"), "       Net  I  hello\n");
    }

    #[test]
    fn test_annotated_layout_blank_tag_keeps_column() {
        let r = renderer(FilterConfig {
            tag_width: 10,
            ..FilterConfig::default()
        });
        let record = parse_line("01-01 12:00:00.000 1234 5678 I Net: again");
        assert_eq!(rendered(&r, &record, ""), "            I  again\n");
    }

    #[test]
    fn test_raw_mode_is_message_only() {
        let r = renderer(FilterConfig {
            raw: true,
            ..FilterConfig::default()
        });
        let record = parse_line("01-01 12:00:00.000 1234 5678 I Net: hello world");
        assert_eq!(rendered(&r, &record, "Net"), "hello world\n");
    }

    #[test]
    fn test_copy_paste_header_on_tag_change() {
        let r = renderer(FilterConfig {
            copy_paste: true,
            ..FilterConfig::default()
        });
        let record = parse_line("01-01 12:00:00.000 1234 5678 W Net: request failed");
        let text = rendered(&r, &record, "Net");
        assert_eq!(
            text,
            "\n➜  Net  W   [com.example.app][Google][34][emulator-5554][arm64-v8a]\n\nrequest failed\n"
        );
    }

    #[test]
    fn test_copy_paste_collapsed_tag_is_undecorated() {
        let r = renderer(FilterConfig {
            copy_paste: true,
            ..FilterConfig::default()
        });
        let record = parse_line("01-01 12:00:00.000 1234 5678 W Net: still failing");
        assert_eq!(rendered(&r, &record, ""), "still failing\n");
    }
}
