use logsift_types::{LogRecord, Priority};

// Token positions in a logcat line split on whitespace. Position 0 is the
// date, which the record does not carry.
const TIME: usize = 1;
const PID: usize = 2;
const TID: usize = 3;
const PRIORITY: usize = 4;
const TAG: usize = 5;

/// Parse one raw logcat line into a [`LogRecord`].
///
/// Never fails: the input is a live stream and one bad line must not abort
/// the session, so short or malformed lines degrade to partially-empty
/// records instead.
///
/// The tag starts at a fixed token position and is accumulated word by word
/// until the `:` separator shows up, either as a token of its own
/// (`"Tag : msg"`) or glued to the last tag word (`"Tag: msg"`). Tags with
/// embedded spaces come out joined by single spaces. Without a separator the
/// whole remainder is the tag and the message stays empty.
pub fn parse_line(raw: &str) -> LogRecord {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let token = |index: usize| words.get(index).copied().unwrap_or("").to_string();

    let mut tag = String::new();
    let mut message = String::new();

    if words.len() > TAG {
        for i in TAG..words.len() {
            if words[i] == ":" {
                message = words[i + 1..].join(" ");
                break;
            }

            tag.push_str(words[i]);

            if tag.ends_with(':') {
                tag.pop();
                message = words[i + 1..].join(" ");
                break;
            }

            tag.push(' ');
        }
        tag = tag.trim().to_string();
    }

    LogRecord {
        time: token(TIME),
        pid: token(PID),
        tid: token(TID),
        priority: Priority::from_code(&token(PRIORITY)),
        tag,
        message,
    }
}
