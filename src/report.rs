//! Source-excerpt rendering for diagnostics.
//!
//! Pure side channel: callers hold a [`crate::DecodeError`] with a byte
//! offset and render an excerpt on demand. The decoder itself emits the
//! same rendering through the `log` facade when an error is constructed.

use memchr::{memchr, memrchr};

/// Render up to three source lines around `offset`: the line before, the
/// offending line with a caret under the offending column, and the line
/// after. `...` marks further lines beyond the excerpt. Tabs expand to two
/// spaces so the caret stays column-accurate.
pub fn render_excerpt(input: &str, offset: usize) -> String {
    let bytes = input.as_bytes();
    // An error at the end-of-input sentinel sits one past the last byte.
    let offset = offset.min(bytes.len());

    let line_start = memrchr(b'\n', &bytes[..offset]).map_or(0, |i| i + 1);
    let line_end = memchr(b'\n', &bytes[offset..]).map_or(bytes.len(), |i| offset + i);

    let mut out = String::new();

    if line_start > 0 {
        let prev_end = line_start - 1;
        let prev_start = memrchr(b'\n', &bytes[..prev_end]).map_or(0, |i| i + 1);
        if prev_start > 0 {
            out.push_str("...\n");
        }
        push_expanded(&mut out, &input[prev_start..prev_end]);
        out.push('\n');
    }

    push_expanded(&mut out, &input[line_start..line_end]);
    out.push('\n');
    let column = expanded_width(&bytes[line_start..offset]);
    for _ in 0..column {
        out.push(' ');
    }
    out.push_str("^\n");

    if line_end < bytes.len() {
        let next_start = line_end + 1;
        let next_end =
            memchr(b'\n', &bytes[next_start..]).map_or(bytes.len(), |i| next_start + i);
        push_expanded(&mut out, &input[next_start..next_end]);
        out.push('\n');
        if next_end < bytes.len() {
            out.push_str("...\n");
        }
    }

    out
}

fn push_expanded(out: &mut String, line: &str) {
    for ch in line.chars() {
        if ch == '\t' {
            out.push_str("  ");
        } else {
            out.push(ch);
        }
    }
}

/// Rendered width of a line prefix: tabs count two columns, UTF-8
/// continuation bytes none.
fn expanded_width(prefix: &[u8]) -> usize {
    prefix
        .iter()
        .map(|&byte| match byte {
            b'\t' => 2,
            byte if byte & 0xC0 == 0x80 => 0,
            _ => 1,
        })
        .sum()
}
