//! Gradient rendering.

use std::io::{self, Write};

use tracing::debug;

use crate::color::{AnsiEncoder, Rgb};
use crate::OutstreamResult;

/// Resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";

/// Linear interpolation truncated toward zero.
fn lerp(start: u8, end: u8, i: usize, steps: usize) -> u8 {
    let delta = (i64::from(end) - i64::from(start)) * i as i64;
    (f64::from(start) + delta as f64 / steps as f64) as u8
}

/// Colors `text` with a gradient from `start` to `end`.
///
/// `steps == 0` emits one colored character per character of `text`. Larger
/// values cycle through `text` until `steps` characters are emitted. With no
/// `end` the whole run uses `start`. The result always ends with [`RESET`].
pub fn gradient_text(
    encoder: &AnsiEncoder,
    text: &str,
    start: Rgb,
    end: Option<Rgb>,
    steps: usize,
) -> OutstreamResult<String> {
    let chars: Vec<char> = text.chars().collect();
    let end = end.unwrap_or(start);
    let steps = if steps == 0 { chars.len() } else { steps };
    debug!(%start, %end, steps, "rendering gradient");

    let mut out = String::new();
    if !chars.is_empty() {
        for i in 0..steps {
            let color = Rgb::new(
                lerp(start.red, end.red, i, steps),
                lerp(start.green, end.green, i, steps),
                lerp(start.blue, end.blue, i, steps),
            );
            out.push_str(&encoder.encode(color)?);
            out.push(chars[i % chars.len()]);
        }
    }
    out.push_str(RESET);
    Ok(out)
}

/// Writes an escape sequence without a trailing newline.
pub fn write_color<W: Write>(writer: &mut W, escape: &str) -> io::Result<()> {
    writer.write_all(escape.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encoder() -> AnsiEncoder {
        AnsiEncoder::new().unwrap()
    }

    #[test]
    fn test_single_color_without_end() {
        let white = Rgb::new(255, 255, 255);
        let out = gradient_text(&encoder(), "hi", white, None, 0).unwrap();
        assert_eq!(
            out,
            "\x1b[38;2;255;255;255mh\x1b[38;2;255;255;255mi\x1b[0m"
        );
    }

    #[test]
    fn test_descending_channels_truncate() {
        let out = gradient_text(
            &encoder(),
            "abc",
            Rgb::new(255, 0, 10),
            Some(Rgb::new(0, 0, 0)),
            0,
        )
        .unwrap();
        assert_eq!(
            out,
            "\x1b[38;2;255;0;10ma\x1b[38;2;170;0;6mb\x1b[38;2;85;0;3mc\x1b[0m"
        );
    }

    #[test]
    fn test_steps_cycle_through_text() {
        let black = Rgb::BLACK;
        let out = gradient_text(&encoder(), "ab", black, None, 5).unwrap();
        let visible: String = out
            .split("\x1b[38;2;0;0;0m")
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches(RESET))
            .collect();
        assert_eq!(visible, "ababa");
    }

    #[test]
    fn test_multibyte_characters() {
        let out = gradient_text(&encoder(), "é✓", Rgb::BLACK, None, 0).unwrap();
        assert_eq!(out, "\x1b[38;2;0;0;0mé\x1b[38;2;0;0;0m✓\x1b[0m");
    }

    #[test]
    fn test_empty_text_is_just_reset() {
        assert_eq!(gradient_text(&encoder(), "", Rgb::BLACK, None, 0).unwrap(), RESET);
        assert_eq!(gradient_text(&encoder(), "", Rgb::BLACK, None, 4).unwrap(), RESET);
    }

    #[test]
    fn test_write_color_has_no_newline() {
        let mut buf = Vec::new();
        write_color(&mut buf, "\x1b[38;2;1;2;3m").unwrap();
        write_color(&mut buf, RESET).unwrap();
        assert_eq!(buf, b"\x1b[38;2;1;2;3m\x1b[0m");
    }
}
