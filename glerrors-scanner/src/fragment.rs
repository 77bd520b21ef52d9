// Tag-balancing scanner for the legacy extraction strategy

use crate::error::{Result, ScanError};

/// Find the end of a container element whose opening tag has already been consumed.
///
/// `start` must point just past the opening tag, so scanning begins at nesting
/// depth 1. Whenever fewer bytes remain in `buf` than a closing tag needs, the
/// next line is pulled from `lines` and appended with a `\n` separator.
///
/// Returns the byte offset immediately after the `</tag>` that closes the
/// container.
pub fn find_fragment_end<I, S>(buf: &mut String, start: usize, tag: &str, lines: &mut I) -> Result<usize>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    // One extra byte so an open tag can be checked for its boundary character
    let lookahead = close.len().max(open.len() + 1);

    let mut depth = 1usize;
    let mut pos = start;
    let mut exhausted = false;

    loop {
        while !exhausted && buf.len() < pos + lookahead {
            match lines.next() {
                Some(line) => {
                    buf.push('\n');
                    buf.push_str(line.as_ref());
                }
                None => exhausted = true,
            }
        }

        let rest = match buf.as_bytes().get(pos..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => {
                return Err(ScanError::UnexpectedEndOfInput {
                    tag: tag.to_string(),
                });
            }
        };

        if rest.starts_with(close.as_bytes()) {
            depth -= 1;
            pos += close.len();
            if depth == 0 {
                return Ok(pos);
            }
        } else if rest.starts_with(open.as_bytes())
            && rest.get(open.len()).is_some_and(|b| is_tag_boundary(*b))
        {
            depth += 1;
            pos += open.len();
        } else {
            pos += 1;
        }
    }
}

/// Find where the content of a marked region begins: just past the first `>`
/// at or after the marker's last byte, pulling more lines if the tag is split.
pub fn find_content_start<I, S>(buf: &mut String, marker_at: usize, marker: &str, lines: &mut I) -> Result<usize>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let from = marker_at + marker.len().saturating_sub(1);
    loop {
        if let Some(offset) = buf.get(from..).and_then(|rest| rest.find('>')) {
            return Ok(from + offset + 1);
        }
        match lines.next() {
            Some(line) => {
                buf.push('\n');
                buf.push_str(line.as_ref());
            }
            None => {
                return Err(ScanError::UnexpectedEndOfInput {
                    tag: marker.to_string(),
                });
            }
        }
    }
}

fn is_tag_boundary(b: u8) -> bool {
    b == b'>' || b == b'/' || b.is_ascii_whitespace()
}
