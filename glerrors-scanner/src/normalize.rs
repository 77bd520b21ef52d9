// Markup-to-text normalization

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Turn a raw marked-up fragment into plain text strings (legacy strategy).
///
/// Tags are dropped, whitespace runs collapse to one space, and `&gt;`/`&lt;`
/// decode to `"> "`/`"< "`. A `<p>` tag starts a new string. A bare `;` ends
/// the current string and stays attached to it, which is how several function
/// prototypes in one synopsis block come out as separate lines. Any other
/// entity is copied through as-is, so its trailing `;` splits the text too.
pub fn normalize_fragment(fragment: &str) -> Vec<String> {
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;
    let mut was_last_space = false;

    let mut chars = fragment.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch == '<' {
            in_tag = true;
            if opens_paragraph(&fragment[i..]) {
                flush(&mut strings, &mut current);
                was_last_space = false;
            }
            continue;
        }
        if ch == '>' {
            in_tag = false;
            continue;
        }
        if in_tag {
            continue;
        }

        if ch.is_whitespace() {
            if !was_last_space && !current.is_empty() {
                current.push(' ');
            }
            was_last_space = true;
        } else if ch == '&' {
            let rest = &fragment[i..];
            let decoded = if rest.starts_with("&gt;") {
                Some("> ")
            } else if rest.starts_with("&lt;") {
                Some("< ")
            } else {
                None
            };
            match decoded {
                Some(text) => {
                    current.push_str(text);
                    was_last_space = true;
                    // Skip "gt;" / "lt;"
                    chars.nth(2);
                }
                None => {
                    current.push(ch);
                    was_last_space = false;
                }
            }
        } else if ch == ';' {
            current.push(ch);
            flush(&mut strings, &mut current);
            was_last_space = false;
        } else {
            current.push(ch);
            was_last_space = false;
        }
    }
    flush(&mut strings, &mut current);

    strings
}

fn opens_paragraph(at_lt: &str) -> bool {
    at_lt.starts_with("<p")
        && at_lt
            .as_bytes()
            .get(2)
            .is_some_and(|b| *b == b'>' || b.is_ascii_whitespace())
}

fn flush(strings: &mut Vec<String>, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        strings.push(text.to_string());
    }
    current.clear();
}
