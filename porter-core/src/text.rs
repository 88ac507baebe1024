//! Lexical helpers shared by the extractor, synthesizer and optimizer.
//!
//! None of this is a parser. The scanner understands just enough of the
//! lexical structure of JavaScript (string literals, template literals and
//! comments) to keep delimiter counting honest on real component source.

/// Returns the byte index just past the literal or comment starting at `i`,
/// or `None` when `i` does not start one.
pub fn skip_literal(bytes: &[u8], i: usize) -> Option<usize> {
    let len = bytes.len();
    match bytes[i] {
        b'/' if bytes.get(i + 1) == Some(&b'/') => {
            let end = bytes[i..].iter().position(|&b| b == b'\n').map_or(len, |p| i + p);
            Some(end)
        }
        b'/' if bytes.get(i + 1) == Some(&b'*') => {
            let mut j = i + 2;
            while j + 1 < len {
                if bytes[j] == b'*' && bytes[j + 1] == b'/' {
                    return Some(j + 2);
                }
                j += 1;
            }
            Some(len)
        }
        b'`' => {
            let mut j = i + 1;
            while j < len {
                match bytes[j] {
                    b'\\' => j += 2,
                    b'`' => return Some(j + 1),
                    _ => j += 1,
                }
            }
            Some(len)
        }
        quote @ (b'\'' | b'"') => {
            // A quote glued to a word is prose (`Don't`), not a literal.
            if i > 0 && is_ident_byte(bytes[i - 1]) {
                return None;
            }
            let mut j = i + 1;
            while j < len {
                match bytes[j] {
                    b'\\' => j += 2,
                    b'\n' => return None,
                    b if b == quote => return Some(j + 1),
                    _ => j += 1,
                }
            }
            None
        }
        _ => None,
    }
}

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Blank out comments while preserving byte offsets and line structure.
pub fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let is_comment = bytes[i] == b'/' && matches!(bytes.get(i + 1), Some(b'/') | Some(b'*'));
        match skip_literal(bytes, i) {
            Some(end) if is_comment => {
                out.extend(bytes[i..end].iter().map(|&b| if b == b'\n' { b'\n' } else { b' ' }));
                i = end;
            }
            Some(end) => {
                out.extend_from_slice(&bytes[i..end]);
                i = end;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

/// Index of the delimiter closing the one at `open`.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open_byte = *bytes.get(open)?;
    let close_byte = closer_for(open_byte)?;
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        let b = bytes[i];
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Whether every `(`, `[` and `{` outside literals is closed in order.
pub fn is_balanced(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut stack = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b @ (b'(' | b'[' | b'{') => stack.push(closer_for(b).unwrap_or(b')')),
            b @ (b')' | b']' | b'}') => {
                if stack.pop() != Some(b) {
                    return false;
                }
            }
            _ => {}
        }
        i += 1;
    }
    stack.is_empty()
}

/// Split on `separator` where it appears outside any nesting or literal.
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b if b == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&text[start..]);
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

/// End of the statement starting at `from`: just past its `;`, or the
/// newline that ends it under automatic semicolon insertion.
pub fn statement_end(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = from;
    let mut last_significant: Option<u8> = None;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            last_significant = Some(bytes[next - 1]);
            i = next;
            continue;
        }
        let b = bytes[i];
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth < 0 {
                    return i;
                }
            }
            b';' if depth == 0 => return i + 1,
            b'\n' if depth == 0 => {
                let ends_value = last_significant
                    .is_some_and(|c| is_ident_byte(c) || matches!(c, b')' | b']' | b'}' | b'\'' | b'"' | b'`'));
                let continues = bytes[i..]
                    .iter()
                    .find(|c| !c.is_ascii_whitespace())
                    .is_some_and(|c| {
                        matches!(c, b'.' | b'?' | b':' | b'&' | b'|' | b'+' | b'-' | b'*' | b'/' | b'=' | b',')
                    });
                if ends_value && !continues {
                    return i;
                }
            }
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            last_significant = Some(b);
        }
        i += 1;
    }
    bytes.len()
}

/// Byte offsets of `word` occurring outside nesting and literals.
pub fn top_level_keyword_positions(text: &str, word: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let word_bytes = word.as_bytes();
    let mut positions = Vec::new();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_literal(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            _ if depth == 0 && bytes[i..].starts_with(word_bytes) => {
                let before_ok = i == 0 || !is_ident_byte(bytes[i - 1]);
                let after_ok = bytes.get(i + word_bytes.len()).is_none_or(|&b| !is_ident_byte(b));
                if before_ok && after_ok {
                    positions.push(i);
                    i += word_bytes.len();
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    positions
}

/// Occurrences of `word` as a whole identifier.
pub fn count_word(text: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    let bytes = text.as_bytes();
    text.match_indices(word)
        .filter(|(i, _)| {
            let before_ok = *i == 0 || !is_ident_byte(bytes[i - 1]);
            let after_ok = bytes.get(i + word.len()).is_none_or(|&b| !is_ident_byte(b));
            before_ok && after_ok
        })
        .count()
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Remove the common leading indentation and surrounding blank lines.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };
    let lines = &lines[first..=last];
    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| match l.get(margin..) {
            Some(rest) if l[..margin].trim().is_empty() => rest.trim_end(),
            _ => l.trim(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent a block of code
pub fn indent(code: &str, spaces: usize) -> String {
    let indent_str = " ".repeat(spaces);
    code.lines()
        .map(|line| if line.is_empty() { line.to_string() } else { format!("{}{}", indent_str, line) })
        .collect::<Vec<_>>()
        .join("\n")
}

fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = c.is_ascii_uppercase()
            && !current.is_empty()
            && (current.chars().last().is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
                || chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase()));
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `user-profile`, `user_profile` and `userProfile` all become `UserProfile`.
pub fn to_pascal_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn to_camel_case(s: &str) -> String {
    let words = words(s);
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&w.to_ascii_lowercase());
        } else {
            let mut chars = w.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

pub fn to_kebab_case(s: &str) -> String {
    words(s).iter().map(|w| w.to_ascii_lowercase()).collect::<Vec<_>>().join("-")
}

/// Escape text for a single-quoted string literal
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_preserves_offsets() {
        let source = "const a = 1; // note (\n/* block { */ const b = 'x // y';";
        let stripped = strip_comments(source);
        assert_eq!(stripped.len(), source.len());
        assert!(!stripped.contains("note"));
        assert!(!stripped.contains("block"));
        assert!(stripped.contains("'x // y'"));
        assert!(is_balanced(&stripped));
    }

    #[test]
    fn test_matching_close_skips_literals() {
        let text = "f(a, ')', [1, 2], { b: \"(\" })";
        assert_eq!(matching_close(text, 1), Some(text.len() - 1));
    }

    #[test]
    fn test_balance_ignores_prose_apostrophes() {
        assert!(is_balanced("<p>Don't stop (really)</p>"));
        assert!(!is_balanced("if (a) { b("));
        assert!(!is_balanced("(]"));
    }

    #[test]
    fn test_split_top_level() {
        let parts = split_top_level("() => { a(); }, [a, b]", b',');
        assert_eq!(parts, vec!["() => { a(); }", " [a, b]"]);
    }

    #[test]
    fn test_statement_end() {
        let text = "const a = items.map((i) => {\n  return i;\n});\nconst b = 2;";
        let end = statement_end(text, 0);
        assert_eq!(&text[..end], "const a = items.map((i) => {\n  return i;\n});");

        let text = "const a = b\nconst c = d";
        assert_eq!(&text[..statement_end(text, 0)], "const a = b");
    }

    #[test]
    fn test_top_level_keyword_positions() {
        let body = "if (x) { return null; }\nreturn (<div />);";
        let positions = top_level_keyword_positions(body, "return");
        assert_eq!(positions.len(), 1);
        assert!(body[positions[0]..].starts_with("return (<div"));
    }

    #[test]
    fn test_count_word() {
        assert_eq!(count_word("count + counter + count", "count"), 2);
        assert_eq!(count_word("props.title", "title"), 1);
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_pascal_case("user-profile"), "UserProfile");
        assert_eq!(to_pascal_case("userProfile"), "UserProfile");
        assert_eq!(to_camel_case("UserProfile"), "userProfile");
        assert_eq!(to_camel_case("UIButton"), "uiButton");
        assert_eq!(to_kebab_case("UserProfileCard"), "user-profile-card");
    }

    #[test]
    fn test_dedent() {
        assert_eq!(dedent("\n    a\n      b\n"), "a\n  b");
    }

    #[test]
    fn test_dedent_ignores_unicode_whitespace_in_margin() {
        assert_eq!(dedent("    <div>\n   \u{a0}\n    </div>"), "<div>\n\n</div>");
        assert_eq!(dedent("  a\n\u{a0}\u{a0}b"), "  a\n\u{a0}\u{a0}b");
    }
}
