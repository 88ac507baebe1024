//! Conservative free-variable scan for hook dependency arrays

use crate::text::{self, is_ident_byte};
use std::collections::HashSet;

/// Keywords and ambient globals that never belong in a dependency array
const AMBIENT: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default", "delete",
    "do", "else", "false", "finally", "for", "function", "if", "in", "instanceof", "let", "new",
    "null", "of", "return", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "while", "yield", "as", "console", "window", "document", "navigator", "localStorage",
    "sessionStorage", "fetch", "setTimeout", "clearTimeout", "setInterval", "clearInterval",
    "requestAnimationFrame", "parseInt", "parseFloat", "isNaN", "encodeURIComponent",
    "decodeURIComponent", "structuredClone", "globalThis", "event",
];

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    word: &'a str,
    start: usize,
    end: usize,
}

/// Identifiers outside string literals; `${}` interpolations are scanned.
fn tokens(expr: &str) -> Vec<Token<'_>> {
    let bytes = expr.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let end = text::skip_literal(bytes, i).unwrap_or(bytes.len());
            let mut j = i + 1;
            while j + 1 < end {
                if bytes[j] == b'\\' {
                    j += 2;
                    continue;
                }
                if bytes[j] == b'$' && bytes[j + 1] == b'{' {
                    if let Some(close) = text::matching_close(expr, j + 1) {
                        out.extend(tokens(&expr[j + 2..close]).into_iter().map(|t| Token {
                            start: t.start + j + 2,
                            end: t.end + j + 2,
                            ..t
                        }));
                        j = close;
                    }
                }
                j += 1;
            }
            i = end;
            continue;
        }
        if let Some(next) = text::skip_literal(bytes, i) {
            i = next;
            continue;
        }
        if is_ident_byte(bytes[i]) {
            let start = i;
            while i < bytes.len() && is_ident_byte(bytes[i]) {
                i += 1;
            }
            if !bytes[start].is_ascii_digit() {
                out.push(Token { word: &expr[start..i], start, end: i });
            }
            continue;
        }
        i += 1;
    }
    out
}

fn prev_significant(bytes: &[u8], pos: usize) -> Option<u8> {
    bytes[..pos].iter().rev().copied().find(|b| !b.is_ascii_whitespace())
}

fn next_significant(bytes: &[u8], pos: usize) -> Option<(usize, u8)> {
    bytes[pos..].iter().position(|b| !b.is_ascii_whitespace()).map(|p| (pos + p, bytes[pos + p]))
}

/// Names the expression binds itself: arrow parameters and local declarations.
fn bound_names<'a>(expr: &'a str, toks: &[Token<'a>]) -> HashSet<&'a str> {
    let bytes = expr.as_bytes();
    let mut bound = HashSet::new();

    for (idx, tok) in toks.iter().enumerate() {
        if matches!(tok.word, "const" | "let" | "var" | "function") {
            if let Some(next) = toks.get(idx + 1) {
                bound.insert(next.word);
            }
        }
        if expr[tok.end..].trim_start().starts_with("=>") {
            bound.insert(tok.word);
        }
    }

    for (open, _) in expr.match_indices('(') {
        let Some(close) = text::matching_close(expr, open) else { continue };
        if !expr[close + 1..].trim_start().starts_with("=>") {
            continue;
        }
        for tok in toks.iter().filter(|t| t.start > open && t.end <= close) {
            // Default values inside the parameter list are uses, not bindings.
            let is_default = prev_significant(bytes, tok.start) == Some(b'=');
            if !is_default {
                bound.insert(tok.word);
            }
        }
    }
    bound
}

/// Free identifiers of `expr`, in first-use order, without duplicates.
///
/// Member names after `.`, object keys, uppercase names (components,
/// classes, module constants) and ambient globals are left out.
pub fn free_variables(expr: &str) -> Vec<String> {
    let bytes = expr.as_bytes();
    let toks = tokens(expr);
    let bound = bound_names(expr, &toks);
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for tok in &toks {
        let word = tok.word;
        if AMBIENT.contains(&word) || bound.contains(word) || word.starts_with(|c: char| c.is_ascii_uppercase()) {
            continue;
        }
        let member = tok.start > 0 && bytes[tok.start - 1] == b'.' && !expr[..tok.start].ends_with("...");
        if member {
            continue;
        }
        let is_key = matches!(next_significant(bytes, tok.end), Some((_, b':')))
            && matches!(prev_significant(bytes, tok.start), Some(b'{' | b','));
        if is_key {
            continue;
        }
        if seen.insert(word) {
            deps.push(word.to_string());
        }
    }
    deps
}

/// `[a, b]` dependency array literal
pub fn dependency_array(expr: &str) -> String {
    format!("[{}]", free_variables(expr).join(", "))
}
