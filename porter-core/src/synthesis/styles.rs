//! Bootstrap utility classes to Tailwind utilities
//!
//! Tokens pass through the palette table first, then the utility table.
//! Within each table the longest entry that matches wins; tokens nothing
//! matches are left unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Theme color names, matched as whole `-` separated segments after one
/// of the [`COLOR_PREFIXES`].
const PALETTE: &[(&str, &str)] = &[
    ("primary", "blue-600"),
    ("secondary", "gray-600"),
    ("success", "green-600"),
    ("danger", "red-600"),
    ("warning", "amber-500"),
    ("info", "sky-500"),
    ("light", "gray-100"),
    ("dark", "gray-900"),
    ("muted", "gray-500"),
    ("white", "white"),
];

const COLOR_PREFIXES: &[&str] = &["text", "bg", "btn", "border", "alert", "badge"];

/// Entries ending in `-` rewrite a prefix; the rest must match the whole token.
const UTILITIES: &[(&str, &str)] = &[
    ("btn-outline-", "border border-"),
    ("btn-", "bg-"),
    ("btn", "px-4 py-2 rounded"),
    ("d-inline-block", "inline-block"),
    ("d-inline-flex", "inline-flex"),
    ("d-flex", "flex"),
    ("d-none", "hidden"),
    ("d-block", "block"),
    ("d-grid", "grid"),
    ("flex-column", "flex-col"),
    ("justify-content-", "justify-"),
    ("align-items-", "items-"),
    ("align-self-", "self-"),
    ("font-weight-bold", "font-bold"),
    ("fw-bold", "font-bold"),
    ("fw-normal", "font-normal"),
    ("fst-italic", "italic"),
    ("rounded-circle", "rounded-full"),
    ("rounded-pill", "rounded-full"),
    ("w-100", "w-full"),
    ("h-100", "h-full"),
    ("text-start", "text-left"),
    ("text-end", "text-right"),
    ("float-start", "float-left"),
    ("float-end", "float-right"),
    ("card-body", "p-4"),
    ("card", "rounded-lg border bg-white shadow-sm"),
    ("list-group-item", "px-4 py-2"),
    ("list-group", "divide-y rounded-lg border"),
    ("form-control", "block w-full rounded border px-3 py-2"),
    ("row", "flex flex-wrap"),
    ("col", "flex-1"),
    ("img-fluid", "max-w-full h-auto"),
    ("visually-hidden", "sr-only"),
    ("sr-only", "sr-only"),
];

/// `mt-3`, `px-2`, `ms-1`: Bootstrap spacing utilities with a 0-5 scale.
static SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([mp])([tbsexy]?)-([0-5])$").expect("Invalid regex pattern"));

fn by_length_desc(table: &'static [(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    let mut sorted = table.to_vec();
    sorted.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    sorted
}

static PALETTE_SORTED: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| by_length_desc(PALETTE));
static UTILITIES_SORTED: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| by_length_desc(UTILITIES));

fn remap_palette(token: &str) -> String {
    let segments: Vec<&str> = token.split('-').collect();
    if !COLOR_PREFIXES.contains(&segments[0]) {
        return token.to_string();
    }
    for &(name, color) in PALETTE_SORTED.iter() {
        if let Some(position) = segments.iter().skip(1).position(|s| *s == name).map(|p| p + 1) {
            let mut mapped: Vec<&str> = segments.clone();
            mapped[position] = color;
            return mapped.join("-");
        }
    }
    token.to_string()
}

fn remap_utility(token: &str) -> String {
    for &(from, to) in UTILITIES_SORTED.iter() {
        if from.ends_with('-') {
            if let Some(rest) = token.strip_prefix(from) {
                return format!("{to}{rest}");
            }
        } else if token == from {
            return to.to_string();
        }
    }
    if let Some(caps) = SPACING.captures(token) {
        let side = match &caps[2] {
            "s" => "l",
            "e" => "r",
            other => other,
        };
        let size = match &caps[3] {
            "3" => "4",
            "4" => "6",
            "5" => "12",
            other => other,
        };
        return format!("{}{}-{}", &caps[1], side, size);
    }
    token.to_string()
}

/// Map one class token; may expand into several Tailwind classes.
pub fn remap_class_token(token: &str) -> String {
    remap_utility(&remap_palette(token))
}

/// Map a whitespace separated class list, dropping duplicate results.
pub fn remap_class_list(classes: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    for token in classes.split_whitespace() {
        for mapped in remap_class_token(token).split_whitespace() {
            if !seen.iter().any(|s| s == mapped) {
                seen.push(mapped.to_string());
            }
        }
    }
    seen.join(" ")
}
