//! Regex utilities for porter
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns recognising component declarations, hooks and idioms in
/// Create-React-App style source.
pub mod component {
    use super::*;

    pub static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bclass\s+([A-Z][A-Za-z0-9_]*)\s+extends\s+(?:React\.)?(?:Pure)?Component\b")
            .expect("Invalid regex pattern")
    });

    pub static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bfunction\s+([A-Z][A-Za-z0-9_]*)\s*\(").expect("Invalid regex pattern")
    });

    pub static ARROW_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"\b(?:const|let|var)\s+([A-Z][A-Za-z0-9_]*)\s*(?::\s*[\w.<>]+\s*)?=\s*(?:async\s+)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*=>",
        )
        .expect("Invalid regex pattern")
    });

    pub static WRAPPED_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:const|let|var)\s+([A-Z][A-Za-z0-9_]*)\s*=\s*(?:React\.)?(?:memo|forwardRef)\s*\(")
            .expect("Invalid regex pattern")
    });

    pub static EXPORT_DEFAULT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"\bexport\s+default\s+(?:(?:React\.)?(?:memo|withRouter|forwardRef)\s*\(\s*)*([A-Z][A-Za-z0-9_]*)",
        )
        .expect("Invalid regex pattern")
    });

    pub static EXPORT_NAMED: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bexport\s+(?:const|let|var|function|class)\s+([A-Za-z_$][\w$]*)")
            .expect("Invalid regex pattern")
    });

    pub static IMPORT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"(?m)^[ \t]*import\s+(?:([^;'"]+?)\s+from\s+)?['"]([^'"\n]+)['"][ \t]*;?"#)
            .expect("Invalid regex pattern")
    });

    pub static USE_STATE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"\b(?:const|let)\s*\[\s*([A-Za-z_$][\w$]*)\s*(?:,\s*([A-Za-z_$][\w$]*)\s*)?\]\s*=\s*(?:React\.)?useState\s*(?:<[^>]*>)?\s*\(",
        )
        .expect("Invalid regex pattern")
    });

    pub static USE_REDUCER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"\b(?:const|let)\s*\[\s*([A-Za-z_$][\w$]*)\s*,\s*([A-Za-z_$][\w$]*)\s*\]\s*=\s*(?:React\.)?useReducer\s*\(",
        )
        .expect("Invalid regex pattern")
    });

    pub static EFFECT_HOOK: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:React\.)?(useEffect|useLayoutEffect|useMemo|useCallback)\s*\(")
            .expect("Invalid regex pattern")
    });

    /// Any hook primitive; used to flag hooks inside class components.
    pub static ANY_HOOK: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"\b(?:React\.)?(useState|useReducer|useEffect|useLayoutEffect|useMemo|useCallback|useRef|useContext)\s*\(",
        )
        .expect("Invalid regex pattern")
    });

    pub static LIFECYCLE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:async\s+)?(componentDidMount|componentDidUpdate|componentWillUnmount)\s*\([^)]*\)\s*\{",
        )
        .expect("Invalid regex pattern")
    });

    pub static CLASS_STATE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:\bthis\.|(?m:^)[ \t]*)state\s*=\s*\{").expect("Invalid regex pattern")
    });

    pub static RENDER_METHOD: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^[ \t]*render\s*\(\s*\)\s*\{").expect("Invalid regex pattern")
    });

    pub static PROP_TYPES: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:\b([A-Z][A-Za-z0-9_]*)\.|\bstatic\s+)propTypes\s*=\s*\{")
            .expect("Invalid regex pattern")
    });

    pub static PROP_TYPE_ENTRY: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\s*([A-Za-z_$][\w$]*)\s*:\s*PropTypes\.(\w+)")
            .expect("Invalid regex pattern")
    });

    pub static DEFAULT_PROPS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:\b([A-Z][A-Za-z0-9_]*)\.|\bstatic\s+)defaultProps\s*=\s*\{")
            .expect("Invalid regex pattern")
    });

    pub static PROPS_ACCESS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:this\.)?props\.([A-Za-z_$][\w$]*)").expect("Invalid regex pattern")
    });

    pub static PROPS_DESTRUCTURE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:const|let)\s*\{([^{}]*)\}\s*=\s*(?:this\.)?props\b")
            .expect("Invalid regex pattern")
    });

    pub static CLASS_NAME: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"className\s*=\s*(?:"([^"]*)"|'([^']*)'|\{\s*["'`]([^"'`$]*)["'`]\s*\})"#)
            .expect("Invalid regex pattern")
    });

    pub static FETCH_URL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r#"\b(?:fetch|axios(?:\.(?:get|post|put|patch|delete))?)\s*\(\s*["'`]([^"'`$]+)["'`]"#,
        )
        .expect("Invalid regex pattern")
    });

    pub static CLASS_ARROW_HANDLER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^[ \t]*(handle[A-Z]\w*|on[A-Z]\w*)\s*=\s*(?:async\s*)?(?:\([^()]*\)|[A-Za-z_$][\w$]*)\s*=>")
            .expect("Invalid regex pattern")
    });

    pub static CLASS_METHOD_HANDLER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^[ \t]*(async\s+)?(handle[A-Z]\w*|on[A-Z]\w*)\s*\(([^()]*)\)\s*\{")
            .expect("Invalid regex pattern")
    });

    pub static NAVIGATION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"react-router|\buseHistory\b|\buseNavigate\b|\bwithRouter\b|\bhistory\.(?:push|replace|goBack)\b|<(?:Nav)?Link\b",
        )
        .expect("Invalid regex pattern")
    });

    pub static MEDIA: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"<(?:img|video|audio|picture|iframe)\b").expect("Invalid regex pattern")
    });

    pub static ANIMATION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"framer-motion|react-spring|react-transition-group|<motion\.|\buseSpring\b|@keyframes|requestAnimationFrame",
        )
        .expect("Invalid regex pattern")
    });

    pub static REMOTE_DATA: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bfetch\s*\(|\baxios\b|\buseQuery\b|\buseSWR\b|XMLHttpRequest|\bnew\s+WebSocket\b")
            .expect("Invalid regex pattern")
    });
}

/// Patterns for porting origin idioms into the target idiom.
pub mod rewrite {
    use super::*;

    pub static ENV_PREFIX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bprocess\.env\.REACT_APP_").expect("Invalid regex pattern"));

    pub static NODE_ENV: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bprocess\.env\.NODE_ENV\b").expect("Invalid regex pattern"));

    pub static HISTORY_PUSH: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bhistory\.push\(").expect("Invalid regex pattern"));

    pub static HISTORY_REPLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bhistory\.replace\(([^()]*)\)").expect("Invalid regex pattern")
    });

    pub static HISTORY_BACK: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bhistory\.goBack\(\s*\)").expect("Invalid regex pattern"));

    pub static HISTORY_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^[ \t]*(?:const|let)\s+history\s*=\s*useHistory\(\s*\)\s*;?[ \t]*\n?")
            .expect("Invalid regex pattern")
    });

    pub static BINDING_DESTRUCTURE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:const|let)\s*\{[^{}]*\}\s*=\s*(?:this\.)?(?:props|state)\s*;?[ \t]*\n?",
        )
        .expect("Invalid regex pattern")
    });

    pub static SET_STATE_OBJECT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bthis\.setState\(\s*\{([^{}]*)\}\s*\)").expect("Invalid regex pattern")
    });

    pub static THIS_PROPS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bthis\.(?:props|state)\.").expect("Invalid regex pattern"));

    pub static THIS_MEMBER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bthis\.").expect("Invalid regex pattern"));

    pub static ASSET_STRING: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r#"(["'])(?:\.{1,2}/)+(?:[^"'\s]*/)?([^/"'\s]+\.(?:png|jpe?g|gif|svg|webp|avif|ico|mp4|webm|mp3|wav|woff2?))["']"#,
        )
        .expect("Invalid regex pattern")
    });

    pub static ASSET_REQUIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r#"\brequire\(\s*["'](?:\.{1,2}/)+(?:[^"'\s]*/)?([^/"'\s]+\.(?:png|jpe?g|gif|svg|webp|avif|ico|mp4|webm|mp3|wav|woff2?))["']\s*\)"#,
        )
        .expect("Invalid regex pattern")
    });

    pub static ASSET_PATH: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:^|/)[^/]+\.(?:png|jpe?g|gif|svg|webp|avif|ico|mp4|webm|mp3|wav|woff2?)$")
            .expect("Invalid regex pattern")
    });

    pub static CLASS_NAME_VALUE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"className=(?:"([^"]*)"|'([^']*)')"#).expect("Invalid regex pattern")
    });
}

/// Anchors the rewrite optimizer looks for in generated TypeScript.
pub mod optimize {
    use super::*;

    pub static REACT_NAMED_IMPORT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^import (React, )?\{ ([^}]*) \} from 'react';$").expect("Invalid regex pattern")
    });

    pub static REACT_DEFAULT_IMPORT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^import React from 'react';$").expect("Invalid regex pattern"));

    pub static EXPORT_DEFAULT_IDENT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^export default ([A-Z][A-Za-z0-9_$]*);$").expect("Invalid regex pattern")
    });

    /// The component's own declaration, at column zero
    pub static COMPONENT_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^const [A-Z][A-Za-z0-9_$]* = ").expect("Invalid regex pattern")
    });

    /// First statement of the component body that may return early
    pub static BODY_EXIT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^  (?:if \(|return\b)").expect("Invalid regex pattern"));

    pub static HANDLER_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^  const ((?:handle|on)[A-Z][A-Za-z0-9_$]*) = ").expect("Invalid regex pattern")
    });

    pub static LOCAL_DECL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)^  const ([a-z_$][A-Za-z0-9_$]*) = ").expect("Invalid regex pattern")
    });

    pub static ARROW_HEAD: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:async\s+)?(?:\([^)]*\)|[A-Za-z_$][A-Za-z0-9_$]*)\s*=>").expect("Invalid regex pattern")
    });

    /// Collection derivations worth memoizing
    pub static DERIVATION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"\.(?:filter|map|reduce|sort|find|some|every|slice|flatMap|toSorted)\(|\bObject\.(?:keys|values|entries)\(",
        )
        .expect("Invalid regex pattern")
    });

    pub static JSX_TAG: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<(?:[A-Za-z]|>|/)").expect("Invalid regex pattern"));

    pub static MEDIA_TAG: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<(img|iframe|video)[\s/>]").expect("Invalid regex pattern"));
}

/// Patterns for scraping test runner and bundler output.
pub mod diagnostics {
    use super::*;

    pub static ANSI_ESCAPE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("Invalid regex pattern"));

    pub static FAILED_TEST: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"^\s*FAIL\s+\S+",
            r"^\s*[×✗✕]\s+.+",
            r"^\s*❯\s+\S+.*\(\d+\s+tests?\s*\|\s*\d+\s+failed",
            r"^\s*(?:Tests|Test Files)\s+\d+\s+failed",
            r"^\s*AssertionError:",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect()
    });

    pub static COMPILER_ERROR: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"\berror TS\d+:",
            r"^\S+\.(?:ts|tsx|js|jsx|mjs):\d+:\d+\s+-\s+error\b",
            r"^\s*\d+:\d+\s+error\s+\S",
            r"^\s*SyntaxError:",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect()
    });

    pub static BUNDLER_ERROR: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"^\s*error during build:",
            r"^\s*✘ \[ERROR\]",
            r"^\s*\[vite\].*\berror\b",
            r"\bRollupError\b",
            r"\bCould not resolve\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect()
    });

    pub static WARNING: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"^\s*\d+:\d+\s+warning\s+\S",
            r"^\s*\(!\)\s+\S",
            r"^\s*▲ \[WARNING\]",
            r"\bwarning TS\d+:",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect()
    });

    /// A vite build size row, e.g.
    /// `dist/assets/index-4f2a.js   143.36 kB │ gzip: 46.11 kB`
    pub static SIZE_ROW: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^\s*(\S+\.(?:js|mjs|cjs|css|html|wasm))\s+([\d.,]+)\s*(B|kB|KB|KiB|MB|MiB)\s*[│|]\s*gzip:\s*([\d.,]+)\s*(B|kB|KB|KiB|MB|MiB)",
        )
        .expect("Invalid regex pattern")
    });

    pub static COVERAGE_SUMMARY: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\s*All files\s*\|\s*([\d.]+)").expect("Invalid regex pattern")
    });
}
