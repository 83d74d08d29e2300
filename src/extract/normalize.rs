// src/extract/normalize.rs
//
// Rewrite a JS object literal into strict JSON. Four passes, fixed order:
//
//   1. quote_bare_keys:        days:       → "days":
//   2. convert_single_quotes:  'text "x"'  → "text \"x\""
//   3. strip_call_wrappers:    A.b( ... )  → ...
//   4. remove_trailing_commas: [1,2,]      → [1,2]
//
// Every pass drives the shared QuoteScanner, so structural characters are
// only interpreted outside string literals. The composed pipeline is
// idempotent: run on its own output it changes nothing. Input that still
// fails strict decoding after these passes is not repaired further.

use crate::core::scan::{QuoteScanner, Scan};

/// Full pipeline. Output is ready for the strict decoder.
pub fn normalize_literal(js: &str) -> String {
    let s = quote_bare_keys(js);
    let s = convert_single_quotes(&s);
    let s = strip_call_wrappers(&s);
    remove_trailing_commas(&s)
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Pass 1: wrap bare identifier keys in double quotes.
///
/// A key is an identifier whose previous emitted non-whitespace character
/// is '{' or ',' and whose next non-whitespace character is ':'. The
/// whitespace between identifier and colon is dropped with the rewrite.
/// Already-quoted keys are string content and pass through untouched.
fn quote_bare_keys(js: &str) -> String {
    let src: Vec<char> = js.chars().collect();
    let mut out = String::with_capacity(js.len() + 16);
    let mut scanner = QuoteScanner::new();

    // last emitted non-whitespace character
    let mut prev = None::<char>;

    let mut i = 0usize;
    while i < src.len() {
        let ch = src[i];

        if !scanner.in_string()
            && is_ident_start(ch)
            && matches!(prev, Some('{') | Some(','))
        {
            let mut k = i + 1;
            while k < src.len() && is_ident_continue(src[k]) {
                k += 1;
            }
            let mut m = k;
            while m < src.len() && src[m].is_whitespace() {
                m += 1;
            }
            if m < src.len() && src[m] == ':' {
                out.push('"');
                out.extend(&src[i..k]);
                out.push_str("\":");
                prev = Some(':');
                // identifier, whitespace and colon contain no quotes,
                // so the scanner state is unaffected by the skip
                i = m + 1;
                continue;
            }
        }

        scanner.step(ch);
        out.push(ch);
        if !ch.is_whitespace() {
            prev = Some(ch);
        }
        i += 1;
    }

    out
}

/// Pass 2: single-quoted string literals become double-quoted.
///
/// A literal '"' inside a single-quoted string gains a backslash so the
/// result stays valid. Double-quoted strings and their escape sequences
/// pass through byte-for-byte.
fn convert_single_quotes(js: &str) -> String {
    let mut out = String::with_capacity(js.len());
    let mut scanner = QuoteScanner::new();

    for ch in js.chars() {
        match scanner.step(ch) {
            Scan::Open('\'') | Scan::Close('\'') => out.push('"'),
            Scan::Inside { escaped: false }
                if ch == '"' && scanner.quote_char() == Some('\'') =>
            {
                out.push_str("\\\"");
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Pass 3: drop `Ident.Ident( ... )` call wrappers, keeping the inner text.
///
/// The original documents wrap payloads in Object.freeze(...); any
/// dotted-call shape is handled the same way. Parenthesis depth is tracked
/// with strings skipped, so ')' inside a string never closes a wrapper.
/// Nested wrappers are stripped in this same pass.
fn strip_call_wrappers(js: &str) -> String {
    let src: Vec<char> = js.chars().collect();
    let mut out = String::with_capacity(js.len());
    let mut scanner = QuoteScanner::new();

    // unquoted '(' nesting depth, and the depths owned by dropped wrappers
    let mut depth = 0i32;
    let mut wrapper_at: Vec<i32> = Vec::new();

    let mut i = 0usize;
    while i < src.len() {
        let ch = src[i];

        if !scanner.in_string() {
            if let Some(past_open) = match_wrapper_open(&src, i) {
                depth += 1;
                wrapper_at.push(depth);
                i = past_open;
                continue;
            }
            if ch == '(' {
                depth += 1;
                out.push(ch);
                i += 1;
                continue;
            }
            if ch == ')' {
                if wrapper_at.last() == Some(&depth) {
                    wrapper_at.pop();
                } else {
                    out.push(ch);
                }
                depth -= 1;
                i += 1;
                continue;
            }
        }

        scanner.step(ch);
        out.push(ch);
        i += 1;
    }

    out
}

/// `Ident.Ident(` starting at `i`, not preceded by an identifier character
/// or '.'. Returns the index just past the '('.
fn match_wrapper_open(src: &[char], i: usize) -> Option<usize> {
    if !is_ident_start(src[i]) {
        return None;
    }
    if i > 0 && (is_ident_continue(src[i - 1]) || src[i - 1] == '.') {
        return None;
    }

    let mut k = i + 1;
    while k < src.len() && is_ident_continue(src[k]) {
        k += 1;
    }
    if k >= src.len() || src[k] != '.' {
        return None;
    }
    k += 1;
    if k >= src.len() || !is_ident_start(src[k]) {
        return None;
    }
    k += 1;
    while k < src.len() && is_ident_continue(src[k]) {
        k += 1;
    }
    if k < src.len() && src[k] == '(' {
        Some(k + 1)
    } else {
        None
    }
}

/// Pass 4: delete a comma whose next non-whitespace character is '}' or ']'.
fn remove_trailing_commas(js: &str) -> String {
    let src: Vec<char> = js.chars().collect();
    let mut out = String::with_capacity(js.len());
    let mut scanner = QuoteScanner::new();

    let mut i = 0usize;
    while i < src.len() {
        let ch = src[i];

        if !scanner.in_string() && ch == ',' {
            let mut j = i + 1;
            while j < src.len() && src[j].is_whitespace() {
                j += 1;
            }
            if j < src.len() && (src[j] == '}' || src[j] == ']') {
                i += 1; // drop the comma, keep the whitespace
                continue;
            }
        }

        scanner.step(ch);
        out.push(ch);
        i += 1;
    }

    out
}
