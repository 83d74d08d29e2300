// src/extract/locate.rs
//
// Find the embedded object literal: marker substring, then the first '{'
// at or after the marker's end, then the balanced-brace span. Braces that
// occur inside string literals do not count toward the depth.

use crate::core::scan::{QuoteScanner, Scan};
use crate::error::{Error, Result};

/// Byte range of a brace-balanced object literal within a document.
/// `start` is the opening '{', `end` is one past the closing '}'.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiteralSpan {
    pub start: usize,
    pub end: usize,
}

impl LiteralSpan {
    pub fn slice<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }
}

/// Locate the literal assigned at `marker`. Pure function over the text;
/// the marker is caller-supplied so tests can run several side by side.
pub fn locate_literal(doc: &str, marker: &str) -> Result<LiteralSpan> {
    let at = doc
        .find(marker)
        .ok_or_else(|| Error::MarkerNotFound(s!(marker)))?;

    let after = at + marker.len();
    let open = doc[after..]
        .find('{')
        .map(|i| after + i)
        .ok_or(Error::ObjectStartNotFound)?;

    let mut scanner = QuoteScanner::new();
    let mut depth = 0i32;

    for (i, ch) in doc[open..].char_indices() {
        if scanner.step(ch) != Scan::Code {
            continue;
        }
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(LiteralSpan {
                        start: open,
                        end: open + i + ch.len_utf8(),
                    });
                }
            }
            _ => {}
        }
    }

    Err(Error::UnbalancedLiteral)
}
