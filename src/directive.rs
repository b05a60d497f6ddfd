//! Directive scanning.
//!
//! A directive is a line-leading `#include <NAME>`:
//!
//! ```text
//! #include<WS>+<NAME>
//! ```
//!
//! The pattern is `^#include\s+<(.*?)>` in multi-line mode. Whitespace is the
//! ASCII set (space, tab, newline, vertical tab, form feed, carriage return),
//! so a directive may span a line break between `#include` and `<`. The name
//! is everything up to the nearest `>` on the same line, taken verbatim.
//! Anything after the closing `>` is not part of the directive.
//!
//! Lines end at `\n`, `\r` or `\r\n`. The Unicode separators U+0085,
//! U+2028 and U+2029 are ordinary characters here, so a directive following
//! one of them on the same line is not recognized.
//!
//! Scanning works on raw bytes. Sources are expected to be UTF-8, but bytes
//! that don't decode are left alone rather than rejected.

use regex::bytes::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `m`: `^` matches at every line start. `R`: `\r`, `\n` and `\r\n` all end a
/// line, and `.` stops at any of them.
static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^#include(?-u:\s)+<(.*?)>").expect("directive pattern is valid")
});

/// One `#include` occurrence in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'t> {
    /// Full matched text, from the `#` through the closing `>`.
    pub literal: &'t [u8],
    /// Text between `<` and `>`.
    pub name: Cow<'t, str>,
    /// Byte offset of the `#` in the source.
    pub offset: usize,
}

/// Find every directive in `text`, in source order.
pub fn scan(text: &[u8]) -> Vec<Directive<'_>> {
    INCLUDE_DIRECTIVE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(Directive {
                literal: whole.as_bytes(),
                name: String::from_utf8_lossy(name.as_bytes()),
                offset: whole.start(),
            })
        })
        .collect()
}
