//! Fixed-width line layout for the help-file format.

use std::sync::LazyLock;

use regex::Regex;

/// Lines that hold a single block delimiter surrounded only by whitespace.
static DELIMITER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*([<>])[ \t]*$").unwrap());

/// Write `repeat` for the full column width, followed by a newline.
pub(crate) fn write_rule(out: &mut String, repeat: &str, cols: usize) {
    out.push_str(&repeat.repeat(cols));
    out.push('\n');
}

/// Write `left` and `right` on one line with `right` right-justified against
/// the column width.
///
/// `trim` widens the padding budget to compensate for marker characters that
/// are counted in `right` but carry no visual width for alignment purposes
/// (the `*`/`|` pair around a tag). Padding never drops below one space.
pub(crate) fn write_straddle(out: &mut String, left: &str, right: &str, cols: usize, trim: usize) {
    let padding = (cols + trim).saturating_sub(left.len() + right.len()).max(1);
    out.push_str(left);
    out.push_str(&" ".repeat(padding));
    out.push_str(right);
    out.push('\n');
}

/// Reindent a block of text to the tab width.
///
/// Every non-empty line is prefixed with `tabs` spaces, except the first
/// line, which is prefixed with `max(tabs - trim, 0)` spaces so that it
/// aligns under an inline marker of length `trim` the caller has already
/// written. Empty lines are dropped entirely.
pub(crate) fn indent_block(out: &mut String, text: &str, tabs: usize, trim: usize) {
    for (index, line) in text.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let width = if index == 0 { tabs.saturating_sub(trim) } else { tabs };
        out.push_str(&" ".repeat(width));
        out.push_str(line);
        out.push('\n');
    }
}

/// Strip the indentation the block formatter leaves around `>`/`<` delimiter
/// lines, so the help viewer's syntax folding recognizes them. Idempotent: a
/// bare delimiter line rewrites to itself.
pub(crate) fn fix_block_delimiters(input: &str) -> String {
    DELIMITER_LINE.replace_all(input, "$1").into_owned()
}
