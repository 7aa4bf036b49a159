//! Display-width helpers for laying out palette and help rows.

use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "…";
const ELLIPSIS_WIDTH: usize = 1;

/// Terminal column width of `s`. Key glyphs like `⌘` count as one column.
pub(super) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, ending with `…` when cut.
pub(super) fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let target = max_width.saturating_sub(ELLIPSIS_WIDTH);
    let mut width = 0;
    let mut byte_end = 0;
    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > target {
            break;
        }
        width += char_width;
        byte_end = idx + c.len_utf8();
    }
    Cow::Owned(format!("{}{}", &s[..byte_end], ELLIPSIS))
}

/// Lay out `left` and `right` on one line of `width` columns, with `right`
/// flush against the right edge. `left` is truncated first.
pub(super) fn justify(left: &str, right: &str, width: usize) -> String {
    let right_width = display_width(right);
    if right_width == 0 {
        return truncate_to_width(left, width).into_owned();
    }
    let room = width.saturating_sub(right_width + 1);
    let left = truncate_to_width(left, room);
    let gap = width.saturating_sub(display_width(&left) + right_width).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}
