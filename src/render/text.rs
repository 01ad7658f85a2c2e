//! Text measurement for console rows.
//!
//! Wrapped text is broken greedily at spaces, honours `\n`, and splits words
//! wider than the row. Indentation and runs of spaces inside a row are kept;
//! the spaces at a break are not. Unwrapped text is a single row: the first line only,
//! cut with an ellipsis when anything is hidden.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::console::Alignment;

pub const ELLIPSIS: char = '…';

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Break `text` into the rows it occupies at `width` columns.
///
/// Always returns at least one row, even for empty text.
pub fn layout_lines(text: &str, width: u16, wrap: bool) -> Vec<String> {
    let width = usize::from(width);
    if width == 0 {
        return vec![String::new()];
    }
    if !wrap {
        return vec![single_line(text, width)];
    }
    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, width))
        .collect()
}

/// Rows `text` occupies at `width` columns.
pub fn measure_rows(text: &str, width: u16, wrap: bool) -> u16 {
    if width == 0 {
        return 0;
    }
    if !wrap {
        return 1;
    }
    u16::try_from(layout_lines(text, width, wrap).len()).unwrap_or(u16::MAX)
}

/// Column offset of a row of `line_width` columns inside `width`.
pub fn line_offset(line_width: usize, width: u16, alignment: Alignment) -> u16 {
    let free = usize::from(width).saturating_sub(line_width);
    let offset = match alignment {
        Alignment::Left => 0,
        Alignment::Center => free / 2,
        Alignment::Right => free,
    };
    u16::try_from(offset).unwrap_or(width)
}

fn single_line(text: &str, width: usize) -> String {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let hidden = text.contains('\n') && !rest.is_empty();
    if !hidden && display_width(first) <= width {
        return first.to_string();
    }
    let mut out = take_columns(first, width - 1);
    out.push(ELLIPSIS);
    out
}

fn take_columns(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

fn wrap_paragraph(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    // Spaces seen since the last word. At the start of the paragraph this is
    // the indentation.
    let mut gap = "";

    for run in space_runs(paragraph) {
        if run.starts_with(' ') {
            gap = run;
            continue;
        }
        let word_width = display_width(run);
        let gap_width = gap.len();
        let row_open = current_width > 0 || lines.is_empty();
        if row_open && current_width + gap_width + word_width <= width {
            current.push_str(gap);
            current.push_str(run);
            current_width += gap_width + word_width;
            gap = "";
            continue;
        }
        // The gap at a break is dropped.
        gap = "";
        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(run);
            current_width = word_width;
            continue;
        }
        // Hard-break a word wider than the row.
        for ch in run.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if current_width > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Maximal runs of spaces and of everything else, in order.
fn space_runs(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let spaces = first == ' ';
        let end = rest
            .find(|c: char| (c == ' ') != spaces)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}
