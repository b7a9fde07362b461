/// Console formatting module - Pure rendering concerns
///
/// This module handles the fixed-width text primitives shared by every report:
/// - Column-aligned tables with a dashed divider row
/// - Section banners around a host range
/// - Padding by display width
///
/// Everything here returns a `String`; writing to a sink is left to the caller
/// so a block is either emitted whole or not at all.
use unicode_width::UnicodeWidthStr;

/// A table of named columns and rows of preformatted cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Create a table with the given column titles
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self { columns: columns.iter().map(|c| c.as_ref().to_string()).collect(), rows: Vec::new() }
    }

    /// Append a row; missing cells render empty, extra cells are dropped
    pub fn add_row(&mut self, cells: Vec<String>) {
        let mut cells = cells;
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of each column: the widest of its title and cells
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, title)| {
                self.rows.iter().map(|row| display_width(&row[i])).fold(display_width(title), usize::max)
            })
            .collect()
    }

    /// Render with every line prefixed by `indent` spaces.
    ///
    /// Each cell is padded to its column width and followed by one space, so
    /// every line carries a trailing space.
    pub fn format(&self, indent: usize) -> String {
        let widths = self.widths();
        let margin = " ".repeat(indent);
        let mut output = String::new();

        let dividers: Vec<String> = self.columns.iter().map(|c| "-".repeat(display_width(c))).collect();
        for line in std::iter::once(&self.columns).chain(std::iter::once(&dividers)).chain(self.rows.iter()) {
            output.push_str(&margin);
            for (cell, width) in line.iter().zip(&widths) {
                output.push_str(&pad_to_width(cell, *width));
                output.push(' ');
            }
            output.push('\n');
        }
        output
    }
}

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad with trailing spaces to reach `width`; longer text is left intact
pub fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(padding))
}

/// Section banner: the title between two dashed rules of the same width
pub fn format_title_banner(title: &str) -> String {
    let rule = "-".repeat(display_width(title));
    format!("{}\n{}\n{}\n", rule, title, rule)
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
