//! # Table
//!
//! ```text
//! Name  | Amount (quantity) | ID | Actions
//! ------+-------------------+----+---------------
//! Rice  | 10                | c1 | {edit} <delete>
//! ```
//! With no rows, a single line holding the empty message follows the rule.

use super::{pad, width};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown when there are no rows.
    pub empty_message: String,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            ..Default::default()
        }
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(width(cell));
                }
            }
        }
        widths
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let cols: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad(cells.get(i).map(String::as_str).unwrap_or(""), *w))
            .collect();
        cols.join(" | ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = vec![Self::line(&self.headers, &widths)];
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );

        if self.rows.is_empty() {
            lines.push(self.empty_message.clone());
        } else {
            lines.extend(self.rows.iter().map(|row| Self::line(row, &widths)));
        }
        lines.join("\n")
    }
}
