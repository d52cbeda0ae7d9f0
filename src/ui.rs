//! Terminal output helpers.
//!
//! [`ModuleTable`] prints the aggregated modules as a box-drawn table sized to
//! the terminal; [`warn`] and [`fail`] format per-module diagnostics the same
//! way across commands.

use crate::error::GenError;
use crate::module::{Category, Module};
use crate::paths;
use colored::*;
use std::path::Path;

const HEADERS: [&str; 6] = ["Module", "Directory", "Sources", "Headers", "Assets", "Forms"];

/// Narrowest a text column is squeezed to when the terminal is small.
const MIN_TEXT_WIDTH: usize = 10;

pub struct ModuleTable {
    rows: Vec<[String; 6]>,
}

impl ModuleTable {
    /// One row per module; directories are shown relative to `root`.
    pub fn new(modules: &[Module], root: &Path) -> Self {
        let rows = modules
            .iter()
            .map(|m| {
                let dir = paths::to_slash(&paths::relative_dir(root, &m.base_path));
                let mut row = [
                    m.name.clone(),
                    dir,
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ];
                for (i, category) in Category::ALL.iter().enumerate() {
                    row[i + 2] = m.files(*category).len().to_string();
                }
                row
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths fitted to `max_width`, shrinking the two text columns
    /// (name, directory) first.
    fn column_widths(&self, max_width: usize) -> [usize; 6] {
        let mut widths = HEADERS.map(|h| h.len());
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(console::measure_text_width(cell));
            }
        }

        // "│ " per column plus the closing border and two spaces of indent.
        let overhead = 3 * widths.len() + 3;
        while overhead + widths.iter().sum::<usize>() > max_width {
            let widest = if widths[0] >= widths[1] { 0 } else { 1 };
            if widths[widest] <= MIN_TEXT_WIDTH {
                break;
            }
            widths[widest] -= 1;
        }
        widths
    }

    pub fn render(&self, max_width: usize) -> String {
        let widths = self.column_widths(max_width);
        let line = |left: &str, mid: &str, right: &str| {
            let segs: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}\n", left, segs.join(mid), right)
        };

        let mut out = line("┌", "┬", "┐");
        out.push_str("  │");
        for (h, w) in HEADERS.iter().zip(widths.iter()) {
            out.push_str(&format!(" {} {}│", h.bold(), " ".repeat(w - h.len())));
        }
        out.push('\n');
        out.push_str(&line("├", "┼", "┤"));

        for row in &self.rows {
            out.push_str("  │");
            for (i, (cell, w)) in row.iter().zip(widths.iter()).enumerate() {
                let shown = console::truncate_str(cell, *w, "...");
                let pad = w.saturating_sub(console::measure_text_width(&shown));
                if i >= 2 {
                    // Counts are right-aligned.
                    out.push_str(&format!(" {}{} │", " ".repeat(pad), shown));
                } else {
                    out.push_str(&format!(" {}{} │", shown, " ".repeat(pad)));
                }
            }
            out.push('\n');
        }
        out.push_str(&line("└", "┴", "┘"));
        out
    }

    pub fn print(&self) {
        let (_, cols) = console::Term::stdout().size();
        print!("{}", self.render(cols as usize));
    }
}

pub fn warn(err: &GenError) {
    eprintln!("   {} {}", "!".yellow(), err);
}

pub fn fail(err: &GenError) {
    eprintln!("{} {}", "x".red(), err);
}
