//! In-memory tables with named, ordered columns.
//!
//! A table only arranges values that were already computed: it numbers
//! rows, names columns and optionally trims rows for display.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt;

/// One table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(u64),
    Decimal(f64),
    /// Unresolved join companion
    Missing,
}

impl Cell {
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Missing, |v| Cell::Text(v.to_string()))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => f.write_str(value),
            Cell::Count(value) => write!(f, "{value}"),
            Cell::Decimal(value) => write!(f, "{value:?}"),
            Cell::Missing => f.write_str("-"),
        }
    }
}

/// A value that can be laid out as one table row
pub trait TableRow {
    /// Column names, in order
    const COLUMNS: &'static [&'static str];

    /// One cell per column
    fn cells(&self) -> Vec<Cell>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// 1-based position in the full result
    pub number: usize,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Lay out `rows` in order, numbering them from 1
    pub fn from_rows<R: TableRow>(title: impl Into<String>, rows: &[R]) -> Self {
        Self {
            title: title.into(),
            columns: R::COLUMNS.to_vec(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(idx, row)| Row {
                    number: idx + 1,
                    cells: row.cells(),
                })
                .collect(),
        }
    }

    /// Keep a random subset of `n` rows for display.
    ///
    /// Kept rows retain their original numbers and relative order. A fixed
    /// `seed` makes the subset reproducible.
    pub fn sample(mut self, n: usize, seed: Option<u64>) -> Self {
        if n >= self.rows.len() {
            return self;
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut picked = rand::seq::index::sample(&mut rng, self.rows.len(), n).into_vec();
        picked.sort_unstable();

        let mut keep = picked.into_iter().peekable();
        self.rows = std::mem::take(&mut self.rows)
            .into_iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                if keep.peek() == Some(&idx) {
                    keep.next();
                    Some(row)
                } else {
                    None
                }
            })
            .collect();
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Column widths including the leading row-number column
    fn widths(&self) -> Vec<usize> {
        let number_width = self
            .rows
            .iter()
            .map(|r| r.number.to_string().len())
            .max()
            .unwrap_or(0)
            .max(1);

        let mut widths = vec![number_width];
        for (col, name) in self.columns.iter().enumerate() {
            let cell_width = self
                .rows
                .iter()
                .filter_map(|r| r.cells.get(col))
                .map(|c| c.to_string().chars().count())
                .max()
                .unwrap_or(0);
            widths.push(cell_width.max(name.chars().count()));
        }
        widths
    }
}

impl fmt::Display for Table {
    /// Plain-text rendering: header line, then one aligned line per row.
    /// Numbers are right-aligned, text left-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        write!(f, "{:>w$}", "", w = widths[0])?;
        for (name, w) in self.columns.iter().zip(&widths[1..]) {
            write!(f, "  {:<w$}", name, w = *w)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:>w$}", row.number, w = widths[0])?;
            for (cell, w) in row.cells.iter().zip(&widths[1..]) {
                match cell {
                    Cell::Count(_) | Cell::Decimal(_) => write!(f, "  {:>w$}", cell.to_string(), w = *w)?,
                    _ => write!(f, "  {:<w$}", cell.to_string(), w = *w)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
