//! Report formatting for the MovieLens reports.
//!
//! Turns ordered report rows into numbered tables with the report's column
//! names. Tables render as aligned plain text (`Display`) or JSON. Rows can
//! be limited or sampled for display; neither changes the computed values.

pub mod kpi_tables;
pub mod table;

pub use kpi_tables::{demographics_table, most_rated_table, report_tables, top_rated_table};
pub use table::{Cell, Row, Table, TableRow};
