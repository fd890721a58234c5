//! Table layouts for the three reports.

use crate::table::{Cell, Table, TableRow};
use pipeline::{DemographicRating, KpiReports, MostRatedMovie, TopRatedMovie};

impl TableRow for MostRatedMovie {
    const COLUMNS: &'static [&'static str] = &["Movie Name", "No. of Ratings"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::text(self.title.as_deref()), Cell::Count(self.ratings)]
    }
}

impl TableRow for TopRatedMovie {
    const COLUMNS: &'static [&'static str] = &["Movie", "Average Ratings"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::text(self.title.as_deref()), Cell::Decimal(self.average)]
    }
}

impl TableRow for DemographicRating {
    const COLUMNS: &'static [&'static str] = &["AgeGroup", "Occupation", "Genre", "Avg.Rating"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.age_group.map(|g| g.label())),
            Cell::text(self.occupation.as_deref()),
            Cell::text(self.genre.as_deref()),
            Cell::Decimal(self.average),
        ]
    }
}

pub fn most_rated_table(rows: &[MostRatedMovie]) -> Table {
    Table::from_rows("Most rated movies", rows)
}

pub fn top_rated_table(rows: &[TopRatedMovie]) -> Table {
    Table::from_rows("Top rated movies", rows)
}

pub fn demographics_table(rows: &[DemographicRating]) -> Table {
    Table::from_rows("Average rating by age group, occupation and genre", rows)
}

/// All three tables in report order
pub fn report_tables(reports: &KpiReports) -> Vec<Table> {
    vec![
        most_rated_table(&reports.most_rated),
        top_rated_table(&reports.top_rated),
        demographics_table(&reports.demographics),
    ]
}
