//! placeholder.rs
//!
//! The dashboard tables. No analytics feed them yet, so every value cell is "Empty".

use serde::Serialize;

pub const EMPTY_CELL: &str = "Empty";

const SQUEEZE_COLUMNS: [&str; 8] = [
    "Compression",
    "Total Squeezes",
    "Fired Long",
    "Fired Short",
    "Avg Length of Squeeze",
    "Avg Move Length",
    "Avg Move %",
    "% Fire w/ Trend",
];
const SQUEEZE_ROWS: [&str; 3] = ["Red Squeeze", "Black Squeeze", "Total"];

const FUNDAMENTAL_COLUMNS: [&str; 10] = [
    "% Change (3 Years)",
    "% Change (1 Year)",
    "% Change (3 Months)",
    "% Change (1 Month)",
    "% Change (10 Days)",
    "EPS Growth (Quarterly)",
    "EPS Growth (Annual)",
    "Revenue Growth (Quarterly)",
    "Revenue Growth (Annual)",
    "Upcoming Earnings Date",
];

const OPTIONS_COLUMNS: [&str; 5] = [
    "Implied Volatility",
    "Liquidity",
    "Short Interest",
    "Days to Cover",
    "Total Open Interest",
];

/// frontend table: a header row plus rows of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PlaceholderTable {
    /// Squeeze stats; the first column names the compression type
    pub fn squeeze() -> Self {
        let rows = SQUEEZE_ROWS
            .iter()
            .map(|label| {
                let mut row = vec![label.to_string()];
                row.extend(std::iter::repeat(EMPTY_CELL.to_string()).take(SQUEEZE_COLUMNS.len() - 1));
                row
            })
            .collect();
        PlaceholderTable {
            title: "Squeeze Data".to_string(),
            columns: SQUEEZE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn fundamental() -> Self {
        PlaceholderTable::single_empty_row("Fundamental Analysis", &FUNDAMENTAL_COLUMNS)
    }

    pub fn options() -> Self {
        PlaceholderTable::single_empty_row("Options & Interest Data", &OPTIONS_COLUMNS)
    }

    /// all three, in page order
    pub fn all() -> Vec<PlaceholderTable> {
        vec![PlaceholderTable::squeeze(), PlaceholderTable::fundamental(), PlaceholderTable::options()]
    }

    fn single_empty_row(title: &str, columns: &[&str]) -> Self {
        PlaceholderTable {
            title: title.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: vec![vec![EMPTY_CELL.to_string(); columns.len()]],
        }
    }
}
