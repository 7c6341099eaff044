//! Side-by-side zone layout
//!
//! Each zone occupies a fixed 4-column block; zones sit next to each other
//! in ascending key order under two header rows (zone label, column titles).
//! Shorter zones are padded with empty cells so the grid stays rectangular.

use crate::types::{BidRow, Cell, Grid};
use std::collections::BTreeMap;

/// Columns per zone block
pub const ZONE_COLUMNS: usize = 4;

/// Header rows preceding the data rows
pub const HEADER_ROWS: usize = 2;

/// Fixed column titles of every zone block
pub const COLUMN_TITLES: [&str; ZONE_COLUMNS] = ["순위", "회사명", "입찰금액(억)", "예가대비(%)"];

/// Decimal places kept for published amounts
pub const AMOUNT_DECIMALS: u32 = 2;

/// Decimal places kept for published ratios
pub const RATIO_DECIMALS: u32 = 4;

/// Round half away from zero to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Assemble the per-zone row lists into one side-by-side grid.
///
/// Every row of the result is exactly `ZONE_COLUMNS * zones.len()` cells
/// wide, padded rows included. The BTreeMap keys provide the ascending
/// lexicographic zone order.
pub fn assemble(zones: &BTreeMap<String, Vec<BidRow>>) -> Grid {
    let mut grid = Grid::new();
    if zones.is_empty() {
        return grid;
    }

    let width = ZONE_COLUMNS * zones.len();
    let max_rows = zones.values().map(|rows| rows.len()).max().unwrap_or(0);

    // Header row 1: zone label in the block's first column only
    let mut label_row = Vec::with_capacity(width);
    for zone in zones.keys() {
        label_row.push(Cell::text(zone.clone()));
        label_row.extend(vec![Cell::Empty; ZONE_COLUMNS - 1]);
    }
    grid.push_row(label_row);

    // Header row 2: column titles for every block
    let mut title_row = Vec::with_capacity(width);
    for _ in zones.keys() {
        title_row.extend(COLUMN_TITLES.iter().map(|t| Cell::text(*t)));
    }
    grid.push_row(title_row);

    // Data rows, padded per zone
    for i in 0..max_rows {
        let mut row = Vec::with_capacity(width);
        for rows in zones.values() {
            match rows.get(i) {
                Some(bid) => {
                    row.push(Cell::Number(bid.rank as f64));
                    row.push(Cell::text(bid.company.clone()));
                    row.push(Cell::Number(round_to(bid.amount, AMOUNT_DECIMALS)));
                    row.push(Cell::Number(round_to(bid.ratio, RATIO_DECIMALS)));
                }
                None => row.extend(vec![Cell::Empty; ZONE_COLUMNS]),
            }
        }
        grid.push_row(row);
    }

    grid
}
