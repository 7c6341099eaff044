//! Bid-result table extraction
//!
//! Source sheets are loosely structured .xlsb files read without any header
//! interpretation. The data table starts at the row whose first cell is the
//! literal marker "순위"; columns are addressed by fixed 0-based offsets.

use crate::error::{BidError, BidResult};
use crate::types::BidRow;
use calamine::{open_workbook, Data, Range, Reader, Xlsb};
use std::path::Path;

/// Header token marking the start of the data table
pub const TABLE_MARKER: &str = "순위";

/// Glyph prepended to the rank-1 company
pub const LEAD_BIDDER_MARKER: &str = "★";

// Fixed positional schema of the source table. Column 3 is unused by the
// source format; the gap is part of the contract.
pub const COL_RANK: u32 = 0;
pub const COL_COMPANY: u32 = 1;
pub const COL_AMOUNT: u32 = 2;
pub const COL_RATIO: u32 = 4;

/// Divisor turning raw amounts into 억원
const AMOUNT_UNIT: f64 = 1e8;

/// Read the first worksheet of an .xlsb file and parse its bid table
pub fn read_bid_file(path: &Path) -> BidResult<Vec<BidRow>> {
    Ok(parse_bid_table(&read_sheet_range(path)?))
}

/// Raw cell range of the first worksheet of an .xlsb file
pub fn read_sheet_range(path: &Path) -> BidResult<Range<Data>> {
    let mut workbook: Xlsb<_> = open_workbook(path)
        .map_err(|e| BidError::Spreadsheet(format!("Failed to open '{}': {}", path.display(), e)))?;

    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BidError::Spreadsheet(format!("'{}' has no worksheets", path.display())))?
        .map_err(|e| BidError::Spreadsheet(format!("Failed to read '{}': {}", path.display(), e)))
}

/// Extract the bid rows below the "순위" marker, sorted ascending by rank.
///
/// A missing marker yields an empty result, not an error. A blank rank cell
/// ends the table; a non-numeric rank skips only that row.
pub fn parse_bid_table(range: &Range<Data>) -> Vec<BidRow> {
    let Some((end_row, _)) = range.end() else {
        return Vec::new();
    };
    let start_row = range.start().map(|(r, _)| r).unwrap_or(0);

    let mut marker_row = None;
    for row in start_row..=end_row {
        if let Some(cell) = range.get_value((row, COL_RANK)) {
            if cell_text(cell).replace(' ', "") == TABLE_MARKER {
                marker_row = Some(row);
                break;
            }
        }
    }
    let Some(marker_row) = marker_row else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for row in (marker_row + 1)..=end_row {
        let rank_cell = range.get_value((row, COL_RANK)).unwrap_or(&Data::Empty);
        let rank_text = cell_text(rank_cell);
        let rank_text = rank_text.trim();
        if rank_text.is_empty() {
            // Blank rank is the end-of-table sentinel
            break;
        }
        if !rank_text.chars().all(|c| c.is_ascii_digit()) {
            continue; // malformed row tolerance
        }
        let Ok(rank) = rank_text.parse::<u32>() else {
            continue;
        };

        let company = range
            .get_value((row, COL_COMPANY))
            .map(cell_text)
            .unwrap_or_default();
        let company = company.trim();
        if company.is_empty() {
            continue;
        }

        let Some(amount) = range.get_value((row, COL_AMOUNT)).and_then(cell_number) else {
            continue;
        };
        let Some(ratio) = range.get_value((row, COL_RATIO)).and_then(cell_number) else {
            continue;
        };

        let company = if rank == 1 {
            format!("{} {}", LEAD_BIDDER_MARKER, company)
        } else {
            company.to_string()
        };

        rows.push(BidRow {
            rank,
            company,
            amount: amount / AMOUNT_UNIT,
            ratio: ratio * 100.0,
        });
    }

    // Stable: equal ranks keep encounter order
    rows.sort_by_key(|r| r.rank);
    rows
}

/// String form of a cell; whole floats render without a fraction
pub fn cell_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Numeric form of a cell, if it has one
fn cell_number(data: &Data) -> Option<f64> {
    match data {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet(cells: Vec<(u32, u32, Data)>) -> Range<Data> {
        let max_row = cells.iter().map(|(r, _, _)| *r).max().unwrap_or(0);
        let max_col = cells.iter().map(|(_, c, _)| *c).max().unwrap_or(0).max(COL_RATIO);
        let mut range = Range::new((0, 0), (max_row, max_col));
        for (row, col, value) in cells {
            range.set_value((row, col), value);
        }
        range
    }

    fn data_row(row: u32, rank: Data, company: &str, amount: f64, ratio: f64) -> Vec<(u32, u32, Data)> {
        vec![
            (row, COL_RANK, rank),
            (row, COL_COMPANY, Data::String(company.to_string())),
            (row, COL_AMOUNT, Data::Float(amount)),
            (row, COL_RATIO, Data::Float(ratio)),
        ]
    }

    #[test]
    fn test_no_marker_yields_no_rows() {
        let range = sheet(vec![(0, 0, Data::String("입찰결과".to_string()))]);
        assert!(parse_bid_table(&range).is_empty());
    }

    #[test]
    fn test_rows_before_marker_are_ignored() {
        // A valid-looking data row sits above the marker; it must not leak
        let mut cells = data_row(2, Data::Float(1.0), "유령건설", 5e9, 0.9);
        cells.push((4, COL_RANK, Data::String("순 위".to_string())));
        cells.extend(data_row(5, Data::Float(1.0), "A건설", 1.2e10, 0.985));

        let rows = parse_bid_table(&sheet(cells));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "★ A건설");
    }

    #[test]
    fn test_end_to_end_example_row() {
        // Marker at row 5, one data row [1, " A건설 ", 12000000000, _, 0.985]
        let mut cells = vec![(5, COL_RANK, Data::String("순위".to_string()))];
        cells.extend(data_row(6, Data::Float(1.0), " A건설 ", 12_000_000_000.0, 0.985));

        let rows = parse_bid_table(&sheet(cells));
        assert_eq!(
            rows,
            vec![BidRow {
                rank: 1,
                company: "★ A건설".to_string(),
                amount: 120.0,
                ratio: 98.5,
            }]
        );
    }

    #[test]
    fn test_blank_rank_stops_scan() {
        let mut cells = vec![(0, COL_RANK, Data::String("순위".to_string()))];
        cells.extend(data_row(1, Data::Float(1.0), "A건설", 1e9, 0.9));
        // Row 2 has a blank rank; row 3 looks valid but must never be reached
        cells.extend(data_row(3, Data::Float(2.0), "B건설", 1e9, 0.9));

        let rows = parse_bid_table(&sheet(cells));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 1);
    }

    #[test]
    fn test_non_numeric_rank_skips_row_only() {
        let mut cells = vec![(0, COL_RANK, Data::String("순위".to_string()))];
        cells.extend(data_row(1, Data::String("합계".to_string()), "소계", 1e9, 0.9));
        cells.extend(data_row(2, Data::Float(2.0), "B건설", 1e9, 0.91));

        let rows = parse_bid_table(&sheet(cells));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "B건설");
    }

    #[test]
    fn test_missing_amount_or_company_skips_row() {
        let mut cells = vec![(0, COL_RANK, Data::String("순위".to_string()))];
        // No company
        cells.push((1, COL_RANK, Data::Float(1.0)));
        cells.push((1, COL_AMOUNT, Data::Float(1e9)));
        cells.push((1, COL_RATIO, Data::Float(0.9)));
        // Amount is text garbage
        cells.push((2, COL_RANK, Data::Float(2.0)));
        cells.push((2, COL_COMPANY, Data::String("B건설".to_string())));
        cells.push((2, COL_AMOUNT, Data::String("낙찰".to_string())));
        cells.push((2, COL_RATIO, Data::Float(0.9)));
        // Fine
        cells.extend(data_row(3, Data::Float(3.0), "C건설", 2e9, 0.92));

        let rows = parse_bid_table(&sheet(cells));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 3);
    }

    #[test]
    fn test_rows_sorted_by_rank() {
        let mut cells = vec![(0, COL_RANK, Data::String("순위".to_string()))];
        cells.extend(data_row(1, Data::Float(3.0), "C건설", 1e9, 0.93));
        cells.extend(data_row(2, Data::Float(1.0), "A건설", 1e9, 0.91));
        cells.extend(data_row(3, Data::Float(2.0), "B건설", 1e9, 0.92));

        let ranks: Vec<u32> = parse_bid_table(&sheet(cells)).iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_string_rank_and_numeric_text_amount() {
        let mut cells = vec![(0, COL_RANK, Data::String("순위".to_string()))];
        cells.push((1, COL_RANK, Data::String(" 2 ".to_string())));
        cells.push((1, COL_COMPANY, Data::String("D건설".to_string())));
        cells.push((1, COL_AMOUNT, Data::String("1,000,000,000".to_string())));
        cells.push((1, COL_RATIO, Data::Float(0.95)));

        let rows = parse_bid_table(&sheet(cells));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, 10.0);
        assert_eq!(rows[0].company, "D건설"); // no marker for rank 2
    }

    #[test]
    fn test_cell_text_renders_whole_floats_without_fraction() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(3.5)), "3.5");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
