//! Final board composition
//!
//! Stacks the title row, the side-by-side zone layout and the group summary
//! into one rectangular grid, and collects the style batch (header fills,
//! bold rows, per-company group colors) in application order.

use crate::aggregate;
use crate::colormap::ColorMap;
use crate::layout::{self, HEADER_ROWS, ZONE_COLUMNS};
use crate::matcher;
use crate::types::{BidRow, Cell, CellRect, CellStyle, Grid, GroupKey, Rgb, StyleBatch, StyleOp};
use chrono::Local;
use std::collections::BTreeMap;

/// Title of the published board
pub const REPORT_TITLE: &str = "입찰 결과 요약 정리";

/// Fill behind the zone label header row
pub const HEADER_FILL: Rgb = Rgb::new(0xD9, 0xD9, 0xD9);

/// The assembled payload handed to a publisher
#[derive(Debug, Clone)]
pub struct Report {
    pub grid: Grid,
    pub styles: StyleBatch,
}

/// Build the board with the current wall-clock update stamp
pub fn build(zones: &BTreeMap<String, Vec<BidRow>>, colors: &ColorMap) -> Report {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    build_with_timestamp(zones, colors, &stamp)
}

/// Build the board with an explicit timestamp (separated for testability)
pub fn build_with_timestamp(
    zones: &BTreeMap<String, Vec<BidRow>>,
    colors: &ColorMap,
    timestamp: &str,
) -> Report {
    let layout_grid = layout::assemble(zones);
    let summary = aggregate::summarize(zones, colors);
    let width = layout_grid.width().max(summary.width()).max(2);

    let mut grid = Grid::new();
    let mut styles: StyleBatch = Vec::new();

    grid.push_row(vec![
        Cell::text(REPORT_TITLE),
        Cell::text(format!("업데이트: {timestamp}")),
    ]);
    styles.push(StyleOp {
        rect: CellRect::cell(0, 0),
        style: CellStyle::bold(),
    });
    grid.push_row(Vec::new());

    if !layout_grid.is_empty() {
        let data_top = grid.row_count();
        let layout_width = layout_grid.width();

        styles.push(StyleOp {
            rect: CellRect::span(data_top, 0, layout_width),
            style: CellStyle {
                background: Some(HEADER_FILL),
                bold: true,
            },
        });
        styles.push(StyleOp {
            rect: CellRect::span(data_top + 1, 0, layout_width),
            style: CellStyle::bold(),
        });

        // Company cells colored by group, block by block
        for (block, rows) in zones.values().enumerate() {
            let col = block * ZONE_COLUMNS + 1;
            for (i, bid) in rows.iter().enumerate() {
                let name = matcher::strip_lead_marker(&bid.company);
                if let Some(entry) = matcher::resolve(colors, name) {
                    styles.push(StyleOp {
                        rect: CellRect::cell(data_top + HEADER_ROWS + i, col),
                        style: CellStyle::background(entry.color),
                    });
                }
            }
        }

        for row in layout_grid.rows {
            grid.push_row(row);
        }
        grid.push_row(Vec::new());
    }

    let summary_top = grid.row_count();
    styles.push(StyleOp {
        rect: CellRect::span(summary_top, 0, summary.width()),
        style: CellStyle::bold(),
    });
    for (i, group) in GroupKey::ALL.iter().enumerate() {
        styles.push(StyleOp {
            rect: CellRect::cell(summary_top + 1 + i, 0),
            style: CellStyle::background(group.color()),
        });
    }
    for row in summary.rows {
        grid.push_row(row);
    }

    grid.pad_to_width(width);
    Report { grid, styles }
}
