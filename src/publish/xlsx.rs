//! Local .xlsx publisher
//!
//! Renders the same grid/style payload the Google publisher pushes into a
//! workbook on disk, for offline review and dry runs.

use super::SheetPublisher;
use crate::error::{BidError, BidResult};
use crate::types::{Cell, CellStyle, Grid, StyleBatch};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use std::collections::HashMap;
use std::path::PathBuf;

pub struct XlsxPublisher {
    path: PathBuf,
}

impl XlsxPublisher {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        XlsxPublisher { path: path.into() }
    }
}

impl SheetPublisher for XlsxPublisher {
    fn publish(&mut self, grid: &Grid, styles: &StyleBatch) -> BidResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        // Ops merge per attribute in application order; resolve each cell's
        // final style before writing, since formats attach at write time.
        let mut resolved: HashMap<(usize, usize), CellStyle> = HashMap::new();
        for op in styles {
            for row in op.rect.start_row..op.rect.end_row {
                for col in op.rect.start_col..op.rect.end_col {
                    resolved.entry((row, col)).or_default().merge(&op.style);
                }
            }
        }

        for (r, row) in grid.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let format = resolved.get(&(r, c)).map(to_format);
                let (row, col) = (r as u32, c as u16);
                match (cell, format) {
                    (Cell::Empty, None) => {}
                    (Cell::Empty, Some(f)) => {
                        worksheet.write_blank(row, col, &f).map_err(xlsx_err)?;
                    }
                    (Cell::Text(s), None) => {
                        worksheet.write_string(row, col, s).map_err(xlsx_err)?;
                    }
                    (Cell::Text(s), Some(f)) => {
                        worksheet
                            .write_string_with_format(row, col, s, &f)
                            .map_err(xlsx_err)?;
                    }
                    (Cell::Number(n), None) => {
                        worksheet.write_number(row, col, *n).map_err(xlsx_err)?;
                    }
                    (Cell::Number(n), Some(f)) => {
                        worksheet
                            .write_number_with_format(row, col, *n, &f)
                            .map_err(xlsx_err)?;
                    }
                }
            }
        }

        workbook.save(&self.path).map_err(xlsx_err)?;
        Ok(())
    }
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if let Some(bg) = style.background {
        format = format.set_background_color(Color::RGB(bg.to_u32()));
    }
    if style.bold {
        format = format.set_bold();
    }
    format
}

fn xlsx_err(e: XlsxError) -> BidError {
    BidError::Publish(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellRect, Rgb, StyleOp};
    use tempfile::TempDir;

    #[test]
    fn test_publish_writes_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.xlsx");

        let mut grid = Grid::new();
        grid.push_row(vec![Cell::text("입찰 결과 요약 정리"), Cell::Empty]);
        grid.push_row(vec![Cell::Number(1.0), Cell::text("★ A건설")]);
        let styles = vec![StyleOp {
            rect: CellRect::cell(1, 1),
            style: CellStyle::background(Rgb::new(0xC6, 0xEF, 0xCE)),
        }];

        let mut publisher = XlsxPublisher::new(&path);
        publisher.publish(&grid, &styles).unwrap();
        assert!(path.exists());

        // Round-trip the values back out
        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = book.get_active_sheet();
        assert_eq!(sheet.get_value("A1"), "입찰 결과 요약 정리");
        assert_eq!(sheet.get_value("B2"), "★ A건설");
    }

    #[test]
    fn test_publish_to_unwritable_path_fails() {
        let mut publisher = XlsxPublisher::new("/no/such/dir/board.xlsx");
        let err = publisher.publish(&Grid::new(), &Vec::new()).unwrap_err();
        assert!(matches!(err, BidError::Publish(_)));
    }
}
