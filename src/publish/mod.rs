//! Sheet publishers
//!
//! The pipeline hands every publisher the same payload: the rectangular grid
//! and the ordered style batch. `google` pushes it to a Google Sheets
//! worksheet, `xlsx` renders the same thing into a local file.

mod google;
mod xlsx;

pub use google::GoogleSheetsPublisher;
pub use xlsx::XlsxPublisher;

use crate::error::BidResult;
use crate::types::{Grid, StyleBatch};

/// Receives the assembled board and performs the write/format calls
pub trait SheetPublisher {
    fn publish(&mut self, grid: &Grid, styles: &StyleBatch) -> BidResult<()>;
}

/// 0-based column index → A1 column letters (0 → A, 25 → Z, 26 → AA)
pub fn column_letter(index: usize) -> String {
    let mut letters = String::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters
}
