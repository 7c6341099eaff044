//! Bidboard - bid-result board builder
//!
//! This library parses Korean bid-result spreadsheets (.xlsb), color-codes
//! companies by group membership read from an auxiliary workbook, and
//! assembles a side-by-side per-zone board with a per-group ratio summary,
//! ready to publish to Google Sheets or a local .xlsx file.
//!
//! # Pipeline
//!
//! - Folder listing → zone key extraction + bid-table parsing per file
//! - Color workbook → company → group map (fill theme metadata)
//! - Layout assembly + group aggregation → one rectangular grid + style batch
//! - A [`publish::SheetPublisher`] performs the write/format calls
//!
//! # Example
//!
//! ```no_run
//! use bidboard::parser::read_bid_file;
//! use bidboard::zone::zone_for_file;
//! use std::path::Path;
//!
//! let rows = read_bid_file(Path::new("제3공구 입찰결과.xlsb"))?;
//! let zone = zone_for_file("제3공구 입찰결과.xlsb");
//!
//! println!("{}: {} bidders", zone, rows.len());
//! # Ok::<(), bidboard::error::BidError>(())
//! ```

pub mod aggregate;
pub mod cli;
pub mod colormap;
pub mod config;
pub mod error;
pub mod layout;
pub mod matcher;
pub mod parser;
pub mod publish;
pub mod report;
pub mod types;
pub mod zone;

// Re-export commonly used types
pub use error::{BidError, BidResult};
pub use types::{BidRow, Cell, CompanyGroupEntry, Grid, GroupKey, StyleBatch};
