//! Company color map loading
//!
//! The auxiliary workbook carries no table structure at all: membership is
//! encoded purely in cell fills. Any text cell filled with one of the three
//! mapped accent themes contributes its trimmed text as a company key.

use crate::error::{BidError, BidResult};
use crate::types::{CompanyGroupEntry, GroupKey};
use std::collections::HashMap;
use std::path::Path;

/// Company → group mapping built from the color workbook.
///
/// Entries keep sheet scan order (row-then-column); duplicate company text
/// keeps its position but takes the last scanned group.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: Vec<CompanyGroupEntry>,
    index: HashMap<String, usize>,
}

impl ColorMap {
    /// Insert a company with last-wins semantics on duplicate text
    pub fn insert(&mut self, company: String, group: GroupKey) {
        let entry = CompanyGroupEntry {
            company: company.clone(),
            group,
            color: group.color(),
        };
        match self.index.get(&company) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(company, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Exact lookup on the raw trimmed name
    pub fn get_exact(&self, company: &str) -> Option<&CompanyGroupEntry> {
        self.index.get(company).map(|&i| &self.entries[i])
    }

    /// Entries in sheet scan order
    pub fn entries(&self) -> &[CompanyGroupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan the active sheet's cell fills and build the color map.
///
/// Callers treat a missing file as an empty map, not an error; this function
/// only fails on an unreadable workbook.
pub fn load_color_map(path: &Path) -> BidResult<ColorMap> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        BidError::Spreadsheet(format!(
            "Failed to read color workbook '{}': {}",
            path.display(),
            e
        ))
    })?;
    let sheet = book.get_active_sheet();

    let mut map = ColorMap::default();
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    for row in 1..=max_row {
        for col in 1..=max_col {
            let Some(cell) = sheet.get_cell((col, row)) else {
                continue;
            };
            let text = cell.get_value();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let Some(group) = fill_group(cell.get_style()) else {
                continue;
            };
            map.insert(text.to_string(), group);
        }
    }
    Ok(map)
}

/// Group for a cell style, when its fill uses a mapped theme
fn fill_group(style: &umya_spreadsheet::Style) -> Option<GroupKey> {
    let color = style
        .get_fill()?
        .get_pattern_fill()?
        .get_foreground_color()?;
    GroupKey::from_theme_index(*color.get_theme_index())
}
