//! Fuzzy company name resolution
//!
//! Bid sheets and the color workbook rarely agree on exact spellings:
//! corporate-entity markers ("주식회사", "(주)") and spacing vary freely.
//! Resolution is exact-first, then normalized-substring with the longest
//! normalized key winning ties.

use crate::colormap::ColorMap;
use crate::parser::LEAD_BIDDER_MARKER;
use crate::types::CompanyGroupEntry;

/// Corporate-entity markers removed during normalization
const ENTITY_MARKERS: [&str; 2] = ["주식회사", "(주)"];

/// Drop entity markers and all whitespace
pub fn normalize(name: &str) -> String {
    let mut s = name.to_string();
    for marker in ENTITY_MARKERS {
        s = s.replace(marker, "");
    }
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Remove the leading-bidder glyph, if present
pub fn strip_lead_marker(company: &str) -> &str {
    company
        .strip_prefix(LEAD_BIDDER_MARKER)
        .map(str::trim_start)
        .unwrap_or(company)
}

/// Resolve a company name to its color-map entry.
///
/// An exact trimmed-name hit always wins. Otherwise both sides are
/// normalized and an entry qualifies when its normalized key is longer than
/// one character and either normalized string contains the other; among
/// qualifiers the longest normalized key wins, ties keep scan order.
pub fn resolve<'a>(map: &'a ColorMap, company: &str) -> Option<&'a CompanyGroupEntry> {
    let company = company.trim();
    if let Some(entry) = map.get_exact(company) {
        return Some(entry);
    }

    let query = normalize(company);
    if query.is_empty() {
        return None;
    }

    let mut best: Option<(usize, &CompanyGroupEntry)> = None;
    for entry in map.entries() {
        let key = normalize(&entry.company);
        let key_len = key.chars().count();
        if key_len <= 1 {
            continue;
        }
        if key.contains(&query) || query.contains(&key) {
            match best {
                Some((best_len, _)) if best_len >= key_len => {}
                _ => best = Some((key_len, entry)),
            }
        }
    }
    best.map(|(_, entry)| entry)
}
