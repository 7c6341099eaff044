//! Per-zone, per-group ratio summary
//!
//! For each zone and each fixed group, the mean of the price ratios of the
//! companies resolving to that group. Zones with no member companies get a
//! "-" placeholder, never a numeric zero.

use crate::colormap::ColorMap;
use crate::layout::{round_to, RATIO_DECIMALS};
use crate::matcher;
use crate::types::{BidRow, Cell, Grid, GroupKey};
use std::collections::BTreeMap;

/// Placeholder for a zone/group pair without members
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Build the summary grid: one header row of zone names, then one row per
/// group (label first, averages-or-placeholders after). Zone order matches
/// the layout (ascending key order).
pub fn summarize(zones: &BTreeMap<String, Vec<BidRow>>, colors: &ColorMap) -> Grid {
    let mut grid = Grid::new();

    let mut header = vec![Cell::Empty];
    header.extend(zones.keys().map(|z| Cell::text(z.clone())));
    grid.push_row(header);

    for group in GroupKey::ALL {
        let mut row = vec![Cell::text(group.label())];
        for rows in zones.values() {
            let ratios: Vec<f64> = rows
                .iter()
                .filter(|bid| {
                    matcher::resolve(colors, matcher::strip_lead_marker(&bid.company))
                        .map(|entry| entry.group == group)
                        .unwrap_or(false)
                })
                .map(|bid| bid.ratio)
                .collect();

            if ratios.is_empty() {
                row.push(Cell::text(EMPTY_PLACEHOLDER));
            } else {
                let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
                row.push(Cell::Number(round_to(mean, RATIO_DECIMALS)));
            }
        }
        grid.push_row(row);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bid(rank: u32, company: &str, ratio: f64) -> BidRow {
        BidRow {
            rank,
            company: company.to_string(),
            amount: 100.0,
            ratio,
        }
    }

    fn colors() -> ColorMap {
        let mut m = ColorMap::default();
        m.insert("현대건설".to_string(), GroupKey::Major);
        m.insert("금호건설".to_string(), GroupKey::Regional);
        m
    }

    #[test]
    fn test_mean_per_zone_and_group() {
        let mut zones = BTreeMap::new();
        zones.insert(
            "3공구".to_string(),
            vec![
                bid(1, "★ 현대건설(주)", 98.0),
                bid(2, "현대건설", 99.0),
                bid(3, "금호건설", 97.5),
            ],
        );

        let grid = summarize(&zones, &colors());
        assert_eq!(grid.rows[0], vec![Cell::Empty, Cell::text("3공구")]);
        // Major: mean(98.0, 99.0); lead marker stripped before matching
        assert_eq!(grid.rows[1], vec![Cell::text("대형사"), Cell::Number(98.5)]);
        // Midsize has no members
        assert_eq!(grid.rows[2], vec![Cell::text("중견사"), Cell::text("-")]);
        assert_eq!(grid.rows[3], vec![Cell::text("지역사"), Cell::Number(97.5)]);
    }

    #[test]
    fn test_empty_group_gets_placeholder_not_zero() {
        let mut zones = BTreeMap::new();
        zones.insert("1공구".to_string(), vec![bid(1, "무소속건설", 95.0)]);

        let grid = summarize(&zones, &colors());
        for group_row in &grid.rows[1..] {
            assert_eq!(group_row[1], Cell::text(EMPTY_PLACEHOLDER));
            assert_ne!(group_row[1], Cell::Number(0.0));
        }
    }

    #[test]
    fn test_mean_is_rounded() {
        let mut zones = BTreeMap::new();
        zones.insert(
            "1공구".to_string(),
            vec![bid(1, "현대건설", 98.00001), bid(2, "현대건설", 98.00002)],
        );
        let grid = summarize(&zones, &colors());
        assert_eq!(grid.rows[1][1], Cell::Number(98.0));
    }

    #[test]
    fn test_group_rows_follow_declared_order() {
        let zones = BTreeMap::new();
        let grid = summarize(&zones, &colors());
        let labels: Vec<&Cell> = grid.rows[1..].iter().map(|r| &r[0]).collect();
        assert_eq!(
            labels,
            vec![&Cell::text("대형사"), &Cell::text("중견사"), &Cell::text("지역사")]
        );
    }
}
