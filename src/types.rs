//==============================================================================
// Bid data
//==============================================================================

/// One parsed participant row from a bid-result table
#[derive(Debug, Clone, PartialEq)]
pub struct BidRow {
    /// Rank as listed in the source table (uniqueness is not guaranteed)
    pub rank: u32,
    /// Company name; the top bidder carries a leading "★ " marker
    pub company: String,
    /// Bid amount in 억원 (source value / 10^8)
    pub amount: f64,
    /// Price ratio as a percentage (source value * 100)
    pub ratio: f64,
}

//==============================================================================
// Company groups
//==============================================================================

/// Company affiliation cluster, keyed by the fill theme used in the
/// auxiliary color workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Major,
    Midsize,
    Regional,
}

impl GroupKey {
    /// All groups in their fixed display order
    pub const ALL: [GroupKey; 3] = [GroupKey::Major, GroupKey::Midsize, GroupKey::Regional];

    /// Display label used in the summary block
    pub fn label(&self) -> &'static str {
        match self {
            GroupKey::Major => "대형사",
            GroupKey::Midsize => "중견사",
            GroupKey::Regional => "지역사",
        }
    }

    /// Fill color applied to company cells of this group
    pub fn color(&self) -> Rgb {
        match self {
            GroupKey::Major => Rgb::new(0xBD, 0xD7, 0xEE),    // light blue
            GroupKey::Midsize => Rgb::new(0xFF, 0xE6, 0x99),  // light amber
            GroupKey::Regional => Rgb::new(0xC6, 0xEF, 0xCE), // light green
        }
    }

    /// Map an OOXML fill theme index to a group. Accent1-3 (4/5/6) are the
    /// three themes used for manual highlighting in the color workbook;
    /// everything else is ignored.
    pub fn from_theme_index(theme: u32) -> Option<GroupKey> {
        match theme {
            4 => Some(GroupKey::Major),
            5 => Some(GroupKey::Midsize),
            6 => Some(GroupKey::Regional),
            _ => None,
        }
    }
}

/// One company → group association from the color workbook
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyGroupEntry {
    pub company: String,
    pub group: GroupKey,
    pub color: Rgb,
}

//==============================================================================
// Grid (the unit of transfer to the sheet publisher)
//==============================================================================

/// One cell of the assembled board
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text<S: Into<String>>(s: S) -> Cell {
        Cell::Text(s.into())
    }
}

/// Rectangular 2-D cell array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new() -> Grid {
        Grid { rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pad every row with empty cells up to `width`
    pub fn pad_to_width(&mut self, width: usize) {
        for row in &mut self.rows {
            while row.len() < width {
                row.push(Cell::Empty);
            }
        }
    }

    /// True when every row has the same column count
    pub fn is_rectangular(&self) -> bool {
        let w = self.width();
        self.rows.iter().all(|r| r.len() == w)
    }
}

//==============================================================================
// Styles
//==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Packed 0xRRGGBB form (rust_xlsxwriter colors)
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// Style fragment applied to a cell range. Attributes merge independently:
/// a later op's background replaces an earlier one only when set, and bold
/// only upgrades (matches the publisher field masks).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStyle {
    pub background: Option<Rgb>,
    pub bold: bool,
}

impl CellStyle {
    pub fn background(color: Rgb) -> CellStyle {
        CellStyle {
            background: Some(color),
            bold: false,
        }
    }

    pub fn bold() -> CellStyle {
        CellStyle {
            background: None,
            bold: true,
        }
    }

    pub fn merge(&mut self, other: &CellStyle) {
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.bold {
            self.bold = true;
        }
    }
}

/// 0-based, end-exclusive cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl CellRect {
    pub fn cell(row: usize, col: usize) -> CellRect {
        CellRect {
            start_row: row,
            start_col: col,
            end_row: row + 1,
            end_col: col + 1,
        }
    }

    pub fn span(row: usize, start_col: usize, end_col: usize) -> CellRect {
        CellRect {
            start_row: row,
            start_col,
            end_row: row + 1,
            end_col,
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row < self.end_row && col >= self.start_col && col < self.end_col
    }
}

/// One (range, style) pair of the style batch
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOp {
    pub rect: CellRect,
    pub style: CellStyle,
}

/// Ordered style ops; application order is insertion order, later wins
pub type StyleBatch = Vec<StyleOp>;
