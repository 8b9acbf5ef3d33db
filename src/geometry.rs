//! Supported display shapes and their DDRAM layout.
//!
//! The controller does not store a multi-row screen contiguously: the second row always starts at
//! DDRAM address `0x40`, and the silicon only knows these two row starts. Four-row modules are
//! wired as two long rows folded in half, so rows 2 and 3 continue rows 0 and 1 one screen width
//! further on.

use crate::UnsupportedGeometry;

const ROW0: u8 = 0x00;
const ROW1: u8 = 0x40;

/// Number of cells of the largest supported geometry.
pub const MAX_CELLS: usize = 80;

/// A run of visible cells that are contiguous in DDRAM.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// DDRAM address of the first cell.
    pub address: u8,
    /// Number of cells in the run.
    pub len: u8,
}

const fn seg(address: u8, len: u8) -> Segment {
    Segment { address, len }
}

// 16x1 modules are driven as two 8 character rows side by side.
const MAP_16X1: [Segment; 2] = [seg(ROW0, 8), seg(ROW1, 8)];
const MAP_16X2: [Segment; 2] = [seg(ROW0, 16), seg(ROW1, 16)];
const MAP_16X4: [Segment; 4] = [
    seg(ROW0, 16),
    seg(ROW1, 16),
    seg(ROW0 + 16, 16),
    seg(ROW1 + 16, 16),
];
const MAP_20X2: [Segment; 2] = [seg(ROW0, 20), seg(ROW1, 20)];
const MAP_20X4: [Segment; 4] = [
    seg(ROW0, 20),
    seg(ROW1, 20),
    seg(ROW0 + 20, 20),
    seg(ROW1 + 20, 20),
];
const MAP_40X2: [Segment; 2] = [seg(ROW0, 40), seg(ROW1, 40)];

/// Physical display shape, columns by rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Geometry {
    Lcd16x1,
    Lcd16x2,
    Lcd16x4,
    Lcd20x2,
    Lcd20x4,
    Lcd40x2,
}

impl Geometry {
    /// All supported geometries.
    pub const ALL: [Geometry; 6] = [
        Geometry::Lcd16x1,
        Geometry::Lcd16x2,
        Geometry::Lcd16x4,
        Geometry::Lcd20x2,
        Geometry::Lcd20x4,
        Geometry::Lcd40x2,
    ];

    /// Visible characters per row.
    pub const fn columns(self) -> u8 {
        match self {
            Geometry::Lcd16x1 | Geometry::Lcd16x2 | Geometry::Lcd16x4 => 16,
            Geometry::Lcd20x2 | Geometry::Lcd20x4 => 20,
            Geometry::Lcd40x2 => 40,
        }
    }

    /// Visible rows.
    pub const fn rows(self) -> u8 {
        match self {
            Geometry::Lcd16x1 => 1,
            Geometry::Lcd16x2 | Geometry::Lcd20x2 | Geometry::Lcd40x2 => 2,
            Geometry::Lcd16x4 | Geometry::Lcd20x4 => 4,
        }
    }

    /// Total number of cells, the size of the screen buffer.
    pub const fn cells(self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// DDRAM segments in buffer order. The lengths add up to [`Geometry::cells`].
    pub const fn segments(self) -> &'static [Segment] {
        match self {
            Geometry::Lcd16x1 => &MAP_16X1,
            Geometry::Lcd16x2 => &MAP_16X2,
            Geometry::Lcd16x4 => &MAP_16X4,
            Geometry::Lcd20x2 => &MAP_20X2,
            Geometry::Lcd20x4 => &MAP_20X4,
            Geometry::Lcd40x2 => &MAP_40X2,
        }
    }

    /// Packed form, columns in the high byte and rows in the low byte, e.g. `0x1404` for 20x4.
    pub const fn code(self) -> u16 {
        (self.columns() as u16) << 8 | self.rows() as u16
    }

    /// Inverse of [`Geometry::code`].
    pub fn from_code(code: u16) -> Result<Self, UnsupportedGeometry> {
        Self::try_from(((code >> 8) as u8, code as u8))
    }
}

impl TryFrom<(u8, u8)> for Geometry {
    type Error = UnsupportedGeometry;

    /// Look up the geometry for `(columns, rows)`.
    fn try_from((columns, rows): (u8, u8)) -> Result<Self, Self::Error> {
        Geometry::ALL
            .iter()
            .copied()
            .find(|g| g.columns() == columns && g.rows() == rows)
            .ok_or(UnsupportedGeometry { columns, rows })
    }
}
