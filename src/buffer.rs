//! In-memory copy of the screen.

use heapless::Vec;

use crate::geometry::{Geometry, MAX_CELLS};
use crate::BLANK;

/// Character cells of one display, row major, plus a write cursor for streamed text.
#[derive(Clone, Debug)]
pub struct DisplayBuffer {
    geometry: Geometry,
    cells: Vec<u8, MAX_CELLS>,
    cursor: (u8, u8),
}

impl DisplayBuffer {
    /// Blank buffer sized to `geometry`.
    pub fn new(geometry: Geometry) -> Self {
        let mut cells = Vec::new();
        // cannot fail, every geometry fits in MAX_CELLS
        let _ = cells.resize(geometry.cells(), BLANK);
        Self {
            geometry,
            cells,
            cursor: (0, 0),
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Blank every cell and move the cursor home.
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.cursor = (0, 0);
    }

    /// Copy `bytes` into the row starting at `(row, col)`.
    ///
    /// Stops when `bytes` runs out or at the end of the row, the rest is dropped. A position
    /// outside the screen is ignored. Returns the number of cells written. Callers cut the input
    /// at its terminator first, see [`rom_bytes`] and [`raw_bytes`].
    pub fn place<B>(&mut self, bytes: B, row: u8, col: u8) -> usize
    where
        B: IntoIterator<Item = u8>,
    {
        let columns = self.geometry.columns();
        if row >= self.geometry.rows() || col >= columns {
            return 0;
        }
        let start = usize::from(row) * usize::from(columns) + usize::from(col);
        let end = start + usize::from(columns - col);
        let mut written = 0;
        for (cell, byte) in self.cells[start..end]
            .iter_mut()
            .zip(bytes)
        {
            *cell = byte;
            written += 1;
        }
        written
    }

    /// Place `bytes` at the cursor and advance it, truncating at the end of the row.
    pub fn write_at_cursor<B>(&mut self, bytes: B)
    where
        B: IntoIterator<Item = u8>,
    {
        let (row, col) = self.cursor;
        let written = self.place(bytes, row, col);
        // fits in u8, at most one row
        self.cursor.1 = col.saturating_add(written as u8);
    }

    /// Move the write cursor. Out of range positions are kept and make writes no-ops.
    pub fn set_cursor(&mut self, row: u8, col: u8) {
        self.cursor = (row, col);
    }

    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Cell at `(row, col)`, `None` outside the screen.
    pub fn cell(&self, row: u8, col: u8) -> Option<u8> {
        if row >= self.geometry.rows() || col >= self.geometry.columns() {
            return None;
        }
        let index =
            usize::from(row) * usize::from(self.geometry.columns()) + usize::from(col);
        self.cells.get(index).copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

/// Characters of `text` up to the first `'\0'`, stored by their low byte, the index into the
/// controller's character ROM.
pub(crate) fn rom_bytes(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars().take_while(|&c| c != '\0').map(|c| c as u8)
}

/// ROM codes up to the first NUL byte.
pub(crate) fn raw_bytes(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes.iter().copied().take_while(|&b| b != 0)
}
