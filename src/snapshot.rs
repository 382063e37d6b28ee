use itertools::Itertools;

use crate::grid::Grid;
use crate::location::Location;
use crate::tile::TileId;

/// Reasons a [`GridSnapshot`] cannot be restored into a grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SnapshotError {
    /// The snapshot was taken from a grid of a different size.
    SizeMismatch,
    /// The snapshot does not place exactly one tile on every cell.
    NotABijection,
}

/// Current tile positions, indexed by [`TileId`], for the host's persistence
/// layer.
///
/// The wire format is the host's concern; this is only the data needed to
/// round-trip a paused game. Identities and home coordinates never leave the
/// grid, so a snapshot restores into a grid of the same size and nothing
/// else.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridSnapshot {
    /// Side length of the grid this was taken from.
    pub side: usize,
    /// `positions[id]` is the current location of the tile with that id.
    pub positions: Vec<Location>,
}

impl Grid {
    /// Capture every tile's current position.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            side: self.side,
            positions: self.tiles().map(|tile| tile.current()).collect_vec(),
        }
    }

    /// Restore positions from `snapshot` into this grid, leaving identities
    /// and home coordinates untouched.
    ///
    /// The snapshot must come from a grid of the same size and must place
    /// exactly one tile on every cell; otherwise the grid is left unchanged.
    pub fn restore(&mut self, snapshot: &GridSnapshot) -> Result<(), SnapshotError> {
        if snapshot.side != self.side || snapshot.positions.len() != self.side * self.side {
            return Err(SnapshotError::SizeMismatch);
        }

        let mut seen = vec![false; snapshot.positions.len()];
        for location in &snapshot.positions {
            if location.0 >= self.side || location.1 >= self.side {
                return Err(SnapshotError::NotABijection);
            }
            let slot = &mut seen[location.1 * self.side + location.0];
            if *slot {
                return Err(SnapshotError::NotABijection);
            }
            *slot = true;
        }

        for (ix, location) in snapshot.positions.iter().enumerate() {
            self.tiles[ix].current = *location;
            self.cells[location.as_index()] = TileId(ix);
        }
        Ok(())
    }
}
