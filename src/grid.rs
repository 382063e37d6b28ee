use itertools::Itertools;
use ndarray::Array2;

use crate::axis::Axis;
use crate::location::{Coord, Location};
use crate::tile::{Tile, TileId};

/// Reasons a [`Grid`] cannot be constructed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GridError {
    /// A grid with fewer than 2 cells per side has no legal moves.
    SizeTooSmall,
}

/// An N×N arrangement of tiles with a single designated empty cell.
///
/// Exactly one tile occupies every cell at all times; the empty marker is an
/// ordinary tile record with no visual content, distinguished only by its id.
/// The grid answers legality queries; applying moves is the job of
/// [`Session`](crate::Session).
#[derive(Debug)]
pub struct Grid {
    pub(crate) side: Coord,
    // tile records, indexed by TileId
    pub(crate) tiles: Vec<Tile>,
    // occupant of every cell, indexed by current position
    pub(crate) cells: Array2<TileId>,
    pub(crate) empty: TileId,
}

impl Default for Grid {
    /// The classic 15-puzzle layout: 4 tiles per side.
    fn default() -> Self {
        Self::new(4).unwrap()
    }
}

impl Grid {
    /// Build a solved grid of `side`×`side` tiles, every tile at
    /// `current == home`, with the bottom-right cell designated empty.
    pub fn new(side: Coord) -> Result<Self, GridError> {
        if side < 2 {
            return Err(GridError::SizeTooSmall);
        }

        let tiles = (0..side * side)
            .map(|ix| {
                let home = Location(ix % side, ix / side);
                Tile { id: TileId(ix), home, current: home }
            })
            .collect_vec();
        let cells = Array2::from_shape_fn((side, side), |ind| {
            let Location(x, y) = Location::from(ind);
            TileId(y * side + x)
        });

        Ok(Self {
            side,
            tiles,
            cells,
            empty: TileId(side * side - 1),
        })
    }

    /// Side length N.
    pub fn side(&self) -> Coord {
        self.side
    }

    /// All tile records in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// The tile record behind `id`.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }

    /// The tile currently occupying `location`, if it is on the grid.
    pub fn tile_at(&self, location: Location) -> Option<TileId> {
        self.cells.get(location.as_index()).copied()
    }

    /// Whether `id` is the designated empty marker.
    pub fn is_empty_marker(&self, id: TileId) -> bool {
        id == self.empty
    }

    /// Current location of the empty marker.
    pub fn empty_location(&self) -> Location {
        self.tiles[self.empty.0].current
    }

    /// True iff `id` is orthogonally adjacent to the empty slot, i.e. may be
    /// swapped into it as a single-step move.
    pub fn can_move(&self, id: TileId) -> bool {
        !self.is_empty_marker(id)
            && self.tile(id).current.manhattan_distance(self.empty_location()) == 1
    }

    /// True iff `id` shares its `axis` coordinate with the empty slot, so the
    /// run of tiles between the two can shift one step along the other axis.
    pub fn can_line_move(&self, id: TileId, axis: Axis) -> bool {
        !self.is_empty_marker(id)
            && axis.coord_of(self.tile(id).current) == axis.coord_of(self.empty_location())
    }

    /// Every tile for which [`can_move`](Self::can_move) currently holds.
    /// The set changes after every move.
    pub fn available_moves(&self) -> Vec<TileId> {
        self.tiles
            .iter()
            .map(Tile::id)
            .filter(|id| self.can_move(*id))
            .collect_vec()
    }

    // The one mutation primitive: `id` takes the empty slot, the empty marker
    // takes the vacated cell. Callers establish legality first.
    pub(crate) fn swap_with_empty(&mut self, id: TileId) {
        let vacated = self.tiles[self.empty.0].current;
        let occupied = self.tiles[id.0].current;
        self.tiles[id.0].current = vacated;
        self.tiles[self.empty.0].current = occupied;
        self.cells[vacated.as_index()] = id;
        self.cells[occupied.as_index()] = self.empty;
    }

    /// Send every tile back to its home cell.
    pub fn reset(&mut self) {
        for tile in &mut self.tiles {
            tile.current = tile.home;
        }
        let side = self.side;
        for (ind, cell) in self.cells.indexed_iter_mut() {
            let Location(x, y) = Location::from(ind);
            *cell = TileId(y * side + x);
        }
    }

    /// True iff every tile sits on its home cell.
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_home)
    }

    /// Whether the current arrangement can reach the solved state at all.
    ///
    /// Inversion-parity rule of the 15-puzzle family: on odd side lengths the
    /// inversion count of the tiles (read in row-major current order,
    /// skipping the empty marker) must be even; on even side lengths the
    /// inversion count plus the empty slot's row must be odd.
    ///
    /// States produced by [`Session`](crate::Session) moves and shuffles
    /// always pass; a restored snapshot of foreign origin may not.
    pub fn is_solvable(&self) -> bool {
        let order = self
            .cells
            .iter()
            .filter(|id| **id != self.empty)
            .map(|id| id.0)
            .collect_vec();
        let inversions: usize = order
            .iter()
            .enumerate()
            .map(|(i, value)| order[i + 1..].iter().filter(|later| *later < value).count())
            .sum();

        if self.side % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.empty_location().1) % 2 == 1
        }
    }
}
