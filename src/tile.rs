use crate::location::Location;

/// Stable handle for a tile, issued by the [`Grid`](crate::Grid) that owns it.
///
/// "Is this the empty marker?" is an id comparison, never a coordinate
/// comparison; the empty marker's coordinates change on every move.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Debug)]
pub struct TileId(pub(crate) usize);

impl TileId {
    /// Index of this tile in home (row-major) order.
    ///
    /// A renderer slicing an image into tiles can address the slice for this
    /// tile directly with this value.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One tile of the puzzle: where it belongs and where it currently sits.
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) home: Location,
    pub(crate) current: Location,
}

impl Tile {
    /// The stable identity of this tile.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// The location this tile occupies when the puzzle is solved.
    pub fn home(&self) -> Location {
        self.home
    }

    /// The location this tile occupies right now.
    pub fn current(&self) -> Location {
        self.current
    }

    /// Whether this tile is sitting on its home cell.
    pub fn is_home(&self) -> bool {
        self.home == self.current
    }
}
