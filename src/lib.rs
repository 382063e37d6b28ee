#![warn(missing_docs)]

//! # `taquin`
//!
//! The state machine of a sliding-tile puzzle (the 15-puzzle family): an N×N
//! grid of tiles with one empty cell, single-step moves into the empty slot,
//! multi-tile line moves along a shared row or column, a shuffle that
//! scrambles through legal moves only, and the solved check.
//!
//! Begin with [`Session::new`], scramble with [`Session::shuffle`], and feed
//! tile activations to [`Session::move_tile`]. The engine mutates positions
//! synchronously and reports what moved through [`MoveOutcome`] and the
//! optional [`TileRenderer`] callback seam; drawing, input handling, and
//! persistence belong to the host. A browser host uses the [`wasm`] surface
//! (feature `wasm`, on by default).
//!
//! # Internals
//! Tiles are plain records with a stable [`TileId`], a home position, and a
//! current position; the grid keeps a cell matrix indexed by current
//! position and the invariant that the two views stay a bijection. The empty
//! marker is an ordinary tile distinguished only by id. A line move is a
//! chain of single swaps applied nearest-to-the-hole first, which keeps each
//! link of the chain individually legal; the shuffle is a random walk over
//! the legal-move set that never immediately undoes its previous step, so
//! every scramble is reachable from solved by construction.

pub use axis::Axis;
pub use grid::{Grid, GridError};
pub use location::{Coord, Location};
pub use session::{
    MoveOutcome, NullRenderer, Session, SessionInfo, TileMove, TileRenderer,
    DEFAULT_SHUFFLE_STEPS,
};
pub use snapshot::{GridSnapshot, SnapshotError};
pub use tile::{Tile, TileId};

pub(crate) mod axis;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod session;
pub(crate) mod snapshot;
mod tests;
pub(crate) mod tile;
#[cfg(feature = "wasm")]
pub mod wasm;
