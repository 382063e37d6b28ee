//! Browser-facing bindings over [`Session`].
//!
//! The canvas renderer owns pixels, input handling, persistence, and the
//! clock; this surface only carries grid sizes, tile activations, and
//! position reports across the boundary. Positions are flattened into plain
//! number arrays so the JS side needs no wrapper types.

use std::num::NonZero;

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::location::Location;
use crate::session::{MoveOutcome, Session};
use crate::snapshot::GridSnapshot;

/// A puzzle session held behind a JS handle.
#[wasm_bindgen]
pub struct Puzzle {
    session: Session,
}

#[wasm_bindgen]
impl Puzzle {
    /// Create a solved, unshuffled puzzle with `side` tiles per edge.
    #[wasm_bindgen(constructor)]
    pub fn new(side: usize) -> Result<Puzzle, JsValue> {
        let session = Session::new(side)
            .map_err(|reason| JsValue::from_str(&format!("{reason:?}")))?;
        Ok(Self { session })
    }

    /// Side length of the grid.
    pub fn side(&self) -> usize {
        self.session.grid().side()
    }

    /// Mark the game started at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.session.start(now_ms as u64);
    }

    /// Record a pause at `now_ms`.
    pub fn pause(&mut self, now_ms: f64) {
        self.session.pause(now_ms as u64);
    }

    /// Leave the paused state at `now_ms`.
    pub fn resume(&mut self, now_ms: f64) {
        self.session.resume(now_ms as u64);
    }

    /// Milliseconds of active play up to `now_ms`, or `undefined` before the
    /// game has started.
    pub fn elapsed(&self, now_ms: f64) -> Option<f64> {
        self.session.elapsed(now_ms as u64).map(|ms| ms as f64)
    }

    /// Scramble with `steps` random legal moves; zero falls back to the
    /// default difficulty.
    pub fn shuffle(&mut self, steps: usize) {
        let mut rng = rand::thread_rng();
        match NonZero::new(steps) {
            Some(steps) => {
                self.session.shuffle_with(steps, &mut rng);
            }
            None => {
                self.session.shuffle(&mut rng);
            }
        }
    }

    /// Activate the tile currently at `(x, y)`.
    ///
    /// Returns the moved tiles as a flat array of
    /// `[id, from_x, from_y, to_x, to_y]` quintuples in animation order; an
    /// empty array means the tap was not a legal move.
    pub fn activate(&mut self, x: usize, y: usize) -> Array {
        let out = Array::new();
        let Some(id) = self.session.grid().tile_at(Location(x, y)) else {
            return out;
        };
        if let MoveOutcome::Moved(moves) = self.session.move_tile(id) {
            for step in moves {
                for value in [step.tile.index(), step.from.0, step.from.1, step.to.0, step.to.1] {
                    out.push(&JsValue::from_f64(value as f64));
                }
            }
        }
        out
    }

    /// Current position of every tile in id order, flattened to `[x, y]`
    /// pairs, for drawing and for the host's persistence layer.
    pub fn positions(&self) -> Array {
        let out = Array::new();
        for tile in self.session.grid().tiles() {
            out.push(&JsValue::from_f64(tile.current().0 as f64));
            out.push(&JsValue::from_f64(tile.current().1 as f64));
        }
        out
    }

    /// Restore tile positions from a flat `[x, y]` list captured by
    /// [`positions`](Self::positions).
    pub fn restore_positions(&mut self, flat: &[u32]) -> Result<(), JsValue> {
        let snapshot = GridSnapshot {
            side: self.session.grid().side(),
            positions: flat
                .chunks_exact(2)
                .map(|pair| Location(pair[0] as usize, pair[1] as usize))
                .collect(),
        };
        self.session
            .restore(&snapshot)
            .map_err(|reason| JsValue::from_str(&format!("{reason:?}")))
    }

    /// Number of counted moves since the last (re)start.
    pub fn moves_count(&self) -> u32 {
        self.session.info().moves_count
    }

    /// Whether the puzzle has reached the solved state.
    pub fn is_solved(&self) -> bool {
        self.session.is_solved()
    }

    /// Send every tile home and reshuffle, restarting counters at `now_ms`.
    pub fn restart(&mut self, now_ms: f64) {
        let mut rng = rand::thread_rng();
        self.session.restart(now_ms as u64, &mut rng);
    }
}
