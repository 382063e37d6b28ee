use std::cmp::Reverse;
use std::num::NonZero;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use strum::VariantArray;

use crate::axis::Axis;
use crate::grid::{Grid, GridError};
use crate::location::Location;
use crate::snapshot::{GridSnapshot, SnapshotError};
use crate::tile::TileId;

/// Shuffle length used when the host does not pick one.
///
/// The step count is difficulty configuration, not rules: any positive count
/// yields a solvable scramble, longer walks are simply harder to undo.
pub const DEFAULT_SHUFFLE_STEPS: NonZero<usize> = match NonZero::new(80) {
    Some(steps) => steps,
    None => unreachable!(),
};

/// One atomic swap as seen by the renderer: `tile` left `from` and now sits
/// at `to`, the cell the empty marker just vacated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TileMove {
    /// The tile that moved.
    pub tile: TileId,
    /// Where it was before the swap.
    pub from: Location,
    /// Where it is now.
    pub to: Location,
}

/// Result of a top-level move dispatch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The activation was legal; the listed tiles moved, in application
    /// order (nearest to the empty slot first).
    Moved(Vec<TileMove>),
    /// The activation was not a legal single or line move. Not an error;
    /// illegal taps are silently ignored.
    Rejected,
}

impl MoveOutcome {
    /// The moves performed, empty when rejected.
    pub fn moves(&self) -> &[TileMove] {
        match self {
            Self::Moved(moves) => moves,
            Self::Rejected => &[],
        }
    }
}

/// Renderer capability the engine reports into.
///
/// The engine mutates positions synchronously and considers a move complete
/// the instant the swap lands; implementations schedule their visual
/// transitions from these notifications. A host that animates must hold its
/// own input lock until the visuals settle, the engine never suspends. The
/// empty marker is not reported; it has no visual content and always ends at
/// the activated tile's old position.
pub trait TileRenderer {
    /// A single tile changed position and should be visually repositioned.
    fn reposition(&mut self, step: &TileMove) {
        let _ = step;
    }

    /// The whole move sequence landed; `solved` is the post-move verdict.
    fn settled(&mut self, outcome: &MoveOutcome, solved: bool) {
        let _ = (outcome, solved);
    }
}

/// Renderer that ignores every notification, for headless callers.
pub struct NullRenderer;

impl TileRenderer for NullRenderer {}

/// Bookkeeping attributes of a running session.
///
/// Timestamps are caller-supplied milliseconds; the clock belongs to the
/// host, which in a browser is `performance.now()`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SessionInfo {
    /// Top-level move dispatches since the last (re)start. A line move
    /// counts once regardless of chain length; shuffle steps never count.
    pub moves_count: u32,
    /// Sticky solved flag; reset only by a restart or restore.
    pub solved: bool,
    /// When the running game started, if it has.
    pub started_at: Option<u64>,
    /// When the game was paused, while it is.
    pub paused_at: Option<u64>,
    /// Total milliseconds spent paused so far.
    pub time_spent_pausing: u64,
}

/// A running puzzle: one [`Grid`] plus session counters, mutated in place by
/// move application and pause/resume transitions.
///
/// All mutation is synchronous; once a move or shuffle step begins it runs
/// to completion before the call returns.
pub struct Session {
    grid: Grid,
    info: SessionInfo,
    shuffle_steps: NonZero<usize>,
}

impl Default for Session {
    /// A session over the classic 4×4 layout.
    fn default() -> Self {
        Self::new(4).unwrap()
    }
}

impl Session {
    /// Create a session over a fresh solved grid of `side`×`side` tiles.
    pub fn new(side: usize) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(side)?,
            info: SessionInfo::default(),
            shuffle_steps: DEFAULT_SHUFFLE_STEPS,
        })
    }

    /// The grid this session owns.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Session counters and timing.
    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    /// Whether the puzzle has reached (and stayed in) the solved state.
    pub fn is_solved(&self) -> bool {
        self.info.solved
    }

    /// Override the configured shuffle length.
    pub fn set_shuffle_steps(&mut self, steps: NonZero<usize>) {
        self.shuffle_steps = steps;
    }

    /// Zero the counters and mark the game as started at `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.info = SessionInfo {
            started_at: Some(now_ms),
            ..Default::default()
        };
    }

    /// Send every tile home, restart the clock and counters, and reshuffle.
    /// Returns the shuffle's moves for hosts that reposition visually.
    pub fn restart<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Vec<TileMove> {
        self.grid.reset();
        self.start(now_ms);
        self.shuffle(rng)
    }

    /// Scramble with the configured number of steps.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<TileMove> {
        self.shuffle_with(self.shuffle_steps, rng)
    }

    /// Scramble with an explicit number of steps, returning the applied
    /// moves in order.
    ///
    /// Each step picks uniformly among the currently movable tiles, minus
    /// the tile moved by the previous step so the walk never trivially
    /// undoes itself. Only legal moves are applied, so every state reached
    /// is reachable from solved and therefore solvable. Shuffle steps do not
    /// touch the user-facing move counter.
    pub fn shuffle_with<R: Rng + ?Sized>(
        &mut self,
        steps: NonZero<usize>,
        rng: &mut R,
    ) -> Vec<TileMove> {
        self.info.solved = false;
        let mut applied = Vec::with_capacity(steps.get());
        let mut previous: Option<TileId> = None;
        for _ in 0..steps.get() {
            let available = self
                .grid
                .available_moves()
                .into_iter()
                .filter(|id| Some(*id) != previous)
                .collect_vec();
            // even a cornered empty slot has two neighbors, so with at most
            // one excluded this never runs dry
            if let Some(pick) = available.choose(rng).copied() {
                applied.push(self.swap_recorded(pick, &mut NullRenderer));
                previous = Some(pick);
            }
        }
        applied
    }

    /// Dispatch a tile activation without renderer callbacks.
    pub fn move_tile(&mut self, id: TileId) -> MoveOutcome {
        self.move_tile_with(id, &mut NullRenderer)
    }

    /// Dispatch a tile activation, in priority order: a single-step move if
    /// the tile touches the empty slot, else a line move sharing the x axis,
    /// else one sharing the y axis, else a silent rejection. Activations are
    /// also rejected once the puzzle is solved, until a restart.
    ///
    /// A successful dispatch counts as exactly one move no matter how many
    /// tiles shift, and re-evaluates the solved verdict before `settled`.
    pub fn move_tile_with<R: TileRenderer>(&mut self, id: TileId, renderer: &mut R) -> MoveOutcome {
        if self.info.solved {
            return MoveOutcome::Rejected;
        }

        let moves = if self.grid.can_move(id) {
            vec![self.swap_recorded(id, renderer)]
        } else if let Some(axis) = Axis::VARIANTS
            .iter()
            .copied()
            .find(|axis| self.grid.can_line_move(id, *axis))
        {
            self.apply_line(id, axis, renderer)
        } else {
            return MoveOutcome::Rejected;
        };

        self.info.moves_count += 1;
        let solved = self.check_solved();
        let outcome = MoveOutcome::Moved(moves);
        renderer.settled(&outcome, solved);
        outcome
    }

    // One legality-checked swap, recorded for the renderer.
    fn swap_recorded<R: TileRenderer>(&mut self, id: TileId, renderer: &mut R) -> TileMove {
        let from = self.grid.tile(id).current();
        let to = self.grid.empty_location();
        self.grid.swap_with_empty(id);
        let step = TileMove { tile: id, from, to };
        renderer.reposition(&step);
        step
    }

    // Collect the run of tiles between the empty slot and `id` inclusive,
    // then swap them into the hole nearest-first: that ordering keeps every
    // single swap legal against the progressively shifting empty position.
    fn apply_line<R: TileRenderer>(
        &mut self,
        id: TileId,
        main: Axis,
        renderer: &mut R,
    ) -> Vec<TileMove> {
        let secondary = main.perpendicular();
        let target = self.grid.tile(id).current();
        let empty_s = secondary.coord_of(self.grid.empty_location());
        let target_s = secondary.coord_of(target);
        let toward_greater = target_s > empty_s;

        let mut chain = self
            .grid
            .tiles()
            .filter(|tile| !self.grid.is_empty_marker(tile.id()))
            .filter(|tile| main.coord_of(tile.current()) == main.coord_of(target))
            .filter(|tile| {
                let s = secondary.coord_of(tile.current());
                if toward_greater {
                    s > empty_s && s <= target_s
                } else {
                    s < empty_s && s >= target_s
                }
            })
            .map(|tile| tile.id())
            .collect_vec();
        if toward_greater {
            chain.sort_by_key(|id| secondary.coord_of(self.grid.tile(*id).current()));
        } else {
            chain.sort_by_key(|id| Reverse(secondary.coord_of(self.grid.tile(*id).current())));
        }

        chain
            .into_iter()
            .map(|id| self.swap_recorded(id, renderer))
            .collect_vec()
    }

    /// Evaluate the solved verdict: true iff every tile's current position
    /// equals its home position. Once true it stays true, and repeated calls
    /// mutate nothing, until a restart.
    pub fn check_solved(&mut self) -> bool {
        if !self.info.solved && self.grid.is_solved() {
            self.info.solved = true;
        }
        self.info.solved
    }

    /// Restore grid positions from a host snapshot into the running session.
    ///
    /// Identities and home coordinates are untouched; counters are the
    /// host's to restore separately. Clears the sticky solved flag so play
    /// continues from the restored arrangement.
    pub fn restore(&mut self, snapshot: &GridSnapshot) -> Result<(), SnapshotError> {
        self.grid.restore(snapshot)?;
        self.info.solved = false;
        Ok(())
    }

    /// Record a pause at `now_ms`. No-op while already paused.
    pub fn pause(&mut self, now_ms: u64) {
        if self.info.paused_at.is_none() {
            self.info.paused_at = Some(now_ms);
        }
    }

    /// Leave the paused state at `now_ms`, accumulating the pause duration.
    pub fn resume(&mut self, now_ms: u64) {
        if let Some(paused_at) = self.info.paused_at.take() {
            self.info.time_spent_pausing += now_ms.saturating_sub(paused_at);
        }
    }

    /// Milliseconds of active play up to `now_ms`, excluding time spent
    /// paused. `None` before [`start`](Self::start).
    pub fn elapsed(&self, now_ms: u64) -> Option<u64> {
        let started_at = self.info.started_at?;
        let end = self.info.paused_at.unwrap_or(now_ms);
        Some(
            end.saturating_sub(started_at)
                .saturating_sub(self.info.time_spent_pausing),
        )
    }
}
