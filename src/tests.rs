#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::axis::Axis;
    use crate::{
        Grid, GridError, Location, MoveOutcome, Session, SnapshotError, TileId, TileMove,
        TileRenderer,
    };

    fn tile_at(session: &Session, x: usize, y: usize) -> TileId {
        session.grid().tile_at(Location(x, y)).unwrap()
    }

    fn assert_bijection(grid: &Grid) {
        let side = grid.side();
        for y in 0..side {
            for x in 0..side {
                let id = grid.tile_at(Location(x, y)).unwrap();
                assert_eq!(grid.tile(id).current(), Location(x, y));
            }
        }
    }

    #[test]
    fn fresh_grid_is_solved_with_one_empty_marker() {
        for side in 2..=6 {
            let grid = Grid::new(side).unwrap();
            assert!(grid.is_solved());
            assert!(grid.tiles().all(|tile| tile.is_home()));
            assert_eq!(
                grid.tiles().filter(|tile| grid.is_empty_marker(tile.id())).count(),
                1
            );
            assert_eq!(grid.empty_location(), Location(side - 1, side - 1));
            assert_bijection(&grid);
        }
    }

    #[test]
    fn degenerate_sides_are_rejected() {
        assert_eq!(Grid::new(0).unwrap_err(), GridError::SizeTooSmall);
        assert_eq!(Grid::new(1).unwrap_err(), GridError::SizeTooSmall);
        assert!(Session::new(2).is_ok());
    }

    #[test]
    fn off_grid_lookups_return_none() {
        let grid = Grid::new(3).unwrap();
        assert!(grid.tile_at(Location(3, 0)).is_none());
        assert!(grid.tile_at(Location(0, 3)).is_none());
        assert!(grid.tile_at(Location(usize::MAX, 0)).is_none());
    }

    #[test]
    fn only_neighbors_of_the_empty_slot_may_move() {
        let grid = Grid::new(4).unwrap();
        // empty at (3, 3); only (2, 3) and (3, 2) touch it
        let movable = grid.available_moves();
        assert_eq!(movable.len(), 2);
        for id in movable {
            assert_eq!(grid.tile(id).current().manhattan_distance(grid.empty_location()), 1);
            assert!(grid.can_move(id));
        }
        assert!(!grid.can_move(grid.tile_at(Location(0, 0)).unwrap()));
        // the empty marker itself is never movable
        let empty = grid.tile_at(grid.empty_location()).unwrap();
        assert!(!grid.can_move(empty));
        assert!(!grid.can_line_move(empty, Axis::X));
        assert!(!grid.can_line_move(empty, Axis::Y));
    }

    #[test]
    fn single_move_swaps_exactly_the_two_cells() {
        let mut session = Session::new(4).unwrap();
        let before = session.grid().snapshot();
        let id = tile_at(&session, 3, 2);

        let outcome = session.move_tile(id);
        assert_eq!(
            outcome.moves(),
            &[TileMove { tile: id, from: Location(3, 2), to: Location(3, 3) }]
        );
        assert_eq!(session.grid().tile(id).current(), Location(3, 3));
        assert_eq!(session.grid().empty_location(), Location(3, 2));
        for tile in session.grid().tiles() {
            if tile.id() != id && !session.grid().is_empty_marker(tile.id()) {
                assert_eq!(tile.current(), before.positions[tile.id().index()]);
            }
        }
        assert_bijection(session.grid());
    }

    #[test]
    fn adjacency_is_symmetric_under_application() {
        let mut session = Session::new(3).unwrap();
        let id = tile_at(&session, 2, 1);
        assert!(session.grid().can_move(id));
        let old = session.grid().tile(id).current();
        session.move_tile(id);
        // moving it back is immediately legal again
        assert!(session.grid().can_move(id));
        assert_eq!(session.grid().empty_location(), old);
    }

    #[test]
    fn diagonal_taps_are_silently_rejected() {
        let mut session = Session::new(4).unwrap();
        // (2, 2) shares neither row nor column with the empty slot at (3, 3)
        let id = tile_at(&session, 2, 2);
        assert_eq!(session.move_tile(id), MoveOutcome::Rejected);
        assert_eq!(session.info().moves_count, 0);
        assert_bijection(session.grid());
    }

    #[test]
    fn line_move_down_a_column_moves_nearest_first() {
        let mut session = Session::new(4).unwrap();
        // empty at (3, 3); activate the top of its column
        let target = tile_at(&session, 3, 0);
        let outcome = session.move_tile(target);

        let moves = outcome.moves();
        assert_eq!(moves.len(), 3);
        assert_eq!((moves[0].from, moves[0].to), (Location(3, 2), Location(3, 3)));
        assert_eq!((moves[1].from, moves[1].to), (Location(3, 1), Location(3, 2)));
        assert_eq!((moves[2].from, moves[2].to), (Location(3, 0), Location(3, 1)));
        // the hole traveled to the activated tile's original cell
        assert_eq!(session.grid().empty_location(), Location(3, 0));
        assert_eq!(session.info().moves_count, 1);
        assert_bijection(session.grid());
    }

    #[test]
    fn line_move_along_a_row_counts_once() {
        let mut session = Session::new(4).unwrap();
        let target = tile_at(&session, 0, 3);
        let outcome = session.move_tile(target);

        assert_eq!(outcome.moves().len(), 3);
        assert_eq!(outcome.moves()[0].from, Location(2, 3));
        assert_eq!(outcome.moves()[2].from, Location(0, 3));
        assert_eq!(session.grid().empty_location(), Location(0, 3));
        assert_eq!(session.info().moves_count, 1);
        assert_bijection(session.grid());
    }

    #[test]
    fn two_by_two_move_and_move_back() {
        let mut session = Session::new(2).unwrap();
        let id = tile_at(&session, 1, 0);

        session.move_tile(id);
        assert_eq!(session.grid().empty_location(), Location(1, 0));
        assert_eq!(session.grid().tile(id).current(), Location(1, 1));
        assert!(!session.check_solved());

        session.move_tile(id);
        assert!(session.is_solved());
        assert_eq!(session.info().moves_count, 2);
    }

    #[test]
    fn solved_state_is_sticky_and_checks_mutate_nothing() {
        let mut session = Session::new(3).unwrap();
        let id = tile_at(&session, 2, 1);
        session.move_tile(id);
        session.move_tile(id);
        assert!(session.is_solved());

        let before = session.grid().snapshot();
        for _ in 0..4 {
            assert!(session.check_solved());
        }
        assert_eq!(session.grid().snapshot(), before);
        // no further activations land until a restart
        assert_eq!(session.move_tile(tile_at(&session, 1, 2)), MoveOutcome::Rejected);
        assert_eq!(session.info().moves_count, 2);
    }

    #[test]
    fn shuffle_applies_exactly_steps_legal_moves_without_backtracking() {
        let mut rng = StdRng::seed_from_u64(42);
        for side in [2, 3, 4] {
            let mut session = Session::new(side).unwrap();
            let steps = NonZero::new(100).unwrap();
            let applied = session.shuffle_with(steps, &mut rng);

            assert_eq!(applied.len(), steps.get());
            for pair in applied.windows(2) {
                assert_ne!(pair[0].tile, pair[1].tile);
            }
            // each recorded move is one orthogonal step
            for step in &applied {
                assert_eq!(step.from.manhattan_distance(step.to), 1);
            }
            assert!(session.grid().is_solvable());
            assert_bijection(session.grid());
            assert_eq!(session.info().moves_count, 0);
        }
    }

    #[test]
    fn short_shuffles_never_land_on_solved() {
        // with immediate backtracking excluded, the shortest cycle back to
        // solved is far longer than these walks
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for steps in 1..=6 {
                let mut session = Session::new(3).unwrap();
                session.shuffle_with(NonZero::new(steps).unwrap(), &mut rng);
                assert!(!session.grid().is_solved());
            }
        }
    }

    #[test]
    fn restart_resets_positions_counters_and_reshuffles() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::new(4).unwrap();
        session.start(0);
        session.shuffle(&mut rng);
        session.move_tile(session.grid().available_moves()[0]);
        assert_eq!(session.info().moves_count, 1);

        session.restart(5_000, &mut rng);
        assert_eq!(session.info().moves_count, 0);
        assert!(!session.is_solved());
        assert_eq!(session.info().started_at, Some(5_000));
        // restarted games come reshuffled, not solved
        assert!(!session.grid().is_solved());
        assert!(session.grid().is_solvable());
    }

    #[test]
    fn snapshot_restores_into_an_existing_grid() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut scrambled = Session::new(4).unwrap();
        scrambled.shuffle(&mut rng);
        let snapshot = scrambled.grid().snapshot();

        let mut resumed = Session::new(4).unwrap();
        resumed.restore(&snapshot).unwrap();
        assert_eq!(resumed.grid().snapshot(), snapshot);
        for tile in resumed.grid().tiles() {
            // identities and homes survive a restore untouched
            assert_eq!(tile.home(), Location(tile.id().index() % 4, tile.id().index() / 4));
        }
        assert_bijection(resumed.grid());
    }

    #[test]
    fn snapshot_validation_rejects_bad_inputs() {
        let mut session = Session::new(4).unwrap();
        let mut snapshot = session.grid().snapshot();

        snapshot.side = 5;
        assert_eq!(session.restore(&snapshot), Err(SnapshotError::SizeMismatch));

        let mut duplicated = session.grid().snapshot();
        duplicated.positions[0] = duplicated.positions[1];
        assert_eq!(session.restore(&duplicated), Err(SnapshotError::NotABijection));

        let mut out_of_bounds = session.grid().snapshot();
        out_of_bounds.positions[0] = Location(4, 0);
        assert_eq!(session.restore(&out_of_bounds), Err(SnapshotError::NotABijection));

        // failed restores leave the grid untouched
        assert!(session.grid().is_solved());
    }

    #[test]
    fn odd_permutations_are_detected_as_unsolvable() {
        let mut session = Session::new(4).unwrap();
        assert!(session.grid().is_solvable());

        // swapping two tiles flips parity without breaking the bijection
        let mut snapshot = session.grid().snapshot();
        snapshot.positions.swap(0, 1);
        session.restore(&snapshot).unwrap();
        assert!(!session.grid().is_solvable());
    }

    #[derive(Default)]
    struct RecordingRenderer {
        repositioned: Vec<TileMove>,
        settled: Vec<bool>,
    }

    impl TileRenderer for RecordingRenderer {
        fn reposition(&mut self, step: &TileMove) {
            self.repositioned.push(*step);
        }

        fn settled(&mut self, _outcome: &MoveOutcome, solved: bool) {
            self.settled.push(solved);
        }
    }

    #[test]
    fn renderer_sees_each_swap_then_one_settle() {
        let mut session = Session::new(4).unwrap();
        let mut renderer = RecordingRenderer::default();
        let target = tile_at(&session, 3, 0);

        let outcome = session.move_tile_with(target, &mut renderer);
        assert_eq!(renderer.repositioned, outcome.moves());
        assert_eq!(renderer.settled, vec![false]);

        // rejected taps produce no callbacks at all
        let stray = tile_at(&session, 0, 1);
        session.move_tile_with(stray, &mut renderer);
        assert_eq!(renderer.repositioned.len(), 3);
        assert_eq!(renderer.settled.len(), 1);
    }

    #[test]
    fn pause_bookkeeping_excludes_paused_time() {
        let mut session = Session::new(4).unwrap();
        assert_eq!(session.elapsed(1_000), None);

        session.start(1_000);
        assert_eq!(session.elapsed(4_000), Some(3_000));

        session.pause(5_000);
        // the clock is frozen at the pause timestamp
        assert_eq!(session.elapsed(9_000), Some(4_000));
        // pausing twice keeps the first timestamp
        session.pause(8_000);
        assert_eq!(session.elapsed(9_000), Some(4_000));

        session.resume(7_000);
        assert_eq!(session.info().time_spent_pausing, 2_000);
        assert_eq!(session.elapsed(10_000), Some(7_000));
    }

    #[test]
    fn available_moves_track_the_empty_slot() {
        let mut session = Session::new(3).unwrap();
        // walk the hole to the center: 4 neighbors there
        session.move_tile(tile_at(&session, 2, 1));
        session.move_tile(tile_at(&session, 1, 1));
        assert_eq!(session.grid().empty_location(), Location(1, 1));
        assert_eq!(session.grid().available_moves().len(), 4);
    }

    #[test]
    fn line_move_midway_tile_shifts_only_the_run_between() {
        let mut session = Session::new(4).unwrap();
        // activate the middle of the empty slot's column: two tiles shift
        let target = tile_at(&session, 3, 1);
        let above = tile_at(&session, 3, 0);
        let outcome = session.move_tile(target);
        assert_eq!(outcome.moves().len(), 2);
        assert_eq!(outcome.moves()[0].from, Location(3, 2));
        assert_eq!(outcome.moves()[1].from, Location(3, 1));
        assert_eq!(session.grid().empty_location(), Location(3, 1));
        // the tile above the run did not move
        assert_eq!(session.grid().tile(above).current(), Location(3, 0));
    }
}
