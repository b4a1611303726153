//! Board population and lock planning tests

use std::collections::BTreeMap;

use reaction_room::core::{Board, LockPlanner, OccupancyRange, RoomConfig, SimpleRng};
use reaction_room::types::ShapeKind;

fn populate(rows: u8, cols: u8, occupancy: f64, seed: u32) -> Board {
    let config = RoomConfig::default();
    let mut board = Board::new(rows, cols);
    let mut rng = SimpleRng::new(seed);
    board.populate(
        OccupancyRange::fixed(occupancy),
        &config.weight_table(),
        &config.guaranteed,
        &mut rng,
    );
    board
}

#[test]
fn test_ten_by_five_fills_thirty_one() {
    for seed in 1..50 {
        let board = populate(10, 5, 0.62, seed);
        assert_eq!(board.len(), 50);
        assert_eq!(board.filled_count(), 31, "seed {}", seed);
        assert_eq!(board.count_of(ShapeKind::Eye), 1);
        assert_eq!(board.count_of(ShapeKind::Bolt), 1);
        assert!(board.count_of(ShapeKind::Shield) >= 1);
    }
}

#[test]
fn test_six_by_five_fills_nineteen() {
    let board = populate(6, 5, 0.62, 7);
    assert_eq!(board.filled_count(), 19);
}

#[test]
fn test_default_range_stays_within_bounds() {
    let config = RoomConfig::default();
    for seed in 1..100 {
        let mut board = Board::new(6, 5);
        let mut rng = SimpleRng::new(seed);
        let filled = board.populate(
            config.occupancy,
            &config.weight_table(),
            &config.guaranteed,
            &mut rng,
        );
        // round(0.55 * 30) = 17, round(0.70 * 30) = 21
        assert!((17..=21).contains(&filled), "filled {}", filled);
        assert_eq!(filled, board.filled_count());
    }
}

#[test]
fn test_zero_weight_kinds_never_spawn_by_weight() {
    let config = RoomConfig::default();
    let weights = config.weight_table();
    let mut board = Board::new(6, 5);
    let mut rng = SimpleRng::new(123);

    board.populate(
        OccupancyRange::fixed(1.0),
        &weights,
        &BTreeMap::new(),
        &mut rng,
    );
    assert_eq!(board.count_of(ShapeKind::Eye), 0);
    assert_eq!(board.count_of(ShapeKind::Bolt), 0);

    for round in 0..500 {
        let kind = board.respawn(round % 30, &weights, &mut rng).unwrap();
        assert_ne!(kind, ShapeKind::Eye);
        assert_ne!(kind, ShapeKind::Bolt);
    }
}

#[test]
fn test_refill_restores_found_tiles() {
    let mut board = populate(6, 5, 0.62, 3);
    let weights = RoomConfig::default().weight_table();
    let mut rng = SimpleRng::new(4);

    let live: Vec<usize> = (0..board.len())
        .filter(|&i| board.get(i).is_some_and(|t| t.is_live()))
        .collect();
    for &i in &live {
        assert!(board.mark_found(i));
    }
    assert!(board.present_kinds().is_empty());

    let changed = board.refill(&weights, &mut rng);
    assert_eq!(changed, 30);
    assert_eq!(board.filled_count(), 30);
    assert!(!board.present_kinds().is_empty());
}

#[test]
fn test_plan_avoiding_misses_avoided_cells() {
    let planner = LockPlanner::new(6, 5, 100);
    for seed in 1..200u32 {
        let mut rng = SimpleRng::new(seed);
        let avoid: Vec<usize> = (0..3).map(|_| rng.next_range(30) as usize).collect();
        let lock = planner.plan_avoiding(&avoid, &mut rng);
        for &i in &avoid {
            let (row, col) = ((i / 5) as u8, (i % 5) as u8);
            assert!(
                !lock.covers(row, col),
                "seed {}: {} covers cell {}",
                seed,
                lock,
                i
            );
        }
    }
}
