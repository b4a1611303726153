use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reaction_room::core::{Board, GameSession, LockPlanner, RoomConfig, RoomSnapshot, SimpleRng};
use reaction_room::term::{FrameBuffer, RoomView, Viewport};
use reaction_room::types::{Phase, ShapeKind};

fn bench_populate(c: &mut Criterion) {
    let config = RoomConfig::default();
    let weights = config.weight_table();
    let mut rng = SimpleRng::new(12345);
    let mut board = Board::new(10, 5);

    c.bench_function("populate_10x5", |b| {
        b.iter(|| {
            board.populate(config.occupancy, &weights, &config.guaranteed, &mut rng);
        })
    });
}

fn bench_plan_avoiding(c: &mut Criterion) {
    let planner = LockPlanner::new(6, 5, 100);
    let mut rng = SimpleRng::new(12345);
    let avoid = [0usize, 7, 13, 19, 26];

    c.bench_function("plan_avoiding", |b| {
        b.iter(|| planner.plan_avoiding(black_box(&avoid), &mut rng))
    });
}

/// Countdown, reveal, then twelve hits (shield clicks clear locked targets)
fn play_round(seed: u32) -> u64 {
    let mut session = GameSession::new(seed);
    session.start(0);
    let mut now = 0;
    while session.phase() == Phase::Countdown {
        now = session.next_timer_due().unwrap_or(now);
        session.advance(now);
    }

    for _ in 0..200 {
        if session.phase() != Phase::Revealed {
            break;
        }
        let Some(target) = session.target() else {
            break;
        };
        let cell = session
            .board()
            .cells_of(target)
            .into_iter()
            .find(|&i| !session.locks().is_locked(i));
        match cell {
            Some(i) => {
                now += 150;
                session.click(i, now);
            }
            None => {
                if let Some(&shield) = session.board().cells_of(ShapeKind::Shield).first() {
                    session.click(shield, now);
                }
            }
        }
    }
    session.stats().total_ms
}

fn bench_scripted_round(c: &mut Criterion) {
    let mut seed = 1;
    c.bench_function("scripted_round", |b| {
        b.iter(|| {
            seed += 1;
            play_round(black_box(seed))
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start(0);
    let view = RoomView::default();
    let viewport = Viewport::new(100, 30);
    let mut snap = RoomSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Some((2, 2)), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_populate,
    bench_plan_avoiding,
    bench_scripted_round,
    bench_render
);
criterion_main!(benches);
