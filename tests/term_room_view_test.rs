use reaction_room::core::{GameSession, RoomSnapshot, TileSnapshot};
use reaction_room::term::{encode_frame, glyph, RoomView, Viewport};
use reaction_room::types::{Axis, Lock, Phase, ShapeKind};

fn snapshot_with(tiles: &[(usize, ShapeKind)]) -> RoomSnapshot {
    let mut snap = GameSession::new(1).snapshot();
    for &(i, kind) in tiles {
        snap.tiles[i] = TileSnapshot {
            kind: Some(kind),
            ..TileSnapshot::default()
        };
    }
    snap
}

#[test]
fn term_view_renders_grid_border_corners() {
    let snap = GameSession::new(1).snapshot();
    // 5 cols * 4 + 2 = 22 wide, 6 rows * 2 + 2 = 14 high; no room for the panel.
    let fb = RoomView::default().render(&snap, None, Viewport::new(22, 15));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 13).unwrap().ch, '└');
    assert_eq!(fb.get(21, 13).unwrap().ch, '┘');
}

#[test]
fn term_view_centers_glyph_in_tile() {
    let snap = snapshot_with(&[(0, ShapeKind::Heart), (7, ShapeKind::Star)]);
    let fb = RoomView::default().render(&snap, None, Viewport::new(22, 15));

    // Tile (0, 0) spans x 1..5, y 1..3; glyph sits at x 1 + 2.
    assert_eq!(fb.get(3, 1).unwrap().ch, glyph(ShapeKind::Heart).0);
    // Index 7 is row 1, col 2.
    assert_eq!(fb.get(1 + 2 * 4 + 2, 1 + 2).unwrap().ch, '★');
    assert_eq!(fb.get(1 + 4 + 2, 1).unwrap().ch, '·');
}

#[test]
fn term_view_marks_found_tiles() {
    let mut snap = snapshot_with(&[(0, ShapeKind::Heart)]);
    snap.tiles[0].found = true;
    let fb = RoomView::default().render(&snap, None, Viewport::new(22, 15));
    assert_eq!(fb.get(3, 1).unwrap().ch, '✓');
}

#[test]
fn term_view_shows_hint_and_lock_lines() {
    let mut snap = GameSession::new(1).snapshot();
    snap.phase = Phase::Revealed;
    snap.target = Some(ShapeKind::Club);
    snap.current_lock = Some(Lock::new(Axis::Row, 2));
    snap.next_lock = Some(Lock::new(Axis::Col, 0));

    let fb = RoomView::default().render(&snap, None, Viewport::new(90, 24));
    let screen: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(screen.iter().any(|l| l.contains("LOCK") && l.contains("row 3")));
    assert!(screen.iter().any(|l| l.contains("NEXT") && l.contains("col 1")));
    assert!(screen.iter().any(|l| l.contains("FIND") && l.contains("club")));
}

#[test]
fn renderer_diff_is_smaller_than_full_frame() {
    let view = RoomView::default();
    let vp = Viewport::new(80, 24);
    let a = view.render(&GameSession::new(1).snapshot(), None, vp);
    let b = view.render(&GameSession::new(1).snapshot(), Some((0, 0)), vp);

    let mut full = Vec::new();
    encode_frame(None, &b, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_frame(Some(&a), &b, &mut diff).unwrap();

    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());

    let mut none = Vec::new();
    encode_frame(Some(&b), &b.clone(), &mut none).unwrap();
    assert!(none.len() < diff.len());
}

#[test]
fn term_view_flashes_only_unfound_tiles_of_missed_kind() {
    let mut snap = snapshot_with(&[
        (0, ShapeKind::Heart),
        (3, ShapeKind::Star),
        (7, ShapeKind::Heart),
    ]);
    snap.tiles[7].found = true;
    let vp = Viewport::new(22, 15);

    let mut view = RoomView::default();
    let plain = view.render(&snap, None, vp);
    view.set_flash(Some(ShapeKind::Heart));
    let flashed = view.render(&snap, None, vp);

    let bg = |fb: &reaction_room::term::FrameBuffer, i: u16| {
        let (row, col) = (i / 5, i % 5);
        fb.get(1 + col * 4, 1 + row * 2).unwrap().style.bg
    };
    assert_ne!(bg(&flashed, 0), bg(&plain, 0));
    assert_eq!(bg(&flashed, 3), bg(&plain, 3));
    assert_eq!(bg(&flashed, 7), bg(&plain, 7));

    view.set_flash(None);
    assert_eq!(view.render(&snap, None, vp), plain);
}

#[test]
fn term_view_panel_shows_last_reaction() {
    let mut snap = GameSession::new(1).snapshot();
    snap.stats.last_ms = Some(345);
    snap.stats.best_ms = Some(200);

    let fb = RoomView::default().render(&snap, None, Viewport::new(90, 24));
    let screen: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(screen.iter().any(|l| l.contains("last") && l.contains("345 ms")));
    assert!(screen.iter().any(|l| l.contains("best") && l.contains("200 ms")));
}
