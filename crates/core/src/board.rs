//! Board module - the tile grid
//!
//! The board is a `rows × cols` grid stored as a flat, row-major vector of tiles. Each tile
//! holds an optional shape and a `found` flag set once the player has hit it.
//! Coordinates: index `i` maps to `(row, col) = (i / cols, i % cols)`.

use std::collections::BTreeMap;

use crate::config::OccupancyRange;
use crate::rng::SimpleRng;
use crate::types::ShapeKind;

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub kind: Option<ShapeKind>,
    pub found: bool,
}

impl Tile {
    /// Holds a shape that has not been hit yet
    pub fn is_live(&self) -> bool {
        self.kind.is_some() && !self.found
    }
}

/// The playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Flat array of tiles, row-major order (row * cols + col)
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u8, cols: u8) -> Self {
        let len = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            tiles: vec![Tile::default(); len],
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Flat index from (row, col); `None` when out of bounds
    #[inline(always)]
    pub fn index(&self, row: u8, col: u8) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// (row, col) of a flat index
    #[inline(always)]
    pub fn row_col(&self, index: usize) -> (u8, u8) {
        let cols = self.cols.max(1) as usize;
        ((index / cols) as u8, (index % cols) as u8)
    }

    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    /// Place a shape (or clear) at `index`, resetting the found flag
    /// Returns false if out of bounds
    pub fn set(&mut self, index: usize, kind: Option<ShapeKind>) -> bool {
        match self.tiles.get_mut(index) {
            Some(tile) => {
                *tile = Tile { kind, found: false };
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.tiles.fill(Tile::default());
    }

    /// Fill the board for a new round
    ///
    /// Guaranteed kinds are placed first into distinct random cells, then random empty cells
    /// are filled by weighted draw until the fill count is reached. When the grid is too
    /// small for every guarantee the placement stops early. Returns the number of filled
    /// cells.
    pub fn populate(
        &mut self,
        occupancy: OccupancyRange,
        weights: &[u32; ShapeKind::COUNT],
        guaranteed: &BTreeMap<ShapeKind, u32>,
        rng: &mut SimpleRng,
    ) -> usize {
        self.clear();

        let total = self.tiles.len();
        let fraction = rng.next_between(occupancy.min, occupancy.max);
        let fill = ((fraction * total as f64).round() as usize).min(total);

        let mut order: Vec<usize> = (0..total).collect();
        rng.shuffle(&mut order);
        let mut slots = order.into_iter();
        let mut placed = 0usize;

        'guaranteed: for (&kind, &count) in guaranteed {
            for _ in 0..count {
                let Some(i) = slots.next() else {
                    break 'guaranteed;
                };
                self.tiles[i].kind = Some(kind);
                placed += 1;
            }
        }

        while placed < fill {
            let Some(i) = slots.next() else {
                break;
            };
            let Some(kind) = rng.weighted_kind(weights) else {
                break;
            };
            self.tiles[i].kind = Some(kind);
            placed += 1;
        }

        placed
    }

    /// Distinct kinds on live tiles, in declaration order
    pub fn present_kinds(&self) -> Vec<ShapeKind> {
        let mut seen = [false; ShapeKind::COUNT];
        for tile in &self.tiles {
            if let (Some(kind), false) = (tile.kind, tile.found) {
                seen[kind.index()] = true;
            }
        }
        ShapeKind::ALL
            .into_iter()
            .filter(|k| seen[k.index()])
            .collect()
    }

    /// Live tiles holding `kind`
    pub fn available_count(&self, kind: ShapeKind) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.kind == Some(kind) && !t.found)
            .count()
    }

    /// Every tile holding `kind`, found or not
    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == Some(kind)).count()
    }

    /// Indices of live tiles holding `kind`
    pub fn cells_of(&self, kind: ShapeKind) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == Some(kind) && !t.found)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.kind.is_some()).count()
    }

    /// Mark a live tile as hit
    /// Returns false for empty, already-found, or out-of-bounds cells
    pub fn mark_found(&mut self, index: usize) -> bool {
        match self.tiles.get_mut(index) {
            Some(tile) if tile.is_live() => {
                tile.found = true;
                true
            }
            _ => false,
        }
    }

    /// Reassign one cell to a fresh weighted-random kind
    ///
    /// The cell is never left empty while any kind is spawnable.
    pub fn respawn(
        &mut self,
        index: usize,
        weights: &[u32; ShapeKind::COUNT],
        rng: &mut SimpleRng,
    ) -> Option<ShapeKind> {
        if index >= self.tiles.len() {
            return None;
        }
        let kind = rng.weighted_kind(weights)?;
        self.tiles[index] = Tile {
            kind: Some(kind),
            found: false,
        };
        Some(kind)
    }

    /// Respawn every empty or found cell; returns how many cells changed
    pub fn refill(&mut self, weights: &[u32; ShapeKind::COUNT], rng: &mut SimpleRng) -> usize {
        let mut changed = 0;
        for i in 0..self.tiles.len() {
            if !self.tiles[i].is_live() && self.respawn(i, weights, rng).is_some() {
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights_of(pairs: &[(ShapeKind, u32)]) -> [u32; ShapeKind::COUNT] {
        let mut table = [0u32; ShapeKind::COUNT];
        for &(kind, w) in pairs {
            table[kind.index()] = w;
        }
        table
    }

    #[test]
    fn test_board_new_empty() {
        let board = Board::new(6, 5);
        assert_eq!(board.len(), 30);
        assert_eq!(board.filled_count(), 0);
        assert!(board.present_kinds().is_empty());
    }

    #[test]
    fn test_index_and_row_col() {
        let board = Board::new(6, 5);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(2, 3), Some(13));
        assert_eq!(board.row_col(13), (2, 3));
        assert_eq!(board.index(6, 0), None);
        assert_eq!(board.index(0, 5), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new(2, 2);
        assert!(board.set(3, Some(ShapeKind::Star)));
        assert!(!board.set(4, Some(ShapeKind::Star)));
    }

    #[test]
    fn test_populate_fill_count_fixed_occupancy() {
        let mut board = Board::new(6, 5);
        let mut rng = SimpleRng::new(11);
        let weights = weights_of(&[(ShapeKind::Circle, 1), (ShapeKind::Square, 1)]);
        let placed = board.populate(
            OccupancyRange::fixed(0.62),
            &weights,
            &BTreeMap::new(),
            &mut rng,
        );
        // 30 * 0.62 = 18.6
        assert_eq!(placed, 19);
        assert_eq!(board.filled_count(), 19);
    }

    #[test]
    fn test_populate_guarantees_before_fill() {
        let mut board = Board::new(6, 5);
        let mut rng = SimpleRng::new(3);
        let weights = weights_of(&[(ShapeKind::Heart, 1)]);
        let guaranteed = BTreeMap::from([(ShapeKind::Eye, 2), (ShapeKind::Bolt, 1)]);
        board.populate(OccupancyRange::fixed(0.5), &weights, &guaranteed, &mut rng);

        assert_eq!(board.count_of(ShapeKind::Eye), 2);
        assert_eq!(board.count_of(ShapeKind::Bolt), 1);
        assert_eq!(board.count_of(ShapeKind::Heart), 12);
    }

    #[test]
    fn test_populate_truncates_guarantees_on_tiny_grid() {
        let mut board = Board::new(1, 2);
        let mut rng = SimpleRng::new(8);
        let weights = weights_of(&[(ShapeKind::Star, 1)]);
        let guaranteed = BTreeMap::from([(ShapeKind::Circle, 2), (ShapeKind::Ring, 2)]);
        let placed = board.populate(OccupancyRange::fixed(1.0), &weights, &guaranteed, &mut rng);

        assert_eq!(placed, 2);
        assert_eq!(board.count_of(ShapeKind::Circle), 2);
        assert_eq!(board.count_of(ShapeKind::Ring), 0);
    }

    #[test]
    fn test_available_count_ignores_found() {
        let mut board = Board::new(2, 3);
        board.set(0, Some(ShapeKind::Spade));
        board.set(4, Some(ShapeKind::Spade));
        assert_eq!(board.available_count(ShapeKind::Spade), 2);

        assert!(board.mark_found(0));
        assert!(!board.mark_found(0));
        assert!(!board.mark_found(1));
        assert_eq!(board.available_count(ShapeKind::Spade), 1);
        assert_eq!(board.count_of(ShapeKind::Spade), 2);
        assert_eq!(board.cells_of(ShapeKind::Spade), vec![4]);
    }

    #[test]
    fn test_present_kinds_order_and_found() {
        let mut board = Board::new(1, 4);
        board.set(0, Some(ShapeKind::Heart));
        board.set(1, Some(ShapeKind::Circle));
        board.set(2, Some(ShapeKind::Heart));
        assert_eq!(
            board.present_kinds(),
            vec![ShapeKind::Circle, ShapeKind::Heart]
        );

        board.mark_found(1);
        assert_eq!(board.present_kinds(), vec![ShapeKind::Heart]);
    }

    #[test]
    fn test_respawn_never_empty() {
        let mut board = Board::new(1, 3);
        let mut rng = SimpleRng::new(21);
        let weights = weights_of(&[(ShapeKind::Club, 1)]);
        board.set(1, Some(ShapeKind::Eye));
        board.mark_found(1);

        assert_eq!(board.respawn(1, &weights, &mut rng), Some(ShapeKind::Club));
        assert_eq!(
            board.get(1),
            Some(Tile {
                kind: Some(ShapeKind::Club),
                found: false
            })
        );
        assert_eq!(board.respawn(9, &weights, &mut rng), None);
    }

    #[test]
    fn test_refill_replaces_empty_and_found() {
        let mut board = Board::new(2, 2);
        let mut rng = SimpleRng::new(2);
        let weights = weights_of(&[(ShapeKind::Triangle, 1)]);
        board.set(0, Some(ShapeKind::Star));
        board.set(1, Some(ShapeKind::Star));
        board.mark_found(1);

        assert_eq!(board.refill(&weights, &mut rng), 3);
        assert_eq!(board.get(0).unwrap().kind, Some(ShapeKind::Star));
        assert_eq!(board.available_count(ShapeKind::Triangle), 3);
    }
}
