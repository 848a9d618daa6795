use std::convert::From;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

/// A grid cell address, row first.
///
/// Signed so that stepping off the top or left edge gives a position the bounds check can reject.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub row: isize,
    pub col: isize,
}

impl Position {
    pub fn new(row: isize, col: isize) -> Position {
        Position { row, col }
    }

    /// The position one step away in `direction`. Not bounds checked.
    #[inline]
    pub fn offset(self, direction: Direction) -> Position {
        let (d_row, d_col) = direction.delta();
        Position::new(self.row + d_row, self.col + d_col)
    }

    /// The direction leading from `self` to an orthogonally adjacent `other`, if it is adjacent.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        ALL_DIRECTIONS.iter().cloned().find(|dir| self.offset(*dir) == other)
    }
}

impl From<(isize, isize)> for Position {
    fn from(row_col_pair: (isize, isize)) -> Position {
        Position::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four unit steps in row/column terms.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

/// Canonical order: (+1,0), (0,+1), (-1,0), (0,-1).
pub const ALL_DIRECTIONS: [Direction; 4] =
    [Direction::Down, Direction::Right, Direction::Up, Direction::Left];

impl Direction {
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
        }
    }
}

/// A fresh uniformly random ordering of the four directions.
pub fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut dirs = ALL_DIRECTIONS;
    dirs.shuffle(rng);
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn offsets_follow_row_column_deltas() {
        let p = Position::new(3, 5);
        assert_eq!(p.offset(Direction::Down), Position::new(4, 5));
        assert_eq!(p.offset(Direction::Right), Position::new(3, 6));
        assert_eq!(p.offset(Direction::Up), Position::new(2, 5));
        assert_eq!(p.offset(Direction::Left), Position::new(3, 4));
        assert_eq!(Position::new(0, 0).offset(Direction::Up), Position::new(-1, 0));
    }

    #[test]
    fn opposite_directions_cancel() {
        let p = Position::new(7, 7);
        for dir in &ALL_DIRECTIONS {
            assert_eq!(p.offset(*dir).offset(dir.opposite()), p);
        }
    }

    #[test]
    fn direction_between_adjacent_positions() {
        let p = Position::new(1, 1);
        assert_eq!(p.direction_to(Position::new(2, 1)), Some(Direction::Down));
        assert_eq!(p.direction_to(Position::new(1, 0)), Some(Direction::Left));
        assert_eq!(p.direction_to(p), None);
        assert_eq!(p.direction_to(Position::new(2, 2)), None);
        assert_eq!(p.direction_to(Position::new(1, 3)), None);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let mut dirs = shuffled_directions(&mut rng).to_vec();
            dirs.sort_by_key(|d| d.delta());
            let mut expected = ALL_DIRECTIONS.to_vec();
            expected.sort_by_key(|d| d.delta());
            assert_eq!(dirs, expected);
        }
    }

    #[test]
    fn shuffle_reaches_every_ordering() {
        let mut rng = StdRng::seed_from_u64(2017);
        let mut seen: FnvHashMap<[Direction; 4], usize> = FnvHashMap::default();
        let samples = 24_000;
        for _ in 0..samples {
            *seen.entry(shuffled_directions(&mut rng)).or_insert(0) += 1;
        }
        // 4! orderings, each expected ~1000 times
        assert_eq!(seen.len(), 24);
        for count in seen.values() {
            assert!(*count > 700 && *count < 1300, "skewed shuffle: {}", count);
        }
    }
}
