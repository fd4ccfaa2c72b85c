use crate::geometry::Point;
use std::ops::Add;

/// A step toward one of the eight cells surrounding a grid cell.
///
/// `Up` decreases `y`; see [`Point`] for the orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
    UpLeft,
    DownRight,
    UpRight,
    DownLeft,
}

impl Direction {
    /// Iterate through all `Direction`s in neighbor-candidate order.
    ///
    /// The order is orthogonal first (right, left, up, down), then the
    /// diagonals in opposing pairs. Grid neighbor enumeration depends on it.
    pub fn iter() -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(Direction::Right), |direction| {
            use Direction::*;

            match direction {
                Right => Some(Left),
                Left => Some(Up),
                Up => Some(Down),
                Down => Some(UpLeft),
                UpLeft => Some(DownRight),
                DownRight => Some(UpRight),
                UpRight => Some(DownLeft),
                DownLeft => None,
            }
        })
    }

    /// `(dx, dy)` of a single step in this direction.
    pub fn deltas(self) -> (i32, i32) {
        use Direction::*;

        match self {
            Right => (1, 0),
            Left => (-1, 0),
            Up => (0, -1),
            Down => (0, 1),
            UpLeft => (-1, -1),
            DownRight => (1, 1),
            UpRight => (1, -1),
            DownLeft => (-1, 1),
        }
    }

    /// The direction of a single step from `from` to `to`, if they are adjacent.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let delta = to - from;
        Direction::iter().find(|direction| direction.deltas() == (delta.x, delta.y))
    }

    pub fn reverse(self) -> Direction {
        use Direction::*;

        match self {
            Right => Left,
            Left => Right,
            Up => Down,
            Down => Up,
            UpLeft => DownRight,
            DownRight => UpLeft,
            UpRight => DownLeft,
            DownLeft => UpRight,
        }
    }

    /// `true` for the four orthogonal directions.
    pub fn is_orthogonal(self) -> bool {
        let (dx, dy) = self.deltas();
        dx == 0 || dy == 0
    }

    /// An arrow glyph pointing in this direction.
    pub fn arrow(self) -> char {
        use Direction::*;

        match self {
            Right => '→',
            Left => '←',
            Up => '↑',
            Down => '↓',
            UpLeft => '↖',
            DownRight => '↘',
            UpRight => '↗',
            DownLeft => '↙',
        }
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, direction: Direction) -> Point {
        self + direction.deltas()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_yields_each_direction_once() {
        let all: Vec<_> = Direction::iter().collect();
        assert_eq!(all.len(), 8);
        for direction in &all {
            assert_eq!(all.iter().filter(|d| *d == direction).count(), 1);
            assert_eq!(direction.reverse().reverse(), *direction);
        }
        assert_eq!(all.iter().filter(|d| d.is_orthogonal()).count(), 4);
    }

    #[test]
    fn test_between() {
        let origin = Point::new(5, 5);
        for direction in Direction::iter() {
            assert_eq!(Direction::between(origin, origin + direction), Some(direction));
        }
        assert_eq!(Direction::between(origin, Point::new(7, 5)), None);
    }
}
