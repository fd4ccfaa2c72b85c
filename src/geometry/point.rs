use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// A cell coordinate on a grid.
///
/// `x` grows to the right and `y` grows downward, so `(0, 0)` is the top left
/// corner of a rendered grid.
///
/// Parses from and displays as `x,y`. In configuration files it is written as
/// a two-element array: `[x, y]`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
    Serialize,
    Deserialize,
)]
#[display("{x},{y}")]
#[from_str(regex = r"\s*(?P<x>-?\d+)\s*,\s*(?P<y>-?\d+)\s*")]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Sum of the absolute values of the components.
    #[inline]
    pub fn manhattan(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Largest absolute component: the number of 8-connected steps this vector spans.
    #[inline]
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Straight-line distance between two points.
    pub fn euclidean(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// The four orthogonal neighbors of this point, regardless of any bounds.
    pub fn orthogonal(self) -> [Point; 4] {
        [
            self + (0, -1),
            self + (1, 0),
            self + (0, 1),
            self + (-1, 0),
        ]
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(Point { x, y }: Point) -> Self {
        (x, y)
    }
}

impl From<(usize, usize)> for Point {
    /// Panics if either coordinate does not fit in an `i32`.
    fn from((x, y): (usize, usize)) -> Self {
        Point {
            x: i32::try_from(x).expect("x coordinate must fit in an i32"),
            y: i32::try_from(y).expect("y coordinate must fit in an i32"),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Add<(i32, i32)> for Point {
    type Output = Point;

    fn add(self, (dx, dy): (i32, i32)) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let point: Point = "3, 14".parse().unwrap();
        assert_eq!(point, Point::new(3, 14));
        assert_eq!(point.to_string(), "3,14");
        assert!("3;14".parse::<Point>().is_err());
    }

    #[test]
    fn test_distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!((b - a).manhattan(), 7);
        assert_eq!((b - a).chebyshev(), 4);
        assert!((a.euclidean(b) - 5.0).abs() < f64::EPSILON);
    }
}
