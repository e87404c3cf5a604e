use std::fmt;

use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A corner of the module grid. `x` is the column line, `y` the row line,
/// both in `[0, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vertex {
    pub x: usize,
    pub y: usize,
}

impl Vertex {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction of travel along a unit edge, in screen coordinates
/// (y grows downward).
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step `(dx, dy)` for this direction.
    pub const fn unit(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// A directed, axis-aligned unit segment on the vertex lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub start: Vertex,
    pub direction: Direction,
}

impl Edge {
    pub const fn new(x: usize, y: usize, direction: Direction) -> Self {
        Self {
            start: Vertex::new(x, y),
            direction,
        }
    }

    /// Vertex reached after travelling one unit from `start`.
    ///
    /// Edges produced by the extractor never step outside the lattice,
    /// so the subtraction cannot underflow for them.
    pub fn end(&self) -> Vertex {
        let (dx, dy) = self.direction.unit();
        Vertex {
            x: self.start.x.wrapping_add_signed(dx),
            y: self.start.y.wrapping_add_signed(dy),
        }
    }
}

/// Rotation sense of a closed loop as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Winding {
    /// Dark region on the right of travel: an outer boundary.
    Clockwise,
    /// Dark region on the left of travel: the boundary of a hole.
    CounterClockwise,
}

/// A closed chain of unit edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    edges: Vec<Edge>,
}

impl Loop {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Start vertex of the first edge.
    pub fn start(&self) -> Option<Vertex> {
        self.edges.first().map(|edge| edge.start)
    }

    /// True when every edge ends where the next begins and the last edge
    /// returns to the first edge's start.
    pub fn is_closed(&self) -> bool {
        let Some(first) = self.edges.first() else {
            return false;
        };
        let chained = self
            .edges
            .windows(2)
            .all(|pair| pair[0].end() == pair[1].start);
        let last = self.edges[self.edges.len() - 1];
        chained && last.end() == first.start
    }

    /// Corner sequence of the loop, starting at the first edge's start.
    /// The closing vertex is not repeated.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.edges.iter().map(|edge| edge.start).collect()
    }

    /// Convert to a geo-types polygon for area computations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .edges
            .iter()
            .map(|edge| Coord {
                x: edge.start.x as f64,
                y: edge.start.y as f64,
            })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Shoelace area in screen coordinates. Positive for clockwise
    /// (outer) loops, negative for holes.
    pub fn signed_area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().signed_area()
    }

    pub fn orientation(&self) -> Winding {
        if self.signed_area() >= 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Winding number of the loop around `(px, py)`.
    ///
    /// Counts the vertical edges to the right of the point whose span
    /// contains `py`; downward edges add one, upward edges subtract one.
    /// Points lying on an edge are not meaningful; callers sample cell
    /// centres.
    pub fn winding_number(&self, px: f64, py: f64) -> i32 {
        self.edges
            .iter()
            .filter(|edge| edge.direction.is_vertical())
            .filter(|edge| edge.start.x as f64 > px)
            .filter(|edge| {
                let top = edge.start.y.min(edge.end().y) as f64;
                top < py && py < top + 1.0
            })
            .map(|edge| match edge.direction {
                Direction::Down => 1,
                _ => -1,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Loop {
        Loop::new(vec![
            Edge::new(0, 0, Direction::Right),
            Edge::new(1, 0, Direction::Down),
            Edge::new(1, 1, Direction::Left),
            Edge::new(0, 1, Direction::Up),
        ])
    }

    #[test]
    fn test_edge_end() {
        assert_eq!(Edge::new(2, 2, Direction::Up).end(), Vertex::new(2, 1));
        assert_eq!(Edge::new(2, 2, Direction::Down).end(), Vertex::new(2, 3));
        assert_eq!(Edge::new(2, 2, Direction::Left).end(), Vertex::new(1, 2));
        assert_eq!(Edge::new(2, 2, Direction::Right).end(), Vertex::new(3, 2));
    }

    #[test]
    fn test_edges_compare_by_start_and_direction() {
        assert_eq!(Edge::new(1, 1, Direction::Up), Edge::new(1, 1, Direction::Up));
        assert_ne!(Edge::new(1, 1, Direction::Up), Edge::new(1, 1, Direction::Left));
        assert_ne!(Edge::new(1, 1, Direction::Up), Edge::new(1, 2, Direction::Up));
    }

    #[test]
    fn test_unit_square_is_clockwise() {
        let square = unit_square();
        assert!(square.is_closed());
        assert_eq!(square.signed_area(), 1.0);
        assert_eq!(square.orientation(), Winding::Clockwise);
        assert_eq!(square.winding_number(0.5, 0.5), 1);
        assert_eq!(square.winding_number(1.5, 0.5), 0);
    }

    #[test]
    fn test_reversed_square_is_counter_clockwise() {
        let reversed = Loop::new(vec![
            Edge::new(0, 0, Direction::Down),
            Edge::new(0, 1, Direction::Right),
            Edge::new(1, 1, Direction::Up),
            Edge::new(1, 0, Direction::Left),
        ]);
        assert!(reversed.is_closed());
        assert_eq!(reversed.orientation(), Winding::CounterClockwise);
        assert_eq!(reversed.winding_number(0.5, 0.5), -1);
    }

    #[test]
    fn test_open_chain_is_not_closed() {
        let open = Loop::new(vec![
            Edge::new(0, 0, Direction::Right),
            Edge::new(1, 0, Direction::Down),
        ]);
        assert!(!open.is_closed());
        assert!(!Loop::new(vec![]).is_closed());
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!("left".parse::<Direction>().ok(), Some(Direction::Left));
    }
}
