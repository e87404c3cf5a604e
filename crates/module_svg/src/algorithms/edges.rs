use crate::{
    algorithms::index::EdgeIndex,
    grid::ModuleGrid,
    types::{Direction, Edge},
};

/// Collect every unit boundary edge of the dark region into an index.
///
/// The grid is read as if padded with one light module on each side.
/// Every edge keeps the dark module on its right, so outer boundaries run
/// clockwise on screen and hole boundaries counter-clockwise.
///
/// Scan order (and so bucket order) is: for each horizontal grid line
/// from top to bottom, the horizontal edges on that line left to right,
/// then the vertical edges of the row below it left to right.
pub fn extract_edges<G: ModuleGrid + ?Sized>(grid: &G) -> EdgeIndex {
    let n = grid.module_count();
    let mut index = EdgeIndex::new(n);

    // Padded lookup: anything outside the grid is light.
    let dark = |row: isize, col: isize| -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < n
            && (col as usize) < n
            && grid.is_dark(row as usize, col as usize)
    };

    for line in 0..=n {
        let above = line as isize - 1;
        let below = line as isize;

        for col in 0..n {
            let edge = match (dark(above, col as isize), dark(below, col as isize)) {
                (true, false) => Some(Edge::new(col + 1, line, Direction::Left)),
                (false, true) => Some(Edge::new(col, line, Direction::Right)),
                _ => None,
            };
            if let Some(edge) = edge {
                index.insert(edge);
            }
        }

        if line == n {
            continue;
        }

        for x in 0..=n {
            let left = x as isize - 1;
            let right = x as isize;
            let edge = match (dark(below, left), dark(below, right)) {
                (true, false) => Some(Edge::new(x, line, Direction::Down)),
                (false, true) => Some(Edge::new(x, line + 1, Direction::Up)),
                _ => None,
            };
            if let Some(edge) = edge {
                index.insert(edge);
            }
        }
    }

    tracing::debug!(module_count = n, edges = index.len(), "extracted boundary edges");
    index
}
