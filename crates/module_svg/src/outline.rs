use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{decode_path, encode_path, extract_edges, trace_loops},
    error::Result,
    grid::{BitGrid, ModuleGrid},
    types::{Loop, Winding},
};

/// The dark region of a grid as a set of closed boundary loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedOutline {
    /// Side length of the source grid
    pub module_count: usize,
    /// Number of unit boundary edges extracted from the grid
    pub edge_count: usize,
    /// Loops in discovery order
    pub loops: Vec<Loop>,
}

impl TracedOutline {
    /// Extract, index and trace the boundary of `grid`.
    pub fn trace<G: ModuleGrid + ?Sized>(grid: &G) -> Result<Self> {
        let index = extract_edges(grid);
        let edge_count = index.len();
        let loops = trace_loops(index)?;

        tracing::debug!(
            module_count = grid.module_count(),
            edge_count,
            loops = loops.len(),
            "traced outline"
        );

        Ok(Self {
            module_count: grid.module_count(),
            edge_count,
            loops,
        })
    }

    /// Rebuild an outline from path data produced by [`TracedOutline::path_data`].
    pub fn from_path_data(module_count: usize, data: &str) -> Result<Self> {
        let loops = decode_path(data, module_count)?;
        let edge_count = loops.iter().map(Loop::len).sum();
        Ok(Self {
            module_count,
            edge_count,
            loops,
        })
    }

    /// Run-length encoded path data in grid units.
    pub fn path_data(&self) -> String {
        encode_path(&self.loops)
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn outer_count(&self) -> usize {
        self.loops
            .iter()
            .filter(|l| l.orientation() == Winding::Clockwise)
            .count()
    }

    pub fn hole_count(&self) -> usize {
        self.loops.len() - self.outer_count()
    }

    /// Total number of path directives once encoded (moves and closes included).
    pub fn command_count(&self) -> usize {
        self.loops
            .iter()
            .map(|l| crate::algorithms::encode_loop(l).len())
            .sum()
    }

    /// Fill the outline back into a grid using the nonzero rule, sampling
    /// each module at its centre.
    pub fn rasterize(&self) -> BitGrid {
        BitGrid::from_fn(self.module_count, |row, col| {
            let (px, py) = (col as f64 + 0.5, row as f64 + 0.5);
            self.loops
                .iter()
                .map(|l| l.winding_number(px, py))
                .sum::<i32>()
                != 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_rasterizes_with_hole() {
        let grid = BitGrid::parse("###\n#.#\n###").expect("Should parse");
        let outline = TracedOutline::trace(&grid).expect("Should trace");

        assert_eq!(outline.edge_count, 16);
        assert_eq!(outline.outer_count(), 1);
        assert_eq!(outline.hole_count(), 1);
        assert_eq!(outline.rasterize(), grid);
    }

    #[test]
    fn test_path_data_survives_decoding() {
        let grid = BitGrid::parse("##..\n#.#.\n.##.\n...#").expect("Should parse");
        let outline = TracedOutline::trace(&grid).expect("Should trace");

        let decoded = TracedOutline::from_path_data(4, &outline.path_data()).expect("Should decode");
        assert_eq!(decoded.edge_count, outline.edge_count);
        assert_eq!(decoded.rasterize(), grid);
    }

    #[test]
    fn test_empty_grid() {
        let outline = TracedOutline::trace(&BitGrid::new(5)).expect("Should trace");
        assert!(outline.is_empty());
        assert_eq!(outline.path_data(), "");
        assert_eq!(outline.rasterize(), BitGrid::new(5));
    }
}
