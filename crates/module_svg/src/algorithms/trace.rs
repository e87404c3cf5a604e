use crate::{
    algorithms::index::EdgeIndex,
    error::{OutlineError, Result},
    types::Loop,
};

/// Partition every edge in `index` into closed loops.
///
/// A loop starts at the first edge of the first non-empty bucket in scan
/// order. From there the tracer keeps taking the first edge of the bucket
/// at the current end vertex until that bucket is empty. Where several
/// edges leave one vertex the earliest inserted wins, so a loop may pass
/// through a corner it shares with itself; that is still a valid partition.
///
/// Running dry anywhere but the loop's start means the edge set was not
/// balanced, and the whole trace is abandoned.
pub fn trace_loops(mut index: EdgeIndex) -> Result<Vec<Loop>> {
    let mut loops = Vec::new();
    let mut cursor = 0;

    while let Some((slot, first)) = index.first_nonempty_from(cursor) {
        cursor = slot;

        let start = first.start;
        let mut edges = Vec::new();
        let mut next = Some(first);
        let mut reached = start;

        while let Some(edge) = next {
            index.remove(&edge);
            edges.push(edge);
            reached = edge.end();
            next = index.first_at(reached);
        }

        if reached != start {
            return Err(OutlineError::UnclosedLoop {
                start,
                stalled_at: reached,
            });
        }

        tracing::trace!(%start, edges = edges.len(), "closed loop");
        loops.push(Loop::new(edges));
    }

    Ok(loops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::edges::extract_edges,
        grid::BitGrid,
        types::{Direction, Edge, Vertex, Winding},
    };

    fn trace(text: &str) -> Vec<Loop> {
        let grid = BitGrid::parse(text).expect("Should parse");
        trace_loops(extract_edges(&grid)).expect("Should trace")
    }

    #[test]
    fn test_isolated_cell_is_one_square() {
        let loops = trace("...\n.#.\n...");
        assert_eq!(loops.len(), 1);
        assert_eq!(
            loops[0].edges(),
            &[
                Edge::new(1, 1, Direction::Right),
                Edge::new(2, 1, Direction::Down),
                Edge::new(2, 2, Direction::Left),
                Edge::new(1, 2, Direction::Up),
            ]
        );
    }

    #[test]
    fn test_ring_has_outer_loop_and_hole() {
        let loops = trace("###\n#.#\n###");
        assert_eq!(loops.len(), 2);

        assert_eq!(loops[0].len(), 12);
        assert_eq!(loops[0].orientation(), Winding::Clockwise);
        assert_eq!(loops[0].signed_area(), 9.0);

        assert_eq!(loops[1].len(), 4);
        assert_eq!(loops[1].orientation(), Winding::CounterClockwise);
        assert_eq!(loops[1].signed_area(), -1.0);
    }

    #[test]
    fn test_diagonal_neighbours_trace_separately() {
        let loops = trace("#.\n.#");
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].start(), Some(Vertex::new(0, 0)));
        assert_eq!(loops[1].start(), Some(Vertex::new(1, 1)));
        assert!(loops.iter().all(|l| l.len() == 4 && l.is_closed()));
    }

    #[test]
    fn test_all_edges_consumed_exactly_once() {
        let grid = BitGrid::parse("#.#.\n.#.#\n##.#\n#..#").expect("Should parse");
        let index = extract_edges(&grid);
        let extracted: Vec<Edge> = index.iter().copied().collect();

        let loops = trace_loops(index).expect("Should trace");
        let mut traced: Vec<Edge> = loops.iter().flat_map(|l| l.edges().iter().copied()).collect();

        assert_eq!(traced.len(), extracted.len());
        for edge in &extracted {
            let position = traced.iter().position(|e| e == edge).expect("Edge should be traced");
            traced.swap_remove(position);
        }
        assert!(traced.is_empty());
        assert!(loops.iter().all(Loop::is_closed));
    }

    #[test]
    fn test_empty_index_yields_no_loops() {
        assert!(trace("..\n..").is_empty());
    }

    #[test]
    fn test_unbalanced_index_is_rejected() {
        let mut index = EdgeIndex::new(2);
        index.insert(Edge::new(0, 0, Direction::Right));
        index.insert(Edge::new(1, 0, Direction::Down));

        let err = trace_loops(index).unwrap_err();
        assert!(matches!(
            err,
            OutlineError::UnclosedLoop { start, stalled_at }
                if start == Vertex::new(0, 0) && stalled_at == Vertex::new(1, 1)
        ));
    }
}
