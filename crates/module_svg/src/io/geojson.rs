use geojson::{Feature, FeatureCollection, Geometry, Value};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    outline::TracedOutline,
    types::{Direction, Loop, Winding},
};

/// Properties attached to each traced shape feature
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[schemars(description = "Properties for traced shape features")]
pub struct ShapeProperties {
    #[schemars(description = "Discovery order of the shape's exterior loop")]
    pub id: usize,
    #[schemars(description = "Number of unit edges across all rings")]
    pub edge_count: usize,
    #[schemars(description = "Filled area in modules, holes subtracted")]
    pub area: f64,
    #[schemars(description = "Number of interior rings")]
    pub hole_count: usize,
}

/// An exterior loop and the holes directly inside it, as loop indices.
struct Shape {
    exterior: usize,
    holes: Vec<usize>,
}

fn ring(edge_loop: &Loop) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = edge_loop
        .vertices()
        .iter()
        .map(|v| vec![v.x as f64, v.y as f64])
        .collect();
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    ring
}

/// Centre of the module to the right of the loop's first edge. For a hole
/// this is a dark module of the region surrounding it.
fn right_of_start(edge_loop: &Loop) -> Option<(f64, f64)> {
    let edge = edge_loop.edges().first()?;
    let (x, y) = (edge.start.x, edge.start.y);
    let (col, row) = match edge.direction {
        Direction::Right => (x, y),
        Direction::Down => (x.checked_sub(1)?, y),
        Direction::Left => (x.checked_sub(1)?, y.checked_sub(1)?),
        Direction::Up => (x, y.checked_sub(1)?),
    };
    Some((col as f64 + 0.5, row as f64 + 0.5))
}

/// Attach every hole to the smallest exterior loop around it.
///
/// A hole with no enclosing exterior becomes a shape of its own.
fn nest_holes(loops: &[Loop]) -> Vec<Shape> {
    let mut shapes: Vec<Shape> = loops
        .iter()
        .enumerate()
        .filter(|(_, l)| l.orientation() == Winding::Clockwise)
        .map(|(exterior, _)| Shape { exterior, holes: Vec::new() })
        .collect();

    for (i, hole) in loops.iter().enumerate() {
        if hole.orientation() != Winding::CounterClockwise {
            continue;
        }

        let enclosing = right_of_start(hole).and_then(|(px, py)| {
            shapes
                .iter()
                .enumerate()
                .map(|(k, shape)| (k, &loops[shape.exterior]))
                .filter(|(_, outer)| outer.orientation() == Winding::Clockwise)
                .filter(|(_, outer)| outer.winding_number(px, py) != 0)
                .min_by(|(_, a), (_, b)| a.signed_area().total_cmp(&b.signed_area()))
                .map(|(k, _)| k)
        });

        match enclosing {
            Some(k) => shapes[k].holes.push(i),
            None => {
                tracing::warn!(loop_id = i, "hole has no enclosing loop");
                shapes.push(Shape { exterior: i, holes: Vec::new() });
            }
        }
    }

    shapes.sort_by_key(|shape| shape.exterior);
    shapes
}

impl TracedOutline {
    /// One polygon feature per exterior loop, in discovery order. Holes are
    /// written as interior rings after the exterior ring.
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let shapes = nest_holes(&self.loops);
        let mut features = Vec::with_capacity(shapes.len());

        for shape in &shapes {
            let exterior = &self.loops[shape.exterior];
            let holes = shape.holes.iter().map(|&i| &self.loops[i]);

            // Exterior first, then holes
            let mut coordinates = vec![ring(exterior)];
            coordinates.extend(holes.clone().map(ring));

            let properties = ShapeProperties {
                id: shape.exterior,
                edge_count: exterior.len() + holes.clone().map(Loop::len).sum::<usize>(),
                area: exterior.signed_area() + holes.map(Loop::signed_area).sum::<f64>(),
                hole_count: shape.holes.len(),
            };
            let properties = serde_json::to_value(properties)?;

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(coordinates))),
                id: Some(geojson::feature::Id::Number(serde_json::Number::from(shape.exterior))),
                properties: properties.as_object().cloned(),
                foreign_members: None,
            });
        }

        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("module_count".to_string(), serde_json::Value::from(self.module_count));
        foreign_members.insert("loop_count".to_string(), serde_json::Value::from(self.loops.len()));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BitGrid;

    fn properties(feature: &Feature) -> ShapeProperties {
        serde_json::from_value(serde_json::Value::Object(
            feature.properties.clone().expect("Should have properties"),
        ))
        .expect("Should deserialize")
    }

    fn rings(feature: &Feature) -> &Vec<Vec<Vec<f64>>> {
        match &feature.geometry.as_ref().expect("Should have geometry").value {
            Value::Polygon(rings) => rings,
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn test_ring_exports_hole_as_interior_ring() {
        let grid = BitGrid::parse("###\n#.#\n###").expect("Should parse");
        let outline = TracedOutline::trace(&grid).expect("Should trace");
        let collection = outline.to_geojson().expect("Should export");

        assert_eq!(collection.features.len(), 1);
        let members = collection.foreign_members.as_ref().expect("Should have metadata");
        assert_eq!(members["module_count"], 3);
        assert_eq!(members["loop_count"], 2);

        assert_eq!(
            properties(&collection.features[0]),
            ShapeProperties { id: 0, edge_count: 16, area: 8.0, hole_count: 1 }
        );

        let rings = rings(&collection.features[0]);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 13);
        assert_eq!(rings[1].len(), 5);
        assert_eq!(rings[0].first(), rings[0].last());
        assert_eq!(rings[1][0], vec![1.0, 1.0]);
    }

    #[test]
    fn test_island_in_hole_is_its_own_shape() {
        let grid = BitGrid::parse(
            "#####..\n\
             #...#..\n\
             #.#.#..\n\
             #...#..\n\
             #####..\n\
             .......\n\
             ......#",
        )
        .expect("Should parse");
        let outline = TracedOutline::trace(&grid).expect("Should trace");
        let collection = outline.to_geojson().expect("Should export");

        let shapes: Vec<ShapeProperties> = collection.features.iter().map(properties).collect();
        let hole_counts: Vec<usize> = shapes.iter().map(|s| s.hole_count).collect();
        let areas: Vec<f64> = shapes.iter().map(|s| s.area).collect();
        assert_eq!(hole_counts, vec![1, 0, 0]);
        assert_eq!(areas, vec![16.0, 1.0, 1.0]);
        assert_eq!(rings(&collection.features[0]).len(), 2);
    }

    #[test]
    fn test_geojson_string_parses() {
        let grid = BitGrid::parse("#.\n.#").expect("Should parse");
        let outline = TracedOutline::trace(&grid).expect("Should trace");
        let text = outline.to_geojson_string().expect("Should serialize");

        let parsed: FeatureCollection = text.parse().expect("Should parse back");
        assert_eq!(parsed.features.len(), outline.outer_count());
        assert!(parsed.features.iter().all(|f| rings(f).len() == 1));
    }
}
