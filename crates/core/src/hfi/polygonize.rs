//! Raster to polygon conversion
//!
//! Cells are grouped into 4-connected components of equal class. Each
//! component's outline is traced along cell edges, so polygons share exact
//! vertices with their neighbours and carry holes where lower-class cells
//! are enclosed.

use geo::orient::{Direction, Orient};
use geo::{Coord, LineString, Polygon};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classify::{HfiThreshold, RunParameters};
use super::raster::HfiGrid;
use crate::config::EngineConfig;

/// One connected region of elevated HFI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedHfiPolygon {
    pub threshold: HfiThreshold,
    pub run: RunParameters,
    /// Number of raster cells in the region
    pub cell_count: usize,
    /// Region outline in the raster's world coordinates
    pub geometry: Polygon<f64>,
}

/// Class of every cell, nodata counting as not advisory
fn classify_cells(grid: &HfiGrid, config: &EngineConfig) -> Vec<HfiThreshold> {
    let mut classes = Vec::with_capacity(grid.width() * grid.height());
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            classes.push(match grid.get(column, row) {
                Some(hfi) => HfiThreshold::classify_with(hfi, config),
                None => HfiThreshold::NotAdvisory,
            });
        }
    }
    classes
}

/// Component label per cell (`usize::MAX` for unlabelled) and the cells of
/// each elevated component
fn label_components(
    classes: &[HfiThreshold],
    width: usize,
    height: usize,
) -> (Vec<usize>, Vec<Vec<usize>>) {
    let mut labels = vec![usize::MAX; classes.len()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..classes.len() {
        if labels[seed] != usize::MAX || !classes[seed].is_elevated() {
            continue;
        }
        let label = components.len();
        let class = classes[seed];
        let mut cells = Vec::new();
        labels[seed] = label;
        stack.push(seed);
        while let Some(cell) = stack.pop() {
            cells.push(cell);
            let (column, row) = (cell % width, cell / width);
            let neighbours = [
                (column > 0).then(|| cell - 1),
                (column + 1 < width).then(|| cell + 1),
                (row > 0).then(|| cell - width),
                (row + 1 < height).then(|| cell + width),
            ];
            for next in neighbours.into_iter().flatten() {
                if labels[next] == usize::MAX && classes[next] == class {
                    labels[next] = label;
                    stack.push(next);
                }
            }
        }
        components.push(cells);
    }
    (labels, components)
}

type Vertex = (i64, i64);

/// Boundary edges of a component, each with the component on its left
/// (counter-clockwise in column/row space)
fn boundary_edges(
    cells: &[usize],
    labels: &[usize],
    label: usize,
    width: usize,
    height: usize,
) -> Vec<(Vertex, Vertex)> {
    let same = |column: i64, row: i64| {
        column >= 0
            && row >= 0
            && (column as usize) < width
            && (row as usize) < height
            && labels[row as usize * width + column as usize] == label
    };
    let mut edges = Vec::new();
    for &cell in cells {
        let c = (cell % width) as i64;
        let r = (cell / width) as i64;
        if !same(c, r - 1) {
            edges.push(((c, r), (c + 1, r)));
        }
        if !same(c + 1, r) {
            edges.push(((c + 1, r), (c + 1, r + 1)));
        }
        if !same(c, r + 1) {
            edges.push(((c + 1, r + 1), (c, r + 1)));
        }
        if !same(c - 1, r) {
            edges.push(((c, r + 1), (c, r)));
        }
    }
    edges
}

/// z component of the cross product of two edge directions
fn turn(incoming: Vertex, outgoing: Vertex) -> i64 {
    incoming.0 * outgoing.1 - incoming.1 * outgoing.0
}

/// Link edges into closed rings
///
/// Where two diagonal cells meet at a vertex there are two candidate
/// continuations; taking the left turn keeps each cell's corner on its own
/// ring, which is what separates 4-connected regions. With that rule every
/// edge has exactly one successor and one predecessor, so following
/// successors always returns to the starting edge.
fn trace_rings(edges: &[(Vertex, Vertex)]) -> Vec<Vec<Vertex>> {
    let mut outgoing: FxHashMap<Vertex, Vec<usize>> = FxHashMap::default();
    for (index, (start, _)) in edges.iter().enumerate() {
        outgoing.entry(*start).or_default().push(index);
    }
    let direction = |index: usize| {
        let (start, end) = edges[index];
        (end.0 - start.0, end.1 - start.1)
    };
    let successor = |index: usize| {
        let incoming = direction(index);
        outgoing
            .get(&edges[index].1)
            .into_iter()
            .flatten()
            .copied()
            .max_by_key(|&candidate| turn(incoming, direction(candidate)))
    };

    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();
    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        let mut ring = Vec::new();
        let mut current = first;
        loop {
            used[current] = true;
            ring.push(edges[current].0);
            match successor(current) {
                Some(next) if next != first && !used[next] => current = next,
                _ => break,
            }
        }
        rings.push(remove_collinear(ring));
    }
    rings
}

fn remove_collinear(ring: Vec<Vertex>) -> Vec<Vertex> {
    let n = ring.len();
    if n < 4 {
        return ring;
    }
    (0..n)
        .filter(|&i| {
            let prev = ring[(i + n - 1) % n];
            let here = ring[i];
            let next = ring[(i + 1) % n];
            turn((here.0 - prev.0, here.1 - prev.1), (next.0 - here.0, next.1 - here.1)) != 0
        })
        .map(|i| ring[i])
        .collect()
}

/// Twice the signed area of a closed ring
fn doubled_area(ring: &[Vertex]) -> i64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (x0, y0) = ring[i];
            let (x1, y1) = ring[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum()
}

fn to_world(ring: &[Vertex], grid: &HfiGrid) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = ring
        .iter()
        .map(|&(column, row)| {
            let (x, y) = grid.transform().apply(column as f64, row as f64);
            Coord { x, y }
        })
        .collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    LineString::new(coords)
}

/// Trace every elevated region of the grid into a polygon
///
/// Regions of the same class that touch only at a corner stay separate.
pub fn polygonize(
    grid: &HfiGrid,
    run: &RunParameters,
    config: &EngineConfig,
) -> Vec<ClassifiedHfiPolygon> {
    let (width, height) = (grid.width(), grid.height());
    let classes = classify_cells(grid, config);
    let (labels, components) = label_components(&classes, width, height);

    let mut polygons = Vec::with_capacity(components.len());
    for (label, cells) in components.iter().enumerate() {
        let edges = boundary_edges(cells, &labels, label, width, height);
        let (mut shells, holes): (Vec<_>, Vec<_>) = trace_rings(&edges)
            .into_iter()
            .partition(|ring| doubled_area(ring) > 0);
        // A 4-connected region has a single outer ring
        shells.sort_by_key(|ring| std::cmp::Reverse(doubled_area(ring)));
        let mut shells = shells.into_iter();
        let Some(exterior) = shells.next() else {
            continue;
        };
        let interiors = holes.iter().map(|ring| to_world(ring, grid)).collect();
        let geometry =
            Polygon::new(to_world(&exterior, grid), interiors).orient(Direction::Default);
        polygons.push(ClassifiedHfiPolygon {
            threshold: classes[cells[0]],
            run: *run,
            cell_count: cells.len(),
            geometry,
        });
        for extra in shells {
            polygons.push(ClassifiedHfiPolygon {
                threshold: classes[cells[0]],
                run: *run,
                cell_count: 0,
                geometry: Polygon::new(to_world(&extra, grid), vec![]).orient(Direction::Default),
            });
        }
    }

    debug!(
        "Polygonized {}x{} HFI grid into {} polygons",
        width,
        height,
        polygons.len()
    );
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hfi::classify::RunType;
    use crate::hfi::raster::GeoTransform;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, TimeZone, Utc};
    use geo::Area;

    fn run() -> RunParameters {
        RunParameters {
            run_type: RunType::Forecast,
            run_datetime: Utc.with_ymd_and_hms(2022, 7, 1, 12, 0, 0).unwrap(),
            for_date: NaiveDate::from_ymd_opt(2022, 7, 2).unwrap(),
        }
    }

    fn grid(width: usize, rows: &[&[f64]]) -> HfiGrid {
        let values = rows.iter().flat_map(|r| r.iter().copied()).collect();
        HfiGrid::new(width, rows.len(), values, Some(-1.0), GeoTransform::identity()).unwrap()
    }

    const A: f64 = 5000.0;
    const W: f64 = 12000.0;
    const L: f64 = 100.0;

    #[test]
    fn test_single_block_merges() {
        let g = grid(3, &[&[A, A, L], &[A, A, L], &[L, L, L]]);
        let polygons = polygonize(&g, &run(), &EngineConfig::default());
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].threshold, HfiThreshold::Advisory);
        assert_eq!(polygons[0].cell_count, 4);
        assert_relative_eq!(polygons[0].geometry.unsigned_area(), 4.0);
        // Collinear corners are dropped: a square has 4 distinct vertices
        assert_eq!(polygons[0].geometry.exterior().0.len(), 5);
    }

    #[test]
    fn test_diagonal_cells_stay_separate() {
        let g = grid(2, &[&[A, L], &[L, A]]);
        let polygons = polygonize(&g, &run(), &EngineConfig::default());
        assert_eq!(polygons.len(), 2);
        for polygon in &polygons {
            assert_relative_eq!(polygon.geometry.unsigned_area(), 1.0);
        }
    }

    #[test]
    fn test_ring_with_hole() {
        let g = grid(3, &[&[A, A, A], &[A, L, A], &[A, A, A]]);
        let polygons = polygonize(&g, &run(), &EngineConfig::default());
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].geometry.interiors().len(), 1);
        assert_relative_eq!(polygons[0].geometry.unsigned_area(), 8.0);
    }

    #[test]
    fn test_classes_do_not_merge() {
        let g = grid(3, &[&[A, W, W], &[L, L, -1.0]]);
        let polygons = polygonize(&g, &run(), &EngineConfig::default());
        assert_eq!(polygons.len(), 2);
        let warning: Vec<_> = polygons
            .iter()
            .filter(|p| p.threshold == HfiThreshold::Warning)
            .collect();
        assert_eq!(warning.len(), 1);
        assert_eq!(warning[0].cell_count, 2);
        assert_relative_eq!(warning[0].geometry.unsigned_area(), 2.0);
    }

    #[test]
    fn test_world_coordinates_follow_geotransform() {
        let transform =
            GeoTransform::from_gdal([1000.0, 10.0, 0.0, 2000.0, 0.0, -10.0]).unwrap();
        let g = HfiGrid::new(2, 1, vec![A, L], None, transform).unwrap();
        let polygons = polygonize(&g, &run(), &EngineConfig::default());
        assert_eq!(polygons.len(), 1);
        assert_relative_eq!(polygons[0].geometry.unsigned_area(), 100.0);
        assert_relative_eq!(polygons[0].geometry.signed_area(), 100.0);
        let xs: Vec<f64> = polygons[0].geometry.exterior().coords().map(|c| c.x).collect();
        assert!(xs.iter().all(|&x| (1000.0..=1010.0).contains(&x)));
    }

    #[test]
    fn test_all_quiet_grid_yields_nothing() {
        let g = grid(2, &[&[L, L], &[-1.0, 3999.0]]);
        assert!(polygonize(&g, &run(), &EngineConfig::default()).is_empty());
    }
}
