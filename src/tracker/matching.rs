//! Matching utilities for centroid tracking.

use nalgebra::Point2;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::tracker::error::TrackerError;

/// How tracked objects are paired with the detections of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// Rows claim their nearest column, closest rows first.
    #[default]
    Greedy,
    /// Minimum total distance assignment (LAPJV).
    Optimal,
}

/// Compute the Euclidean distance matrix between tracked and input centroids.
///
/// Row `i` is tracked object `i`, column `j` is detection `j`.
pub fn centroid_distance(objects: &[Point2<f32>], inputs: &[Point2<f32>]) -> Array2<f32> {
    let mut dists = Array2::zeros((objects.len(), inputs.len()));
    for (i, o) in objects.iter().enumerate() {
        for (j, p) in inputs.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(o, p);
        }
    }
    dists
}

/// Minimum value and its column for every row. The first minimum wins ties.
///
/// Rows of a zero-column matrix yield `(f32::INFINITY, 0)`.
fn row_min_and_index(dists: &Array2<f32>) -> Vec<(f32, usize)> {
    dists
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((f32::INFINITY, 0), |(min, at), (j, &v)| {
                    if v < min { (v, j) } else { (min, at) }
                })
        })
        .collect()
}

/// Smallest value in every row.
pub fn row_minima(dists: &Array2<f32>) -> Vec<f32> {
    row_min_and_index(dists).into_iter().map(|(v, _)| v).collect()
}

/// Column of the smallest value in every row.
pub fn row_argmin(dists: &Array2<f32>) -> Vec<usize> {
    row_min_and_index(dists).into_iter().map(|(_, j)| j).collect()
}

/// Indices that sort `values` ascending. Equal values keep their input order.
pub fn argsort(values: &[f32]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    idx
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Bound (row, column) pairs in the order they were accepted
    pub matches: Vec<(usize, usize)>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut used_rows = vec![false; num_rows];
        let mut used_cols = vec![false; num_cols];
        for &(r, c) in &matches {
            used_rows[r] = true;
            used_cols[c] = true;
        }
        let unused = |used: Vec<bool>| -> Vec<usize> {
            used.iter()
                .enumerate()
                .filter_map(|(i, &u)| if u { None } else { Some(i) })
                .collect()
        };
        Self {
            matches,
            unmatched_rows: unused(used_rows),
            unmatched_cols: unused(used_cols),
        }
    }
}

/// Greedy nearest-centroid assignment.
///
/// Rows are visited in ascending order of their minimum distance and each
/// one claims its nearest column. A pair is dropped when its row or column
/// has already been claimed, so a row whose nearest column was taken stays
/// unmatched even if another column is free.
pub fn greedy_assignment(dists: &Array2<f32>) -> AssignmentResult {
    let (num_rows, num_cols) = dists.dim();
    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::from_matches(vec![], num_rows, num_cols);
    }

    let rows = argsort(&row_minima(dists));
    let cols = row_argmin(dists);

    let mut used_rows = vec![false; num_rows];
    let mut used_cols = vec![false; num_cols];
    let mut matches = Vec::with_capacity(num_rows.min(num_cols));
    for row in rows {
        let col = cols[row];
        if used_rows[row] || used_cols[col] {
            continue;
        }
        used_rows[row] = true;
        used_cols[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

/// Minimum-cost assignment over the square-padded distance matrix.
pub fn optimal_assignment(dists: &Array2<f32>) -> Result<AssignmentResult, TrackerError> {
    let (num_rows, num_cols) = dists.dim();
    if num_rows == 0 || num_cols == 0 {
        return Ok(AssignmentResult::from_matches(vec![], num_rows, num_cols));
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);
    for ((i, j), &v) in dists.indexed_iter() {
        padded[[i, j]] = v as f64;
    }

    let (row_to_col, _) =
        lapjv::lapjv(&padded).map_err(|e| TrackerError::Assignment(format!("{e:?}")))?;

    let matches = row_to_col
        .iter()
        .enumerate()
        .filter(|&(row, &col)| row < num_rows && col < num_cols)
        .map(|(row, &col)| (row, col))
        .collect();

    Ok(AssignmentResult::from_matches(matches, num_rows, num_cols))
}

/// Run the assignment selected by `strategy`.
pub fn assign(
    dists: &Array2<f32>,
    strategy: MatchStrategy,
) -> Result<AssignmentResult, TrackerError> {
    match strategy {
        MatchStrategy::Greedy => Ok(greedy_assignment(dists)),
        MatchStrategy::Optimal => optimal_assignment(dists),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_centroid_distance() {
        let objects = [Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)];
        let inputs = [Point2::new(3.0, 4.0)];
        let d = centroid_distance(&objects, &inputs);
        assert_eq!(d.dim(), (2, 1));
        assert_relative_eq!(d[[0, 0]], 5.0);
        assert_relative_eq!(d[[1, 0]], (49.0f32 + 36.0).sqrt());
    }

    #[test]
    fn test_row_minima_and_argmin() {
        let d = array![[4.0, 1.0, 1.0], [0.5, 3.0, 2.0]];
        assert_eq!(row_minima(&d), vec![1.0, 0.5]);
        // first minimum wins
        assert_eq!(row_argmin(&d), vec![1, 0]);
    }

    #[test]
    fn test_argsort_is_stable() {
        assert_eq!(argsort(&[3.0, 1.0, 2.0, 1.0]), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_greedy_closest_row_first() {
        // Both rows prefer column 0; row 1 is closer and wins it.
        let d = array![[2.0, 9.0], [1.0, 3.0]];
        let res = greedy_assignment(&d);
        assert_eq!(res.matches, vec![(1, 0)]);
        assert_eq!(res.unmatched_rows, vec![0]);
        assert_eq!(res.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_greedy_tie_keeps_row_order() {
        let d = array![[1.0, 5.0], [1.0, 5.0]];
        let res = greedy_assignment(&d);
        assert_eq!(res.matches, vec![(0, 0)]);
        assert_eq!(res.unmatched_rows, vec![1]);
    }

    #[test]
    fn test_greedy_disjoint_preferences() {
        let d = array![[1.0, 8.0, 9.0], [8.0, 9.0, 2.0]];
        let res = greedy_assignment(&d);
        assert_eq!(res.matches, vec![(0, 0), (1, 2)]);
        assert!(res.unmatched_rows.is_empty());
        assert_eq!(res.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_optimal_resolves_collision() {
        let d = array![[2.0, 9.0], [1.0, 3.0]];
        let res = optimal_assignment(&d).unwrap();
        let mut matches = res.matches.clone();
        matches.sort();
        assert_eq!(matches, vec![(0, 0), (1, 1)]);
        assert!(res.unmatched_rows.is_empty());
        assert!(res.unmatched_cols.is_empty());
    }

    #[test]
    fn test_optimal_rectangular() {
        let d = array![[1.0, 7.0, 3.0]];
        let res = optimal_assignment(&d).unwrap();
        assert_eq!(res.matches, vec![(0, 0)]);
        assert_eq!(res.unmatched_cols, vec![1, 2]);
    }

    #[test]
    fn test_empty_matrix() {
        let d = Array2::<f32>::zeros((2, 0));
        let res = greedy_assignment(&d);
        assert!(res.matches.is_empty());
        assert_eq!(res.unmatched_rows, vec![0, 1]);
    }
}
