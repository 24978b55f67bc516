//! Matching utilities for centroid tracking.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackingError};
use crate::tracker::rect::{Centroid, Rect};

/// Detection input for the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in TLWH format (x, y, width, height)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    /// Create a detection from a TLWH box, the layout detectors report.
    pub fn new(x: f32, y: f32, width: f32, height: f32, score: f32) -> Self {
        Self {
            bbox: Rect::new(x, y, width, height),
            score,
        }
    }

    /// Like [`Detection::new`], but rejects boxes that break the input contract.
    pub fn try_new(x: f32, y: f32, width: f32, height: f32, score: f32) -> Result<Self> {
        let det = Self::new(x, y, width, height, score);
        det.validate()?;
        Ok(det)
    }

    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self { bbox, score }
    }

    #[inline]
    pub fn centroid(&self) -> Centroid {
        self.bbox.center()
    }

    /// Check the detector contract: finite fields, non-negative origin,
    /// positive size and a confidence in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bbox;

        for (field, value) in [
            ("x", x),
            ("y", y),
            ("width", width),
            ("height", height),
            ("score", self.score),
        ] {
            if !value.is_finite() {
                return Err(TrackingError::detection(field, value));
            }
        }
        if x < 0.0 {
            return Err(TrackingError::detection("x", x));
        }
        if y < 0.0 {
            return Err(TrackingError::detection("y", y));
        }
        if width <= 0.0 {
            return Err(TrackingError::detection("width", width));
        }
        if height <= 0.0 {
            return Err(TrackingError::detection("height", height));
        }
        if !(0.0..=1.0).contains(&self.score) {
            return Err(TrackingError::detection("score", self.score));
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<(f32, f32, f32, f32, f32)> for Detection {
    fn from((x, y, width, height, score): (f32, f32, f32, f32, f32)) -> Self {
        Self::new(x, y, width, height, score)
    }
}

/// Compute the Euclidean distance matrix between track centroids (rows)
/// and detection centroids (columns).
pub fn centroid_distance(track_centroids: &[Centroid], det_centroids: &[Centroid]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_centroids.len(), det_centroids.len()));
    for (i, t) in track_centroids.iter().enumerate() {
        for (j, d) in det_centroids.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(t, d);
        }
    }
    dists
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn all_unmatched(num_rows: usize, num_cols: usize) -> Self {
        Self {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: (0..num_cols).collect(),
        }
    }

    fn from_masks(matches: Vec<(usize, usize)>, row_used: &[bool], col_used: &[bool]) -> Self {
        Self {
            matches,
            unmatched_tracks: unused_indices(row_used),
            unmatched_detections: unused_indices(col_used),
        }
    }
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { None } else { Some(i) })
        .collect()
}

/// Row-minimum greedy assignment.
///
/// Every row proposes its cheapest column (the lowest column index wins a
/// tie). Proposals are visited in ascending order of cost, rows with equal
/// cost in index order, and accepted first-come-first-served while both the
/// row and the column are free and the cost does not exceed `thresh`. A row
/// whose cheapest column was already claimed stays unmatched even if another
/// column is free, so this is not an optimal assignment.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::all_unmatched(num_rows, num_cols);
    }

    let mut proposals: Vec<(usize, usize, f32)> = cost_matrix
        .rows()
        .into_iter()
        .enumerate()
        .map(|(row, costs)| {
            let (col, cost) = costs.iter().enumerate().fold(
                (0, f32::INFINITY),
                |best, (j, &c)| if c < best.1 { (j, c) } else { best },
            );
            (row, col, cost)
        })
        .collect();

    // Stable sort keeps row order among equal minima.
    proposals.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = vec![];

    for (row, col, cost) in proposals {
        if row_used[row] || col_used[col] {
            continue;
        }
        if cost > thresh {
            continue;
        }
        row_used[row] = true;
        col_used[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_masks(matches, &row_used, &col_used)
}

/// Minimum-cost assignment via the Jonker-Volgenant solver, gated by `thresh`.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::all_unmatched(num_rows, num_cols);
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = cost_matrix[[i, j]] as f64;
        }
    }

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = vec![];

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] <= thresh {
                    row_used[row_idx] = true;
                    col_used[col_idx] = true;
                    matches.push((row_idx, col_idx));
                }
            }
        }
        Err(_) => {
            log::warn!("linear assignment failed, leaving all rows unmatched");
        }
    }

    AssignmentResult::from_masks(matches, &row_used, &col_used)
}
