//! Measured row heights and the prefix-sum offsets derived from them.

use super::DEFAULT_ROW_HEIGHT_ESTIMATE;

/// Per-index measured row heights with a fixed fallback estimate.
///
/// Entries are keyed by position, not by content. Any edit that changes which
/// content sits at an index must invalidate from that index on, otherwise a
/// height would stay attached to the wrong row.
#[derive(Clone, Debug)]
pub struct HeightCache {
    measured: Vec<Option<f32>>,
    measured_count: usize,
    estimate: f32,
}

impl Default for HeightCache {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT_ESTIMATE)
    }
}

impl HeightCache {
    /// Creates an empty cache. A non-finite or non-positive estimate falls
    /// back to [`DEFAULT_ROW_HEIGHT_ESTIMATE`] so layout never sees zero rows.
    pub fn new(estimate: f32) -> Self {
        let estimate = if estimate.is_finite() && estimate > 0.0 {
            estimate
        } else {
            log::warn!(
                "HeightCache: invalid estimate {}, using {}",
                estimate,
                DEFAULT_ROW_HEIGHT_ESTIMATE
            );
            DEFAULT_ROW_HEIGHT_ESTIMATE
        };
        Self {
            measured: Vec::new(),
            measured_count: 0,
            estimate,
        }
    }

    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    /// Stores a measured height, replacing any prior value.
    ///
    /// Returns whether the stored value changed. Non-finite and non-positive
    /// heights are ignored.
    pub fn record_height(&mut self, index: usize, height: f32) -> bool {
        if !height.is_finite() || height <= 0.0 {
            log::warn!("HeightCache: ignoring height {} for row {}", height, index);
            return false;
        }
        if index >= self.measured.len() {
            self.measured.resize(index + 1, None);
        }
        let slot = &mut self.measured[index];
        match *slot {
            Some(previous) if previous == height => false,
            Some(_) => {
                *slot = Some(height);
                true
            }
            None => {
                *slot = Some(height);
                self.measured_count += 1;
                true
            }
        }
    }

    /// The measured height if present, else the estimate.
    pub fn height(&self, index: usize) -> f32 {
        self.measured(index).unwrap_or(self.estimate)
    }

    pub fn measured(&self, index: usize) -> Option<f32> {
        self.measured.get(index).copied().flatten()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured(index).is_some()
    }

    pub fn measured_count(&self) -> usize {
        self.measured_count
    }

    /// Drops every entry at or after `index`.
    pub fn invalidate_from(&mut self, index: usize) {
        if index >= self.measured.len() {
            return;
        }
        let dropped = self.measured[index..].iter().filter(|h| h.is_some()).count();
        self.measured.truncate(index);
        self.measured_count -= dropped;
        log::trace!("HeightCache: invalidated {} rows from {}", dropped, index);
    }

    pub fn clear_all(&mut self) {
        self.measured.clear();
        self.measured_count = 0;
    }

    /// Builds the prefix-sum offsets for the first `row_count` rows.
    pub fn offsets(&self, row_count: usize) -> RowOffsets {
        let mut starts = Vec::with_capacity(row_count + 1);
        let mut running = 0.0f32;
        starts.push(running);
        for index in 0..row_count {
            running += self.height(index);
            starts.push(running);
        }
        RowOffsets { starts }
    }
}

/// Running prefix sum of row heights.
///
/// `start(i)` is the content-space top of row `i`; the table has one entry
/// more than there are rows, the last being the total content height.
#[derive(Clone, Debug, PartialEq)]
pub struct RowOffsets {
    starts: Vec<f32>,
}

impl Default for RowOffsets {
    fn default() -> Self {
        Self { starts: vec![0.0] }
    }
}

impl RowOffsets {
    /// Builds offsets from explicit heights.
    pub fn from_heights(heights: &[f32]) -> Self {
        let mut starts = Vec::with_capacity(heights.len() + 1);
        let mut running = 0.0f32;
        starts.push(running);
        for height in heights {
            running += height;
            starts.push(running);
        }
        Self { starts }
    }

    pub fn row_count(&self) -> usize {
        self.starts.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn total_height(&self) -> f32 {
        self.starts[self.starts.len() - 1]
    }

    pub fn start(&self, index: usize) -> f32 {
        self.starts[index]
    }

    pub fn end(&self, index: usize) -> f32 {
        self.starts[index + 1]
    }

    pub fn height(&self, index: usize) -> f32 {
        self.end(index) - self.start(index)
    }

    pub fn midpoint(&self, index: usize) -> f32 {
        (self.start(index) + self.end(index)) / 2.0
    }

    /// Row containing content-space `y`, clamped to the first and last rows.
    pub fn index_at(&self, y: f32) -> Option<usize> {
        let rows = self.row_count();
        if rows == 0 {
            return None;
        }
        let after = self.starts[..rows].partition_point(|&start| start <= y);
        Some(after.saturating_sub(1).min(rows - 1))
    }

    /// Number of rows whose midpoint lies strictly above `y`.
    pub fn rows_with_midpoint_above(&self, y: f32) -> usize {
        let (mut low, mut high) = (0usize, self.row_count());
        while low < high {
            let mid = low + (high - low) / 2;
            if self.midpoint(mid) < y {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low
    }
}
