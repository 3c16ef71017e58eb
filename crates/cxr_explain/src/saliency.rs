//! Single-channel spatial importance map.

use serde::{Deserialize, Serialize};

use crate::error::{ExplainError, Result};

/// A normalized single-channel saliency grid.
///
/// Values lie in `[0, 1]`, stored row-major at the target layer's spatial
/// resolution. After normalization the maximum is exactly 1.0 unless the
/// raw map was entirely zero, in which case the map stays all-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaliencyMap {
    values: Vec<f32>,
    height: usize,
    width: usize,
}

impl SaliencyMap {
    /// Build a saliency map from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::SaliencyUnavailable`] if the value count
    /// does not match the grid dimensions.
    pub fn from_values(values: Vec<f32>, height: usize, width: usize) -> Result<Self> {
        if values.len() != height * width {
            return Err(ExplainError::SaliencyUnavailable(format!(
                "saliency grid size {} does not match {}x{}",
                values.len(),
                height,
                width
            )));
        }
        Ok(Self {
            values,
            height,
            width,
        })
    }

    /// Grid height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Grid width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Value at `(row, col)`.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// All values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Maximum value of the grid.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.values.iter().copied().fold(0.0f32, f32::max)
    }

    /// Whether every value is zero (the degenerate gradient case).
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_check() {
        assert!(SaliencyMap::from_values(vec![0.0; 6], 2, 3).is_ok());
        assert!(SaliencyMap::from_values(vec![0.0; 5], 2, 3).is_err());
    }

    #[test]
    fn test_indexing_is_row_major() {
        let map = SaliencyMap::from_values(vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5], 2, 3).unwrap();
        assert_eq!(map.value(0, 2), 0.2);
        assert_eq!(map.value(1, 0), 0.3);
    }

    #[test]
    fn test_all_zero_detection() {
        let zero = SaliencyMap::from_values(vec![0.0; 4], 2, 2).unwrap();
        assert!(zero.is_all_zero());
        assert_eq!(zero.max(), 0.0);

        let nonzero = SaliencyMap::from_values(vec![0.0, 0.0, 1.0, 0.0], 2, 2).unwrap();
        assert!(!nonzero.is_all_zero());
        assert_eq!(nonzero.max(), 1.0);
    }
}
