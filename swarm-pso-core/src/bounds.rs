//! Box bounds of the search space.

use rand::Rng;

use crate::ConfigError;

/// Validated per-dimension lower/upper limits.
///
/// Every dimension satisfies `lower <= upper` with both ends finite. The width
/// of a dimension doubles as the velocity limit along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Validate and build bounds from the two limit arrays.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ConfigError> {
        if lower.len() != upper.len() {
            return Err(ConfigError::DimensionMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(ConfigError::NoDimensions);
        }
        for (dimension, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ConfigError::NonFiniteBound { dimension });
            }
            if lo > hi {
                return Err(ConfigError::InvertedBound {
                    dimension,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// The same `[lower, upper]` interval repeated over `dimensions` axes.
    pub fn uniform(dimensions: usize, lower: f64, upper: f64) -> Result<Self, ConfigError> {
        Self::new(vec![lower; dimensions], vec![upper; dimensions])
    }

    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width of dimension `i`.
    pub fn span(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    /// Whether every coordinate of `point` lies inside its interval.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimensions()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(x, (lo, hi))| lo <= x && x <= hi)
    }

    /// Draw a point uniformly inside the box.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| uniform_between(rng, lo, hi))
            .collect()
    }
}

/// Uniform draw in `[low, high]`. Degenerate intervals return `low`.
pub(crate) fn uniform_between<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    let u: f64 = rng.gen();
    (low + (high - low) * u).max(low).min(high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_mismatched_lengths() {
        let err = Bounds::new(vec![0.0, 0.0], vec![1.0]).unwrap_err();
        assert_eq!(err, ConfigError::DimensionMismatch { lower: 2, upper: 1 });
    }

    #[test]
    fn rejects_inverted_dimension() {
        let err = Bounds::new(vec![0.0, 3.0], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvertedBound {
                dimension: 1,
                lower: 3.0,
                upper: 2.0
            }
        );
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert_eq!(
            Bounds::new(vec![], vec![]).unwrap_err(),
            ConfigError::NoDimensions
        );
        assert_eq!(
            Bounds::new(vec![0.0, f64::NAN], vec![1.0, 1.0]).unwrap_err(),
            ConfigError::NonFiniteBound { dimension: 1 }
        );
    }

    #[test]
    fn degenerate_dimension_is_allowed() {
        let bounds = Bounds::new(vec![2.0], vec![2.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(bounds.sample(&mut rng), vec![2.0]);
        assert_eq!(bounds.span(0), 0.0);
    }

    #[test]
    fn samples_stay_inside() {
        let bounds = Bounds::new(vec![-10.0, 0.0, 5.0], vec![10.0, 0.5, 6.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            let point = bounds.sample(&mut rng);
            assert!(bounds.contains(&point), "{point:?} escaped");
        }
    }
}
