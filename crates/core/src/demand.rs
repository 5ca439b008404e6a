//! Historical demand used for volatility estimation.

use serde::{Deserialize, Serialize};

/// Past `units_sold` observations, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalDemandSeries {
    units_sold: Vec<f64>,
}

impl HistoricalDemandSeries {
    pub fn new(units_sold: Vec<f64>) -> Self {
        Self { units_sold }
    }

    pub fn observations(&self) -> &[f64] {
        &self.units_sold
    }

    pub fn len(&self) -> usize {
        self.units_sold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units_sold.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.units_sold.is_empty() {
            return 0.0;
        }
        self.units_sold.iter().sum::<f64>() / (self.units_sold.len() as f64)
    }

    /// Sample standard deviation (n-1).
    ///
    /// Fewer than two observations carry no dispersion information and yield 0.
    pub fn std_dev(&self) -> f64 {
        if self.units_sold.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .units_sold
            .iter()
            .map(|x| {
                let d = x - mean;
                d * d
            })
            .sum::<f64>()
            / ((self.units_sold.len() - 1) as f64);
        var.sqrt()
    }
}

impl From<Vec<f64>> for HistoricalDemandSeries {
    fn from(value: Vec<f64>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<f64> for HistoricalDemandSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sample_std_dev_uses_n_minus_one() {
        let s = HistoricalDemandSeries::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // population std is 2.0; sample std is sqrt(32/7)
        assert!((s.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn short_series_have_zero_dispersion() {
        assert_eq!(HistoricalDemandSeries::default().std_dev(), 0.0);
        assert_eq!(HistoricalDemandSeries::new(vec![42.0]).std_dev(), 0.0);
    }

    proptest! {
        #[test]
        fn constant_series_has_zero_dispersion(v in 0.0f64..1_000.0, n in 2usize..50) {
            let s: HistoricalDemandSeries = std::iter::repeat(v).take(n).collect();
            prop_assert!(s.std_dev().abs() < 1e-9);
        }
    }
}
