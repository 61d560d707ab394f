use serde::Serialize;

/// Descriptive statistics of a utility series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilityStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub range: f64,
}

impl UtilityStatistics {
    pub fn from_series(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len() as f64;
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let mean = sorted.iter().sum::<f64>() / count;

        let middle = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[middle - 1] + sorted[middle]) / 2.0
        } else {
            sorted[middle]
        };

        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        Some(UtilityStatistics {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
            range: max - min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series() {
        assert!(UtilityStatistics::from_series(&[]).is_none());
    }

    #[test]
    fn test_statistics() {
        let stats = UtilityStatistics::from_series(&[4.0, 2.0, 8.0, 6.0]).unwrap();

        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 8.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.range, 6.0);
        assert!((stats.std_dev - 5.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_odd_median() {
        let stats = UtilityStatistics::from_series(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.0);
    }
}
