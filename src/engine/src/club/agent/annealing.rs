use crate::negotiation::AnnealingConfig;
use log::info;
use rand::RngExt;
use rand::rngs::StdRng;
use serde::Serialize;

/// Result of the one-time temperature calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub avg_delta: f64,
    pub effective_rate: f64,
    pub temperature: f64,
    pub temperature_step: f64,
    pub samples: u64,
    pub fallback: bool,
}

/// Simulated-annealing vote state of one club.
///
/// Runs through three phases keyed by the vote counter: warm-up (fixed acceptance,
/// losses are sampled), calibration (fires once when the counter reaches
/// `calibration_iterations`) and linear cooling down to `min_temperature`.
#[derive(Debug, Clone)]
pub struct AnnealingController {
    config: AnnealingConfig,
    temperature: f64,
    temperature_step: f64,
    iteration: u64,
    delta_sum: f64,
    delta_count: u64,
    calibrations: u32,
    report: Option<CalibrationReport>,
}

impl AnnealingController {
    pub fn new(config: AnnealingConfig) -> Self {
        AnnealingController {
            temperature: config.initial_temperature,
            config,
            temperature_step: 0.0,
            iteration: 0,
            delta_sum: 0.0,
            delta_count: 0,
            calibrations: 0,
            report: None,
        }
    }

    /// Accept or reject a move from `current` to `proposed` utility.
    pub fn decide(&mut self, current: f64, proposed: f64, rng: &mut StdRng) -> bool {
        self.advance();

        if proposed > current {
            return true;
        }

        let delta = current - proposed;
        if !delta.is_finite() {
            return false;
        }

        if self.is_warming_up() {
            self.delta_sum += delta;
            self.delta_count += 1;

            return rng.random::<f64>() < self.config.min_acceptance_rate;
        }

        match acceptance_probability(delta, self.temperature) {
            Some(probability) => rng.random::<f64>() < probability,
            None => false,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn temperature_step(&self) -> f64 {
        self.temperature_step
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn calibration_count(&self) -> u32 {
        self.calibrations
    }

    pub fn calibration_report(&self) -> Option<&CalibrationReport> {
        self.report.as_ref()
    }

    pub fn is_warming_up(&self) -> bool {
        self.iteration < self.config.calibration_iterations
    }

    fn advance(&mut self) {
        self.iteration += 1;

        if self.iteration == self.config.calibration_iterations {
            self.calibrate();
        } else if self.iteration > self.config.calibration_iterations {
            self.temperature =
                (self.temperature - self.temperature_step).max(self.config.min_temperature);
        }
    }

    fn calibrate(&mut self) {
        let config = &self.config;
        let calibration = config.calibration_iterations as f64;

        let avg_delta = if self.delta_count > 0 {
            self.delta_sum / self.delta_count as f64
        } else {
            1.0
        };

        let effective_rate = (config.min_acceptance_rate
            - (calibration - self.delta_count as f64) / calibration)
            .max(config.min_calibration_rate);

        let derived = if avg_delta > 0.0 && effective_rate > 0.0 && effective_rate < 1.0 {
            Some(-avg_delta / effective_rate.ln()).filter(|t| t.is_finite() && *t > 0.0)
        } else {
            None
        };

        let fallback = derived.is_none();
        let temperature = derived
            .unwrap_or(config.fallback_temperature)
            .max(config.min_temperature);

        let cooling_rounds = config.max_iterations.saturating_sub(config.calibration_iterations);
        let temperature_step = if cooling_rounds > 0 {
            temperature / cooling_rounds as f64
        } else {
            0.0
        };

        self.temperature = temperature;
        self.temperature_step = temperature_step;
        self.calibrations += 1;

        let report = CalibrationReport {
            avg_delta,
            effective_rate,
            temperature,
            temperature_step,
            samples: self.delta_count,
            fallback,
        };

        info!(
            "temperature calibrated: T = {:.4}, step = {:.6}, avg delta = {:.4}, rate = {:.3}, samples = {}{}",
            report.temperature,
            report.temperature_step,
            report.avg_delta,
            report.effective_rate,
            report.samples,
            if report.fallback { " (fallback)" } else { "" }
        );

        self.report = Some(report);
    }
}

/// Metropolis acceptance `exp(-delta / T)`, `None` when it cannot be computed.
pub fn acceptance_probability(delta: f64, temperature: f64) -> Option<f64> {
    if !(temperature > 0.0) || !temperature.is_finite() || delta.is_nan() {
        return None;
    }

    let probability = (-delta / temperature).exp();

    if probability.is_finite() {
        Some(probability)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config(calibration: u64, max: u64) -> AnnealingConfig {
        AnnealingConfig {
            calibration_iterations: calibration,
            max_iterations: max,
            ..AnnealingConfig::default()
        }
    }

    #[test]
    fn test_calibration_with_fixed_delta() {
        let mut controller = AnnealingController::new(config(100, 1_000));
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            controller.decide(10.0, 5.0, &mut rng);
        }

        let report = *controller.calibration_report().unwrap();

        // the calibrating vote itself is not sampled: 99 of 100
        assert_eq!(report.samples, 99);
        assert_eq!(report.avg_delta, 5.0);
        assert!((report.effective_rate - 0.79).abs() < 1e-12);
        assert!(!report.fallback);

        let expected = -5.0 / report.effective_rate.ln();
        assert!((report.temperature - expected).abs() < 1e-12);
        assert!((controller.temperature() - expected).abs() < 1e-12);
        assert!((report.temperature_step - expected / 900.0).abs() < 1e-12);
    }

    #[test]
    fn test_calibration_fires_once() {
        let mut controller = AnnealingController::new(config(10, 100));
        let mut rng = StdRng::seed_from_u64(2);

        for i in 0..500 {
            controller.decide(100.0, 100.0 - (i % 7) as f64, &mut rng);
        }

        assert_eq!(controller.calibration_count(), 1);
        assert_eq!(controller.iteration(), 500);
    }

    #[test]
    fn test_no_losses_calibrates_with_unit_delta() {
        let mut controller = AnnealingController::new(config(10, 100));
        let mut rng = StdRng::seed_from_u64(3);

        for i in 0..10 {
            assert!(controller.decide(i as f64, i as f64 + 1.0, &mut rng));
        }

        let report = controller.calibration_report().unwrap();

        assert_eq!(report.samples, 0);
        assert_eq!(report.avg_delta, 1.0);
        // 0.8 - 10/10 < 0.1 so the floor rate applies
        assert!((report.effective_rate - 0.1).abs() < 1e-12);
        assert!((report.temperature - (-1.0 / 0.1f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_zero_deltas_use_fallback_temperature() {
        let mut controller = AnnealingController::new(config(10, 100));
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..10 {
            controller.decide(5.0, 5.0, &mut rng);
        }

        let report = controller.calibration_report().unwrap();

        assert!(report.fallback);
        assert_eq!(report.temperature, AnnealingConfig::default().fallback_temperature);
    }

    #[test]
    fn test_improvements_are_always_accepted() {
        let mut controller = AnnealingController::new(config(50, 200));
        let mut rng = StdRng::seed_from_u64(5);

        for i in 0..2_000 {
            let current = (i % 13) as f64;
            assert!(controller.decide(current, current + 0.001, &mut rng));
        }
    }

    #[test]
    fn test_temperature_never_drops_below_floor() {
        let mut controller = AnnealingController::new(config(20, 60));
        let mut rng = StdRng::seed_from_u64(6);
        let floor = AnnealingConfig::default().min_temperature;

        for i in 0..1_000 {
            controller.decide(50.0, 50.0 - (i % 5) as f64 * 3.0, &mut rng);

            if !controller.is_warming_up() {
                assert!(controller.temperature() >= floor);
            }
        }

        assert_eq!(controller.temperature(), floor);
    }

    #[test]
    fn test_degenerate_inputs_reject_without_panicking() {
        let mut controller = AnnealingController::new(config(1, 10));
        let mut rng = StdRng::seed_from_u64(7);

        assert!(!controller.decide(f64::NAN, 1.0, &mut rng));
        assert!(!controller.decide(f64::INFINITY, 1.0, &mut rng));
        assert!(!controller.decide(1.0e308, -1.0e308, &mut rng));
        assert!(!controller.decide(1.0, f64::NAN, &mut rng));
        assert!(controller.decide(1.0, f64::INFINITY, &mut rng));
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(0.0, 1.0), Some(1.0));
        assert!((acceptance_probability(1.0, 1.0).unwrap() - (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(acceptance_probability(1.0e9, 1.0e-3), Some(0.0));
        assert_eq!(acceptance_probability(1.0, 0.0), None);
        assert_eq!(acceptance_probability(f64::NAN, 1.0), None);
        assert_eq!(acceptance_probability(-1.0e9, 1.0e-3), None);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let run = |seed| {
            let mut controller = AnnealingController::new(config(30, 300));
            let mut rng = StdRng::seed_from_u64(seed);

            (0..300)
                .map(|i| controller.decide(10.0, 10.0 - (i % 4) as f64, &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(11), run(11));
    }
}
