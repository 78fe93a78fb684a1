//! Heart-rate threshold monitoring.
//!
//! [`evaluate`] is a pure check over a reading sequence. [`VitalsMonitor`]
//! holds the dashboard's inputs and re-runs the check each time the caller
//! changes the threshold or the readings; there is no background polling.

mod alerts;

pub use alerts::*;

use tracing::info;

use crate::config::{ThresholdRange, TrackerConfig};
use crate::models::{VitalsReading, VitalsSummary};

/// Look-back window named in alert text unless configured otherwise.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Alert text for a crossed threshold.
pub fn alert_message(threshold: u32, window_days: u32) -> String {
    format!(
        "Alert: heart rate exceeded {} bpm in last {} days",
        threshold, window_days
    )
}

/// Alert if any reading's heart rate is strictly above `threshold`.
pub fn evaluate(readings: &[VitalsReading], threshold: u32) -> Option<String> {
    evaluate_window(readings, threshold, DEFAULT_WINDOW_DAYS)
}

/// [`evaluate`] with a custom window in the message.
pub fn evaluate_window(
    readings: &[VitalsReading],
    threshold: u32,
    window_days: u32,
) -> Option<String> {
    readings
        .iter()
        .any(|r| r.heart_rate > threshold)
        .then(|| alert_message(threshold, window_days))
}

/// Dashboard monitoring state: threshold, readings, and alert log.
#[derive(Debug, Clone)]
pub struct VitalsMonitor {
    range: ThresholdRange,
    window_days: u32,
    threshold: u32,
    readings: Vec<VitalsReading>,
    alerts: AlertLog,
}

impl VitalsMonitor {
    /// Start at the configured default threshold and evaluate `readings`.
    pub fn new(config: &TrackerConfig, readings: Vec<VitalsReading>) -> Self {
        let mut monitor = Self {
            range: config.threshold,
            window_days: config.alert_window_days,
            threshold: config.threshold.clamp(config.threshold.default),
            readings,
            alerts: AlertLog::new(config.alert_capacity),
        };
        monitor.refresh();
        monitor
    }

    /// Move the threshold (clamped to range) and re-evaluate.
    pub fn set_threshold(&mut self, threshold: u32) -> Option<&str> {
        self.threshold = self.range.clamp(threshold);
        self.refresh()
    }

    /// Replace the readings and re-evaluate.
    pub fn set_readings(&mut self, readings: Vec<VitalsReading>) -> Option<&str> {
        self.readings = readings;
        self.refresh()
    }

    /// Run the check on current inputs. A triggered alert is logged and
    /// returned.
    pub fn refresh(&mut self) -> Option<&str> {
        let alert = evaluate_window(&self.readings, self.threshold, self.window_days)?;
        info!(threshold = self.threshold, "heart rate alert");
        self.alerts.push(alert);
        self.alerts.latest()
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn range(&self) -> ThresholdRange {
        self.range
    }

    pub fn readings(&self) -> &[VitalsReading] {
        &self.readings
    }

    /// Banner text: the most recent alert.
    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.latest()
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn summary(&self) -> VitalsSummary {
        VitalsSummary::from_readings(&self.readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(hr: u32) -> VitalsReading {
        VitalsReading::new("2024-03-01", hr, 120, 5000)
    }

    #[test]
    fn test_message_format() {
        assert_eq!(
            evaluate(&[reading(101)], 100),
            Some("Alert: heart rate exceeded 100 bpm in last 7 days".to_string())
        );
    }

    #[test]
    fn test_equal_is_not_exceeding() {
        assert_eq!(evaluate(&[reading(100)], 100), None);
    }

    #[test]
    fn test_empty_readings() {
        assert_eq!(evaluate(&[], 60), None);
    }

    #[test]
    fn test_custom_window() {
        let alert = evaluate_window(&[reading(90)], 80, 30).unwrap();
        assert!(alert.ends_with("in last 30 days"));
    }

    #[test]
    fn test_monitor_initial_evaluation() {
        let monitor = VitalsMonitor::new(&TrackerConfig::default(), VitalsReading::sample_week());
        assert_eq!(monitor.threshold(), 100);
        assert_eq!(
            monitor.current_alert(),
            Some("Alert: heart rate exceeded 100 bpm in last 7 days")
        );
    }

    #[test]
    fn test_threshold_is_clamped() {
        let mut monitor = VitalsMonitor::new(&TrackerConfig::default(), vec![]);
        monitor.set_threshold(20);
        assert_eq!(monitor.threshold(), 60);
        monitor.set_threshold(500);
        assert_eq!(monitor.threshold(), 140);
    }

    #[test]
    fn test_raising_threshold_stops_new_alerts() {
        let mut monitor = VitalsMonitor::new(&TrackerConfig::default(), vec![reading(110)]);
        assert_eq!(monitor.alerts().len(), 1);

        assert!(monitor.set_threshold(120).is_none());
        assert_eq!(monitor.alerts().len(), 1);
        // banner keeps the last alert until a new one arrives
        assert!(monitor.current_alert().is_some());

        let alert = monitor.set_threshold(90).map(str::to_string);
        assert_eq!(
            alert.as_deref(),
            Some("Alert: heart rate exceeded 90 bpm in last 7 days")
        );
        assert_eq!(monitor.alerts().len(), 2);
    }

    #[test]
    fn test_set_readings_reevaluates() {
        let mut monitor = VitalsMonitor::new(&TrackerConfig::default(), vec![reading(70)]);
        assert!(monitor.current_alert().is_none());

        assert!(monitor.set_readings(vec![reading(70), reading(130)]).is_some());
        assert_eq!(monitor.summary().max_heart_rate, Some(130));
    }

    #[test]
    fn test_log_capped_by_config() {
        let mut monitor = VitalsMonitor::new(&TrackerConfig::default(), vec![reading(139)]);
        for t in 60..80 {
            monitor.set_threshold(t);
        }
        assert_eq!(monitor.alerts().len(), 5);
        assert_eq!(
            monitor.current_alert(),
            Some("Alert: heart rate exceeded 79 bpm in last 7 days")
        );
    }

    proptest! {
        #[test]
        fn prop_alert_iff_some_reading_exceeds(
            threshold in 0u32..250,
            rates in proptest::collection::vec(0u32..250, 0..20),
        ) {
            let readings: Vec<_> = rates.iter().map(|&hr| reading(hr)).collect();
            let expected = rates.iter().any(|&hr| hr > threshold);
            prop_assert_eq!(evaluate(&readings, threshold).is_some(), expected);
        }
    }
}
