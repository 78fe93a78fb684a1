//! Vitals readings and dashboard aggregates.

use serde::{Deserialize, Serialize};

/// One daily vitals sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VitalsReading {
    /// Date string as supplied by the source (e.g. "2024-03-01")
    pub time: String,
    /// Beats per minute
    pub heart_rate: u32,
    /// Systolic, mmHg
    pub blood_pressure: u32,
    pub steps: u32,
}

impl VitalsReading {
    pub fn new(time: impl Into<String>, heart_rate: u32, blood_pressure: u32, steps: u32) -> Self {
        Self {
            time: time.into(),
            heart_rate,
            blood_pressure,
            steps,
        }
    }

    /// The week of mock readings shown on a fresh dashboard.
    pub fn sample_week() -> Vec<VitalsReading> {
        vec![
            Self::new("2024-03-01", 72, 118, 6200),
            Self::new("2024-03-02", 75, 121, 8400),
            Self::new("2024-03-03", 88, 125, 10150),
            Self::new("2024-03-04", 104, 132, 3900),
            Self::new("2024-03-05", 79, 119, 7300),
            Self::new("2024-03-06", 83, 122, 9100),
            Self::new("2024-03-07", 76, 117, 5600),
        ]
    }
}

/// Aggregates for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VitalsSummary {
    pub reading_count: usize,
    pub avg_heart_rate: Option<f64>,
    pub min_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
    pub avg_blood_pressure: Option<f64>,
    pub total_steps: u64,
    /// Last reading in sequence order
    pub latest: Option<VitalsReading>,
}

impl VitalsSummary {
    /// Summarize a reading sequence. Empty input gives an empty summary.
    pub fn from_readings(readings: &[VitalsReading]) -> Self {
        if readings.is_empty() {
            return Self::default();
        }

        let count = readings.len();
        let hr_sum: u64 = readings.iter().map(|r| u64::from(r.heart_rate)).sum();
        let bp_sum: u64 = readings.iter().map(|r| u64::from(r.blood_pressure)).sum();

        Self {
            reading_count: count,
            avg_heart_rate: Some(hr_sum as f64 / count as f64),
            min_heart_rate: readings.iter().map(|r| r.heart_rate).min(),
            max_heart_rate: readings.iter().map(|r| r.heart_rate).max(),
            avg_blood_pressure: Some(bp_sum as f64 / count as f64),
            total_steps: readings.iter().map(|r| u64::from(r.steps)).sum(),
            latest: readings.last().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_json() {
        let reading = VitalsReading::new("2024-03-01", 72, 118, 6200);
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"heartRate\":72"));
        assert!(json.contains("\"bloodPressure\":118"));
    }

    #[test]
    fn test_sample_week() {
        let week = VitalsReading::sample_week();
        assert_eq!(week.len(), 7);
        assert!(week.iter().any(|r| r.heart_rate > 100));
    }

    #[test]
    fn test_summary() {
        let readings = vec![
            VitalsReading::new("d1", 60, 110, 1000),
            VitalsReading::new("d2", 90, 130, 3000),
        ];
        let summary = VitalsSummary::from_readings(&readings);
        assert_eq!(summary.reading_count, 2);
        assert_eq!(summary.avg_heart_rate, Some(75.0));
        assert_eq!(summary.min_heart_rate, Some(60));
        assert_eq!(summary.max_heart_rate, Some(90));
        assert_eq!(summary.avg_blood_pressure, Some(120.0));
        assert_eq!(summary.total_steps, 4000);
        assert_eq!(summary.latest.unwrap().time, "d2");
    }

    #[test]
    fn test_empty_summary() {
        let summary = VitalsSummary::from_readings(&[]);
        assert_eq!(summary, VitalsSummary::default());
        assert!(summary.avg_heart_rate.is_none());
    }
}
