use crate::models::ChartPoint;

/// Average call duration in seconds for each 30-minute interval.
pub const DEFAULT_VALUES: [f64; 6] = [120.0, 95.0, 140.0, 110.0, 165.0, 130.0];

const FIRST_INTERVAL_MINUTE: usize = 9 * 60;
const INTERVAL_MINUTES: usize = 30;

pub fn default_values() -> Vec<f64> {
    DEFAULT_VALUES.to_vec()
}

pub fn chart_points(values: &[f64]) -> Vec<ChartPoint> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ChartPoint {
            label: interval_label(index),
            value: *value,
        })
        .collect()
}

fn interval_label(index: usize) -> String {
    let minute_of_day = (FIRST_INTERVAL_MINUTE + INTERVAL_MINUTES * index) % (24 * 60);
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Values being edited. Seeded from what is on screen and thrown away once
/// committed or abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSet {
    values: Vec<f64>,
}

impl WorkingSet {
    pub fn seed(displayed: &[f64]) -> Self {
        Self {
            values: displayed.to_vec(),
        }
    }

    pub fn replace(&mut self, values: Vec<f64>) {
        self.values = values;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn commit(self) -> Vec<f64> {
        self.values
    }
}
