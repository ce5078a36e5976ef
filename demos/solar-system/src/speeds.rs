/// Per-body angular speeds, the one piece of simulation state the UI mutates.

use crate::bodies::Body;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpeedError {
    #[error("body index {index} out of range (registry holds {count} bodies)")]
    InvalidIndex { index: usize, count: usize },
}

/// Body index → angular speed in radians per second.
///
/// Values are stored exactly as given: no clamping, no validation beyond the
/// index. The last write wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    speeds: Vec<f64>,
}

impl SpeedTable {
    /// Table seeded with each body's default speed.
    pub fn from_bodies(bodies: &[Body]) -> Self {
        Self {
            speeds: bodies.iter().map(|b| b.default_speed).collect(),
        }
    }

    pub fn set_speed(&mut self, index: usize, value: f64) -> Result<(), SpeedError> {
        let count = self.speeds.len();
        let slot = self
            .speeds
            .get_mut(index)
            .ok_or(SpeedError::InvalidIndex { index, count })?;
        *slot = value;
        Ok(())
    }

    pub fn get_speed(&self, index: usize) -> Result<f64, SpeedError> {
        self.speeds.get(index).copied().ok_or(SpeedError::InvalidIndex {
            index,
            count: self.speeds.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.speeds
    }
}
