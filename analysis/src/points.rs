//! Collects where a single player got kills and died.
//!
//! Unlike [`crate::stats::Aggregator`] this does not look at the round
//! lifecycle, so kills from the warm-up round show up in the heatmaps but not
//! in the statistics.

use crate::calibration::{MapCalibration, SpatialPoint};
use crate::event::Event;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSeries {
    pub points: Vec<SpatialPoint>,
}

impl PointSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: SpatialPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<SpatialPoint>> for PointSeries {
    fn from(points: Vec<SpatialPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<(f64, f64)> for PointSeries {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().map(|(x, y)| SpatialPoint::new(x, y)).collect(),
        }
    }
}

pub struct PointCollector {
    nickname: String,
    calibration: MapCalibration,
    kills: PointSeries,
    deaths: PointSeries,
    event_index: usize,
}

impl PointCollector {
    pub fn new(nickname: impl Into<String>, calibration: MapCalibration) -> Self {
        Self {
            nickname: nickname.into(),
            calibration,
            kills: PointSeries::new(),
            deaths: PointSeries::new(),
            event_index: 0,
        }
    }

    pub fn apply(&mut self, event: &Event) -> Result<(), crate::Error> {
        let index = self.event_index;
        self.event_index += 1;

        let (killer, victim, killer_position, victim_position) = match event {
            Event::Kill {
                killer,
                victim,
                killer_position,
                victim_position,
                ..
            } => (killer, victim, killer_position, victim_position),
            _ => return Ok(()),
        };

        // Both checks on purpose, a self kill ends up in both series
        if killer.as_deref() == Some(self.nickname.as_str()) {
            if !killer_position.is_finite() {
                return Err(crate::Error::NonFinitePosition {
                    event_index: index,
                    field: "killer_position",
                });
            }
            self.kills
                .push(self.calibration.map_to_pixel(killer_position.x, killer_position.y));
        }

        if victim == &self.nickname {
            if !victim_position.is_finite() {
                return Err(crate::Error::NonFinitePosition {
                    event_index: index,
                    field: "victim_position",
                });
            }
            self.deaths
                .push(self.calibration.map_to_pixel(victim_position.x, victim_position.y));
        }

        Ok(())
    }

    pub fn kill_points(&self) -> &PointSeries {
        &self.kills
    }

    pub fn death_points(&self) -> &PointSeries {
        &self.deaths
    }

    /// Returns the kill and death series.
    pub fn into_series(self) -> (PointSeries, PointSeries) {
        tracing::debug!(
            "{}: {} kill points, {} death points",
            self.nickname,
            self.kills.len(),
            self.deaths.len()
        );

        (self.kills, self.deaths)
    }
}
