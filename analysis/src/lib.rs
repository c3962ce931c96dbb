//! Event aggregation and spatial analysis of recorded matches.
//!
//! The entry points are [`stats::Aggregator`] for per-player statistics and
//! [`points::PointCollector`] + [`heatmap::HeatmapRenderer`] for the kill and
//! death heatmaps of a single player.

pub mod calibration;
pub mod event;
pub mod heatmap;
pub mod lifecycle;
pub mod points;
pub mod stats;

mod error;
pub use error::Error;
