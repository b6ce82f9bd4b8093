//! Bounded telemetry history
//!
//! A fixed-capacity ring buffer: pushing onto a full history evicts the
//! oldest sample first, so each tick costs the same.

use std::collections::VecDeque;

use ordered_float::OrderedFloat;

use super::params::HISTORY_CAPACITY;
use super::types::TelemetrySample;

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryHistory {
    samples: VecDeque<TelemetrySample>,
}

impl Default for TelemetryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryHistory {
    /// Empty history. Does not allocate until the first sample.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
        }
    }

    /// Append a sample, evicting the oldest one when full
    pub fn record(&mut self, sample: TelemetrySample) {
        if self.samples.len() >= HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in insertion order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&TelemetrySample> {
        self.samples.front()
    }

    /// Closest approach to the lead vehicle over the retained window
    pub fn min_distance(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| OrderedFloat(s.distance))
            .min()
            .map(OrderedFloat::into_inner)
    }

    /// Highest ego speed over the retained window
    pub fn peak_speed(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| OrderedFloat(s.speed))
            .max()
            .map(OrderedFloat::into_inner)
    }
}
