//! Bounded per-year trend history, oldest entries evicted first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of retained history points.
pub const HISTORY_CAP: usize = 50;

/// One year's worth of trend data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub year: i32,
    /// Ice thickness in metres at the end of the year.
    pub thickness: f64,
    /// Effective temperature in °C during the year.
    pub temp: f64,
}

/// FIFO buffer of the last [`HISTORY_CAP`] history points, oldest first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    points: VecDeque<HistoryPoint>,
}

impl History {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Append a point, evicting the oldest if the buffer is full.
    pub fn push(&mut self, point: HistoryPoint) {
        if self.points.len() == HISTORY_CAP {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recently recorded point.
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Points in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }
}
