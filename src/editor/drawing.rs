//! Drawing state machine for new hotspots.
//!
//! Polygons collect one point per click until finished; info and camera
//! markers complete on their first click.
//!
//! Entering drawing mode arms a short-lived guard. While armed, clicks are
//! suppressed so the gesture that opened drawing mode is not taken as the
//! first point. The guard disarms at the end of the current event turn
//! ([`DrawingMachine::end_turn`]) or when its timer runs out, whichever
//! comes first.

use std::time::Duration;
use web_time::Instant;

use super::EditorError;
use crate::model::{Coordinate, HotspotKind, MIN_POLYGON_VERTICES};

/// Whether a drawing is in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawingState {
    #[default]
    Idle,
    Drawing {
        kind: HotspotKind,
        points: Vec<Coordinate>,
    },
}

/// Guard against the click that opened drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingGuard {
    #[default]
    Disarmed,
    Armed { until: Instant },
}

/// Result of routing a click to the drawing machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Not drawing, nothing happened
    Ignored,
    /// Swallowed by the start guard
    Suppressed,
    /// Polygon point appended; holds the new point count
    Added(usize),
    /// The drawing is complete and the machine is back to idle
    Completed {
        kind: HotspotKind,
        coordinates: Vec<Coordinate>,
    },
}

#[derive(Debug, Clone)]
pub struct DrawingMachine {
    state: DrawingState,
    guard: DrawingGuard,
    guard_duration: Duration,
}

impl DrawingMachine {
    pub fn new(guard_duration: Duration) -> Self {
        Self {
            state: DrawingState::Idle,
            guard: DrawingGuard::Disarmed,
            guard_duration,
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Kind being drawn, if any.
    pub fn kind(&self) -> Option<HotspotKind> {
        match &self.state {
            DrawingState::Drawing { kind, .. } => Some(*kind),
            DrawingState::Idle => None,
        }
    }

    /// Points collected so far. Empty when idle.
    pub fn points(&self) -> &[Coordinate] {
        match &self.state {
            DrawingState::Drawing { points, .. } => points,
            DrawingState::Idle => &[],
        }
    }

    /// Enter drawing mode and arm the guard.
    pub fn start(&mut self, kind: HotspotKind) {
        self.start_at(kind, Instant::now());
    }

    pub fn start_at(&mut self, kind: HotspotKind, now: Instant) {
        log::debug!("Start drawing {}", kind.name());
        self.state = DrawingState::Drawing {
            kind,
            points: Vec::new(),
        };
        self.guard = DrawingGuard::Armed {
            until: now + self.guard_duration,
        };
    }

    /// End of an event-processing turn: the opening gesture is over.
    pub fn end_turn(&mut self) {
        if self.guard != DrawingGuard::Disarmed {
            log::trace!("Drawing guard disarmed at end of turn");
        }
        self.guard = DrawingGuard::Disarmed;
    }

    pub fn is_armed(&self) -> bool {
        self.is_armed_at(Instant::now())
    }

    pub fn is_armed_at(&self, now: Instant) -> bool {
        match self.guard {
            DrawingGuard::Armed { until } => now < until,
            DrawingGuard::Disarmed => false,
        }
    }

    /// Route a canvas click.
    pub fn click(&mut self, point: Coordinate) -> ClickOutcome {
        self.click_at(point, Instant::now())
    }

    pub fn click_at(&mut self, point: Coordinate, now: Instant) -> ClickOutcome {
        if !self.is_drawing() {
            return ClickOutcome::Ignored;
        }
        if self.is_armed_at(now) {
            log::debug!("Suppressed click from the gesture that started drawing");
            return ClickOutcome::Suppressed;
        }

        match &mut self.state {
            DrawingState::Drawing {
                kind: HotspotKind::Polygon,
                points,
            } => {
                points.push(point);
                log::trace!("Polygon point {} at {:?}", points.len(), point);
                ClickOutcome::Added(points.len())
            }
            DrawingState::Drawing { kind, .. } => {
                let kind = *kind;
                self.state = DrawingState::Idle;
                self.guard = DrawingGuard::Disarmed;
                ClickOutcome::Completed {
                    kind,
                    coordinates: vec![point],
                }
            }
            DrawingState::Idle => ClickOutcome::Ignored,
        }
    }

    /// Finish the drawing.
    ///
    /// The machine always returns to idle. With fewer than three polygon
    /// points (or a marker that was never placed) the drawing is discarded
    /// and an error returned.
    pub fn finish(&mut self) -> Result<(HotspotKind, Vec<Coordinate>), EditorError> {
        let state = std::mem::take(&mut self.state);
        self.guard = DrawingGuard::Disarmed;

        match state {
            DrawingState::Idle => Err(EditorError::NotDrawing),
            DrawingState::Drawing {
                kind: HotspotKind::Polygon,
                points,
            } if points.len() >= MIN_POLYGON_VERTICES => Ok((HotspotKind::Polygon, points)),
            DrawingState::Drawing { kind, points } => {
                log::warn!(
                    "Discarding {} drawing with {} points",
                    kind.name(),
                    points.len()
                );
                Err(EditorError::TooFewPoints {
                    count: points.len(),
                })
            }
        }
    }

    /// Discard the drawing. Returns false if nothing was being drawn.
    pub fn cancel(&mut self) -> bool {
        self.guard = DrawingGuard::Disarmed;
        if self.is_drawing() {
            log::debug!("Drawing cancelled");
            self.state = DrawingState::Idle;
            true
        } else {
            false
        }
    }
}
