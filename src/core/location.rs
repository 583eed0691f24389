//! Acquisition of the user's search origin.
//!
//! The browser client gets a position from the device and then asks for a
//! human-readable place name. Both steps are asynchronous and either can be
//! refused, so acquisition is tracked as an explicit state machine that a
//! caller drives with [`LocationTracker::begin`], [`LocationTracker::resolve`]
//! and [`LocationTracker::fail`].

use crate::models::{CriteriaError, LatLng};
use thiserror::Error;

/// Why acquiring a position failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationFailure {
    PermissionDenied,
    Unavailable,
    Timeout,
}

/// Where an acquisition currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum LocationState {
    Unset,
    Acquiring { attempt: u32 },
    Resolved(ResolvedLocation),
    Failed { reason: LocationFailure, attempt: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub position: LatLng,
    /// Reverse-geocoded label, if that lookup succeeded
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: &'static str },

    #[error("retry limit of {0} attempts reached")]
    RetriesExhausted(u32),

    #[error(transparent)]
    InvalidPosition(#[from] CriteriaError),
}

impl LocationState {
    fn name(&self) -> &'static str {
        match self {
            LocationState::Unset => "unset",
            LocationState::Acquiring { .. } => "acquiring",
            LocationState::Resolved(_) => "resolved",
            LocationState::Failed { .. } => "failed",
        }
    }
}

/// State machine over {unset, acquiring, resolved, failed}
#[derive(Debug, Clone)]
pub struct LocationTracker {
    state: LocationState,
    max_attempts: u32,
}

impl LocationTracker {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: LocationState::Unset,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    pub fn position(&self) -> Option<LatLng> {
        match &self.state {
            LocationState::Resolved(resolved) => Some(resolved.position),
            _ => None,
        }
    }

    /// Start (or retry) acquisition
    ///
    /// Allowed from `Unset`, from `Failed` while attempts remain (permission
    /// denial included, the user may grant it on the next prompt) and from
    /// `Resolved` to refresh a stale position.
    pub fn begin(&mut self) -> Result<(), LocationError> {
        let attempt = match &self.state {
            LocationState::Unset | LocationState::Resolved(_) => 1,
            LocationState::Failed { attempt, .. } => {
                if *attempt >= self.max_attempts {
                    return Err(LocationError::RetriesExhausted(self.max_attempts));
                }
                attempt + 1
            }
            LocationState::Acquiring { .. } => {
                return Err(self.invalid("begin"));
            }
        };

        self.state = LocationState::Acquiring { attempt };
        Ok(())
    }

    /// Record a position reported by the device
    pub fn resolve(&mut self, latitude: f64, longitude: f64) -> Result<(), LocationError> {
        if !matches!(self.state, LocationState::Acquiring { .. }) {
            return Err(self.invalid("resolve"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CriteriaError::LatitudeOutOfRange(latitude).into());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CriteriaError::LongitudeOutOfRange(longitude).into());
        }

        self.state = LocationState::Resolved(ResolvedLocation {
            position: LatLng { lat: latitude, lng: longitude },
            label: None,
        });
        Ok(())
    }

    /// Attach the reverse-geocoded label to a resolved position
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<(), LocationError> {
        match &mut self.state {
            LocationState::Resolved(resolved) => {
                resolved.label = Some(label.into());
                Ok(())
            }
            _ => Err(self.invalid("label")),
        }
    }

    pub fn fail(&mut self, reason: LocationFailure) -> Result<(), LocationError> {
        match self.state {
            LocationState::Acquiring { attempt } => {
                self.state = LocationState::Failed { reason, attempt };
                Ok(())
            }
            _ => Err(self.invalid("fail")),
        }
    }

    /// Drop any position and start over
    pub fn reset(&mut self) {
        self.state = LocationState::Unset;
    }

    fn invalid(&self, action: &'static str) -> LocationError {
        LocationError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut tracker = LocationTracker::default();
        assert_eq!(tracker.state(), &LocationState::Unset);

        tracker.begin().unwrap();
        tracker.resolve(42.373, -71.118).unwrap();
        tracker.set_label("Cambridge, MA").unwrap();

        assert_eq!(tracker.position(), Some(LatLng { lat: 42.373, lng: -71.118 }));
        match tracker.state() {
            LocationState::Resolved(resolved) => {
                assert_eq!(resolved.label.as_deref(), Some("Cambridge, MA"))
            }
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_retry_after_permission_denied() {
        let mut tracker = LocationTracker::new(2);

        tracker.begin().unwrap();
        tracker.fail(LocationFailure::PermissionDenied).unwrap();
        tracker.begin().unwrap();
        assert_eq!(tracker.state(), &LocationState::Acquiring { attempt: 2 });

        tracker.fail(LocationFailure::PermissionDenied).unwrap();
        assert_eq!(tracker.begin(), Err(LocationError::RetriesExhausted(2)));

        tracker.reset();
        assert!(tracker.begin().is_ok());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut tracker = LocationTracker::default();

        assert!(matches!(
            tracker.resolve(0.0, 0.0),
            Err(LocationError::InvalidTransition { action: "resolve", state: "unset" })
        ));
        assert!(tracker.fail(LocationFailure::Timeout).is_err());
        assert!(tracker.set_label("nowhere").is_err());

        tracker.begin().unwrap();
        assert!(tracker.begin().is_err());
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let mut tracker = LocationTracker::default();
        tracker.begin().unwrap();

        assert_eq!(
            tracker.resolve(120.0, 0.0),
            Err(LocationError::InvalidPosition(CriteriaError::LatitudeOutOfRange(120.0)))
        );
        // Still acquiring, a valid fix can follow
        assert!(tracker.resolve(42.0, -71.0).is_ok());
    }
}
