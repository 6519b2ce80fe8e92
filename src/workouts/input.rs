//! Entry form parsing and validation.
//!
//! Text fields are coerced the way a browser's numeric coercion would:
//! surrounding whitespace is ignored, an empty field counts as zero and
//! anything unparsable becomes NaN, which then fails the finiteness check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{KindInput, WorkoutFields, WorkoutKind};

/// Rule applied to cycling elevation gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationPolicy {
    /// Any finite value, including descents
    Any,
    /// Zero or more meters
    #[default]
    NonNegative,
    /// Strictly positive
    Positive,
}

impl ElevationPolicy {
    /// Check a finite elevation value against this policy.
    pub fn accepts(&self, elevation_gain: f64) -> bool {
        match self {
            ElevationPolicy::Any => true,
            ElevationPolicy::NonNegative => elevation_gain >= 0.0,
            ElevationPolicy::Positive => elevation_gain > 0.0,
        }
    }
}

impl std::fmt::Display for ElevationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElevationPolicy::Any => write!(f, "any finite number"),
            ElevationPolicy::NonNegative => write!(f, "zero or more"),
            ElevationPolicy::Positive => write!(f, "greater than zero"),
        }
    }
}

/// Numeric fields of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Distance => write!(f, "Distance"),
            Field::Duration => write!(f, "Duration"),
            Field::Cadence => write!(f, "Cadence"),
            Field::Elevation => write!(f, "Elevation gain"),
        }
    }
}

/// Reasons a form submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotANumber { field: Field },

    #[error("{field} must be greater than zero")]
    NotPositive { field: Field },

    #[error("Elevation gain must be {policy}")]
    ElevationOutOfRange { policy: ElevationPolicy },

    #[error("Distance and duration do not give a usable {}", metric_name(.kind))]
    MetricOutOfRange { kind: WorkoutKind },
}

fn metric_name(kind: &WorkoutKind) -> &'static str {
    kind.metric_name()
}

/// Coerce a text field to a number.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Raw text of the entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    /// Selected workout kind
    pub kind: WorkoutKind,
    /// Distance text (km)
    pub distance: String,
    /// Duration text (min)
    pub duration: String,
    /// Cadence text (spm), used for runs
    pub cadence: String,
    /// Elevation text (m), used for rides
    pub elevation: String,
}

impl RawInput {
    /// Prefill the form text from existing fields.
    pub fn from_fields(fields: &WorkoutFields) -> Self {
        let mut raw = Self {
            kind: fields.input.kind(),
            distance: fields.distance_km.to_string(),
            duration: fields.duration_min.to_string(),
            ..Default::default()
        };

        match fields.input {
            KindInput::Running { cadence } => raw.cadence = cadence.to_string(),
            KindInput::Cycling { elevation_gain } => raw.elevation = elevation_gain.to_string(),
        }

        raw
    }

    /// Parse and validate into workout fields.
    ///
    /// Only the field matching the selected kind is read; the hidden one is
    /// ignored.
    pub fn parse(&self, elevation: ElevationPolicy) -> Result<WorkoutFields, ValidationError> {
        let distance_km = coerce_number(&self.distance);
        let duration_min = coerce_number(&self.duration);

        let (variant_field, variant_value) = match self.kind {
            WorkoutKind::Running => (Field::Cadence, coerce_number(&self.cadence)),
            WorkoutKind::Cycling => (Field::Elevation, coerce_number(&self.elevation)),
        };

        for (field, value) in [
            (Field::Distance, distance_km),
            (Field::Duration, duration_min),
            (variant_field, variant_value),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotANumber { field });
            }
        }

        for (field, value) in [(Field::Distance, distance_km), (Field::Duration, duration_min)] {
            if value <= 0.0 {
                return Err(ValidationError::NotPositive { field });
            }
        }

        let input = match self.kind {
            WorkoutKind::Running => {
                if variant_value <= 0.0 {
                    return Err(ValidationError::NotPositive {
                        field: Field::Cadence,
                    });
                }
                KindInput::Running {
                    cadence: variant_value,
                }
            }
            WorkoutKind::Cycling => {
                if !elevation.accepts(variant_value) {
                    return Err(ValidationError::ElevationOutOfRange { policy: elevation });
                }
                KindInput::Cycling {
                    elevation_gain: variant_value,
                }
            }
        };

        let fields = WorkoutFields {
            distance_km,
            duration_min,
            input,
        };

        // Extreme ratios overflow, and a non-finite metric cannot be saved
        if !fields.metric().is_finite() {
            return Err(ValidationError::MetricOutOfRange { kind: self.kind });
        }

        Ok(fields)
    }
}
