//! Current-position lookup.

use thiserror::Error;

use crate::storage::config::MapSettings;
use crate::workouts::Coords;

/// Something that can report where the user is.
pub trait Geolocator {
    /// Current position, or an error if it cannot be determined.
    fn current_position(&self) -> Result<Coords, GeolocationError>;
}

/// Geolocation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Your position is not available")]
    Unavailable,
}

/// Position taken from the configuration's `map.home` setting.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    home: Option<Coords>,
}

impl ConfiguredLocation {
    /// Create a locator for a fixed position, or none.
    pub fn new(home: Option<Coords>) -> Self {
        Self { home }
    }

    /// Create a locator from map settings.
    pub fn from_settings(settings: &MapSettings) -> Self {
        Self::new(settings.home)
    }
}

impl Geolocator for ConfiguredLocation {
    fn current_position(&self) -> Result<Coords, GeolocationError> {
        self.home.ok_or(GeolocationError::Unavailable)
    }
}
