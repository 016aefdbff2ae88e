use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::GeolocationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// "lat,lon", the form the weather endpoint accepts in place of a city
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Source of the device position for "weather here" requests
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position configured by the user
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// The user turned location sharing off
pub struct DeniedLocation;

#[async_trait]
impl Geolocator for DeniedLocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// No position source available at all
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_query() {
        assert_eq!(Coordinates::new(35.6, 139.7).as_query(), "35.6,139.7");
        assert_eq!(Coordinates::new(-33.9, 18.4).as_query(), "-33.9,18.4");
    }

    #[tokio::test]
    async fn test_locators() {
        let here = Coordinates::new(48.85, 2.35);
        assert_eq!(FixedLocation(here).locate().await, Ok(here));
        assert_eq!(
            DeniedLocation.locate().await,
            Err(GeolocationError::PermissionDenied)
        );
        assert_eq!(
            NoGeolocation.locate().await,
            Err(GeolocationError::Unsupported)
        );
    }
}
