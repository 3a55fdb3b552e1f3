use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::model::Coordinate;

#[derive(Debug, Error)]
pub enum LocationError {
    /// Location permission was revoked after the request was issued.
    #[error("location permission not granted")]
    PermissionDenied,

    #[error("location service error: {0}")]
    Service(String),
}

/// Seam over the platform's last-known-location facility.
///
/// `Ok(None)` means the platform has no fix recorded; callers treat that as a
/// recoverable condition, never as a failure of the provider itself.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn last_known(&self) -> Result<Option<Coordinate>, LocationError>;
}

/// Provider backed by a coordinate from configuration. Hosts without a
/// location service (the CLI on a desktop) use this; the watch build swaps in
/// the platform-backed implementation behind the same trait.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    coordinate: Option<Coordinate>,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate: Some(coordinate) }
    }

    /// A provider with no stored coordinate, reporting "no fix" on every call.
    pub fn unset() -> Self {
        Self { coordinate: None }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn last_known(&self) -> Result<Option<Coordinate>, LocationError> {
        if let Some(coordinate) = self.coordinate {
            debug!(lat = coordinate.latitude, lon = coordinate.longitude, "using fixed coordinate");
        }
        Ok(self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_provider_returns_its_coordinate() {
        let provider = FixedLocationProvider::new(Coordinate::new(25.67, -100.31));
        let coordinate = provider.last_known().await.unwrap().unwrap();
        assert_eq!(coordinate.latitude, 25.67);
        assert_eq!(coordinate.longitude, -100.31);
    }

    #[tokio::test]
    async fn unset_provider_reports_no_fix() {
        let provider = FixedLocationProvider::unset();
        assert!(provider.last_known().await.unwrap().is_none());
    }
}
