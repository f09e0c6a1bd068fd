//! Device position for the GPS question.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use kiosque_questionnaire::Coordinates;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Failure messages are shown to the operator under the question.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Géolocalisation refusée")]
    Denied,

    #[error("Position indisponible : {0}")]
    Unavailable(String),

    #[error("Délai de géolocalisation dépassé ({0} s)")]
    Timeout(u64),
}

/// Source of the kiosk position.
///
/// Methods return boxed futures for dyn compatibility.
pub trait LocationProvider: Send + Sync {
    fn name(&self) -> &str;

    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, LocationError>>;
}

/// Reports the position configured for a fixed kiosk.
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl LocationProvider for FixedLocation {
    fn name(&self) -> &str {
        "fixed"
    }

    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, LocationError>> {
        let coordinates = self.coordinates;
        Box::pin(async move { Ok(coordinates) })
    }
}

/// Used when the kiosk has no position source.
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn name(&self) -> &str {
        "none"
    }

    fn locate(&self) -> BoxFuture<'_, Result<Coordinates, LocationError>> {
        Box::pin(async {
            Err(LocationError::Unavailable(
                "aucune source de position configurée".to_string(),
            ))
        })
    }
}

/// Ask `provider` for a position, giving up after `timeout`.
pub async fn acquire(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(timeout, provider.locate()).await {
        Ok(Ok(coordinates)) => {
            info!(provider = provider.name(), "position acquired");
            Ok(coordinates)
        }
        Ok(Err(e)) => {
            warn!(provider = provider.name(), error = %e, "position request failed");
            Err(e)
        }
        Err(_) => {
            warn!(provider = provider.name(), ?timeout, "position request timed out");
            Err(LocationError::Timeout(timeout.as_secs()))
        }
    }
}
