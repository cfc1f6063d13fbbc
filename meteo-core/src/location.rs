use async_trait::async_trait;

use crate::{client::WeatherClient, error::WeatherError, model::WeatherSnapshot};

/// Outcome of a foreground-permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Supplies coordinates to the weather client.
///
/// Implemented by the frontend that owns the actual geolocation machinery.
/// Both calls may suspend indefinitely while the platform waits on the user.
#[async_trait]
pub trait LocationSession: Send + Sync {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, WeatherError>;

    async fn current_position(&self) -> Result<Position, WeatherError>;
}

/// Fetch a snapshot for the session's current position.
///
/// Permission denial is terminal for this attempt and surfaces as
/// [`WeatherError::PermissionDenied`] before any network call; no retry is
/// made on behalf of the caller.
pub async fn snapshot_at_current_location(
    session: &dyn LocationSession,
    client: &WeatherClient,
) -> Result<WeatherSnapshot, WeatherError> {
    if session.request_foreground_permission().await? == PermissionStatus::Denied {
        return Err(WeatherError::PermissionDenied);
    }

    let position = session.current_position().await?;

    client
        .fetch_current_and_forecast(position.latitude, position.longitude)
        .await
}
