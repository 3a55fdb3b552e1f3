//! Sequences one fetch: location → API call → normalization.
//!
//! Every invocation runs `Loading → {Ready, Failed}` and the terminal state
//! holds until the next invocation. Failures of any stage collapse into one
//! short user-facing message; nothing propagates past this boundary.

use std::{future::Future, sync::Arc};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    client::WeatherApiClient,
    error::FetchError,
    location::LocationProvider,
    model::{Coordinate, WeatherForecast, WeatherToday},
    normalize,
};

pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Screen-facing fetch state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Ready(_) | FetchState::Failed(_))
    }
}

pub struct WeatherFetchOrchestrator<L> {
    location: L,
    client: WeatherApiClient,
}

impl<L: LocationProvider> WeatherFetchOrchestrator<L> {
    pub fn new(location: L, client: WeatherApiClient) -> Self {
        Self { location, client }
    }

    /// Run one today-screen fetch to its terminal state.
    pub async fn fetch_today(&self) -> FetchState<WeatherToday> {
        settle(self.today().await)
    }

    /// Run one forecast-screen fetch to its terminal state. Independent of
    /// the today fetch; performs its own location lookup.
    pub async fn fetch_forecast(&self, days: u8) -> FetchState<WeatherForecast> {
        settle(self.forecast(days).await)
    }

    async fn today(&self) -> Result<WeatherToday, FetchError> {
        let coordinate = self.locate().await?;
        let snapshot = self.client.current(coordinate).await?;
        Ok(normalize::display_today(&snapshot))
    }

    async fn forecast(&self, days: u8) -> Result<WeatherForecast, FetchError> {
        let coordinate = self.locate().await?;
        let snapshot = self.client.forecast(coordinate, days).await?;
        Ok(normalize::display_forecast(&snapshot))
    }

    async fn locate(&self) -> Result<Coordinate, FetchError> {
        let coordinate = self
            .location
            .last_known()
            .await?
            .ok_or(FetchError::LocationUnavailable)?;
        debug!(lat = coordinate.latitude, lon = coordinate.longitude, "coordinate acquired");
        Ok(coordinate)
    }
}

impl<L> WeatherFetchOrchestrator<L>
where
    L: LocationProvider + 'static,
{
    /// Start a today fetch as a background task. The handle reports
    /// `Loading` until the terminal state arrives.
    pub fn spawn_today(self: &Arc<Self>) -> FetchTask<WeatherToday> {
        let orchestrator = Arc::clone(self);
        FetchTask::spawn(move |tx| async move {
            let _ = tx.send(FetchState::Loading);
            let _ = tx.send(orchestrator.fetch_today().await);
        })
    }

    /// Start a forecast fetch as a background task.
    pub fn spawn_forecast(self: &Arc<Self>, days: u8) -> FetchTask<WeatherForecast> {
        let orchestrator = Arc::clone(self);
        FetchTask::spawn(move |tx| async move {
            let _ = tx.send(FetchState::Loading);
            let _ = tx.send(orchestrator.fetch_forecast(days).await);
        })
    }
}

fn settle<T>(result: Result<T, FetchError>) -> FetchState<T> {
    match result {
        Ok(value) => FetchState::Ready(value),
        Err(err) => {
            warn!(error = %err, "fetch failed");
            FetchState::Failed(err.user_message().to_string())
        }
    }
}

/// Handle to one in-flight fetch. States arrive over a watch channel;
/// dropping the handle aborts the task, so a dismissed screen never receives
/// a late update.
pub struct FetchTask<T> {
    rx: watch::Receiver<FetchState<T>>,
    handle: JoinHandle<()>,
}

impl<T> FetchTask<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn spawn<F, Fut>(run: F) -> Self
    where
        F: FnOnce(watch::Sender<FetchState<T>>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = watch::channel(FetchState::Idle);
        let handle = tokio::spawn(run(tx));
        Self { rx, handle }
    }

    /// Current state, without waiting.
    pub fn state(&self) -> FetchState<T> {
        self.rx.borrow().clone()
    }

    /// Wait for the terminal state of this fetch.
    pub async fn settled(mut self) -> FetchState<T> {
        loop {
            if self.rx.borrow().is_terminal() {
                break;
            }
            if self.rx.changed().await.is_err() {
                break;
            }
        }
        let state = self.rx.borrow().clone();
        state
    }

    /// Abort the fetch. A cancelled task publishes no further states.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl<T> Drop for FetchTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!FetchState::<()>::Idle.is_terminal());
        assert!(!FetchState::<()>::Loading.is_terminal());
        assert!(FetchState::Ready(()).is_terminal());
        assert!(FetchState::<()>::Failed("fetch error".into()).is_terminal());
    }

    #[test]
    fn settle_maps_errors_to_user_messages() {
        let state = settle::<()>(Err(FetchError::LocationUnavailable));
        assert_eq!(state, FetchState::Failed("location unavailable".into()));

        let state = settle::<()>(Err(FetchError::Network("status 500".into())));
        assert_eq!(state, FetchState::Failed("fetch error".into()));
    }
}
