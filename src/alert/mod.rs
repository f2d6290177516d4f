pub mod sequence;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{ApiError, ApiResult};
use crate::types::Rgb;

pub use sequence::{AlertSequence, AlertStep, LightState};

/// Anything that can apply a [`LightState`] to a light.
///
/// Failures must be returned as `Err`, so the sequencer can abort cleanly.
pub trait LightControl: Send + Sync {
    fn update_light(
        &self,
        light: u32,
        state: LightState,
    ) -> impl Future<Output = ApiResult<LightState>> + Send;
}

/// Apply every step of `seq` in order, waiting for each update and its hold
/// before moving on. Stops at the first failed update.
pub async fn run<C: LightControl>(client: &C, light: u32, seq: &AlertSequence) -> ApiResult<()> {
    for (index, step) in seq.steps().iter().enumerate() {
        log::trace!("[light {light}] step {index}: {:?}", step.state);

        client
            .update_light(light, step.state)
            .await
            .map_err(|err| ApiError::AlertAborted {
                step: index,
                source: Box::new(err),
            })?;

        if !step.hold.is_zero() {
            tokio::time::sleep(step.hold).await;
        }
    }

    Ok(())
}

pub struct Alerter<C> {
    client: Arc<C>,
    light: u32,
    delay: Duration,
}

impl<C> Clone for Alerter<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            light: self.light,
            delay: self.delay,
        }
    }
}

impl<C: LightControl + 'static> Alerter<C> {
    pub fn new(client: C, light: u32, delay: Duration) -> Self {
        Self {
            client: Arc::new(client),
            light,
            delay,
        }
    }

    #[must_use]
    pub const fn light(&self) -> u32 {
        self.light
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub fn sequence(&self, color: Rgb) -> AlertSequence {
        AlertSequence::blink(color, self.delay)
    }

    /// Blink the light in `color`, and wait for the sequence to finish.
    pub async fn fire(&self, color: Rgb) -> ApiResult<()> {
        log::info!("[light {}] Alert with color {color:?}", self.light);

        let seq = self.sequence(color);
        let res = run(self.client.as_ref(), self.light, &seq).await;

        match &res {
            Ok(()) => log::debug!("[light {}] Alert done", self.light),
            Err(err) => log::error!("[light {}] Could not complete alert: {err}", self.light),
        }

        res
    }

    /// Run [`Alerter::fire`] as a background task. Errors are logged, never
    /// propagated.
    pub fn trigger(&self, color: Rgb) -> JoinHandle<()> {
        let alerter = self.clone();
        tokio::spawn(async move {
            let _ = alerter.fire(color).await;
        })
    }
}
