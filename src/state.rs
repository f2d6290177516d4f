use std::sync::Arc;
use std::time::Duration;

use crate::alert::{Alerter, LightControl};
use crate::config::AppConfig;
use crate::rules::AlertKind;

pub struct AppState<C> {
    conf: Arc<AppConfig>,
    alerter: Alerter<C>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            conf: self.conf.clone(),
            alerter: self.alerter.clone(),
        }
    }
}

impl<C: LightControl + 'static> AppState<C> {
    pub fn new(conf: AppConfig, client: C) -> Self {
        let delay = Duration::from_millis(conf.hue.animation.delay);
        let alerter = Alerter::new(client, conf.hue.light, delay);

        Self {
            conf: Arc::new(conf),
            alerter,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.conf
    }

    #[must_use]
    pub const fn alerter(&self) -> &Alerter<C> {
        &self.alerter
    }

    /// Classify `message` and start the matching alert.
    pub fn notify(&self, message: &str) -> AlertKind {
        let (kind, rule) = self.conf.pushover.states.classify(message);
        log::info!("Message classified as {kind}");
        self.alerter.trigger(rule.color);
        kind
    }

    /// Start the alert configured for `kind`.
    pub fn alert(&self, kind: AlertKind) {
        let rule = self.conf.pushover.states.get(kind);
        self.alerter.trigger(rule.color);
    }
}
