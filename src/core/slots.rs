//! Long-lived appender instances, at most one per kind
//!
//! Each kind has its own initialization lock and a once-published instance.
//! The fast path is a single atomic read of the published value; the lock is
//! only taken while no instance exists, so concurrent first use constructs the
//! transport exactly once. A failed construction publishes nothing.

use super::appender::Appender;
use super::appender_set::AppenderKind;
use super::config::AppenderSettings;
use super::error::Result;
use crate::appenders::build_appender;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

struct Published {
    appender: Arc<dyn Appender>,
    /// Settings the instance was built from; `None` for caller-provided instances
    settings: Option<AppenderSettings>,
}

#[derive(Default)]
struct AppenderSlot {
    init_lock: Mutex<()>,
    instance: OnceLock<Published>,
}

impl AppenderSlot {
    fn get_or_try_init<F>(&self, init: F) -> Result<&Published>
    where
        F: FnOnce() -> Result<Published>,
    {
        if let Some(published) = self.instance.get() {
            return Ok(published);
        }
        let _guard = self.init_lock.lock();
        if let Some(published) = self.instance.get() {
            return Ok(published);
        }
        let published = init()?;
        Ok(self.instance.get_or_init(|| published))
    }
}

#[derive(Default)]
pub struct AppenderSlots {
    slots: [AppenderSlot; 4],
}

impl AppenderSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: AppenderKind) -> Option<Arc<dyn Appender>> {
        self.slots[kind.index()]
            .instance
            .get()
            .map(|published| Arc::clone(&published.appender))
    }

    /// Instance for `settings.kind()`, constructing it on first use.
    ///
    /// An existing instance is returned even when `settings` differ from the
    /// ones it was built with; the open transport is kept and a warning printed.
    /// `settings` are not re-validated against a live instance.
    pub fn get_or_init(&self, settings: &AppenderSettings) -> Result<Arc<dyn Appender>> {
        let kind = settings.kind();
        let published = self.slots[kind.index()].get_or_try_init(|| {
            Ok(Published {
                appender: build_appender(settings)?,
                settings: Some(settings.clone()),
            })
        })?;

        if let Some(ref built_with) = published.settings {
            if built_with != settings {
                eprintln!(
                    "[LOGGER WARNING] {} settings changed on reload; keeping the existing transport",
                    kind
                );
            }
        }
        Ok(Arc::clone(&published.appender))
    }

    /// Publish a caller-provided instance for `kind`.
    ///
    /// Returns `false` if the kind already has an instance.
    pub fn install(&self, kind: AppenderKind, appender: Arc<dyn Appender>) -> bool {
        let slot = &self.slots[kind.index()];
        let _guard = slot.init_lock.lock();
        slot.instance
            .set(Published {
                appender,
                settings: None,
            })
            .is_ok()
    }

    /// Every published instance, in dispatch order
    pub fn live(&self) -> impl Iterator<Item = (AppenderKind, Arc<dyn Appender>)> + '_ {
        AppenderKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|appender| (kind, appender)))
    }
}
