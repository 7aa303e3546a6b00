//! Daily promotional dialog.
//!
//! The dialog appears on the home page a short while after arrival, at most
//! once per calendar day. Dismissal records the day in the state store; the
//! stored value is compared by exact string equality with today's date.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::debug;

use crate::error::Result;
use crate::route::Route;
use crate::store::{PROMO_LAST_SHOWN_KEY, StateStore};
use crate::timer::{DelayedTask, TaskSlot};

/// Default wait between arriving on the home page and showing the dialog.
pub const DEFAULT_PROMO_DELAY: Duration = Duration::from_secs(3);

/// Day format stored under [`PROMO_LAST_SHOWN_KEY`], e.g. `Sat Oct 17 2026`.
pub const PROMO_DATE_FORMAT: &str = "%a %b %d %Y";

pub fn promo_date_string(date: NaiveDate) -> String {
    date.format(PROMO_DATE_FORMAT).to_string()
}

pub struct PromoGate;

impl PromoGate {
    /// Only on the home page, and only if not dismissed today.
    pub fn should_schedule(route: &Route, last_shown: Option<&str>, today: NaiveDate) -> bool {
        route.is_home() && last_shown != Some(promo_date_string(today).as_str())
    }
}

/// Drives dialog visibility from route changes.
pub struct PromoScheduler {
    store: Arc<dyn StateStore>,
    delay: Duration,
    visible: Arc<watch::Sender<bool>>,
    pending: TaskSlot,
}

impl PromoScheduler {
    pub fn new(store: Arc<dyn StateStore>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            store,
            delay,
            visible: Arc::new(tx),
            pending: TaskSlot::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Whether a show is scheduled but has not happened yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    /// React to navigation. Leaving the home page cancels any pending show and
    /// hides the dialog.
    pub fn on_route_change(&mut self, route: &Route, today: NaiveDate) -> Result<()> {
        if !route.is_home() {
            self.pending.cancel();
            self.set_visible(false);
            return Ok(());
        }
        if self.is_visible() {
            return Ok(());
        }

        let last_shown = self.store.get(PROMO_LAST_SHOWN_KEY)?;
        if !PromoGate::should_schedule(route, last_shown.as_deref(), today) {
            debug!(?last_shown, "Promo already dismissed today");
            return Ok(());
        }

        debug!(delay_ms = self.delay.as_millis(), "Scheduling promo");
        let visible = self.visible.clone();
        self.pending.replace(DelayedTask::spawn(self.delay, move || {
            visible.send_replace(true);
        }));
        Ok(())
    }

    /// Show immediately, bypassing the daily gate.
    pub fn open(&mut self) {
        self.pending.cancel();
        self.set_visible(true);
    }

    /// Hide and remember that the dialog was seen today.
    pub fn dismiss(&mut self, today: NaiveDate) -> Result<()> {
        self.pending.cancel();
        self.set_visible(false);
        self.store
            .set(PROMO_LAST_SHOWN_KEY, &promo_date_string(today))
    }

    fn set_visible(&self, visible: bool) {
        self.visible.send_replace(visible);
    }
}
