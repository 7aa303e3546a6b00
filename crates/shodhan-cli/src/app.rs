//! Per-invocation application context.
//!
//! Built once in `main`: hydrates the admin session from the state file and
//! wires both API clients to it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use shodhan_client::{AdminClient, ClientOptions, PublicClient};
use shodhan_core::Config;
use shodhan_core::route::{RecordingNavigator, Route};
use shodhan_core::session::SessionProvider;
use shodhan_core::store::{JsonFileStore, StateStore};

pub struct App {
    pub config: Config,
    pub store: Arc<dyn StateStore>,
    pub session: Arc<SessionProvider>,
    pub navigator: Arc<RecordingNavigator>,
    pub public: PublicClient,
    pub admin: AdminClient,
}

impl App {
    pub fn new(config: Config, store: Arc<dyn StateStore>) -> anyhow::Result<Self> {
        let session = Arc::new(
            SessionProvider::hydrate(store.clone()).context("Failed to load admin session")?,
        );
        let navigator = Arc::new(RecordingNavigator::new());
        let options = ClientOptions::from(&config.api);
        let public = PublicClient::new(&options)?;
        let admin = AdminClient::new(&options, session.clone(), navigator.clone())?;
        Ok(Self {
            config,
            store,
            session,
            navigator,
            public,
            admin,
        })
    }

    /// Context backed by the state file at `state_file`, or the default
    /// `~/.shodhan/state.json`.
    pub fn open(config: Config, state_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = state_file
            .or_else(JsonFileStore::default_path)
            .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory for state file"))?;
        Self::new(config, Arc::new(JsonFileStore::new(path)))
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub const fn promo_delay(&self) -> Duration {
        Duration::from_secs(self.config.ui.promo_delay_secs)
    }

    /// Where the last forced navigation pointed, if any happened.
    pub fn redirected_to(&self) -> Option<Route> {
        self.navigator.last()
    }
}
