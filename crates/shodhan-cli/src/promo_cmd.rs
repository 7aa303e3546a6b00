//! The daily welcome promo shown on the home page.

use std::io::Write;

use shodhan_core::promo::{PromoGate, PromoScheduler};
use shodhan_core::route::Route;
use shodhan_core::store::{PROMO_LAST_SHOWN_KEY, StateStore as _};
use tracing::debug;

use crate::app::App;
use crate::fmt::write_promo;

#[derive(clap::Subcommand, Debug)]
pub enum PromoAction {
    /// Whether the promo would appear on the home page today.
    Status,
    /// Show the promo now, whether or not it was dismissed today.
    Show,
    /// Dismiss the promo until tomorrow.
    Dismiss,
    /// Stay on the home page until the promo appears.
    Watch,
}

/// Execute a promo subcommand.
pub async fn run(app: &App, w: &mut impl Write, action: PromoAction) -> anyhow::Result<()> {
    match action {
        PromoAction::Status => {
            let last_shown = app.store.get(PROMO_LAST_SHOWN_KEY)?;
            if PromoGate::should_schedule(&Route::Home, last_shown.as_deref(), App::today()) {
                writeln!(
                    w,
                    "The promo appears {}s after opening the home page",
                    app.promo_delay().as_secs()
                )?;
            } else {
                writeln!(w, "Promo dismissed for today")?;
            }
        }
        PromoAction::Show => {
            let mut scheduler = PromoScheduler::new(app.store.clone(), app.promo_delay());
            scheduler.open();
            write_promo(w)?;
        }
        PromoAction::Dismiss => {
            let mut scheduler = PromoScheduler::new(app.store.clone(), app.promo_delay());
            scheduler.dismiss(App::today())?;
            writeln!(w, "Promo dismissed until tomorrow")?;
        }
        PromoAction::Watch => {
            if !wait_on_home(app, w).await? {
                writeln!(w, "Promo dismissed for today")?;
            }
        }
    }
    Ok(())
}

/// Arrive on the home page and print the promo once its delay elapses.
///
/// Returns `false` without waiting when the promo was already dismissed today,
/// or when interrupted with Ctrl-C before it appeared.
pub async fn wait_on_home(app: &App, w: &mut impl Write) -> anyhow::Result<bool> {
    let mut scheduler = PromoScheduler::new(app.store.clone(), app.promo_delay());
    let mut visible = scheduler.subscribe();
    scheduler.on_route_change(&Route::Home, App::today())?;
    if !scheduler.is_pending() && !scheduler.is_visible() {
        return Ok(false);
    }

    tokio::select! {
        shown = visible.wait_for(|v| *v) => {
            shown.map(|_| ())?;
        }
        _ = tokio::signal::ctrl_c() => {
            debug!("Left the home page before the promo appeared");
            return Ok(false);
        }
    }

    write_promo(w)?;
    Ok(true)
}
