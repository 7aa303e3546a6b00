//! `shodhan open <path>`: render a site URL path as the matching view.

use std::io::Write;

use shodhan_client::Lookup;
use shodhan_core::route::Route;
use tracing::debug;

use crate::admin_cmd::{self, AdminAction};
use crate::app::App;
use crate::banner::Classify;
use crate::blog_cmd::BlogAction;
use crate::browse_cmd::{self, BlogsAction};
use crate::fmt::{write_home, write_not_found};
use crate::promo_cmd::wait_on_home;
use crate::prompt::Prompter;

#[derive(clap::Args, Debug)]
pub struct OpenArgs {
    /// Path such as `/`, `/diseases/12` or `/blogs/author/Dr.%20Rao`.
    #[arg(default_value = "/")]
    pub path: String,
    /// Do not wait for the home page promo.
    #[arg(long)]
    pub no_promo: bool,
}

pub async fn run(
    app: &App,
    w: &mut impl Write,
    prompter: &impl Prompter,
    args: OpenArgs,
) -> anyhow::Result<()> {
    let route = Route::parse(&args.path);
    debug!(%route, "open");
    match route {
        Route::Home => {
            let featured = app
                .public
                .featured_blogs()
                .await
                .classify(Lookup::list("featured blogs"));
            // The home page still renders when featured posts fail to load.
            let featured = featured.unwrap_or_else(|banner| {
                debug!(error = %banner, "Featured blogs unavailable");
                Vec::new()
            });
            write_home(w, &featured)?;
            if !args.no_promo {
                w.flush()?;
                if wait_on_home(app, w).await? {
                    writeln!(w)?;
                }
            }
        }
        Route::Clinics => browse_cmd::clinics(app, w).await?,
        Route::Diseases => browse_cmd::diseases(app, w, None, None).await?,
        Route::Disease { id } => browse_cmd::diseases(app, w, Some(id), None).await?,
        Route::Services => browse_cmd::services(app, w, None).await?,
        Route::Service { id } => browse_cmd::services(app, w, Some(id)).await?,
        Route::Blogs => browse_cmd::blogs(app, w, BlogsAction::List).await?,
        Route::Blog { slug } => browse_cmd::blogs(app, w, BlogsAction::Show { slug }).await?,
        Route::BlogsByAuthor { author } => {
            browse_cmd::blogs(app, w, BlogsAction::Author { name: author }).await?;
        }
        Route::Admin { rest } => {
            let action = if rest.is_empty() || !app.session.is_authenticated() {
                AdminAction::Status { verify: false }
            } else {
                AdminAction::Blog {
                    action: BlogAction::List { search: None },
                }
            };
            admin_cmd::run(app, w, prompter, action).await?;
        }
        Route::NotFound { path } => write_not_found(w, &path)?,
    }
    Ok(())
}
