//! Shodhan CLI
//!
//! Terminal front end for the Shodhan Ayurveda clinic site.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use shodhan_cli::admin_cmd::{self, AdminAction};
use shodhan_cli::app::App;
use shodhan_cli::banner::{Banner, write_banner};
use shodhan_cli::book_cmd::{self, BookArgs};
use shodhan_cli::browse_cmd::{self, BlogsAction};
use shodhan_cli::open_cmd::{self, OpenArgs};
use shodhan_cli::promo_cmd::{self, PromoAction};
use shodhan_cli::prompt::Terminal;
use shodhan_core::config::load_config;
use shodhan_core::tracing_init::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "shodhan")]
#[command(version, about = "Shodhan Ayurveda clinic CLI", long_about = None)]
struct Cli {
    /// Backend origin, e.g. https://api.shodhan.example
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// State file holding the admin session and promo date
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a site path such as / or /diseases/12.
    Open(OpenArgs),
    /// Browse diseases by category, or show one.
    Diseases {
        id: Option<String>,
        /// Only diseases whose name contains this text.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List services, or show one.
    Services { id: Option<String> },
    /// List clinic locations.
    Clinics,
    /// Read the blog.
    Blogs {
        #[command(subcommand)]
        action: BlogsAction,
    },
    /// Book an appointment, a Panchakarma slot or a call back.
    Book(BookArgs),
    /// Admin account and blog management.
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// The daily welcome promo.
    Promo {
        #[command(subcommand)]
        action: PromoAction,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(io::stderr(), "Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_tracing(&config.log_level, cli.log_json);
    info!(version = env!("CARGO_PKG_VERSION"), api = %config.api.base_url, "Starting shodhan CLI");

    let app = match App::open(config, cli.state_file) {
        Ok(app) => app,
        Err(e) => return report(&e),
    };

    let result = dispatch(&app, cli.command).await;

    if let Some(route) = app.redirected_to() {
        let _ = writeln!(
            io::stderr(),
            "Session ended. Sign in again with `shodhan admin login` (redirected to {route})."
        );
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

async fn dispatch(app: &App, command: Commands) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match command {
        Commands::Open(args) => open_cmd::run(app, &mut out, &Terminal, args).await,
        Commands::Diseases { id, search } => browse_cmd::diseases(app, &mut out, id, search).await,
        Commands::Services { id } => browse_cmd::services(app, &mut out, id).await,
        Commands::Clinics => browse_cmd::clinics(app, &mut out).await,
        Commands::Blogs { action } => browse_cmd::blogs(app, &mut out, action).await,
        Commands::Book(args) => book_cmd::run(app, &mut out, args).await,
        Commands::Admin { action } => admin_cmd::run(app, &mut out, &Terminal, action).await,
        Commands::Promo { action } => promo_cmd::run(app, &mut out, action).await,
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    let mut stderr = io::stderr();
    if let Some(banner) = err.downcast_ref::<Banner>() {
        debug!(error = ?banner.source, "Request failed");
        let _ = write_banner(&mut stderr, banner);
    } else {
        let _ = writeln!(stderr, "Something went wrong: {err:#}");
    }
    ExitCode::FAILURE
}
