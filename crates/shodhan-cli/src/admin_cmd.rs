//! Admin subcommands: login, logout, status, password, blog.
//!
//! User-facing output uses writeln! to the given writer (stdout in the binary).

use std::io::Write;

use shodhan_client::admin::password_change_message;
use shodhan_client::{ErrorKind, LoginError, Lookup};
use shodhan_core::{AdminUser, LoginProbe};

use crate::app::App;
use crate::banner::{Banner, Classify};
use crate::blog_cmd::{self, BlogAction};
use crate::prompt::{Prompter, password_or_prompt};

/// Admin subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AdminAction {
    /// Sign in and remember the credential.
    Login {
        /// Username.
        #[arg(short, long)]
        username: String,
        /// Password. Asked for on the terminal when not given.
        #[arg(short, long, env = "SHODHAN_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Request used to check the credential: dedicated or blog-list.
        #[arg(long, value_parser = parse_probe)]
        probe: Option<LoginProbe>,
    },
    /// Forget the stored credential.
    Logout,
    /// Show who is signed in.
    Status {
        /// Also ask the backend whether the credential is still accepted.
        #[arg(long)]
        verify: bool,
    },
    /// Change the admin password. Values not given are asked for.
    Password {
        #[arg(long, env = "SHODHAN_CURRENT_PASSWORD", hide_env_values = true)]
        current: Option<String>,
        #[arg(long, env = "SHODHAN_NEW_PASSWORD", hide_env_values = true)]
        new: Option<String>,
        /// Repeat of the new password.
        #[arg(long, env = "SHODHAN_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: Option<String>,
    },
    /// Manage blog posts.
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
}

fn parse_probe(s: &str) -> Result<LoginProbe, String> {
    match s {
        "dedicated" => Ok(LoginProbe::Dedicated),
        "blog-list" => Ok(LoginProbe::BlogList),
        other => Err(format!("unknown login probe: {other} (expected dedicated or blog-list)")),
    }
}

/// Execute an admin subcommand.
pub async fn run(
    app: &App,
    w: &mut impl Write,
    prompter: &impl Prompter,
    action: AdminAction,
) -> anyhow::Result<()> {
    match action {
        AdminAction::Login {
            username,
            password,
            probe,
        } => {
            let password = password_or_prompt(password, prompter, "Password")?;
            let probe = probe.unwrap_or(app.config.api.login_probe);
            let user = app
                .admin
                .login(username.trim(), &password, probe)
                .await
                .map_err(login_banner)?;
            writeln!(w, "Logged in as {}", user.username)?;
        }
        AdminAction::Logout => {
            app.admin.logout()?;
            writeln!(w, "Logged out")?;
        }
        AdminAction::Status { verify } => status(app, w, verify).await?,
        AdminAction::Password {
            current,
            new,
            confirm,
        } => {
            let current = password_or_prompt(current, prompter, "Current password")?;
            let new = password_or_prompt(new, prompter, "New password")?;
            let confirm = password_or_prompt(confirm, prompter, "Confirm new password")?;
            app.admin
                .change_password(&current, &new, &confirm)
                .await
                .classify_with(password_change_message)?;
            writeln!(w, "Password changed successfully!")?;
        }
        AdminAction::Blog { action } => blog_cmd::run(app, w, prompter, action).await?,
    }
    Ok(())
}

async fn status(app: &App, w: &mut impl Write, verify: bool) -> anyhow::Result<()> {
    // Older state files carry only the credential.
    let user = app.session.user().or_else(|| {
        let (username, _) = app.session.credential()?.decode().ok()?;
        Some(AdminUser::admin(username))
    });
    let Some(user) = user else {
        writeln!(w, "Not logged in")?;
        return Ok(());
    };

    writeln!(w, "Logged in as {} ({})", user.username, user.role)?;
    writeln!(w, "  API: {}", app.admin.endpoints().base())?;
    if verify {
        app.admin
            .verify()
            .await
            .classify(Lookup::list("admin session"))?;
        writeln!(w, "  Credential accepted by the server")?;
    }
    Ok(())
}

fn login_banner(err: LoginError) -> anyhow::Error {
    let message = err.to_string();
    match err {
        LoginError::MissingFields => Banner::new(ErrorKind::Validation, message).into(),
        LoginError::InvalidCredentials => Banner::new(ErrorKind::Authentication, message).into(),
        LoginError::AdminRequired => Banner::new(ErrorKind::Authorization, message).into(),
        LoginError::Connectivity(source) => Banner {
            message,
            kind: source.kind(),
            source: Some(source),
        }
        .into(),
        LoginError::Session(e) => anyhow::Error::new(e).context("Failed to save admin session"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shodhan_client::ApiError;

    #[test]
    fn probe_names_match_config_spelling() {
        assert_eq!(parse_probe("blog-list").unwrap(), LoginProbe::BlogList);
        assert_eq!(parse_probe("dedicated").unwrap(), LoginProbe::Dedicated);
        assert!(parse_probe("blogs").is_err());
    }

    #[test]
    fn login_failures_become_banners() {
        let err = login_banner(LoginError::AdminRequired);
        let banner = err.downcast_ref::<Banner>().unwrap();
        assert_eq!(banner.kind, ErrorKind::Authorization);
        assert_eq!(banner.message, "Access denied. Admin privileges required.");

        let err = login_banner(LoginError::Connectivity(ApiError::Status {
            status: 502,
            message: None,
        }));
        let banner = err.downcast_ref::<Banner>().unwrap();
        assert!(banner.retryable());
        assert_eq!(
            banner.message,
            "Login failed. Please check your connection and try again."
        );
    }
}
