//! Catalogue and blog browsing: diseases, services, clinics, blogs.
//!
//! User-facing output uses writeln! to the given writer (stdout in the binary).

use std::io::Write;

use shodhan_client::types::{Blog, filter_categories};
use shodhan_client::{ApiError, Lookup};

use crate::app::App;
use crate::banner::{Banner, Classify};
use crate::fmt::{
    write_blog_detail, write_blog_list, write_categories, write_clinics, write_disease_detail,
    write_service_detail, write_services,
};

/// Public blog subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum BlogsAction {
    /// List published posts.
    List,
    /// List featured posts.
    Featured,
    /// Search posts by keyword.
    Search {
        keyword: String,
    },
    /// List posts by one author.
    Author {
        name: String,
    },
    /// Show a post.
    Show {
        /// URL slug of the post.
        slug: String,
    },
}

/// Diseases grouped by category, or one disease when `id` is given.
pub async fn diseases(
    app: &App,
    w: &mut impl Write,
    id: Option<String>,
    search: Option<String>,
) -> anyhow::Result<()> {
    if let Some(id) = id {
        let disease = app
            .public
            .disease(&id)
            .await
            .classify(Lookup::record("disease details", format!("Disease with ID \"{id}\"")))?;
        write_disease_detail(w, &disease)?;
        return Ok(());
    }

    let categories = app
        .public
        .categories_with_diseases()
        .await
        .classify(Lookup::list("diseases"))?;
    let categories = match search.as_deref() {
        Some(term) => filter_categories(&categories, term),
        None => categories,
    };
    write_categories(w, &categories)?;
    Ok(())
}

pub async fn services(app: &App, w: &mut impl Write, id: Option<String>) -> anyhow::Result<()> {
    match id {
        Some(id) => {
            let service = app.public.service(&id).await.classify(Lookup::record(
                "service details",
                format!("Service with ID \"{id}\""),
            ))?;
            write_service_detail(w, &service)?;
        }
        None => {
            let services = app
                .public
                .services()
                .await
                .classify(Lookup::list("services"))?;
            write_services(w, &services)?;
        }
    }
    Ok(())
}

pub async fn clinics(app: &App, w: &mut impl Write) -> anyhow::Result<()> {
    let clinics = app
        .public
        .clinics()
        .await
        .classify(Lookup::list("clinics"))?;
    write_clinics(w, &clinics)?;
    Ok(())
}

/// Execute a public blogs subcommand.
pub async fn blogs(app: &App, w: &mut impl Write, action: BlogsAction) -> anyhow::Result<()> {
    match action {
        BlogsAction::List => write_blog_list(w, &published(app).await?, false)?,
        BlogsAction::Featured => {
            let blogs = app
                .public
                .featured_blogs()
                .await
                .classify(Lookup::list("featured blogs"))?;
            write_blog_list(w, &blogs, false)?;
        }
        BlogsAction::Search { keyword } => {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                write_blog_list(w, &published(app).await?, false)?;
                return Ok(());
            }
            let blogs = app
                .public
                .search_blogs(keyword)
                .await
                .classify_with(|_| "Failed to search blogs. Please try again.".into())?;
            if blogs.is_empty() {
                writeln!(w, "No blog posts match \"{keyword}\".")?;
            } else {
                write_blog_list(w, &blogs, false)?;
            }
        }
        BlogsAction::Author { name } => {
            let blogs = app
                .public
                .blogs_by_author(&name)
                .await
                .classify_with(|e| author_message(e, &name))?;
            if blogs.is_empty() {
                writeln!(w, "No blogs found by author \"{name}\".")?;
            } else {
                writeln!(w, "Posts by {name}\n")?;
                write_blog_list(w, &blogs, false)?;
            }
        }
        BlogsAction::Show { slug } => {
            let blog = app.public.blog_by_slug(&slug).await.classify(Lookup::record(
                "blog post",
                format!("Blog post \"{slug}\""),
            ))?;
            write_blog_detail(w, &blog)?;
        }
    }
    Ok(())
}

async fn published(app: &App) -> Result<Vec<Blog>, Banner> {
    app.public
        .blogs()
        .await
        .classify_with(|_| "Failed to load blogs. Please try again later.".into())
}

fn author_message(err: &ApiError, author: &str) -> String {
    if err.status() == Some(404) {
        return format!("No blogs found by author \"{author}\".");
    }
    err.user_message(&Lookup::list(format!("blogs by {author}")))
}
