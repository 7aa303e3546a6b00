//! Admin blog management.
//!
//! Every call goes through [`shodhan_client::AdminClient`], so a rejected
//! credential ends the session and the redirect is reported by `main`.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use serde_json::{Map, Value};
use shodhan_client::admin::{delete_blog_message, save_blog_message};
use shodhan_client::{ErrorKind, Lookup};
use shodhan_core::blog::{BlogForm, Tags};
use shodhan_core::blog_model::{
    ModelReport, generate_valid_test_data, validate_against_model, validate_blog_form,
};
use shodhan_core::sanitize::{character_status, limits};
use tracing::info;

use crate::app::App;
use crate::banner::{Banner, Classify};
use crate::fmt::{write_blog_detail, write_blog_list, write_character_status};
use crate::prompt::Prompter;

#[derive(clap::Subcommand, Debug)]
pub enum BlogAction {
    /// List every post, drafts included.
    List {
        /// Only posts matching this keyword.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one post by ID or slug.
    Show {
        id: Option<u64>,
        #[arg(long, conflicts_with = "id")]
        slug: Option<String>,
    },
    /// Create a post. The slug is generated from the title when omitted.
    Create {
        #[command(flatten)]
        fields: BlogFields,
    },
    /// Change fields of an existing post; others keep their current values.
    Update {
        id: u64,
        #[command(flatten)]
        fields: BlogFields,
    },
    /// Delete a post.
    Delete {
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Suggest a slug for a title, or check whether a slug is free.
    Slug {
        #[arg(required_unless_present = "check")]
        title: Option<String>,
        #[arg(long)]
        check: Option<String>,
    },
    /// Check a post locally without sending it.
    Validate {
        #[command(flatten)]
        fields: BlogFields,
    },
    /// Create a minimal post the backend must accept.
    Sample,
}

/// Blog form fields; anything left out keeps the form's current value.
#[derive(clap::Args, Debug, Default)]
pub struct BlogFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read the content from a file.
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub published: Option<bool>,
    #[arg(long)]
    pub featured: Option<bool>,
}

impl BlogFields {
    pub fn apply(self, form: &mut BlogForm) -> io::Result<()> {
        if let Some(path) = &self.content_file {
            form.content = std::fs::read_to_string(path)?;
        }
        let text_fields = [
            (self.title, &mut form.title),
            (self.slug, &mut form.slug),
            (self.content, &mut form.content),
            (self.summary, &mut form.summary),
            (self.author, &mut form.author),
            (self.image_url, &mut form.image_url),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(tags) = self.tags {
            form.tags = Tags::Text(tags);
        }
        if let Some(published) = self.published {
            form.published = published;
        }
        if let Some(featured) = self.featured {
            form.featured = featured;
        }
        Ok(())
    }
}

/// Execute a blog subcommand.
pub async fn run(
    app: &App,
    w: &mut impl Write,
    prompter: &impl Prompter,
    action: BlogAction,
) -> anyhow::Result<()> {
    let admin = &app.admin;
    match action {
        BlogAction::List { search } => {
            let blogs = match search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                Some(keyword) => admin.search_blogs(keyword).await,
                None => admin.list_blogs().await,
            }
            .classify(Lookup::list("blogs"))?;
            write_blog_list(w, &blogs, true)?;
            writeln!(w, "\n{} post(s)", blogs.len())?;
        }
        BlogAction::Show { id, slug } => {
            let blog = match (id, slug) {
                (Some(id), _) => admin
                    .blog(id)
                    .await
                    .classify(Lookup::record("blog post", format!("Blog with ID \"{id}\"")))?,
                (None, Some(slug)) => admin.blog_by_slug(&slug).await.classify(Lookup::record(
                    "blog post",
                    format!("Blog post \"{slug}\""),
                ))?,
                (None, None) => {
                    let banner = Banner::new(ErrorKind::Validation, "Give a blog ID or --slug");
                    return Err(banner.into());
                }
            };
            write_blog_detail(w, &blog)?;
        }
        BlogAction::Create { fields } => {
            let mut form = BlogForm::default();
            fields.apply(&mut form).context("Failed to read blog content")?;
            if form.slug.trim().is_empty() && !form.title.trim().is_empty() {
                form.slug = admin
                    .generate_slug(form.title.trim())
                    .await
                    .classify(Lookup::list("slug suggestion"))?;
            }
            let created = admin
                .create_blog(&form)
                .await
                .classify_with(save_blog_message)?;
            info!(slug = %form.slug, "Blog created");
            writeln!(w, "Blog created successfully!")?;
            if let Some(id) = created.and_then(|b| b.id) {
                writeln!(w, "  ID: {id}")?;
            }
        }
        BlogAction::Update { id, fields } => {
            let current = admin
                .blog(id)
                .await
                .classify(Lookup::record("blog post", format!("Blog with ID \"{id}\"")))?;
            let mut form = BlogForm::from_blog(&current);
            fields.apply(&mut form).context("Failed to read blog content")?;
            admin
                .update_blog(id, &form)
                .await
                .classify_with(save_blog_message)?;
            info!(id, "Blog updated");
            writeln!(w, "Blog updated successfully!")?;
        }
        BlogAction::Delete { id, yes } => {
            if !yes {
                let blog = admin
                    .blog(id)
                    .await
                    .classify(Lookup::record("blog post", format!("Blog with ID \"{id}\"")))?;
                let prompt = format!(
                    "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                    blog.title
                );
                if !prompter.confirm(&prompt)? {
                    writeln!(w, "Cancelled")?;
                    return Ok(());
                }
            }
            admin
                .delete_blog(id)
                .await
                .classify_with(delete_blog_message)?;
            info!(id, "Blog deleted");
            writeln!(w, "Blog deleted successfully!")?;
        }
        BlogAction::Slug { title, check } => {
            if let Some(slug) = check {
                let available = admin
                    .check_slug(&slug)
                    .await
                    .classify(Lookup::list("slug availability"))?;
                let verdict = if available { "is available" } else { "is already taken" };
                writeln!(w, "Slug \"{slug}\" {verdict}")?;
            } else if let Some(title) = title {
                let slug = admin
                    .generate_slug(&title)
                    .await
                    .classify(Lookup::list("slug suggestion"))?;
                writeln!(w, "{slug}")?;
            }
        }
        BlogAction::Validate { fields } => {
            let mut form = BlogForm::default();
            fields.apply(&mut form).context("Failed to read blog content")?;
            validate(w, &form)?;
        }
        BlogAction::Sample => {
            let fields = generate_valid_test_data();
            write_report(w, &validate_against_model(&fields))?;
            let created = admin
                .create_blog_fields(&fields)
                .await
                .classify_with(save_blog_message)?;
            writeln!(w, "Sample blog created successfully!")?;
            if let Some(id) = created.and_then(|b| b.id) {
                writeln!(w, "  ID: {id}")?;
            }
        }
    }
    Ok(())
}

/// Local checks only: form rules, the backend model, and field lengths.
fn validate(w: &mut impl Write, form: &BlogForm) -> anyhow::Result<()> {
    let payload_fields: Map<String, Value> = form.to_payload().to_fields();
    let report = validate_against_model(&payload_fields);
    write_report(w, &report)?;

    writeln!(w, "Lengths:")?;
    let tags = form.tags.joined();
    let counted = [
        ("title", form.title.as_str(), limits::TITLE),
        ("slug", form.slug.as_str(), limits::SLUG),
        ("summary", form.summary.as_str(), limits::SUMMARY),
        ("author", form.author.as_str(), limits::AUTHOR),
        ("imageUrl", form.image_url.as_str(), limits::IMAGE_URL),
        ("tags", tags.as_str(), limits::TAGS),
    ];
    for (field, value, limit) in counted {
        write_character_status(w, field, &character_status(value, limit))?;
    }

    let errors = validate_blog_form(form);
    if !errors.is_empty() {
        return Err(Banner::validation(&errors).into());
    }
    writeln!(w, "Blog is valid")?;
    Ok(())
}

fn write_report(w: &mut impl Write, report: &ModelReport) -> io::Result<()> {
    let verdict = if report.is_valid { "valid" } else { "invalid" };
    writeln!(w, "Backend model: {verdict}")?;
    for error in &report.errors {
        writeln!(w, "  error:   {error}")?;
    }
    for warning in &report.warnings {
        writeln!(w, "  warning: {warning}")?;
    }
    Ok(())
}
