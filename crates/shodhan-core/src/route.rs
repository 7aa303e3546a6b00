//! Client-side routing table.
//!
//! Maps URL paths to the views of the site. Static segments take precedence
//! over parameters, so `/blogs/author/{name}` is never read as a blog slug.

use std::fmt;
use std::sync::Mutex;

/// Entry point shown after the session is cleared.
pub const ADMIN_LOGIN: &str = "/admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Clinics,
    Diseases,
    Disease { id: String },
    Services,
    Service { id: String },
    Blogs,
    Blog { slug: String },
    BlogsByAuthor { author: String },
    /// Anything under `/admin`; `rest` is the remainder without a leading slash.
    Admin { rest: String },
    NotFound { path: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["clinics"] => Self::Clinics,
            ["diseases"] => Self::Diseases,
            ["diseases", id] => Self::Disease { id: (*id).into() },
            ["services"] => Self::Services,
            ["services", id] => Self::Service { id: (*id).into() },
            ["blogs"] => Self::Blogs,
            ["blogs", "author", author] => Self::BlogsByAuthor {
                author: decode_segment(author),
            },
            ["blogs", slug] => Self::Blog {
                slug: (*slug).into(),
            },
            ["admin", rest @ ..] => Self::Admin {
                rest: rest.join("/"),
            },
            _ => Self::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Clinics => "/clinics".into(),
            Self::Diseases => "/diseases".into(),
            Self::Disease { id } => format!("/diseases/{id}"),
            Self::Services => "/services".into(),
            Self::Service { id } => format!("/services/{id}"),
            Self::Blogs => "/blogs".into(),
            Self::Blog { slug } => format!("/blogs/{slug}"),
            Self::BlogsByAuthor { author } => format!("/blogs/author/{}", encode_segment(author)),
            Self::Admin { rest } if rest.is_empty() => ADMIN_LOGIN.into(),
            Self::Admin { rest } => format!("{ADMIN_LOGIN}/{rest}"),
            Self::NotFound { path } => path.clone(),
        }
    }

    pub fn admin_login() -> Self {
        Self::Admin {
            rest: String::new(),
        }
    }

    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decode `%20`-style escapes and `+` in a path segment.
fn decode_segment(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or_default();
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b'+' => out.push(b' '),
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn encode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                char::from(b).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// Performs navigation on behalf of code that must redirect the user.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator that only remembers where it was sent. Used by the CLI, which
/// reports the redirect instead of rendering it, and by tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        tracing::debug!(%route, "navigate");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route.clone());
        }
    }
}
