//! Shodhan HTTP client
//!
//! Typed access to the clinic backend:
//! - [`PublicClient`] for the catalogue, bookings and public blog pages
//! - [`AdminClient`] for blog management, wrapping every call with the
//!   admin session
//! - [`ApiError`] and its classification into banner messages

pub mod admin;
pub mod auth;
pub mod endpoints;
pub mod error;
mod http;
pub mod public;
pub mod types;

pub use admin::AdminClient;
pub use auth::LoginError;
pub use endpoints::Endpoints;
pub use error::{ApiError, ErrorKind, Lookup};
pub use http::ClientOptions;
pub use public::PublicClient;
