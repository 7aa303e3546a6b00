//! Shodhan CLI Library
//!
//! Terminal front end for the clinic site: browse the catalogue, book
//! appointments and manage blog posts as an admin.

pub mod admin_cmd;
pub mod app;
pub mod banner;
pub mod blog_cmd;
pub mod book_cmd;
pub mod browse_cmd;
pub mod fmt;
pub mod open_cmd;
pub mod promo_cmd;
pub mod prompt;
