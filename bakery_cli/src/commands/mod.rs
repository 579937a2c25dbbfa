//! CLI subcommand implementations.

pub mod admin;
pub mod categories;
pub mod home;
pub mod product;
pub mod products;
pub mod sitemap;
