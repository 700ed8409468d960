//! Content catalog analytics: load a catalog of movies and TV shows, narrow it
//! with sidebar filters, and derive the series the dashboard charts.

pub mod config;
pub mod data;
