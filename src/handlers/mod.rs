//! HTTP handlers for the post generation service.

pub mod generate;
pub mod health;
