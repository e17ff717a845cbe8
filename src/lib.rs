pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod pricing;
pub mod render;
pub mod web;
