pub mod api;
pub mod config;
pub mod dispatch;
pub mod filters;
pub mod handlers;
pub mod humanize;
pub mod media;
pub mod observability;
pub mod storage;
pub mod templates;
