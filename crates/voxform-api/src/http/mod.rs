//! HTTP handlers and routing.

pub mod form;
pub mod monitoring;
pub mod routes;
pub mod voice;
