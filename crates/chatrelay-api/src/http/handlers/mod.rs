//! HTTP request handlers, one module per resource.

pub mod history;
pub mod message;
