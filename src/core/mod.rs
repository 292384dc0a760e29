pub mod app;
pub mod builtin_models;
pub mod completion;
pub mod config;
pub mod message;
pub mod request;
pub mod reveal;
pub mod sanitize;
