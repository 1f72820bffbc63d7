//! HTTP request handlers

pub mod health;
pub mod help;
pub mod navigate;
pub mod search;
