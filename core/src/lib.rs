pub mod api;
pub mod article;
pub mod auth;
pub mod client;
pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod form;
pub mod list;
pub mod schedule;
pub mod session;

#[cfg(test)]
mod testing;
