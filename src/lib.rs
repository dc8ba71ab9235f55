//! Interactivity for the portfolio site: navigation, scroll effects, the
//! project gallery and the GitHub stats widget.
//!
//! The decision logic is target independent; the browser wiring in
//! `frontend` is only built for `wasm32`, the maintenance CLI only natively.

pub mod commands;
pub mod config;
pub mod contract;
pub mod effects;
pub mod gallery;
pub mod github;
pub mod nav;
pub mod stats;

#[cfg(not(target_arch = "wasm32"))]
pub mod audit;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
