//! Cocktail feasibility and shopping recommendation engine.
//!
//! Resolves free-text ingredient names to a canonical vocabulary, classifies a static
//! recipe catalog into makeable / one-short / two-short buckets, and ranks the
//! purchases that would unlock the most recipes. The `api` module exposes the engine
//! over HTTP; everything under `services` is usable as a plain library.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::CocktailEngine;
