//! Aura admin console
//!
//! A terminal front end for the Aura platform's back office: usage
//! analytics plus management tables for events, games, promo codes,
//! shop bundles, users and aura packages. The interactive surfaces are
//! built from three primitives in `components`: dialogs, anchored
//! dropdown menus, and the form binding layer.

pub mod app;
pub mod components;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod screens;
pub mod terminal;
pub mod ui;
pub mod utils;

pub use app::{App, AppState};
pub use config::AppConfig;
pub use error::Error;
pub use events::{Event, EventHandler};
pub use terminal::run;
pub use ui::render_ui;
