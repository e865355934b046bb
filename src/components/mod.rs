//! Reusable UI Components
//!
//! Interaction primitives (dialog, dropdown, field binding) plus the shared
//! chrome every screen composes: header, navigation, status bar, tables,
//! and the dashboard charts.

pub mod binding;
pub mod dialog;
pub mod dropdown;
pub mod listener;

pub use binding::*;
pub use dialog::*;
pub use dropdown::*;

pub mod header;
pub mod navigation;
pub mod status_bar;

pub use header::*;
pub use navigation::*;
pub use status_bar::*;

pub mod charts;
pub mod forms;
pub mod tables;

pub use charts::*;
pub use forms::*;
pub use tables::*;
