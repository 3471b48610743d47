//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single screen holding:
//! - Patient and symptom entry form
//! - Diagnosis result cards
//! - Verdict acknowledgement modal

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::ClinicTheme;
pub use ui::form::Focus;
pub use ui::results::{result_cards, ResultCard};
pub use worker::{ApiEvent, ApiWorker, ApiWorkerHandle, RequestKind};
