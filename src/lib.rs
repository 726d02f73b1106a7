//! Safety-report desk for construction sites: report and reward listings, and the
//! per-report conversation where a manager talks to the reporter, moves the report
//! through its statuses and decides the reward.

pub mod app_state;
pub mod config;
pub mod conversation;
pub mod error;
pub mod i18n;
pub mod media;
pub mod models;
pub mod repository;
pub mod search;
pub mod stats;
pub mod telemetry;

pub use app_state::AppState;
pub use error::{AppError, AppResult};
