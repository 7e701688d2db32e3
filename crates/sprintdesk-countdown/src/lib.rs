//! Session countdown for Sprintdesk.
//!
//! While a protected page is mounted, one countdown actor (a Tokio task)
//! counts the session down, warns before it runs out, rearms on user
//! activity, and logs the user out at zero.
//!
//! # Key types
//!
//! - [`SessionClock`] — the pure countdown and its threshold events
//! - [`WarningTrigger`] — turns events into a notice and a blocking modal
//! - [`ActivityBus`] / [`ActivityResetter`] — activity in, reset decisions out
//! - [`mount`] / [`CountdownMount`] / [`CountdownHandle`] — the running actor
//! - [`CountdownConfig`] — thresholds and timings

mod activity;
mod actor;
mod clock;
mod config;
mod error;
mod warning;

pub use activity::{ActivityBus, ActivityKind, ActivityResetter};
pub use actor::{CountdownHandle, CountdownMount, CountdownSnapshot, mount};
pub use clock::{ClockEvent, SessionClock, format_time};
pub use config::{CountdownConfig, CountdownPhase, ThresholdMode};
pub use error::CountdownError;
pub use warning::{WarningTrigger, session_modal, warning_notice};
