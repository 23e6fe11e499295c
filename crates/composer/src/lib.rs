//! `orderdesk-composer`
//!
//! **Responsibility:** the order composition workflow.
//!
//! An [`OrderComposer`] is opened against injected collaborators (catalog
//! source, order gateway, notifier), owns one draft for its lifetime and
//! drives it through validation and submission.

pub mod composer;
pub mod config;
pub mod notifier;
pub mod request;
pub mod submission;

pub use composer::{ComposeError, LineSummary, OrderComposer, OrderSummary, Services};
pub use config::{ConfigError, DeskConfig, StockPolicy};
pub use notifier::{Alert, AlertLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use request::{DraftRequest, RequestedItem};
pub use submission::{SubmissionFailure, submit_order};
