//! Monitoring services for the dive safety assistant

pub mod alert;
pub mod emergency;
pub mod health;
pub mod notification;

pub use alert::AlertService;
pub use emergency::{EmergencyRequest, EmergencyService, TapGestureDetector};
pub use health::{HealthAssessment, HealthService};
pub use notification::{AlertSink, RecordingSink, TracingSink};
