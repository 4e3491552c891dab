pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod state;
pub mod status;

pub use config::{AgentConfig, AgentInfo, AttachmentOptions};
pub use status::{ReportStatus, calculate_rp_status};
