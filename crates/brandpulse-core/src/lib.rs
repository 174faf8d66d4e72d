pub mod media;
pub mod metrics;
pub mod profile;

pub use media::{
    AccountAnalysis, BusinessDiscovery, EngagementPoint, Media, MediaPage, PostSummary,
};
pub use metrics::compute_metrics;
pub use profile::{ProfileUrlError, extract_username};
