pub mod dedup;
pub mod provisioning;
pub mod resolver;

pub use dedup::{DuplicateCheck, DuplicateDetector};
pub use provisioning::{BulkCreateOutcome, CopyOutcome, ProvisioningService};
pub use resolver::ResponsibleResolver;
