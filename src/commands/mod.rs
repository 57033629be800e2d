//! CLI command implementations.

pub mod enrich;
pub mod harvest;
pub mod run;

pub use enrich::EnrichCommand;
pub use harvest::HarvestCommand;
pub use run::RunCommand;
