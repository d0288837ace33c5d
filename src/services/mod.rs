pub mod artifact;
pub mod report;

pub use artifact::TempArtifact;
pub use report::{ReportChannel, ReportComposer, ReportSettings};
