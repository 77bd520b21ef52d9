pub mod harvest;
pub mod report;

pub use harvest::{
    DEFAULT_INDEX_URL, DEFAULT_OUTPUT_FILE, HarvestOptions, HarvestOutcome,
    HarvestProgressCallback, execute_harvest,
};
pub use report::{Report, ReportEntry, ReportFormat};
