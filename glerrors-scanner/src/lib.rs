pub mod dom;
pub mod error;
pub mod fragment;
pub mod harvester;
pub mod index;
pub mod normalize;
pub mod page;
pub mod result;

pub use error::ScanError;
pub use harvester::{Harvester, ProgressCallback};
pub use page::ExtractStrategy;
pub use result::{PageExtract, PageRef, PageResult};
