pub(crate) mod banner;
pub(crate) mod header;
pub mod layout;
mod report;

pub use banner::{Banner, Language};
pub use header::{ExecutableRegion, NdsHeader, TitleId, read_title_id};
pub use report::*;
