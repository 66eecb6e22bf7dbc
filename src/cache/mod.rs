//! Disk-backed cache for rendered output.
//!
//! Each render id maps to one cache file (see [`location`]). Freshness is
//! judged from the file's modification time (see [`entry`]), and the
//! fetch-or-render protocol lives in [`store`].

pub mod entry;
pub mod location;
pub mod store;

pub use entry::{check_expiration, CacheEntry};
pub use location::CacheLocation;
pub use store::{CacheStatus, CacheStore, Obtained, Outcome};
