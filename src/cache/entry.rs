//! Cache entry metadata and freshness.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io;

use super::location::CacheLocation;

/// A cache file as found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    /// Where the entry lives.
    pub location: CacheLocation,
    /// Filesystem modification time.
    pub modified_at: DateTime<Utc>,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl CacheEntry {
    /// Read entry metadata from disk.
    ///
    /// Returns `Ok(None)` when no file exists at `location`.
    pub fn read(location: &CacheLocation) -> io::Result<Option<Self>> {
        let meta = match fs::metadata(location.path()) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        if !meta.is_file() {
            return Ok(None);
        }

        Ok(Some(Self {
            location: location.clone(),
            modified_at: meta.modified()?.into(),
            size_bytes: meta.len(),
        }))
    }

    /// Whether the entry is still fresh at `now` for a budget in seconds.
    ///
    /// Fresh while `now <= modified_at + budget`, compared in whole seconds.
    pub fn is_fresh_at(&self, budget: u64, now: DateTime<Utc>) -> bool {
        i128::from(now.timestamp()) <= i128::from(self.modified_at.timestamp()) + i128::from(budget)
    }

    /// When the entry expires, `None` if beyond the representable range.
    pub fn expires_at(&self, budget: u64) -> Option<DateTime<Utc>> {
        let budget = chrono::Duration::try_seconds(i64::try_from(budget).ok()?)?;
        self.modified_at.checked_add_signed(budget)
    }

    /// Age of the entry at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.modified_at)
    }

    /// Seconds left before expiry at `now`, zero once expired.
    pub fn remaining_ttl(&self, budget: u64, now: DateTime<Utc>) -> i64 {
        match self.expires_at(budget) {
            Some(expires_at) => expires_at.signed_duration_since(now).num_seconds().max(0),
            None => i64::MAX,
        }
    }
}

/// Check whether the cache file at `location` is fresh at `now`.
///
/// A missing file is never fresh. Metadata errors count as stale.
pub fn check_expiration(location: &CacheLocation, budget: u64, now: DateTime<Utc>) -> bool {
    match CacheEntry::read(location) {
        Ok(Some(entry)) => entry.is_fresh_at(budget, now),
        Ok(None) => false,
        Err(e) => {
            tracing::debug!("Cannot stat cache file {}: {}", location, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn entry_at(modified_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry {
            location: CacheLocation::new("/tmp", "x.html"),
            modified_at,
            size_bytes: 0,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn fresh_up_to_and_including_boundary() {
        let entry = entry_at(t0());
        let budget = 3600;

        assert!(entry.is_fresh_at(budget, t0()));
        assert!(entry.is_fresh_at(budget, t0() + Duration::seconds(1800)));
        assert!(entry.is_fresh_at(budget, t0() + Duration::seconds(3600)));
        assert!(!entry.is_fresh_at(budget, t0() + Duration::seconds(3601)));
    }

    #[test]
    fn zero_budget_is_fresh_only_within_the_same_second() {
        let entry = entry_at(t0());
        assert!(entry.is_fresh_at(0, t0()));
        assert!(!entry.is_fresh_at(0, t0() + Duration::seconds(1)));
    }

    #[test]
    fn huge_budget_never_expires() {
        let entry = entry_at(t0());
        assert!(entry.is_fresh_at(u64::MAX, t0() + Duration::days(365 * 100)));
        assert_eq!(entry.expires_at(u64::MAX), None);
    }

    #[test]
    fn expires_at_adds_budget() {
        let entry = entry_at(t0());
        assert_eq!(entry.expires_at(60), Some(t0() + Duration::seconds(60)));
    }

    #[test]
    fn remaining_ttl_calculation() {
        let entry = entry_at(t0());
        assert_eq!(entry.remaining_ttl(3600, t0() + Duration::seconds(600)), 3000);
        assert_eq!(entry.remaining_ttl(3600, t0() + Duration::seconds(7200)), 0);
    }

    #[test]
    fn entry_age() {
        let entry = entry_at(t0());
        assert_eq!(entry.age(t0() + Duration::seconds(90)).num_seconds(), 90);
    }

    #[test]
    fn read_missing_file_returns_none() {
        let temp = TempDir::new().unwrap();
        let loc = CacheLocation::new(temp.path(), "missing.html");
        assert!(CacheEntry::read(&loc).unwrap().is_none());
    }

    #[test]
    fn read_directory_returns_none() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("dir.html")).unwrap();
        let loc = CacheLocation::new(temp.path(), "dir.html");
        assert!(CacheEntry::read(&loc).unwrap().is_none());
    }

    #[test]
    fn read_existing_file_reports_size_and_mtime() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page.html");
        fs::write(&path, "12345").unwrap();

        let loc = CacheLocation::new(temp.path(), "page.html");
        let entry = CacheEntry::read(&loc).unwrap().unwrap();
        assert_eq!(entry.size_bytes, 5);

        let expected: DateTime<Utc> = fs::metadata(&path).unwrap().modified().unwrap().into();
        assert_eq!(entry.modified_at, expected);
    }

    #[test]
    fn missing_file_is_never_fresh() {
        let temp = TempDir::new().unwrap();
        let loc = CacheLocation::new(temp.path(), "missing.html");
        let now = Utc::now();

        assert!(!check_expiration(&loc, 0, now));
        assert!(!check_expiration(&loc, 31_536_000, now));
        assert!(!check_expiration(&loc, u64::MAX, now));
    }

    #[test]
    fn check_expiration_uses_file_mtime() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page.html");
        fs::write(&path, "cached").unwrap();

        let mtime = SystemTime::from(t0());
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        let loc = CacheLocation::new(temp.path(), "page.html");
        assert!(check_expiration(&loc, 100, t0() + Duration::seconds(100)));
        assert!(!check_expiration(&loc, 100, t0() + Duration::seconds(101)));
    }
}
