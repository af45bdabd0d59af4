//! # Mapping Database
//!
//! GUID-keyed store of controller mappings.
//!
//! ## Priority Rules
//!
//! At most one mapping is kept per GUID. A new mapping replaces the stored
//! one when its [`Priority`] is greater than or equal to the stored priority,
//! so re-applying the same source is idempotent and later lines of one
//! source win over earlier ones.
//!
//! Mappings that name a platform other than the running one are dropped.
//!
//! ## Initialization
//!
//! Sources load in rank order: the built-in dataset at [`Priority::Default`],
//! mapping files at [`Priority::Api`], then the user override block at
//! [`Priority::User`]. [`MappingDatabase::initialize`] covers the built-in
//! and user steps for callers without mapping files.
//!
//! After startup the database is only read. Lookups hand out borrows, so the
//! borrow checker rejects any reload while a looked-up mapping is still in
//! use; clone the mapping to keep it longer.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::builtin::BUILTIN_MAPPINGS;
use super::parser::{Mapping, Priority};
use crate::error::Result;

/// Platform name as used in the `platform:` directive of mapping lines.
#[must_use]
pub fn current_platform() -> &'static str {
    if cfg!(target_os = "linux") {
        "Linux"
    } else if cfg!(target_os = "windows") {
        "Windows"
    } else if cfg!(target_os = "macos") {
        "Mac OS X"
    } else if cfg!(target_os = "android") {
        "Android"
    } else {
        "Unknown"
    }
}

/// What [`MappingDatabase::upsert`] did with a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No mapping existed for the GUID
    Inserted,
    /// Replaced a mapping of lower or equal priority
    Replaced,
    /// Existing mapping has higher priority and was kept
    Retained,
    /// Mapping is for another platform
    PlatformSkipped,
}

/// Counters from a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Lines parsed into a mapping (whether or not stored)
    pub accepted: usize,
    /// Lines rejected as malformed
    pub rejected: usize,
}

/// GUID-keyed mapping store.
#[derive(Debug, Clone)]
pub struct MappingDatabase {
    mappings: HashMap<String, Mapping>,
    platform: String,
}

impl Default for MappingDatabase {
    fn default() -> Self {
        Self::new(current_platform())
    }
}

impl MappingDatabase {
    /// Creates an empty database filtering for `platform`.
    #[must_use]
    pub fn new(platform: &str) -> Self {
        Self {
            mappings: HashMap::new(),
            platform: platform.to_string(),
        }
    }

    /// Builds the startup database: built-in dataset, then the user block.
    ///
    /// # Arguments
    ///
    /// * `platform` - Platform name mappings are filtered for
    /// * `user_block` - Newline-separated user mappings, usually the contents
    ///   of `SDL_GAMECONTROLLERCONFIG`
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::mapping::database::MappingDatabase;
    ///
    /// let user = "030000005e0400008e02000014010000,My Pad,a:b3,platform:Linux";
    /// let db = MappingDatabase::initialize("Linux", Some(user));
    /// assert_eq!(db.lookup("030000005e0400008e02000014010000").unwrap().name, "My Pad");
    /// ```
    #[must_use]
    pub fn initialize(platform: &str, user_block: Option<&str>) -> Self {
        let mut db = Self::new(platform);
        db.load_builtin();
        if let Some(block) = user_block {
            let report = db.bulk_load(block, Priority::User);
            info!(
                "Loaded {} user mappings ({} rejected)",
                report.accepted, report.rejected
            );
        }
        db
    }

    /// Loads the built-in dataset at [`Priority::Default`].
    pub fn load_builtin(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        for line in BUILTIN_MAPPINGS {
            self.load_line(line, Priority::Default, &mut report);
        }
        debug!(
            "Loaded {} built-in mappings, {} stored for {}",
            report.accepted,
            self.mappings.len(),
            self.platform
        );
        report
    }

    /// Inserts or replaces the mapping for its GUID.
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::mapping::database::{MappingDatabase, UpsertOutcome};
    /// use padmap::mapping::parser::{Mapping, Priority};
    ///
    /// let mut db = MappingDatabase::new("Linux");
    /// let user = Mapping::parse("guid,User,a:b1", Priority::User)?;
    /// let default = Mapping::parse("guid,Default,a:b0", Priority::Default)?;
    ///
    /// assert_eq!(db.upsert(user), UpsertOutcome::Inserted);
    /// assert_eq!(db.upsert(default), UpsertOutcome::Retained);
    /// assert_eq!(db.lookup("guid").unwrap().name, "User");
    /// # Ok::<(), padmap::error::PadmapError>(())
    /// ```
    pub fn upsert(&mut self, mapping: Mapping) -> UpsertOutcome {
        if let Some(platform) = mapping.platform.as_deref() {
            if platform != self.platform {
                debug!(
                    "Skipping mapping {} for platform {}",
                    mapping.guid, platform
                );
                return UpsertOutcome::PlatformSkipped;
            }
        }

        match self.mappings.get_mut(&mapping.guid) {
            Some(existing) if mapping.priority >= existing.priority => {
                *existing = mapping;
                UpsertOutcome::Replaced
            }
            Some(_) => UpsertOutcome::Retained,
            None => {
                self.mappings.insert(mapping.guid.clone(), mapping);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Parses and upserts every line of a text block.
    ///
    /// Blank lines are ignored. A malformed line is logged and skipped; the
    /// remaining lines are still loaded.
    pub fn bulk_load(&mut self, text: &str, priority: Priority) -> LoadReport {
        let mut report = LoadReport::default();
        for line in text.lines() {
            self.load_line(line, priority, &mut report);
        }
        report
    }

    /// Reads a mapping file and bulk-loads it.
    ///
    /// # Errors
    ///
    /// Returns [`PadmapError::Io`](crate::error::PadmapError::Io) if the file
    /// cannot be read.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, priority: Priority) -> Result<LoadReport> {
        let text = fs::read_to_string(path.as_ref())?;
        let report = self.bulk_load(&text, priority);
        info!(
            "Loaded {} mappings from {} ({} rejected)",
            report.accepted,
            path.as_ref().display(),
            report.rejected
        );
        Ok(report)
    }

    /// Returns the mapping stored for `guid`.
    #[must_use]
    pub fn lookup(&self, guid: &str) -> Option<&Mapping> {
        let mapping = self.mappings.get(guid);
        if let Some(mapping) = mapping {
            debug!("Found mapping for guid {}: {}", guid, mapping.name);
        }
        mapping
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Platform name this database filters for.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.values()
    }

    fn load_line(&mut self, line: &str, priority: Priority, report: &mut LoadReport) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return;
        }
        match Mapping::parse(line, priority) {
            Ok(mapping) => {
                report.accepted += 1;
                self.upsert(mapping);
            }
            Err(e) => {
                report.rejected += 1;
                warn!("Skipping mapping line: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::binding::InputBinding;
    use crate::mapping::capability::Capability;

    const GUID: &str = "030000005e0400008e02000014010000";

    fn mapping(name: &str, priority: Priority) -> Mapping {
        Mapping::parse(&format!("{},{},a:b0", GUID, name), priority).unwrap()
    }

    // ==================== Upsert Tests ====================

    #[test]
    fn test_upsert_inserts_new_guid() {
        let mut db = MappingDatabase::new("Linux");
        assert_eq!(db.upsert(mapping("first", Priority::Default)), UpsertOutcome::Inserted);
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_upsert_higher_priority_replaces() {
        let mut db = MappingDatabase::new("Linux");
        db.upsert(mapping("default", Priority::Default));
        assert_eq!(db.upsert(mapping("user", Priority::User)), UpsertOutcome::Replaced);
        assert_eq!(db.lookup(GUID).unwrap().name, "user");
    }

    #[test]
    fn test_upsert_lower_priority_never_replaces() {
        let mut db = MappingDatabase::new("Linux");
        db.upsert(mapping("user", Priority::User));
        assert_eq!(db.upsert(mapping("default", Priority::Default)), UpsertOutcome::Retained);
        assert_eq!(db.upsert(mapping("api", Priority::Api)), UpsertOutcome::Retained);
        assert_eq!(db.lookup(GUID).unwrap().name, "user");
    }

    #[test]
    fn test_upsert_same_priority_replaces() {
        for priority in [Priority::Default, Priority::Api, Priority::User] {
            let mut db = MappingDatabase::new("Linux");
            db.upsert(mapping("old", priority));
            assert_eq!(db.upsert(mapping("new", priority)), UpsertOutcome::Replaced);
            assert_eq!(db.lookup(GUID).unwrap().name, "new");
            assert_eq!(db.len(), 1);
        }
    }

    #[test]
    fn test_upsert_platform_filter() {
        let mut db = MappingDatabase::new("Linux");
        let windows = Mapping::parse("g1,Pad,a:b0,platform:Windows", Priority::User).unwrap();
        let linux = Mapping::parse("g2,Pad,a:b0,platform:Linux", Priority::User).unwrap();
        let any = Mapping::parse("g3,Pad,a:b0", Priority::User).unwrap();

        assert_eq!(db.upsert(windows), UpsertOutcome::PlatformSkipped);
        assert_eq!(db.upsert(linux), UpsertOutcome::Inserted);
        assert_eq!(db.upsert(any), UpsertOutcome::Inserted);
        assert!(db.lookup("g1").is_none());
        assert_eq!(db.len(), 2);
    }

    // ==================== Bulk Load Tests ====================

    #[test]
    fn test_bulk_load_skips_malformed_lines() {
        let mut db = MappingDatabase::new("Linux");
        let text = "g1,One,a:b0\nbroken line\n\ng2,Two,b:b1\r\ng3\ng4,Four,x:b2";
        let report = db.bulk_load(text, Priority::Api);

        assert_eq!(report, LoadReport { accepted: 3, rejected: 2 });
        assert_eq!(db.len(), 3);
        assert_eq!(db.lookup("g2").unwrap().name, "Two");
        assert_eq!(db.lookup("g4").unwrap().priority, Priority::Api);
    }

    #[test]
    fn test_bulk_load_same_guid_last_wins() {
        let mut db = MappingDatabase::new("Linux");
        db.bulk_load("g,First,a:b0\ng,Second,a:b1", Priority::Default);
        let stored = db.lookup("g").unwrap();
        assert_eq!(stored.name, "Second");
        assert_eq!(
            stored.bindings[&Capability::A].input,
            InputBinding::Button { index: 1 }
        );
    }

    #[test]
    fn test_load_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "g1,From File,a:b0,platform:Linux").unwrap();
        writeln!(file, "g2,Other Platform,a:b0,platform:Windows").unwrap();
        file.flush().unwrap();

        let mut db = MappingDatabase::new("Linux");
        let report = db.load_file(file.path(), Priority::Api).unwrap();
        assert_eq!(report.accepted, 2);
        assert_eq!(db.len(), 1);
        assert_eq!(db.lookup("g1").unwrap().name, "From File");
    }

    #[test]
    fn test_load_missing_file() {
        let mut db = MappingDatabase::new("Linux");
        assert!(db.load_file("/nonexistent/mappings.txt", Priority::Api).is_err());
    }

    // ==================== Initialization Tests ====================

    #[test]
    fn test_initialize_builtin_only() {
        let db = MappingDatabase::initialize("Linux", None);
        assert!(!db.is_empty());
        assert!(db.iter().all(|m| m.platform.as_deref() == Some("Linux")));
        assert_eq!(db.lookup(GUID).unwrap().name, "Xbox 360 Controller");
    }

    #[test]
    fn test_initialize_user_block_overrides_builtin() {
        let user = format!("{},Custom Pad,a:b3,platform:Linux\n", GUID);
        let db = MappingDatabase::initialize("Linux", Some(&user));
        let stored = db.lookup(GUID).unwrap();
        assert_eq!(stored.name, "Custom Pad");
        assert_eq!(stored.priority, Priority::User);
    }

    #[test]
    fn test_initialize_filters_other_platforms() {
        let linux = MappingDatabase::initialize("Linux", None);
        let windows = MappingDatabase::initialize("Windows", None);
        assert!(linux.lookup("03000000790000000600000000000000").is_none());
        assert!(windows.lookup("03000000790000000600000000000000").is_some());
        assert!(windows.lookup(GUID).is_none());
    }

    #[test]
    fn test_current_platform_known() {
        assert!(["Linux", "Windows", "Mac OS X", "Android", "Unknown"].contains(&current_platform()));
    }
}
