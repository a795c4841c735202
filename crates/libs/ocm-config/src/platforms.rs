//! Display names for platform abbreviations used in job names.

use std::collections::BTreeMap;

const DEFAULT_PLATFORM_NAMES: [(&str, &str); 9] = [
    ("crnbx", "CERNBox"),
    ("nc sm", "Nextcloud ScienceMesh"),
    ("nc", "Nextcloud"),
    ("oc sm", "ownCloud ScienceMesh"),
    ("oc", "ownCloud"),
    ("ocis", "oCIS"),
    ("opcl", "OpenCloud"),
    ("os", "OCM Stub"),
    ("sf", "Seafile"),
];

/// Maps a platform key (the space joined tokens before the version, e.g.
/// `nc sm`) to its full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformNames(BTreeMap<String, String>);

impl PlatformNames {
    /// Full name for `key`, or `key` itself when unknown.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Add or replace entries.
    pub fn extend(&mut self, names: impl IntoIterator<Item = (String, String)>) {
        self.0.extend(names);
    }
}

impl Default for PlatformNames {
    fn default() -> Self {
        Self(
            DEFAULT_PLATFORM_NAMES
                .iter()
                .map(|(key, name)| (key.to_string(), name.to_string()))
                .collect(),
        )
    }
}
