//! Platform model and the platform-prefix parameter merger.
//!
//! A parameter key may be restricted to one platform by prefixing it with
//! that platform's fixed tag (`win_libs`, `posix_cppdefines`, ...).
//! Resolving a declaration against the set of active platforms drops the
//! keys of inactive platforms and folds active-prefixed keys into their
//! bare names. Posix is a platform of its own: it is active alongside
//! Linux and Mac, so `posix_foo` and `lin_foo` both contribute to `foo`
//! on Linux.

use std::fmt;

use crate::params::ParamMap;
use crate::value::ParamValue;

/// A platform that parameter keys may be prefixed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Mac,
    Posix,
    Windows,
}

impl Platform {
    /// All platforms, in prefix-table order.
    pub const ALL: [Platform; 4] = [
        Platform::Linux,
        Platform::Mac,
        Platform::Posix,
        Platform::Windows,
    ];

    /// The key prefix claiming a parameter for this platform.
    pub fn prefix(self) -> &'static str {
        match self {
            Platform::Linux => "lin_",
            Platform::Mac => "mac_",
            Platform::Posix => "posix_",
            Platform::Windows => "win_",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "linux",
            Platform::Mac => "mac",
            Platform::Posix => "posix",
            Platform::Windows => "windows",
        };
        write!(f, "{name}")
    }
}

/// Process-environment feature bits consulted by the pipeline.
///
/// The OS bits select which prefixed parameters survive; the remaining bits
/// steer default injection (Debug/Coverage) and the dual-arch variant pass
/// (Arch64Bit/ChromeOs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformBit {
    Windows,
    Mac,
    Linux,
    Posix,
    Debug,
    Coverage,
    Arch64Bit,
    ChromeOs,
}

/// The set of platforms active for one build evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePlatforms {
    active: Vec<Platform>,
}

impl ActivePlatforms {
    /// No active platforms. Every prefixed key is dropped.
    pub fn none() -> Self {
        ActivePlatforms::default()
    }

    /// Build from an explicit platform list.
    pub fn from_platforms(platforms: &[Platform]) -> Self {
        let mut active = Vec::new();
        for p in platforms {
            if !active.contains(p) {
                active.push(*p);
            }
        }
        ActivePlatforms { active }
    }

    /// A Linux build: Linux and Posix are active.
    pub fn linux() -> Self {
        ActivePlatforms::from_platforms(&[Platform::Linux, Platform::Posix])
    }

    /// A Mac build: Mac and Posix are active.
    pub fn mac() -> Self {
        ActivePlatforms::from_platforms(&[Platform::Mac, Platform::Posix])
    }

    /// A Windows build.
    pub fn windows() -> Self {
        ActivePlatforms::from_platforms(&[Platform::Windows])
    }

    /// Whether `platform` is active.
    pub fn is_active(&self, platform: Platform) -> bool {
        self.active.contains(&platform)
    }

    /// Classify a key: `Some((platform, stripped))` when it carries a
    /// platform prefix, `None` when it is bare.
    fn split_prefix(key: &str) -> Option<(Platform, &str)> {
        Platform::ALL
            .iter()
            .find_map(|p| key.strip_prefix(p.prefix()).map(|rest| (*p, rest)))
    }
}

/// Resolve a parameter map against the active platform set.
///
/// Keys are visited in insertion order. Keys prefixed with an inactive
/// platform are dropped; keys prefixed with an active platform are folded
/// into their bare names, appending to any value already merged under that
/// name. Maps with no prefixed keys pass through unchanged.
pub fn merge_by_platform(active: &ActivePlatforms, params: &ParamMap) -> ParamMap {
    let mut merged = ParamMap::new();
    for (key, value) in params.iter() {
        match ActivePlatforms::split_prefix(key) {
            Some((platform, stripped)) => {
                if active.is_active(platform) {
                    merged.merge(stripped, value.clone());
                }
            }
            None => merged.merge(key, value.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &[&str])]) -> ParamMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::list(v.iter().copied())))
            .collect()
    }

    #[test]
    fn unprefixed_maps_pass_through_unchanged() {
        let input = params(&[("srcs", &["a.cc"]), ("libs", &["x", "y"])]);
        let merged = merge_by_platform(&ActivePlatforms::linux(), &input);
        assert_eq!(merged, input);
    }

    #[test]
    fn inactive_prefixes_are_dropped() {
        let input = params(&[("win_libs", &["ws2_32"]), ("mac_bar", &["f"])]);
        let merged = merge_by_platform(&ActivePlatforms::linux(), &input);
        assert!(merged.is_empty());
    }

    #[test]
    fn active_prefixes_fold_into_bare_keys() {
        // {win_foo: [a,b], lin_foo: [c,d], foo: [e], mac_bar: [f], bar: [g]}
        let input = params(&[
            ("win_foo", &["a", "b"]),
            ("lin_foo", &["c", "d"]),
            ("foo", &["e"]),
            ("mac_bar", &["f"]),
            ("bar", &["g"]),
        ]);

        let on_windows = merge_by_platform(&ActivePlatforms::windows(), &input);
        assert_eq!(on_windows.get("foo"), Some(&ParamValue::list(["a", "b", "e"])));
        assert_eq!(on_windows.get("bar"), Some(&ParamValue::list(["g"])));

        let on_mac = merge_by_platform(&ActivePlatforms::mac(), &input);
        assert_eq!(on_mac.get("foo"), Some(&ParamValue::list(["e"])));
        assert_eq!(on_mac.get("bar"), Some(&ParamValue::list(["f", "g"])));
    }

    #[test]
    fn overlapping_active_prefixes_both_contribute() {
        let input = params(&[
            ("posix_cppdefines", &["POSIX"]),
            ("lin_cppdefines", &["LINUX"]),
        ]);
        let merged = merge_by_platform(&ActivePlatforms::linux(), &input);
        assert_eq!(
            merged.get("cppdefines"),
            Some(&ParamValue::list(["POSIX", "LINUX"]))
        );
    }

    #[test]
    fn earlier_key_keeps_its_position() {
        let input = params(&[
            ("libs", &["first"]),
            ("srcs", &["a.cc"]),
            ("lin_libs", &["second"]),
        ]);
        let merged = merge_by_platform(&ActivePlatforms::linux(), &input);
        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(keys, vec!["libs", "srcs"]);
        assert_eq!(merged.get("libs"), Some(&ParamValue::list(["first", "second"])));
    }

    #[test]
    fn no_active_platforms_keeps_only_bare_keys() {
        let input = params(&[("lin_libs", &["x"]), ("srcs", &["a.cc"])]);
        let merged = merge_by_platform(&ActivePlatforms::none(), &input);
        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(keys, vec!["srcs"]);
    }
}
