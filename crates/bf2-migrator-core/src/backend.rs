//! Catalog of the online-service backends a BF2 executable can target
//!
//! Every supported backend is described by a static [`BackendProfile`]. The
//! lookup in [`Backend::profile`] is an exhaustive match, so adding a variant
//! forces its profile to be written in the same place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const GAMESPY_HOSTNAME: &str = "gamespy.com";
pub const OPENSPY_HOSTNAME: &str = "openspy.net";
pub const BF2HUB_HOSTNAME: &str = "bf2hub.com";
pub const PLAYBF2_HOSTNAME: &str = "playbf2.ru";

pub const GAMESPY_HOSTS_PATH: &str = "\\drivers\\etc\\hosts";
pub const OPENSPY_HOSTS_PATH: &str = "\\drivers\\etz\\hosts";
pub const BF2HUB_HOSTS_PATH: &str = "\\drivers\\xtc\\hosts";
pub const PLAYBF2_HOSTS_PATH: &str = "\\drivers\\etc\\hasts";

/// Library the BF2Hub patcher injects into the import table
pub const BF2HUB_LIBRARY: &str = "bf2hbc.dll";
/// System library written over [`BF2HUB_LIBRARY`] when leaving BF2Hub
pub const STAND_IN_LIBRARY: &str = "WS2_32.dll";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    #[default]
    Unknown,
    Gamespy,
    Openspy,
    Bf2hub,
    Playbf2,
}

/// Static description of how a backend shows up inside the executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProfile {
    /// Identity token of the backend
    pub hostname: &'static str,
    /// Token actually written into the hostname fields
    ///
    /// BF2Hub proxies GameSpy traffic through its client library and leaves
    /// every hostname field at the GameSpy value.
    pub field_hostname: &'static str,
    /// Path the game uses to redirect hostname resolution
    pub hosts_path: &'static str,
    /// Extra library whose presence is part of the fingerprint
    pub companion_library: Option<&'static str>,
    /// Whether the master-server format string carries the `%d` placeholder
    pub master_placeholder: bool,
}

static GAMESPY: BackendProfile = BackendProfile {
    hostname: GAMESPY_HOSTNAME,
    field_hostname: GAMESPY_HOSTNAME,
    hosts_path: GAMESPY_HOSTS_PATH,
    companion_library: None,
    master_placeholder: true,
};

static OPENSPY: BackendProfile = BackendProfile {
    hostname: OPENSPY_HOSTNAME,
    field_hostname: OPENSPY_HOSTNAME,
    hosts_path: OPENSPY_HOSTS_PATH,
    companion_library: None,
    master_placeholder: true,
};

static BF2HUB: BackendProfile = BackendProfile {
    hostname: BF2HUB_HOSTNAME,
    field_hostname: GAMESPY_HOSTNAME,
    hosts_path: BF2HUB_HOSTS_PATH,
    companion_library: Some(BF2HUB_LIBRARY),
    master_placeholder: true,
};

static PLAYBF2: BackendProfile = BackendProfile {
    hostname: PLAYBF2_HOSTNAME,
    field_hostname: PLAYBF2_HOSTNAME,
    hosts_path: PLAYBF2_HOSTS_PATH,
    companion_library: None,
    // PlayBF2 drops the numeric placeholder along with the hostname
    master_placeholder: false,
};

impl Backend {
    /// Every backend that can be detected and patched to
    pub const SUPPORTED: [Backend; 4] = [
        Backend::Gamespy,
        Backend::Openspy,
        Backend::Bf2hub,
        Backend::Playbf2,
    ];

    pub fn profile(&self) -> Option<&'static BackendProfile> {
        match self {
            Self::Unknown => None,
            Self::Gamespy => Some(&GAMESPY),
            Self::Openspy => Some(&OPENSPY),
            Self::Bf2hub => Some(&BF2HUB),
            Self::Playbf2 => Some(&PLAYBF2),
        }
    }

    /// Human readable provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Gamespy => "GameSpy",
            Self::Openspy => "OpenSpy",
            Self::Bf2hub => "BF2Hub",
            Self::Playbf2 => "PlayBF2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_profile_lookup() {
        assert!(Backend::Unknown.profile().is_none());
        for backend in Backend::SUPPORTED {
            assert!(backend.profile().is_some(), "{backend} has no profile");
        }
    }

    #[test]
    fn test_only_bf2hub_has_companion_library() {
        for backend in Backend::SUPPORTED {
            let profile = backend.profile().unwrap();
            assert_eq!(
                profile.companion_library.is_some(),
                backend == Backend::Bf2hub
            );
        }
        assert_eq!(BF2HUB_LIBRARY.len(), STAND_IN_LIBRARY.len());
    }

    #[test]
    fn test_bf2hub_keeps_gamespy_hostname() {
        let profile = Backend::Bf2hub.profile().unwrap();
        assert_eq!(profile.hostname, "bf2hub.com");
        assert_eq!(profile.field_hostname, GAMESPY_HOSTNAME);
    }

    #[test]
    fn test_hosts_paths_are_distinct_and_equal_length() {
        let paths: Vec<&str> = Backend::SUPPORTED
            .iter()
            .map(|b| b.profile().unwrap().hosts_path)
            .collect();
        for (i, a) in paths.iter().enumerate() {
            assert_eq!(a.len(), GAMESPY_HOSTS_PATH.len());
            for b in &paths[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_backend_parse_and_display() {
        assert_eq!(Backend::from_str("openspy").unwrap(), Backend::Openspy);
        assert_eq!(Backend::from_str("BF2Hub").unwrap(), Backend::Bf2hub);
        assert!(Backend::from_str("example").is_err());
        assert_eq!(Backend::Playbf2.to_string(), "playbf2");
    }

    #[test]
    fn test_backend_serialize() {
        let json = serde_json::to_string(&Backend::Openspy).unwrap();
        assert_eq!(json, "\"openspy\"");
        let parsed: Backend = serde_json::from_str("\"bf2hub\"").unwrap();
        assert_eq!(parsed, Backend::Bf2hub);
    }
}
