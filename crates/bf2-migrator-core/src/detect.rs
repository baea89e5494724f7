//! Backend detection from executable content
//!
//! Signatures overlap at the substring level (a BF2Hub binary still contains
//! every GameSpy hostname), so they are evaluated as a fixed ladder and the
//! first rung whose markers are all present wins.

use memchr::memmem;
use tracing::debug;

use crate::backend::{Backend, BackendProfile};
use crate::error::{Error, Result};

/// Byte sub-pattern taken from a backend profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    HostsPath,
    Hostname,
    CompanionLibrary,
}

impl Marker {
    fn resolve(self, profile: &BackendProfile) -> Option<&'static str> {
        match self {
            Self::HostsPath => Some(profile.hosts_path),
            Self::Hostname => Some(profile.hostname),
            Self::CompanionLibrary => profile.companion_library,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub backend: Backend,
    pub markers: [Marker; 2],
}

/// Detection order, strongest fingerprint first
///
/// The GameSpy rung checks its hostname twice; it has no second marker of
/// its own.
pub const SIGNATURE_LADDER: [Signature; 4] = [
    Signature {
        backend: Backend::Bf2hub,
        markers: [Marker::HostsPath, Marker::CompanionLibrary],
    },
    Signature {
        backend: Backend::Playbf2,
        markers: [Marker::HostsPath, Marker::Hostname],
    },
    Signature {
        backend: Backend::Openspy,
        markers: [Marker::HostsPath, Marker::Hostname],
    },
    Signature {
        backend: Backend::Gamespy,
        markers: [Marker::Hostname, Marker::Hostname],
    },
];

impl Signature {
    pub fn matches(&self, bytes: &[u8]) -> bool {
        let Some(profile) = self.backend.profile() else {
            return false;
        };

        self.markers.iter().all(|marker| {
            marker
                .resolve(profile)
                .is_some_and(|needle| contains(bytes, needle.as_bytes()))
        })
    }
}

/// Determine which backend the executable currently targets
pub fn classify(bytes: &[u8]) -> Result<Backend> {
    for signature in &SIGNATURE_LADDER {
        if signature.matches(bytes) {
            debug!("Signature matched: {}", signature.backend);
            return Ok(signature.backend);
        }
        debug!("Signature not matched: {}", signature.backend);
    }

    Err(Error::SignatureUnrecognized)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    memmem::find(haystack, needle).is_some()
}
