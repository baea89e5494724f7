//! Synthetic executables laid out like a BF2.exe targeting a given backend

use crate::backend::{Backend, STAND_IN_LIBRARY};
use crate::plan::layout::{COMMON_FIELDS, MASTER_SERVER, MASTER_SERVER_NO_PLACEHOLDER};

const HEADER: &[u8] = b"MZ\x90\x00\x03\x00\x00\x00\x04\x00\x00\x00\xff\xff\x00\x00";
const FILLER: &[u8] = &[0xCC, 0x8B, 0x45, 0x08, 0x00, 0x00];

/// Build a buffer holding every patched field exactly as often as the real
/// executable does, separated by filler bytes
pub fn canonical_binary(backend: Backend) -> Vec<u8> {
    let profile = backend
        .profile()
        .expect("canonical binaries exist for supported backends only");
    let hostname = profile.field_hostname;

    let mut binary = HEADER.to_vec();
    let mut push = |bytes: &[u8]| {
        binary.extend_from_slice(bytes);
        binary.extend_from_slice(FILLER);
    };

    for template in &COMMON_FIELDS {
        let field = template.render(hostname).unwrap();
        for _ in 0..template.count {
            push(field.raw());
        }
    }

    let master = if profile.master_placeholder {
        MASTER_SERVER
    } else {
        MASTER_SERVER_NO_PLACEHOLDER
    };
    push(master.render(hostname).unwrap().raw());
    push(profile.hosts_path.as_bytes());
    push(
        profile
            .companion_library
            .unwrap_or(STAND_IN_LIBRARY)
            .as_bytes(),
    );

    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_binaries_share_length() {
        let len = canonical_binary(Backend::Gamespy).len();
        for backend in Backend::SUPPORTED {
            assert_eq!(canonical_binary(backend).len(), len, "{backend}");
        }
    }
}
