//! Reading and writing the executable on disk

use std::fs::{self, Permissions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::detect::classify;
use crate::error::Result;
use crate::patch::patch;

/// Executable contents together with the permission bits they were read with
#[derive(Debug, Clone)]
pub struct Binary {
    pub bytes: Vec<u8>,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub path: PathBuf,
    pub from: Backend,
    pub to: Backend,
    /// Whether the file on disk was replaced
    pub written: bool,
}

pub fn read_binary<P: AsRef<Path>>(path: P) -> Result<Binary> {
    let path = path.as_ref();
    let permissions = fs::metadata(path)?.permissions();
    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(Binary { bytes, permissions })
}

/// Replace the file contents and restore the original permission bits
pub fn write_binary<P: AsRef<Path>>(
    path: P,
    bytes: &[u8],
    permissions: Permissions,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, bytes)?;
    fs::set_permissions(path, permissions)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Detect the backend of the executable at `path`
pub fn detect_file<P: AsRef<Path>>(path: P) -> Result<Backend> {
    let binary = read_binary(path)?;
    classify(&binary.bytes)
}

/// Patch the executable at `path` towards `to`
///
/// The file is only written once the patched buffer passed every check, and
/// never when `dry_run` is set or the binary already targets `to`.
pub fn patch_file<P: AsRef<Path>>(path: P, to: Backend, dry_run: bool) -> Result<PatchReport> {
    let path = path.as_ref();
    let binary = read_binary(path)?;
    let patched = patch(&binary.bytes, to)?;

    let written = patched.is_modified() && !dry_run;
    if written {
        write_binary(path, &patched.bytes, binary.permissions)?;
        info!("Saved patched binary to {}", path.display());
    } else if dry_run && patched.is_modified() {
        info!("Dry run, leaving {} untouched", path.display());
    }

    Ok(PatchReport {
        path: path.to_path_buf(),
        from: patched.from,
        to: patched.to,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fixture::canonical_binary;
    use tempfile::NamedTempFile;

    fn temp_binary(backend: Backend) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), canonical_binary(backend)).unwrap();
        file
    }

    #[test]
    fn test_patch_file_writes_result() {
        let file = temp_binary(Backend::Gamespy);

        let report = patch_file(file.path(), Backend::Openspy, false).unwrap();
        assert_eq!(report.from, Backend::Gamespy);
        assert_eq!(report.to, Backend::Openspy);
        assert!(report.written);

        assert_eq!(detect_file(file.path()).unwrap(), Backend::Openspy);
        assert_eq!(
            fs::read(file.path()).unwrap(),
            canonical_binary(Backend::Openspy)
        );
    }

    #[test]
    fn test_patch_file_dry_run_leaves_file() {
        let file = temp_binary(Backend::Playbf2);

        let report = patch_file(file.path(), Backend::Openspy, true).unwrap();
        assert_eq!(report.from, Backend::Playbf2);
        assert!(!report.written);
        assert_eq!(
            fs::read(file.path()).unwrap(),
            canonical_binary(Backend::Playbf2)
        );
    }

    #[test]
    fn test_patch_file_already_target() {
        let file = temp_binary(Backend::Openspy);
        let report = patch_file(file.path(), Backend::Openspy, false).unwrap();
        assert!(!report.written);
    }

    #[test]
    fn test_patch_file_failure_writes_nothing() {
        let file = NamedTempFile::new().unwrap();
        let mut contents = canonical_binary(Backend::Gamespy);
        contents.extend_from_slice(b"gamestats.gamespy.com");
        fs::write(file.path(), &contents).unwrap();

        let err = patch_file(file.path(), Backend::Openspy, false).unwrap_err();
        assert!(err.needs_revert());
        assert_eq!(fs::read(file.path()).unwrap(), contents);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch_file(dir.path().join("BF2.exe"), Backend::Openspy, false).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_are_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let file = temp_binary(Backend::Bf2hub);
        fs::set_permissions(file.path(), Permissions::from_mode(0o750)).unwrap();

        patch_file(file.path(), Backend::Gamespy, false).unwrap();

        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}
