//! Windows integration: install directory lookup and BF2Hub auto-patcher opt-out.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const EXECUTABLE_NAME: &str = "BF2.exe";

/// `HKLM` key written by the retail installer
pub const EA_INSTALL_KEY: &str = r"SOFTWARE\WOW6432Node\Electronic Arts\EA Games\Battlefield 2";
pub const EA_INSTALL_VALUE: &str = "InstallDir";

/// `HKCU` key of the BF2Hub client
pub const BF2HUB_CLIENT_KEY: &str = r"SOFTWARE\BF2Hub Systems\BF2Hub Client";
pub const BF2HUB_DIR_VALUE: &str = "bf2Dir";

/// DWORD values that make the BF2Hub client re-patch the executable
pub const BF2HUB_AUTOPATCH_VALUES: [&str; 2] = ["hrpApplyOnStartup", "hrpInterval"];

/// Path of the executable inside an install directory
pub fn executable_in<P: AsRef<Path>>(install_dir: P) -> PathBuf {
    install_dir.as_ref().join(EXECUTABLE_NAME)
}

/// Find the game executable via the registry.
///
/// Tries the retail installer key first, then the directory recorded by the
/// BF2Hub client.
pub fn find_executable() -> Result<PathBuf> {
    let exe_path = executable_in(find_install_dir()?);
    if !exe_path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Game executable not found at: {}", exe_path.display()),
        )));
    }

    Ok(exe_path)
}

#[cfg(target_os = "windows")]
pub fn find_install_dir() -> Result<PathBuf> {
    use tracing::debug;
    use windows::Win32::System::Registry::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    let candidates = [
        (HKEY_LOCAL_MACHINE, EA_INSTALL_KEY, EA_INSTALL_VALUE),
        (HKEY_CURRENT_USER, BF2HUB_CLIENT_KEY, BF2HUB_DIR_VALUE),
    ];

    for (root, subkey, value) in candidates {
        match registry::read_string(root, subkey, value) {
            Ok(dir) if !dir.is_empty() => {
                debug!("Install directory from {}\\{}: {}", subkey, value, dir);
                return Ok(PathBuf::from(dir));
            }
            Ok(_) => debug!("Empty registry value {}\\{}", subkey, value),
            Err(e) => debug!("Registry lookup {}\\{} failed: {}", subkey, value, e),
        }
    }

    Err(Error::InstallDirNotFound)
}

#[cfg(not(target_os = "windows"))]
pub fn find_install_dir() -> Result<PathBuf> {
    Err(Error::Unsupported(
        "Install directory lookup is only supported on Windows".to_string(),
    ))
}

/// Stop the BF2Hub client from re-patching the executable.
///
/// Returns `false` when the client is not installed, which is fine: it then
/// cannot interfere with patching.
#[cfg(target_os = "windows")]
pub fn disable_hub_autopatch() -> Result<bool> {
    use tracing::debug;
    use windows::Win32::System::Registry::HKEY_CURRENT_USER;

    let Some(key) = registry::open_for_write(HKEY_CURRENT_USER, BF2HUB_CLIENT_KEY)? else {
        return Ok(false);
    };

    for value in BF2HUB_AUTOPATCH_VALUES {
        key.set_dword(value, 0)?;
    }
    debug!("Set {:?} to 0", BF2HUB_AUTOPATCH_VALUES);

    Ok(true)
}

#[cfg(not(target_os = "windows"))]
pub fn disable_hub_autopatch() -> Result<bool> {
    Err(Error::Unsupported(
        "Registry access is only supported on Windows".to_string(),
    ))
}

#[cfg(target_os = "windows")]
mod registry {
    use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
    use windows::Win32::System::Registry::{
        HKEY, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_DWORD, RRF_RT_REG_SZ, RegCloseKey,
        RegGetValueW, RegOpenKeyExW, RegSetValueExW,
    };
    use windows::core::HSTRING;

    use crate::error::{Error, Result};

    pub fn read_string(root: HKEY, subkey: &str, value: &str) -> Result<String> {
        let subkey = HSTRING::from(subkey);
        let value_name = HSTRING::from(value);

        // First call to get the required buffer size
        let mut size: u32 = 0;
        // SAFETY: RegGetValueW with null buffer queries the required size.
        unsafe {
            RegGetValueW(
                root,
                &subkey,
                &value_name,
                RRF_RT_REG_SZ,
                None,
                None,
                Some(&mut size),
            )
            .ok()
            .map_err(|e| Error::Registry(format!("Failed to query registry value size: {e}")))?;
        }

        let mut buffer = vec![0u16; (size as usize) / 2];
        // SAFETY: RegGetValueW reads the registry value into the provided buffer.
        unsafe {
            RegGetValueW(
                root,
                &subkey,
                &value_name,
                RRF_RT_REG_SZ,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&mut size),
            )
            .ok()
            .map_err(|e| Error::Registry(format!("Failed to read registry value: {e}")))?;
        }

        // Trim null terminator
        while buffer.last() == Some(&0) {
            buffer.pop();
        }

        String::from_utf16(&buffer)
            .map_err(|e| Error::Registry(format!("Invalid UTF-16 in registry value: {e}")))
    }

    /// Registry key handle, closed on drop
    pub struct Key(HKEY);

    impl Key {
        pub fn set_dword(&self, value: &str, data: u32) -> Result<()> {
            let value_name = HSTRING::from(value);
            // SAFETY: the handle is open with KEY_SET_VALUE and data outlives the call.
            unsafe {
                RegSetValueExW(
                    self.0,
                    &value_name,
                    0,
                    REG_DWORD,
                    Some(&data.to_le_bytes()),
                )
                .ok()
                .map_err(|e| Error::Registry(format!("Failed to set {value}: {e}")))
            }
        }
    }

    impl Drop for Key {
        fn drop(&mut self) {
            // SAFETY: the handle was opened by RegOpenKeyExW and is closed once.
            unsafe {
                let _ = RegCloseKey(self.0);
            }
        }
    }

    /// Open an existing key; `None` if it does not exist
    pub fn open_for_write(root: HKEY, subkey: &str) -> Result<Option<Key>> {
        let subkey = HSTRING::from(subkey);
        let mut handle = HKEY::default();
        // SAFETY: handle receives the opened key and is wrapped for closing.
        let status =
            unsafe { RegOpenKeyExW(root, &subkey, 0, KEY_QUERY_VALUE | KEY_SET_VALUE, &mut handle) };

        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        status
            .ok()
            .map_err(|e| Error::Registry(format!("Failed to open registry key: {e}")))?;

        Ok(Some(Key(handle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_in() {
        let path = executable_in("Battlefield 2");
        assert_eq!(path, Path::new("Battlefield 2").join("BF2.exe"));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_registry_unsupported_off_windows() {
        assert!(matches!(find_install_dir(), Err(Error::Unsupported(_))));
        assert!(matches!(find_executable(), Err(Error::Unsupported(_))));
        assert!(matches!(disable_hub_autopatch(), Err(Error::Unsupported(_))));
    }
}
