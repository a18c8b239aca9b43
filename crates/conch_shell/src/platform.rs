//! Host platform detection.
//!
//! All host facts are gathered once at startup into an explicit `Platform`
//! value that gets passed where it is needed - nothing here is a global.

use crate::error::ShellError;
use std::env;
use std::path::{Path, PathBuf};

/// Facts about the host the prompt and builtins need.
#[derive(Debug, Clone)]
pub struct Platform {
    pub username: String,
    pub hostname: String,
    pub home_dir: PathBuf,
    pub is_admin: bool,
}

impl Platform {
    /// Detect the current platform from the environment.
    pub fn detect() -> Result<Platform, ShellError> {
        let home_dir = env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .ok_or(ShellError::NoHomeDirectory)?;

        Ok(Platform {
            username: env::var("USER")
                .or_else(|_| env::var("USERNAME"))
                .unwrap_or_else(|_| "user".to_string()),
            hostname: hostname(),
            home_dir,
            is_admin: is_admin(),
        })
    }

    /// Cosmetic path translation for the prompt: the home-directory prefix
    /// becomes `~` and separators are normalized to `/`.
    pub fn translate_path(&self, path: &Path) -> String {
        let text = path.to_string_lossy();
        let home = self.home_dir.to_string_lossy();

        let translated = if text.to_lowercase().starts_with(&home.to_lowercase()) {
            format!("~{}", &text[home.len()..])
        } else {
            text.into_owned()
        };

        translated.replace('\\', "/")
    }
}

#[cfg(unix)]
fn hostname() -> String {
    let mut buffer = [0u8; 256];
    let result = unsafe { libc::gethostname(buffer.as_mut_ptr() as *mut libc::c_char, buffer.len()) };
    if result == 0 {
        let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
        if let Ok(name) = std::str::from_utf8(&buffer[..end]) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    fallback_hostname()
}

#[cfg(not(unix))]
fn hostname() -> String {
    fallback_hostname()
}

fn fallback_hostname() -> String {
    env::var("HOSTNAME")
        .or_else(|_| env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "localhost".to_string())
}

#[cfg(unix)]
fn is_admin() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_admin() -> bool {
    false
}
