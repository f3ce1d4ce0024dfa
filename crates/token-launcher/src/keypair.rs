// Payer identity loading

use solana_sdk::signature::{read_keypair_file, Keypair};
use std::path::{Path, PathBuf};

use crate::core::{LauncherError, LauncherResult};

/// Expand a leading `~` to `$HOME`
pub fn expand_home(path: &Path) -> LauncherResult<PathBuf> {
    match path.to_str() {
        Some(s) if s == "~" || s.starts_with("~/") => {
            let home = std::env::var("HOME")
                .map_err(|_| LauncherError::Config("HOME environment variable not set".to_string()))?;
            Ok(PathBuf::from(s.replacen('~', &home, 1)))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Load a keypair stored as a JSON array of secret key bytes
pub fn load_keypair(path: &Path) -> LauncherResult<Keypair> {
    let expanded = expand_home(path)?;
    read_keypair_file(&expanded).map_err(|e| LauncherError::Keypair {
        path: expanded.display().to_string(),
        reason: e.to_string(),
    })
}
