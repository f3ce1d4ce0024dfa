// Non-interactive input from a TOML token file

use std::path::{Path, PathBuf};

use super::{TokenInput, TokenInputSource};
use crate::core::{LauncherError, LauncherResult};

/// Token parameters read from disk, e.g.
///
/// ```toml
/// name = "Foo"
/// symbol = "FOO"
/// decimals = 6
/// supply = 1000
/// website = "https://foo.xyz"
///
/// [social_links]
/// twitter = "https://x.com/foo"
/// ```
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> LauncherResult<TokenInput> {
        let input: TokenInput = toml::from_str(content)
            .map_err(|e| LauncherError::Serialization(format!("invalid token file: {}", e)))?;
        let input = input.normalized();
        input.validate()?;
        Ok(input)
    }
}

impl TokenInputSource for TokenFile {
    fn provide(&mut self) -> LauncherResult<TokenInput> {
        let content = std::fs::read_to_string(&self.path)?;
        Self::parse(&content).map_err(|e| match e {
            LauncherError::Validation(msg) => LauncherError::Validation(format!(
                "{}: {}",
                self.path.display(),
                msg
            )),
            other => other,
        })
    }
}
