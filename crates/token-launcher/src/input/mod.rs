//! Token parameters and the sources that provide them

pub mod file;
pub mod prompt;
pub mod validate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::LauncherResult;

pub use file::TokenFile;
pub use prompt::PromptCollector;

/// Everything the operator decides about the token, collected once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInput {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole tokens, scaled by `10^decimals` at mint time
    pub supply: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Platform name to URL, e.g. `twitter`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<String, String>,
}

impl TokenInput {
    pub fn new(name: &str, symbol: &str, decimals: u8, supply: f64) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            supply,
            image_url: None,
            description: None,
            website: None,
            social_links: BTreeMap::new(),
        }
    }

    /// Apply the same rules the prompt collector enforces
    pub fn validate(&self) -> LauncherResult<()> {
        validate::parse_name(&self.name)?;
        validate::parse_symbol(&self.symbol)?;
        validate::check_decimals(f64::from(self.decimals))?;
        validate::check_supply(self.supply, self.decimals)?;
        if let Some(image) = &self.image_url {
            validate::check_url(image, "Image URL")?;
        }
        if let Some(website) = &self.website {
            validate::check_url(website, "Website")?;
        }
        for (platform, link) in &self.social_links {
            validate::check_url(link, &capitalize(platform))?;
        }
        Ok(())
    }

    /// Trim strings and turn empty optionals into absence
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.symbol = self.symbol.trim().to_string();
        self.image_url = self.image_url.as_deref().and_then(validate::parse_optional_text);
        self.description = self.description.as_deref().and_then(validate::parse_optional_text);
        self.website = self.website.as_deref().and_then(validate::parse_optional_text);
        self.social_links = self
            .social_links
            .into_iter()
            .filter_map(|(platform, link)| {
                validate::parse_optional_text(&link).map(|link| (platform, link))
            })
            .collect();
        self
    }
}

/// Anything that can hand the pipeline a `TokenInput`
pub trait TokenInputSource {
    fn provide(&mut self) -> LauncherResult<TokenInput>;
}

/// Already-collected input
impl TokenInputSource for TokenInput {
    fn provide(&mut self) -> LauncherResult<TokenInput> {
        Ok(self.clone())
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
