// Interactive collection over any reader/writer pair

use std::collections::BTreeMap;
use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use super::{capitalize, validate, TokenInput, TokenInputSource};
use crate::core::{LauncherError, LauncherResult};

/// Social platforms offered during collection
pub const SOCIAL_PLATFORMS: [&str; 3] = ["twitter", "discord", "telegram"];

/// Prompts go to `writer`; rejected answers are reported on `errors`
pub struct PromptCollector<R, W, E> {
    reader: R,
    writer: W,
    errors: E,
}

impl PromptCollector<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> PromptCollector<R, W, E> {
    pub fn new(reader: R, writer: W, errors: E) -> Self {
        Self {
            reader,
            writer,
            errors,
        }
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.reader, self.writer, self.errors)
    }

    pub fn collect(&mut self) -> LauncherResult<TokenInput> {
        let name = self.ask_until("Token Name: ", validate::parse_name)?;
        let symbol = self.ask_until("Token Symbol: ", validate::parse_symbol)?;
        let decimals = self.ask_until("Decimals (1-18): ", validate::parse_decimals)?;
        let supply =
            self.ask_until("Total Supply (>1): ", |raw| validate::parse_supply(raw, decimals))?;

        let image_url = self.ask_optional("Image URL (optional): ", |raw| {
            validate::parse_optional_url(raw, "Image URL")
        })?;
        let description = self.ask_optional("Description (optional): ", |raw| {
            Ok(validate::parse_optional_text(raw))
        })?;
        let website = self.ask_optional("Website (optional): ", |raw| {
            validate::parse_optional_url(raw, "Website")
        })?;

        let mut social_links = BTreeMap::new();
        for platform in SOCIAL_PLATFORMS {
            let label = capitalize(platform);
            if !self.confirm(&format!("Add {} link? (y/n): ", label))? {
                continue;
            }
            let link = self.ask_optional(&format!("{} URL: ", label), |raw| {
                validate::parse_optional_url(raw, &label)
            })?;
            if let Some(link) = link {
                social_links.insert(platform.to_string(), link);
            }
        }

        Ok(TokenInput {
            name,
            symbol,
            decimals,
            supply,
            image_url,
            description,
            website,
            social_links,
        })
    }

    /// Returns `None` at end of input
    fn ask(&mut self, label: &str) -> LauncherResult<Option<String>> {
        write!(self.writer, "{}", label)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_until<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> LauncherResult<T>,
    ) -> LauncherResult<T> {
        loop {
            let answer = self
                .ask(label)?
                .ok_or_else(|| LauncherError::InputClosed(field_name(label)))?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(LauncherError::Validation(msg)) => self.reject(&msg)?,
                Err(e) => return Err(e),
            }
        }
    }

    fn ask_optional<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> LauncherResult<Option<T>>,
    ) -> LauncherResult<Option<T>> {
        loop {
            let Some(answer) = self.ask(label)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(LauncherError::Validation(msg)) => self.reject(&msg)?,
                Err(e) => return Err(e),
            }
        }
    }

    fn reject(&mut self, msg: &str) -> LauncherResult<()> {
        writeln!(self.errors, "{}", msg)?;
        self.errors.flush()?;
        Ok(())
    }

    fn confirm(&mut self, label: &str) -> LauncherResult<bool> {
        let answer = self.ask(label)?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write, E: Write> TokenInputSource for PromptCollector<R, W, E> {
    fn provide(&mut self) -> LauncherResult<TokenInput> {
        self.collect()
    }
}

fn field_name(label: &str) -> String {
    label.trim_end_matches([':', ' ']).to_string()
}
