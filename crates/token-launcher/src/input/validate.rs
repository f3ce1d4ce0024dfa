// Field rules shared by the prompt collector and token files

use crate::core::{
    LauncherError, LauncherResult, MAX_DECIMALS, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MIN_DECIMALS,
};
use crate::mint::mint_amount;

pub fn parse_name(raw: &str) -> LauncherResult<String> {
    required(raw, "Token name", MAX_NAME_LENGTH)
}

pub fn parse_symbol(raw: &str) -> LauncherResult<String> {
    required(raw, "Token symbol", MAX_SYMBOL_LENGTH)
}

fn required(raw: &str, field: &str, max_len: usize) -> LauncherResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(LauncherError::validation(format!("{} is required.", field)));
    }
    if value.len() > max_len {
        return Err(LauncherError::validation(format!(
            "{} must be at most {} bytes.",
            field, max_len
        )));
    }
    Ok(value.to_string())
}

pub fn parse_decimals(raw: &str) -> LauncherResult<u8> {
    let n = parse_number(raw, "Decimals")?;
    if n.fract() != 0.0 {
        return Err(LauncherError::validation("Decimals must be a whole number."));
    }
    check_decimals(n)
}

pub fn check_decimals(n: f64) -> LauncherResult<u8> {
    if n < f64::from(MIN_DECIMALS) || n > f64::from(MAX_DECIMALS) {
        return Err(LauncherError::validation(format!(
            "Decimals must be between {} and {}.",
            MIN_DECIMALS, MAX_DECIMALS
        )));
    }
    Ok(n as u8)
}

/// Supply in whole tokens; must leave room for `decimals` in a u64 amount
pub fn parse_supply(raw: &str, decimals: u8) -> LauncherResult<f64> {
    let supply = parse_number(raw, "Supply")?;
    check_supply(supply, decimals)
}

pub fn check_supply(supply: f64, decimals: u8) -> LauncherResult<f64> {
    if !supply.is_finite() {
        return Err(LauncherError::validation("Supply is required and must be a number."));
    }
    if supply <= 1.0 {
        return Err(LauncherError::validation("Supply must be greater than 1."));
    }
    match mint_amount(supply, decimals) {
        Ok(_) => Ok(supply),
        Err(LauncherError::ExcessPrecision { .. }) => Err(LauncherError::validation(
            "Supply has more precision than the chosen decimals.",
        )),
        Err(_) => Err(LauncherError::validation(
            "Supply is too large for the chosen decimals.",
        )),
    }
}

fn parse_number(raw: &str, field: &str) -> LauncherResult<f64> {
    let not_a_number =
        || LauncherError::validation(format!("{} is required and must be a number.", field));
    let n: f64 = raw.trim().parse().map_err(|_| not_a_number())?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(not_a_number())
    }
}

/// Empty input means "not provided"
pub fn parse_optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn parse_optional_url(raw: &str, field: &str) -> LauncherResult<Option<String>> {
    match parse_optional_text(raw) {
        None => Ok(None),
        Some(value) => check_url(&value, field).map(Some),
    }
}

pub fn check_url(value: &str, field: &str) -> LauncherResult<String> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(value.to_string()),
        _ => Err(LauncherError::validation(format!(
            "{} must be an http(s) URL.",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: LauncherError) -> String {
        match err {
            LauncherError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_required_strings() {
        assert_eq!(parse_name("  Foo Token ").unwrap(), "Foo Token");
        assert_eq!(message(parse_name("   ").unwrap_err()), "Token name is required.");
        assert_eq!(message(parse_symbol("").unwrap_err()), "Token symbol is required.");
        assert_eq!(
            message(parse_symbol("ABCDEFGHIJK").unwrap_err()),
            "Token symbol must be at most 10 bytes."
        );
        assert!(parse_name(&"n".repeat(33)).is_err());
        assert!(parse_name(&"n".repeat(32)).is_ok());
    }

    #[test]
    fn test_decimals_range() {
        assert_eq!(parse_decimals("1").unwrap(), 1);
        assert_eq!(parse_decimals(" 18 ").unwrap(), 18);
        assert_eq!(
            message(parse_decimals("0").unwrap_err()),
            "Decimals must be between 1 and 18."
        );
        assert_eq!(
            message(parse_decimals("19").unwrap_err()),
            "Decimals must be between 1 and 18."
        );
        assert_eq!(
            message(parse_decimals("six").unwrap_err()),
            "Decimals is required and must be a number."
        );
        assert_eq!(
            message(parse_decimals("").unwrap_err()),
            "Decimals is required and must be a number."
        );
        assert!(parse_decimals("6.5").is_err());
    }

    #[test]
    fn test_supply_bounds() {
        assert_eq!(parse_supply("1000", 6).unwrap(), 1000.0);
        assert_eq!(parse_supply("1.5", 6).unwrap(), 1.5);
        assert_eq!(message(parse_supply("1", 6).unwrap_err()), "Supply must be greater than 1.");
        assert_eq!(message(parse_supply("-5", 6).unwrap_err()), "Supply must be greater than 1.");
        assert_eq!(
            message(parse_supply("NaN", 6).unwrap_err()),
            "Supply is required and must be a number."
        );
        assert_eq!(
            message(parse_supply("inf", 6).unwrap_err()),
            "Supply is required and must be a number."
        );
        // 1e20 base units overflows u64
        assert_eq!(
            message(parse_supply("100", 18).unwrap_err()),
            "Supply is too large for the chosen decimals."
        );
    }

    #[test]
    fn test_supply_precision_must_fit_decimals() {
        assert_eq!(parse_supply("1234.567", 3).unwrap(), 1234.567);
        assert_eq!(
            message(parse_supply("1.55", 1).unwrap_err()),
            "Supply has more precision than the chosen decimals."
        );
        // Would otherwise round down to exactly one token
        assert_eq!(
            message(parse_supply("1.0001", 1).unwrap_err()),
            "Supply has more precision than the chosen decimals."
        );
    }

    #[test]
    fn test_optional_fields_become_absent() {
        assert_eq!(parse_optional_text("   "), None);
        assert_eq!(parse_optional_text(" hello "), Some("hello".to_string()));
        assert_eq!(parse_optional_url("", "Website").unwrap(), None);
        assert_eq!(
            parse_optional_url("https://foo.xyz", "Website").unwrap(),
            Some("https://foo.xyz".to_string())
        );
        assert_eq!(
            message(parse_optional_url("ftp://foo.xyz", "Website").unwrap_err()),
            "Website must be an http(s) URL."
        );
        assert!(parse_optional_url("foo.xyz", "Image URL").is_err());
    }
}
