/// Parses a quantity token into a numeric amount.
///
/// Accepted forms are plain integers ("2"), decimals ("0.5"), simple
/// fractions ("1/2") and mixed numbers ("1 1/2"). Anything else, including
/// negative amounts and fractions with a zero denominator, yields `None`
/// so that malformed recipe text degrades to an unquantified item instead
/// of aborting the whole parse.
pub fn parse_quantity(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    // Mixed number: whole part, whitespace, fraction part.
    if let Some((whole, rest)) = token.split_once(char::is_whitespace) {
        let whole = parse_plain(whole)?;
        let fraction = parse_fraction(rest.trim())?;
        return Some(whole + fraction);
    }

    if token.contains('/') {
        return parse_fraction(token);
    }

    parse_plain(token)
}

fn parse_plain(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_plain(numerator)?;
    let denominator = parse_plain(denominator)?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Renders an amount for display text. Whole amounts drop the decimal
/// point entirely, everything else is trimmed to at most two decimals.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = quantity.round();
    if (quantity - rounded).abs() < 1e-9 {
        return format!("{}", rounded as i64);
    }
    let rendered = format!("{quantity:.2}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity("12"), Some(12.0));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_quantity("0.5"), Some(0.5));
        assert_eq!(parse_quantity("2.25"), Some(2.25));
    }

    #[test]
    fn test_parse_simple_fraction() {
        assert_eq!(parse_quantity("1/2"), Some(0.5));
        assert_eq!(parse_quantity("3/4"), Some(0.75));
    }

    #[test]
    fn test_parse_mixed_number() {
        assert_eq!(parse_quantity("1 1/2"), Some(1.5));
        assert_eq!(parse_quantity("2 3/4"), Some(2.75));
    }

    #[test]
    fn test_zero_denominator_is_rejected() {
        assert_eq!(parse_quantity("1/0"), None);
        assert_eq!(parse_quantity("3 1/0"), None);
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert_eq!(parse_quantity("two"), None);
        assert_eq!(parse_quantity("a/b"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
    }

    #[test]
    fn test_negative_amounts_are_rejected() {
        assert_eq!(parse_quantity("-3"), None);
        assert_eq!(parse_quantity("-1/2"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_quantity("  2  "), Some(2.0));
        assert_eq!(parse_quantity(" 1 1/2 "), Some(1.5));
    }

    #[test]
    fn test_format_whole_amounts() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.0 + 1.0), "3");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_format_fractional_amounts() {
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.75), "0.75");
        assert_eq!(format_quantity(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_parse_then_format_round_trip() {
        let parsed = parse_quantity("1 1/2").unwrap();
        assert_eq!(format_quantity(parsed), "1.5");
    }
}
