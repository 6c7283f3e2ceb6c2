// ABOUTME: Leading quantity reader for ingredient lines
// ABOUTME: Handles integers, decimals, fractions, mixed numbers and unicode vulgar fractions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Unicode vulgar fractions accepted as quantities
const VULGAR_FRACTIONS: [(char, f64); 9] = [
    ('½', 0.5),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Result of reading the numeric prefix of a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadingQuantity<'a> {
    /// Parsed value, `None` when the line has no usable leading number
    pub value: Option<f64>,
    /// Text after the numeric prefix
    pub rest: &'a str,
}

#[derive(Debug, Clone, Copy)]
enum NumberToken {
    Integer(f64),
    Decimal(f64),
    // `None` for a zero denominator
    Fraction(Option<f64>),
}

fn vulgar_value(c: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find_map(|(symbol, value)| (*symbol == c).then_some(*value))
}

fn starts_with_vulgar(s: &str) -> bool {
    s.chars().next().and_then(vulgar_value).is_some()
}

fn take_digits(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

fn read_token(s: &str) -> Option<(NumberToken, &str)> {
    let first = s.chars().next()?;
    if let Some(value) = vulgar_value(first) {
        return Some((NumberToken::Decimal(value), &s[first.len_utf8()..]));
    }

    let (digits, after) = take_digits(s);
    if digits.is_empty() {
        return None;
    }
    let whole: f64 = digits.parse().ok()?;

    if let Some(tail) = after.strip_prefix('.') {
        let (fraction, rest) = take_digits(tail);
        if !fraction.is_empty() {
            let value: f64 = format!("{digits}.{fraction}").parse().ok()?;
            return Some((NumberToken::Decimal(value), rest));
        }
    }

    if let Some(tail) = after.strip_prefix('/') {
        let (denominator, rest) = take_digits(tail);
        if !denominator.is_empty() {
            let denominator: f64 = denominator.parse().ok()?;
            let value = (denominator > 0.0).then(|| whole / denominator);
            return Some((NumberToken::Fraction(value), rest));
        }
    }

    if let Some(c) = after.chars().next() {
        if let Some(value) = vulgar_value(c) {
            return Some((NumberToken::Decimal(whole + value), &after[c.len_utf8()..]));
        }
    }

    Some((NumberToken::Integer(whole), after))
}

/// Read the leading numeric quantity of an ingredient line
///
/// Only a prefix is considered: numbers later in the line are left in `rest`.
/// A mixed number needs whitespace between its whole and fractional parts.
#[must_use]
pub fn split_leading_quantity(line: &str) -> LeadingQuantity<'_> {
    let trimmed = line.trim_start();
    let Some((token, rest)) = read_token(trimmed) else {
        return LeadingQuantity {
            value: None,
            rest: trimmed,
        };
    };

    let value = match token {
        NumberToken::Integer(whole) => {
            let candidate = rest.trim_start();
            let separated = candidate.len() < rest.len();
            match read_token(candidate) {
                Some((NumberToken::Fraction(fraction), after)) if separated => {
                    return LeadingQuantity {
                        value: Some(whole + fraction.unwrap_or(0.0)),
                        rest: after,
                    };
                }
                Some((NumberToken::Decimal(fraction), after))
                    if separated && starts_with_vulgar(candidate) =>
                {
                    return LeadingQuantity {
                        value: Some(whole + fraction),
                        rest: after,
                    };
                }
                _ => Some(whole),
            }
        }
        NumberToken::Decimal(value) => Some(value),
        NumberToken::Fraction(value) => value,
    };

    LeadingQuantity { value, rest }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(line: &str) -> Option<f64> {
        split_leading_quantity(line).value
    }

    #[test]
    fn test_integers_and_decimals() {
        assert_eq!(value_of("2 eggs"), Some(2.0));
        assert_eq!(value_of("0.5 cup milk"), Some(0.5));
        assert_eq!(value_of("200g flour"), Some(200.0));
        assert_eq!(split_leading_quantity("200g flour").rest, "g flour");
    }

    #[test]
    fn test_fractions_and_mixed_numbers() {
        assert_eq!(value_of("1/4 tsp salt"), Some(0.25));
        assert_eq!(value_of("1 1/2 cups flour"), Some(1.5));
        assert_eq!(split_leading_quantity("1 1/2 cups flour").rest, " cups flour");
        assert_eq!(value_of("½ onion"), Some(0.5));
        assert_eq!(value_of("1½ cups stock"), Some(1.5));
        assert_eq!(value_of("2 ½ cups stock"), Some(2.5));
    }

    #[test]
    fn test_missing_and_degenerate_quantities() {
        assert_eq!(value_of("pinch of salt"), None);
        assert_eq!(value_of("salt 2 tsp"), None);
        assert_eq!(value_of("1/0 cup sugar"), None);
        assert_eq!(value_of(""), None);
        assert_eq!(value_of("2 3 eggs"), Some(2.0));
    }
}
