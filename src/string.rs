use std::borrow::Cow;

/// Returns true for ASCII and full-width decimal digits.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

/// Returns true for the decimal separators accepted inside numeric literals.
pub fn is_decimal_point(c: char) -> bool {
    matches!(c, '.' | '．')
}

/// Maps the full-width forms of digits, signs and the decimal point onto their
/// ASCII counterparts so the result can be handed to `str::parse::<f64>`.
pub fn normalize_width(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| to_half_width(c) == c) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().map(to_half_width).collect())
    }
}

fn to_half_width(c: char) -> char {
    match c {
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10).unwrap_or(c),
        '．' => '.',
        '－' => '-',
        '＋' => '+',
        c => c,
    }
}

/// Strips exactly one leading and one trailing character.
///
/// Works on characters rather than bytes, so multi-byte quote markers such as
/// `「」` are removed whole. Returns `None` when fewer than two characters exist.
pub fn strip_quotes(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_full_width_digits() {
        assert_eq!(normalize_width("１０．５"), "10.5");
        assert!(matches!(normalize_width("42"), Cow::Borrowed(_)));
    }

    #[test]
    fn strips_multi_byte_quotes() {
        assert_eq!(strip_quotes("「こんにちは」"), Some("こんにちは"));
        assert_eq!(strip_quotes("「」"), Some(""));
        assert_eq!(strip_quotes("「"), None);
    }
}
