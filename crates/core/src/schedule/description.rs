//! Installment suffix helpers.
//!
//! Installment entries carry a ` (i/K)` suffix in their description.

/// Appends the ` (current/total)` suffix.
#[must_use]
pub fn installment_description(base: &str, current: u32, total: u32) -> String {
    format!("{base} ({current}/{total})")
}

/// Removes one trailing ` (digits/digits)` suffix, if present.
#[must_use]
pub fn strip_installment_suffix(description: &str) -> &str {
    let Some(inner) = description.strip_suffix(')') else {
        return description;
    };
    let Some(open) = inner.rfind('(') else {
        return description;
    };
    let Some((current, total)) = inner[open + 1..].split_once('/') else {
        return description;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(current) || !all_digits(total) {
        return description;
    }
    match inner[..open].chars().next_back() {
        Some(ws) if ws.is_whitespace() => &inner[..open - ws.len_utf8()],
        _ => description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ALUGUEL (1/3)", "ALUGUEL")]
    #[case("ALUGUEL (12/12)", "ALUGUEL")]
    #[case("ALUGUEL  (1/3)", "ALUGUEL ")]
    #[case("ALUGUEL(1/3)", "ALUGUEL(1/3)")]
    #[case("ALUGUEL (a/3)", "ALUGUEL (a/3)")]
    #[case("ALUGUEL (1/)", "ALUGUEL (1/)")]
    #[case("ALUGUEL (1/3) EXTRA", "ALUGUEL (1/3) EXTRA")]
    #[case("CONTA (2/5) (1/2)", "CONTA (2/5)")]
    #[case("", "")]
    fn test_strip_installment_suffix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_installment_suffix(input), expected);
    }

    #[test]
    fn test_installment_description() {
        assert_eq!(installment_description("TV", 2, 10), "TV (2/10)");
    }
}
