//! Unit spelling helpers for edit input
//!
//! Loaded data is compared verbatim and never passes through these helpers.
//! They only tidy values typed into the edit form.

/// Canonical spelling for a unit, matched case-insensitively
///
/// Unrecognised units are returned trimmed but otherwise unchanged.
pub fn normalize_unit(raw: &str) -> String {
    let trimmed = raw.trim();
    let canonical = match trimmed.to_lowercase().as_str() {
        "pf" => "pF",
        "nf" => "nF",
        "uf" | "µf" | "μf" => "uF",
        "ohm" | "ohms" | "r" => "Ohms",
        "ph" => "pH",
        "nh" => "nH",
        "uh" | "µh" | "μh" => "uH",
        _ => return trimmed.to_string(),
    };
    canonical.to_string()
}

/// Split combined value text such as `"100nF"` or `"4.7 k"` into value and unit
///
/// The numeric prefix (digits with at most one decimal point) becomes the
/// value; an alphabetic remainder becomes the unit after [`normalize_unit`].
/// Text that does not have that shape keeps its digits and dots as the value
/// and everything else as the unit.
pub fn split_value_unit(raw: &str) -> (String, String) {
    let text = raw.trim();
    if text.is_empty() {
        return (String::new(), String::new());
    }

    let mut seen_dot = false;
    let numeric_len = text
        .char_indices()
        .take_while(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                c.is_ascii_digit()
            }
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    let (number, rest) = text.split_at(numeric_len);
    let rest = rest.trim();
    let has_digit = number.chars().any(|c| c.is_ascii_digit());
    if has_digit && rest.chars().all(char::is_alphabetic) {
        return (number.to_string(), normalize_unit(rest));
    }

    let value: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let unit = if value.is_empty() {
        text.to_string()
    } else {
        text.replacen(&value, "", 1).trim().to_string()
    };
    (value, normalize_unit(&unit))
}
