use regex::Regex;

/// Coerce loosely formatted numeric text ("21,500,000", "1.25e3",
/// "1,234 km²") into an integer. Thousands separators, unit labels and
/// stray characters are discarded. Returns None when nothing usable
/// remains; never fails.
pub fn normalize(text: Option<&str>) -> Option<i64> {
    let raw = text?.trim();

    // Keep decimal and scientific notation, drop everything else.
    let allowed = Regex::new(r"[^0-9.eE]").unwrap();
    let cleaned = allowed.replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(v) = cleaned.parse::<f64>() {
        // Non-finite means the exponent overflowed; treat as unparseable.
        if v.is_finite() {
            return Some(v as i64);
        }
    }

    // Fallback: the digits of the original text alone.
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
