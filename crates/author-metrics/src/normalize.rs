//! Name and country canonicalization.
//!
//! Query inputs and stored fields go through the same functions before any
//! equality or substring comparison.

/// Country spellings folded onto the three-letter code used in the tables.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("china", "chn"),
    ("cn", "chn"),
    ("chn", "chn"),
    ("hong kong", "hkg"),
    ("hk", "hkg"),
    ("hkg", "hkg"),
    ("australia", "aus"),
    ("aus", "aus"),
    ("au", "aus"),
];

/// Normalize a personal name for matching.
///
/// Commas are dropped, whitespace runs collapse to a single space and the
/// result is lowercase.
///
/// ```
/// use author_metrics::normalize::normalize_name;
///
/// assert_eq!(normalize_name("  Doe,   Jane "), "doe jane");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.replace(',', "").split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Normalize a country name or code to the table's country code.
///
/// Unknown inputs pass through trimmed and lowercase.
///
/// ```
/// use author_metrics::normalize::normalize_country;
///
/// assert_eq!(normalize_country("China"), "chn");
/// assert_eq!(normalize_country("USA"), "usa");
/// ```
#[must_use]
pub fn normalize_country(country: &str) -> String {
    let folded = country.trim().to_lowercase();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or(folded)
}

/// The normalized forms a stored "Last, First" name may take for a query.
#[must_use]
pub fn name_variants(first_name: &str, last_name: &str) -> [String; 3] {
    [
        normalize_name(&format!("{first_name} {last_name}")),
        normalize_name(&format!("{last_name} {first_name}")),
        normalize_name(&format!("{last_name}, {first_name}")),
    ]
}

/// Split a stored "Last, First" name into `(first, last)`.
///
/// The last name is the text before the first comma and the first name the
/// segment after it; both are empty when there is no comma.
#[must_use]
pub fn split_full_name(authfull: &str) -> (String, String) {
    let mut parts = authfull.split(',');
    match (parts.next(), parts.next()) {
        (Some(last), Some(first)) => (first.trim().to_string(), last.trim().to_string()),
        _ => (String::new(), String::new()),
    }
}
