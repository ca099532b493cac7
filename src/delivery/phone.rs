//! Destination-number normalization for the SMS transport.

const DEFAULT_COUNTRY_CODE: &str = "1";

/// Combines a raw number and country code into international form.
///
/// A number already starting with `+` is taken as-is. Otherwise the number
/// is reduced to its digits and prefixed with `+` plus the country code,
/// leading zeros stripped.
pub fn format_destination(phone_number: &str, country_code: Option<&str>) -> String {
    if phone_number.starts_with('+') {
        return phone_number.to_owned();
    }

    let digits: String = phone_number.chars().filter(char::is_ascii_digit).collect();

    let country_code = country_code
        .filter(|cc| !cc.is_empty())
        .unwrap_or(DEFAULT_COUNTRY_CODE);
    let country_code = country_code
        .trim_start_matches('+')
        .trim_start_matches('0');

    format!("+{country_code}{digits}")
}

/// The SMS transport is a trial account permanently restricted to US and
/// Canada destinations.
pub fn is_supported_destination(destination: &str) -> bool {
    destination.starts_with("+1")
}
