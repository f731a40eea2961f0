/// Best guess at the parts of a free-text location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub neighborhood: Option<String>,
}

/// Split "City, ST", "City, ST 33101", "City, ST, 33101", "33101" or
/// "Brickell, Miami, FL".
///
/// Bare text without a comma is taken as a city. A zip in its own trailing
/// part is set aside before the rest is read. Returns `None` for blank input.
pub fn parse_location_text(text: &str) -> Option<ParsedLocation> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if is_zip(text) {
        return Some(ParsedLocation {
            zip: Some(text.to_string()),
            ..Default::default()
        });
    }

    let mut parts: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let trailing_zip = if parts.len() > 1 && is_zip(parts[parts.len() - 1]) {
        parts.pop().map(str::to_string)
    } else {
        None
    };

    let mut parsed = ParsedLocation::default();
    match parts.as_slice() {
        [] => return None,
        [city] => parsed.city = Some(city.to_string()),
        [city, rest] => {
            parsed.city = Some(city.to_string());
            let (state, zip) = split_state_zip(rest);
            parsed.state = state;
            parsed.zip = zip;
        }
        [neighborhood, .., last] => {
            parsed.neighborhood = Some(neighborhood.to_string());
            let (state, zip) = split_state_zip(last);
            parsed.state = state;
            parsed.zip = zip;
        }
    }
    parsed.zip = trailing_zip.or(parsed.zip);

    Some(parsed)
}

/// Trim and upper-case two-letter state codes
pub fn normalize_state(state: &str) -> Option<String> {
    let state = state.trim();
    if state.is_empty() {
        None
    } else if state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(state.to_ascii_uppercase())
    } else {
        Some(state.to_string())
    }
}

/// "FL", "FL 33101" or just "33101"
fn split_state_zip(text: &str) -> (Option<String>, Option<String>) {
    let mut state = Vec::new();
    let mut zip = None;

    for token in text.split_whitespace() {
        if is_zip(token) {
            zip = Some(token.to_string());
        } else {
            state.push(token);
        }
    }

    (normalize_state(&state.join(" ")), zip)
}

/// Five digits, optionally followed by "-" and four digits
fn is_zip(text: &str) -> bool {
    let (base, plus4) = match text.split_once('-') {
        Some((base, plus4)) => (base, Some(plus4)),
        None => (text, None),
    };

    let digits = |s: &str, n: usize| s.len() == n && s.chars().all(|c| c.is_ascii_digit());
    digits(base, 5) && plus4.map_or(true, |p| digits(p, 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_and_state() {
        let parsed = parse_location_text("Miami, fl").unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Miami"));
        assert_eq!(parsed.state.as_deref(), Some("FL"));
        assert_eq!(parsed.zip, None);
    }

    #[test]
    fn city_state_and_zip() {
        let parsed = parse_location_text("Coral Gables, FL 33134").unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Coral Gables"));
        assert_eq!(parsed.state.as_deref(), Some("FL"));
        assert_eq!(parsed.zip.as_deref(), Some("33134"));
    }

    #[test]
    fn bare_zip_and_zip_plus_four() {
        assert_eq!(
            parse_location_text("33101").unwrap().zip.as_deref(),
            Some("33101")
        );
        assert_eq!(
            parse_location_text(" 33101-1234 ").unwrap().zip.as_deref(),
            Some("33101-1234")
        );
        assert_eq!(parse_location_text("3310").unwrap().city.as_deref(), Some("3310"));
    }

    #[test]
    fn neighborhood_city_state() {
        let parsed = parse_location_text("Brickell, Miami, FL").unwrap();
        assert_eq!(parsed.neighborhood.as_deref(), Some("Brickell"));
        assert_eq!(parsed.state.as_deref(), Some("FL"));
        assert_eq!(parsed.city, None);
    }

    #[test]
    fn zip_in_its_own_part() {
        let parsed = parse_location_text("Miami, FL, 33101").unwrap();
        assert_eq!(
            parsed,
            ParsedLocation {
                city: Some("Miami".to_string()),
                state: Some("FL".to_string()),
                zip: Some("33101".to_string()),
                neighborhood: None,
            }
        );

        let parsed = parse_location_text("Miami, 33101").unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Miami"));
        assert_eq!(parsed.zip.as_deref(), Some("33101"));
    }

    #[test]
    fn neighborhood_city_state_zip() {
        let parsed = parse_location_text("Brickell, Miami, FL, 33131").unwrap();
        assert_eq!(parsed.neighborhood.as_deref(), Some("Brickell"));
        assert_eq!(parsed.state.as_deref(), Some("FL"));
        assert_eq!(parsed.zip.as_deref(), Some("33131"));
        assert_eq!(parsed.city, None);
    }

    #[test]
    fn bare_text_is_a_city() {
        let parsed = parse_location_text("  Fort Lauderdale ").unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Fort Lauderdale"));
        assert_eq!(parsed.state, None);
    }

    #[test]
    fn blank_and_comma_only_are_none() {
        assert_eq!(parse_location_text("   "), None);
        assert_eq!(parse_location_text(" , ,"), None);
    }

    #[test]
    fn long_state_names_are_kept() {
        assert_eq!(normalize_state(" Florida "), Some("Florida".to_string()));
        assert_eq!(normalize_state("ny"), Some("NY".to_string()));
        assert_eq!(normalize_state(""), None);
    }
}
