//! Country dialling codes and mobile number checks shared by the auth and profile forms.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub label: &'static str,
    pub digits: usize,
}

pub const COUNTRIES: [Country; 10] = [
    Country { code: "+91", label: "India", digits: 10 },
    Country { code: "+1", label: "USA", digits: 10 },
    Country { code: "+44", label: "UK", digits: 10 },
    Country { code: "+61", label: "Australia", digits: 9 },
    Country { code: "+81", label: "Japan", digits: 10 },
    Country { code: "+49", label: "Germany", digits: 11 },
    Country { code: "+86", label: "China", digits: 11 },
    Country { code: "+971", label: "UAE", digits: 9 },
    Country { code: "+7", label: "Russia", digits: 10 },
    Country { code: "+33", label: "France", digits: 9 },
];

pub const DEFAULT_COUNTRY: Country = COUNTRIES[0];

pub fn country(code: &str) -> Option<Country> {
    COUNTRIES.iter().copied().find(|c| c.code == code)
}

/// Expected digit count for a dialling code; unknown codes expect 10.
pub fn digits_for(code: &str) -> usize {
    country(code).map(|c| c.digits).unwrap_or(10)
}

pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_mobile(code: &str, number: &str) -> bool {
    digits_only(number).len() == digits_for(code)
}

/// Dropdown label, e.g. "India (+91)".
pub fn option_label(c: &Country) -> String {
    format!("{} ({})", c.label, c.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_against_country_digit_count() {
        assert!(is_valid_mobile("+91", "98765 43210"));
        assert!(!is_valid_mobile("+91", "987654321"));
        assert!(is_valid_mobile("+61", "412345678"));
        assert!(is_valid_mobile("+49", "15123456789"));
        assert!(is_valid_mobile("+999", "1234567890"));
    }

    #[test]
    fn strips_non_digits() {
        assert_eq!(digits_only("+91 (987) 654-3210"), "919876543210");
    }
}
