//! Zone key extraction from source file names
//!
//! A file named "...제3공구...상세.xlsb" belongs to zone "3공구"; files without
//! the ordinal-zone marker all fall into the "기타" bucket.

use regex::Regex;
use std::sync::OnceLock;

/// Fallback key for files without a zone marker
pub const FALLBACK_ZONE: &str = "기타";

fn zone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"제(\d+)공구").expect("valid zone pattern"))
}

/// Derive the zone key for a file name. Always returns a value.
pub fn zone_for_file(file_name: &str) -> String {
    match zone_pattern().captures(file_name) {
        Some(caps) => format!("{}공구", &caps[1]),
        None => FALLBACK_ZONE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_from_marker() {
        assert_eq!(zone_for_file("OO고속도로 제3공구 입찰결과 상세.xlsb"), "3공구");
        assert_eq!(zone_for_file("제12공구.xlsb"), "12공구");
    }

    #[test]
    fn test_first_marker_wins() {
        assert_eq!(zone_for_file("제1공구_제2공구_비교.xlsb"), "1공구");
    }

    #[test]
    fn test_fallback_without_marker() {
        assert_eq!(zone_for_file("입찰결과 요약.xlsb"), FALLBACK_ZONE);
        assert_eq!(zone_for_file("제공구.xlsb"), FALLBACK_ZONE); // no digits
        assert_eq!(zone_for_file(""), FALLBACK_ZONE);
    }
}
