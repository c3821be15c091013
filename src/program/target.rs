//! Target rep string parsing ("8-10", "30-45 sec", "AMRAP", "8-10/leg")

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TargetKind {
    /// `8-10`, optionally `8-10/leg`
    RepRange,
    /// `30-45 sec`
    ValueRangeUnit,
    /// As many reps as possible
    Amrap,
    /// Anything else; the raw text is kept as-is
    Unknown,
}

/// Parsed view of a target string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub kind: TargetKind,
    pub low: i32,
    pub high: i32,
    /// Suffix word without its separator ("leg", "sec"); may be empty
    pub unit: String,
    pub raw: String,
}

impl TargetSpec {
    /// Parse a target string. Never fails: unrecognized input is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        if text.eq_ignore_ascii_case("AMRAP") {
            return Self::other(TargetKind::Amrap, raw);
        }

        match parse_range(text) {
            Some((low, high, rest)) => {
                if rest.is_empty() {
                    Self::range(TargetKind::RepRange, low, high, "", raw)
                } else if let Some(word) = rest.strip_prefix('/') {
                    if is_word(word) {
                        Self::range(TargetKind::RepRange, low, high, word, raw)
                    } else {
                        Self::other(TargetKind::Unknown, raw)
                    }
                } else if rest.starts_with(char::is_whitespace) && is_unit_token(rest.trim_start()) {
                    Self::range(TargetKind::ValueRangeUnit, low, high, rest.trim_start(), raw)
                } else {
                    Self::other(TargetKind::Unknown, raw)
                }
            }
            None => Self::other(TargetKind::Unknown, raw),
        }
    }

    fn range(kind: TargetKind, low: i32, high: i32, unit: &str, raw: &str) -> Self {
        Self {
            kind,
            low,
            high,
            unit: unit.to_string(),
            raw: raw.to_string(),
        }
    }

    fn other(kind: TargetKind, raw: &str) -> Self {
        Self {
            kind,
            low: 0,
            high: 0,
            unit: String::new(),
            raw: raw.to_string(),
        }
    }

    /// True for kinds that carry a numeric low/high
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, TargetKind::RepRange | TargetKind::ValueRangeUnit)
    }

    pub fn average(&self) -> f64 {
        (f64::from(self.low) + f64::from(self.high)) / 2.0
    }

    /// Suffix as written after the range: "/leg", " sec" or ""
    pub fn suffix(&self) -> String {
        match self.kind {
            TargetKind::RepRange if !self.unit.is_empty() => format!("/{}", self.unit),
            TargetKind::ValueRangeUnit => format!(" {}", self.unit),
            _ => String::new(),
        }
    }

    /// Same kind and unit with a new range, re-rendered
    pub fn with_range(&self, low: i32, high: i32) -> Self {
        let mut spec = self.clone();
        spec.low = low;
        spec.high = high;
        spec.raw = spec.render();
        spec
    }

    /// Render back to a target string. Non-numeric kinds keep their raw text.
    pub fn render(&self) -> String {
        if self.is_numeric() {
            format!("{}-{}{}", self.low, self.high, self.suffix())
        } else {
            self.raw.clone()
        }
    }
}

/// `<low>-<high>` prefix; returns the remainder. Requires 1 <= low <= high.
fn parse_range(text: &str) -> Option<(i32, i32, &str)> {
    let (low_str, rest) = text.split_once('-')?;
    let high_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (high_str, rest) = rest.split_at(high_len);

    let low = parse_digits(low_str)?;
    let high = parse_digits(high_str)?;
    if low < 1 || high < low {
        return None;
    }
    Some((low, high, rest))
}

fn parse_digits(s: &str) -> Option<i32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn is_unit_token(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AMRAP")]
    #[case("amrap")]
    #[case("  Amrap ")]
    fn test_amrap_any_case(#[case] raw: &str) {
        assert_eq!(TargetSpec::parse(raw).kind, TargetKind::Amrap);
    }

    #[test]
    fn test_plain_rep_range() {
        let spec = TargetSpec::parse("8-10");
        assert_eq!(spec.kind, TargetKind::RepRange);
        assert_eq!((spec.low, spec.high), (8, 10));
        assert_eq!(spec.unit, "");
        assert_eq!(spec.render(), "8-10");
    }

    #[test]
    fn test_rep_range_with_per_side_suffix() {
        let spec = TargetSpec::parse("8-10/leg");
        assert_eq!(spec.kind, TargetKind::RepRange);
        assert_eq!(spec.unit, "leg");
        assert_eq!(spec.with_range(6, 8).render(), "6-8/leg");
    }

    #[test]
    fn test_value_range_with_unit() {
        let spec = TargetSpec::parse("30-45 sec");
        assert_eq!(spec.kind, TargetKind::ValueRangeUnit);
        assert_eq!((spec.low, spec.high), (30, 45));
        assert_eq!(spec.unit, "sec");
        assert_eq!(spec.with_range(38, 56).render(), "38-56 sec");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("to failure")]
    #[case("10")]
    #[case("8-")]
    #[case("-10")]
    #[case("10-8")]
    #[case("0-5")]
    #[case("8-10/")]
    #[case("8-10 sec extra")]
    #[case("8-10sec")]
    #[case("a-b")]
    fn test_malformed_is_unknown(#[case] raw: &str) {
        let spec = TargetSpec::parse(raw);
        assert_eq!(spec.kind, TargetKind::Unknown);
        assert_eq!(spec.raw, raw);
        assert_eq!(spec.render(), raw);
    }

    #[test]
    fn test_average() {
        assert_eq!(TargetSpec::parse("8-11").average(), 9.5);
    }

    #[test]
    fn test_average_of_widest_range() {
        let spec = TargetSpec::parse("1-2147483647");
        assert_eq!(spec.kind, TargetKind::RepRange);
        assert_eq!(spec.average(), 1_073_741_824.0);
        assert_eq!(TargetSpec::parse("2147483647-2147483647").average(), 2_147_483_647.0);
    }

    #[test]
    fn test_out_of_range_number_is_unknown() {
        assert_eq!(TargetSpec::parse("1-2147483648").kind, TargetKind::Unknown);
    }

    #[test]
    fn test_amrap_renders_raw() {
        assert_eq!(TargetSpec::parse("AMRAP").render(), "AMRAP");
    }
}
