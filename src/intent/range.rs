use lazy_static::lazy_static;
use regex::Regex;

use crate::models::TimeRange;

lazy_static! {
    // priority order: the longest range is tried first
    static ref RANGE_PATTERNS: Vec<(TimeRange, Regex)> = vec![
        (
            TimeRange::Year,
            Regex::new(r"\b(1\s*y(ears?|rs?)?|one\s+year|365\s*d(ays?)?|12\s*months?|(past|last|this)\s+year|yearly|annual)\b")
                .expect("year pattern"),
        ),
        (
            TimeRange::Quarter,
            Regex::new(r"\b(90\s*d(ays?)?|3\s*months?|three\s+months?|quarter(ly)?)\b").expect("quarter pattern"),
        ),
        (
            TimeRange::Month,
            Regex::new(r"\b(30\s*d(ays?)?|1\s*months?|one\s+month|(past|last|this)\s+month|monthly)\b")
                .expect("month pattern"),
        ),
        (
            TimeRange::Week,
            Regex::new(r"\b(7\s*d(ays?)?|1\s*w(eeks?|k)?|one\s+week|(past|last|this)\s+week|weekly)\b")
                .expect("week pattern"),
        ),
        (
            TimeRange::Day,
            Regex::new(r"\b(24\s*h(ours?|rs?)?|1\s*d(ays?)?|one\s+day|today|daily|(past|last)\s+day)\b")
                .expect("day pattern"),
        ),
    ];
}

pub fn detect_range(text: &str) -> Option<TimeRange> {
    RANGE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(range, _)| *range)
}
