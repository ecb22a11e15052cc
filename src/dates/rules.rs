use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::models::DateValue;

/// Two-digit years always belong to the 1990s
const CENTURY: i32 = 1900;

/// One entry of the ordered date rule table
pub struct DateRule {
    /// Stable rule name, reported by `--explain` and in range errors
    pub name: &'static str,
    /// Anchored pattern matched against the trimmed input
    pub pattern: &'static str,
    /// Builds the date from the pattern's captures
    pub interpret: fn(&Captures) -> DateValue,
}

/// A rule with its pattern compiled
pub struct CompiledRule {
    pub rule: &'static DateRule,
    pub regex: Regex,
}

/// Date rules in priority order; the first match decides
pub const DATE_RULES: &[DateRule] = &[
    DateRule {
        name: "day_month_year",
        pattern: r"^([0-9]{1,2})/([0-9]{1,2})/(9[0-9])$",
        interpret: |c| DateValue::FullDate(short_year(c, 3), num(c, 2), num(c, 1)),
    },
    // Year-first spelling lands on the same (year, month, day) as the
    // day-first rule: `93/5/12` and `12/5/93` are the same date.
    DateRule {
        name: "year_month_day",
        pattern: r"^(9[0-9])/([0-9]{1,2})/([0-9]{1,2})$",
        interpret: |c| DateValue::FullDate(short_year(c, 1), num(c, 2), num(c, 3)),
    },
    DateRule {
        name: "slash_year",
        pattern: r"^/(9[0-9])$",
        interpret: |c| DateValue::Year(short_year(c, 1)),
    },
    DateRule {
        name: "four_digit_year",
        pattern: r"^(199[0-9])$",
        interpret: |c| DateValue::Year(num(c, 1) as i32),
    },
    DateRule {
        name: "day_range",
        pattern: r"^([0-9]{1,2})(?:\s*[,&-]\s*[0-9]{1,2})+/([0-9]{1,2})/(9[0-9])$",
        interpret: |c| DateValue::FullDate(short_year(c, 3), num(c, 2), num(c, 1)),
    },
    DateRule {
        name: "month_day_range",
        pattern: r"^([0-9]{1,2})/([0-9]{1,2})\s*&\s*[0-9]{1,2}/[0-9]{1,2}/(9[0-9])$",
        interpret: |c| DateValue::FullDate(short_year(c, 3), num(c, 2), num(c, 1)),
    },
    DateRule {
        name: "month_year",
        pattern: r"^([0-9]{1,2})/(9[0-9])\??$",
        interpret: |c| DateValue::YearMonth(short_year(c, 2), num(c, 1)),
    },
];

/// The rule table with every pattern compiled
pub fn rules() -> &'static [CompiledRule] {
    static COMPILED: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        DATE_RULES
            .iter()
            .map(|rule| CompiledRule {
                rule,
                regex: Regex::new(rule.pattern).expect("Failed to compile date rule pattern"),
            })
            .collect()
    })
}

// Captures are ASCII digits only; a failed parse yields 0, which range
// validation rejects.
fn num(caps: &Captures, group: usize) -> u32 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn short_year(caps: &Captures, group: usize) -> i32 {
    CENTURY + num(caps, group) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = DATE_RULES.iter().map(|r| r.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DATE_RULES.len());
    }

    #[test]
    fn test_all_patterns_compile_and_are_anchored() {
        assert_eq!(rules().len(), DATE_RULES.len());
        for rule in DATE_RULES {
            assert!(rule.pattern.starts_with('^'), "{}", rule.name);
            assert!(rule.pattern.ends_with('$'), "{}", rule.name);
        }
    }

    #[test]
    fn test_each_rule_matches_its_own_shape() {
        let samples = [
            ("day_month_year", "12/5/93"),
            ("year_month_day", "93/5/12"),
            ("slash_year", "/93"),
            ("four_digit_year", "1992"),
            ("day_range", "19-22/7/93"),
            ("month_day_range", "30/6&1/7/93"),
            ("month_year", "9/93?"),
        ];
        for (name, sample) in samples {
            let rule = rules().iter().find(|r| r.rule.name == name).unwrap();
            assert!(rule.regex.is_match(sample), "{} should match {}", name, sample);
        }
    }
}
