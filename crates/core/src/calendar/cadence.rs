//! Schedule cadences and their date offsets.
//!
//! Every day-based cadence advances one day past its nominal period
//! (daily is +2, weekly is +8, ...). Stored schedules depend on these
//! offsets, so they must not be "corrected".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{add_days, add_months};

/// Interval between consecutive installments or recurrences.
///
/// Serialized with the stored tags (`diaria`, `semanal`, `10dias`,
/// `quinzenal`, `20dias`, `mensal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    /// Every day.
    #[serde(rename = "diaria")]
    Daily,
    /// Every week.
    #[serde(rename = "semanal")]
    Weekly,
    /// Every ten days.
    #[serde(rename = "10dias")]
    TenDays,
    /// Every fifteen days.
    #[serde(rename = "quinzenal")]
    Biweekly,
    /// Every twenty days.
    #[serde(rename = "20dias")]
    TwentyDays,
    /// Same day next month, clamped to the month's last day.
    #[serde(rename = "mensal")]
    Monthly,
}

impl Cadence {
    /// All cadences, shortest first.
    pub const ALL: [Self; 6] = [
        Self::Daily,
        Self::Weekly,
        Self::TenDays,
        Self::Biweekly,
        Self::TwentyDays,
        Self::Monthly,
    ];

    /// Returns the stored tag for this cadence.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Daily => "diaria",
            Self::Weekly => "semanal",
            Self::TenDays => "10dias",
            Self::Biweekly => "quinzenal",
            Self::TwentyDays => "20dias",
            Self::Monthly => "mensal",
        }
    }

    /// Parses a stored tag. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }

    /// Returns the date one period after `date`.
    #[must_use]
    pub fn next_date(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => add_days(date, 2),
            Self::Weekly => add_days(date, 8),
            Self::TenDays => add_days(date, 11),
            Self::Biweekly => add_days(date, 16),
            Self::TwentyDays => add_days(date, 21),
            Self::Monthly => add_months(date, 1),
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Advances `date` by the cadence named `tag`.
///
/// Unknown tags leave the date unchanged.
#[must_use]
pub fn advance_by_tag(date: NaiveDate, tag: &str) -> NaiveDate {
    Cadence::from_tag(tag).map_or(date, |cadence| cadence.next_date(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case("diaria", d(2024, 3, 3))]
    #[case("semanal", d(2024, 3, 9))]
    #[case("10dias", d(2024, 3, 12))]
    #[case("quinzenal", d(2024, 3, 17))]
    #[case("20dias", d(2024, 3, 22))]
    #[case("mensal", d(2024, 4, 1))]
    #[case("trimestral", d(2024, 3, 1))]
    #[case("", d(2024, 3, 1))]
    fn test_advance_by_tag(#[case] tag: &str, #[case] expected: NaiveDate) {
        assert_eq!(advance_by_tag(d(2024, 3, 1), tag), expected);
    }

    #[test]
    fn test_tags_round_trip() {
        for cadence in Cadence::ALL {
            assert_eq!(Cadence::from_tag(cadence.tag()), Some(cadence));
            let json = serde_json::to_string(&cadence).unwrap();
            assert_eq!(json, format!("\"{}\"", cadence.tag()));
        }
    }

    #[test]
    fn test_monthly_clamps_end_of_month() {
        assert_eq!(Cadence::Monthly.next_date(d(2024, 1, 31)), d(2024, 2, 29));
    }
}
