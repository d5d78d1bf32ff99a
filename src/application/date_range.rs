//! Date range normalization for date-bounded queries
//!
//! Either bound may be omitted: the given bound then closes a rolling
//! one-year window that ends on it. Reversed bounds are swapped.

use chrono::{Months, NaiveDate};

use crate::domain::{DateRange, DomainError, DomainResult};

const ROLLING_WINDOW: Months = Months::new(12);

pub struct DateRangeNormalizer;

impl DateRangeNormalizer {
    pub fn normalize(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DomainResult<DateRange> {
        let (start, end) = match (start, end) {
            (None, None) => {
                return Err(DomainError::InvalidArgument(
                    "at least one date must be given".into(),
                ))
            }
            (Some(start), None) => (one_year_before(start)?, start),
            (None, Some(end)) => (one_year_before(end)?, end),
            (Some(start), Some(end)) => (start, end),
        };

        if end < start {
            Ok(DateRange { start: end, end: start })
        } else {
            Ok(DateRange { start, end })
        }
    }
}

fn one_year_before(day: NaiveDate) -> DomainResult<NaiveDate> {
    day.checked_sub_months(ROLLING_WINDOW)
        .ok_or_else(|| DomainError::InvalidArgument(format!("date {} is out of range", day)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn both_absent_is_rejected() {
        assert!(matches!(
            DateRangeNormalizer::normalize(None, None),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_end_rolls_back_one_year() {
        let range = DateRangeNormalizer::normalize(Some(d(2024, 6, 15)), None).unwrap();
        assert_eq!(range, DateRange { start: d(2023, 6, 15), end: d(2024, 6, 15) });
    }

    #[test]
    fn missing_start_rolls_back_one_year() {
        let range = DateRangeNormalizer::normalize(None, Some(d(2024, 1, 1))).unwrap();
        assert_eq!(range, DateRange { start: d(2023, 1, 1), end: d(2024, 1, 1) });
    }

    #[test]
    fn ordered_bounds_are_kept() {
        let range = DateRangeNormalizer::normalize(Some(d(2024, 1, 1)), Some(d(2024, 2, 1))).unwrap();
        assert_eq!(range, DateRange { start: d(2024, 1, 1), end: d(2024, 2, 1) });
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let range = DateRangeNormalizer::normalize(Some(d(2024, 2, 1)), Some(d(2024, 1, 1))).unwrap();
        assert_eq!(range, DateRange { start: d(2024, 1, 1), end: d(2024, 2, 1) });
    }

    #[test]
    fn equal_bounds_give_a_single_day() {
        let range = DateRangeNormalizer::normalize(Some(d(2024, 1, 1)), Some(d(2024, 1, 1))).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(!range.contains(d(2024, 1, 2)));
    }

    #[test]
    fn leap_day_rolls_back_to_end_of_february() {
        let range = DateRangeNormalizer::normalize(Some(d(2024, 2, 29)), None).unwrap();
        assert_eq!(range.start, d(2023, 2, 28));
    }

    #[test]
    fn normalized_range_is_always_ordered() {
        let days = [d(2020, 5, 1), d(2022, 12, 31), d(2024, 2, 29), d(2019, 1, 1)];
        for &a in &days {
            for &b in &days {
                let range = DateRangeNormalizer::normalize(Some(a), Some(b)).unwrap();
                assert!(range.start <= range.end);
                assert!(range.contains(a) && range.contains(b));
            }
        }
    }
}
