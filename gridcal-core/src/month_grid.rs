//! Month grid date ranges.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// First day of the week in the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Days between the start of the week and `date`'s weekday (0..=6).
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        let days = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        i64::from(days)
    }

    /// The seven weekdays in grid column order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut days = [self.weekday(); 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// All dates shown for `reference`'s month: from the week start on or before
/// the 1st through the week end on or after the last day. The length is a
/// multiple of 7 except for the first and last months chrono can represent.
pub fn month_grid(reference: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let first = first_of_month(reference);
    let last = last_of_month(reference);

    let start = first
        .checked_sub_days(Days::new(week_start.offset_of(first) as u64))
        .unwrap_or(NaiveDate::MIN);
    let end = last
        .checked_add_days(Days::new((6 - week_start.offset_of(last)) as u64))
        .unwrap_or(NaiveDate::MAX);

    std::iter::successors(Some(start), |d| d.succ_opt().filter(|next| *next <= end)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn june_2024_sunday_start() {
        // June 1st 2024 is a Saturday, June 30th a Sunday.
        let grid = month_grid(date(2024, 6, 15), WeekStart::Sunday);

        assert_eq!(grid.len(), 42);
        assert_eq!(grid.first(), Some(&date(2024, 5, 26)));
        assert_eq!(grid.last(), Some(&date(2024, 7, 6)));
    }

    #[test]
    fn june_2024_monday_start() {
        let grid = month_grid(date(2024, 6, 15), WeekStart::Monday);

        assert_eq!(grid.len(), 35);
        assert_eq!(grid.first(), Some(&date(2024, 5, 27)));
        assert_eq!(grid.last(), Some(&date(2024, 6, 30)));
    }

    #[test]
    fn february_2015_fits_in_four_weeks() {
        // Feb 1st 2015 is a Sunday and the month has 28 days.
        let grid = month_grid(date(2015, 2, 10), WeekStart::Sunday);

        assert_eq!(grid.len(), 28);
        assert_eq!(grid.first(), Some(&date(2015, 2, 1)));
        assert_eq!(grid.last(), Some(&date(2015, 2, 28)));
    }

    #[test]
    fn grids_are_whole_contiguous_weeks_covering_the_month() {
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            for year in 2020..=2030 {
                for month in 1..=12 {
                    let reference = date(year, month, 1);
                    let grid = month_grid(reference, week_start);

                    assert_eq!(grid.len() % 7, 0);
                    assert_eq!(grid[0].weekday(), week_start.weekday());
                    assert_eq!(grid[grid.len() - 1].weekday(), week_start.weekday().pred());
                    assert!(grid[0] <= first_of_month(reference));
                    assert!(grid[grid.len() - 1] >= last_of_month(reference));
                    assert!(grid.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
                }
            }
        }
    }

    #[test]
    fn grids_at_the_ends_of_the_calendar_are_clamped() {
        let grid = month_grid(NaiveDate::MAX, WeekStart::Sunday);
        assert!(grid.contains(&first_of_month(NaiveDate::MAX)));
        assert_eq!(grid.last(), Some(&NaiveDate::MAX));

        let grid = month_grid(NaiveDate::MIN, WeekStart::Monday);
        assert!(grid.contains(&NaiveDate::MIN));
        assert!(grid.contains(&last_of_month(NaiveDate::MIN)));
    }

    #[test]
    fn last_of_month_handles_leap_years() {
        assert_eq!(last_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(last_of_month(date(2024, 12, 31)), date(2024, 12, 31));
    }

    #[test]
    fn weekdays_follow_week_start() {
        assert_eq!(WeekStart::Sunday.weekdays()[0], Weekday::Sun);
        assert_eq!(WeekStart::Sunday.weekdays()[6], Weekday::Sat);
        assert_eq!(WeekStart::Monday.weekdays()[6], Weekday::Sun);
    }
}
