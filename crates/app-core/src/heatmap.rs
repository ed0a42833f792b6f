//! Study activity heatmap model
//!
//! Daily study counts and the week grid the heatmap is drawn from. Weeks start
//! on Sunday and the grid spans from the start of the week six months before
//! `today` through `today`.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of months covered by the grid
pub const GRID_MONTHS: u32 = 6;

/// Intensity bucket for a day's study count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    /// No study
    None,
    /// One session
    Light,
    /// Two sessions
    Medium,
    /// Three or more sessions
    Full,
}

impl HeatLevel {
    /// Bucket a daily count
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => HeatLevel::None,
            1 => HeatLevel::Light,
            2 => HeatLevel::Medium,
            _ => HeatLevel::Full,
        }
    }

    /// Cell color
    pub fn color(&self) -> &'static str {
        match self {
            HeatLevel::None => "#F5F5F5",
            HeatLevel::Light => "#F0FFE5",
            HeatLevel::Medium => "#C6FF9C",
            HeatLevel::Full => "#87FF30",
        }
    }
}

/// Study sessions per day
///
/// Serializes as a `{"YYYY-MM-DD": count}` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyActivity {
    counts: BTreeMap<NaiveDate, u32>,
}

impl StudyActivity {
    /// Empty activity log
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for a day
    pub fn set(&mut self, date: NaiveDate, count: u32) {
        self.counts.insert(date, count);
    }

    /// Add one session on a day
    pub fn record(&mut self, date: NaiveDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    /// Sessions on a day
    pub fn count(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Days with at least one session
    pub fn total_study_days(&self) -> usize {
        self.counts.values().filter(|&&count| count > 0).count()
    }

    /// Counts for the `days` days ending at `today`, oldest first
    pub fn recent_days(&self, today: NaiveDate, days: u32) -> Vec<u32> {
        (0..days)
            .rev()
            .map(|offset| {
                today
                    .checked_sub_days(Days::new(u64::from(offset)))
                    .map(|date| self.count(date))
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl FromIterator<(NaiveDate, u32)> for StudyActivity {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// One day in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// Day
    pub date: NaiveDate,
    /// Sessions on that day
    pub count: u32,
}

impl HeatmapCell {
    /// Intensity bucket
    pub fn level(&self) -> HeatLevel {
        HeatLevel::from_count(self.count)
    }
}

/// Month label anchored to a week column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// Week column the label sits above
    pub week_index: usize,
    /// Month number (1-12)
    pub month: u32,
}

/// Week columns plus month labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapGrid {
    /// Sunday-first weeks; the last one may be partial
    pub weeks: Vec<Vec<HeatmapCell>>,
    /// Month labels in column order
    pub month_labels: Vec<MonthLabel>,
}

/// Sunday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

impl HeatmapGrid {
    /// Build the grid ending at `today`
    pub fn build(activity: &StudyActivity, today: NaiveDate) -> Self {
        let six_months_ago = today
            .checked_sub_months(Months::new(GRID_MONTHS))
            .unwrap_or(today);
        let start = start_of_week(six_months_ago);

        let days: Vec<HeatmapCell> = start
            .iter_days()
            .take_while(|date| *date <= today)
            .map(|date| HeatmapCell {
                date,
                count: activity.count(date),
            })
            .collect();

        let weeks: Vec<Vec<HeatmapCell>> = days.chunks(7).map(<[HeatmapCell]>::to_vec).collect();
        let month_labels = month_labels(&weeks);

        Self {
            weeks,
            month_labels,
        }
    }
}

/// Label week 0 and every week that introduces a month not yet labelled
fn month_labels(weeks: &[Vec<HeatmapCell>]) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut last: Option<u32> = None;

    for (week_index, week) in weeks.iter().enumerate() {
        let Some(first) = week.first() else {
            continue;
        };

        let label_day = week
            .iter()
            .enumerate()
            .find(|(i, cell)| {
                if *i == 0 {
                    Some(cell.date.month()) != last
                } else {
                    cell.date.month() != week[i - 1].date.month()
                }
            })
            .map(|(_, cell)| cell)
            .unwrap_or(first);

        let month = label_day.date.month();
        if week_index == 0 || Some(month) != last {
            labels.push(MonthLabel { week_index, month });
            last = Some(month);
        }
    }

    labels
}
