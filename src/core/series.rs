use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::types::{DateRange, parse_date};

/// NAV as delivered by the data provider: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNav {
    Number(f64),
    Text(String),
}

impl RawNav {
    pub fn value(&self) -> Option<f64> {
        match self {
            RawNav::Number(v) => Some(*v),
            RawNav::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNavRecord {
    pub date: String,
    #[serde(default)]
    pub nav: Option<RawNav>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavPoint {
    pub date: NaiveDate,
    pub nav: f64,
}

/// Date-ascending NAV history with unique dates and strictly positive NAVs.
///
/// Every simulator takes one of these; the only way to build one is through
/// the normalizing constructors, so the ordering invariant always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NavSeries(Vec<NavPoint>);

impl NavSeries {
    /// Drops records with a missing, unparsable or non-positive NAV or an
    /// unparsable date, then orders by date. Input records are left untouched.
    pub fn normalize<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawNavRecord>,
    {
        Self::from_points(records.into_iter().filter_map(|record| {
            let nav = record.nav.as_ref()?.value()?;
            let date = parse_date(&record.date)?;
            Some(NavPoint { date, nav })
        }))
    }

    /// Keeps the first point seen for any date.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = NavPoint>,
    {
        let mut points: Vec<NavPoint> = points
            .into_iter()
            .filter(|p| p.nav.is_finite() && p.nav > 0.0)
            .collect();
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self(points)
    }

    pub fn points(&self) -> &[NavPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&NavPoint> {
        self.0.first()
    }

    pub fn latest(&self) -> Option<&NavPoint> {
        self.0.last()
    }

    pub fn nav_on(&self, date: NaiveDate) -> Option<f64> {
        self.0
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.0[idx].nav)
    }

    pub fn position_on_or_after(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.0.partition_point(|p| p.date < date);
        (idx < self.0.len()).then_some(idx)
    }

    /// Latest point dated on or before `date`.
    pub fn last_on_or_before(&self, date: NaiveDate) -> Option<&NavPoint> {
        let idx = self.0.partition_point(|p| p.date <= date);
        idx.checked_sub(1).map(|i| &self.0[i])
    }

    pub fn window(&self, range: &DateRange) -> &[NavPoint] {
        let lo = self.0.partition_point(|p| p.date < range.start());
        let hi = self.0.partition_point(|p| p.date <= range.end());
        &self.0[lo..hi.max(lo)]
    }

    pub fn tail(&self, n: usize) -> &[NavPoint] {
        &self.0[self.0.len().saturating_sub(n)..]
    }

    /// Points within one calendar year of the latest NAV date.
    pub fn last_year(&self) -> &[NavPoint] {
        let Some(latest) = self.latest() else {
            return &[];
        };
        let Some(from) = latest.date.checked_sub_months(Months::new(12)) else {
            return &self.0;
        };
        let lo = self.0.partition_point(|p| p.date < from);
        &self.0[lo..]
    }
}

impl FromIterator<NavPoint> for NavSeries {
    fn from_iter<T: IntoIterator<Item = NavPoint>>(iter: T) -> Self {
        Self::from_points(iter)
    }
}
