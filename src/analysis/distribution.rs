use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use serde::Serialize;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Empty when the source column is absent from the dataset
    pub points: Vec<ChartPoint>,
}

impl Chart {
    pub fn new(title: &str, x_label: &str, y_label: &str, points: Vec<ChartPoint>) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            points,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.points.is_empty()
    }
}

impl Display for Chart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        if !self.is_available() {
            return write!(f, "  (not available)");
        }
        let width = self.points.iter().map(|p| p.label.len()).max().unwrap_or(0);
        let mut lines = self.points.iter().peekable();
        while let Some(p) = lines.next() {
            if p.value.fract() == 0.0 {
                write!(f, "  {:<width$}  {}", p.label, p.value)?;
            } else {
                write!(f, "  {:<width$}  {:.3}", p.label, p.value)?;
            }
            if lines.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Counts of integral values, ascending by value.
pub fn counts_by_value<I>(values: I) -> BTreeMap<i64, usize>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut counts = BTreeMap::new();
    for v in values.into_iter().flatten().filter(|v| v.is_finite()) {
        *counts.entry(v.round() as i64).or_insert(0) += 1;
    }
    counts
}

/// Counts over the full `range`, zero-filled, or nothing when no value was seen.
pub fn counts_over_range<I>(values: I, range: std::ops::Range<i64>) -> Vec<(i64, usize)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let counts = counts_by_value(values);
    if counts.is_empty() {
        return Vec::new();
    }
    range
        .map(|k| (k, counts.get(&k).copied().unwrap_or(0)))
        .collect()
}

/// The `n` most frequent keys, most frequent first, ties broken by key.
pub fn top_n<K, I>(values: I, n: usize) -> Vec<(K, usize)>
where
    K: Eq + Hash + Ord,
    I: IntoIterator<Item = Option<K>>,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    for v in values.into_iter().flatten() {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Share of `true` outcomes per key, ascending by key.
pub fn rate_by<K, I>(pairs: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = (Option<K>, Option<bool>)>,
{
    let mut tallies: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for (key, outcome) in pairs {
        if let (Some(k), Some(hit)) = (key, outcome) {
            let t = tallies.entry(k).or_insert((0, 0));
            t.0 += usize::from(hit);
            t.1 += 1;
        }
    }
    tallies
        .into_iter()
        .map(|(k, (hits, n))| (k, hits as f64 / n as f64))
        .collect()
}
