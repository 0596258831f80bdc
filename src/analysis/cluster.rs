//! Title line clustering.

use std::collections::{BTreeMap, HashSet};

use crate::model::Page;

use super::classify::is_separator;

/// Merges title-sized runs at (nearly) the same vertical position into lines.
#[derive(Debug, Clone, Copy)]
pub struct LineClusterer {
    tolerance: f32,
}

impl LineClusterer {
    /// Create a clusterer merging positions at most `tolerance` apart.
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Title lines built from the runs of `page` with font size `size`.
    ///
    /// Positions are compared at 0.1 precision and swept top to bottom; a
    /// position joins the current cluster when its gap to the previous
    /// position is within the tolerance. Separator-only and repeated lines
    /// are dropped.
    pub fn title_lines(&self, page: &Page, size: u32) -> Vec<String> {
        let mut by_position: BTreeMap<i64, Vec<String>> = BTreeMap::new();

        for line in &page.lines {
            let key = tenths(line.y());
            for span in &line.spans {
                let text = span.text.trim();
                if span.size != size || text.is_empty() {
                    continue;
                }
                by_position
                    .entry(key)
                    .or_default()
                    .push(text.replace('\n', " "));
            }
        }

        self.cluster(by_position)
    }

    fn cluster(&self, by_position: BTreeMap<i64, Vec<String>>) -> Vec<String> {
        let max_gap = tenths(self.tolerance);
        let mut clusters: Vec<Vec<String>> = Vec::new();
        let mut last: Option<i64> = None;

        for (position, texts) in by_position {
            let within = last.is_some_and(|prev| position - prev <= max_gap);
            last = Some(position);
            if within {
                if let Some(cluster) = clusters.last_mut() {
                    cluster.extend(texts);
                    continue;
                }
            }
            clusters.push(texts);
        }

        let mut seen = HashSet::new();
        clusters
            .into_iter()
            .map(|texts| texts.join(" ").trim().to_string())
            .filter(|line| !line.is_empty() && !is_separator(line))
            .filter(|line| seen.insert(line.clone()))
            .collect()
    }
}

fn tenths(value: f32) -> i64 {
    (value * 10.0).round() as i64
}
