use std::collections::{BTreeSet, HashMap};

use super::model::{Gender, GenderFilter, NameRecord, NameTotal, NamesDataset};

// ---------------------------------------------------------------------------
// Filter state: what the side panel currently selects
// ---------------------------------------------------------------------------

/// User selections that drive every chart and table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewFilters {
    /// Exact name to chart over time.
    pub name_query: String,
    pub year: u16,
    pub gender: GenderFilter,
    pub top_n: usize,
}

impl Default for ViewFilters {
    fn default() -> Self {
        Self {
            name_query: String::new(),
            year: 2000,
            gender: GenderFilter::All,
            top_n: 5,
        }
    }
}

/// Everything the two tabs render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Views {
    /// Records of the queried name, all years.
    pub trend: Vec<NameRecord>,
    /// One-hit-wonder records of the selected year.
    pub one_hit_for_year: Vec<NameRecord>,
    /// Highest totals of the selected year, descending.
    pub top_names: Vec<NameTotal>,
    /// Leading records of the selected year, dataset order.
    pub detail: Vec<NameRecord>,
}

// ---------------------------------------------------------------------------
// View computations
// ---------------------------------------------------------------------------

/// Records whose name equals the query exactly. No match is an empty result.
pub fn trend_rows(dataset: &NamesDataset, filters: &ViewFilters) -> Vec<NameRecord> {
    dataset
        .iter()
        .filter(|r| filters.gender.admits(r.gender) && r.name == filters.name_query)
        .cloned()
        .collect()
}

/// One-hit-wonder records for the selected year and gender.
pub fn one_hit_rows_for_year(wonders: &NamesDataset, filters: &ViewFilters) -> Vec<NameRecord> {
    wonders
        .iter()
        .filter(|r| filters.gender.admits(r.gender) && r.year == filters.year)
        .cloned()
        .collect()
}

/// Top `filters.top_n` (name, gender) totals of the selected year.
///
/// Duplicate rows of a pair are summed. Ties keep the order in which the
/// pair first appears in the dataset.
pub fn top_names_for_year(dataset: &NamesDataset, filters: &ViewFilters) -> Vec<NameTotal> {
    let mut position: HashMap<(&str, Gender), usize> = HashMap::new();
    let mut totals: Vec<NameTotal> = Vec::new();

    for r in dataset
        .iter()
        .filter(|r| filters.gender.admits(r.gender) && r.year == filters.year)
    {
        let idx = *position
            .entry((r.name.as_str(), r.gender))
            .or_insert_with(|| {
                totals.push(NameTotal {
                    name: r.name.clone(),
                    gender: r.gender,
                    count: 0,
                    year: r.year,
                });
                totals.len() - 1
            });
        totals[idx].count += u64::from(r.count);
    }

    // `sort_by` is stable.
    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals.truncate(filters.top_n);
    totals
}

/// First `limit` records of the selected year in dataset order.
pub fn detail_rows_for_year(
    dataset: &NamesDataset,
    filters: &ViewFilters,
    limit: usize,
) -> Vec<NameRecord> {
    dataset
        .iter()
        .filter(|r| filters.gender.admits(r.gender) && r.year == filters.year)
        .take(limit)
        .cloned()
        .collect()
}

/// Pure function from (dataset, subset, filters) to everything on screen.
pub fn build_views(
    dataset: &NamesDataset,
    wonders: &NamesDataset,
    filters: &ViewFilters,
    detail_limit: usize,
) -> Views {
    Views {
        trend: trend_rows(dataset, filters),
        one_hit_for_year: one_hit_rows_for_year(wonders, filters),
        top_names: top_names_for_year(dataset, filters),
        detail: detail_rows_for_year(dataset, filters, detail_limit),
    }
}

// ---------------------------------------------------------------------------
// Name suggestions
// ---------------------------------------------------------------------------

/// Sorted distinct names of the dataset.
pub fn unique_names(dataset: &NamesDataset) -> Vec<String> {
    dataset
        .iter()
        .map(|r| r.name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Up to `limit` names containing `query`, ignoring case. Names starting
/// with the query come first.
pub fn suggest_names<'a>(names: &'a [String], query: &str, limit: usize) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut prefix = Vec::new();
    let mut inner = Vec::new();
    for name in names {
        let lower = name.to_lowercase();
        if lower.starts_with(&needle) {
            prefix.push(name.as_str());
        } else if lower.contains(&needle) {
            inner.push(name.as_str());
        }
    }
    prefix.into_iter().chain(inner).take(limit).collect()
}
