use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gender – the sex code published alongside every name
// ---------------------------------------------------------------------------

/// Sex code as it appears in the SSA files (`M` / `F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn code(self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Gender selector of the side panel. `All` disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenderFilter {
    #[default]
    All,
    Only(Gender),
}

impl GenderFilter {
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Only(g) => g == gender,
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderFilter::All => f.write_str("All"),
            GenderFilter::Only(g) => write!(f, "{g}"),
        }
    }
}

// ---------------------------------------------------------------------------
// NameRecord – one row of a yobYYYY.txt file
// ---------------------------------------------------------------------------

/// Births for one (name, gender) combination in one year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Count")]
    pub count: u32,
    #[serde(rename = "Year")]
    pub year: u16,
}

impl NameRecord {
    pub fn new(name: impl Into<String>, gender: Gender, count: u32, year: u16) -> Self {
        Self {
            name: name.into(),
            gender,
            count,
            year,
        }
    }
}

/// Births for one (name, gender) pair in a year, summed over duplicate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameTotal {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Year")]
    pub year: u16,
}

// ---------------------------------------------------------------------------
// NamesDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Immutable collection of name records plus a content fingerprint.
///
/// The fingerprint is computed once at construction and is what `Hash`
/// feeds to a hasher, so a multi-million row dataset can key a memo cache
/// without being rehashed on every lookup.
#[derive(Debug, Clone)]
pub struct NamesDataset {
    records: Vec<NameRecord>,
    fingerprint: u64,
}

impl NamesDataset {
    pub fn new(records: Vec<NameRecord>) -> Self {
        let mut hasher = DefaultHasher::new();
        records.hash(&mut hasher);
        let fingerprint = hasher.finish();
        Self {
            records,
            fingerprint,
        }
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameRecord> {
        self.records().iter()
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last year present, `None` for an empty dataset.
    pub fn year_range(&self) -> Option<(u16, u16)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

impl Hash for NamesDataset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl PartialEq for NamesDataset {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint && self.records == other.records
    }
}

impl Eq for NamesDataset {}

impl FromIterator<NameRecord> for NamesDataset {
    fn from_iter<I: IntoIterator<Item = NameRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// DataSource – where the archive comes from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Archive downloaded over HTTP.
    Remote(String),
    /// `names.zip` already on disk.
    Local(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{url}"),
            DataSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<NameRecord> {
        vec![
            NameRecord::new("Ava", Gender::Female, 100, 2000),
            NameRecord::new("Ava", Gender::Female, 50, 2001),
            NameRecord::new("Zara", Gender::Female, 3, 1999),
        ]
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = NamesDataset::new(sample());
        let b = NamesDataset::new(sample());
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut changed = sample();
        changed[2].count = 4;
        let c = NamesDataset::new(changed);
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn year_range_spans_records() {
        let ds = NamesDataset::new(sample());
        assert_eq!(ds.year_range(), Some((1999, 2001)));
        assert_eq!(NamesDataset::new(Vec::new()).year_range(), None);
    }

    #[test]
    fn gender_filter_admits() {
        assert!(GenderFilter::All.admits(Gender::Male));
        assert!(GenderFilter::Only(Gender::Female).admits(Gender::Female));
        assert!(!GenderFilter::Only(Gender::Female).admits(Gender::Male));
        assert_eq!(GenderFilter::Only(Gender::Male).to_string(), "M");
    }
}
