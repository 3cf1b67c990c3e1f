use std::collections::HashMap;

use super::model::{Gender, NamesDataset};

/// Years seen so far for one (name, gender) pair. Only "one" vs "more than
/// one" matters, so the first year is enough to detect a second one.
enum YearsSeen {
    One(u16),
    Many,
}

/// Records whose (name, gender) pair occurs in exactly one distinct year.
///
/// Dataset order is preserved. Duplicate rows within that single year are
/// all kept.
pub fn one_hit_wonders(dataset: &NamesDataset) -> NamesDataset {
    let mut seen: HashMap<(&str, Gender), YearsSeen> = HashMap::new();

    for record in dataset.iter() {
        seen.entry((record.name.as_str(), record.gender))
            .and_modify(|years| {
                if let YearsSeen::One(year) = *years {
                    if year != record.year {
                        *years = YearsSeen::Many;
                    }
                }
            })
            .or_insert(YearsSeen::One(record.year));
    }

    let subset: NamesDataset = dataset
        .iter()
        .filter(|r| {
            matches!(
                seen.get(&(r.name.as_str(), r.gender)),
                Some(YearsSeen::One(_))
            )
        })
        .cloned()
        .collect();

    log::info!(
        "{} of {} records are one-hit wonders",
        subset.len(),
        dataset.len()
    );
    subset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::NameRecord;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn single_year_names_only() {
        let ds = NamesDataset::new(vec![
            NameRecord::new("Ava", Gender::Female, 100, 2000),
            NameRecord::new("Ava", Gender::Female, 50, 2001),
            NameRecord::new("Zara", Gender::Female, 3, 1999),
        ]);
        let subset = one_hit_wonders(&ds);
        assert_eq!(
            subset.records(),
            &[NameRecord::new("Zara", Gender::Female, 3, 1999)]
        );
    }

    #[test]
    fn gender_is_part_of_the_key() {
        // "Jordan" is a one-hit wonder for boys but not for girls.
        let ds = NamesDataset::new(vec![
            NameRecord::new("Jordan", Gender::Female, 10, 1990),
            NameRecord::new("Jordan", Gender::Female, 12, 1991),
            NameRecord::new("Jordan", Gender::Male, 7, 1991),
        ]);
        let subset = one_hit_wonders(&ds);
        assert_eq!(
            subset.records(),
            &[NameRecord::new("Jordan", Gender::Male, 7, 1991)]
        );
    }

    #[test]
    fn duplicate_rows_in_one_year_stay_one_hit() {
        let ds = NamesDataset::new(vec![
            NameRecord::new("Kai", Gender::Male, 5, 2010),
            NameRecord::new("Kai", Gender::Male, 6, 2010),
        ]);
        assert_eq!(one_hit_wonders(&ds).len(), 2);
    }

    #[test]
    fn empty_dataset() {
        assert!(one_hit_wonders(&NamesDataset::new(Vec::new())).is_empty());
    }

    fn arb_record() -> impl Strategy<Value = NameRecord> {
        (
            prop::sample::select(vec!["Ava", "Zara", "Noah", "Kai", "Liam"]),
            prop::sample::select(Gender::ALL.to_vec()),
            0u32..500,
            1880u16..1890,
        )
            .prop_map(|(name, gender, count, year)| NameRecord::new(name, gender, count, year))
    }

    proptest! {
        #[test]
        fn membership_iff_one_distinct_year(records in prop::collection::vec(arb_record(), 0..60)) {
            let ds = NamesDataset::new(records);
            let subset = one_hit_wonders(&ds);

            let mut years: HashMap<(String, Gender), BTreeSet<u16>> = HashMap::new();
            for r in ds.iter() {
                years.entry((r.name.clone(), r.gender)).or_default().insert(r.year);
            }
            let in_subset: HashSet<(String, Gender)> = subset
                .iter()
                .map(|r| (r.name.clone(), r.gender))
                .collect();

            for (key, distinct) in &years {
                prop_assert_eq!(in_subset.contains(key), distinct.len() == 1);
            }

            // Every row of a qualifying pair is kept.
            let expected = ds
                .iter()
                .filter(|r| years[&(r.name.clone(), r.gender)].len() == 1)
                .count();
            prop_assert_eq!(subset.len(), expected);
        }
    }
}
