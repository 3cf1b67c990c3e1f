//! Writes a synthetic `names.zip` in the SSA layout for offline use
//! (File → Open archive… in the dashboard).

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const FIRST_YEAR: u16 = 1880;
const LAST_YEAR: u16 = 2023;

/// (name, sex, peak year, peak births, spread in years)
const NAMES: &[(&str, &str, f64, f64, f64)] = &[
    ("Mary", "F", 1920.0, 70_000.0, 35.0),
    ("Linda", "F", 1948.0, 99_000.0, 8.0),
    ("Jennifer", "F", 1972.0, 63_000.0, 9.0),
    ("Ava", "F", 2008.0, 20_000.0, 10.0),
    ("Emma", "F", 2012.0, 21_000.0, 14.0),
    ("John", "M", 1915.0, 88_000.0, 30.0),
    ("Michael", "M", 1965.0, 92_000.0, 15.0),
    ("Noah", "M", 2012.0, 19_000.0, 8.0),
    ("Liam", "M", 2018.0, 20_000.0, 7.0),
    ("Jordan", "M", 1993.0, 21_000.0, 8.0),
    ("Jordan", "F", 1996.0, 4_500.0, 5.0),
];

/// Names that show up in exactly one year.
const ONE_HIT: &[(&str, &str, u16, u32)] = &[
    ("Zara", "F", 1999, 3),
    ("Quorra", "F", 2011, 7),
    ("Zephyrin", "M", 1931, 5),
    ("Khaleesi", "F", 2012, 146),
    ("Bowie", "M", 2016, 12),
];

/// splitmix64, deterministic so every run writes the same archive.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1).
    fn jitter(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 52) as f64 - 1.0
    }
}

/// Births for a bell-shaped popularity curve with ±10 % noise.
fn births(year: u16, peak: f64, height: f64, spread: f64, rng: &mut Rng) -> u32 {
    let d = (f64::from(year) - peak) / spread;
    let base = height * (-0.5 * d * d).exp();
    (base * (1.0 + 0.1 * rng.jitter())).round().max(0.0) as u32
}

fn year_file(year: u16, rng: &mut Rng) -> String {
    let mut rows: Vec<(&str, &str, u32)> = NAMES
        .iter()
        .map(|&(name, sex, peak, height, spread)| (name, sex, births(year, peak, height, spread, rng)))
        // The SSA files omit names with fewer than 5 births.
        .filter(|&(_, _, count)| count >= 5)
        .collect();
    rows.extend(
        ONE_HIT
            .iter()
            .filter(|&&(_, _, y, _)| y == year)
            .map(|&(name, sex, _, count)| (name, sex, count)),
    );
    // SSA order: girls first, then by count descending.
    rows.sort_by(|a, b| a.1.cmp(b.1).then(b.2.cmp(&a.2)));

    rows.iter()
        .map(|(name, sex, count)| format!("{name},{sex},{count}\r\n"))
        .collect()
}

fn main() -> Result<()> {
    let output_path = "names.zip";
    let file = File::create(output_path).context("creating names.zip")?;
    let mut zip = ZipWriter::new(file);
    let mut rng = Rng(42);

    zip.start_file("NationalReadMe.pdf", SimpleFileOptions::default())?;
    zip.write_all(b"Synthetic national names sample. Not SSA data.\n")?;

    let mut rows = 0usize;
    for year in FIRST_YEAR..=LAST_YEAR {
        let contents = year_file(year, &mut rng);
        rows += contents.lines().count();
        zip.start_file(format!("yob{year}.txt"), SimpleFileOptions::default())?;
        zip.write_all(contents.as_bytes())?;
    }
    zip.finish().context("finishing names.zip")?;

    println!(
        "Wrote {rows} rows for {} years to {output_path}",
        LAST_YEAR - FIRST_YEAR + 1
    );
    Ok(())
}
