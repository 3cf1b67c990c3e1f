use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use serde::Deserialize;
use zip::ZipArchive;

use super::model::{DataSource, Gender, NameRecord, NamesDataset};
use crate::config::DashboardConfig;
use crate::error::LoadError;

/// Byte offset of the year inside an entry name (`yob1880.txt`).
const YEAR_OFFSET: usize = 3;
const YEAR_DIGITS: usize = 4;
/// `Name,Gender,Count`.
const FIELDS_PER_ROW: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the full dataset from either the network or a local archive.
pub fn load(source: &DataSource, config: &DashboardConfig) -> Result<NamesDataset, LoadError> {
    let dataset = match source {
        DataSource::Remote(url) => {
            let bytes = fetch_archive(url, &config.user_agent)?;
            parse_archive(Cursor::new(bytes))?
        }
        DataSource::Local(path) => load_archive_file(path)?,
    };
    if dataset.is_empty() {
        log::warn!("{source} contains yearly files but no records");
    } else {
        log::info!("Loaded {} name records from {source}", dataset.len());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// One blocking GET; the whole body is buffered because the ZIP central
/// directory sits at the end of the archive.
pub fn fetch_archive(url: &str, user_agent: &str) -> Result<Vec<u8>, LoadError> {
    let download_err = |source| LoadError::Download {
        url: url.to_string(),
        source,
    };

    log::info!("Downloading {url}");
    let client = reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(download_err)?;
    let response = client.get(url).send().map_err(download_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().map_err(download_err)?;
    log::debug!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// Open a `names.zip` that is already on disk.
pub fn load_archive_file(path: &Path) -> Result<NamesDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_archive(BufReader::new(file))
}

/// Parse every `yobYYYY.txt` entry of the archive into one dataset.
///
/// Entries not ending in `.txt` (the archive ships a read-me PDF) are
/// skipped. An archive without any yearly file is an error.
pub fn parse_archive<R: Read + Seek>(reader: R) -> Result<NamesDataset, LoadError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut records = Vec::new();
    let mut files = 0usize;

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let file_name = entry.name().to_string();
        if !file_name.ends_with(".txt") {
            log::debug!("Skipping archive entry {file_name}");
            continue;
        }

        let year = year_from_file_name(&file_name)?;
        let rows = parse_year_file(entry, &file_name, year, &mut records)?;
        log::debug!("{file_name}: {rows} rows for {year}");
        files += 1;
    }

    if files == 0 {
        return Err(LoadError::Empty);
    }
    Ok(NamesDataset::new(records))
}

/// `yob1999.txt` → 1999.
pub fn year_from_file_name(file_name: &str) -> Result<u16, LoadError> {
    let bad_name = || LoadError::FileName {
        file: file_name.to_string(),
    };

    let digits = file_name
        .get(YEAR_OFFSET..YEAR_OFFSET + YEAR_DIGITS)
        .ok_or_else(bad_name)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_name());
    }
    match digits.parse() {
        Ok(0) | Err(_) => Err(bad_name()),
        Ok(year) => Ok(year),
    }
}

// ---------------------------------------------------------------------------
// Yearly file
// ---------------------------------------------------------------------------

/// Header-less `Name,Gender,Count` line.
#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    gender: Gender,
    count: u32,
}

/// Parse one yearly file, appending to `out`. Returns the number of rows read.
///
/// Every non-blank line must have exactly three fields.
pub fn parse_year_file<R: Read>(
    reader: R,
    file_name: &str,
    year: u16,
    out: &mut Vec<NameRecord>,
) -> Result<usize, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let row_err = |source| LoadError::Row {
        file: file_name.to_string(),
        source,
    };

    let before = out.len();
    for record in reader.records() {
        let record = record.map_err(row_err)?;
        if record.len() != FIELDS_PER_ROW {
            return Err(LoadError::FieldCount {
                file: file_name.to_string(),
                line: record.position().map_or(0, |pos| pos.line()),
                found: record.len(),
            });
        }
        let row: RawRow = record.deserialize(None).map_err(row_err)?;
        out.push(NameRecord::new(row.name, row.gender, row.count, year));
    }
    Ok(out.len() - before)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{BufRead, Write};
    use std::net::TcpListener;
    use std::thread;
    use zip::write::SimpleFileOptions;

    /// Build an in-memory archive from `(entry name, contents)` pairs.
    pub(crate) fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// Answer one HTTP request on a loopback port with `status` and `body`.
    /// Returns the URL to request.
    fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/names.zip", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut request = std::io::BufReader::new(stream);
            let mut line = String::new();
            while request.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = request.into_inner();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(&body).unwrap();
        });
        url
    }

    #[test]
    fn year_comes_from_file_name() {
        assert_eq!(year_from_file_name("yob1880.txt").unwrap(), 1880);
        assert_eq!(year_from_file_name("yob2023.txt").unwrap(), 2023);
        assert!(matches!(
            year_from_file_name("names.txt"),
            Err(LoadError::FileName { .. })
        ));
        assert!(year_from_file_name("yob.txt").is_err());
        assert!(year_from_file_name("yob+999.txt").is_err());
    }

    #[test]
    fn year_zero_is_not_a_year() {
        assert!(matches!(
            year_from_file_name("yob0000.txt"),
            Err(LoadError::FileName { ref file }) if file == "yob0000.txt"
        ));
        let bytes = zip_bytes(&[("yob0000.txt", "Ava,F,1\n")]);
        assert!(matches!(
            parse_archive(Cursor::new(bytes)),
            Err(LoadError::FileName { .. })
        ));
    }

    #[test]
    fn parses_yearly_entries_and_tags_year() {
        let bytes = zip_bytes(&[
            ("yob1999.txt", "Zara,F,3\nAva,F,40\n"),
            ("yob2000.txt", "Ava,F,100\r\nNoah,M,80\r\n\r\n"),
            ("NationalReadMe.pdf", "%PDF-1.4"),
        ]);
        let ds = parse_archive(Cursor::new(bytes)).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(
            ds.records()[0],
            NameRecord::new("Zara", Gender::Female, 3, 1999)
        );
        assert_eq!(
            ds.records()[3],
            NameRecord::new("Noah", Gender::Male, 80, 2000)
        );
        for record in ds.iter() {
            let expected = if record.name == "Zara" || record.count == 40 {
                1999
            } else {
                2000
            };
            assert_eq!(record.year, expected);
        }
    }

    #[test]
    fn rejects_unknown_gender() {
        let bytes = zip_bytes(&[("yob2000.txt", "Ava,X,100\n")]);
        let err = parse_archive(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, LoadError::Row { ref file, .. } if file == "yob2000.txt"));
    }

    #[test]
    fn rejects_negative_count() {
        let bytes = zip_bytes(&[("yob2000.txt", "Ava,F,-1\n")]);
        assert!(matches!(
            parse_archive(Cursor::new(bytes)),
            Err(LoadError::Row { .. })
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let bytes = zip_bytes(&[("yob2000.txt", "Ava,F,1\nNoah,M\n")]);
        assert!(matches!(
            parse_archive(Cursor::new(bytes)),
            Err(LoadError::FieldCount { line: 2, found: 2, .. })
        ));
    }

    #[test]
    fn rejects_extra_fields() {
        let bytes = zip_bytes(&[("yob2000.txt", "Ava,F,1,junk\nNoah,M,2,junk\n")]);
        let err = parse_archive(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::FieldCount { ref file, line: 1, found: 4 } if file == "yob2000.txt"
        ));

        let mut out = Vec::new();
        let err = parse_year_file("Ava,F,1\nNoah,M,2,\n".as_bytes(), "yob2000.txt", 2000, &mut out)
            .unwrap_err();
        assert!(matches!(err, LoadError::FieldCount { line: 2, found: 4, .. }));
    }

    #[test]
    fn rejects_bad_entry_name() {
        let bytes = zip_bytes(&[("names.txt", "Ava,F,1\n")]);
        assert!(matches!(
            parse_archive(Cursor::new(bytes)),
            Err(LoadError::FileName { .. })
        ));
    }

    #[test]
    fn archive_without_yearly_files_is_empty() {
        let bytes = zip_bytes(&[("NationalReadMe.pdf", "%PDF-1.4")]);
        assert!(matches!(
            parse_archive(Cursor::new(bytes)),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn malformed_archive_is_an_archive_error() {
        let err = parse_archive(Cursor::new(b"definitely not a zip".to_vec())).unwrap_err();
        assert!(matches!(err, LoadError::Archive(_)));
    }

    #[test]
    fn loads_local_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.zip");
        std::fs::write(&path, zip_bytes(&[("yob1880.txt", "Mary,F,7065\nJohn,M,9655\n")]))
            .unwrap();

        let source = DataSource::Local(path);
        let ds = load(&source, &DashboardConfig::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.iter().all(|r| r.year == 1880));
    }

    #[test]
    fn missing_local_archive_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_archive_file(&dir.path().join("absent.zip")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn non_success_status_is_reported() {
        let url = serve_once("404 Not Found", b"gone".to_vec());
        let err = fetch_archive(&url, "names-dashboard-test").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Status { ref url, status: 404 } if url.ends_with("/names.zip")
        ));
    }

    #[test]
    fn loads_remote_archive() {
        let body = zip_bytes(&[
            ("NationalReadMe.pdf", "%PDF-1.4"),
            ("yob2000.txt", "Ava,F,100\r\nNoah,M,80\r\n"),
        ]);
        let url = serve_once("200 OK", body);

        let ds = load(&DataSource::Remote(url), &DashboardConfig::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.records()[1],
            NameRecord::new("Noah", Gender::Male, 80, 2000)
        );
    }

    #[test]
    fn unreachable_host_is_a_download_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/names.zip", listener.local_addr().unwrap());
        drop(listener);

        let err = load(&DataSource::Remote(url), &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Download { .. }));
    }
}
