//! CSV export of a generated dataset.
//!
//! Four files with a header row and a fixed column order:
//! `accounts.csv`, `contacts.csv`, `deals.csv` and `activities.csv`.
//! Empty optional values are empty cells.

mod rows;

pub use rows::{AccountRow, ActivityRow, ContactRow, CsvRow, DealRow, timestamp};

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::builders::Dataset;
use crate::error::ExportError;

pub const ACCOUNTS_FILE: &str = "accounts.csv";
pub const CONTACTS_FILE: &str = "contacts.csv";
pub const DEALS_FILE: &str = "deals.csv";
pub const ACTIVITIES_FILE: &str = "activities.csv";

/// Writes a dataset as CSV.
pub struct CsvExporter<'a> {
    dataset: &'a Dataset,
}

impl<'a> CsvExporter<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn write_accounts<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        write_rows(writer, self.dataset.accounts.iter().map(AccountRow::from))
    }

    pub fn write_contacts<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        write_rows(writer, self.dataset.contacts.iter().map(ContactRow::from))
    }

    pub fn write_deals<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        write_rows(writer, self.dataset.deals.iter().map(DealRow::from))
    }

    pub fn write_activities<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        write_rows(writer, self.dataset.activities.iter().map(ActivityRow::from))
    }

    /// Writes all four files into `dir`, creating it if needed.
    ///
    /// Returns the paths written, in pipeline order.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ExportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let open = |name: &str| -> Result<(PathBuf, BufWriter<File>), ExportError> {
            let path = dir.join(name);
            let file = File::create(&path)?;
            Ok((path, BufWriter::new(file)))
        };

        let (accounts, writer) = open(ACCOUNTS_FILE)?;
        self.write_accounts(writer)?;
        let (contacts, writer) = open(CONTACTS_FILE)?;
        self.write_contacts(writer)?;
        let (deals, writer) = open(DEALS_FILE)?;
        self.write_deals(writer)?;
        let (activities, writer) = open(ACTIVITIES_FILE)?;
        self.write_activities(writer)?;

        tracing::info!(dir = %dir.display(), "Wrote CSV files");
        Ok(vec![accounts, contacts, deals, activities])
    }
}

/// Serializes rows with a header. An empty collection still gets its header.
fn write_rows<W, R>(writer: W, rows: impl Iterator<Item = R>) -> Result<(), ExportError>
where
    W: io::Write,
    R: CsvRow,
{
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(R::HEADER)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::DatasetBuilder;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), ExportError>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_dataset_still_has_headers() {
        let dataset = DatasetBuilder::new().with_accounts(0).build().unwrap();
        let exporter = CsvExporter::new(&dataset);

        let deals = render(|w| exporter.write_deals(w));
        assert_eq!(deals.lines().count(), 1);
        assert!(deals.starts_with("deal_id,deal_name,account_id"));

        let activities = render(|w| exporter.write_activities(w));
        assert_eq!(activities.trim_end(), ActivityRow::HEADER.join(","));
    }

    #[test]
    fn test_rows_match_header_width() {
        let dataset = DatasetBuilder::new().with_accounts(20).with_seed(3).build().unwrap();
        let exporter = CsvExporter::new(&dataset);
        let deals = render(|w| exporter.write_deals(w));

        let mut reader = csv::Reader::from_reader(deals.as_bytes());
        assert_eq!(reader.headers().unwrap().len(), DealRow::HEADER.len());
        let mut rows = 0;
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), DealRow::HEADER.len());
            rows += 1;
        }
        assert_eq!(rows, dataset.deals.len());
    }

    #[test]
    fn test_missing_optionals_are_empty_cells() {
        let dataset = DatasetBuilder::new().with_accounts(40).with_seed(11).build().unwrap();
        let exporter = CsvExporter::new(&dataset);
        let deals = render(|w| exporter.write_deals(w));

        let close_col = DealRow::HEADER.iter().position(|c| *c == "close_date").unwrap();
        let mut reader = csv::Reader::from_reader(deals.as_bytes());
        for (deal, record) in dataset.deals.iter().zip(reader.records()) {
            let record = record.unwrap();
            assert_eq!(record[close_col].is_empty(), deal.close_date.is_none());
        }
    }

    #[test]
    fn test_account_touches_have_no_deal_or_phase() {
        let dataset = DatasetBuilder::new().with_accounts(40).with_seed(11).build().unwrap();
        let exporter = CsvExporter::new(&dataset);
        let activities = render(|w| exporter.write_activities(w));

        let deal_col = ActivityRow::HEADER.iter().position(|c| *c == "deal_id").unwrap();
        let phase_col = ActivityRow::HEADER.iter().position(|c| *c == "phase").unwrap();
        let mut reader = csv::Reader::from_reader(activities.as_bytes());
        let mut account_touches = 0;
        for (activity, record) in dataset.activities.iter().zip(reader.records()) {
            let record = record.unwrap();
            assert_eq!(record[deal_col].is_empty(), activity.deal_id.is_none());
            assert_eq!(record[phase_col].is_empty(), activity.phase.is_none());
            if activity.deal_id.is_none() {
                account_touches += 1;
            }
        }
        assert!(account_touches > 0);
    }

    #[test]
    fn test_write_to_dir() {
        let dir = std::env::temp_dir().join(format!("crm-gen-export-{}", std::process::id()));
        let dataset = DatasetBuilder::new().with_accounts(5).build().unwrap();
        let paths = CsvExporter::new(&dataset).write_to_dir(&dir).unwrap();

        assert_eq!(paths.len(), 4);
        assert!(paths[0].ends_with(ACCOUNTS_FILE));
        let accounts = fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(accounts.lines().count(), 6);
        fs::remove_dir_all(&dir).unwrap();
    }
}
