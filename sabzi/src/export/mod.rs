//! CSV export of the filtered bill list.
//!
//! Mirrors the report the backend's web client produces: one file with the
//! bill rows, one with a summary (criteria echo, grand total, provider-wise
//! and signer-wise subtotals). The caller hands in the *already filtered*
//! list together with the criteria that produced it.

use crate::state::filter::FilterCriteria;
use chrono::Local;
use csv::WriterBuilder;
use fresh_api::endpoints::bills::Bill;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err)
    }
}

/// Paths of a finished export
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub rows: PathBuf,
    pub summary: PathBuf,
}

/// Where reports land by default: the user's download directory, falling
/// back to the home directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write the bill rows and the summary report under `dir`.
pub fn write_report(
    bills: &[Bill],
    criteria: &FilterCriteria,
    dir: &Path,
) -> Result<ExportPaths, ExportError> {
    std::fs::create_dir_all(dir)?;

    let stamp = Local::now().format("%Y-%m-%d_%H-%M");
    let paths = ExportPaths {
        rows: dir.join(format!("bills_{}.csv", stamp)),
        summary: dir.join(format!("bills_summary_{}.csv", stamp)),
    };

    write_rows(bills, &paths.rows)?;
    write_summary(bills, criteria, &paths.summary)?;

    Ok(paths)
}

fn write_rows(bills: &[Bill], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Date", "Provider", "Signer", "Items", "Amount ($)"])?;

    for bill in bills {
        let items = bill
            .items
            .iter()
            .map(|item| {
                format!(
                    "{} (qty {} x ${:.2})",
                    item.name, item.quantity, item.price
                )
            })
            .collect::<Vec<_>>()
            .join("; ");

        writer.write_record([
            bill.date
                .with_timezone(&Local)
                .format("%d/%m/%Y")
                .to_string(),
            bill.provider_name.clone(),
            bill.signer.clone(),
            items,
            format!("{:.2}", bill.total.value()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_summary(
    bills: &[Bill],
    criteria: &FilterCriteria,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    // Section layout, so row lengths vary
    let mut writer = WriterBuilder::new().flexible(true).from_writer(file);

    let total_amount: f64 = bills.iter().map(|b| b.total.value()).sum();

    // BTreeMap keeps the subtotal sections in name order
    let mut by_provider: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    let mut by_signer: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for bill in bills {
        let provider = by_provider.entry(bill.provider_name.as_str()).or_default();
        provider.0 += 1;
        provider.1 += bill.total.value();

        let signer = by_signer.entry(bill.signer.as_str()).or_default();
        signer.0 += 1;
        signer.1 += bill.total.value();
    }

    let fmt_date = |date: &chrono::NaiveDate| date.format("%d/%m/%Y").to_string();
    let all = "All".to_string();

    // The criteria only carry the provider id; the name comes from the
    // filtered rows themselves
    let provider_label = criteria
        .provider_id
        .as_ref()
        .map(|id| {
            bills
                .iter()
                .find(|b| b.provider_id == *id)
                .map(|b| b.provider_name.clone())
                .unwrap_or_else(|| id.clone())
        })
        .unwrap_or_else(|| all.clone());

    writer.write_record(["Bills Summary Report"])?;
    writer.write_record([""])?;
    writer.write_record([
        "Report Generated:".to_string(),
        Local::now().format("%d/%m/%Y %H:%M").to_string(),
    ])?;
    writer.write_record([""])?;
    writer.write_record(["Filter Criteria"])?;
    writer.write_record([
        "Date Range:".to_string(),
        criteria.start_date.as_ref().map(fmt_date).unwrap_or_else(|| all.clone()),
        "to".to_string(),
        criteria.end_date.as_ref().map(fmt_date).unwrap_or_else(|| all.clone()),
    ])?;
    writer.write_record(["Provider:".to_string(), provider_label])?;
    writer.write_record([
        "Signer:".to_string(),
        criteria.signer.clone().unwrap_or_else(|| all.clone()),
    ])?;
    writer.write_record([""])?;
    writer.write_record(["Summary Statistics"])?;
    writer.write_record(["Total Bills:".to_string(), bills.len().to_string()])?;
    writer.write_record([
        "Total Amount:".to_string(),
        format!("${:.2}", total_amount),
    ])?;
    writer.write_record([""])?;

    writer.write_record(["Provider-wise Summary"])?;
    writer.write_record(["Provider", "Number of Bills", "Total Amount ($)"])?;
    for (provider, (count, amount)) in &by_provider {
        writer.write_record([
            provider.to_string(),
            count.to_string(),
            format!("${:.2}", amount),
        ])?;
    }
    writer.write_record([""])?;

    writer.write_record(["Signer-wise Summary"])?;
    writer.write_record(["Signer", "Number of Bills", "Total Amount ($)"])?;
    for (signer, (count, amount)) in &by_signer {
        writer.write_record([
            signer.to_string(),
            count.to_string(),
            format!("${:.2}", amount),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fresh_api::endpoints::bills::LineItem;
    use fresh_api::endpoints::Amount;

    fn bill(id: &str, provider: &str, signer: &str, total: &str) -> Bill {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Bill {
            id: id.to_string(),
            provider_id: provider.to_lowercase(),
            provider_name: provider.to_string(),
            items: vec![LineItem {
                id: "i1".to_string(),
                name: "Tomato".to_string(),
                quantity: 2.0,
                price: 30.0,
                item_total: 60.0,
            }],
            signer: signer.to_string(),
            total: Amount::new(total),
            date,
            created_at: date,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("sabzi-export-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_rows_and_summary_files() {
        let dir = scratch_dir("basic");
        let bills = vec![
            bill("b1", "Ram Traders", "DK", "60"),
            bill("b2", "Ram Traders", "AS", "40"),
            bill("b3", "Shyam Vegetables", "DK", "25.50"),
        ];

        let paths = write_report(&bills, &FilterCriteria::default(), &dir).unwrap();

        let rows = std::fs::read_to_string(&paths.rows).unwrap();
        assert!(rows.starts_with("Date,Provider,Signer,Items,Amount ($)"));
        assert!(rows.contains("Ram Traders"));
        assert!(rows.contains("Tomato (qty 2 x $30.00)"));

        let summary = std::fs::read_to_string(&paths.summary).unwrap();
        assert!(summary.contains("Bills Summary Report"));
        assert!(summary.contains("Total Bills:,3"));
        assert!(summary.contains("Total Amount:,$125.50"));
        // Provider subtotals aggregate count and amount
        assert!(summary.contains("Ram Traders,2,$100.00"));
        assert!(summary.contains("Shyam Vegetables,1,$25.50"));
        // Signer subtotals too
        assert!(summary.contains("DK,2,$85.50"));
    }

    #[test]
    fn summary_echoes_the_criteria() {
        let dir = scratch_dir("criteria");
        let bills = vec![bill("b1", "Ram Traders", "DK", "60")];
        let criteria = FilterCriteria {
            provider_id: Some("ram traders".to_string()),
            signer: Some("DK".to_string()),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: None,
            search_text: None,
        };

        let paths = write_report(&bills, &criteria, &dir).unwrap();
        let summary = std::fs::read_to_string(&paths.summary).unwrap();

        assert!(summary.contains("Date Range:,01/06/2025,to,All"));
        assert!(summary.contains("Provider:,Ram Traders"));
        assert!(summary.contains("Signer:,DK"));
    }

    #[test]
    fn empty_list_still_produces_a_report() {
        let dir = scratch_dir("empty");
        let paths = write_report(&[], &FilterCriteria::default(), &dir).unwrap();
        let summary = std::fs::read_to_string(&paths.summary).unwrap();
        assert!(summary.contains("Total Bills:,0"));
        assert!(summary.contains("Total Amount:,$0.00"));
    }
}
