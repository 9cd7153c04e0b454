//! CSV loading for the sales dashboard.
//!
//! Reads the sales file once at startup and converts every row into a
//! [`SalesRecord`]. Any malformed row aborts the load: the dataset is either
//! complete or not loaded at all.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Dataset, SalesRecord};
use tracing::debug;

/// Columns every sales file must carry, in their canonical spelling.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Category", "Sub_Category", "Order_Date", "Sales", "Profit"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the sales file at `path` into a [`Dataset`].
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(file)?;

    debug!(
        "Loaded {} records from {}",
        dataset.len(),
        path.display()
    );

    Ok(dataset)
}

/// Parse sales records from any CSV byte stream.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        // records() starts after the header, and CSV lines are 1-based.
        let line = idx + 2;
        let row = result?;
        records.push(columns.parse_record(&row, line)?);
    }

    Ok(Dataset::new(records))
}

/// Parse an `Order_Date` cell.
///
/// Accepts ISO dates (`2024-01-05`), month-first slash dates (`1/5/2024`,
/// `1/5/24`), `YYYY/MM/DD`, any of those followed by a time of day, and
/// RFC 3339 timestamps. Returns `None` for anything else.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let (date_formats, datetime_formats): (&[&str], &[&str]) = if has_short_year(s) {
        (&["%m/%d/%y"], &["%m/%d/%y %H:%M:%S", "%m/%d/%y %H:%M"])
    } else {
        (
            &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"],
            &[
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%Y/%m/%d %H:%M:%S",
                "%Y/%m/%d %H:%M",
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y %H:%M",
            ],
        )
    };

    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header positions of the columns the dashboard reads.
struct ColumnMap {
    category: usize,
    sub_category: usize,
    order_date: usize,
    sales: usize,
    profit: usize,
    order_id: Option<usize>,
    product_name: Option<usize>,
    quantity: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let required = |name: &str| {
            index
                .get(&normalize_header_name(name))
                .copied()
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };
        let optional = |name: &str| index.get(&normalize_header_name(name)).copied();

        Ok(Self {
            category: required("Category")?,
            sub_category: required("Sub_Category")?,
            order_date: required("Order_Date")?,
            sales: required("Sales")?,
            profit: required("Profit")?,
            order_id: optional("Order_ID"),
            product_name: optional("Product_Name"),
            quantity: optional("Quantity"),
        })
    }

    fn parse_record(&self, row: &StringRecord, line: usize) -> Result<SalesRecord> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let raw_date = cell(self.order_date);
        let order_date =
            parse_order_date(raw_date).ok_or_else(|| DashboardError::InvalidDate {
                line,
                value: raw_date.to_string(),
            })?;

        let quantity = match self.quantity.map(cell) {
            Some(raw) if !raw.is_empty() => {
                raw.parse::<u32>()
                    .map_err(|_| DashboardError::InvalidNumber {
                        line,
                        column: "Quantity".to_string(),
                        value: raw.to_string(),
                    })?
            }
            _ => 0,
        };

        let text = |idx: Option<usize>| {
            idx.map(cell)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        Ok(SalesRecord {
            category: cell(self.category).to_string(),
            sub_category: cell(self.sub_category).to_string(),
            order_date,
            sales: parse_amount(cell(self.sales), "Sales", line)?,
            profit: parse_amount(cell(self.profit), "Profit", line)?,
            order_id: text(self.order_id),
            product_name: text(self.product_name),
            quantity,
        })
    }
}

/// Canonical lookup key for a header: BOM stripped, lowercase, with spaces
/// and hyphens folded to underscores (`"Sub-Category"` → `"sub_category"`).
fn normalize_header_name(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Parse a decimal amount, tolerating a leading `$` and thousands separators.
fn parse_amount(raw: &str, column: &str, line: usize) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashboardError::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// `true` for month-first slash dates whose year part has two digits
/// (`1/5/24`). Year-first dates (`2024/01/05`) never match.
fn has_short_year(s: &str) -> bool {
    let date_part = s.split_whitespace().next().unwrap_or("");
    let parts: Vec<&str> = date_part.split('/').collect();
    parts.len() == 3 && parts[0].len() <= 2 && parts[2].len() == 2
}

// ── Tests ─────────────────────────────────────────────────────────────────────
