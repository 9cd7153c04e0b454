use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// One row of the sales file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    /// Top-level product category, e.g. `"Furniture"`.
    pub category: String,
    /// Sub-category within [`Self::category`], e.g. `"Chairs"`.
    pub sub_category: String,
    /// Calendar date the order was placed.
    pub order_date: NaiveDate,
    /// Sales amount.
    pub sales: f64,
    /// Profit amount; negative for loss-making rows.
    pub profit: f64,
    /// Order identifier, when the file carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Product name, when the file carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Units sold; `0` when the file has no quantity column.
    pub quantity: u32,
}

impl SalesRecord {
    /// Build a record carrying only the required columns.
    pub fn new(
        category: impl Into<String>,
        sub_category: impl Into<String>,
        order_date: NaiveDate,
        sales: f64,
        profit: f64,
    ) -> Self {
        Self {
            category: category.into(),
            sub_category: sub_category.into(),
            order_date,
            sales,
            profit,
            order_id: None,
            product_name: None,
            quantity: 0,
        }
    }

    /// Calendar month the order falls in.
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.order_date)
    }
}

/// The full, immutable collection of sales records in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    /// Sum of `Sales` over every row.
    pub fn total_sales(&self) -> f64 {
        self.records.iter().map(|r| r.sales).sum()
    }

    /// Sum of `Profit` over every row.
    pub fn total_profit(&self) -> f64 {
        self.records.iter().map(|r| r.profit).sum()
    }

    /// Earliest and latest order dates, or `None` for an empty dataset.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.order_date).min()?;
        let last = self.records.iter().map(|r| r.order_date).max()?;
        Some((first, last))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// A calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month (the label calendar-month resampling uses).
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.succ().first_day()?.pred_opt()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// The user's current filter: one category plus zero or more sub-categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Chosen category; `None` until one is picked.
    pub category: Option<String>,
    /// Chosen sub-categories within the category.
    pub sub_categories: Vec<String>,
}

impl Selection {
    pub fn new(category: impl Into<String>, sub_categories: Vec<String>) -> Self {
        Self {
            category: Some(category.into()),
            sub_categories,
        }
    }

    pub fn has_sub_category(&self, name: &str) -> bool {
        self.sub_categories.iter().any(|s| s == name)
    }

    /// Whether `record` belongs to this selection.
    ///
    /// Category must match exactly, then the sub-category must be in the
    /// chosen set. An empty set matches nothing.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        match &self.category {
            Some(category) => {
                record.category == *category && self.has_sub_category(&record.sub_category)
            }
            None => false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            SalesRecord::new("Furniture", "Chairs", date("2024-01-05"), 100.0, 10.0),
            SalesRecord::new("Furniture", "Tables", date("2024-01-20"), 200.0, -20.0),
            SalesRecord::new("Technology", "Phones", date("2023-11-02"), 50.0, 5.0),
        ])
    }

    #[test]
    fn test_dataset_totals() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 3);
        assert!((ds.total_sales() - 350.0).abs() < 1e-9);
        assert!((ds.total_profit() - -5.0).abs() < 1e-9);
    }

    #[test]
    fn test_dataset_date_range() {
        let ds = sample_dataset();
        let (first, last) = ds.date_range().unwrap();
        assert_eq!(first, date("2023-11-02"));
        assert_eq!(last, date("2024-01-20"));
        assert!(Dataset::default().date_range().is_none());
    }

    #[test]
    fn test_year_month_ordering_and_display() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        assert!(dec < jan);
        assert_eq!(dec.succ(), jan);
        assert_eq!(jan.to_string(), "2024-01");
    }

    #[test]
    fn test_year_month_rejects_bad_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn test_year_month_last_day() {
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.last_day(), Some(date("2024-02-29")));
        let dec = YearMonth::new(2023, 12).unwrap();
        assert_eq!(dec.last_day(), Some(date("2023-12-31")));
    }

    #[test]
    fn test_year_month_serializes_as_string() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2024-03\"");
    }

    #[test]
    fn test_selection_matches_category_and_sub_category() {
        let ds = sample_dataset();
        let sel = Selection::new("Furniture", vec!["Chairs".to_string()]);
        let matched: Vec<_> = ds.iter().filter(|r| sel.matches(r)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].sub_category, "Chairs");
    }

    #[test]
    fn test_selection_empty_sub_categories_matches_nothing() {
        let ds = sample_dataset();
        let sel = Selection::new("Furniture", vec![]);
        assert!(ds.iter().all(|r| !sel.matches(r)));
    }

    #[test]
    fn test_selection_without_category_matches_nothing() {
        let ds = sample_dataset();
        let sel = Selection {
            category: None,
            sub_categories: vec!["Chairs".to_string()],
        };
        assert!(ds.iter().all(|r| !sel.matches(r)));
    }

    #[test]
    fn test_selection_sub_category_from_other_category_ignored() {
        let ds = sample_dataset();
        // "Phones" only exists under Technology.
        let sel = Selection::new("Furniture", vec!["Phones".to_string()]);
        assert!(ds.iter().all(|r| !sel.matches(r)));
    }
}
