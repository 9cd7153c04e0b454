//! Sales aggregation by category and by calendar month.

use std::collections::BTreeMap;

use dashboard_core::metrics::profit_margin;
use dashboard_core::models::{SalesRecord, YearMonth};
use serde::Serialize;

// ── AggregatedStats ───────────────────────────────────────────────────────────

/// Sales, profit and volume totals accumulated across multiple records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedStats {
    pub sales: f64,
    pub profit: f64,
    pub quantity: u64,
    pub count: u32,
}

impl AggregatedStats {
    /// Add a single record's amounts to the running totals.
    pub fn add_record(&mut self, record: &SalesRecord) {
        self.sales += record.sales;
        self.profit += record.profit;
        self.quantity += u64::from(record.quantity);
        self.count += 1;
    }

    /// Merge another set of totals into this one.
    pub fn merge(&mut self, other: &AggregatedStats) {
        self.sales += other.sales;
        self.profit += other.profit;
        self.quantity += other.quantity;
        self.count += other.count;
    }

    /// Profit margin of these totals, `0.0` when sales are zero.
    pub fn profit_margin(&self) -> f64 {
        profit_margin(self.profit, self.sales)
    }
}

// ── Grouped rows ──────────────────────────────────────────────────────────────

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    #[serde(flatten)]
    pub stats: AggregatedStats,
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    #[serde(flatten)]
    pub stats: AggregatedStats,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups sales records by category or month.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Sum records per category.
    ///
    /// Every record lands in exactly one group. Returns groups sorted by
    /// category name (ascending).
    pub fn group_by_category<'a, I>(records: I) -> Vec<CategoryTotals>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut map: BTreeMap<&'a str, AggregatedStats> = BTreeMap::new();

        for record in records {
            map.entry(record.category.as_str())
                .or_default()
                .add_record(record);
        }

        map.into_iter()
            .map(|(category, stats)| CategoryTotals {
                category: category.to_string(),
                stats,
            })
            .collect()
    }

    /// Sum records per calendar month.
    ///
    /// The output runs from the earliest to the latest month present in
    /// `records`, ascending, one entry per month. Months without any record
    /// are included with zero totals so charts stay continuous.
    pub fn resample_by_month<'a, I>(records: I) -> Vec<MonthlyTotals>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut map: BTreeMap<YearMonth, AggregatedStats> = BTreeMap::new();

        for record in records {
            map.entry(record.month()).or_default().add_record(record);
        }

        let (Some(&first), Some(&last)) = (map.keys().next(), map.keys().next_back()) else {
            return Vec::new();
        };

        let mut months = Vec::with_capacity(map.len());
        let mut current = first;
        while current <= last {
            let stats = map.remove(&current).unwrap_or_default();
            months.push(MonthlyTotals {
                month: current,
                stats,
            });
            current = current.succ();
        }
        months
    }

    /// Sum up a set of group totals into a single [`AggregatedStats`].
    pub fn calculate_totals<'a, I>(groups: I) -> AggregatedStats
    where
        I: IntoIterator<Item = &'a AggregatedStats>,
    {
        let mut totals = AggregatedStats::default();
        for stats in groups {
            totals.merge(stats);
        }
        totals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_record(category: &str, sub: &str, date: &str, sales: f64, profit: f64) -> SalesRecord {
        SalesRecord::new(
            category,
            sub,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            sales,
            profit,
        )
    }

    fn sample_records() -> Vec<SalesRecord> {
        vec![
            make_record("Technology", "Phones", "2024-03-10", 500.0, 50.0),
            make_record("Furniture", "Chairs", "2024-01-05", 100.0, 10.0),
            make_record("Furniture", "Tables", "2024-01-20", 200.0, -20.0),
            make_record("Office Supplies", "Paper", "2024-01-31", 20.0, 8.0),
        ]
    }

    // ── group_by_category ─────────────────────────────────────────────────────

    #[test]
    fn test_group_by_category_sums() {
        let records = sample_records();
        let groups = SalesAggregator::group_by_category(&records);

        assert_eq!(groups.len(), 3);
        let furniture = groups.iter().find(|g| g.category == "Furniture").unwrap();
        assert!((furniture.stats.sales - 300.0).abs() < 1e-9);
        assert!((furniture.stats.profit - -10.0).abs() < 1e-9);
        assert_eq!(furniture.stats.count, 2);
    }

    #[test]
    fn test_group_by_category_sorted_lexically() {
        let records = sample_records();
        let groups = SalesAggregator::group_by_category(&records);
        let names: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Furniture", "Office Supplies", "Technology"]);
    }

    #[test]
    fn test_group_by_category_partition_is_complete() {
        let records = sample_records();
        let groups = SalesAggregator::group_by_category(&records);

        let grouped_sales: f64 = groups.iter().map(|g| g.stats.sales).sum();
        let all_sales: f64 = records.iter().map(|r| r.sales).sum();
        let grouped_rows: u32 = groups.iter().map(|g| g.stats.count).sum();

        assert!((grouped_sales - all_sales).abs() < 1e-9);
        assert_eq!(grouped_rows as usize, records.len());
    }

    #[test]
    fn test_group_by_category_empty() {
        let groups = SalesAggregator::group_by_category(&Vec::<SalesRecord>::new());
        assert!(groups.is_empty());
    }

    // ── resample_by_month ─────────────────────────────────────────────────────

    #[test]
    fn test_resample_by_month_zero_fills_gaps() {
        let records = sample_records();
        let months = SalesAggregator::resample_by_month(&records);

        let keys: Vec<String> = months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);

        assert!((months[0].stats.sales - 320.0).abs() < 1e-9);
        assert_eq!(months[0].stats.count, 3);
        assert_eq!(months[1].stats, AggregatedStats::default());
        assert!((months[2].stats.sales - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_resample_by_month_ascending_without_duplicates() {
        let records = vec![
            make_record("A", "x", "2024-02-01", 1.0, 0.0),
            make_record("A", "x", "2023-11-15", 1.0, 0.0),
            make_record("A", "x", "2024-02-28", 1.0, 0.0),
            make_record("A", "x", "2023-11-01", 1.0, 0.0),
        ];
        let months = SalesAggregator::resample_by_month(&records);

        let keys: Vec<YearMonth> = months.iter().map(|m| m.month).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        // Nov, Dec, Jan, Feb across the year boundary.
        assert_eq!(keys.len(), 4);
        assert_eq!(months[0].stats.count, 2);
        assert_eq!(months[3].stats.count, 2);
    }

    #[test]
    fn test_resample_by_month_single_month() {
        let records = vec![make_record("A", "x", "2024-05-09", 7.5, 1.5)];
        let months = SalesAggregator::resample_by_month(&records);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month.to_string(), "2024-05");
    }

    #[test]
    fn test_resample_by_month_empty() {
        let months = SalesAggregator::resample_by_month(&Vec::<SalesRecord>::new());
        assert!(months.is_empty());
    }

    #[test]
    fn test_resample_by_month_accepts_references() {
        let records = sample_records();
        let furniture: Vec<&SalesRecord> =
            records.iter().filter(|r| r.category == "Furniture").collect();
        let months = SalesAggregator::resample_by_month(furniture.iter().copied());
        assert_eq!(months.len(), 1);
        assert!((months[0].stats.sales - 300.0).abs() < 1e-9);
    }

    // ── calculate_totals ──────────────────────────────────────────────────────

    #[test]
    fn test_calculate_totals_matches_all_rows() {
        let records = sample_records();
        let groups = SalesAggregator::group_by_category(&records);
        let totals = SalesAggregator::calculate_totals(groups.iter().map(|g| &g.stats));

        assert!((totals.sales - 820.0).abs() < 1e-9);
        assert!((totals.profit - 48.0).abs() < 1e-9);
        assert_eq!(totals.count, 4);
    }

    #[test]
    fn test_aggregated_stats_profit_margin_zero_sales() {
        let stats = AggregatedStats::default();
        assert_eq!(stats.profit_margin(), 0.0);
    }
}
