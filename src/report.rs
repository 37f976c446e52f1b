//! Rendering aggregated metrics as a human-readable table

use crate::error::Result;
use crate::metrics::MetricsReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render one metrics report as a grid table.
///
/// Columns: k, one per dataset in first-seen order, then Average.
/// Accuracies print with 4 decimal places.
pub fn render_table(k: usize, report: &MetricsReport) -> String {
    let mut headers = vec!["k".to_string()];
    let mut values = vec![k.to_string()];
    for row in &report.per_dataset {
        headers.push(row.dataset.clone());
        values.push(format!("{:.4}", row.accuracy));
    }
    headers.push("Average".to_string());
    values.push(format!("{:.4}", report.average_accuracy));

    let widths: Vec<usize> = headers
        .iter()
        .zip(values.iter())
        .map(|(h, v)| h.len().max(v.len()))
        .collect();

    let border = |fill: char| {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| std::iter::repeat(fill).take(w + 2).collect())
            .collect();
        format!("+{}+", segments.join("+"))
    };
    let row = |cells: &[String]| {
        let segments: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!(" {:<width$} ", c, width = w))
            .collect();
        format!("|{}|", segments.join("|"))
    };

    [
        border('-'),
        row(&headers),
        border('='),
        row(&values),
        border('-'),
    ]
    .join("\n")
}

/// Write one table per aggregation method to `metrics.txt`
pub fn write_metrics_txt(
    path: &Path,
    k: usize,
    reports: &[(&str, MetricsReport)],
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for (method, report) in reports {
        writeln!(writer, "{}:\n", method)?;
        writeln!(writer, "{}\n\n", render_table(k, report))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DatasetMetric;

    fn report_for(rows: &[(&str, f64)], average: f64) -> MetricsReport {
        MetricsReport {
            per_dataset: rows
                .iter()
                .map(|(name, acc)| DatasetMetric {
                    dataset: name.to_string(),
                    total: 10,
                    correct: (acc * 10.0) as usize,
                    accuracy: *acc,
                })
                .collect(),
            average_accuracy: average,
        }
    }

    #[test]
    fn test_table_contains_all_columns() {
        let table = render_table(1, &report_for(&[("college_math", 0.6667)], 0.6667));
        assert!(table.contains("college_math"));
        assert!(table.contains("Average"));
        assert!(table.contains("0.6667"));
        assert!(table.contains("| 1"));
    }

    #[test]
    fn test_table_column_order() {
        let table = render_table(1, &report_for(&[("b", 1.0), ("a", 0.0)], 0.5));
        let header_line = table.lines().nth(1).unwrap();
        let b_pos = header_line.find(" b ").unwrap();
        let a_pos = header_line.find(" a ").unwrap();
        assert!(b_pos < a_pos, "first-seen dataset must come first");
        assert!(header_line.ends_with("Average |"));
    }

    #[test]
    fn test_write_metrics_txt() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metrics.txt");
        let reports = vec![
            ("pass", report_for(&[("a", 0.5)], 0.5)),
            ("majority_vote", report_for(&[("a", 0.5)], 0.5)),
        ];
        write_metrics_txt(&path, 1, &reports).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("pass:"));
        assert!(contents.contains("majority_vote:"));
        assert!(contents.contains("0.5000"));
    }
}
