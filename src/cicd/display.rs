//! Console rendering of diff reports

use crate::diff::{DiffChange, DiffReport, FileDetailsDiff};
use crate::fmt::{
    format_bytes, format_percent, format_signed_bytes, CHART, CHECKMARK, CROSSMARK,
};
use console::style;

/// Print files, groups and totals of a report
pub fn print_report(report: &DiffReport) {
    if !report.files.is_empty() {
        println!("\n{} Files", CHART);
        for entry in &report.files {
            println!("{}", format_entry(entry));
        }
    }

    if !report.groups.is_empty() {
        println!("\n{} Groups", CHART);
        for entry in &report.groups {
            println!("{}", format_entry(entry));
        }
    }

    let stats = &report.stats;
    println!(
        "\nTotal: {} ({} {})",
        format_bytes(stats.curr_branch_size),
        format_signed_bytes(stats.diff.bytes),
        format_percent(stats.diff.percent)
    );

    if report.passed() {
        println!("{} {}", CHECKMARK, style("All budgets passed").green().bold());
    } else {
        let failed = report.failures().count();
        println!(
            "{} {}",
            CROSSMARK,
            style(format!("{failed} entr{} over budget", if failed == 1 { "y" } else { "ies" }))
                .red()
                .bold()
        );
    }
}

/// One report line: marker, path, size, delta and budgets
pub fn format_entry(entry: &FileDetailsDiff) -> String {
    let details = &entry.details;
    let marker = if entry.status.is_fail() {
        style("FAIL").red().bold()
    } else {
        style("PASS").green()
    };

    let change = match entry.diff.change {
        DiffChange::NoChange => style("no change".to_string()).dim(),
        DiffChange::Increase => style(format!(
            "{} {}",
            format_signed_bytes(entry.diff.bytes),
            format_percent(entry.diff.percent)
        ))
        .red(),
        DiffChange::Decrease => style(format!(
            "{} {}",
            format_signed_bytes(entry.diff.bytes),
            format_percent(entry.diff.percent)
        ))
        .green(),
    };

    let mut line = format!(
        "  {} {} {} ({}) {}",
        marker,
        details.path,
        format_bytes(details.size),
        details.compression,
        change
    );

    let mut budgets = Vec::new();
    if let Some(max_size) = details.max_size {
        budgets.push(format!("max {}", format_bytes(max_size)));
    }
    if let Some(max_percent) = details.max_percent_increase {
        budgets.push(format!("max +{max_percent}%"));
    }
    if !budgets.is_empty() {
        line.push_str(&format!(" [{}]", budgets.join(", ")));
    }

    let reasons = entry.status.fail_reasons();
    if !reasons.is_empty() {
        let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
        line.push_str(&format!(" {}", style(reasons.join(", ")).red()));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{generate_diff_report, Compression, DiffReportInput, FileDetails};

    fn plain(entry: &FileDetailsDiff) -> String {
        console::set_colors_enabled(false);
        format_entry(entry)
    }

    #[test]
    fn test_format_entry_passing_without_baseline() {
        let input = DiffReportInput::new(
            vec![FileDetails::new("main.js", 2048, Compression::Gzip)],
            vec![],
        );
        let report = generate_diff_report(&input, None);

        let line = plain(&report.files[0]);
        assert!(line.contains("PASS"));
        assert!(line.contains("main.js"));
        assert!(line.contains("2.00 KB"));
        assert!(line.contains("(gzip)"));
        assert!(line.contains("+2.00 KB"));
    }

    #[test]
    fn test_format_entry_lists_budgets_and_reasons() {
        let current = DiffReportInput::new(
            vec![FileDetails::new("main.js", 1500, Compression::None)
                .with_max_size(1024)
                .with_max_percent_increase(10.0)],
            vec![],
        );
        let baseline = DiffReportInput::new(
            vec![FileDetails::new("main.js", 1000, Compression::None)],
            vec![],
        );
        let report = generate_diff_report(&current, Some(&baseline));

        let line = plain(&report.files[0]);
        assert!(line.contains("FAIL"));
        assert!(line.contains("[max 1.00 KB, max +10%]"));
        assert!(line.contains("+50.00%"));
        assert!(line.contains("max size exceeded"));
        assert!(line.contains("max percent increase exceeded"));
    }

    #[test]
    fn test_format_entry_no_change() {
        let input = DiffReportInput::new(
            vec![FileDetails::new("main.js", 10, Compression::Brotli)],
            vec![],
        );
        let report = generate_diff_report(&input, Some(&input));

        let line = plain(&report.files[0]);
        assert!(line.contains("no change"));
    }
}
