//! Format run reports and algorithm listings as text.

use crate::checksum::report::ChecksumReport;
use crate::digest::Algorithm;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a checksum run report as human-readable text.
pub fn format_report_text(report: &ChecksumReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Checksum")));
    out.push_str(&format!("  Root: {}\n", report.root.display()));
    out.push_str(&format!("  Algorithm: {}\n", report.algorithm));
    out.push_str(&format!("  Mode: {}\n", report.mode));
    out.push_str(&format!(
        "  Recursive: {}\n",
        if report.recursive { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Candidates: {}\n", report.candidates));
    out.push_str(&format!("  Already recorded: {}\n", report.skipped));
    out.push_str(&format!("  Digested: {}\n\n", report.digested));

    if report.manifests.is_empty() {
        out.push_str("No manifests written.\n");
        return out;
    }

    out.push_str(&format!("{}\n\n", format_section_heading("Manifests")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Manifest", "Records"]);
    for manifest in &report.manifests {
        table.add_row(vec![
            manifest.path.display().to_string(),
            manifest.records.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Total: {} manifests, {} records.\n",
        report.manifests.len(),
        report.records_written()
    ));
    out
}

/// Format the supported algorithm list as human-readable text.
pub fn format_algorithms_text(algorithms: &[Algorithm]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Algorithms")));
    if algorithms.is_empty() {
        out.push_str("No algorithms registered.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Algorithm", "Digest bytes", "Manifest"]);
    for algorithm in algorithms {
        table.add_row(vec![
            algorithm.name().to_string(),
            algorithm.output_len().to_string(),
            crate::manifest::manifest_file_name(*algorithm),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
