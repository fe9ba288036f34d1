//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use vaultprobe_core::Classification;
use vaultprobe_core::DiagnosticResult;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn headline(classification: Classification) -> &'static str {
        match classification {
            Classification::Consistent => "Vault is consistent",
            Classification::RootMissing => "Records directory missing",
            Classification::AllRecordsLost => "All records lost",
            Classification::PartialLoss => "Partial record loss",
            Classification::StaleMetadataUndercount => "Metadata count is stale",
            Classification::Inconsistent => "Vault is inconsistent",
        }
    }

    fn write_headline(&self, classification: Classification) {
        let text = Self::headline(classification);
        if !self.use_colors {
            self.line(&format!("{text} [{classification}]"));
            return;
        }

        let marker = match classification {
            Classification::Consistent => style("✓").green().bold(),
            Classification::StaleMetadataUndercount | Classification::Inconsistent => {
                style("⚠").yellow().bold()
            }
            _ => style("✗").red().bold(),
        };
        self.line(&format!(
            "{marker} {text} {}",
            style(format!("[{classification}]")).dim()
        ));
    }

    fn write_section(&self, title: &str) {
        self.line("");
        if self.use_colors {
            self.line(&format!("{}", style(title).bold()));
        } else {
            self.line(title);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_diagnostic_result(
        &self,
        _operation: &str,
        source: &Path,
        result: &DiagnosticResult,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_headline(result.classification);
        self.line(&format!("  Source:     {}", source.display()));
        self.line(&format!("  Declared:   {}", result.expected_count));
        self.line(&format!("  Recovered:  {}", result.actual_count));
        if result.missing_count() > 0 {
            self.line(&format!("  Missing:    {}", result.missing_count()));
        }
        if self.verbose
            && let Some(version) = result.metadata.extra_str("version")
        {
            self.line(&format!("  Format:     {version}"));
        }

        let offending: Vec<_> = result.offending_findings().collect();
        if !offending.is_empty() {
            self.write_section("Offending directories:");
            for finding in offending {
                self.line(&format!("  - {finding}"));
            }
        }

        if self.verbose && !result.records.is_empty() {
            self.write_section("Records:");
            for record in &result.records {
                self.line(&format!(
                    "  {}  {} ({}, {} fields)",
                    record.id,
                    record.name,
                    record.credential_type,
                    record.field_count()
                ));
            }
        }

        if self.verbose && !result.inventory.entries.is_empty() {
            self.write_section("Extracted:");
            for entry in &result.inventory.entries {
                if entry.is_dir {
                    self.line(&format!("  {}/", entry.path.display()));
                } else {
                    self.line(&format!(
                        "  {}  {}",
                        entry.path.display(),
                        Self::format_size(entry.size)
                    ));
                }
            }
            self.line(&format!(
                "  {} files, {}",
                result.inventory.file_count(),
                Self::format_size(result.inventory.total_size())
            ));
        }

        if result.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &result.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        self.line("");
        self.line(&format!(
            "Diagnosis: {}",
            result.classification.description()
        ));

        let causes = result.classification.likely_causes();
        if !causes.is_empty() {
            self.write_section("Possible causes:");
            for (i, cause) in causes.iter().enumerate() {
                self.line(&format!("  {}. {cause}", i + 1));
            }
        }

        if self.verbose {
            self.line(&format!("Duration: {:?}", result.duration));
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = Term::stderr().write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = Term::stderr().write_line(&format!("WARNING: {message}"));
        }
    }
}
