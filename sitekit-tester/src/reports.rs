use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::audit::AuditReport;
use crate::scenarios::ScenarioResult;

/// Everything one tester run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub site_root: String,
    pub index_path: String,
    pub audit: Option<AuditReport>,
    pub scenarios: Vec<ScenarioResult>,
    pub total_duration: Duration,
}

impl RunReport {
    pub fn new(site_root: String, index_path: String, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339(),
            site_root,
            index_path,
            audit: None,
            scenarios: Vec::new(),
            total_duration: Duration::ZERO,
        }
    }

    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|r| r.passed).count()
    }

    /// True when every scenario passed and the audit found no issues.
    pub fn passed(&self) -> bool {
        self.passed_count() == self.scenarios.len()
            && self.audit.as_ref().is_none_or(AuditReport::is_clean)
    }

    fn success_rate(&self) -> f64 {
        if self.scenarios.is_empty() {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = (self.passed_count() as f64 / self.scenarios.len() as f64) * 100.0;
        rate
    }
}

pub fn generate_console_report(out: &mut dyn Write, report: &RunReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Site Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "============================".cyan())?;
    writeln!(out, "Site root: {}", report.site_root)?;
    writeln!(out, "Index: {}", report.index_path)?;

    if let Some(audit) = &report.audit {
        write_console_audit(out, audit)?;
    }

    let total = report.scenarios.len();
    let passed = report.passed_count();
    writeln!(out)?;
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", report.success_rate())?;
    writeln!(out, "Total time: {:?}", report.total_duration)?;
    writeln!(out)?;

    for result in &report.scenarios {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(out, "   Time: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }

    if let Some(slowest) = report.scenarios.iter().max_by_key(|r| r.duration) {
        writeln!(out)?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.duration
        )?;
    }
    Ok(())
}

fn write_console_audit(out: &mut dyn Write, audit: &AuditReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🔎 Index Audit".bright_yellow().bold())?;
    writeln!(out, "{}", "--------------".yellow())?;
    writeln!(out, "Posts: {}", audit.posts)?;
    if !audit.missing_keywords.is_empty() {
        writeln!(
            out,
            "Without keywords: {}",
            audit.missing_keywords.join(", ").dimmed()
        )?;
    }
    for (title, date) in &audit.unparseable_dates {
        writeln!(out, "   • {} {title}: {date:?}", "bad date".red())?;
    }
    for url in &audit.duplicate_urls {
        writeln!(out, "   • {} {url}", "duplicate url".red())?;
    }
    for url in &audit.absolute_urls {
        writeln!(out, "   • {} {url}", "absolute url".red())?;
    }
    for url in &audit.empty_titles {
        writeln!(out, "   • {} {url}", "empty title".red())?;
    }
    if audit.is_clean() {
        writeln!(out, "{}", "No issues found".green())?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &RunReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &RunReport) -> Result<()> {
    writeln!(out, "# Site Test Results\n")?;
    writeln!(out, "_Generated {}_\n", report.generated_at)?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Site root**: `{}`", report.site_root)?;
    writeln!(out, "- **Index**: `{}`", report.index_path)?;
    let total = report.scenarios.len();
    let passed = report.passed_count();
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", report.success_rate())?;

    if let Some(audit) = &report.audit {
        writeln!(out, "## Index Audit\n")?;
        writeln!(out, "- **Posts**: {}", audit.posts)?;
        writeln!(out, "- **Without keywords**: {}", audit.missing_keywords.len())?;
        writeln!(out, "- **Issues**: {}", audit.issue_count())?;
        for (title, date) in &audit.unparseable_dates {
            writeln!(out, "  - bad date in {title}: `{date}`")?;
        }
        for url in &audit.duplicate_urls {
            writeln!(out, "  - duplicate url `{url}`")?;
        }
        for url in &audit.absolute_urls {
            writeln!(out, "  - absolute url `{url}`")?;
        }
        for url in &audit.empty_titles {
            writeln!(out, "  - empty title at `{url}`")?;
        }
        writeln!(out)?;
    }

    if report.scenarios.is_empty() {
        writeln!(out, "_No scenarios executed._")?;
        return Ok(());
    }

    writeln!(out, "## Detailed Results\n")?;
    for result in &report.scenarios {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        writeln!(out, "- **Time**: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
