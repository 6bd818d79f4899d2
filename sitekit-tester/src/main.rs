mod audit;
mod reports;
mod scenarios;
mod source;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use sitekit_core::highlight::Segment;
use sitekit_core::{
    Highlighter, SearchIndexProvider, SearchQuery, ViewState, format_post_date, search_posts,
};

use reports::RunReport;
use scenarios::{ScenarioCtx, expand_scenarios, list_scenarios, run_scenario};
use source::{FileIndexSource, load_site_config};

#[derive(Debug, Parser)]
#[command(name = "sitekit-tester", version)]
#[command(about = "Audits a site's search index and runs search scenarios against it")]
struct Args {
    /// Directory the site is served from
    #[arg(long, default_value = "sitekit-web/static")]
    site_root: PathBuf,

    /// Site config JSON (same shape as the page's config block)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenarios to run (comma-separated, or `smoke` / `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Run one search and print the matches instead of testing
    #[arg(long)]
    query: Option<String>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.list_scenarios {
        let mut output_target = OutputTarget::new(args.output.clone())?;
        writeln!(output_target, "Available scenarios:")?;
        for (key, description) in list_scenarios() {
            writeln!(output_target, "  {key:20} - {description}")?;
        }
        output_target.flush()?;
        return Ok(());
    }

    let config = load_site_config(args.config.as_deref())?;
    let provider = SearchIndexProvider::new(
        FileIndexSource::new(&args.site_root),
        config.index_path.clone(),
    );

    if let Some(query) = &args.query {
        return print_query(&provider, query).await;
    }

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let mut report = RunReport::new(
        args.site_root.display().to_string(),
        provider.path().to_string(),
        Utc::now(),
    );

    match provider.try_load().await {
        Ok(index) => report.audit = Some(audit::audit(&index)),
        Err(err) => log::error!("Skipping audit: {err}"),
    }

    let ctx = ScenarioCtx {
        provider: &provider,
        config: &config,
    };
    for name in expand_scenarios(&split_csv(&args.scenarios)) {
        if args.verbose {
            println!("🧪 {}", name.bright_white());
        }
        report.scenarios.push(run_scenario(&name, &ctx).await);
    }
    report.total_duration = start_time.elapsed();

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, &report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, &report)?,
        _ => reports::generate_console_report(&mut output_target, &report)?,
    }
    output_target.flush()?;

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🔍 sitekit Tester".bright_cyan().bold());
    println!("{}", "=================".cyan());
}

async fn print_query(provider: &SearchIndexProvider<FileIndexSource>, raw: &str) -> Result<()> {
    let index = provider
        .try_load()
        .await
        .with_context(|| format!("loading {}", provider.path()))?;
    let hits = search_posts(index.posts(), raw);
    let state = match SearchQuery::parse(raw) {
        Some(_) => ViewState::for_matches(hits.len()),
        None => ViewState::All,
    };
    println!("View: {state:?}");

    let highlighter = Highlighter::new(raw);
    for post in hits {
        println!(
            "  • {} {}",
            highlight_terminal(&post.title, highlighter.as_ref()),
            format!("({}, {})", post.category, format_post_date(&post.date)).dimmed()
        );
        println!("    {}", post.url);
    }
    Ok(())
}

fn highlight_terminal(text: &str, highlighter: Option<&Highlighter>) -> String {
    let Some(highlighter) = highlighter else {
        return text.to_string();
    };
    highlighter
        .segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Match(run) => run.black().on_yellow().to_string(),
            Segment::Plain(run) => run.to_string(),
        })
        .collect()
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}
