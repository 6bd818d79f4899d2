use anyhow::{Context, Result, bail, ensure};
use serde::Serialize;
use sitekit_core::highlight::Segment;
use sitekit_core::{
    AnalyticsEvent, Debouncer, EventSink, Highlighter, IndexSource, SearchController,
    SearchIndex, SearchIndexProvider, SearchQuery, SearchView, SiteConfig, StaticSource,
    ViewState, VirtualScheduler, search_posts,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Every scenario the tester knows, with a one-line description.
pub const SCENARIOS: &[(&str, &str)] = &[
    ("index-loads", "The search index loads and holds at least one post"),
    ("self-search", "Searching a post's title finds that post"),
    ("empty-query", "Blank queries match nothing and show the full list"),
    ("case-insensitive", "Upper and lower case queries find the same posts"),
    ("idempotent", "Filtering filtered results changes nothing"),
    ("metachar-highlight", "Regex metacharacters are highlighted literally"),
    ("debounce-collapse", "A burst of keystrokes runs one search"),
    ("cache-reuse", "Repeated loads fetch the index once"),
];

const SMOKE: &[&str] = &["index-loads", "self-search", "empty-query"];

const METACHAR_QUERIES: &[&str] = &["C++", "(draft", "[a-z]", ".*", r"a\b", "50%?", "$HOME"];

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub duration: Duration,
    pub failures: Vec<String>,
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().copied()
}

/// Expand `smoke` and `all` into scenario names, keeping order and dropping repeats.
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();
    for name in names {
        let group: Vec<&str> = match name.as_str() {
            "all" => SCENARIOS.iter().map(|(key, _)| *key).collect(),
            "smoke" => SMOKE.to_vec(),
            other => vec![other],
        };
        for key in group {
            if !expanded.iter().any(|seen| seen == key) {
                expanded.push(key.to_string());
            }
        }
    }
    expanded
}

/// What a scenario runs against.
pub struct ScenarioCtx<'a, S: IndexSource> {
    pub provider: &'a SearchIndexProvider<S>,
    pub config: &'a SiteConfig,
}

pub async fn run_scenario<S: IndexSource>(name: &str, ctx: &ScenarioCtx<'_, S>) -> ScenarioResult {
    let start = Instant::now();
    let outcome = match name {
        "index-loads" => index_loads(ctx).await,
        "self-search" => self_search(ctx).await,
        "empty-query" => empty_query(ctx).await,
        "case-insensitive" => case_insensitive(ctx).await,
        "idempotent" => idempotent(ctx).await,
        "metachar-highlight" => metachar_highlight(),
        "debounce-collapse" => debounce_collapse(ctx).await,
        "cache-reuse" => cache_reuse(ctx).await,
        other => Err(anyhow::anyhow!("Unknown scenario: {other}")),
    };
    let failures = match outcome {
        Ok(()) => Vec::new(),
        Err(err) => vec![format!("{err:#}")],
    };
    log::debug!("Scenario {name} finished with {} failures", failures.len());

    ScenarioResult {
        scenario_name: name.to_string(),
        passed: failures.is_empty(),
        duration: start.elapsed(),
        failures,
    }
}

async fn load_index<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<SearchIndex> {
    ctx.provider
        .try_load()
        .await
        .with_context(|| format!("loading {}", ctx.provider.path()))
}

async fn index_loads<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let index = load_index(ctx).await?;
    ensure!(!index.is_empty(), "{} holds no posts", ctx.provider.path());
    Ok(())
}

async fn self_search<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let index = load_index(ctx).await?;
    let missed: Vec<&str> = index
        .posts()
        .iter()
        .filter(|post| !post.title.trim().is_empty())
        .filter(|post| {
            !search_posts(index.posts(), &post.title)
                .iter()
                .any(|hit| hit.url == post.url)
        })
        .map(|post| post.title.as_str())
        .collect();
    ensure!(
        missed.is_empty(),
        "titles that do not find their own post: {}",
        missed.join(", ")
    );
    Ok(())
}

async fn empty_query<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let index = load_index(ctx).await?;
    for raw in ["", "   ", "\t\n"] {
        ensure!(SearchQuery::parse(raw).is_none(), "{raw:?} parsed as a query");
        ensure!(
            search_posts(index.posts(), raw).is_empty(),
            "{raw:?} matched posts"
        );
    }

    let controller = SearchController::new(
        SearchIndexProvider::new(StaticSource::new("[]"), ctx.provider.path()),
        Debouncer::new(VirtualScheduler::new(), ctx.config.debounce()),
        SilentView,
        CountingSink::default(),
    );
    let state = controller.run_query("  ").await;
    ensure!(state == ViewState::All, "blank query left the view in {state:?}");
    ensure!(
        controller.provider().fetch_count() == 0,
        "blank query fetched the index"
    );
    Ok(())
}

async fn case_insensitive<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let index = load_index(ctx).await?;
    let urls = |query: &str| -> Vec<String> {
        search_posts(index.posts(), query)
            .into_iter()
            .map(|post| post.url.clone())
            .collect()
    };
    let mismatched: Vec<&str> = index
        .posts()
        .iter()
        .filter(|post| {
            urls(&post.title.to_ascii_lowercase()) != urls(&post.title.to_ascii_uppercase())
        })
        .map(|post| post.title.as_str())
        .collect();
    ensure!(
        mismatched.is_empty(),
        "case changes the results for: {}",
        mismatched.join(", ")
    );
    Ok(())
}

async fn idempotent<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let index = load_index(ctx).await?;
    for post in index.posts() {
        let Some(word) = post.title.split_whitespace().next() else {
            continue;
        };
        let first: Vec<_> = search_posts(index.posts(), word)
            .into_iter()
            .cloned()
            .collect();
        let second = search_posts(&first, word);
        ensure!(
            second.len() == first.len(),
            "refiltering {word:?} went from {} to {} posts",
            first.len(),
            second.len()
        );
    }
    Ok(())
}

fn metachar_highlight() -> Result<()> {
    for query in METACHAR_QUERIES {
        let Some(highlighter) = Highlighter::new(query) else {
            bail!("no highlighter for {query:?}");
        };
        let text = format!("before {query} after");
        let matched: Vec<&str> = highlighter
            .segments(&text)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Match(run) => Some(run),
                Segment::Plain(_) => None,
            })
            .collect();
        ensure!(
            matched == [*query],
            "{query:?} highlighted as {matched:?}"
        );
    }
    Ok(())
}

async fn debounce_collapse<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let index = load_index(ctx).await?;
    let Some(post) = index.posts().iter().find(|post| !post.title.trim().is_empty()) else {
        bail!("no titled post to type");
    };
    let delay = ctx.config.debounce();
    ensure!(!delay.is_zero(), "debounce is disabled");

    let body = serde_json::to_string(index.posts())?;
    let scheduler = VirtualScheduler::new();
    let sink = CountingSink::default();
    let controller = SearchController::new(
        SearchIndexProvider::new(StaticSource::new(body), ctx.provider.path()),
        Debouncer::new(scheduler.clone(), delay),
        SilentView,
        sink.clone(),
    );

    let mut typed = String::new();
    for ch in post.title.chars() {
        typed.push(ch);
        controller.on_input(&typed);
        scheduler.advance(delay / 2);
    }
    ensure!(sink.count() == 0, "searched before typing paused");
    ensure!(scheduler.pending() == 1, "{} searches pending", scheduler.pending());

    scheduler.advance(delay);
    ensure!(sink.count() == 1, "{} searches ran for one burst", sink.count());
    let expected = ViewState::for_matches(search_posts(index.posts(), &typed).len());
    ensure!(
        controller.state() == expected,
        "view ended in {:?}, expected {expected:?}",
        controller.state()
    );
    Ok(())
}

async fn cache_reuse<S: IndexSource>(ctx: &ScenarioCtx<'_, S>) -> Result<()> {
    let first = load_index(ctx).await?;
    let second = load_index(ctx).await?;
    ensure!(first.len() == second.len(), "cached index changed size");
    ensure!(
        ctx.provider.fetch_count() == 1,
        "index fetched {} times",
        ctx.provider.fetch_count()
    );
    Ok(())
}

struct SilentView;

impl SearchView for SilentView {
    fn show_total(&self, _total: usize) {}
    fn show_all(&self) {}
    fn show_results(&self, _count: usize, _markup: &str) {}
    fn show_empty(&self) {}
}

#[derive(Clone, Default)]
struct CountingSink(Rc<Cell<usize>>);

impl CountingSink {
    fn count(&self) -> usize {
        self.0.get()
    }
}

impl EventSink for CountingSink {
    fn record(&self, event: &AnalyticsEvent) {
        if event.name == "search" {
            self.0.set(self.0.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../sitekit-web/static/search.json");

    async fn run(name: &str, body: &str) -> ScenarioResult {
        let provider = SearchIndexProvider::new(StaticSource::new(body), "/search.json");
        let config = SiteConfig::default();
        let ctx = ScenarioCtx {
            provider: &provider,
            config: &config,
        };
        run_scenario(name, &ctx).await
    }

    #[tokio::test]
    async fn every_scenario_passes_on_the_sample_site() {
        for (name, _) in list_scenarios() {
            let result = run(name, SAMPLE).await;
            assert!(result.passed, "{name}: {:?}", result.failures);
        }
    }

    #[tokio::test]
    async fn broken_index_fails_loading_scenarios() {
        let result = run("index-loads", "{not json").await;
        assert!(!result.passed);
        assert!(result.failures[0].contains("loading /search.json"));

        let empty = run("index-loads", "[]").await;
        assert!(!empty.passed);
    }

    #[tokio::test]
    async fn unknown_scenarios_fail() {
        let result = run("teleport", SAMPLE).await;
        assert!(!result.passed);
        assert_eq!(result.failures, vec!["Unknown scenario: teleport".to_string()]);
    }

    #[test]
    fn groups_expand_without_repeats() {
        let names = expand_scenarios(&["smoke".to_string(), "self-search".to_string()]);
        assert_eq!(names, vec!["index-loads", "self-search", "empty-query"]);

        let all = expand_scenarios(&["all".to_string()]);
        assert_eq!(all.len(), SCENARIOS.len());
    }
}
