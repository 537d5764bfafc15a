use clap::Args;
use content_scoring::config::AppConfig;
use content_scoring::error::AppError;
use content_scoring::guide::{GuideCache, GuideSpec, InMemoryGuideCache};
use content_scoring::text::{normalize, KeywordMatcher};
use content_scoring::{AnalysisResult, GuideAnalyzer};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Guide payload (JSON) the text is graded against
    #[arg(long)]
    pub(crate) guide: PathBuf,
    /// Text to grade, or `-` to read standard input
    #[arg(long)]
    pub(crate) text: PathBuf,
    /// Pretty-print the JSON report
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// JSON array of `{"guide": ..., "text": ...}` path pairs
    #[arg(long)]
    pub(crate) manifest: PathBuf,
    /// Pretty-print the JSON reports
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HighlightArgs {
    #[arg(long)]
    pub(crate) guide: PathBuf,
    /// Text to search, or `-` to read standard input
    #[arg(long)]
    pub(crate) text: PathBuf,
    /// Characters of surrounding text shown on each side of a match
    #[arg(long, default_value_t = 30)]
    pub(crate) context: usize,
}

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// Raw text to normalize
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
struct BatchEntry {
    guide: PathBuf,
    text: PathBuf,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    guide: PathBuf,
    text: PathBuf,
    result: AnalysisResult,
}

pub(crate) fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> Result<(), AppError> {
    let guide = GuideSpec::from_path(config.guides.resolve(&args.guide))?;
    let text = read_text(&args.text)?;

    let result = GuideAnalyzer::new(&guide).analyze(&text);
    info!(score_seo = result.score.score_seo, "analysis complete");
    print_json(&result, args.pretty)
}

pub(crate) fn run_batch(config: &AppConfig, args: BatchArgs) -> Result<(), AppError> {
    let entries: Vec<BatchEntry> = serde_json::from_reader(std::fs::File::open(&args.manifest)?)?;
    let cache = InMemoryGuideCache::new(Some(config.guides.cache_ttl));
    let mut reports = Vec::with_capacity(entries.len());

    for entry in entries {
        let path = config.guides.resolve(&entry.guide);
        let key = path.to_string_lossy().into_owned();
        let guide = cache.get_or_try_insert_with(&key, || GuideSpec::from_path(&path))?;
        let text = read_text(&entry.text)?;

        reports.push(BatchReport {
            result: GuideAnalyzer::new(&guide).analyze(&text),
            guide: entry.guide,
            text: entry.text,
        });
    }

    info!(texts = reports.len(), guides = cache.len(), "batch complete");
    print_json(&reports, args.pretty)
}

pub(crate) fn run_highlight(config: &AppConfig, args: HighlightArgs) -> Result<(), AppError> {
    let guide = GuideSpec::from_path(config.guides.resolve(&args.guide))?;
    let text = read_text(&args.text)?;

    for requirement in &guide.requirements {
        if requirement.keyword.trim().is_empty() {
            continue;
        }
        let spans = KeywordMatcher::new(&requirement.keyword).locate(&text);
        println!(
            "- {} ({}): {} occurrence(s), target {}-{}",
            requirement.keyword,
            requirement.group.label(),
            spans.len(),
            requirement.min_freq,
            requirement.max_freq
        );
        for span in spans {
            println!("    {}", excerpt(&text, span, args.context));
        }
    }

    Ok(())
}

pub(crate) fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    println!("{}", normalize(&args.text));
    Ok(())
}

fn read_text(path: &Path) -> Result<String, AppError> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Match wrapped in `[...]` with up to `context` characters on each side,
/// newlines flattened.
fn excerpt(text: &str, span: Range<usize>, context: usize) -> String {
    let start = text[..span.start]
        .char_indices()
        .rev()
        .take(context)
        .last()
        .map_or(span.start, |(offset, _)| offset);
    let end = text[span.end..]
        .char_indices()
        .nth(context)
        .map_or(text.len(), |(offset, _)| span.end + offset);

    let rendered = format!(
        "{}{}[{}]{}{}",
        if start > 0 { "..." } else { "" },
        &text[start..span.start],
        &text[span.clone()],
        &text[span.end..end],
        if end < text.len() { "..." } else { "" },
    );
    rendered.replace(['\n', '\r'], " ")
}
