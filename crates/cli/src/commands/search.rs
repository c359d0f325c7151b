//! `raindeck search` — Search Raindrop bookmarks from the command line.

use clap::Args;
use raindeck_config::AppConfig;
use raindeck_core::bookmark::{SearchFilter, SearchResult};
use raindeck_tools::RaindropClient;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Only bookmarks with this tag (without the leading #)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Only bookmarks created after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Only bookmarks created before this date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Collection to search (0 = all collections)
    #[arg(short, long)]
    pub collection: Option<i64>,

    /// Maximum number of bookmarks (capped at 50)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn to_filter(&self, config: &AppConfig) -> Result<SearchFilter, raindeck_core::BookmarkError> {
        SearchFilter::parse(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.tag.as_deref(),
            self.collection.unwrap_or(config.raindrop.default_collection),
            self.limit.unwrap_or(config.raindrop.default_limit),
        )
    }
}

pub async fn run(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if !config.raindrop.has_token() {
        eprintln!();
        eprintln!("  ERROR: No Raindrop access token configured!");
        eprintln!();
        eprintln!("  Set RAINDROP_ACCESS_TOKEN, or add it to your config file:");
        eprintln!("    {}", AppConfig::config_path().display());
        eprintln!("    [raindrop]");
        eprintln!("    access_token = \"...\"");
        eprintln!();
        eprintln!("  Create a test token at: https://app.raindrop.io/settings/integrations");
        eprintln!();
    }

    let filter = args.to_filter(&config)?;
    let client = RaindropClient::from_config(&config.raindrop);
    let result = client.search_bookmarks(&filter).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render(&filter, &result));
    }

    Ok(())
}

/// Human-readable listing of a search result.
pub fn render(filter: &SearchFilter, result: &SearchResult) -> String {
    let mut out = String::new();
    let query = filter.query();
    let query = if query.is_empty() { "(everything)" } else { query.as_str() };
    out.push_str(&format!(
        "🔖 {} of {} bookmarks for {query}\n\n",
        result.items.len(),
        result.count
    ));

    for item in &result.items {
        out.push_str(&format!(
            "  {}  {}\n",
            item.created.format("%Y-%m-%d"),
            if item.title.is_empty() { "(untitled)" } else { item.title.as_str() }
        ));
        out.push_str(&format!("              {}\n", item.link));
        if !item.tags.is_empty() {
            let tags: Vec<String> = item.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(&format!("              {}\n", tags.join(" ")));
        }
        if let Some(excerpt) = item.excerpt.as_deref().filter(|e| !e.is_empty()) {
            out.push_str(&format!("              {}\n", truncate(excerpt, 100)));
        }
    }

    if (result.items.len() as u64) < result.count {
        out.push_str(&format!(
            "\n  … {} more not shown (first page only)\n",
            result.count - result.items.len() as u64
        ));
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raindeck_core::bookmark::BookmarkRecord;

    fn record(title: &str, tags: &[&str]) -> BookmarkRecord {
        BookmarkRecord {
            id: "1".into(),
            title: title.into(),
            link: "https://example.com".into(),
            created: chrono::DateTime::from_timestamp(1_735_732_800, 0).unwrap(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            excerpt: None,
            cover: None,
            collection: serde_json::Map::new(),
        }
    }

    #[test]
    fn args_fall_back_to_config_defaults() {
        let mut config = AppConfig::default();
        config.raindrop.default_collection = 5;
        config.raindrop.default_limit = 25;
        let args = SearchArgs {
            tag: Some("python".into()),
            start_date: Some("2025-01-01".into()),
            end_date: None,
            collection: None,
            limit: None,
            json: false,
        };
        let filter = args.to_filter(&config).unwrap();
        assert_eq!(filter.collection_id, 5);
        assert_eq!(filter.limit, 25);
        assert_eq!(filter.query(), "#python created:>2025-01-01");
    }

    #[test]
    fn bad_date_is_rejected() {
        let args = SearchArgs {
            tag: None,
            start_date: None,
            end_date: Some("tomorrow".into()),
            collection: None,
            limit: None,
            json: false,
        };
        assert!(args.to_filter(&AppConfig::default()).is_err());
    }

    #[test]
    fn render_lists_items_and_remainder() {
        let result = SearchResult {
            items: vec![record("Rust book", &["rust", "books"]), record("", &[])],
            count: 5,
        };
        let text = render(&SearchFilter::new().with_tag("rust"), &result);
        assert!(text.contains("2 of 5 bookmarks for #rust"));
        assert!(text.contains("2025-01-01  Rust book"));
        assert!(text.contains("#rust #books"));
        assert!(text.contains("(untitled)"));
        assert!(text.contains("3 more not shown"));
    }

    #[test]
    fn render_empty_filter() {
        let text = render(&SearchFilter::new(), &SearchResult::default());
        assert!(text.contains("0 of 0 bookmarks for (everything)"));
        assert!(!text.contains("more not shown"));
    }

    #[test]
    fn truncate_long_excerpt() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
