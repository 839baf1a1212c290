use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The selectable search engines, each with a fixed query prefix. The
/// chosen engine is part of the persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Google,
    Bing,
    DuckDuckGo,
    Youtube,
}

pub const ALL_ENGINES: [SearchEngine; 4] = [
    SearchEngine::Google,
    SearchEngine::Bing,
    SearchEngine::DuckDuckGo,
    SearchEngine::Youtube,
];

impl SearchEngine {
    pub fn id(&self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::Bing => "bing",
            SearchEngine::DuckDuckGo => "duckduckgo",
            SearchEngine::Youtube => "youtube",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchEngine::Google => "Google",
            SearchEngine::Bing => "Bing",
            SearchEngine::DuckDuckGo => "DuckDuckGo",
            SearchEngine::Youtube => "YouTube",
        }
    }

    pub fn query_prefix(&self) -> &'static str {
        match self {
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::Bing => "https://www.bing.com/search?q=",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/?q=",
            SearchEngine::Youtube => "https://www.youtube.com/results?search_query=",
        }
    }

    pub fn parse(s: &str) -> Option<SearchEngine> {
        ALL_ENGINES.into_iter().find(|e| e.id() == s)
    }

    pub fn next(self) -> SearchEngine {
        let i = ALL_ENGINES.iter().position(|e| *e == self).unwrap_or(0);
        ALL_ENGINES[(i + 1) % ALL_ENGINES.len()]
    }
}

/// Concatenate the engine's query prefix with the percent-encoded query.
pub fn build_search_url(engine: SearchEngine, query: &str) -> String {
    format!("{}{}", engine.query_prefix(), urlencoding::encode(query))
}

/// Open a search for `query` in the system browser. Empty queries are
/// ignored.
pub fn dispatch(engine: SearchEngine, query: &str) -> Result<()> {
    if query.is_empty() {
        return Ok(());
    }
    let url = build_search_url(engine, query);
    open::that(&url).with_context(|| format!("failed to open browser for {}", url))
}

/// Open an entry's destination in the system browser. Partial urls get a
/// default scheme so the browser resolves them as hosts, not files.
pub fn open_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Ok(());
    }
    let target = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    open::that(&target).with_context(|| format!("failed to open browser for {}", target))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::build_search_url;
    use super::SearchEngine;

    #[test]
    fn queries_are_percent_encoded_onto_the_engine_prefix() {
        assert_eq!(
            build_search_url(SearchEngine::Google, "rust tui dashboard"),
            "https://www.google.com/search?q=rust%20tui%20dashboard"
        );
        assert_eq!(
            build_search_url(SearchEngine::DuckDuckGo, "a&b=c"),
            "https://duckduckgo.com/?q=a%26b%3Dc"
        );
        assert_eq!(
            build_search_url(SearchEngine::Youtube, "lofi"),
            "https://www.youtube.com/results?search_query=lofi"
        );
    }

    #[test]
    fn engine_ids_round_trip() {
        for engine in super::ALL_ENGINES {
            assert_eq!(SearchEngine::parse(engine.id()), Some(engine));
        }
        assert_eq!(SearchEngine::parse("altavista"), None);
    }

    #[test]
    fn next_cycles_through_all_engines() {
        let mut engine = SearchEngine::Google;
        for _ in 0..4 {
            engine = engine.next();
        }
        assert_eq!(engine, SearchEngine::Google);
    }
}
