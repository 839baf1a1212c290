use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List shortcuts in display order
    Links,
    /// Add a shortcut for a url (title inferred unless given)
    LinkAdd {
        #[arg(value_name = "URL")]
        url: String,
        /// Explicit title instead of the inferred one
        #[arg(short = 't', long = "title")]
        title: Option<String>,
    },
    /// Remove a shortcut by id
    LinkRm {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List assistant launchers in display order
    Bots,
    /// Add an assistant launcher for a url
    BotAdd {
        #[arg(value_name = "URL")]
        url: String,
        #[arg(short = 't', long = "title")]
        title: Option<String>,
    },
    /// Remove an assistant launcher by id
    BotRm {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Show or set the theme (dark|light)
    Theme {
        #[arg(value_name = "THEME")]
        theme: Option<String>,
    },
    /// Show or set the search engine (google|bing|duckduckgo|youtube)
    Engine {
        #[arg(value_name = "ENGINE")]
        engine: Option<String>,
    },
    /// Print the quick notes
    Notes,
    /// Open a web search for the query in the browser
    Search {
        #[arg(value_name = "QUERY")]
        query: Vec<String>,
    },
    /// Ask the assistant a one-shot question
    Ask {
        #[arg(value_name = "QUESTION")]
        question: Vec<String>,
    },
    /// Launch the dashboard TUI
    Tui,
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}
