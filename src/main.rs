mod classify;
mod cli;
mod editor;
mod llm;
mod models;
mod registry;
mod search;
mod store;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use models::{EntryField, EntryKind, Theme};
use store::Store;
use ui::run_tui;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = Store::open_default()?;

    match cli.command {
        Some(Commands::Links) => {
            let state = store.load();
            for entry in state.shortcuts.entries() {
                println!("{}  {}  {}", entry.id, entry.title, entry.url);
            }
        }
        Some(Commands::LinkAdd { url, title }) => {
            add_entry(&store, EntryKind::Shortcut, &url, title.as_deref())?;
        }
        Some(Commands::LinkRm { id }) => {
            let mut state = store.load();
            if state.shortcuts.find(&id).is_none() {
                println!("No shortcut with id '{}'", id);
                return Ok(());
            }
            state.shortcuts = state.shortcuts.delete(&id);
            store.save(&state)?;
        }
        Some(Commands::Bots) => {
            let state = store.load();
            for entry in state.assistants.entries() {
                println!("{}  {}  {}", entry.id, entry.title, entry.url);
            }
        }
        Some(Commands::BotAdd { url, title }) => {
            add_entry(&store, EntryKind::Assistant, &url, title.as_deref())?;
        }
        Some(Commands::BotRm { id }) => {
            let mut state = store.load();
            if state.assistants.find(&id).is_none() {
                println!("No assistant with id '{}'", id);
                return Ok(());
            }
            state.assistants = state.assistants.delete(&id);
            store.save(&state)?;
        }
        Some(Commands::Theme { theme }) => {
            let mut state = store.load();
            match theme {
                None => println!("{}", state.theme.as_str()),
                Some(value) => match Theme::parse(&value) {
                    Some(theme) => {
                        state.theme = theme;
                        store.save(&state)?;
                    }
                    None => println!("Unknown theme '{}' (expected dark or light)", value),
                },
            }
        }
        Some(Commands::Engine { engine }) => {
            let mut state = store.load();
            match engine {
                None => println!("{}", state.search_engine.id()),
                Some(value) => match search::SearchEngine::parse(&value) {
                    Some(engine) => {
                        state.search_engine = engine;
                        store.save(&state)?;
                    }
                    None => println!(
                        "Unknown engine '{}' (expected google, bing, duckduckgo or youtube)",
                        value
                    ),
                },
            }
        }
        Some(Commands::Notes) => {
            let state = store.load();
            if !state.notes.is_empty() {
                println!("{}", state.notes);
            }
        }
        Some(Commands::Search { query }) => {
            let state = store.load();
            search::dispatch(state.search_engine, &query.join(" "))?;
        }
        Some(Commands::Ask { question }) => {
            let question = question.join(" ");
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let client = llm::gemini::GeminiClient::from_env()?;
                let mut session = llm::session::ChatSession::new();
                session.send(&client, &question).await;
                if let Some(answer) = session.messages().last() {
                    println!("{}", answer.text);
                }
                Ok::<(), anyhow::Error>(())
            })?;
        }
        Some(Commands::Completions { shell }) => {
            use clap_complete::{generate, Shell};
            let shell_enum = match shell.to_lowercase().as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "elvish" => Shell::Elvish,
                "powershell" => Shell::PowerShell,
                other => {
                    println!("Unsupported shell: {}", other);
                    return Ok(());
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "homedeck", &mut std::io::stdout());
        }
        Some(Commands::Tui) | None => {
            run_tui(store)?;
        }
    }

    Ok(())
}

fn add_entry(store: &Store, kind: EntryKind, url: &str, title: Option<&str>) -> Result<()> {
    let mut state = store.load();
    let registry = match kind {
        EntryKind::Shortcut => &mut state.shortcuts,
        EntryKind::Assistant => &mut state.assistants,
    };
    let mut next = registry.add(kind);
    let id = next
        .get(next.len() - 1)
        .map(|e| e.id.clone())
        .unwrap_or_default();
    next = next.update_field(kind, &id, EntryField::Url, url);
    if let Some(title) = title {
        next = next.update_field(kind, &id, EntryField::Title, title);
    }
    *registry = next;
    store.save(&state)?;
    println!("Added {}", id);
    Ok(())
}
