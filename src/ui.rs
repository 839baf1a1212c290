use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::editor::NotesEditor;
use crate::llm::gemini::GeminiClient;
use crate::llm::session::{ChatSession, ERROR_PLACEHOLDER};
use crate::llm::TextGenerator;
use crate::models::{EntryField, EntryKind, PopupMode, Theme};
use crate::search;
use crate::store::{DashboardState, Store};

const TAB_HOME: usize = 0;
const TAB_LINKS: usize = 1;
const TAB_BOTS: usize = 2;
const TAB_CHAT: usize = 3;
const TAB_COUNT: usize = 4;

const NOT_CONFIGURED: &str = "The assistant is not configured. Set GEMINI_API_KEY and restart.";

/// Spawn the background worker that owns the HTTP client and its own
/// runtime. Requests and answers carry an epoch; an answer whose epoch
/// no longer matches belongs to a closed chat panel and is dropped.
fn spawn_chat_worker(reply_tx: Sender<(u64, String)>) -> Sender<(u64, String)> {
    let (req_tx, req_rx) = mpsc::channel::<(u64, String)>();
    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("failed to start the chat runtime: {}", e);
                return;
            }
        };
        let client = GeminiClient::from_env();
        for (epoch, prompt) in req_rx {
            let answer = match &client {
                Ok(client) => rt.block_on(client.generate(&prompt)).unwrap_or_else(|e| {
                    log::warn!("assistant request failed: {:#}", e);
                    ERROR_PLACEHOLDER.to_string()
                }),
                Err(_) => NOT_CONFIGURED.to_string(),
            };
            if reply_tx.send((epoch, answer)).is_err() {
                break;
            }
        }
    });
    req_tx
}

pub struct App {
    store: Store,
    pub state: DashboardState,
    pub current_tab: usize,
    pub edit_mode: bool,
    pub link_list_state: ListState,
    pub bot_list_state: ListState,
    pub popup_mode: PopupMode,
    pub input_buffer: String,
    pub search_buffer: String,
    pub notes_editor: Option<NotesEditor>,
    pub chat_session: ChatSession,
    pub chat_input: String,
    pub chat_pending: bool,
    chat_epoch: u64,
    chat_req_tx: Sender<(u64, String)>,
    chat_reply_rx: Receiver<(u64, String)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: Store) -> Self {
        let state = store.load();
        let (reply_tx, reply_rx) = mpsc::channel();
        let req_tx = spawn_chat_worker(reply_tx);
        App {
            store,
            state,
            current_tab: TAB_HOME,
            edit_mode: false,
            link_list_state: ListState::default(),
            bot_list_state: ListState::default(),
            popup_mode: PopupMode::None,
            input_buffer: String::new(),
            search_buffer: String::new(),
            notes_editor: None,
            chat_session: ChatSession::new(),
            chat_input: String::new(),
            chat_pending: false,
            chat_epoch: 0,
            chat_req_tx: req_tx,
            chat_reply_rx: reply_rx,
            should_quit: false,
        }
    }

    /// Every state change writes the whole state back; last write wins.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            log::warn!("failed to persist dashboard state: {:#}", e);
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % TAB_COUNT;
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = if self.current_tab == 0 {
            TAB_COUNT - 1
        } else {
            self.current_tab - 1
        };
    }

    fn kind_for_tab(&self) -> Option<EntryKind> {
        match self.current_tab {
            TAB_LINKS => Some(EntryKind::Shortcut),
            TAB_BOTS => Some(EntryKind::Assistant),
            _ => None,
        }
    }

    fn registry(&self, kind: EntryKind) -> &crate::registry::Registry {
        match kind {
            EntryKind::Shortcut => &self.state.shortcuts,
            EntryKind::Assistant => &self.state.assistants,
        }
    }

    fn list_state_mut(&mut self, kind: EntryKind) -> &mut ListState {
        match kind {
            EntryKind::Shortcut => &mut self.link_list_state,
            EntryKind::Assistant => &mut self.bot_list_state,
        }
    }

    fn selected(&self, kind: EntryKind) -> Option<usize> {
        match kind {
            EntryKind::Shortcut => self.link_list_state.selected(),
            EntryKind::Assistant => self.bot_list_state.selected(),
        }
    }

    pub fn next_item(&mut self) {
        if let Some(kind) = self.kind_for_tab() {
            let len = self.registry(kind).len();
            if len == 0 {
                return;
            }
            let i = match self.selected(kind) {
                Some(i) if i + 1 < len => i + 1,
                Some(_) => 0,
                None => 0,
            };
            self.list_state_mut(kind).select(Some(i));
        }
    }

    pub fn previous_item(&mut self) {
        if let Some(kind) = self.kind_for_tab() {
            let len = self.registry(kind).len();
            if len == 0 {
                return;
            }
            let i = match self.selected(kind) {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            self.list_state_mut(kind).select(Some(i));
        }
    }

    pub fn add_entry(&mut self) {
        let Some(kind) = self.kind_for_tab() else { return };
        let next = self.registry(kind).add(kind);
        let last = next.len() - 1;
        match kind {
            EntryKind::Shortcut => self.state.shortcuts = next,
            EntryKind::Assistant => self.state.assistants = next,
        }
        self.list_state_mut(kind).select(Some(last));
        self.persist();
    }

    pub fn delete_selected(&mut self) {
        let Some(kind) = self.kind_for_tab() else { return };
        let Some(i) = self.selected(kind) else { return };
        let Some(id) = self.registry(kind).get(i).map(|e| e.id.clone()) else {
            return;
        };
        let next = self.registry(kind).delete(&id);
        let len = next.len();
        match kind {
            EntryKind::Shortcut => self.state.shortcuts = next,
            EntryKind::Assistant => self.state.assistants = next,
        }
        let selection = if len == 0 { None } else { Some(i.min(len - 1)) };
        self.list_state_mut(kind).select(selection);
        self.persist();
    }

    /// Move the selected entry one step; the selection follows it.
    pub fn move_selected(&mut self, down: bool) {
        let Some(kind) = self.kind_for_tab() else { return };
        let Some(i) = self.selected(kind) else { return };
        let len = self.registry(kind).len();
        let j = if down {
            if i + 1 >= len {
                return;
            }
            i + 1
        } else {
            if i == 0 {
                return;
            }
            i - 1
        };
        let next = self.registry(kind).swap(i, j);
        match kind {
            EntryKind::Shortcut => self.state.shortcuts = next,
            EntryKind::Assistant => self.state.assistants = next,
        }
        self.list_state_mut(kind).select(Some(j));
        self.persist();
    }

    pub fn open_selected(&mut self) {
        let Some(kind) = self.kind_for_tab() else { return };
        let Some(i) = self.selected(kind) else { return };
        if let Some(entry) = self.registry(kind).get(i) {
            if let Err(e) = search::open_url(&entry.url) {
                log::warn!("{:#}", e);
            }
        }
    }

    pub fn open_field_editor(&mut self, field: EntryField) {
        let Some(kind) = self.kind_for_tab() else { return };
        let Some(i) = self.selected(kind) else { return };
        let Some((title, url)) = self
            .registry(kind)
            .get(i)
            .map(|e| (e.title.clone(), e.url.clone()))
        else {
            return;
        };
        self.input_buffer = match field {
            EntryField::Title => title,
            EntryField::Url => url,
        };
        self.popup_mode = match field {
            EntryField::Title => PopupMode::EditTitle,
            EntryField::Url => PopupMode::EditUrl,
        };
    }

    pub fn commit_field_edit(&mut self) {
        let field = match self.popup_mode {
            PopupMode::EditTitle => EntryField::Title,
            PopupMode::EditUrl => EntryField::Url,
            _ => return,
        };
        let Some(kind) = self.kind_for_tab() else { return };
        let Some(i) = self.selected(kind) else { return };
        if let Some(id) = self.registry(kind).get(i).map(|e| e.id.clone()) {
            let next = self
                .registry(kind)
                .update_field(kind, &id, field, &self.input_buffer);
            match kind {
                EntryKind::Shortcut => self.state.shortcuts = next,
                EntryKind::Assistant => self.state.assistants = next,
            }
            self.persist();
        }
        self.close_popup();
    }

    pub fn close_popup(&mut self) {
        self.popup_mode = PopupMode::None;
        self.input_buffer.clear();
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        self.persist();
    }

    pub fn cycle_engine(&mut self) {
        self.state.search_engine = self.state.search_engine.next();
        self.persist();
    }

    pub fn open_notes(&mut self) {
        self.notes_editor = Some(NotesEditor::new(&self.state.notes));
        self.popup_mode = PopupMode::Notes;
    }

    pub fn close_notes(&mut self, save: bool) {
        if let Some(editor) = self.notes_editor.take() {
            if save && editor.dirty {
                self.state.notes = editor.text();
                self.persist();
            }
        }
        self.popup_mode = PopupMode::None;
    }

    pub fn dispatch_search(&mut self) {
        let query = self.search_buffer.trim().to_string();
        if !query.is_empty() {
            if let Err(e) = search::dispatch(self.state.search_engine, &query) {
                log::warn!("{:#}", e);
            }
        }
        self.search_buffer.clear();
        self.popup_mode = PopupMode::None;
    }

    pub fn send_chat_message(&mut self) {
        if self.chat_pending {
            return;
        }
        let text = self.chat_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.chat_input.clear();
        self.chat_session.push_user(text.clone());
        self.chat_pending = true;
        if self.chat_req_tx.send((self.chat_epoch, text)).is_err() {
            // Worker gone; degrade to the placeholder immediately.
            self.chat_session.push_assistant(ERROR_PLACEHOLDER);
            self.chat_pending = false;
        }
    }

    /// Discard the open conversation. Any in-flight answer now carries a
    /// stale epoch and is dropped when it arrives.
    pub fn close_chat(&mut self) {
        self.chat_session = ChatSession::new();
        self.chat_input.clear();
        self.chat_pending = false;
        self.chat_epoch += 1;
    }

    pub fn drain_chat_replies(&mut self) {
        while let Ok((epoch, answer)) = self.chat_reply_rx.try_recv() {
            if epoch == self.chat_epoch {
                self.chat_session.push_assistant(answer);
                self.chat_pending = false;
            }
        }
    }

    fn base_style(&self) -> Style {
        match self.state.theme {
            Theme::Dark => Style::default().fg(Color::White),
            Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
        }
    }

    fn accent_style(&self) -> Style {
        match self.state.theme {
            Theme::Dark => Style::default().fg(Color::Cyan),
            Theme::Light => Style::default().fg(Color::Blue).bg(Color::White),
        }
    }
}

pub fn run_tui(store: Store) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.drain_chat_replies();
        terminal.draw(|f| ui(f, app))?;

        // The poll timeout doubles as the clock tick.
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.popup_mode {
        PopupMode::Notes => handle_notes_key(app, code, modifiers),
        PopupMode::Calendar => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c')) {
                app.close_popup();
            }
        }
        PopupMode::Search => match code {
            KeyCode::Esc => {
                app.search_buffer.clear();
                app.close_popup();
            }
            KeyCode::Enter => app.dispatch_search(),
            KeyCode::Backspace => {
                app.search_buffer.pop();
            }
            KeyCode::Char(c) => app.search_buffer.push(c),
            _ => {}
        },
        PopupMode::EditTitle | PopupMode::EditUrl => match code {
            KeyCode::Esc => app.close_popup(),
            KeyCode::Enter => app.commit_field_edit(),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Char(c) => app.input_buffer.push(c),
            _ => {}
        },
        PopupMode::None => handle_normal_key(app, code),
    }
}

fn handle_normal_key(app: &mut App, code: KeyCode) {
    // The chat tab owns plain characters for its input line.
    if app.current_tab == TAB_CHAT {
        match code {
            KeyCode::Tab => app.next_tab(),
            KeyCode::BackTab => app.previous_tab(),
            KeyCode::Esc => app.close_chat(),
            KeyCode::Enter => app.send_chat_message(),
            KeyCode::Backspace => {
                app.chat_input.pop();
            }
            KeyCode::Char(c) => app.chat_input.push(c),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.previous_tab(),
        KeyCode::Down => app.next_item(),
        KeyCode::Up => app.previous_item(),
        KeyCode::Char('t') if app.current_tab == TAB_HOME => app.toggle_theme(),
        KeyCode::Char('s') if app.current_tab == TAB_HOME => app.cycle_engine(),
        KeyCode::Char('n') if app.current_tab == TAB_HOME => app.open_notes(),
        KeyCode::Char('c') if app.current_tab == TAB_HOME => {
            app.popup_mode = PopupMode::Calendar;
        }
        KeyCode::Char('/') if app.current_tab == TAB_HOME => {
            app.popup_mode = PopupMode::Search;
        }
        KeyCode::Char('e') => app.edit_mode = !app.edit_mode,
        KeyCode::Enter if !app.edit_mode => app.open_selected(),
        KeyCode::Char('a') if app.edit_mode => app.add_entry(),
        KeyCode::Char('d') if app.edit_mode => app.delete_selected(),
        KeyCode::Char('t') if app.edit_mode => app.open_field_editor(EntryField::Title),
        KeyCode::Char('u') if app.edit_mode => app.open_field_editor(EntryField::Url),
        KeyCode::Char('j') if app.edit_mode => app.move_selected(true),
        KeyCode::Char('k') if app.edit_mode => app.move_selected(false),
        _ => {}
    }
}

fn handle_notes_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('s') => app.close_notes(true),
            KeyCode::Char('q') => app.close_notes(false),
            KeyCode::Char('x') => {
                if let Some(editor) = &mut app.notes_editor {
                    editor.clear();
                }
            }
            _ => {}
        }
        return;
    }
    let Some(editor) = &mut app.notes_editor else { return };
    match code {
        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_line_start(),
        KeyCode::End => editor.move_line_end(),
        KeyCode::PageUp => editor.page_up(20),
        KeyCode::PageDown => editor.page_down(20),
        KeyCode::Esc => app.close_notes(false),
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(f.area());

    let titles: Vec<Line> = ["Home", "Links", "Bots", "Chat"]
        .iter()
        .cloned()
        .map(Line::from)
        .collect();

    let mut header = String::from("homedeck");
    if app.edit_mode {
        header.push_str(" [edit]");
    }
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(header))
        .select(app.current_tab)
        .style(app.accent_style())
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Black),
        );

    f.render_widget(tabs, chunks[0]);

    match app.current_tab {
        TAB_HOME => render_home(f, app, chunks[1]),
        TAB_LINKS => render_entries(f, app, chunks[1], EntryKind::Shortcut),
        TAB_BOTS => render_entries(f, app, chunks[1], EntryKind::Assistant),
        TAB_CHAT => render_chat(f, app, chunks[1]),
        _ => {}
    }

    match app.popup_mode {
        PopupMode::Search => render_search_popup(f, app),
        PopupMode::EditTitle | PopupMode::EditUrl => render_field_popup(f, app),
        PopupMode::Calendar => render_calendar_popup(f, app),
        PopupMode::Notes => render_notes_editor(f, app),
        PopupMode::None => {}
    }
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let now = Local::now();
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(
            now.format("%H:%M").to_string(),
            app.base_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            now.format("%A, %B %-d").to_string(),
            app.base_style(),
        )),
    ])
    .block(Block::default().borders(Borders::ALL))
    .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(clock, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[1]);

    let calendar = Paragraph::new(month_lines(now.year(), now.month(), now.day()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(now.format("%B %Y").to_string()),
        )
        .style(app.base_style())
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(calendar, cols[0]);

    let notes_preview = if app.state.notes.is_empty() {
        "No notes yet. Press 'n' to open the pad.".to_string()
    } else {
        app.state.notes.clone()
    };
    let notes = Paragraph::new(notes_preview)
        .block(Block::default().borders(Borders::ALL).title("Quick Notes"))
        .wrap(Wrap { trim: false })
        .style(app.base_style());
    f.render_widget(notes, cols[1]);

    let hints = Paragraph::new(format!(
        "/: search ({})  n: notes  c: calendar  s: engine  t: theme ({})  Tab: next tab  q: quit",
        app.state.search_engine.name(),
        app.state.theme.as_str(),
    ))
    .block(Block::default().borders(Borders::ALL))
    .style(app.base_style());
    f.render_widget(hints, rows[2]);
}

/// Calendar body: weekday header plus one line per week, today marked.
fn month_lines(year: i32, month: u32, today: u32) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("Su Mo Tu We Th Fr Sa")];
    let first_weekday = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0);
    let days = days_in_month(year, month);

    let mut week: Vec<Span> = vec![Span::raw("   "); first_weekday];
    for day in 1..=days {
        let cell = format!("{:>2} ", day);
        if day == today {
            week.push(Span::styled(
                cell,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            week.push(Span::raw(cell));
        }
        if week.len() == 7 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }
    lines
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

fn render_entries(f: &mut Frame, app: &mut App, area: Rect, kind: EntryKind) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let registry = match kind {
        EntryKind::Shortcut => &app.state.shortcuts,
        EntryKind::Assistant => &app.state.assistants,
    };

    let items: Vec<ListItem> = registry
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(vec![Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.glyph.symbol()),
                    Style::default().fg(entry.style.color()),
                ),
                Span::styled(format!("{} ", entry.title), app.base_style()),
                Span::styled(entry.url.clone(), Style::default().fg(Color::DarkGray)),
            ])])
        })
        .collect();

    let title = match kind {
        EntryKind::Shortcut => "Shortcuts",
        EntryKind::Assistant => "AI Assistants",
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let list_state = match kind {
        EntryKind::Shortcut => &mut app.link_list_state,
        EntryKind::Assistant => &mut app.bot_list_state,
    };
    f.render_stateful_widget(list, chunks[0], list_state);

    let selected = match kind {
        EntryKind::Shortcut => app.link_list_state.selected(),
        EntryKind::Assistant => app.bot_list_state.selected(),
    };
    let registry = match kind {
        EntryKind::Shortcut => &app.state.shortcuts,
        EntryKind::Assistant => &app.state.assistants,
    };
    let info_text = if let Some(entry) = selected.and_then(|i| registry.get(i)) {
        format!(
            "Title: {}\nUrl: {}\nBadge: {} / {:?}\n\nControls:\n• Enter: open in browser\n• e: toggle edit mode\n{}",
            entry.title,
            if entry.url.is_empty() { "(empty)" } else { &entry.url },
            entry.glyph.symbol(),
            entry.style,
            edit_mode_hint(app.edit_mode),
        )
    } else {
        format!(
            "Nothing selected\n\nControls:\n• ↑/↓: navigate\n• Enter: open in browser\n• e: toggle edit mode\n{}",
            edit_mode_hint(app.edit_mode),
        )
    };

    let info = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .style(app.base_style());
    f.render_widget(info, chunks[1]);
}

fn edit_mode_hint(edit_mode: bool) -> &'static str {
    if edit_mode {
        "• a: add  d: delete  t: title  u: url  j/k: move"
    } else {
        "• q: quit"
    }
}

fn render_chat(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for message in app.chat_session.messages() {
        let (label, style) = match message.role {
            crate::models::ChatRole::User => ("you", app.accent_style()),
            crate::models::ChatRole::Assistant => {
                ("assistant", Style::default().fg(Color::Green))
            }
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", label),
            style.add_modifier(Modifier::BOLD),
        )));
        for text_line in message.text.lines() {
            lines.push(Line::from(format!("  {}", text_line)));
        }
        lines.push(Line::from(""));
    }
    if app.chat_pending {
        lines.push(Line::from(Span::styled(
            "assistant is thinking…",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(
            "Ask anything. Esc discards the conversation.",
        ));
    }

    let transcript = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Chat"))
        .wrap(Wrap { trim: false })
        .style(app.base_style());
    f.render_widget(transcript, chunks[0]);

    let input_title = if app.chat_pending {
        "Message (waiting for reply…)"
    } else {
        "Message (Enter to send)"
    };
    let input = Paragraph::new(app.chat_input.as_str())
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .style(if app.chat_pending {
            Style::default().fg(Color::DarkGray)
        } else {
            app.base_style()
        });
    f.render_widget(input, chunks[1]);
}

fn render_search_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(60, 20, f.area());
    let block = Block::default()
        .title(format!("Search {}", app.state.search_engine.name()))
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));
    let content = Paragraph::new(format!(
        "{}\n\nPress ENTER to search in the browser\nPress ESC to cancel",
        app.search_buffer
    ))
    .block(block)
    .alignment(ratatui::layout::Alignment::Center)
    .style(Style::default().fg(Color::White));
    f.render_widget(content, popup_area);
}

fn render_field_popup(f: &mut Frame, app: &App) {
    let title = match app.popup_mode {
        PopupMode::EditTitle => "Edit Title",
        _ => "Edit Url",
    };
    let popup_area = centered_rect(60, 20, f.area());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));
    let content = Paragraph::new(format!(
        "{}\n\nPress ENTER to save\nPress ESC to cancel",
        app.input_buffer
    ))
    .block(block)
    .alignment(ratatui::layout::Alignment::Center)
    .style(Style::default().fg(Color::White));
    f.render_widget(content, popup_area);
}

fn render_calendar_popup(f: &mut Frame, app: &App) {
    let now = Local::now();
    let popup_area = centered_rect(50, 50, f.area());
    let block = Block::default()
        .title(now.format("%B %Y").to_string())
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));
    let mut lines = month_lines(now.year(), now.month(), now.day());
    lines.push(Line::from(""));
    lines.push(Line::from("Press ESC to close"));
    let content = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center)
        .style(app.base_style());
    f.render_widget(content, popup_area);
}

fn render_notes_editor(f: &mut Frame, app: &mut App) {
    let Some(editor) = &mut app.notes_editor else { return };

    // Opaque backdrop so the dashboard does not bleed through.
    f.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        f.area(),
    );

    let editor_area = centered_rect(80, 80, f.area());
    let block = Block::default()
        .title("Quick Notes — Ctrl+S: save | Esc: discard | Ctrl+X: clear")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(editor_area);
    f.render_widget(block, editor_area);

    let visible_height = inner.height as usize;
    editor.adjust_scroll(visible_height);

    let start = editor.scroll;
    let end = (start + visible_height).min(editor.lines.len());
    let mut lines: Vec<Line> = Vec::new();
    for (i, text) in editor.lines[start..end].iter().enumerate() {
        let row = start + i;
        if row == editor.row {
            let chars: Vec<char> = text.chars().collect();
            let mut spans = Vec::new();
            if editor.col > 0 {
                let before: String = chars[..editor.col.min(chars.len())].iter().collect();
                spans.push(Span::raw(before));
            }
            let cursor_char = chars
                .get(editor.col)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(Color::Cyan).fg(Color::Black),
            ));
            if editor.col + 1 <= chars.len() {
                let after: String = chars[(editor.col + 1).min(chars.len())..].iter().collect();
                spans.push(Span::raw(after));
            }
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(text.clone()));
        }
    }

    let content = Paragraph::new(lines).style(Style::default().fg(Color::White).bg(Color::Black));
    f.render_widget(content, inner);
}

// Helper function to create centered rectangles for popups
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::days_in_month;
    use super::month_lines;

    #[test]
    fn month_lengths_account_for_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn month_grid_has_a_header_and_enough_weeks() {
        // August 2026 starts on a Saturday and has 31 days: 6 week rows.
        let lines = month_lines(2026, 8, 24);
        assert_eq!(lines.len(), 1 + 6);
    }
}
