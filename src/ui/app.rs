// Main TUI application using ratatui
// Handles the terminal interface, user input, and display

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::player::jukebox::Jukebox;
use crate::youtube::links::{embed_url, thumbnail_url};

const INPUT_HINT: &str =
    "Paste YouTube URL (e.g., https://www.youtube.com/watch?v=dQw4w9WgXcQ)";
const NORMAL_HELP: &str =
    "[i]Add URL [n]Next [p]Prev [j/k]Select [Enter]Play selected [d]Remove [o]Open in browser [q]Quit";
const EDITING_HELP: &str = "Type or paste a link, [Enter]Add to queue [Esc]Done";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppMode {
    Normal,
    Editing,
}

// ==========================================
// TERMINAL GUARD
// ==========================================
// Raw mode and the alternate screen are switched on by enter() and switched
// off again when the guard is dropped, whichever way run() exits.
struct TerminalGuard<W: io::Write> {
    out: W,
}

impl<W: io::Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // From here on, dropping the guard undoes whatever did get enabled
        let mut guard = TerminalGuard { out };
        execute!(guard.out, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl<W: io::Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to disable raw mode");
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, DisableBracketedPaste, Show) {
            warn!(error = %e, "failed to restore terminal screen");
        }
    }
}

pub struct JamApp {
    jukebox: Jukebox,
    mode: AppMode,
    selected_queue_item: usize,
    status_message: String,
    should_quit: bool,
    browser_rx: mpsc::UnboundedReceiver<String>,
    browser_tx: mpsc::UnboundedSender<String>,
}

impl JamApp {
    pub fn new(jukebox: Jukebox) -> Self {
        let (browser_tx, browser_rx) = mpsc::unbounded_channel();

        // Land in the input box when there is nothing to play yet
        let mode = if jukebox.queue().is_empty() {
            AppMode::Editing
        } else {
            AppMode::Normal
        };

        JamApp {
            jukebox,
            mode,
            selected_queue_item: 0,
            status_message: String::new(),
            should_quit: false,
            browser_rx,
            browser_tx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let guard = TerminalGuard::enter(io::stdout())?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let result = self.event_loop(&mut terminal).await;

        drop(guard);
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw_ui(f))?;

            // Outcome of a browser launch started with 'o'
            if let Ok(message) = self.browser_rx.try_recv() {
                self.status_message = message;
            }

            if event::poll(std::time::Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_input(key.code)
                    }
                    Event::Paste(text) if self.mode == AppMode::Editing => {
                        // Pasted newlines would otherwise end up inside the URL
                        self.jukebox.push_str(text.trim_end_matches(['\r', '\n']));
                    }
                    _ => {}
                }
            }

            if self.should_quit {
                info!("quitting");
                return Ok(());
            }

            tokio::task::yield_now().await;
        }
    }

    fn draw_ui(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Min(5),
            ])
            .split(frame.size());

        // Header
        let title = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.mode {
                AppMode::Normal => NORMAL_HELP.to_string(),
                AppMode::Editing => EDITING_HELP.to_string(),
            }
        };
        let header = Paragraph::new(title)
            .block(Block::default().borders(Borders::ALL).title("YouTube Jam"));
        frame.render_widget(header, chunks[0]);

        // Input field, with the rejection message under it
        let cursor_mark = if self.mode == AppMode::Editing { "_" } else { "" };
        let mut input_text = format!("{}{}", self.jukebox.input(), cursor_mark);
        if let Some(error) = self.jukebox.error() {
            input_text.push('\n');
            input_text.push_str(&error.to_string());
        }
        let input_style = if self.mode == AppMode::Editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(input_text).style(input_style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(INPUT_HINT),
        );
        frame.render_widget(input, chunks[1]);

        // Now playing
        let player = Paragraph::new(self.now_playing_text())
            .block(Block::default().borders(Borders::ALL).title(self.now_playing_title()));
        frame.render_widget(player, chunks[2]);

        // Queue
        let queue = self.jukebox.queue();
        let queue_items: Vec<ListItem> = queue
            .ids()
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let marker = if i == queue.cursor() { "▶" } else { " " };
                let content = format!(
                    "{} YouTube Video {}  ID: {}  {}",
                    marker,
                    i + 1,
                    id,
                    thumbnail_url(id)
                );
                let style = if i == queue.cursor() {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(content).style(style)
            })
            .collect();

        let queue_list = List::new(queue_items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Your Queue ({} videos)", queue.len())),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default();
        if !queue.is_empty() && self.mode == AppMode::Normal {
            list_state.select(Some(self.selected_queue_item));
        }
        frame.render_stateful_widget(queue_list, chunks[3], &mut list_state);
    }

    fn now_playing_title(&self) -> String {
        let queue = self.jukebox.queue();
        if queue.is_empty() {
            "Now Playing".to_string()
        } else {
            format!("Now Playing ({} of {})", queue.cursor() + 1, queue.len())
        }
    }

    fn now_playing_text(&self) -> String {
        let queue = self.jukebox.queue();
        match queue.select_current() {
            Some(id) => {
                let prev = if queue.has_previous() { "[p] Previous" } else { "" };
                let next = if queue.has_next() { "[n] Next" } else { "" };
                format!(
                    "Embed: {}\nThumbnail: {}\n{}  {}",
                    embed_url(id),
                    thumbnail_url(id),
                    prev,
                    next
                )
            }
            None => "Queue is empty - add a YouTube link above".to_string(),
        }
    }

    fn handle_input(&mut self, key: KeyCode) {
        // Clear status message on any key press (except when typing)
        if self.mode == AppMode::Normal {
            self.status_message.clear();
        }

        match self.mode {
            AppMode::Editing => match key {
                KeyCode::Char(c) => self.jukebox.push_char(c),
                KeyCode::Backspace => self.jukebox.pop_char(),
                KeyCode::Enter => self.submit_input(),
                KeyCode::Esc => {
                    self.mode = AppMode::Normal;
                    self.status_message.clear();
                }
                _ => {}
            },
            AppMode::Normal => match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('i') | KeyCode::Char('/') => self.mode = AppMode::Editing,
                KeyCode::Char('n') => self.play_next(),
                KeyCode::Char('p') => self.play_previous(),
                KeyCode::Char('j') | KeyCode::Down => self.next_queue_item(),
                KeyCode::Char('k') | KeyCode::Up => self.prev_queue_item(),
                KeyCode::Enter => self.play_selected(),
                KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
                KeyCode::Char('o') => self.open_in_browser(),
                _ => {}
            },
        }
    }

    fn submit_input(&mut self) {
        match self.jukebox.submit() {
            Ok(id) => {
                self.status_message = format!(
                    "Added {} to queue! ({} total)",
                    id,
                    self.jukebox.queue().len()
                );
            }
            // The error itself is drawn under the input field
            Err(_) => self.status_message.clear(),
        }
    }

    fn play_next(&mut self) {
        if !self.jukebox.queue_mut().advance() {
            self.status_message = "Already at the last video".to_string();
        }
    }

    fn play_previous(&mut self) {
        if !self.jukebox.queue_mut().retreat() {
            self.status_message = "Already at the first video".to_string();
        }
    }

    fn next_queue_item(&mut self) {
        let len = self.jukebox.queue().len();
        if len > 0 {
            self.selected_queue_item = (self.selected_queue_item + 1) % len;
        }
    }

    fn prev_queue_item(&mut self) {
        let len = self.jukebox.queue().len();
        if len > 0 {
            if self.selected_queue_item == 0 {
                self.selected_queue_item = len - 1;
            } else {
                self.selected_queue_item -= 1;
            }
        }
    }

    fn play_selected(&mut self) {
        // Only rows that exist are ever handed to jump_to
        if self.selected_queue_item < self.jukebox.queue().len() {
            self.jukebox.queue_mut().jump_to(self.selected_queue_item);
        }
    }

    fn remove_selected(&mut self) {
        let index = self.selected_queue_item;
        if let Some(id) = self.jukebox.queue_mut().remove_at(index) {
            self.status_message = format!("Removed {} from queue", id);
        }
        let len = self.jukebox.queue().len();
        self.selected_queue_item = self.selected_queue_item.min(len.saturating_sub(1));
    }

    fn open_in_browser(&mut self) {
        let Some(id) = self.jukebox.queue().select_current() else {
            self.status_message = "Queue is empty!".to_string();
            return;
        };

        let url = embed_url(id);
        self.status_message = "Opening browser...".to_string();

        // Launching the browser can block, keep it off the UI loop
        let tx = self.browser_tx.clone();
        tokio::task::spawn_blocking(move || {
            let message = match open::that(&url) {
                Ok(()) => format!("Opened {}", url),
                Err(e) => {
                    warn!(url = %url, error = %e, "failed to open browser");
                    format!("Failed to open browser: {}. Visit: {}", e, url)
                }
            };
            let _ = tx.send(message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(app: &mut JamApp, text: &str) {
        for c in text.chars() {
            app.handle_input(KeyCode::Char(c));
        }
    }

    fn app_with(urls: &[&str]) -> JamApp {
        let mut jukebox = Jukebox::new();
        for url in urls {
            jukebox.submit_text(url).unwrap();
        }
        JamApp::new(jukebox)
    }

    #[test]
    fn starts_in_input_mode_when_queue_is_empty() {
        let app = app_with(&[]);
        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.now_playing_title(), "Now Playing");
    }

    #[test]
    fn typing_and_enter_queues_video() {
        let mut app = app_with(&[]);
        type_text(&mut app, "https://youtu.be/dQw4w9WgXcQ");
        app.handle_input(KeyCode::Enter);

        assert_eq!(app.jukebox.queue().len(), 1);
        assert_eq!(app.jukebox.input(), "");
        assert_eq!(app.status_message, "Added dQw4w9WgXcQ to queue! (1 total)");
        assert_eq!(app.now_playing_title(), "Now Playing (1 of 1)");
    }

    #[test]
    fn bad_link_shows_error_and_keeps_text() {
        let mut app = app_with(&[]);
        type_text(&mut app, "qq");
        app.handle_input(KeyCode::Enter);

        assert!(app.jukebox.queue().is_empty());
        assert_eq!(app.jukebox.input(), "qq");
        assert!(app.jukebox.error().is_some());
        // 'q' while typing is text, not quit
        assert!(!app.should_quit);
    }

    #[test]
    fn next_and_previous_respect_boundaries() {
        let mut app = app_with(&[
            "https://youtu.be/aaaaaaaaaaa",
            "https://youtu.be/bbbbbbbbbbb",
        ]);
        assert_eq!(app.mode, AppMode::Normal);

        app.handle_input(KeyCode::Char('p'));
        assert_eq!(app.jukebox.queue().cursor(), 0);
        assert_eq!(app.status_message, "Already at the first video");

        app.handle_input(KeyCode::Char('n'));
        app.handle_input(KeyCode::Char('n'));
        assert_eq!(app.jukebox.queue().cursor(), 1);
        assert_eq!(app.now_playing_title(), "Now Playing (2 of 2)");
    }

    #[test]
    fn enter_on_selected_row_jumps_there() {
        let mut app = app_with(&[
            "https://youtu.be/aaaaaaaaaaa",
            "https://youtu.be/bbbbbbbbbbb",
            "https://youtu.be/ccccccccccc",
        ]);
        app.handle_input(KeyCode::Char('k'));
        assert_eq!(app.selected_queue_item, 2);

        app.handle_input(KeyCode::Enter);
        assert_eq!(app.jukebox.queue().cursor(), 2);
        assert_eq!(
            app.jukebox.queue().select_current().map(|id| id.as_str()),
            Some("ccccccccccc")
        );
    }

    #[test]
    fn removing_last_row_clamps_selection() {
        let mut app = app_with(&[
            "https://youtu.be/aaaaaaaaaaa",
            "https://youtu.be/bbbbbbbbbbb",
        ]);
        app.handle_input(KeyCode::Char('j'));
        app.handle_input(KeyCode::Char('d'));
        assert_eq!(app.jukebox.queue().len(), 1);
        assert_eq!(app.selected_queue_item, 0);

        app.handle_input(KeyCode::Char('d'));
        assert!(app.jukebox.queue().is_empty());
        assert_eq!(app.selected_queue_item, 0);
        assert_eq!(app.now_playing_text(), "Queue is empty - add a YouTube link above");

        // Nothing left to remove
        app.handle_input(KeyCode::Delete);
        assert!(app.jukebox.queue().is_empty());
    }

    #[test]
    fn now_playing_shows_embed_and_thumbnail() {
        let app = app_with(&["https://www.youtube.com/watch?v=dQw4w9WgXcQ"]);
        let text = app.now_playing_text();
        assert!(text.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(text.contains("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"));
    }

    #[test]
    fn open_with_empty_queue_reports_it() {
        let mut app = app_with(&[]);
        app.handle_input(KeyCode::Esc);
        app.handle_input(KeyCode::Char('o'));
        assert_eq!(app.status_message, "Queue is empty!");
    }

    #[test]
    fn dropping_terminal_guard_restores_screen() {
        let mut out = Vec::new();
        drop(TerminalGuard { out: &mut out });

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "alternate screen left");
        assert!(written.contains("\x1b[?2004l"), "bracketed paste off");
        assert!(written.contains("\x1b[?25h"), "cursor shown");
    }

    #[test]
    fn q_quits_in_normal_mode() {
        let mut app = app_with(&["https://youtu.be/aaaaaaaaaaa"]);
        app.handle_input(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
