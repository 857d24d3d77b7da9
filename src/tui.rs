//! Terminal front end: decodes key presses into intents, draws the three
//! panes plus the status bar, and releases the terminal while an editor
//! runs.

use crate::config::Config;
use crate::controller::{
    Flow, Intent, Mode, NavigationController, Pane, RenderSink, StatusLine,
};
use crate::editor::{EditorLauncher, SystemEditor};
use crate::store::{FsNoteStore, NoteStore};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use std::error::Error;
use std::io::{self, Stdout};
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;
use tracing::{debug, error};

type PanicHook = dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static;

const KEY_HINTS: &str =
    "j/k move  h/l switch pane  enter edit  n new note  q quit";
const TOPIC_PROMPT: &str = "new note: ";

/// Everything currently on screen.
#[derive(Debug, Clone)]
pub struct Panes {
    pub notebooks: Vec<String>,
    pub notebook_selected: Option<usize>,
    pub notes: Vec<String>,
    pub note_selected: Option<usize>,
    pub preview: String,
    pub focus: Pane,
    pub status: StatusLine,
}

impl Default for Panes {
    fn default() -> Self {
        Self {
            notebooks: Vec::new(),
            notebook_selected: None,
            notes: Vec::new(),
            note_selected: None,
            preview: String::new(),
            focus: Pane::Notebooks,
            status: StatusLine::Keys,
        }
    }
}

/// Render sink that keeps the pane contents for the next draw and owns the
/// terminal mode switches around editor runs.
#[derive(Debug, Default)]
pub struct TerminalSink {
    panes: Panes,
    needs_clear: bool,
}

impl TerminalSink {
    pub fn panes(&self) -> &Panes {
        &self.panes
    }

    /// True once after every resume; the whole screen must be repainted.
    pub fn take_needs_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_clear)
    }
}

impl RenderSink for TerminalSink {
    fn notebooks(&mut self, names: Vec<String>, selected: Option<usize>) {
        self.panes.notebooks = names;
        self.panes.notebook_selected = selected;
    }

    fn notes(&mut self, names: Vec<String>, selected: Option<usize>) {
        self.panes.notes = names;
        self.panes.note_selected = selected;
    }

    fn preview(&mut self, text: String) {
        self.panes.preview = text;
    }

    fn focus(&mut self, pane: Pane) {
        self.panes.focus = pane;
    }

    fn status(&mut self, status: StatusLine) {
        self.panes.status = status;
    }

    fn suspend(&mut self) -> Result<(), Box<dyn Error>> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Box<dyn Error>> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        enable_raw_mode()?;
        self.needs_clear = true;
        Ok(())
    }
}

/// Map a key press to an intent for the current mode.
pub fn intent_for(mode: Mode, key: KeyEvent) -> Option<Intent> {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == KeyCode::Char('c');
    if mode == Mode::EnteringTopic {
        return match key.code {
            _ if ctrl_c => Some(Intent::Cancel),
            KeyCode::Enter => Some(Intent::Submit),
            KeyCode::Esc => Some(Intent::Cancel),
            KeyCode::Backspace => Some(Intent::Erase),
            KeyCode::Char(c) => Some(Intent::Input(c)),
            _ => None,
        };
    }
    match key.code {
        _ if ctrl_c => Some(Intent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Char('h') | KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Char('k') | KeyCode::Up => Some(Intent::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Intent::Down),
        KeyCode::Char('n') => Some(Intent::NewNote),
        KeyCode::Enter => Some(Intent::Activate),
        _ => None,
    }
}

/// Run the interactive browser until the user quits. Notebooks and the
/// first notebook's notes are loaded before the terminal is touched, so a
/// broken notes directory never shows a half-drawn screen.
pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let store = FsNoteStore::new(&config.notes_dir);
    let editor = SystemEditor::new(&config.editor);
    let mut controller =
        NavigationController::new(store, editor, TerminalSink::default());
    controller.start()?;

    let mut terminal = setup_terminal()?;
    let original_hook: Arc<PanicHook> = Arc::from(panic::take_hook());
    let hook = Arc::clone(&original_hook);
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        hook(info);
    }));

    let result = event_loop(&mut controller, &mut terminal);
    let teardown = teardown_terminal(&mut terminal);
    panic::set_hook(Box::new(move |info| original_hook(info)));
    session_outcome(result, teardown)
}

/// The event loop's error wins; a teardown failure is only logged.
fn session_outcome(
    result: Result<(), Box<dyn Error>>,
    teardown: Result<(), Box<dyn Error>>,
) -> Result<(), Box<dyn Error>> {
    if let Err(err) = teardown {
        error!(%err, "terminal teardown failed");
    }
    result
}

fn event_loop<S, E, B>(
    controller: &mut NavigationController<S, E, TerminalSink>,
    terminal: &mut Terminal<B>,
) -> Result<(), Box<dyn Error>>
where
    S: NoteStore,
    E: EditorLauncher,
    B: Backend,
{
    loop {
        if controller.sink_mut().take_needs_clear() {
            terminal.clear()?;
        }
        terminal.draw(|f| draw(f, controller.sink().panes()))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(intent) = intent_for(controller.mode(), key) else {
            continue;
        };
        if controller.handle(intent)? == Flow::Quit {
            debug!("quit");
            return Ok(());
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn teardown_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub fn draw(f: &mut ratatui::Frame<'_>, panes: &Panes) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(50),
        ])
        .split(rows[0]);

    draw_list(
        f,
        columns[0],
        "Notebooks",
        &panes.notebooks,
        panes.notebook_selected,
        panes.focus == Pane::Notebooks,
    );
    draw_list(
        f,
        columns[1],
        "Notes",
        &panes.notes,
        panes.note_selected,
        panes.focus == Pane::Notes,
    );

    let preview = Paragraph::new(panes.preview.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Preview"));
    f.render_widget(preview, columns[2]);

    let status = match &panes.status {
        StatusLine::Keys => {
            Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)))
        }
        StatusLine::Topic(topic) => Line::from(vec![
            Span::styled(
                TOPIC_PROMPT,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(topic.as_str()),
        ]),
    };
    f.render_widget(Paragraph::new(status), rows[1]);
    if let StatusLine::Topic(topic) = &panes.status {
        let x = topic_cursor_x(rows[1], topic);
        f.set_cursor_position((x, rows[1].y));
    }
}

/// Column of the text cursor after the typed topic, kept inside `area`.
fn topic_cursor_x(area: Rect, topic: &str) -> u16 {
    let typed = u16::try_from(TOPIC_PROMPT.len() + topic.chars().count())
        .unwrap_or(u16::MAX);
    area.x
        .saturating_add(typed)
        .min(area.right().saturating_sub(1))
}

fn draw_list(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    names: &[String],
    selected: Option<usize>,
    focused: bool,
) {
    let accent = if focused { Color::Cyan } else { Color::DarkGray };
    let items: Vec<ListItem> =
        names.iter().map(|n| ListItem::new(n.as_str())).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let highlight = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default();
    state.select(selected);
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(panes: &Panes) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal.draw(|f| draw(f, panes)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_browsing_keys() {
        let mode = Mode::BrowsingNotebooks;
        assert_eq!(intent_for(mode, key(KeyCode::Char('l'))), Some(Intent::MoveRight));
        assert_eq!(intent_for(mode, key(KeyCode::Char('h'))), Some(Intent::MoveLeft));
        assert_eq!(intent_for(mode, key(KeyCode::Down)), Some(Intent::Down));
        assert_eq!(intent_for(mode, key(KeyCode::Char('n'))), Some(Intent::NewNote));
        assert_eq!(intent_for(mode, key(KeyCode::Esc)), Some(Intent::Quit));
        assert_eq!(intent_for(mode, key(KeyCode::Enter)), Some(Intent::Activate));
        assert_eq!(intent_for(mode, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_topic_entry_keys() {
        let mode = Mode::EnteringTopic;
        assert_eq!(intent_for(mode, key(KeyCode::Char('q'))), Some(Intent::Input('q')));
        assert_eq!(intent_for(mode, key(KeyCode::Enter)), Some(Intent::Submit));
        assert_eq!(intent_for(mode, key(KeyCode::Esc)), Some(Intent::Cancel));
        assert_eq!(intent_for(mode, key(KeyCode::Backspace)), Some(Intent::Erase));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(intent_for(mode, ctrl_c), Some(Intent::Cancel));
    }

    #[test]
    fn test_draw_shows_all_panes() {
        let mut sink = TerminalSink::default();
        sink.notebooks(vec!["work".into(), "home".into()], Some(0));
        sink.notes(vec!["2024-03-02-design.md".into()], Some(0));
        sink.preview("hello preview".into());
        let out = screen(sink.panes());
        assert!(out.contains("Notebooks"));
        assert!(out.contains("work"));
        assert!(out.contains("2024-03-02-design.md"));
        assert!(out.contains("hello preview"));
        assert!(out.contains("q quit"));
    }

    #[test]
    fn test_draw_topic_status() {
        let mut sink = TerminalSink::default();
        sink.status(StatusLine::Topic("ideas".into()));
        let out = screen(sink.panes());
        assert!(out.contains("new note: ideas"));
        assert!(!out.contains("q quit"));
    }

    #[test]
    fn test_topic_cursor_stays_inside_status_bar() {
        let area = Rect::new(0, 11, 100, 1);
        assert_eq!(topic_cursor_x(area, "ideas"), 15);
        let pasted = "x".repeat(70_000);
        assert_eq!(topic_cursor_x(area, &pasted), 99);
        let offset = Rect::new(u16::MAX - 10, 0, 10, 1);
        assert_eq!(topic_cursor_x(offset, &pasted), u16::MAX - 1);
    }

    #[test]
    fn test_loop_error_survives_teardown_failure() {
        let outcome = session_outcome(Err("editor failed".into()), Err("tty gone".into()));
        assert_eq!(outcome.unwrap_err().to_string(), "editor failed");
        assert!(session_outcome(Ok(()), Err("tty gone".into())).is_ok());
    }

    #[test]
    fn test_needs_clear_is_consumed() {
        let mut sink = TerminalSink::default();
        assert!(!sink.take_needs_clear());
        sink.needs_clear = true;
        assert!(sink.take_needs_clear());
        assert!(!sink.take_needs_clear());
    }
}
