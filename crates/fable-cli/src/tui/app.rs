//! TUI application state and main event loop.

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tui_input::Input;

use fable_core::{Persona, Summarizer, Summary};

use super::events::{InputAction, PipelineEvent};
use super::ui;

/// Where the pipeline is for the current submission. The form is only
/// editable in Idle; there is no cancellation once a submission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Summarizing,
}

/// TUI application state
pub struct TuiApp {
    pub model: String,
    pub input: Input,
    pub persona: Persona,
    pub phase: Phase,
    pub tick: usize,
    pub summary: Option<Summary>,
    pub result_collapsed: bool,
    pub validation_error: Option<String>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(model: &str, persona: Persona) -> Self {
        Self {
            model: model.to_string(),
            input: Input::default(),
            persona,
            phase: Phase::Idle,
            tick: 0,
            summary: None,
            result_collapsed: false,
            validation_error: None,
            status_message: None,
            status_is_error: false,
            should_quit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Validate the form and, if it passes, move into Searching and
    /// hand back the submission payload. A blank title sets the inline
    /// validation error and returns None; nothing downstream runs.
    pub fn submit(&mut self) -> Option<(String, Persona)> {
        if self.is_busy() {
            return None;
        }
        let title = self.input.value().trim().to_string();
        if title.is_empty() {
            self.validation_error = Some("Please enter a title.".to_string());
            return None;
        }

        self.phase = Phase::Searching;
        self.summary = None;
        self.result_collapsed = false;
        self.validation_error = None;
        self.status_message = None;
        self.status_is_error = false;
        Some((title, self.persona))
    }

    /// Handle a pipeline event
    pub fn handle_pipeline_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Searching => {
                self.phase = Phase::Searching;
            }
            PipelineEvent::Summarizing => {
                self.phase = Phase::Summarizing;
            }
            PipelineEvent::Done { summary } => {
                self.phase = Phase::Idle;
                self.summary = Some(summary);
            }
            PipelineEvent::Failed { message } => {
                self.phase = Phase::Idle;
                self.status_message = Some(format!("Search failed: {}", message));
                self.status_is_error = true;
            }
        }
    }

    /// Handle input action
    pub fn handle_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::Char(c) => {
                let cursor = self.input.cursor();
                let value = self.input.value().to_string();
                let mut chars: Vec<char> = value.chars().collect();
                chars.insert(cursor, c);
                let new_value: String = chars.into_iter().collect();
                self.input = Input::new(new_value).with_cursor(cursor + 1);
                self.validation_error = None;
            }
            InputAction::Backspace => {
                let cursor = self.input.cursor();
                if cursor > 0 {
                    let value = self.input.value().to_string();
                    let mut chars: Vec<char> = value.chars().collect();
                    chars.remove(cursor - 1);
                    let new_value: String = chars.into_iter().collect();
                    self.input = Input::new(new_value).with_cursor(cursor - 1);
                }
            }
            InputAction::Delete => {
                let cursor = self.input.cursor();
                let value = self.input.value().to_string();
                let chars: Vec<char> = value.chars().collect();
                if cursor < chars.len() {
                    let mut chars = chars;
                    chars.remove(cursor);
                    let new_value: String = chars.into_iter().collect();
                    self.input = Input::new(new_value).with_cursor(cursor);
                }
            }
            InputAction::Left => {
                let cursor = self.input.cursor();
                if cursor > 0 {
                    let value = self.input.value().to_string();
                    self.input = Input::new(value).with_cursor(cursor - 1);
                }
            }
            InputAction::Right => {
                let cursor = self.input.cursor();
                let value = self.input.value().to_string();
                let len = value.chars().count();
                if cursor < len {
                    self.input = Input::new(value).with_cursor(cursor + 1);
                }
            }
            InputAction::Home => {
                let value = self.input.value().to_string();
                self.input = Input::new(value).with_cursor(0);
            }
            InputAction::End => {
                let value = self.input.value().to_string();
                let len = value.chars().count();
                self.input = Input::new(value).with_cursor(len);
            }
            InputAction::DeleteWord => {
                let value = self.input.value().to_string();
                let cursor = self.input.cursor();
                if cursor > 0 {
                    let before: Vec<char> = value.chars().take(cursor).collect();
                    let mut new_cursor = cursor;
                    while new_cursor > 0 && before[new_cursor - 1].is_whitespace() {
                        new_cursor -= 1;
                    }
                    while new_cursor > 0 && !before[new_cursor - 1].is_whitespace() {
                        new_cursor -= 1;
                    }
                    let new_value: String = value
                        .chars()
                        .take(new_cursor)
                        .chain(value.chars().skip(cursor))
                        .collect();
                    self.input = Input::new(new_value).with_cursor(new_cursor);
                }
            }
            InputAction::NextPersona => {
                self.persona = next_persona(self.persona, 1);
            }
            InputAction::PrevPersona => {
                self.persona = next_persona(self.persona, Persona::ALL.len() - 1);
            }
            InputAction::ToggleResult => {
                if self.summary.is_some() {
                    self.result_collapsed = !self.result_collapsed;
                }
            }
            InputAction::Quit => {
                self.should_quit = true;
            }
            InputAction::Submit => {
                // Handled in the main loop; a task has to be spawned
            }
        }
    }
}

fn next_persona(current: Persona, step: usize) -> Persona {
    let idx = Persona::ALL
        .iter()
        .position(|p| *p == current)
        .unwrap_or(0);
    Persona::ALL[(idx + step) % Persona::ALL.len()]
}

/// Set up panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
        original_hook(panic_info);
    }));
}

/// Run the form TUI.
pub async fn run_tui(summarizer: Arc<Summarizer>, default_persona: Persona) -> Result<()> {
    setup_panic_hook();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = summarizer.config().model.clone();
    let mut app = TuiApp::new(&model, default_persona);

    // Channel for pipeline events; one join point for the whole pipeline
    let (pipeline_tx, mut pipeline_rx) = mpsc::channel::<PipelineEvent>(16);

    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::render(&app, f))?;

        if app.is_busy() {
            app.tick = app.tick.wrapping_add(1);
        }

        // Drain pipeline events first (non-blocking)
        while let Ok(event) = pipeline_rx.try_recv() {
            app.handle_pipeline_event(event);
        }

        // Poll for keyboard events
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match key_to_action(key, app.is_busy()) {
                    Some(InputAction::Submit) => {
                        if let Some((title, persona)) = app.submit() {
                            let summarizer = Arc::clone(&summarizer);
                            let tx = pipeline_tx.clone();

                            tokio::spawn(async move {
                                run_pipeline(summarizer, title, persona, tx).await;
                            });
                        }
                    }
                    Some(action) => {
                        app.handle_input_action(action);
                    }
                    None => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Drive one submission through the pipeline, reporting each phase.
async fn run_pipeline(
    summarizer: Arc<Summarizer>,
    title: String,
    persona: Persona,
    tx: mpsc::Sender<PipelineEvent>,
) {
    let _ = tx.send(PipelineEvent::Searching).await;

    match summarizer.search_content(&title).await {
        Ok(content) => {
            let _ = tx.send(PipelineEvent::Summarizing).await;
            let summary = summarizer.summarize_content(&title, persona, &content).await;
            let _ = tx.send(PipelineEvent::Done { summary }).await;
        }
        Err(err) => {
            let _ = tx
                .send(PipelineEvent::Failed {
                    message: err.to_string(),
                })
                .await;
        }
    }
}

/// Convert key event to input action
fn key_to_action(key: KeyEvent, is_busy: bool) -> Option<InputAction> {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(InputAction::Quit),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(InputAction::Quit),
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(InputAction::Quit),

        // Submit
        (KeyCode::Enter, KeyModifiers::NONE) => Some(InputAction::Submit),

        // Persona selection
        (KeyCode::Tab, KeyModifiers::NONE) if !is_busy => Some(InputAction::NextPersona),
        (KeyCode::BackTab, _) if !is_busy => Some(InputAction::PrevPersona),
        (KeyCode::Up, KeyModifiers::NONE) if !is_busy => Some(InputAction::PrevPersona),
        (KeyCode::Down, KeyModifiers::NONE) if !is_busy => Some(InputAction::NextPersona),

        // Collapse/expand summary (Ctrl+T)
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Some(InputAction::ToggleResult),

        // Navigation
        (KeyCode::Left, KeyModifiers::NONE) => Some(InputAction::Left),
        (KeyCode::Right, KeyModifiers::NONE) => Some(InputAction::Right),
        (KeyCode::Home, KeyModifiers::NONE) => Some(InputAction::Home),
        (KeyCode::End, KeyModifiers::NONE) => Some(InputAction::End),

        // Editing
        (KeyCode::Backspace, KeyModifiers::NONE) => Some(InputAction::Backspace),
        (KeyCode::Delete, KeyModifiers::NONE) => Some(InputAction::Delete),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => Some(InputAction::DeleteWord),

        // Characters (only when the form is editable)
        (KeyCode::Char(c), KeyModifiers::NONE) if !is_busy => Some(InputAction::Char(c)),
        (KeyCode::Char(c), KeyModifiers::SHIFT) if !is_busy => Some(InputAction::Char(c)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_blank_title_blocks_submission() {
        for blank in ["", "   "] {
            let mut app = TuiApp::new("gpt-4", Persona::Psychologist);
            app.input = Input::new(blank.to_string());

            assert_eq!(app.submit(), None);
            assert_eq!(app.validation_error.as_deref(), Some("Please enter a title."));
            assert_eq!(app.phase, Phase::Idle);
        }
    }

    #[test]
    fn test_valid_title_starts_searching() {
        let mut app = TuiApp::new("gpt-4", Persona::Educator);
        app.input = Input::new("  Snow White  ".to_string());

        let (title, persona) = app.submit().unwrap();
        assert_eq!(title, "Snow White");
        assert_eq!(persona, Persona::Educator);
        assert_eq!(app.phase, Phase::Searching);

        // A second submit while busy is a no-op
        assert_eq!(app.submit(), None);
    }

    #[test]
    fn test_persona_cycling_wraps() {
        let mut app = TuiApp::new("gpt-4", Persona::Psychologist);
        app.handle_input_action(InputAction::NextPersona);
        assert_eq!(app.persona, Persona::Educator);
        app.handle_input_action(InputAction::NextPersona);
        assert_eq!(app.persona, Persona::Psychologist);
        app.handle_input_action(InputAction::PrevPersona);
        assert_eq!(app.persona, Persona::Educator);
    }

    #[test]
    fn test_typing_clears_validation_error() {
        let mut app = TuiApp::new("gpt-4", Persona::Psychologist);
        app.validation_error = Some("Please enter a title.".to_string());
        app.handle_input_action(InputAction::Char('C'));
        assert!(app.validation_error.is_none());
        assert_eq!(app.input.value(), "C");
    }

    #[test]
    fn test_wide_character_editing_does_not_panic() {
        // Double-width characters occupy two columns but one char slot;
        // editing must index by chars, not columns.
        let mut app = TuiApp::new("gpt-4", Persona::Psychologist);
        app.handle_input_action(InputAction::Char('雪'));
        app.handle_input_action(InputAction::Char('女'));
        assert_eq!(app.input.value(), "雪女");
        assert_eq!(app.input.cursor(), 2);

        app.handle_input_action(InputAction::Char('!'));
        assert_eq!(app.input.value(), "雪女!");

        app.handle_input_action(InputAction::Backspace);
        app.handle_input_action(InputAction::Backspace);
        assert_eq!(app.input.value(), "雪");

        app.handle_input_action(InputAction::Left);
        app.handle_input_action(InputAction::Delete);
        assert_eq!(app.input.value(), "");
    }

    #[test]
    fn test_delete_word_with_wide_characters() {
        let mut app = TuiApp::new("gpt-4", Persona::Psychologist);
        app.input = Input::new("雪女 物語".to_string());

        app.handle_input_action(InputAction::DeleteWord);
        assert_eq!(app.input.value(), "雪女 ");

        app.handle_input_action(InputAction::DeleteWord);
        assert_eq!(app.input.value(), "");
    }

    #[test]
    fn test_pipeline_events_drive_phase() {
        let mut app = TuiApp::new("gpt-4", Persona::Educator);
        app.input = Input::new("Snow White".to_string());
        app.submit().unwrap();
        assert_eq!(app.phase, Phase::Searching);

        app.handle_pipeline_event(PipelineEvent::Summarizing);
        assert_eq!(app.phase, Phase::Summarizing);

        app.handle_pipeline_event(PipelineEvent::Done {
            summary: Summary::Text("done".to_string()),
        });
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.summary, Some(Summary::Text("done".to_string())));
    }

    #[test]
    fn test_search_failure_is_shown_not_fatal() {
        let mut app = TuiApp::new("gpt-4", Persona::Educator);
        app.input = Input::new("Rapunzel".to_string());
        app.submit().unwrap();
        app.handle_pipeline_event(PipelineEvent::Failed {
            message: "Network error: connection refused".to_string(),
        });
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.status_is_error);
        assert!(app.status_message.as_deref().unwrap().contains("connection refused"));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_typing_is_ignored_while_busy() {
        assert_eq!(key_to_action(key(KeyCode::Char('a'), KeyModifiers::NONE), true), None);
        assert_eq!(
            key_to_action(key(KeyCode::Char('a'), KeyModifiers::NONE), false),
            Some(InputAction::Char('a'))
        );
    }

    #[test]
    fn test_toggle_result_requires_summary() {
        let mut app = TuiApp::new("gpt-4", Persona::Educator);
        app.handle_input_action(InputAction::ToggleResult);
        assert!(!app.result_collapsed);

        app.summary = Some(Summary::NoResults);
        app.handle_input_action(InputAction::ToggleResult);
        assert!(app.result_collapsed);
    }

    #[tokio::test]
    async fn test_run_pipeline_reports_phases_in_order() {
        use fable_core::testing::{MockProvider, MockSearch};
        use fable_core::SummarizerConfig;

        let search = Arc::new(MockSearch::new());
        search.queue_result("some tale content");
        let provider = Arc::new(MockProvider::new());
        provider.queue_response("SUMMARY_TEXT");

        let summarizer = Arc::new(Summarizer::new(
            search,
            provider,
            SummarizerConfig::default(),
        ));
        let (tx, mut rx) = mpsc::channel(16);

        run_pipeline(summarizer, "Snow White".to_string(), Persona::Educator, tx).await;

        assert!(matches!(rx.recv().await, Some(PipelineEvent::Searching)));
        assert!(matches!(rx.recv().await, Some(PipelineEvent::Summarizing)));
        match rx.recv().await {
            Some(PipelineEvent::Done { summary }) => {
                assert_eq!(summary, Summary::Text("SUMMARY_TEXT".to_string()));
            }
            other => panic!("expected Done, got {:?}", other),
        }
    }
}
