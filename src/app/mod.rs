//! Application core — state, lifecycle, and event dispatch.
//!
//! The [`App`] struct holds all runtime state and is the single entry point
//! for the rest of the binary.  Concerns are delegated to focused
//! submodules:
//!
//! | Module     | Responsibility                                  |
//! |------------|-------------------------------------------------|
//! | `actions`  | Buttons: add entry, preview, save               |
//! | `agents`   | `AgentConfig`, `Update`, and the reducer        |
//! | `focus`    | Focus order across inputs and buttons           |
//! | `input`    | Text-input editing (cursor, insert, etc.)       |
//! | `logging`  | `LogLevel`, `LogLine`                           |
//! | `preview`  | Read-only preview model with fallbacks          |
//! | `ui`       | TUI rendering                                   |

mod actions;
mod agents;
mod focus;
mod input;
mod logging;
mod preview;
mod ui;

use anyhow::Result;
use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::{MAX_LOGS, SAVE_DIR_ENV};
use crate::store::AgentStore;

pub use self::agents::{AgentConfig, Update};
use self::focus::{Focus, Target};
use self::logging::{LogLevel, LogLine};

// ── Application state ────────────────────────────────────────────────

/// Top-level application state.
///
/// Fields use `pub(crate)` visibility so that the sibling submodules
/// (`actions`, `input`, `ui`, …) can access them directly.
pub struct App {
    pub(crate) config: AgentConfig,
    pub(crate) show_preview: bool,
    pub(crate) focus: Focus,
    pub(crate) cursor: usize,
    pub(crate) store: AgentStore,
    pub(crate) logs: Vec<LogLine>,
    pub(crate) form_scroll: u16,
    pub(crate) should_quit: bool,
}

// ── Lifecycle ────────────────────────────────────────────────────────

impl App {
    /// Create an application that saves to the configured directory.
    pub fn new() -> Self {
        Self::with_store(AgentStore::load())
    }

    /// Create an application around an explicit store.
    pub fn with_store(store: AgentStore) -> Self {
        let mut app = App {
            config: AgentConfig::default(),
            show_preview: false,
            focus: Focus::Name,
            cursor: 0,
            store,
            logs: Vec::new(),
            form_scroll: 0,
            should_quit: false,
        };

        match app.store.dir() {
            Some(dir) => {
                let message = format!(
                    "Saving agents to {} (from {}).",
                    dir.display(),
                    app.store.source().label(),
                );
                app.log(LogLevel::Info, message);
            }
            None => app.log(
                LogLevel::Warn,
                format!("Save disabled: no data directory. Set {SAVE_DIR_ENV} to enable it."),
            ),
        }
        app.log(
            LogLevel::Info,
            "Tab moves between fields. Ctrl+P previews, Ctrl+S saves.".to_string(),
        );
        app
    }

    /// Whether the user has requested to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply one update to the configuration.
    pub fn dispatch(&mut self, update: Update) {
        self.config = std::mem::take(&mut self.config).apply(update);
    }
}

// ── Event handling ───────────────────────────────────────────────────

impl App {
    /// Route a terminal event to the appropriate handler.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key)?;
            }
        }
        Ok(())
    }

    /// Dispatch a key press to input editing, focus movement, or actions.
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers == KeyModifiers::CONTROL {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('l') => self.logs.clear(),
                KeyCode::Char('p') => self.request_preview(),
                KeyCode::Char('s') => self.save(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.set_focus(self.focus.next(&self.config)),
            KeyCode::BackTab => self.set_focus(self.focus.prev(&self.config)),
            KeyCode::Up => {
                if !(self.focus.is_text_area() && self.move_cursor_up()) {
                    self.set_focus(self.focus.prev(&self.config));
                }
            }
            KeyCode::Down => {
                if !(self.focus.is_text_area() && self.move_cursor_down()) {
                    self.set_focus(self.focus.next(&self.config));
                }
            }
            KeyCode::Enter => match self.focus.target() {
                Target::Button => self.activate(),
                _ if self.focus.is_text_area() => self.insert_char('\n'),
                _ => self.set_focus(self.focus.next(&self.config)),
            },
            KeyCode::Char(ch) if types_text(key.modifiers) => self.insert_char(ch),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.move_cursor_home(),
            KeyCode::End => self.move_cursor_end(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }
}

/// Plain and shifted keys type text, as does AltGr, which terminals report
/// as Ctrl+Alt.  Other Ctrl or Alt chords do not.
fn types_text(modifiers: KeyModifiers) -> bool {
    let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
    modifiers.contains(altgr) || !modifiers.intersects(altgr)
}

// ── Logging ──────────────────────────────────────────────────────────

/// Log a `Warn`/`Error` message, attaching `[file:line]` in debug-logs builds.
///
/// In release (no `debug-logs` feature) this behaves like `self.log()`.
///
/// ```ignore
/// log_src!(self, LogLevel::Error, format!("Save failed: {err:#}"));
/// ```
macro_rules! log_src {
    ($app:expr, $level:expr, $msg:expr) => {{
        #[cfg(feature = "debug-logs")]
        {
            let loc = format!("{}:{}", file!(), line!());
            $app.log_with_src($level, $msg, &loc);
        }
        #[cfg(not(feature = "debug-logs"))]
        {
            $app.log($level, $msg);
        }
    }};
}
pub(crate) use log_src;

impl App {
    /// Append a message to the activity log.
    pub(crate) fn log(&mut self, level: LogLevel, message: String) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.logs.push(LogLine {
            timestamp,
            level,
            message,
        });
        if self.logs.len() > MAX_LOGS {
            let overflow = self.logs.len() - MAX_LOGS;
            self.logs.drain(0..overflow);
        }
    }

    /// Append a message with a source location suffix (debug-logs builds only).
    #[cfg(feature = "debug-logs")]
    pub(crate) fn log_with_src(&mut self, level: LogLevel, message: String, src: &str) {
        let tagged = match level {
            LogLevel::Warn | LogLevel::Error => format!("{message}  [{src}]"),
            _ => message,
        };
        self.log(level, tagged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_app() -> (App, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let app = App::with_store(AgentStore::at(tmp.path()));
        (app, tmp)
    }

    pub(crate) fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    pub(crate) fn ctrl(app: &mut App, ch: char) {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
    }

    pub(crate) fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, "Helper");
        assert_eq!(app.config.name, "Helper");

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Finds docs");
        assert_eq!(app.config.description, "Finds docs");
        assert_eq!(app.config.name, "Helper");
    }

    #[test]
    fn editing_keys_work_mid_string() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, "Hlper");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Right);
        type_str(&mut app, "e");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.config.name, "elpe");
    }

    #[test]
    fn unicode_input_is_accepted() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, "Zoë");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.config.name, "Zë");
    }

    #[test]
    fn enter_in_text_area_inserts_newline() {
        let (mut app, _tmp) = test_app();
        app.set_focus(Focus::Description);
        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "two");
        assert_eq!(app.config.description, "one\ntwo");
        assert_eq!(app.focus, Focus::Description);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::Description);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::Name);
    }

    #[test]
    fn enter_in_single_line_input_advances_focus() {
        let (mut app, _tmp) = test_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Description);
        assert_eq!(app.config.name, "");
    }

    #[test]
    fn add_buttons_append_and_focus_new_entry() {
        let (mut app, _tmp) = test_app();
        app.set_focus(Focus::AddCapability);
        press(&mut app, KeyCode::Enter);
        app.set_focus(Focus::AddCapability);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Capability(1));
        type_str(&mut app, "search");
        assert_eq!(app.config.capabilities, vec!["", "search"]);

        app.set_focus(Focus::AddGoal);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "answer");
        assert_eq!(app.config.goals, vec!["answer"]);
    }

    #[test]
    fn preview_request_leaves_config_untouched() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, "Helper");
        let before = app.config.clone();
        ctrl(&mut app, 'p');
        assert!(app.show_preview);
        assert_eq!(app.config, before);

        app.set_focus(Focus::Preview);
        press(&mut app, KeyCode::Enter);
        assert!(app.show_preview);
        assert_eq!(app.config, before);
    }

    #[test]
    fn save_writes_snapshot_without_touching_state() {
        let (mut app, tmp) = test_app();
        type_str(&mut app, "Helper");
        let before = app.config.clone();

        app.set_focus(Focus::Save);
        press(&mut app, KeyCode::Enter);

        let saved = std::fs::read_to_string(tmp.path().join("helper.json")).unwrap();
        let loaded: AgentConfig = serde_json::from_str(&saved).unwrap();
        assert_eq!(loaded, before);
        assert_eq!(app.config, before);
        assert!(!app.show_preview);
        assert_eq!(app.logs.last().map(|l| l.level), Some(LogLevel::Info));
    }

    #[test]
    fn failed_save_is_logged_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let mut app = App::with_store(AgentStore::at(blocker.join("agents")));

        ctrl(&mut app, 's');
        assert_eq!(app.logs.last().map(|l| l.level), Some(LogLevel::Error));
        assert!(!app.should_quit());
    }

    #[test]
    fn control_chords_do_not_type() {
        let (mut app, _tmp) = test_app();
        ctrl(&mut app, 'l');
        assert!(app.logs.is_empty());
        assert_eq!(app.config.name, "");
        ctrl(&mut app, 'c');
        assert!(app.should_quit());
    }

    #[test]
    fn altgr_characters_are_typed() {
        let (mut app, _tmp) = test_app();
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        for ch in ['@', '€', '{'] {
            app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char(ch), altgr)))
                .unwrap();
        }
        assert_eq!(app.config.name, "@€{");
    }

    #[test]
    fn shifted_characters_are_typed_but_alt_chords_are_not() {
        let (mut app, _tmp) = test_app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('H'),
            KeyModifiers::SHIFT,
        )))
        .unwrap();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)))
            .unwrap();
        assert_eq!(app.config.name, "H");
    }

    #[test]
    fn missing_save_dir_keeps_the_form_usable() {
        let mut app = App::with_store(AgentStore::resolve(None, None));
        assert!(
            app.logs
                .iter()
                .any(|l| l.level == LogLevel::Warn && l.message.contains("Save disabled"))
        );

        type_str(&mut app, "Helper");
        ctrl(&mut app, 'p');
        ctrl(&mut app, 's');
        assert_eq!(app.config.name, "Helper");
        assert!(app.show_preview);
        assert_eq!(app.logs.last().map(|l| l.level), Some(LogLevel::Error));
        assert!(!app.should_quit());
    }

    #[test]
    fn typing_on_a_button_is_ignored() {
        let (mut app, _tmp) = test_app();
        app.set_focus(Focus::Save);
        type_str(&mut app, "abc");
        assert_eq!(app.config, AgentConfig::default());
    }

    #[test]
    fn log_is_capped() {
        let (mut app, _tmp) = test_app();
        for i in 0..MAX_LOGS + 5 {
            app.log(LogLevel::Info, format!("line {i}"));
        }
        assert_eq!(app.logs.len(), MAX_LOGS);
        assert_eq!(
            app.logs.last().map(|l| l.message.as_str()),
            Some(format!("line {}", MAX_LOGS + 4).as_str())
        );
    }
}
