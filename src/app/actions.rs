//! Button actions — add entry, preview, save.

use super::App;
use super::agents::{ListField, Update};
use super::focus::Focus;
use super::log_src;
use super::logging::LogLevel;

impl App {
    /// Run the action behind the focused button.
    pub(crate) fn activate(&mut self) {
        match self.focus {
            Focus::AddCapability => self.append_entry(ListField::Capabilities),
            Focus::AddGoal => self.append_entry(ListField::Goals),
            Focus::Preview => self.request_preview(),
            Focus::Save => self.save(),
            _ => {}
        }
    }

    /// Append an empty entry and move focus onto it.
    fn append_entry(&mut self, field: ListField) {
        self.dispatch(Update::append(field));
        let index = self.config.list(field).len() - 1;
        let focus = match field {
            ListField::Capabilities => Focus::Capability(index),
            ListField::Goals => Focus::Goal(index),
        };
        self.set_focus(focus);
    }

    /// Show the preview pane.  The pane reads live state from then on.
    pub(crate) fn request_preview(&mut self) {
        if self.show_preview {
            return;
        }
        self.show_preview = true;
        self.log(
            LogLevel::Info,
            "Preview on. It follows your edits as you type.".to_string(),
        );
    }

    /// Write a JSON snapshot of the current configuration.
    pub(crate) fn save(&mut self) {
        match self.store.save(&self.config) {
            Ok(path) => {
                let name = if self.config.name.is_empty() {
                    "unnamed agent".to_string()
                } else {
                    format!("\"{}\"", self.config.name)
                };
                self.log(
                    LogLevel::Info,
                    format!("Saved {name} to {}.", path.display()),
                );
            }
            Err(err) => {
                log_src!(self, LogLevel::Error, format!("Save failed: {err:#}"));
            }
        }
    }
}
