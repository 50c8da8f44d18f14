//! The search form: a single-line query input.
//!
//! Editing works on grapheme clusters so the cursor never lands inside a
//! combined character. Pressing enter emits a [`SubmitMsg`] with the current
//! text; validating it is left to the receiver.
//!
//! ```rust
//! use bubbletea_gallery::form::Model;
//! use bubbletea_gallery::Component;
//!
//! let mut form = Model::new();
//! form.focus();
//! form.set_value("mountain lake");
//! assert_eq!(form.value(), "mountain lake");
//! assert_eq!(form.position(), 13);
//! ```

use std::time::Duration;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss::AdaptiveColor;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

use crate::key::{self, KeyMap};
use crate::Component;

/// Sent when the user submits the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitMsg(pub String);

/// Clipboard text to insert at the cursor.
#[derive(Debug, Clone)]
pub struct PasteMsg(pub String);

/// Clipboard read failure.
#[derive(Debug, Clone)]
pub struct PasteErrMsg(pub String);

/// Key bindings for the form.
#[derive(Debug, Clone)]
pub struct FormKeyMap {
    /// Submit the query.
    pub submit: key::Binding,
    /// Delete the grapheme before the cursor.
    pub delete_back: key::Binding,
    /// Delete the grapheme under the cursor.
    pub delete_forward: key::Binding,
    /// Move the cursor left.
    pub left: key::Binding,
    /// Move the cursor right.
    pub right: key::Binding,
    /// Move to the start.
    pub home: key::Binding,
    /// Move to the end.
    pub end: key::Binding,
    /// Clear the input.
    pub clear: key::Binding,
    /// Paste from the clipboard.
    pub paste: key::Binding,
}

impl Default for FormKeyMap {
    fn default() -> Self {
        Self {
            submit: key::new_binding(vec![
                key::with_keys_str(&["enter"]),
                key::with_help("enter", "search"),
            ]),
            delete_back: key::new_binding(vec![key::with_keys_str(&["backspace"])]),
            delete_forward: key::new_binding(vec![key::with_keys_str(&["delete"])]),
            left: key::new_binding(vec![key::with_keys_str(&["left", "ctrl+b"])]),
            right: key::new_binding(vec![key::with_keys_str(&["right", "ctrl+f"])]),
            home: key::new_binding(vec![key::with_keys_str(&["home", "ctrl+a"])]),
            end: key::new_binding(vec![key::with_keys_str(&["end", "ctrl+e"])]),
            clear: key::new_binding(vec![
                key::with_keys_str(&["ctrl+u"]),
                key::with_help("ctrl+u", "clear"),
            ]),
            paste: key::new_binding(vec![
                key::with_keys_str(&["ctrl+v"]),
                key::with_help("ctrl+v", "paste"),
            ]),
        }
    }
}

impl KeyMap for FormKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.submit, &self.clear]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.submit, &self.clear, &self.paste]]
    }
}

/// The search input.
#[derive(Debug, Clone)]
pub struct Model {
    value: Vec<String>,
    pos: usize,
    focused: bool,
    /// Text before the input.
    pub prompt: String,
    /// Shown while the input is empty.
    pub placeholder: String,
    /// Key bindings.
    pub keymap: FormKeyMap,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the character under the cursor.
    pub cursor_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            pos: 0,
            focused: false,
            prompt: "Search: ".to_string(),
            placeholder: "Search images…".to_string(),
            keymap: FormKeyMap::default(),
            prompt_style: Style::new().foreground(Color::from("#3F51B5")).bold(true),
            placeholder_style: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            cursor_style: Style::new().reverse(true),
        }
    }
}

impl Model {
    /// Creates an empty, blurred form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    pub fn value(&self) -> String {
        self.value.concat()
    }

    /// Replaces the text and moves the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.value = s.graphemes(true).map(str::to_string).collect();
        self.pos = self.value.len();
    }

    /// Cursor position in graphemes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the text.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Inserts text at the cursor. Control characters are dropped.
    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| !c.is_control()).collect();
        let graphemes: Vec<String> = clean.graphemes(true).map(str::to_string).collect();
        let n = graphemes.len();
        self.value.splice(self.pos..self.pos, graphemes);
        self.pos += n;
    }

    /// Empties the input.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Handles key and paste messages while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        if let Some(paste) = msg.downcast_ref::<PasteMsg>() {
            self.insert_str(&paste.0);
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.keymap.submit.matches(key_msg) {
            let submitted = SubmitMsg(self.value());
            return Some(bubbletea_rs::tick(Duration::from_nanos(1), move |_| {
                Box::new(submitted.clone()) as Msg
            }));
        } else if self.keymap.paste.matches(key_msg) {
            return Some(paste());
        } else if self.keymap.clear.matches(key_msg) {
            self.reset();
        } else if self.keymap.delete_back.matches(key_msg) {
            if self.pos > 0 {
                self.pos -= 1;
                self.value.remove(self.pos);
            }
        } else if self.keymap.delete_forward.matches(key_msg) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if self.keymap.left.matches(key_msg) {
            self.pos = self.pos.saturating_sub(1);
        } else if self.keymap.right.matches(key_msg) {
            self.set_cursor(self.pos + 1);
        } else if self.keymap.home.matches(key_msg) {
            self.pos = 0;
        } else if self.keymap.end.matches(key_msg) {
            self.pos = self.value.len();
        } else if let KeyCode::Char(c) = key_msg.key {
            if key_msg.modifiers.intersects(
                crossterm::event::KeyModifiers::CONTROL | crossterm::event::KeyModifiers::ALT,
            ) {
                return None;
            }
            self.insert_str(&c.to_string());
        }
        None
    }

    /// Renders the prompt, the text and, when focused, the cursor.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() {
            let placeholder = self.placeholder_style.render(&self.placeholder);
            if self.focused {
                return format!("{}{}{}", prompt, self.cursor_style.render(" "), placeholder);
            }
            return format!("{}{}", prompt, placeholder);
        }

        if !self.focused {
            return format!("{}{}", prompt, self.value());
        }

        let before = self.value[..self.pos].concat();
        let (under, after) = match self.value.get(self.pos) {
            Some(g) => (g.as_str(), self.value[self.pos + 1..].concat()),
            None => (" ", String::new()),
        };
        format!(
            "{}{}{}{}",
            prompt,
            before,
            self.cursor_style.render(under),
            after
        )
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

/// Reads the system clipboard and yields [`PasteMsg`] or [`PasteErrMsg`].
pub fn paste() -> Cmd {
    bubbletea_rs::tick(Duration::from_nanos(1), |_| {
        #[cfg(feature = "clipboard-support")]
        {
            use clipboard::{ClipboardContext, ClipboardProvider};
            let res: Result<String, String> = (|| {
                let mut ctx: ClipboardContext = ClipboardProvider::new()
                    .map_err(|e| format!("Failed to create clipboard context: {}", e))?;
                ctx.get_contents()
                    .map_err(|e| format!("Failed to read clipboard: {}", e))
            })();
            match res {
                Ok(s) => Box::new(PasteMsg(s)) as Msg,
                Err(e) => Box::new(PasteErrMsg(e)) as Msg,
            }
        }
        #[cfg(not(feature = "clipboard-support"))]
        {
            Box::new(PasteErrMsg("Clipboard support not enabled".to_string())) as Msg
        }
    })
}
