//! The pagination-button widget.

use std::fmt;
use std::time::Duration;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use tracing::{debug, warn};

use super::control::{Control, ControlRole};
use super::keymap::PaginationKeyMap;
use super::style::Styles;
use super::window::compute_window;
use crate::error::PaginationError;
use crate::host::{Host, RootId};
use crate::Component;

/// Number of page buttons shown when no window size is given.
pub const DEFAULT_MAX_VISIBLE: u32 = 10;

/// Callback invoked with the new page after every user-triggered change.
pub type ChangeHandler = Box<dyn FnMut(u32) + Send>;

/// Message produced by [`Model::update`] after a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChangedMsg {
    /// Root of the widget that changed.
    pub id: RootId,
    /// The page that is now current.
    pub page: u32,
}

/// The position of a widget in its page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Number of pages, at least 1.
    pub total_pages: u32,
    /// Number of page buttons, at least 1.
    pub max_visible: u32,
    /// The current page, within `1..=total_pages`.
    pub current_page: u32,
}

impl PaginationState {
    fn check_page(&self, page: u32) -> Result<(), PaginationError> {
        if page == 0 || page > self.total_pages {
            return Err(PaginationError::InvalidArgument(format!(
                "page {page} is outside 1..={}",
                self.total_pages
            )));
        }
        Ok(())
    }
}

/// A row of Start / Previous / page numbers / Next / End buttons.
///
/// The widget keeps a sliding window of page numbers around the current page
/// (see [`compute_window`]) and updates its buttons in place whenever the page
/// changes. Activating a button, by key or through [`Model::activate`],
/// changes the page, refreshes every button and then notifies the handlers
/// registered with [`Model::on_change`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_gallery::host::Container;
/// use bubbletea_gallery::pagination::{ControlRole, Model};
///
/// let mut pages = Model::new(3, 10, 1).unwrap();
/// let mut host = Container::new();
/// pages.render(&mut host).unwrap();
///
/// assert_eq!(pages.window(), &[1, 2, 3]);
/// assert!(pages.control(ControlRole::Previous).unwrap().disabled);
///
/// let three = pages.page_control_index(3).unwrap();
/// assert_eq!(pages.activate(three).unwrap(), Some(3));
/// assert!(pages.control(ControlRole::Next).unwrap().disabled);
/// ```
pub struct Model {
    id: RootId,
    state: PaginationState,
    window: Vec<u32>,
    controls: Vec<Control>,
    focus: usize,
    focused: bool,
    rendered: bool,
    handlers: Vec<ChangeHandler>,

    /// Key bindings.
    pub keymap: PaginationKeyMap,
    /// Button styles.
    pub styles: Styles,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("window", &self.window)
            .field("controls", &self.controls)
            .field("focus", &self.focus)
            .field("focused", &self.focused)
            .field("rendered", &self.rendered)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Model {
    /// Creates a widget for `total_pages` pages showing up to `max_visible`
    /// page buttons, starting on `current_page`.
    ///
    /// # Errors
    ///
    /// [`PaginationError::InvalidArgument`] when `total_pages` or
    /// `max_visible` is zero, or `current_page` is outside `1..=total_pages`.
    pub fn new(total_pages: u32, max_visible: u32, current_page: u32) -> Result<Self, PaginationError> {
        if total_pages == 0 {
            return Err(PaginationError::InvalidArgument(
                "total_pages must be at least 1".to_string(),
            ));
        }
        let window = compute_window(total_pages, max_visible, current_page)?;

        let mut controls = Vec::with_capacity(window.len() + 4);
        controls.push(Control::new(ControlRole::Start));
        controls.push(Control::new(ControlRole::Previous));
        controls.extend((0..window.len()).map(|slot| Control::new(ControlRole::Page(slot))));
        controls.push(Control::new(ControlRole::Next));
        controls.push(Control::new(ControlRole::End));

        let mut model = Self {
            id: RootId::next(),
            state: PaginationState {
                total_pages,
                max_visible,
                current_page,
            },
            window,
            controls,
            focus: 0,
            focused: false,
            rendered: false,
            handlers: Vec::new(),
            keymap: PaginationKeyMap::default(),
            styles: Styles::default(),
        };
        model.sync_controls();
        Ok(model)
    }

    /// Creates a widget on page 1 with [`DEFAULT_MAX_VISIBLE`] page buttons.
    pub fn with_total_pages(total_pages: u32) -> Result<Self, PaginationError> {
        Self::new(total_pages, DEFAULT_MAX_VISIBLE, 1)
    }

    /// Sets the key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: PaginationKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Sets the styles (builder pattern).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Attaches the widget root to `host`. A widget can be rendered once.
    ///
    /// # Errors
    ///
    /// [`PaginationError::AlreadyRendered`] on a second call; the host is left
    /// untouched.
    pub fn render<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), PaginationError> {
        if self.rendered {
            return Err(PaginationError::AlreadyRendered);
        }
        host.attach(self.id);
        self.rendered = true;
        Ok(())
    }

    /// Removes the widget root from `host` and drops the widget.
    pub fn detach<H: Host + ?Sized>(self, host: &mut H) -> bool {
        host.detach(self.id)
    }

    /// Moves to `new_page` and updates every button in place.
    ///
    /// This does not notify change handlers; only user activation does.
    ///
    /// # Errors
    ///
    /// [`PaginationError::InvalidArgument`] if `new_page` is outside
    /// `1..=total_pages`. The widget is unchanged in that case.
    pub fn update_page(&mut self, new_page: u32) -> Result<(), PaginationError> {
        self.state.check_page(new_page)?;
        self.state.current_page = new_page;
        self.refresh()
    }

    /// Recomputes the window for the current page and updates every button.
    pub fn refresh(&mut self) -> Result<(), PaginationError> {
        debug!(page = self.state.current_page, "pagination refresh");
        self.window = compute_window(
            self.state.total_pages,
            self.state.max_visible,
            self.state.current_page,
        )?;
        self.sync_controls();
        Ok(())
    }

    /// Registers a handler called with the new page after every
    /// user-triggered change.
    pub fn on_change<F>(&mut self, handler: F)
    where
        F: FnMut(u32) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Activates the control at `index`, as a click would.
    ///
    /// Returns the new current page, or `None` if the control is disabled.
    /// Activating the active page control still counts as a change.
    ///
    /// # Errors
    ///
    /// [`PaginationError::InvalidArgument`] if there is no control at `index`.
    pub fn activate(&mut self, index: usize) -> Result<Option<u32>, PaginationError> {
        let control = self.controls.get(index).ok_or_else(|| {
            PaginationError::InvalidArgument(format!("no control at index {index}"))
        })?;
        if control.disabled {
            return Ok(None);
        }

        let current = self.state.current_page;
        let page = match control.role {
            ControlRole::Start => 1,
            ControlRole::Previous => current - 1,
            ControlRole::Next => current + 1,
            ControlRole::End => self.state.total_pages,
            ControlRole::Page(_) => control.page().ok_or_else(|| {
                PaginationError::InvalidArgument(format!("control {index} has no page number"))
            })?,
        };

        self.update_page(page)?;
        for handler in self.handlers.iter_mut() {
            handler(page);
        }
        Ok(Some(page))
    }

    /// Processes key messages while focused.
    ///
    /// Returns a command producing [`PageChangedMsg`] when the page changed.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        let target = if self.keymap.focus_prev.matches(key_msg) {
            self.move_focus(false);
            return None;
        } else if self.keymap.focus_next.matches(key_msg) {
            self.move_focus(true);
            return None;
        } else if self.keymap.activate.matches(key_msg) {
            self.focus
        } else if self.keymap.prev_page.matches(key_msg) {
            self.control_index(ControlRole::Previous)?
        } else if self.keymap.next_page.matches(key_msg) {
            self.control_index(ControlRole::Next)?
        } else if self.keymap.first_page.matches(key_msg) {
            self.control_index(ControlRole::Start)?
        } else if self.keymap.last_page.matches(key_msg) {
            self.control_index(ControlRole::End)?
        } else {
            return None;
        };

        match self.activate(target) {
            Ok(Some(page)) => Some(self.change_cmd(page)),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, control = target, "pagination activation failed");
                None
            }
        }
    }

    fn change_cmd(&self, page: u32) -> Cmd {
        let msg = PageChangedMsg { id: self.id, page };
        bubbletea_rs::tick(Duration::from_nanos(1), move |_| Box::new(msg) as Msg)
    }

    /// Renders the button row. Empty until [`Model::render`] was called.
    pub fn view(&self) -> String {
        if !self.rendered {
            return String::new();
        }

        let buttons: Vec<String> = self
            .controls
            .iter()
            .enumerate()
            .map(|(i, control)| {
                let style = if self.focused && i == self.focus && !control.active {
                    &self.styles.focused
                } else if control.active {
                    &self.styles.active
                } else if control.disabled {
                    &self.styles.disabled
                } else {
                    &self.styles.button
                };
                style.render(&control.label)
            })
            .collect();
        buttons.join(&self.styles.separator)
    }

    /// The widget's root id.
    pub fn id(&self) -> RootId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// The current page.
    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> u32 {
        self.state.total_pages
    }

    /// The visible page numbers.
    pub fn window(&self) -> &[u32] {
        &self.window
    }

    /// All controls in display order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// The first control with the given role.
    pub fn control(&self, role: ControlRole) -> Option<&Control> {
        self.controls.iter().find(|c| c.role == role)
    }

    /// Index of the first control with the given role.
    pub fn control_index(&self, role: ControlRole) -> Option<usize> {
        self.controls.iter().position(|c| c.role == role)
    }

    /// Index of the page control currently showing `page`.
    pub fn page_control_index(&self, page: u32) -> Option<usize> {
        self.controls.iter().position(|c| c.page() == Some(page))
    }

    /// The page control marked active.
    pub fn active_control(&self) -> Option<&Control> {
        self.controls.iter().find(|c| c.active)
    }

    /// Index of the control holding keyboard focus.
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    /// Whether [`Model::render`] has attached the root.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    fn sync_controls(&mut self) {
        let state = self.state;
        let first = self.window.first().copied();
        let last = self.window.last().copied();
        let mut active = None;

        for (i, control) in self.controls.iter_mut().enumerate() {
            match control.role {
                ControlRole::Start => control.disabled = first == Some(1),
                ControlRole::Previous => control.disabled = state.current_page == 1,
                ControlRole::Next => control.disabled = state.current_page == state.total_pages,
                ControlRole::End => control.disabled = last == Some(state.total_pages),
                ControlRole::Page(slot) => {
                    let page = self.window[slot];
                    control.label = page.to_string();
                    control.active = page == state.current_page;
                    if control.active {
                        active = Some(i);
                    }
                }
            }
        }

        // The active page button takes focus after every update.
        if let Some(i) = active {
            self.focus = i;
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let mut i = self.focus;
        loop {
            i = if forward {
                i + 1
            } else {
                match i.checked_sub(1) {
                    Some(i) => i,
                    None => return,
                }
            };
            match self.controls.get(i) {
                Some(c) if !c.disabled => {
                    self.focus = i;
                    return;
                }
                Some(_) => continue,
                None => return,
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    #[test]
    fn test_failed_activation_yields_no_command() {
        let mut model = Model::new(5, 5, 2).unwrap();
        model.focus();
        model.focus = model.controls.len() + 3;

        assert!(model.update(&key(KeyCode::Enter)).is_none());
        assert_eq!(model.current_page(), 2);
    }

    #[test]
    fn test_disabled_target_yields_no_command() {
        let mut model = Model::new(5, 5, 1).unwrap();
        model.focus();
        assert!(model.update(&key(KeyCode::PageUp)).is_none());
        assert_eq!(model.current_page(), 1);
    }
}
