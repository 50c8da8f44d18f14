#![warn(missing_docs)]

//! # bubbletea-gallery
//!
//! A terminal image-search gallery built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//! A search form sends queries to the Pixabay API, results render as a grid
//! of cards with a lightbox viewer, and a row of pagination buttons pages
//! through the results.
//!
//! ## Components
//!
//! Every part of the screen is a component following the Elm Architecture
//! with `update()` and `view()` methods:
//!
//! - [`PaginationButtons`]: Start / Previous / page numbers / Next / End,
//!   with a sliding window of page numbers around the current page
//! - [`gallery::Model`]: the card grid and its [`gallery::Lightbox`]
//! - [`form::Model`]: the single-line search input
//! - [`notify::Model`]: auto-dismissing notices
//! - [`help::Model`]: key help generated from a [`KeyMap`]
//!
//! [`App`] composes them into a bubbletea program.
//!
//! ## Pagination
//!
//! The pagination widget can be used on its own. It is attached to a
//! [`host::Host`] once, reports page changes to its handlers and keeps its
//! buttons in sync with the current page:
//!
//! ```rust
//! use bubbletea_gallery::host::Container;
//! use bubbletea_gallery::pagination::compute_window;
//! use bubbletea_gallery::PaginationButtons;
//! use std::sync::{Arc, Mutex};
//!
//! assert_eq!(compute_window(100, 7, 50).unwrap(), vec![48, 49, 50, 51, 52, 53, 54]);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let mut buttons = PaginationButtons::new(12, 5, 1).unwrap();
//! let sink = Arc::clone(&seen);
//! buttons.on_change(move |page| sink.lock().unwrap().push(page));
//!
//! let mut host = Container::new();
//! buttons.render(&mut host).unwrap();
//!
//! let end = buttons.control_index(bubbletea_gallery::pagination::ControlRole::End).unwrap();
//! buttons.activate(end).unwrap();
//! assert_eq!(buttons.window(), &[8, 9, 10, 11, 12]);
//! assert_eq!(*seen.lock().unwrap(), vec![12]);
//! ```
//!
//! ## Focus Management
//!
//! Components that take keyboard input implement [`Component`]; only the
//! focused one reacts to keys:
//!
//! ```rust
//! use bubbletea_gallery::prelude::*;
//!
//! let mut form = SearchForm::new();
//! assert!(!form.focused());
//! form.focus();
//! assert!(form.focused());
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod gallery;
pub mod help;
pub mod host;
pub mod key;
pub mod notify;
pub mod pagination;
pub mod search;

use bubbletea_rs::Cmd;

/// Focus management shared by the interactive components.
///
/// A focused component handles key messages; a blurred one ignores them but
/// still processes its own timer messages.
pub trait Component {
    /// Gives the component keyboard focus.
    ///
    /// May return a command to run as a result, for example to start an
    /// animation.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes keyboard focus.
    fn blur(&mut self);

    /// Whether the component has keyboard focus.
    fn focused(&self) -> bool;
}

pub use app::App;
pub use error::{ConfigError, Error, PaginationError, Result, SearchError};
pub use form::Model as SearchForm;
pub use gallery::Model as Gallery;
pub use help::Model as HelpModel;
pub use key::{matches, new_binding, with_disabled, with_help, with_keys_str, Binding, KeyMap, KeyPress};
pub use notify::Model as Notices;
pub use pagination::Model as PaginationButtons;
pub use search::{ImageSearch, PixabayClient};

/// Common imports.
pub mod prelude {
    pub use crate::app::App;
    pub use crate::form::Model as SearchForm;
    pub use crate::gallery::Model as Gallery;
    pub use crate::help::Model as HelpModel;
    pub use crate::host::{Container, Host};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::notify::Model as Notices;
    pub use crate::pagination::{ControlRole, Model as PaginationButtons, PageChangedMsg};
    pub use crate::search::{Hit, ImageSearch, SearchQuery};
    pub use crate::Component;
}
