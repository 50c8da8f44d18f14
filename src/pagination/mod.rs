//! Pagination buttons: a reusable widget for paging through result sets.
//!
//! The widget shows a row of buttons:
//!
//! ```text
//!  Start   Previous   46   47   48   49  [50]  51   52   53   54   55   Next   End
//! ```
//!
//! Only a window of page numbers is visible at once. The window is computed by
//! [`compute_window`] and slides with the current page. Each button knows its
//! role ([`ControlRole`]); the navigation buttons disable themselves at the
//! edges of the range.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_gallery::host::Container;
//! use bubbletea_gallery::pagination::Model;
//! use std::sync::{Arc, Mutex};
//!
//! let mut pages = Model::with_total_pages(100).unwrap();
//! let mut host = Container::new();
//! pages.render(&mut host).unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! pages.on_change(move |page| sink.lock().unwrap().push(page));
//!
//! let next = pages.control_index(bubbletea_gallery::pagination::ControlRole::Next).unwrap();
//! pages.activate(next).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![2]);
//! ```

pub mod control;
pub mod keymap;
pub mod model;
pub mod style;
pub mod window;


pub use control::{Control, ControlRole};
pub use keymap::PaginationKeyMap;
pub use model::{ChangeHandler, Model, PageChangedMsg, PaginationState, DEFAULT_MAX_VISIBLE};
pub use style::Styles;
pub use window::{compute_window, half_window};
