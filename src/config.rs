//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// How many rows a page holds when a [`PageState`](crate::pager::PageState) is created
/// without an explicit page size.
/// Feel free to override it when initing this library.
pub static DEFAULT_PAGE_SIZE: Lazy<Arc<Mutex<usize>>> = Lazy::new(|| Arc::new(Mutex::new(10)));

/// The tag/color pairs every new [`Agenda`](crate::Agenda) starts with.
/// Colors are CSS color strings. Feel free to override them when initing this library.
pub static DEFAULT_TAG_COLORS: Lazy<Arc<Mutex<Vec<(String, String)>>>> = Lazy::new(|| {
    Arc::new(Mutex::new(vec![
        ("work".to_string(), "blue".to_string()),
        ("personal".to_string(), "green".to_string()),
        ("important".to_string(), "red".to_string()),
        ("other".to_string(), "orange".to_string()),
        ("family".to_string(), "purple".to_string()),
        ("study".to_string(), "cyan".to_string()),
        ("health".to_string(), "magenta".to_string()),
        ("leisure".to_string(), "lime".to_string()),
    ]))
});
