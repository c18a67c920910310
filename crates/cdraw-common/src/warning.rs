//! Library warnings with colored terminal output.
//!
//! Compositing never fails loudly for recoverable oddities (an alignment
//! that does not apply to the axis, a font style that has to fall back),
//! but the caller should hear about them once. Messages are deduplicated
//! so a composite built in a loop does not flood stderr.

use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Record `message` under `component` and report whether it is new.
fn first_sighting(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message))
}

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```
/// cdraw_common::warn_once("layout", "LEFT does not apply to beside; using CENTER");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        eprintln!("{}", format!("[cdraw {component}] ⚠ {message}").yellow());
    }
}

/// Whether `message` has been reported under `component` since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Forget every recorded warning so they can be printed again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Dedup and clearing share the global set, so they run as one test.
    #[test]
    fn test_messages_are_deduplicated_until_cleared() {
        let message = "test_messages_are_deduplicated_until_cleared";
        assert!(!has_warned("test", message));
        assert!(first_sighting("test", message));
        assert!(!first_sighting("test", message));
        assert!(first_sighting("other", message));
        assert!(has_warned("test", message));

        clear_warnings();
        assert!(!has_warned("test", message));
        assert!(first_sighting("test", message));

        warn_once("test", "printed once");
        assert!(has_warned("test", "printed once"));
    }
}
