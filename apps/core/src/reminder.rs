use std::collections::HashMap;
use std::sync::Mutex;

/// Tracks, per user, whether the daily check-in question has already been asked.
///
/// A plain keyed flag map for the lifetime of the process: no expiry, no
/// eviction. The narrow interface keeps it swappable for a request-scoped
/// or persistent-backed store without touching classification logic.
#[derive(Default)]
pub struct ReminderFlags {
    /// Flag per user id. `true` once the daily question has been asked.
    asked: Mutex<HashMap<String, bool>>,
}

impl ReminderFlags {
    /// Creates an empty flag store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the daily question has been asked for this user.
    pub fn was_asked(&self, user_id: &str) -> bool {
        self.asked
            .lock()
            .map(|map| map.get(user_id).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    /// Marks the daily question as asked for this user.
    pub fn mark_asked(&self, user_id: &str) {
        if let Ok(mut map) = self.asked.lock() {
            map.insert(user_id.to_string(), true);
        }
    }

    /// Atomically reads then sets the flag, returning the previous value.
    ///
    /// A handler that mutates the flag must not observe a stale read within
    /// the same request, so both steps happen under one lock acquisition.
    pub fn check_and_mark(&self, user_id: &str) -> bool {
        match self.asked.lock() {
            Ok(mut map) => {
                let previous = map.get(user_id).copied().unwrap_or(false);
                map.insert(user_id.to_string(), true);
                previous
            }
            // A poisoned lock degrades to "already asked" rather than
            // repeating reminders or panicking in a request handler.
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_unset() {
        let flags = ReminderFlags::new();
        assert!(!flags.was_asked("margaret"));
    }

    #[test]
    fn test_mark_and_read() {
        let flags = ReminderFlags::new();
        flags.mark_asked("margaret");
        assert!(flags.was_asked("margaret"));
        assert!(!flags.was_asked("harold"));
    }

    #[test]
    fn test_check_and_mark_fires_once() {
        let flags = ReminderFlags::new();
        assert!(!flags.check_and_mark("margaret"));
        assert!(flags.check_and_mark("margaret"));
        assert!(flags.was_asked("margaret"));
    }

    #[test]
    fn test_keys_are_independent() {
        let flags = ReminderFlags::new();
        assert!(!flags.check_and_mark("margaret"));
        assert!(!flags.check_and_mark("harold"));
    }
}
