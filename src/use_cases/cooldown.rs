use std::collections::HashMap;

/// Earliest time (epoch millis) each key may trigger again.
///
/// Entries are overwritten, never evicted; keys are bounded by the actors
/// that ever used an item.
#[derive(Debug, Default)]
pub struct CooldownMap {
    ready_at: HashMap<String, u64>,
}

impl CooldownMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and arms the cooldown when `key` is ready at `now_millis`.
    pub fn try_acquire(&mut self, key: &str, now_millis: u64, window_millis: u64) -> bool {
        if self.ready_at.get(key).is_some_and(|ready| *ready > now_millis) {
            return false;
        }
        self.ready_at
            .insert(key.to_string(), now_millis.saturating_add(window_millis));
        true
    }

    /// Forgets every armed cooldown and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let armed = self.ready_at.len();
        self.ready_at.clear();
        armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_inside_window_then_second_use_is_rejected() {
        let mut cooldowns = CooldownMap::new();
        assert!(cooldowns.try_acquire("p1:interact", 1_000, 500));
        assert!(!cooldowns.try_acquire("p1:interact", 1_499, 500));
        assert!(cooldowns.try_acquire("p1:interact", 1_500, 500));
    }

    #[test]
    fn when_keys_differ_then_cooldowns_are_independent() {
        let mut cooldowns = CooldownMap::new();
        assert!(cooldowns.try_acquire("p1:interact", 1_000, 500));
        assert!(cooldowns.try_acquire("p2:interact", 1_000, 500));
        assert_eq!(cooldowns.clear(), 2);
    }

    #[test]
    fn when_cleared_then_key_is_ready_inside_old_window() {
        let mut cooldowns = CooldownMap::new();
        assert!(cooldowns.try_acquire("p1:interact", 1_000, 500));

        assert_eq!(cooldowns.clear(), 1);

        assert!(cooldowns.try_acquire("p1:interact", 1_001, 500));
        assert_eq!(cooldowns.clear(), 1);
    }
}
