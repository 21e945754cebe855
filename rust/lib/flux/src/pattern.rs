use std::sync::RwLock;

/// Does `pattern` match `topic`?
///
/// Levels are separated by `/`. `+` matches exactly one level; `#` matches
/// the rest of the topic (zero or more levels) and must be last.
pub fn topic_matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');
    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => {}
            (Some(p), Some(t)) if p == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Pattern table: values registered under wildcard patterns, looked up by
/// concrete topic.
///
/// Registration order is preserved, so `match_topic` returns values in the
/// order they were inserted.
pub struct Patterns<T> {
    entries: RwLock<Vec<(String, T)>>,
}

impl<T: Clone> Patterns<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, pattern: &str, value: T) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.push((pattern.to_string(), value));
    }

    /// Values whose pattern matches `topic`, cloned out so the lock is not
    /// held while callers run them.
    pub fn match_topic(&self, topic: &str) -> Vec<T> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .filter(|(p, _)| topic_matches(p, topic))
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Remove values registered under exactly `pattern` for which
    /// `predicate` holds. Returns true if anything was removed.
    pub fn remove<F>(&self, pattern: &str, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|(p, v)| !(p == pattern && predicate(v)));
        entries.len() != before
    }
}

impl<T: Clone> Default for Patterns<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact() {
        assert!(topic_matches("users/list", "users/list"));
        assert!(!topic_matches("users/list", "users/form"));
        assert!(!topic_matches("users/list", "users/list/items"));
        assert!(!topic_matches("users/list/items", "users/list"));
    }

    #[test]
    fn single_level() {
        assert!(topic_matches("users/+", "users/list"));
        assert!(topic_matches("users/+/submit", "users/form/submit"));
        assert!(!topic_matches("users/+", "users/form/submit"));
        assert!(!topic_matches("users/+", "users"));
    }

    #[test]
    fn multi_level() {
        assert!(topic_matches("users/#", "users/list"));
        assert!(topic_matches("users/#", "users/form/field"));
        assert!(topic_matches("users/#", "users"));
        assert!(!topic_matches("users/#", "app/route"));
        assert!(topic_matches("#", "anything/at/all"));
    }

    #[test]
    fn similar_prefix_is_not_a_match() {
        assert!(!topic_matches("user/+", "users/list"));
        assert!(!topic_matches("users/#", "usersx/list"));
    }

    #[test]
    fn match_preserves_insert_order() {
        let p = Patterns::new();
        p.insert("#", 1);
        p.insert("users/list", 2);
        p.insert("users/+", 3);
        p.insert("app/route", 4);
        assert_eq!(p.match_topic("users/list"), vec![1, 2, 3]);
    }

    #[test]
    fn remove_by_predicate() {
        let p = Patterns::new();
        p.insert("a", 1);
        p.insert("a", 2);
        p.insert("b", 1);
        assert!(p.remove("a", |v| *v == 1));
        assert!(!p.remove("a", |v| *v == 1));
        assert_eq!(p.match_topic("a"), vec![2]);
        assert_eq!(p.match_topic("b"), vec![1]);
    }
}
