use std::collections::HashMap;

/// Issues identifiers that are unique per category for the lifetime of one
/// generation run: `resource0`, `resource1`, `method0`, ...
///
/// Each run owns its allocator, so concurrent runs never share counters.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    counters: HashMap<String, usize>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every counter; the next id in any category starts from zero again.
    pub fn reset(&mut self) {
        self.counters.clear();
    }

    /// Return `prefix` followed by the next index for that prefix.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        let id = format!("{prefix}{counter}");
        *counter += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_per_prefix() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next("resource"), "resource0");
        assert_eq!(ids.next("resource"), "resource1");
        assert_eq!(ids.next("method"), "method0");
        assert_eq!(ids.next("resource"), "resource2");
    }

    #[test]
    fn test_reset() {
        let mut ids = IdAllocator::new();
        ids.next("client");
        ids.next("client");
        ids.reset();
        assert_eq!(ids.next("client"), "client0");
    }
}
