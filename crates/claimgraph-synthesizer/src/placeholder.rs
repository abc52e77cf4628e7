//! Placeholder allocation for implicit nodes

use claimgraph_domain::placeholder_id;

/// Hands out `unknown_<i>` identifiers for one claim
///
/// Indices start at 0 and grow in allocation order. Named allocations are
/// memoized so the same implicit entity always maps to the same placeholder.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderAllocator {
    next: usize,
    assigned: Vec<(String, String)>,
}

impl PlaceholderAllocator {
    /// Create an allocator starting at `unknown_0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an anonymous placeholder
    pub fn fresh(&mut self) -> String {
        let id = placeholder_id(self.next);
        self.next += 1;
        id
    }

    /// Placeholder for `entity`, allocating one on first sight
    pub fn resolve(&mut self, entity: &str) -> String {
        if let Some(existing) = self.get(entity) {
            return existing.to_string();
        }
        let id = self.fresh();
        self.assigned.push((entity.to_string(), id.clone()));
        id
    }

    /// Placeholder already assigned to `entity`
    pub fn get(&self, entity: &str) -> Option<&str> {
        self.assigned
            .iter()
            .find(|(name, _)| name == entity)
            .map(|(_, id)| id.as_str())
    }

    /// Placeholders assigned to named entities, in allocation order
    pub fn named(&self) -> impl Iterator<Item = &str> {
        self.assigned.iter().map(|(_, id)| id.as_str())
    }

    /// Total number of placeholders handed out
    pub fn allocated(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut alloc = PlaceholderAllocator::new();
        assert_eq!(alloc.fresh(), "unknown_0");
        assert_eq!(alloc.resolve("C"), "unknown_1");
        assert_eq!(alloc.resolve("D"), "unknown_2");
        assert_eq!(alloc.allocated(), 3);
    }

    #[test]
    fn test_resolve_is_memoized() {
        let mut alloc = PlaceholderAllocator::new();
        let first = alloc.resolve("C");
        assert_eq!(alloc.resolve("C"), first);
        assert_eq!(alloc.get("C"), Some("unknown_0"));
        assert_eq!(alloc.get("missing"), None);
        assert_eq!(alloc.named().collect::<Vec<_>>(), vec!["unknown_0"]);
    }
}
