use std::collections::BTreeMap;
use std::sync::Arc;

use super::traits::Filter;

/// Filters addressable by alias.
///
/// An alias may be registered as disabled: it stays known to the chain but
/// resolves to no filter, exactly like an unregistered alias.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: BTreeMap<String, Option<Arc<dyn Filter>>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, alias: impl Into<String>, filter: Arc<dyn Filter>) {
        self.filters.insert(alias.into(), Some(filter));
    }

    pub fn disable(&mut self, alias: impl Into<String>) {
        self.filters.insert(alias.into(), None);
    }

    /// Filter for `alias`; `None` means no transformation was requested
    pub fn get(&self, alias: Option<&str>) -> Option<Arc<dyn Filter>> {
        let alias = alias?;
        self.filters.get(alias).cloned().flatten()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.filters.contains_key(alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.filters
                    .iter()
                    .map(|(alias, filter)| (alias, filter.as_ref().map(|f| f.name()))),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::UrlFilter;

    #[test]
    fn test_get_registered_alias() {
        let mut chain = FilterChain::new();
        chain.register("thumb", Arc::new(UrlFilter::new("/media/cache")));

        let filter = chain.get(Some("thumb")).unwrap();
        assert_eq!(filter.name(), "url");
    }

    #[test]
    fn test_absent_outcomes() {
        let mut chain = FilterChain::new();
        chain.register("thumb", Arc::new(UrlFilter::new("/media/cache")));
        chain.disable("original");

        assert!(chain.get(None).is_none());
        assert!(chain.get(Some("unknown")).is_none());
        assert!(chain.get(Some("original")).is_none());
        assert!(chain.contains("original"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut chain = FilterChain::new();
        chain.register("thumb", Arc::new(UrlFilter::new("/media/cache")));

        assert!(chain.get(Some("Thumb")).is_none());
        assert!(chain.get(Some("thumb ")).is_none());
        assert_eq!(chain.aliases().collect::<Vec<_>>(), vec!["thumb"]);
    }
}
