use crate::domain::traits::Provider;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Model identifier -> provider mapping.
///
/// Populated during startup and handed to the dispatch service, which
/// owns it from then on. Lookups are exact and case-sensitive.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `provider` to `id`. An existing binding is replaced.
    pub fn register(&mut self, id: impl Into<String>, provider: Arc<dyn Provider>) {
        let id = id.into();
        if self.providers.insert(id.clone(), provider).is_some() {
            tracing::debug!(model = %id, "replaced provider binding");
        }
    }

    pub fn resolve(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    pub fn list_ids(&self) -> BTreeSet<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("models", &self.list_ids())
            .finish()
    }
}
