//! Actor alias resolution
//!
//! Maps every known actor name and alias to one canonical actor, and keeps
//! the set of countries each canonical actor is known to target.

use super::normalize::{normalize_name, normalize_nonempty};
use super::record::ActorEntry;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{info, warn};

/// Counters collected while building a resolver
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolverStats {
    /// Entries accepted
    pub entries: usize,
    /// Entries skipped because the canonical name was missing or blank
    pub malformed_entries: usize,
    /// Lookup keys re-pointed from one canonical actor to another
    pub alias_collisions: usize,
}

/// Canonical-name lookup plus per-actor targeting.
///
/// Built once per run and then read-only. When two entries claim the same
/// alias, the entry registered later wins.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    lookup: FxHashMap<String, String>,
    targeting: FxHashMap<String, IndexSet<String>>,
    stats: ResolverStats,
}

impl AliasResolver {
    /// Build the lookup and targeting tables from registry entries, in order.
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a ActorEntry>) -> Self {
        let mut resolver = AliasResolver::default();

        for entry in entries {
            let Some(canonical) = entry.canonical_name.as_deref().and_then(normalize_nonempty)
            else {
                resolver.stats.malformed_entries += 1;
                warn!("Skipping actor registry entry without a canonical name: {:?}", entry.aliases);
                continue;
            };

            resolver.register(canonical.clone(), &canonical);
            for alias in entry.aliases.iter().filter_map(|a| normalize_nonempty(a)) {
                resolver.register(alias, &canonical);
            }

            let countries: IndexSet<String> = entry.countries.iter().cloned().collect();
            resolver.targeting.insert(canonical, countries);
            resolver.stats.entries += 1;
        }

        info!(
            "Alias resolver built: {} actors, {} names, {} malformed, {} collisions",
            resolver.targeting.len(),
            resolver.lookup.len(),
            resolver.stats.malformed_entries,
            resolver.stats.alias_collisions
        );

        resolver
    }

    fn register(&mut self, key: String, canonical: &str) {
        if let Some(previous) = self.lookup.insert(key.clone(), canonical.to_string()) {
            if previous != canonical {
                self.stats.alias_collisions += 1;
                warn!(
                    "Alias '{}' re-registered: '{}' replaces '{}'",
                    key, canonical, previous
                );
            }
        }
    }

    /// Canonical actor for a name, alias or raw tag
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.lookup.get(&normalize_name(name)).map(String::as_str)
    }

    /// Countries targeted by a canonical actor, in registry order
    pub fn countries_for(&self, canonical: &str) -> Option<&IndexSet<String>> {
        self.targeting.get(canonical)
    }

    /// Resolve a tag straight to its actor's targeting set
    pub fn targets_of(&self, tag: &str) -> Option<&IndexSet<String>> {
        self.resolve(tag).and_then(|canonical| self.countries_for(canonical))
    }

    /// Number of names (canonical and alias) in the lookup table
    pub fn name_count(&self) -> usize {
        self.lookup.len()
    }

    /// Number of canonical actors with a targeting entry
    pub fn actor_count(&self) -> usize {
        self.targeting.len()
    }

    pub fn stats(&self) -> &ResolverStats {
        &self.stats
    }
}
