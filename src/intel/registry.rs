//! Actor registry assembly
//!
//! Joins a group catalogue (names and aliases) with per-actor targeting rows
//! to produce the registry entries the alias resolver consumes.

use super::normalize::normalize_name;
use super::record::{ActorEntry, ActorGroup, TargetingRow};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Build registry entries from a group catalogue and targeting rows.
///
/// Every normalized group name and alias maps to that group's normalized
/// alias list (later groups overwrite earlier ones). Each targeting row with
/// at least one country becomes an entry named after the normalized common
/// name; rows without countries are dropped.
pub fn assemble_registry(groups: &[ActorGroup], targeting: &[TargetingRow]) -> Vec<ActorEntry> {
    let mut group_aliases: FxHashMap<String, Vec<String>> = FxHashMap::default();

    for group in groups {
        let aliases: Vec<String> = group.aliases.iter().map(|a| normalize_name(a)).collect();
        group_aliases.insert(normalize_name(&group.name), aliases.clone());
        for alias in &aliases {
            group_aliases.insert(alias.clone(), aliases.clone());
        }
    }

    let mut entries = Vec::with_capacity(targeting.len());
    for row in targeting {
        if row.countries.is_empty() {
            debug!("No targeted countries for '{}', skipping", row.common_name);
            continue;
        }

        let name = normalize_name(&row.common_name);
        let aliases = group_aliases.get(&name).cloned().unwrap_or_default();
        entries.push(ActorEntry {
            canonical_name: Some(name),
            aliases,
            countries: row.countries.clone(),
        });
    }

    info!(
        "Assembled {} registry entries from {} groups and {} targeting rows",
        entries.len(),
        groups.len(),
        targeting.len()
    );

    entries
}
