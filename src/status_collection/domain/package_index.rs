use super::ArtefactId;
use std::collections::{BTreeMap, BTreeSet};

/// Adjacency map keyed by artefact, values sorted and free of duplicates
pub type ArtefactMap = BTreeMap<ArtefactId, Vec<ArtefactId>>;

/// PackageIndex aggregate holding the direct dependency edges between
/// installed artefacts in both directions
///
/// `requires` has an entry for every installed artefact. `whatrequires` is
/// its exact transpose and only has entries for artefacts that something
/// depends on. Both are immutable once built.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    requires: ArtefactMap,
    whatrequires: ArtefactMap,
}

impl PackageIndex {
    /// Builds the index from per-artefact dependency sets
    pub fn from_requires(requires: BTreeMap<ArtefactId, BTreeSet<ArtefactId>>) -> Self {
        let requires: ArtefactMap = requires
            .into_iter()
            .map(|(artefact, deps)| (artefact, deps.into_iter().collect()))
            .collect();
        let whatrequires = Self::transpose(&requires);

        Self {
            requires,
            whatrequires,
        }
    }

    fn transpose(requires: &ArtefactMap) -> ArtefactMap {
        let mut whatrequires = ArtefactMap::new();
        // Keys are visited in order, so every dependent list ends up sorted
        for (artefact, deps) in requires {
            for dep in deps {
                whatrequires
                    .entry(dep.clone())
                    .or_default()
                    .push(artefact.clone());
            }
        }
        whatrequires
    }

    pub fn requires(&self) -> &ArtefactMap {
        &self.requires
    }

    pub fn whatrequires(&self) -> &ArtefactMap {
        &self.whatrequires
    }

    /// Direct dependencies of `artefact`, empty when unknown
    pub fn requires_of(&self, artefact: &ArtefactId) -> &[ArtefactId] {
        self.requires.get(artefact).map_or(&[], Vec::as_slice)
    }

    /// Direct dependents of `artefact`, empty when nothing requires it
    pub fn whatrequires_of(&self, artefact: &ArtefactId) -> &[ArtefactId] {
        self.whatrequires.get(artefact).map_or(&[], Vec::as_slice)
    }

    /// All installed artefacts in identifier order
    pub fn artefacts(&self) -> impl Iterator<Item = &ArtefactId> {
        self.requires.keys()
    }

    pub fn artefact_count(&self) -> usize {
        self.requires.len()
    }

    pub fn edge_count(&self) -> usize {
        self.requires.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ArtefactId {
        ArtefactId::new(s)
    }

    fn index(edges: &[(&str, &[&str])]) -> PackageIndex {
        let requires = edges
            .iter()
            .map(|(pkg, deps)| (id(pkg), deps.iter().map(|d| id(d)).collect()))
            .collect();
        PackageIndex::from_requires(requires)
    }

    #[test]
    fn test_transpose_property() {
        let index = index(&[
            ("a/1-1.noarch", &["b/1-1.noarch", "c/1-1.noarch"]),
            ("b/1-1.noarch", &["c/1-1.noarch"]),
            ("c/1-1.noarch", &[]),
            ("d/1-1.noarch", &["a/1-1.noarch", "c/1-1.noarch"]),
        ]);

        for (a, deps) in index.requires() {
            for b in deps {
                assert!(index.whatrequires_of(b).contains(a));
            }
        }
        for (b, dependents) in index.whatrequires() {
            for a in dependents {
                assert!(index.requires_of(a).contains(b));
            }
        }
    }

    #[test]
    fn test_whatrequires_only_for_required_artefacts() {
        let index = index(&[("a/1-1.noarch", &["b/1-1.noarch"]), ("b/1-1.noarch", &[])]);

        assert!(index.whatrequires().contains_key(&id("b/1-1.noarch")));
        assert!(!index.whatrequires().contains_key(&id("a/1-1.noarch")));
        assert_eq!(index.whatrequires().len(), 1);
    }

    #[test]
    fn test_dependents_are_sorted() {
        let index = index(&[
            ("z/1-1.noarch", &["lib/1-1.noarch"]),
            ("a/1-1.noarch", &["lib/1-1.noarch"]),
            ("m/1-1.noarch", &["lib/1-1.noarch"]),
            ("lib/1-1.noarch", &[]),
        ]);

        assert_eq!(
            index.whatrequires_of(&id("lib/1-1.noarch")),
            &[id("a/1-1.noarch"), id("m/1-1.noarch"), id("z/1-1.noarch")]
        );
    }

    #[test]
    fn test_unknown_artefact_has_no_edges() {
        let index = index(&[("a/1-1.noarch", &[])]);
        assert!(index.requires_of(&id("missing/1-1.noarch")).is_empty());
        assert!(index.whatrequires_of(&id("missing/1-1.noarch")).is_empty());
    }

    #[test]
    fn test_counts() {
        let index = index(&[
            ("a/1-1.noarch", &["b/1-1.noarch", "c/1-1.noarch"]),
            ("b/1-1.noarch", &[]),
            ("c/1-1.noarch", &[]),
        ]);
        assert_eq!(index.artefact_count(), 3);
        assert_eq!(index.edge_count(), 2);
    }

    #[test]
    fn test_empty_index() {
        let index = PackageIndex::default();
        assert_eq!(index.artefact_count(), 0);
        assert_eq!(index.edge_count(), 0);
        assert!(index.whatrequires().is_empty());
    }
}
