use crate::status_collection::domain::{ArtefactId, PackageIndex};
use std::collections::HashSet;

/// ClosureWalker service computing transitive closures over a PackageIndex
///
/// Both directions are depth-first pre-order walks with an explicit stack,
/// so deep package graphs cannot overflow the call stack. Every node is
/// emitted at most once, which also makes cycles harmless.
pub struct ClosureWalker<'a> {
    index: &'a PackageIndex,
}

impl<'a> ClosureWalker<'a> {
    pub fn new(index: &'a PackageIndex) -> Self {
        Self { index }
    }

    /// Everything that transitively requires `artefact`, starting with itself
    ///
    /// # Arguments
    /// * `artefact` - The artefact whose dependents are collected
    ///
    /// # Returns
    /// The start node followed by each direct dependent's closure in
    /// dependent order
    pub fn all_whatrequires(&self, artefact: &'a ArtefactId) -> Vec<ArtefactId> {
        let index = self.index;
        Self::walk(std::iter::once(artefact), |a| index.whatrequires_of(a))
    }

    /// Everything the given artefacts transitively require, roots included
    ///
    /// One visited set is shared across all roots, so an artefact reachable
    /// from several roots appears once, at its first reachable position.
    pub fn all_requires<I>(&self, artefacts: I) -> Vec<ArtefactId>
    where
        I: IntoIterator<Item = &'a ArtefactId>,
    {
        let index = self.index;
        Self::walk(artefacts, |a| index.requires_of(a))
    }

    fn walk<I, F>(roots: I, neighbours: F) -> Vec<ArtefactId>
    where
        I: IntoIterator<Item = &'a ArtefactId>,
        F: Fn(&'a ArtefactId) -> &'a [ArtefactId],
    {
        // Reversed so the first root (and first neighbour) is popped first
        let mut stack: Vec<&'a ArtefactId> = roots.into_iter().collect();
        stack.reverse();

        let mut visited: HashSet<&'a ArtefactId> = HashSet::new();
        let mut closure = Vec::new();

        while let Some(artefact) = stack.pop() {
            if !visited.insert(artefact) {
                continue;
            }
            closure.push(artefact.clone());
            stack.extend(neighbours(artefact).iter().rev());
        }

        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn id(s: &str) -> ArtefactId {
        ArtefactId::new(s)
    }

    fn index(edges: &[(&str, &[&str])]) -> PackageIndex {
        let requires: BTreeMap<ArtefactId, BTreeSet<ArtefactId>> = edges
            .iter()
            .map(|(pkg, deps)| (id(pkg), deps.iter().map(|d| id(d)).collect()))
            .collect();
        PackageIndex::from_requires(requires)
    }

    fn ids(closure: &[ArtefactId]) -> Vec<&str> {
        closure.iter().map(ArtefactId::as_str).collect()
    }

    #[test]
    fn test_all_whatrequires_includes_start_node() {
        let index = index(&[
            ("app/1-1.noarch", &["lib/1-1.noarch"]),
            ("lib/1-1.noarch", &["libc/1-1.x86_64"]),
            ("libc/1-1.x86_64", &[]),
        ]);
        let walker = ClosureWalker::new(&index);

        for artefact in index.artefacts() {
            assert!(walker.all_whatrequires(artefact).contains(artefact));
        }
    }

    #[test]
    fn test_all_whatrequires_preorder() {
        let index = index(&[
            ("app/1-1.noarch", &["lib/1-1.noarch"]),
            ("tool/1-1.noarch", &["lib/1-1.noarch"]),
            ("lib/1-1.noarch", &["libc/1-1.x86_64"]),
            ("libc/1-1.x86_64", &[]),
        ]);
        let walker = ClosureWalker::new(&index);
        let start = id("libc/1-1.x86_64");

        assert_eq!(
            ids(&walker.all_whatrequires(&start)),
            vec![
                "libc/1-1.x86_64",
                "lib/1-1.noarch",
                "app/1-1.noarch",
                "tool/1-1.noarch"
            ]
        );
    }

    #[test]
    fn test_all_whatrequires_without_dependents() {
        let index = index(&[("app/1-1.noarch", &["lib/1-1.noarch"]), ("lib/1-1.noarch", &[])]);
        let walker = ClosureWalker::new(&index);
        let start = id("app/1-1.noarch");

        assert_eq!(walker.all_whatrequires(&start), vec![start.clone()]);
    }

    #[test]
    fn test_all_whatrequires_unknown_artefact() {
        let index = index(&[("app/1-1.noarch", &[])]);
        let walker = ClosureWalker::new(&index);
        let start = id("ghost/1-1.noarch");

        assert_eq!(walker.all_whatrequires(&start), vec![start.clone()]);
    }

    #[test]
    fn test_all_requires_without_dependencies() {
        let index = index(&[("leaf/1-1.noarch", &[])]);
        let walker = ClosureWalker::new(&index);
        let roots = [id("leaf/1-1.noarch")];

        assert_eq!(walker.all_requires(&roots), roots.to_vec());
    }

    #[test]
    fn test_all_requires_preorder() {
        let index = index(&[
            ("app/1-1.noarch", &["b/1-1.noarch", "a/1-1.noarch"]),
            ("a/1-1.noarch", &["c/1-1.noarch"]),
            ("b/1-1.noarch", &[]),
            ("c/1-1.noarch", &[]),
        ]);
        let walker = ClosureWalker::new(&index);
        let roots = [id("app/1-1.noarch")];

        // Dependencies are stored sorted, so a/ is walked before b/
        assert_eq!(
            ids(&walker.all_requires(&roots)),
            vec!["app/1-1.noarch", "a/1-1.noarch", "c/1-1.noarch", "b/1-1.noarch"]
        );
    }

    #[test]
    fn test_all_requires_multi_root_deduplicates() {
        let index = index(&[
            ("left/1-1.noarch", &["shared/1-1.noarch"]),
            ("right/1-1.noarch", &["shared/1-1.noarch"]),
            ("shared/1-1.noarch", &[]),
        ]);
        let walker = ClosureWalker::new(&index);
        let roots = [id("left/1-1.noarch"), id("right/1-1.noarch")];

        let closure = walker.all_requires(&roots);
        assert_eq!(
            ids(&closure),
            vec!["left/1-1.noarch", "shared/1-1.noarch", "right/1-1.noarch"]
        );
        assert_eq!(
            closure.iter().filter(|a| a.as_str() == "shared/1-1.noarch").count(),
            1
        );
    }

    #[test]
    fn test_all_requires_duplicate_roots() {
        let index = index(&[("a/1-1.noarch", &[])]);
        let walker = ClosureWalker::new(&index);
        let roots = [id("a/1-1.noarch"), id("a/1-1.noarch")];

        assert_eq!(walker.all_requires(&roots).len(), 1);
    }

    #[test]
    fn test_cycle_terminates() {
        // A -> B -> C -> A
        let index = index(&[
            ("a/1-1.noarch", &["b/1-1.noarch"]),
            ("b/1-1.noarch", &["c/1-1.noarch"]),
            ("c/1-1.noarch", &["a/1-1.noarch"]),
        ]);
        let walker = ClosureWalker::new(&index);
        let a = id("a/1-1.noarch");

        assert_eq!(walker.all_requires(std::iter::once(&a)).len(), 3);
        assert_eq!(walker.all_whatrequires(&a).len(), 3);
        assert_eq!(
            ids(&walker.all_whatrequires(&a)),
            vec!["a/1-1.noarch", "c/1-1.noarch", "b/1-1.noarch"]
        );
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let names: Vec<String> = (0..50_000).map(|i| format!("p{}/1-1.noarch", i)).collect();
        let mut requires: BTreeMap<ArtefactId, BTreeSet<ArtefactId>> = BTreeMap::new();
        for pair in names.windows(2) {
            requires
                .entry(id(&pair[0]))
                .or_default()
                .insert(id(&pair[1]));
        }
        requires.entry(id(&names[names.len() - 1])).or_default();
        let index = PackageIndex::from_requires(requires);
        let walker = ClosureWalker::new(&index);

        let first = id(&names[0]);
        let last = id(&names[names.len() - 1]);
        assert_eq!(walker.all_requires(std::iter::once(&first)).len(), 50_000);
        assert_eq!(walker.all_whatrequires(&last).len(), 50_000);
    }
}
