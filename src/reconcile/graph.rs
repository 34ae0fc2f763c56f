use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use crate::errors::{CalcError, Result};

/// derivation edges between linked fields
///
/// `link(a, b)` recomputes `b` whenever `a` changes. `invert(a, b)` recomputes `b`
/// only when `a` itself is the edited field, which lets a pair such as percent and
/// amount drive each other without forming a forward cycle.
#[derive(Debug, Clone)]
pub struct DependencyGraph<F> {
    nodes: Vec<F>,
    links: Vec<(F, F)>,
    inversions: Vec<(F, F)>,
}

impl<F> Default for DependencyGraph<F> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            inversions: Vec::new(),
        }
    }
}

impl<F: Copy + Eq + Hash + Debug> DependencyGraph<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, from: F, to: F) -> Self {
        self.register(from);
        self.register(to);
        self.links.push((from, to));
        self
    }

    pub fn invert(mut self, from: F, to: F) -> Self {
        self.register(from);
        self.register(to);
        self.inversions.push((from, to));
        self
    }

    fn register(&mut self, field: F) {
        if !self.nodes.contains(&field) {
            self.nodes.push(field);
        }
    }

    fn dependents(&self, field: F) -> impl Iterator<Item = F> + '_ {
        self.links
            .iter()
            .filter(move |(from, _)| *from == field)
            .map(|(_, to)| *to)
    }

    /// fields to recompute after `trigger` is edited, dependencies first
    ///
    /// The trigger is never part of the plan, so every field is evaluated at most once.
    pub fn plan(&self, trigger: F) -> Result<Vec<F>> {
        let mut affected: HashSet<F> = HashSet::new();
        let mut queue: VecDeque<F> = self
            .inversions
            .iter()
            .filter(|(from, _)| *from == trigger)
            .map(|(_, to)| *to)
            .chain(self.dependents(trigger))
            .collect();

        while let Some(field) = queue.pop_front() {
            if field == trigger || !affected.insert(field) {
                continue;
            }
            queue.extend(self.dependents(field));
        }

        // kahn over the affected subgraph, ties broken by declaration order
        let edges: Vec<(F, F)> = self
            .links
            .iter()
            .filter(|(from, to)| affected.contains(from) && affected.contains(to))
            .copied()
            .collect();

        let mut pending: Vec<F> = self
            .nodes
            .iter()
            .filter(|field| affected.contains(*field))
            .copied()
            .collect();
        let mut order = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready = pending.iter().position(|field| {
                !edges
                    .iter()
                    .any(|(from, to)| to == field && pending.contains(from))
            });

            match ready {
                Some(idx) => order.push(pending.remove(idx)),
                None => {
                    return Err(CalcError::InvalidConfiguration {
                        message: format!("dependency cycle among {:?}", pending),
                    })
                }
            }
        }

        Ok(order)
    }
}
