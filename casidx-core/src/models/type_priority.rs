use std::cmp::Ordering;
use std::collections::BTreeSet;

use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
use log::warn;

use crate::errors::TypeSystemError;
use crate::models::{TypeId, TypeSystem};

/// A declaration `before < after` that was dropped because the opposite order had already
/// been declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityConflict {
    pub before: TypeId,
    pub after: TypeId,
}

///
/// Collects type priority declarations and turns them into a [`TypePriorities`] table.
///
/// Declarations are chains: `add(&[a, b, c])` declares `a < b` and `b < c`. Chains from
/// several sources can be merged; the result is a partial order over the mentioned types.
///
/// A declaration that contradicts an earlier one (it would close a cycle) is dropped with a
/// warning and kept in [`conflicts`](Self::conflicts). The first declaration wins; the tie
/// order of the affected types is then simply whatever the surviving declarations imply.
///
#[derive(Debug, Default, Clone)]
pub struct TypePriorityBuilder {
    nodes: Vec<TypeId>,
    successors: HashMap<TypeId, Vec<TypeId>>,
    conflicts: Vec<PriorityConflict>,
}

impl TypePriorityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `chain[0] < chain[1] < ...`.
    pub fn add(&mut self, chain: &[TypeId]) -> &mut Self {
        for t in chain {
            self.node(*t);
        }
        for pair in chain.windows(2) {
            self.add_pair(pair[0], pair[1]);
        }
        self
    }

    /// Same as [`add`](Self::add), resolving type names through `ts`.
    pub fn add_names(
        &mut self,
        ts: &TypeSystem,
        chain: &[&str],
    ) -> Result<&mut Self, TypeSystemError> {
        let ids = chain
            .iter()
            .map(|name| ts.require(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.add(&ids))
    }

    pub fn conflicts(&self) -> &[PriorityConflict] {
        &self.conflicts
    }

    fn node(&mut self, t: TypeId) {
        if !self.successors.contains_key(&t) {
            self.successors.insert(t, Vec::new());
            self.nodes.push(t);
        }
    }

    fn add_pair(&mut self, before: TypeId, after: TypeId) {
        if before == after || self.path(before, after) {
            return;
        }
        if self.path(after, before) {
            warn!(
                "Dropping type priority {} < {}: the opposite order is already declared",
                before, after
            );
            self.conflicts.push(PriorityConflict { before, after });
            return;
        }
        self.successors.entry(before).or_default().push(after);
    }

    fn path(&self, from: TypeId, to: TypeId) -> bool {
        self.reachable(from).contains(&to)
    }

    fn reachable(&self, from: TypeId) -> HashSet<TypeId> {
        let mut seen = HashSet::default();
        let mut stack = vec![from];
        while let Some(t) = stack.pop() {
            if let Some(next) = self.successors.get(&t) {
                for n in next {
                    if seen.insert(*n) {
                        stack.push(*n);
                    }
                }
            }
        }
        seen
    }

    ///
    /// Build the priority table.
    ///
    /// The declared graph is linearized with Kahn's algorithm, picking the earliest declared
    /// type whenever several are ready. Types of `ts` without a declaration inherit the
    /// position of their nearest declared ancestor.
    ///
    pub fn build(&self, ts: &TypeSystem) -> TypePriorities {
        let position: HashMap<TypeId, usize> =
            self.nodes.iter().enumerate().map(|(i, t)| (*t, i)).collect();

        let mut in_degree: HashMap<TypeId, usize> = self.nodes.iter().map(|t| (*t, 0)).collect();
        for next in self.successors.values() {
            for n in next {
                *in_degree.entry(*n).or_default() += 1;
            }
        }

        let mut ready: BTreeSet<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, t)| in_degree[*t] == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(i) = ready.pop_first() {
            let t = self.nodes[i];
            order.push(t);
            for n in &self.successors[&t] {
                let degree = in_degree.entry(*n).or_default();
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(position[n]);
                }
            }
        }

        let rank = order
            .iter()
            .enumerate()
            .map(|(r, t)| (*t, r as u32))
            .collect();

        let reach = self
            .nodes
            .iter()
            .map(|t| (*t, self.reachable(*t)))
            .collect();

        let mut inherited = HashMap::default();
        for t in ts.ids() {
            if self.successors.contains_key(&t) {
                continue;
            }
            if let Some(ancestor) = ts
                .ancestors(t)
                .find(|a| self.successors.contains_key(a))
            {
                inherited.insert(t, ancestor);
            }
        }

        TypePriorities {
            order,
            rank,
            reach,
            inherited,
        }
    }
}

///
/// The externally supplied priority table used to break ties between colocated annotations.
///
/// The table is an explicit value handed to the index at construction; nothing about it is
/// global. [`relation`](Self::relation) answers "was an order declared?", while
/// [`rank`](Self::rank) gives the linearized position used by the sort order, which is
/// arbitrary (but fixed) for unrelated types.
///
#[derive(Debug, Default, Clone)]
pub struct TypePriorities {
    order: Vec<TypeId>,
    rank: HashMap<TypeId, u32>,
    reach: HashMap<TypeId, HashSet<TypeId>>,
    inherited: HashMap<TypeId, TypeId>,
}

impl TypePriorities {
    /// A table without any declared priority.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The declared types in their linearized order.
    pub fn order(&self) -> &[TypeId] {
        &self.order
    }

    /// The declared type whose priority `t` uses, if any.
    pub fn effective(&self, t: TypeId) -> Option<TypeId> {
        if self.rank.contains_key(&t) {
            Some(t)
        } else {
            self.inherited.get(&t).copied()
        }
    }

    ///
    /// Linearized position of `t`. Types without any (inherited) declaration rank last.
    ///
    #[inline]
    pub fn rank(&self, t: TypeId) -> u32 {
        self.effective(t)
            .and_then(|e| self.rank.get(&e).copied())
            .unwrap_or(u32::MAX)
    }

    ///
    /// The declared relation between `a` and `b`.
    ///
    /// `Some(Less)` means `a` is declared before `b`, `Some(Greater)` the opposite. `None` when
    /// no order was declared between them, including when both resolve to the same declared
    /// type.
    ///
    pub fn relation(&self, a: TypeId, b: TypeId) -> Option<Ordering> {
        let (ea, eb) = (self.effective(a)?, self.effective(b)?);
        if ea == eb {
            return None;
        }
        if self.reach.get(&ea).is_some_and(|r| r.contains(&eb)) {
            Some(Ordering::Less)
        } else if self.reach.get(&eb).is_some_and(|r| r.contains(&ea)) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    /// `true` when `a` is declared strictly before `b`.
    #[inline]
    pub fn precedes(&self, a: TypeId, b: TypeId) -> bool {
        self.relation(a, b) == Some(Ordering::Less)
    }
}
