//! The canonical annotation sort order.
//!
//! 1. `begin` ascending
//! 2. `end` descending, so longer spans come before shorter spans starting at the same offset
//! 3. type priority rank ascending
//! 4. type id, then record id, as an arbitrary but deterministic final tie-break
//!
//! Rules 1 and 2 agree with the positional predicates by construction: if `a` sorts before
//! `b` on position alone, then `a.begin <= b.begin`, and on equal begins `a` covers `b`.
//!
//! If the priority table was fed contradicting declarations, the dropped declarations simply
//! leave the affected types to the arbitrary tie-break of rule 4. The order is still total.

use std::cmp::{Ordering, Reverse};

use crate::models::{Annotation, FsId, TypeId, TypePriorities};

///
/// The position of an annotation in the index, as a single `Ord` value.
///
/// Field order matters: the derived `Ord` compares fields top to bottom.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub begin: u32,
    pub end: Reverse<u32>,
    pub type_rank: u32,
    pub type_id: TypeId,
    pub id: FsId,
}

impl SortKey {
    /// The smallest key any annotation spanning exactly `begin..end` can have.
    #[inline]
    pub const fn first_at(begin: u32, end: u32) -> Self {
        SortKey {
            begin,
            end: Reverse(end),
            type_rank: 0,
            type_id: TypeId(0),
            id: FsId(0),
        }
    }

    /// The smallest key any annotation starting at `begin` can have.
    #[inline]
    pub const fn first_at_begin(begin: u32) -> Self {
        Self::first_at(begin, u32::MAX)
    }

    #[inline]
    pub const fn end(&self) -> u32 {
        self.end.0
    }
}

///
/// Compares annotations under a given [`TypePriorities`] table.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use casidx_core::models::{Annotation, FsId, TypeId, TypePriorities};
/// use casidx_core::order::AnnotationComparator;
///
/// let priorities = TypePriorities::empty();
/// let cmp = AnnotationComparator::new(&priorities);
///
/// let long = Annotation::new(FsId(0), TypeId(1), 0, 10).unwrap();
/// let short = Annotation::new(FsId(1), TypeId(1), 0, 4).unwrap();
/// assert_eq!(cmp.compare(&long, &short), Ordering::Less);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AnnotationComparator<'p> {
    priorities: &'p TypePriorities,
}

impl<'p> AnnotationComparator<'p> {
    pub fn new(priorities: &'p TypePriorities) -> Self {
        AnnotationComparator { priorities }
    }

    pub fn priorities(&self) -> &'p TypePriorities {
        self.priorities
    }

    #[inline]
    pub fn sort_key(&self, a: &Annotation) -> SortKey {
        SortKey {
            begin: a.begin,
            end: Reverse(a.end),
            type_rank: self.priorities.rank(a.type_id),
            type_id: a.type_id,
            id: a.id,
        }
    }

    /// Rules 1 and 2 only.
    #[inline]
    pub fn compare_positions(a: &Annotation, b: &Annotation) -> Ordering {
        a.begin.cmp(&b.begin).then_with(|| b.end.cmp(&a.end))
    }

    ///
    /// Rules 1 to 3. `Equal` means the order between `a` and `b` is unspecified: same span
    /// and the same linearized type position.
    ///
    pub fn compare_annotations(&self, a: &Annotation, b: &Annotation) -> Ordering {
        Self::compare_positions(a, b).then_with(|| {
            self.priorities
                .rank(a.type_id)
                .cmp(&self.priorities.rank(b.type_id))
        })
    }

    /// The full total order used by the index.
    #[inline]
    pub fn compare(&self, a: &Annotation, b: &Annotation) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    pub fn sort(&self, annotations: &mut [Annotation]) {
        annotations.sort_by_cached_key(|a| self.sort_key(a));
    }
}
