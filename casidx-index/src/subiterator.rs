use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::ops::Bound::{self, Excluded, Included, Unbounded as Open};

use casidx_core::models::{Annotation, TypePriorities};
use casidx_core::order::SortKey;

use crate::errors::IndexError;
use crate::index::AnnotationIndex;
use crate::options::SameSpanPolicy;

/// What a walk is bounded by.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Bounds {
    Unbounded,
    /// A container record. Colocated candidates go through the type priority rules.
    Container { annotation: Annotation, key: SortKey },
    /// Raw offsets. Colocated candidates are always in.
    Span { begin: u32, end: u32 },
}

enum Step {
    Yield,
    Skip,
    Stop,
}

///
/// The state of a forward walk, independent of how the index is borrowed.
///
/// `position` is the lower bound of the remaining key range. The unambiguous rule is applied
/// by moving it past everything that starts before the end of the last yielded record.
///
#[derive(Debug, Clone)]
pub(crate) struct CursorState {
    bounds: Bounds,
    ambiguous: bool,
    strict: bool,
    position: Bound<SortKey>,
    done: bool,
}

impl CursorState {
    pub(crate) fn new(bounds: Bounds, ambiguous: bool, strict: bool) -> Self {
        let position = match bounds {
            Bounds::Unbounded => Open,
            Bounds::Container { annotation, .. } => {
                Included(SortKey::first_at(annotation.begin, annotation.end))
            }
            Bounds::Span { begin, end } => Included(SortKey::first_at(begin, end)),
        };
        CursorState {
            bounds,
            ambiguous,
            strict,
            position,
            done: false,
        }
    }

    pub(crate) fn advance<'a>(
        &mut self,
        entries: &'a BTreeMap<SortKey, Annotation>,
        priorities: &TypePriorities,
        policy: SameSpanPolicy,
    ) -> Option<&'a Annotation> {
        if self.done {
            return None;
        }
        for (key, candidate) in entries.range((self.position, Open)) {
            self.position = Excluded(*key);
            match self.step(key, candidate, priorities, policy) {
                Step::Yield => {
                    if !self.ambiguous && candidate.end > candidate.begin {
                        self.position = Included(SortKey::first_at_begin(candidate.end));
                    }
                    return Some(candidate);
                }
                Step::Skip => continue,
                Step::Stop => break,
            }
        }
        self.done = true;
        None
    }

    fn step(
        &self,
        key: &SortKey,
        candidate: &Annotation,
        priorities: &TypePriorities,
        policy: SameSpanPolicy,
    ) -> Step {
        let (bound_begin, bound_end) = match self.bounds {
            Bounds::Unbounded => return Step::Yield,
            Bounds::Container { annotation, .. } => (annotation.begin, annotation.end),
            Bounds::Span { begin, end } => (begin, end),
        };

        if candidate.begin > bound_end {
            return Step::Stop;
        }
        if self.strict && candidate.end > bound_end {
            return Step::Skip;
        }

        match self.bounds {
            Bounds::Container {
                annotation,
                key: container_key,
            } if candidate.begin == bound_begin && candidate.end == bound_end => {
                if candidate.id == annotation.id {
                    return Step::Skip;
                }
                let include = match priorities.relation(annotation.type_id, candidate.type_id) {
                    Some(Ordering::Less) => true,
                    Some(_) => false,
                    None => match policy {
                        SameSpanPolicy::Exclude => false,
                        SameSpanPolicy::Include => true,
                        SameSpanPolicy::IndexOrder => container_key < *key,
                    },
                };
                if include { Step::Yield } else { Step::Skip }
            }
            _ => Step::Yield,
        }
    }
}

///
/// A borrowed, forward-only walk over an [`AnnotationIndex`].
///
/// Produced by [`AnnotationIndex::iterator`], [`AnnotationIndex::subiterator`] and
/// [`AnnotationIndex::subiterator_span`]. The index cannot be mutated while the iterator is
/// alive.
///
pub struct AnnotationIter<'a> {
    index: &'a AnnotationIndex,
    state: CursorState,
}

impl<'a> AnnotationIter<'a> {
    pub(crate) fn new(index: &'a AnnotationIndex, state: CursorState) -> Self {
        AnnotationIter { index, state }
    }
}

impl<'a> Iterator for AnnotationIter<'a> {
    type Item = &'a Annotation;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.advance(
            &self.index.entries,
            self.index.priorities(),
            self.index.options().same_span_policy,
        )
    }
}

impl FusedIterator for AnnotationIter<'_> {}

///
/// A walk over an [`AnnotationIndex`] that does not borrow it.
///
/// The cursor remembers the [`generation`](AnnotationIndex::generation) of the index it was
/// opened on. Advancing it against an index that was modified since fails with
/// [`IndexError::ConcurrentModification`] instead of yielding records from a changed order.
///
/// ```
/// use casidx_core::models::{Annotation, FsId, TypeId, TypePriorities};
/// use casidx_index::{AnnotationIndex, IndexError};
///
/// let mut index = AnnotationIndex::new(TypePriorities::empty());
/// index.insert(Annotation::new(FsId(0), TypeId(1), 0, 5).unwrap());
///
/// let mut cursor = index.cursor(true);
/// index.insert(Annotation::new(FsId(1), TypeId(1), 6, 9).unwrap());
///
/// assert!(matches!(
///     cursor.next(&index),
///     Err(IndexError::ConcurrentModification { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct IndexCursor {
    state: CursorState,
    generation: u64,
}

impl IndexCursor {
    pub(crate) fn new(state: CursorState, generation: u64) -> Self {
        IndexCursor { state, generation }
    }

    /// Generation of the index this cursor was opened on.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next(&mut self, index: &AnnotationIndex) -> Result<Option<Annotation>, IndexError> {
        if index.generation() != self.generation {
            return Err(IndexError::ConcurrentModification {
                expected: self.generation,
                found: index.generation(),
            });
        }
        Ok(self
            .state
            .advance(
                &index.entries,
                index.priorities(),
                index.options().same_span_policy,
            )
            .copied())
    }

    /// Drain the remaining records.
    pub fn collect_remaining(&mut self, index: &AnnotationIndex) -> Result<Vec<Annotation>, IndexError> {
        let mut out = Vec::new();
        while let Some(a) = self.next(index)? {
            out.push(a);
        }
        Ok(out)
    }
}
