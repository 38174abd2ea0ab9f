use std::collections::btree_map::{BTreeMap, Values};
use std::sync::Arc;

use fxhash::FxHashMap as HashMap;
use log::{debug, warn};

use casidx_core::models::{Annotation, FsId, TypeId, TypePriorities, TypeSystem};
use casidx_core::order::{AnnotationComparator, SortKey};

use crate::options::IndexOptions;
use crate::subiterator::{AnnotationIter, Bounds, CursorState, IndexCursor};

/// Ambiguous walk over every record of an [`AnnotationIndex`], in sort order.
pub type Iter<'a> = Values<'a, SortKey, Annotation>;

///
/// An ordered multiset of annotations, kept in the canonical sort order of
/// [`AnnotationComparator`] under the priority table the index was built with.
///
/// Records are identified by their [`FsId`]; the same id can be indexed only once. Every
/// successful mutation bumps [`generation`](Self::generation), which detached
/// [`IndexCursor`]s use to detect that the index changed under them.
///
/// # Examples
///
/// ```
/// use casidx_core::models::{Annotation, FsId, TypeId, TypePriorities};
/// use casidx_index::AnnotationIndex;
///
/// let mut index = AnnotationIndex::new(TypePriorities::empty());
/// for (i, (b, e)) in [(5, 9), (0, 5), (2, 4)].into_iter().enumerate() {
///     index.insert(Annotation::new(FsId(i as u32), TypeId(1), b, e).unwrap());
/// }
///
/// let walk: Vec<(u32, u32)> = index.iterator(false).map(|a| (a.begin, a.end)).collect();
/// assert_eq!(walk, vec![(0, 5), (5, 9)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex {
    pub(crate) entries: BTreeMap<SortKey, Annotation>,
    keys: HashMap<FsId, SortKey>,
    priorities: Arc<TypePriorities>,
    options: IndexOptions,
    generation: u64,
}

impl AnnotationIndex {
    pub fn new(priorities: TypePriorities) -> Self {
        Self::with_options(priorities, IndexOptions::default())
    }

    pub fn with_options(priorities: TypePriorities, options: IndexOptions) -> Self {
        Self::with_shared_priorities(Arc::new(priorities), options)
    }

    /// Build an index over a priority table shared with other indexes.
    pub fn with_shared_priorities(priorities: Arc<TypePriorities>, options: IndexOptions) -> Self {
        AnnotationIndex {
            entries: BTreeMap::new(),
            keys: HashMap::default(),
            priorities,
            options,
            generation: 0,
        }
    }

    pub fn priorities(&self) -> &TypePriorities {
        &self.priorities
    }

    pub fn shared_priorities(&self) -> Arc<TypePriorities> {
        Arc::clone(&self.priorities)
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    pub fn comparator(&self) -> AnnotationComparator<'_> {
        AnnotationComparator::new(&self.priorities)
    }

    /// Incremented on every successful insert, remove and clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///
    /// Add a record to the index.
    ///
    /// Returns `false`, leaving the index untouched, when a record with the same id is
    /// already indexed.
    ///
    pub fn insert(&mut self, annotation: Annotation) -> bool {
        if self.keys.contains_key(&annotation.id) {
            warn!("Annotation {} is already indexed, skipping", annotation.id);
            return false;
        }
        let key = self.comparator().sort_key(&annotation);
        self.entries.insert(key, annotation);
        self.keys.insert(annotation.id, key);
        self.generation += 1;
        debug!("Indexed annotation {}", annotation);
        true
    }

    ///
    /// Remove `annotation` from the index.
    ///
    /// Only removes the stored record if it is equal to `annotation`; a different record with
    /// the same id is left alone.
    ///
    pub fn remove(&mut self, annotation: &Annotation) -> bool {
        match self.get(annotation.id) {
            Some(stored) if stored == annotation => self.remove_id(annotation.id).is_some(),
            _ => false,
        }
    }

    /// Remove the record with the given id, returning it.
    pub fn remove_id(&mut self, id: FsId) -> Option<Annotation> {
        let key = self.keys.remove(&id)?;
        let removed = self.entries.remove(&key);
        self.generation += 1;
        debug!("Removed annotation {}", id);
        removed
    }

    pub fn get(&self, id: FsId) -> Option<&Annotation> {
        self.keys.get(&id).and_then(|key| self.entries.get(key))
    }

    pub fn contains(&self, annotation: &Annotation) -> bool {
        self.get(annotation.id) == Some(annotation)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
        self.generation += 1;
    }

    /// Every record in sort order. Double ended.
    pub fn iter(&self) -> Iter<'_> {
        self.entries.values()
    }

    ///
    /// Walk the whole index.
    ///
    /// With `ambiguous = false`, after yielding `a` the walk continues with the next record `b`
    /// such that `a.end <= b.begin`, skipping everything that overlaps `a`.
    ///
    pub fn iterator(&self, ambiguous: bool) -> AnnotationIter<'_> {
        AnnotationIter::new(self, CursorState::new(Bounds::Unbounded, ambiguous, false))
    }

    ///
    /// Walk the records positioned inside `container`.
    ///
    /// # Arguments
    /// - container: bounding annotation, it does not need to be indexed itself
    /// - ambiguous: `false` to skip records overlapping an already yielded one
    /// - strict: `true` to require full containment, `false` to only require the begin
    ///   offset to fall within the container
    ///
    /// Records colocated with the container are yielded iff the container's type is
    /// declared before theirs. When no order is declared between the two types, the
    /// [`SameSpanPolicy`](crate::SameSpanPolicy) of the index decides. The container itself
    /// is never yielded.
    ///
    pub fn subiterator(
        &self,
        container: &Annotation,
        ambiguous: bool,
        strict: bool,
    ) -> AnnotationIter<'_> {
        AnnotationIter::new(self, self.sub_state(container, ambiguous, strict))
    }

    /// Ambiguous, strict subiterator.
    pub fn subiterator_default(&self, container: &Annotation) -> AnnotationIter<'_> {
        self.subiterator(container, true, true)
    }

    ///
    /// Walk the records positioned inside `begin..end`.
    ///
    /// Unlike [`subiterator`](Self::subiterator) there is no container type, so every record
    /// colocated with `begin..end` is yielded.
    ///
    pub fn subiterator_span(
        &self,
        begin: u32,
        end: u32,
        ambiguous: bool,
        strict: bool,
    ) -> AnnotationIter<'_> {
        AnnotationIter::new(
            self,
            CursorState::new(Bounds::Span { begin, end }, ambiguous, strict),
        )
    }

    /// A detached cursor over the whole index. See [`IndexCursor`].
    pub fn cursor(&self, ambiguous: bool) -> IndexCursor {
        debug!("Opening cursor at generation {}", self.generation);
        IndexCursor::new(
            CursorState::new(Bounds::Unbounded, ambiguous, false),
            self.generation,
        )
    }

    /// A detached cursor with the bounds of [`subiterator`](Self::subiterator).
    pub fn subcursor(&self, container: &Annotation, ambiguous: bool, strict: bool) -> IndexCursor {
        debug!(
            "Opening subcursor for {} at generation {}",
            container, self.generation
        );
        IndexCursor::new(
            self.sub_state(container, ambiguous, strict),
            self.generation,
        )
    }

    fn sub_state(&self, container: &Annotation, ambiguous: bool, strict: bool) -> CursorState {
        let bounds = Bounds::Container {
            annotation: *container,
            key: self.comparator().sort_key(container),
        };
        CursorState::new(bounds, ambiguous, strict)
    }

    ///
    /// A new index holding the records of type `type_id` and its subtypes.
    ///
    /// The view shares the priority table and options of this index.
    ///
    pub fn of_type(&self, ts: &TypeSystem, type_id: TypeId) -> AnnotationIndex {
        let mut view = AnnotationIndex::with_shared_priorities(self.shared_priorities(), self.options);
        for (key, annotation) in &self.entries {
            if ts.subsumes(type_id, annotation.type_id) {
                view.entries.insert(*key, *annotation);
                view.keys.insert(annotation.id, *key);
            }
        }
        view
    }
}

impl<'a> IntoIterator for &'a AnnotationIndex {
    type Item = &'a Annotation;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Annotation> for AnnotationIndex {
    fn extend<T: IntoIterator<Item = Annotation>>(&mut self, iter: T) {
        for annotation in iter {
            self.insert(annotation);
        }
    }
}
