//! Positional queries against an [`AnnotationIndex`].
//!
//! Every query is ambiguous and yields records in index order. Positions are given as any
//! [`Span`]: an annotation, a `(begin, end)` tuple or a `begin..end` range.

use casidx_core::models::{Annotation, Span};
use casidx_core::order::SortKey;
use casidx_core::predicates;

use crate::index::AnnotationIndex;

impl AnnotationIndex {
    /// Records colocated with `span`.
    pub fn at<S: Span>(&self, span: S) -> impl Iterator<Item = &Annotation> + '_ {
        let (begin, end) = (span.begin(), span.end());
        self.entries
            .range(SortKey::first_at(begin, end)..)
            .map(|(_, a)| a)
            .take_while(move |a| a.begin == begin && a.end == end)
    }

    /// Records lying within `span`.
    pub fn covered_by<S: Span>(&self, span: S) -> impl Iterator<Item = &Annotation> + '_ {
        let (begin, end) = (span.begin(), span.end());
        self.entries
            .range(SortKey::first_at_begin(begin)..)
            .map(|(_, a)| a)
            .take_while(move |a| a.begin <= end)
            .filter(move |a| a.end <= end)
    }

    /// Records spanning over all of `span`.
    pub fn covering<S: Span>(&self, span: S) -> impl Iterator<Item = &Annotation> + '_ {
        let (begin, end) = (span.begin(), span.end());
        self.iter()
            .take_while(move |a| a.begin <= begin)
            .filter(move |a| a.end >= end)
    }

    /// Records overlapping `span`, zero width records included.
    pub fn overlapping<S: Span>(&self, span: S) -> impl Iterator<Item = &Annotation> + '_ {
        let (begin, end) = (span.begin(), span.end());
        self.iter()
            .take_while(move |a| a.begin <= end)
            .filter(move |a| predicates::overlaps(a.begin, a.end, begin, end))
    }

    /// Records starting at or after the end of `span`.
    pub fn following<S: Span>(&self, span: S) -> impl Iterator<Item = &Annotation> + '_ {
        let end = span.end();
        self.entries
            .range(SortKey::first_at_begin(end)..)
            .map(|(_, a)| a)
    }

    /// Records ending at or before the begin of `span`.
    pub fn preceding<S: Span>(&self, span: S) -> impl Iterator<Item = &Annotation> + '_ {
        let begin = span.begin();
        self.iter()
            .take_while(move |a| a.begin <= begin)
            .filter(move |a| a.end <= begin)
    }
}
