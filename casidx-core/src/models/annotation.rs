use std::fmt::{self, Display};
use std::ops::Range;

use crate::errors::AnnotationError;
use crate::models::TypeId;

/// Owner-assigned identity of a stored record.
///
/// Two annotations with the same span and type are still distinct records when their ids
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FsId(pub u32);

impl Display for FsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything with a `[begin, end)` position over the text buffer.
pub trait Span {
    fn begin(&self) -> u32;
    fn end(&self) -> u32;
}

///
/// A typed record over the shared text buffer, inclusive of `begin`, exclusive of `end`.
///
/// The fields are flat so that the sort order and the predicates never go through dynamic
/// dispatch. Construct through [`Annotation::new`], which rejects `begin > end`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub id: FsId,
    pub type_id: TypeId,
    pub begin: u32,
    pub end: u32,
}

impl Annotation {
    pub fn new(id: FsId, type_id: TypeId, begin: u32, end: u32) -> Result<Self, AnnotationError> {
        if begin > end {
            return Err(AnnotationError::InvalidSpan { begin, end });
        }
        Ok(Annotation {
            id,
            type_id,
            begin,
            end,
        })
    }

    ///
    /// Number of offsets covered by the annotation
    ///
    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.begin
    }

    #[inline]
    pub fn is_zero_width(&self) -> bool {
        self.begin == self.end
    }

    ///
    /// Get the slice `[begin, end)` of the text buffer this annotation points into.
    ///
    /// Offsets are byte offsets, so both ends must fall on UTF-8 character boundaries.
    ///
    pub fn covered_text<'t>(&self, text: &'t str) -> Result<&'t str, AnnotationError> {
        let (begin, end) = (self.begin as usize, self.end as usize);
        if end > text.len() {
            return Err(AnnotationError::TextOutOfBounds {
                begin: self.begin,
                end: self.end,
                len: text.len(),
            });
        }
        text.get(begin..end).ok_or(AnnotationError::NotCharBoundary {
            begin: self.begin,
            end: self.end,
        })
    }

    ///
    /// Get the tab separated string of the annotation: `id type begin end`
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.id, self.type_id, self.begin, self.end)
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl Span for Annotation {
    #[inline]
    fn begin(&self) -> u32 {
        self.begin
    }

    #[inline]
    fn end(&self) -> u32 {
        self.end
    }
}

impl<S: Span + ?Sized> Span for &S {
    #[inline]
    fn begin(&self) -> u32 {
        (**self).begin()
    }

    #[inline]
    fn end(&self) -> u32 {
        (**self).end()
    }
}

impl Span for (u32, u32) {
    #[inline]
    fn begin(&self) -> u32 {
        self.0
    }

    #[inline]
    fn end(&self) -> u32 {
        self.1
    }
}

impl Span for Range<u32> {
    #[inline]
    fn begin(&self) -> u32 {
        self.start
    }

    #[inline]
    fn end(&self) -> u32 {
        self.end
    }
}
