//! Positional relationships between two spans `X = (x_begin, x_end)` and `Y = (y_begin, y_end)`.
//!
//! Every relationship exists as a plain function over four offsets, and as a method of
//! [`SpanPredicates`] in two forms: one taking another [`Span`], one taking the raw bounds of
//! `Y`. The methods delegate to the plain functions, so all forms agree.
//!
//! Zero-width spans are legal everywhere. [`overlaps`] counts a zero-width span as
//! overlapping when it lies inside the other span or sits on the other's begin.
//!
//! ```
//! use casidx_core::predicates::{self, SpanPredicates};
//!
//! assert!(predicates::overlaps(5, 5, 3, 8));
//! assert!(predicates::overlaps(5, 5, 5, 9));
//! assert!(!predicates::overlaps(5, 5, 0, 5));
//!
//! assert!((10u32, 20u32).covers(&(12u32, 15u32)));
//! assert!((12u32, 15u32).covered_by_range(10, 20));
//! ```

use crate::models::Span;

/// `X` starts at or before `Y` and ends at or after it.
#[inline]
pub const fn covers(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> bool {
    x_begin <= y_begin && x_end >= y_end
}

/// Mirror of [`covers`].
#[inline]
pub const fn covered_by(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> bool {
    covers(y_begin, y_end, x_begin, x_end)
}

/// Same begin, same end.
#[inline]
pub const fn colocated(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> bool {
    x_begin == y_begin && x_end == y_end
}

///
/// The spans intersect.
///
/// Strict separation on either side rules out an overlap, unless the separated side is a
/// zero-width span sitting exactly on the other span's begin.
///
#[inline]
pub const fn overlaps(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> bool {
    let x_before = x_end <= y_begin && !(x_begin == x_end && x_begin == y_begin);
    let y_before = y_end <= x_begin && !(y_begin == y_end && y_begin == x_begin);
    !(x_before || y_before)
}

/// `X` starts at or before `Y` and ends strictly before `Y` ends.
#[inline]
pub const fn overlaps_left(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> bool {
    x_begin <= y_begin && x_end < y_end
}

/// `X` starts strictly after `Y` starts and ends at or after `Y` ends.
#[inline]
pub const fn overlaps_right(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> bool {
    x_begin > y_begin && x_end >= y_end
}

/// `X` ends at or before `Y` begins.
#[inline]
pub const fn left_of(_x_begin: u32, x_end: u32, y_begin: u32, _y_end: u32) -> bool {
    x_end <= y_begin
}

/// `X` starts at or after `Y` ends.
#[inline]
pub const fn right_of(x_begin: u32, _x_end: u32, _y_begin: u32, y_end: u32) -> bool {
    x_begin >= y_end
}

macro_rules! span_predicate {
    ($(#[$doc:meta])* $name:ident, $range_name:ident, $raw:path) => {
        $(#[$doc])*
        #[inline]
        fn $name<S: Span + ?Sized>(&self, other: &S) -> bool {
            $raw(self.begin(), self.end(), other.begin(), other.end())
        }

        $(#[$doc])*
        #[inline]
        fn $range_name(&self, begin: u32, end: u32) -> bool {
            $raw(self.begin(), self.end(), begin, end)
        }
    };
}

///
/// Positional predicates as methods on anything implementing [`Span`].
///
/// `self` plays the role of `X`. The `*_range` variants take `Y` as raw bounds, which is how
/// query ranges that are not stored records get compared.
///
pub trait SpanPredicates: Span {
    span_predicate!(
        /// See [`covers`](crate::predicates::covers).
        covers, covers_range, covers
    );
    span_predicate!(
        /// See [`covered_by`](crate::predicates::covered_by).
        covered_by, covered_by_range, covered_by
    );
    span_predicate!(
        /// See [`colocated`](crate::predicates::colocated).
        colocated, colocated_range, colocated
    );
    span_predicate!(
        /// See [`overlaps`](crate::predicates::overlaps).
        overlaps, overlaps_range, overlaps
    );
    span_predicate!(
        /// See [`overlaps_left`](crate::predicates::overlaps_left).
        overlaps_left, overlaps_left_range, overlaps_left
    );
    span_predicate!(
        /// See [`overlaps_right`](crate::predicates::overlaps_right).
        overlaps_right, overlaps_right_range, overlaps_right
    );
    span_predicate!(
        /// See [`left_of`](crate::predicates::left_of).
        left_of, left_of_range, left_of
    );
    span_predicate!(
        /// See [`right_of`](crate::predicates::right_of).
        right_of, right_of_range, right_of
    );
}

impl<T: Span + ?Sized> SpanPredicates for T {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{Annotation, FsId, TypeId};

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Position {
        Colocated,
        Overlapping,
        OverlappingLeft,
        OverlappingRight,
        Covering,
        CoveredBy,
        LeftOf,
        RightOf,
    }

    use Position::*;

    const ALL: [Position; 8] = [
        Colocated,
        Overlapping,
        OverlappingLeft,
        OverlappingRight,
        Covering,
        CoveredBy,
        LeftOf,
        RightOf,
    ];

    const BEGIN: u32 = 10;
    const END: u32 = 20;
    const Z: u32 = 10;
    const MAX: u32 = u32::MAX;

    type Raw = fn(u32, u32, u32, u32) -> bool;

    fn raw(position: Position) -> Raw {
        match position {
            Colocated => colocated,
            Overlapping => overlaps,
            OverlappingLeft => overlaps_left,
            OverlappingRight => overlaps_right,
            Covering => covers,
            CoveredBy => covered_by,
            LeftOf => left_of,
            RightOf => right_of,
        }
    }

    fn annotation(begin: u32, end: u32) -> Annotation {
        Annotation::new(FsId(0), TypeId(0), begin, end).unwrap()
    }

    fn via_annotations(position: Position, x: (u32, u32), y: (u32, u32)) -> bool {
        let (x, y) = (annotation(x.0, x.1), annotation(y.0, y.1));
        match position {
            Colocated => x.colocated(&y),
            Overlapping => x.overlaps(&y),
            OverlappingLeft => x.overlaps_left(&y),
            OverlappingRight => x.overlaps_right(&y),
            Covering => x.covers(&y),
            CoveredBy => x.covered_by(&y),
            LeftOf => x.left_of(&y),
            RightOf => x.right_of(&y),
        }
    }

    fn via_range(position: Position, x: (u32, u32), y: (u32, u32)) -> bool {
        let x = annotation(x.0, x.1);
        match position {
            Colocated => x.colocated_range(y.0, y.1),
            Overlapping => x.overlaps_range(y.0, y.1),
            OverlappingLeft => x.overlaps_left_range(y.0, y.1),
            OverlappingRight => x.overlaps_right_range(y.0, y.1),
            Covering => x.covers_range(y.0, y.1),
            CoveredBy => x.covered_by_range(y.0, y.1),
            LeftOf => x.left_of_range(y.0, y.1),
            RightOf => x.right_of_range(y.0, y.1),
        }
    }

    /// X, Y and the relations that hold for X relative to Y.
    #[rstest]
    #[case::y_after_x((BEGIN, END), (END + 1, MAX), &[LeftOf, OverlappingLeft])]
    #[case::y_at_x_end((BEGIN, END), (END, MAX), &[LeftOf, OverlappingLeft])]
    #[case::y_starts_within_x((BEGIN, END), (END - 1, MAX), &[Overlapping, OverlappingLeft])]
    #[case::same_span((BEGIN, END), (BEGIN, END), &[Overlapping, Colocated, CoveredBy, Covering])]
    #[case::y_inside_x((BEGIN, END), (BEGIN + 1, END - 1), &[Overlapping, Covering])]
    #[case::y_shares_begin((BEGIN, END), (BEGIN, END - 1), &[Overlapping, Covering])]
    #[case::y_shares_end((BEGIN, END), (BEGIN + 1, END), &[Overlapping, Covering])]
    #[case::y_around_x((BEGIN, END), (BEGIN - 1, END + 1), &[Overlapping, CoveredBy])]
    #[case::x_prefix_of_y((BEGIN, END), (BEGIN, END + 1), &[Overlapping, CoveredBy, OverlappingLeft])]
    #[case::x_suffix_of_y((BEGIN, END), (BEGIN - 1, END), &[Overlapping, CoveredBy, OverlappingRight])]
    #[case::y_ends_within_x((BEGIN, END), (0, BEGIN + 1), &[Overlapping, OverlappingRight])]
    #[case::y_ends_at_x_begin((BEGIN, END), (0, BEGIN), &[RightOf, OverlappingRight])]
    #[case::y_before_x((BEGIN, END), (0, BEGIN - 1), &[RightOf, OverlappingRight])]
    #[case::zero_x_before_y((Z, Z), (Z + 10, Z + 20), &[LeftOf, OverlappingLeft])]
    #[case::zero_y_after_x((BEGIN, END), (END + 1, END + 1), &[LeftOf, OverlappingLeft])]
    #[case::zero_x_at_y_begin((Z, Z), (Z, Z + 10), &[Overlapping, CoveredBy, OverlappingLeft, LeftOf])]
    #[case::zero_x_at_y_end((Z, Z), (Z - 10, Z), &[RightOf, OverlappingRight, CoveredBy])]
    #[case::zero_y_at_x_begin((BEGIN, END), (BEGIN, BEGIN), &[Overlapping, Covering, RightOf])]
    #[case::zero_y_within_x((BEGIN, END), (BEGIN + 1, BEGIN + 1), &[Overlapping, Covering])]
    #[case::zero_y_at_x_end((BEGIN, END), (END, END), &[LeftOf, Covering])]
    #[case::zero_x_within_y((Z, Z), (Z - 5, Z + 5), &[Overlapping, CoveredBy])]
    #[case::zero_x_after_y((Z, Z), (Z - 10, Z - 5), &[RightOf, OverlappingRight])]
    #[case::zero_y_before_x((BEGIN, END), (BEGIN - 1, BEGIN - 1), &[RightOf, OverlappingRight])]
    #[case::zero_matches_zero((Z, Z), (Z, Z), &[Overlapping, CoveredBy, Covering, Colocated, LeftOf, RightOf])]
    fn test_relative_positions(
        #[case] x: (u32, u32),
        #[case] y: (u32, u32),
        #[case] holds: &[Position],
    ) {
        for position in ALL {
            let expected = holds.contains(&position);
            assert_eq!(
                raw(position)(x.0, x.1, y.0, y.1),
                expected,
                "{:?} for X={:?} Y={:?}",
                position,
                x,
                y
            );
            assert_eq!(via_annotations(position, x, y), expected);
            assert_eq!(via_range(position, x, y), expected);
        }
    }

    #[rstest]
    fn test_zero_width_boundary_rule() {
        assert_eq!(overlaps(5, 5, 3, 8), true);
        assert_eq!(overlaps(5, 5, 5, 9), true);
        assert_eq!(overlaps(3, 8, 5, 5), true);
        assert_eq!(overlaps(5, 9, 5, 5), true);
        assert_eq!(overlaps(5, 5, 5, 5), true);
        assert_eq!(overlaps(5, 5, 0, 5), false);
        assert_eq!(overlaps(0, 5, 5, 5), false);
    }

    fn span() -> impl Strategy<Value = (u32, u32)> {
        (0u32..200, 0u32..50).prop_map(|(b, w)| (b, b + w))
    }

    proptest! {
        #[test]
        fn prop_covers_mirrors_covered_by(a in span(), b in span()) {
            prop_assert_eq!(covers(a.0, a.1, b.0, b.1), covered_by(b.0, b.1, a.0, a.1));
        }

        #[test]
        fn prop_self_relations(a in span()) {
            prop_assert!(colocated(a.0, a.1, a.0, a.1));
            prop_assert!(covers(a.0, a.1, a.0, a.1));
            prop_assert!(overlaps(a.0, a.1, a.0, a.1));
        }

        #[test]
        fn prop_overlaps_is_symmetric(a in span(), b in span()) {
            prop_assert_eq!(overlaps(a.0, a.1, b.0, b.1), overlaps(b.0, b.1, a.0, a.1));
        }

        #[test]
        fn prop_disjoint_spans(a in span(), gap in 1u32..20, w in 0u32..20) {
            let b = (a.1 + gap, a.1 + gap + w);
            prop_assert!(left_of(a.0, a.1, b.0, b.1));
            prop_assert!(right_of(b.0, b.1, a.0, a.1));
            prop_assert!(!overlaps(a.0, a.1, b.0, b.1));
        }

        #[test]
        fn prop_span_and_range_forms_agree(a in span(), b in span()) {
            let (x, y) = (annotation(a.0, a.1), annotation(b.0, b.1));
            prop_assert_eq!(x.overlaps(&y), x.overlaps_range(b.0, b.1));
            prop_assert_eq!(x.covers(&y), x.covers_range(b.0, b.1));
            prop_assert_eq!(x.left_of(&y), x.left_of_range(b.0, b.1));
            prop_assert_eq!(x.right_of(&y), x.right_of_range(b.0, b.1));
            prop_assert_eq!(x.overlaps_left(&y), x.overlaps_left_range(b.0, b.1));
            prop_assert_eq!(x.overlaps_right(&y), x.overlaps_right_range(b.0, b.1));
        }
    }
}
