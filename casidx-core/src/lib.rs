//! Core models for annotation indexing over a shared text buffer.
//!
//! This crate holds the pure, stateless half of casidx: the annotation record itself, the
//! type system side table, the injected type priority table, the positional predicate
//! library and the canonical annotation sort order. The stateful structures (the annotation
//! index, subiterators and annotation trees) live in `casidx-index` and build on the
//! definitions here.
//!
//! ## Quick Start
//!
//! ```rust
//! use casidx_core::models::{Annotation, FsId, TypeSystem, TypePriorityBuilder};
//! use casidx_core::order::AnnotationComparator;
//! use casidx_core::predicates::SpanPredicates;
//!
//! let mut ts = TypeSystem::new();
//! let sentence = ts.add_type("Sentence", TypeSystem::ANNOTATION).unwrap();
//! let token = ts.add_type("Token", TypeSystem::ANNOTATION).unwrap();
//!
//! let mut builder = TypePriorityBuilder::new();
//! builder.add(&[sentence, token]);
//! let priorities = builder.build(&ts);
//!
//! let s = Annotation::new(FsId(0), sentence, 0, 20).unwrap();
//! let t = Annotation::new(FsId(1), token, 0, 5).unwrap();
//!
//! assert!(s.covers(&t));
//! assert!(t.covers_range(2, 4));
//!
//! let mut annotations = vec![t, s];
//! AnnotationComparator::new(&priorities).sort(&mut annotations);
//! assert_eq!(annotations, vec![s, t]);
//! ```

pub mod errors;
pub mod models;
pub mod order;
pub mod predicates;
pub mod utils;

// re-exports
pub use self::models::{Annotation, FsId, Span, TypeId, TypePriorities, TypeSystem};
pub use self::order::{AnnotationComparator, SortKey};
pub use self::predicates::SpanPredicates;
