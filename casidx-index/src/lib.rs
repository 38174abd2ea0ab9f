//! Ordered annotation index with bounded, policy-aware iteration.
//!
//! This crate builds on the records, type priorities and sort order of `casidx-core` and
//! provides the stateful half of casidx:
//!
//! - **[`AnnotationIndex`]**: an ordered multiset of annotations kept in the canonical sort
//!   order, with ambiguous and unambiguous walks
//! - **Subiterators**: walks bounded by a container annotation (or raw offsets) in strict or
//!   relaxed mode, with a configurable [`SameSpanPolicy`] for colocated records of unrelated
//!   types
//! - **[`IndexCursor`]**: detached cursors that fail fast once the index they walk is modified
//! - **[`AnnotationTree`]**: containment trees built from strict, unambiguous subiterators
//! - **Select queries**: `at`, `covered_by`, `covering`, `overlapping`, `following`, `preceding`
//!
//! ## Quick Start
//!
//! ```rust
//! use casidx_core::models::{Annotation, FsId, TypePriorityBuilder, TypeSystem};
//! use casidx_index::AnnotationIndex;
//!
//! let mut ts = TypeSystem::new();
//! let sentence = ts.add_type("Sentence", TypeSystem::ANNOTATION).unwrap();
//! let token = ts.add_type("Token", TypeSystem::ANNOTATION).unwrap();
//!
//! let mut builder = TypePriorityBuilder::new();
//! builder.add(&[sentence, token]);
//! let mut index = AnnotationIndex::new(builder.build(&ts));
//!
//! let s1 = Annotation::new(FsId(0), sentence, 0, 20).unwrap();
//! index.insert(s1);
//! for (i, (b, e)) in [(0, 5), (6, 10), (11, 20)].into_iter().enumerate() {
//!     index.insert(Annotation::new(FsId(i as u32 + 1), token, b, e).unwrap());
//! }
//!
//! // tokens inside the sentence
//! assert_eq!(index.subiterator(&s1, true, true).count(), 3);
//!
//! // the same, as a tree
//! let tree = index.tree(&s1).unwrap();
//! assert_eq!(tree.root().child_count(), 3);
//! ```
//!
//! ## Loading from configuration
//!
//! ```rust,no_run
//! use std::path::Path;
//! use casidx_index::IndexConfig;
//!
//! let schema = IndexConfig::try_from(Path::new("config.toml"))?.build()?;
//! let index = schema.index();
//! # Ok::<(), casidx_index::ConfigError>(())
//! ```

/// The annotation index itself.
pub mod index;

/// Bounded walks and detached cursors.
pub mod subiterator;

/// Positional select queries.
pub mod select;

/// Annotation trees.
pub mod tree;

pub mod config;
pub mod errors;
pub mod options;

// re-exports
pub use self::config::{ConfigError, ConfigResult, IndexConfig, Schema, TypeDeclaration};
pub use self::errors::{IndexError, IndexResult};
pub use self::index::AnnotationIndex;
pub use self::options::{IndexOptions, SameSpanPolicy};
pub use self::subiterator::{AnnotationIter, IndexCursor};
pub use self::tree::{AnnotationTree, Node, NodeId};
