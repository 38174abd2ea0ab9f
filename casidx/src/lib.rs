//! casidx: ordered indexing of typed text annotations.
//!
//! - [`core`]: annotation records, type priorities, positional predicates and the sort order
//! - [`index`]: the annotation index, subiterators, select queries and annotation trees

#[cfg(feature = "core")]
#[doc(inline)]
pub use casidx_core as core;

#[cfg(feature = "index")]
#[doc(inline)]
pub use casidx_index as index;
