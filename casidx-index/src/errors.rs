use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error(
        "Index was modified while a cursor was open (cursor generation {expected}, index generation {found})"
    )]
    ConcurrentModification { expected: u64, found: u64 },

    #[error("Annotation tree is deeper than {limit} levels; the sort order is inconsistent")]
    TreeDepthExceeded { limit: usize },
}

pub type IndexResult<T> = std::result::Result<T, IndexError>;
