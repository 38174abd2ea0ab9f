pub mod annotation;
pub mod annotation_set;
pub mod type_priority;
pub mod type_system;

// re-export for cleaner imports
pub use self::annotation::{Annotation, FsId, Span};
pub use self::annotation_set::AnnotationSet;
pub use self::type_priority::{PriorityConflict, TypePriorities, TypePriorityBuilder};
pub use self::type_system::{TypeId, TypeSystem};
