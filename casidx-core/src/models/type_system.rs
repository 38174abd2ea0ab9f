use std::fmt::{self, Display};

use fxhash::FxHashMap as HashMap;

use crate::errors::TypeSystemError;

/// Identity of an annotation type within a [`TypeSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeId(pub u32);

impl Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct TypeEntry {
    name: String,
    parent: Option<TypeId>,
}

///
/// Side table of annotation types and their single-inheritance supertype relation.
///
/// Records only carry a [`TypeId`]; this table is consulted where "is-a" checks are needed
/// (per-type index views, priority inheritance). Every type system starts out with the root
/// type [`TypeSystem::ANNOTATION`].
///
#[derive(Debug, Clone)]
pub struct TypeSystem {
    types: Vec<TypeEntry>,
    by_name: HashMap<String, TypeId>,
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSystem {
    /// The root annotation type.
    pub const ANNOTATION: TypeId = TypeId(0);
    pub const ANNOTATION_NAME: &'static str = "Annotation";

    pub fn new() -> Self {
        let mut by_name = HashMap::default();
        by_name.insert(Self::ANNOTATION_NAME.to_string(), Self::ANNOTATION);
        TypeSystem {
            types: vec![TypeEntry {
                name: Self::ANNOTATION_NAME.to_string(),
                parent: None,
            }],
            by_name,
        }
    }

    ///
    /// Declare a new type below `parent`.
    ///
    /// # Arguments
    /// - name: unique type name
    /// - parent: an already declared supertype
    ///
    pub fn add_type(&mut self, name: &str, parent: TypeId) -> Result<TypeId, TypeSystemError> {
        if self.by_name.contains_key(name) {
            return Err(TypeSystemError::DuplicateType(name.to_string()));
        }
        if !self.contains(parent) {
            return Err(TypeSystemError::UnknownTypeId(parent));
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeEntry {
            name: name.to_string(),
            parent: Some(parent),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Same as [`add_type`](Self::add_type), resolving the parent by name.
    pub fn add_type_named(&mut self, name: &str, parent: &str) -> Result<TypeId, TypeSystemError> {
        let parent = self.require(parent)?;
        self.add_type(name, parent)
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Look up a type by name, failing with [`TypeSystemError::UnknownType`].
    pub fn require(&self, name: &str) -> Result<TypeId, TypeSystemError> {
        self.type_id(name)
            .ok_or_else(|| TypeSystemError::UnknownType(name.to_string()))
    }

    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.types.get(id.0 as usize).map(|t| t.name.as_str())
    }

    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.types.get(id.0 as usize).and_then(|t| t.parent)
    }

    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        (id.0 as usize) < self.types.len()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All declared type ids, in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    ///
    /// Walk from `id` up to the root, starting with `id` itself.
    ///
    pub fn ancestors(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        let start = self.contains(id).then_some(id);
        std::iter::successors(start, move |t| self.parent(*t))
    }

    /// `true` when `sub` is `sup` or one of its descendants.
    pub fn subsumes(&self, sup: TypeId, sub: TypeId) -> bool {
        self.ancestors(sub).any(|t| t == sup)
    }

    /// `id` plus all of its descendants.
    pub fn subtypes(&self, id: TypeId) -> Vec<TypeId> {
        self.ids().filter(|t| self.subsumes(id, *t)).collect()
    }
}
