use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::models::{Annotation, FsId, TypeSystem};
use crate::utils::{get_dynamic_reader, is_comment_line, parse_annotation_line};

///
/// AnnotationSet struct, the representation of an annotation file.
///
/// The file is tab separated, one record per line: `type begin end`. Lines starting with
/// `#` are comments. Records get their [`FsId`] from their position in the file, counting
/// records only.
///
#[derive(Clone, Debug, Default)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
    pub path: Option<PathBuf>,
}

impl AnnotationSet {
    ///
    /// Read an annotation file, resolving type names through `ts`.
    ///
    /// # Arguments:
    /// - path: path to the annotation file, optionally gzipped
    /// - ts: type system the type column refers to
    ///
    pub fn from_path(path: &Path, ts: &TypeSystem) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let mut set = Self::from_reader(reader, ts)
            .with_context(|| format!("Failed to read annotations from {:?}", path))?;
        set.path = Some(path.to_owned());
        Ok(set)
    }

    /// Same as [`from_path`](Self::from_path), for any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, ts: &TypeSystem) -> Result<Self> {
        let mut annotations = Vec::new();

        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if is_comment_line(&line) {
                continue;
            }

            let (type_name, begin, end) = parse_annotation_line(&line)
                .ok_or_else(|| anyhow!("Line {}: expected `type<TAB>begin<TAB>end`", n + 1))?;
            let type_id = ts
                .require(type_name)
                .with_context(|| format!("Line {}", n + 1))?;
            let id = FsId(annotations.len() as u32);
            let annotation = Annotation::new(id, type_id, begin, end)
                .with_context(|| format!("Line {}", n + 1))?;

            annotations.push(annotation);
        }

        Ok(AnnotationSet {
            annotations,
            path: None,
        })
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn get(&self, id: FsId) -> Option<&Annotation> {
        self.annotations.get(id.0 as usize)
    }

    ///
    /// Write the set back out as `type begin end` lines.
    ///
    pub fn to_tsv(&self, ts: &TypeSystem) -> String {
        let mut out = String::new();
        for a in &self.annotations {
            let name = ts.name(a.type_id).unwrap_or("?");
            out.push_str(&format!("{}\t{}\t{}\n", name, a.begin, a.end));
        }
        out
    }
}

impl Display for AnnotationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationSet with {} annotations", self.len())
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

impl IntoIterator for AnnotationSet {
    type Item = Annotation;
    type IntoIter = std::vec::IntoIter<Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.into_iter()
    }
}

impl From<Vec<Annotation>> for AnnotationSet {
    fn from(annotations: Vec<Annotation>) -> Self {
        AnnotationSet {
            annotations,
            path: None,
        }
    }
}
