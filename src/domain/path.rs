use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence of child indices leading from the board root to an entity.
///
/// `[]` is the lane sequence itself, `[lane]` a lane and `[lane, item]` an
/// item. Paths are positional: recompute them after every edit instead of
/// holding on to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    /// The root path, addressing the lane sequence
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Index of the addressed entity within its parent's children
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent sequence, or `None` for the root
    pub fn parent(&self) -> Option<Path> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// Path of the `index`-th child of this path
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the sibling at `index` under the same parent
    pub fn with_last(&self, index: usize) -> Option<Path> {
        self.parent().map(|parent| parent.child(index))
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}
