/// The ordinal of a column in a [`Matrix`].
///
/// Column ordinals come straight from the binary-matrix formulation of exact
/// cover: column $c$ of the input matrix has ordinal $c$, starting from zero.
///
/// [`Matrix`]: `crate::Matrix`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub(crate) struct ColumnIndex(usize);

impl ColumnIndex {
    /// Creates a new column index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// The ordinal of a row in a [`Matrix`], in insertion order.
///
/// A `RowIndex` is an opaque handle: it is returned by [`Matrix::add_row`]
/// and accepted back by [`Matrix::force_row`], [`Matrix::unselect_row`] and
/// [`Matrix::row_tag`]. Handles are not transferable across matrices.
///
/// [`Matrix`]: `crate::Matrix`
/// [`Matrix::add_row`]: `crate::Matrix::add_row`
/// [`Matrix::force_row`]: `crate::Matrix::force_row`
/// [`Matrix::unselect_row`]: `crate::Matrix::unselect_row`
/// [`Matrix::row_tag`]: `crate::Matrix::row_tag`
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
#[repr(transparent)]
pub struct RowIndex(usize);

impl RowIndex {
    /// Creates a new row index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// The position of a node in the arena of a [`Matrix`].
///
/// Slot 0 always holds the root; slots $1,\dots,n$ hold the node halves of
/// the $n$ column headers, and the body nodes follow in row order. All four
/// ring links of a node are values of this type, so removing a node from a
/// ring and later restoring it never invalidates any index.
///
/// [`Matrix`]: `crate::Matrix`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    /// The arena slot of the root node.
    pub const ROOT: Self = Self(0);

    /// Creates a new node index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_get() {
        assert_eq!(ColumnIndex::new(0).get(), 0);
        assert_eq!(ColumnIndex::new(123).get(), 123);

        assert_eq!(RowIndex::new(0).get(), 0);
        assert_eq!(RowIndex::new(456789).get(), 456789);

        assert_eq!(NodeIndex::new(65).get(), 65);
        assert_eq!(NodeIndex::ROOT.get(), 0);
    }
}
