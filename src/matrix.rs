use crate::indices::{ColumnIndex, NodeIndex, RowIndex};
use thiserror::Error;

/// A node in the toroidal data structure of a [`Matrix`].
///
/// Every node simultaneously belongs to two circular doubly linked lists:
/// a horizontal ring (its row, or the ring of active column headers) and a
/// vertical ring (its column). The four ring links are arena positions, so
/// removing a node and later restoring it never invalidates an index.
///
/// # Invariant
///
/// While a node is present in its rings, its neighbors are mutually
/// consistent: `node(left).right == self` and `node(up).down == self`.
/// Removal bypasses the node without touching its own links; the stale links
/// are exactly what [`Matrix::restore_vertical`] and
/// [`Matrix::restore_horizontal`] read to reinsert the node in place.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) struct Node {
    /// The previous node in the horizontal ring, in cyclic order.
    ///
    /// This field corresponds to the `LLINK` pointer in Knuth's data structure.
    pub(crate) left: NodeIndex,
    /// The next node in the horizontal ring, in cyclic order.
    ///
    /// This field corresponds to the `RLINK` pointer in Knuth's data structure.
    pub(crate) right: NodeIndex,
    /// The previous node in the vertical ring, in cyclic order.
    ///
    /// This field corresponds to the `ULINK` pointer in Knuth's data structure.
    /// The root has no vertical ring; its `up` and `down` links are self-loops
    /// that no operation ever follows.
    pub(crate) up: NodeIndex,
    /// The next node in the vertical ring, in cyclic order.
    ///
    /// This field corresponds to the `DLINK` pointer in Knuth's data structure.
    pub(crate) down: NodeIndex,
    /// What this arena slot represents.
    pub(crate) kind: NodeKind,
}

/// The role of a [`Node`] in the matrix.
///
/// A column header is "a node plus a little more", which Knuth models by
/// embedding a node inside the header record. Here the dual role is a tagged
/// union instead: the header's node half lives in the arena like any other
/// node, and its extra data ([`Column`]) lives in a parallel table.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) enum NodeKind {
    /// The sentinel anchoring the horizontal ring of active column headers.
    /// Always at arena slot 0.
    Root,
    /// The sentinel of one column's vertical ring.
    Header(ColumnIndex),
    /// A 1-entry of the binary matrix.
    Body {
        /// The column this node is attached to, for O(1) access to its
        /// header. Corresponds to the `TOP` pointer in Knuth's layout.
        column: ColumnIndex,
        /// The row this node belongs to, shared by all nodes in the row ring.
        row: RowIndex,
    },
}

/// The header data of one column: its identity and how many rows can
/// still cover it.
#[derive(Debug)]
pub(crate) struct Column<C> {
    /// The caller-supplied identity token for this column. Immutable.
    pub(crate) label: C,
    /// The number of body nodes currently linked into this column's vertical
    /// ring. Starts at zero and counts exactly the attached, unhidden nodes;
    /// the header's own sentinel slot is not included.
    ///
    /// # Invariant
    ///
    /// `len` equals the number of nodes reachable by traversing the column's
    /// vertical ring, excluding the header, at every point where a sequence
    /// of cover/uncover operations has completed.
    pub(crate) len: usize,
}

/// Returns the arena slot of a column's header node.
///
/// Headers occupy slots $1,\dots,n$ in construction order, directly after
/// the root.
pub(crate) const fn header_slot(column: ColumnIndex) -> NodeIndex {
    NodeIndex::new(column.get() + 1)
}

/// The error reported by the row pre-selection operations.
///
/// Both conditions are detected before any link is mutated, so a failed call
/// leaves the matrix untouched.
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum SelectError {
    /// [`Matrix::force_row`] was given a row that is no longer present in the
    /// matrix, either because it was already forced or because covering some
    /// column hid it.
    #[error("row has already been removed from the matrix and cannot be selected")]
    AlreadySelected,
    /// [`Matrix::unselect_row`] was given a row that is still present in the
    /// matrix.
    #[error("row is still present in the matrix and cannot be unselected")]
    NotSelected,
}

/// A sparse binary matrix in dancing-links form, the state on which exact
/// cover search operates.
///
/// `C` is the column identity type and `R` the opaque row tag type; both are
/// used purely for reporting and never inspected by the solver.
///
/// A matrix is built once ([`Matrix::new`] creates the column headers,
/// [`Matrix::add_row`] appends rows) and thereafter mutated only through
/// the reversible cover/uncover pair, which [`Matrix::solve`] and the
/// pre-selection operations always balance. A search therefore leaves the
/// matrix exactly as it found it, ready for reuse.
///
/// [`Matrix::solve`]: `Matrix::solve`
pub struct Matrix<C, R> {
    /// The node arena: slot 0 is the root, slots $1,\dots,n$ are the column
    /// headers' node halves, and body nodes follow contiguously in row order.
    pub(crate) nodes: Vec<Node>,
    /// Header data for each column, parallel to the header arena slots.
    pub(crate) columns: Vec<Column<C>>,
    /// The caller-supplied tag of each row, in insertion order.
    pub(crate) row_tags: Vec<R>,
    /// CSR-style row offsets into `nodes`: the body nodes of row $i$ occupy
    /// slots `row_off[i]..row_off[i + 1]`.
    ///
    /// # Invariant
    ///
    /// `row_off.len() == row_tags.len() + 1`, and `row_off[0]` is the first
    /// slot after the headers.
    pub(crate) row_off: Vec<usize>,
}

impl<C, R> Matrix<C, R> {
    // Construction routines.

    /// Creates a matrix with the given columns and no rows.
    ///
    /// The column headers are linked into a circular horizontal ring with the
    /// root as sentinel, in input order; every header's vertical ring
    /// initially contains only itself. A matrix with zero columns is legal
    /// (and trivially covered: the root self-loops).
    pub fn new(labels: Vec<C>) -> Self {
        let n = labels.len();
        let mut nodes = Vec::with_capacity(n + 1);
        nodes.push(Node {
            left: NodeIndex::new(n),
            right: if n == 0 {
                NodeIndex::ROOT
            } else {
                NodeIndex::new(1)
            },
            up: NodeIndex::ROOT,
            down: NodeIndex::ROOT,
            kind: NodeKind::Root,
        });
        for c in 0..n {
            let slot = NodeIndex::new(c + 1);
            nodes.push(Node {
                // Slot c is the previous header, or the root when c == 0.
                left: NodeIndex::new(c),
                right: if c + 1 == n {
                    NodeIndex::ROOT
                } else {
                    NodeIndex::new(c + 2)
                },
                up: slot,
                down: slot,
                kind: NodeKind::Header(ColumnIndex::new(c)),
            });
        }
        let columns = labels
            .into_iter()
            .map(|label| Column { label, len: 0 })
            .collect();
        Self {
            nodes,
            columns,
            row_tags: Vec::new(),
            row_off: vec![n + 1],
        }
    }

    /// Appends a row whose 1-entries sit in the given columns, and returns
    /// its opaque handle.
    ///
    /// The row's nodes are linked into a circular horizontal ring in input
    /// order and each node is appended to the bottom of its column's vertical
    /// ring, incrementing that column's live count. A row with no columns is
    /// permitted; it carries no nodes and never appears in a solution.
    ///
    /// # Panics
    ///
    /// This function panics if a column ordinal is out of bounds, or if the
    /// ordinals are not unique and sorted in ascending order.
    pub fn add_row(&mut self, tag: R, columns: &[usize]) -> RowIndex {
        let m = columns.len();
        for (k, &c) in columns.iter().enumerate() {
            assert!(
                c < self.columns.len(),
                "column ordinal {c} is out of bounds"
            );
            assert!(
                k == 0 || columns[k - 1] < c,
                "row columns must be unique and sorted ascending"
            );
        }
        let row = RowIndex::new(self.row_tags.len());
        let first = self.nodes.len();
        self.nodes.reserve(m);
        for (k, &c) in columns.iter().enumerate() {
            let slot = NodeIndex::new(first + k);
            let column = ColumnIndex::new(c);
            let header = header_slot(column);
            // Append to the bottom of the column's vertical ring: the new
            // node goes between the old bottom (header.up) and the header.
            let bottom = self.node(header).up;
            self.nodes.push(Node {
                left: NodeIndex::new(first + (k + m - 1) % m),
                right: NodeIndex::new(first + (k + 1) % m),
                up: bottom,
                down: header,
                kind: NodeKind::Body { column, row },
            });
            self.node_mut(bottom).down = slot;
            self.node_mut(header).up = slot;
            self.columns[c].len += 1;
        }
        self.row_tags.push(tag);
        self.row_off.push(self.nodes.len());
        row
    }

    // Link primitives.
    //
    // Removal bypasses the target without mutating the target's own links;
    // restoration reads those stale links to reinsert the target exactly
    // where it was. Restoration is valid only while the stale links still
    // name the original neighbors, which the strict LIFO cover/uncover
    // discipline guarantees.

    /// Removes a node from its horizontal ring.
    fn remove_horizontal(&mut self, x: NodeIndex) {
        let Node { left, right, .. } = *self.node(x);
        self.node_mut(left).right = right;
        self.node_mut(right).left = left;
    }

    /// Restores a node to its horizontal ring, at its original position.
    fn restore_horizontal(&mut self, x: NodeIndex) {
        let Node { left, right, .. } = *self.node(x);
        self.node_mut(left).right = x;
        self.node_mut(right).left = x;
    }

    /// Removes a node from its vertical ring.
    fn remove_vertical(&mut self, x: NodeIndex) {
        let Node { up, down, .. } = *self.node(x);
        self.node_mut(up).down = down;
        self.node_mut(down).up = up;
    }

    /// Restores a node to its vertical ring, at its original position.
    fn restore_vertical(&mut self, x: NodeIndex) {
        let Node { up, down, .. } = *self.node(x);
        self.node_mut(up).down = x;
        self.node_mut(down).up = x;
    }

    /// Returns whether a node has been removed from its vertical ring.
    ///
    /// A node is out of its ring if and only if both neighbors bypass it, and
    /// a node is never half-removed, so checking one side suffices.
    fn is_unlinked_vertical(&self, x: NodeIndex) -> bool {
        let up = self.node(x).up;
        self.node(up).down != x
    }

    /// Returns whether any node of a row has been removed from its vertical
    /// ring.
    ///
    /// Hiding a row (and likewise forcing it) unlinks every node of the row
    /// except the one in the column that was covered, so a present row has
    /// all nodes linked and an absent row has exactly one. This is the test
    /// that validates the pre-selection state transitions.
    fn is_row_removed(&self, row: RowIndex) -> bool {
        let r = row.get();
        (self.row_off[r]..self.row_off[r + 1])
            .any(|slot| self.is_unlinked_vertical(NodeIndex::new(slot)))
    }

    // Cover and uncover.

    /// Covers a column: the column is satisfied, so it leaves the ring of
    /// candidate headers, and every row that could have covered it becomes
    /// unusable as a future choice.
    ///
    /// Removes the column's header from the root's horizontal ring, then for
    /// every row in the column (top to bottom) removes each of the row's
    /// other nodes (left to right) from its own vertical ring, decrementing
    /// that column's live count. The covered column's own vertical ring is
    /// left intact so the search can still iterate its candidate rows.
    pub(crate) fn cover(&mut self, column: ColumnIndex) {
        let header = header_slot(column);
        self.remove_horizontal(header);
        let mut i = self.node(header).down;
        while i != header {
            let mut j = self.node(i).right;
            while j != i {
                self.remove_vertical(j);
                let c = self.column_of(j).get();
                self.columns[c].len -= 1;
                j = self.node(j).right;
            }
            i = self.node(i).down;
        }
    }

    /// Undoes the most recent not-yet-undone [`cover`](Self::cover) of this
    /// column.
    ///
    /// Every loop traverses in the opposite order from `cover` (bottom to
    /// top, right to left): reinsertion reads each node's stale links, so
    /// exact order reversal is what makes the removals and reinsertions
    /// commute back to the original configuration. Cover/uncover calls must
    /// nest in strict LIFO order.
    pub(crate) fn uncover(&mut self, column: ColumnIndex) {
        let header = header_slot(column);
        let mut i = self.node(header).up;
        while i != header {
            let mut j = self.node(i).left;
            while j != i {
                let c = self.column_of(j).get();
                self.columns[c].len += 1;
                self.restore_vertical(j);
                j = self.node(j).left;
            }
            i = self.node(i).up;
        }
        self.restore_horizontal(header);
    }

    /// Covers the column of every node in `x`'s row except `x`'s own column,
    /// from left to right. This is what provisionally selecting the row for
    /// a solution does: all the other columns the row covers are satisfied
    /// at once.
    pub(crate) fn cover_other_columns(&mut self, x: NodeIndex) {
        let mut j = self.node(x).right;
        while j != x {
            self.cover(self.column_of(j));
            j = self.node(j).right;
        }
    }

    /// Undoes [`cover_other_columns`](Self::cover_other_columns), traversing
    /// the row ring from right to left so the nested uncovers run in exact
    /// reverse order.
    pub(crate) fn uncover_other_columns(&mut self, x: NodeIndex) {
        let mut j = self.node(x).left;
        while j != x {
            self.uncover(self.column_of(j));
            j = self.node(j).left;
        }
    }

    // Pre-selection.

    /// Forces a row into every solution subsequently discovered by
    /// [`solve`](Self::solve), by covering all of its columns up front:
    /// exactly what the search does when it tentatively selects the row,
    /// performed before the search begins.
    ///
    /// Forced rows do not appear in the [`Choice`](crate::Choice) records a
    /// later search reports; a complete cover is the forced rows plus the
    /// reported rows.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::AlreadySelected`], without mutating anything,
    /// if the row has already been removed from the matrix (by an earlier
    /// forcing, or by a covering that hid it). The check cannot observe the
    /// removal of a row with a single 1-entry, because such a row has no
    /// sibling nodes to unlink; callers forcing single-entry rows must keep
    /// to the LIFO discipline on their own.
    ///
    /// # Panics
    ///
    /// This function panics if the row index is out of bounds.
    pub fn force_row(&mut self, row: RowIndex) -> Result<(), SelectError> {
        let Some(first) = self.first_node_of(row) else {
            // A row with no nodes covers nothing; forcing it is a no-op.
            return Ok(());
        };
        if self.is_row_removed(row) {
            return Err(SelectError::AlreadySelected);
        }
        self.cover(self.column_of(first));
        self.cover_other_columns(first);
        Ok(())
    }

    /// Retracts a row previously fixed by [`force_row`](Self::force_row).
    ///
    /// Calls must occur in exact LIFO order relative to prior `force_row`
    /// calls for the links to be restored properly.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NotSelected`], without mutating anything, if
    /// the row is still present in its vertical ring.
    ///
    /// # Panics
    ///
    /// This function panics if the row index is out of bounds.
    pub fn unselect_row(&mut self, row: RowIndex) -> Result<(), SelectError> {
        let Some(first) = self.first_node_of(row) else {
            return Ok(());
        };
        if !self.is_row_removed(row) {
            return Err(SelectError::NotSelected);
        }
        self.uncover_other_columns(first);
        self.uncover(self.column_of(first));
        Ok(())
    }

    // Accessor methods.

    /// Returns the number of columns in the matrix.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows in the matrix.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_tags.len()
    }

    /// Returns the identity token of the column with the given ordinal.
    ///
    /// # Panics
    ///
    /// This function panics if the ordinal is out of bounds.
    #[must_use]
    pub fn column_label(&self, column: usize) -> &C {
        &self.columns[column].label
    }

    /// Returns the opaque tag of the given row, or [`None`] if the index
    /// does not name a row of this matrix.
    #[must_use]
    pub fn row_tag(&self, row: RowIndex) -> Option<&R> {
        self.row_tags.get(row.get())
    }

    /// Returns the arena slot of a row's first node, or [`None`] if the row
    /// is empty.
    ///
    /// # Panics
    ///
    /// This function panics if the row index is out of bounds.
    fn first_node_of(&self, row: RowIndex) -> Option<NodeIndex> {
        let r = row.get();
        let (start, end) = (self.row_off[r], self.row_off[r + 1]);
        (start < end).then(|| NodeIndex::new(start))
    }

    /// Returns a reference to the node at the given arena slot.
    ///
    /// # Panics
    ///
    /// This function panics if the slot is out of bounds.
    pub(crate) fn node(&self, ix: NodeIndex) -> &Node {
        &self.nodes[ix.get()]
    }

    /// Returns a mutable reference to the node at the given arena slot.
    ///
    /// # Panics
    ///
    /// This function panics if the slot is out of bounds.
    fn node_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.nodes[ix.get()]
    }

    /// Returns the column of a header or body node.
    ///
    /// # Panics
    ///
    /// This function panics if the node is the root, which belongs to no
    /// column.
    pub(crate) fn column_of(&self, ix: NodeIndex) -> ColumnIndex {
        match self.node(ix).kind {
            NodeKind::Header(column) | NodeKind::Body { column, .. } => column,
            NodeKind::Root => panic!("the root node belongs to no column"),
        }
    }

    /// Returns the row of a body node.
    ///
    /// # Panics
    ///
    /// This function panics if the node is the root or a column header,
    /// which belong to no row.
    pub(crate) fn row_of(&self, ix: NodeIndex) -> RowIndex {
        match self.node(ix).kind {
            NodeKind::Body { row, .. } => row,
            _ => panic!("node at slot {ix:?} belongs to no row"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Captures the complete link structure and live counts of a matrix,
    /// for bit-exact reversibility checks.
    fn snapshot<C, R>(m: &Matrix<C, R>) -> (Vec<(usize, usize, usize, usize)>, Vec<usize>) {
        let links = m
            .nodes
            .iter()
            .map(|n| (n.left.get(), n.right.get(), n.up.get(), n.down.get()))
            .collect();
        let lens = m.columns.iter().map(|c| c.len).collect();
        (links, lens)
    }

    /// Counts the body nodes reachable by walking a column's vertical ring.
    fn ring_len<C, R>(m: &Matrix<C, R>, column: usize) -> usize {
        let header = header_slot(ColumnIndex::new(column));
        let mut n = 0;
        let mut i = m.node(header).down;
        while i != header {
            n += 1;
            i = m.node(i).down;
        }
        n
    }

    /// Knuth's canonical exact cover instance from the "Dancing Links"
    /// paper: seven columns, six rows, unique solution {0, 3, 4}.
    fn knuth_matrix() -> Matrix<char, usize> {
        let mut m = Matrix::new(vec!['a', 'b', 'c', 'd', 'e', 'f', 'g']);
        m.add_row(0, &[2, 4]);
        m.add_row(1, &[0, 3, 6]);
        m.add_row(2, &[1, 2, 5]);
        m.add_row(3, &[0, 3, 5]);
        m.add_row(4, &[1, 6]);
        m.add_row(5, &[3, 4, 6]);
        m
    }

    #[test]
    fn empty_header_ring_self_loops() {
        let m: Matrix<u8, ()> = Matrix::new(vec![]);
        assert_eq!(m.nodes.len(), 1);
        let root = m.node(NodeIndex::ROOT);
        assert_eq!(root.left, NodeIndex::ROOT);
        assert_eq!(root.right, NodeIndex::ROOT);
    }

    #[test]
    fn single_header_ring() {
        let m: Matrix<u8, ()> = Matrix::new(vec![7]);
        let root = m.node(NodeIndex::ROOT);
        assert_eq!(root.right, NodeIndex::new(1));
        assert_eq!(root.left, NodeIndex::new(1));
        let header = m.node(NodeIndex::new(1));
        assert_eq!(header.left, NodeIndex::ROOT);
        assert_eq!(header.right, NodeIndex::ROOT);
        // The header is the sentinel of its own, initially empty, ring.
        assert_eq!(header.up, NodeIndex::new(1));
        assert_eq!(header.down, NodeIndex::new(1));
        assert_eq!(m.columns[0].len, 0);
    }

    #[test]
    fn header_ring_links_in_input_order() {
        let m: Matrix<char, ()> = Matrix::new(vec!['a', 'b', 'c']);
        assert_eq!(m.nodes.len(), 4);
        let root = m.node(NodeIndex::ROOT);
        assert_eq!(root.right, NodeIndex::new(1));
        assert_eq!(root.left, NodeIndex::new(3));
        let b = m.node(NodeIndex::new(2));
        assert_eq!(b.left, NodeIndex::new(1));
        assert_eq!(b.right, NodeIndex::new(3));
        let c = m.node(NodeIndex::new(3));
        assert_eq!(c.right, NodeIndex::ROOT);
        assert_eq!(*m.column_label(1), 'b');
    }

    #[test]
    fn single_node_row_self_loops() {
        let mut m: Matrix<char, &str> = Matrix::new(vec!['a', 'b']);
        m.add_row("only-a", &[0]);
        let node = m.node(NodeIndex::new(3));
        assert_eq!(node.left, NodeIndex::new(3));
        assert_eq!(node.right, NodeIndex::new(3));
        // Attached between the header and itself.
        assert_eq!(node.up, NodeIndex::new(1));
        assert_eq!(node.down, NodeIndex::new(1));
        assert_eq!(m.node(NodeIndex::new(1)).down, NodeIndex::new(3));
        assert_eq!(m.node(NodeIndex::new(1)).up, NodeIndex::new(3));
        assert_eq!(m.columns[0].len, 1);
        assert_eq!(m.columns[1].len, 0);
    }

    #[test]
    fn rows_attach_to_column_bottoms() {
        let m = knuth_matrix();
        // Column 'd' (ordinal 3) is covered by rows 1, 3 and 5, attached
        // top to bottom in insertion order.
        let header = header_slot(ColumnIndex::new(3));
        let first = m.node(header).down;
        let second = m.node(first).down;
        let third = m.node(second).down;
        assert_eq!(m.row_of(first), RowIndex::new(1));
        assert_eq!(m.row_of(second), RowIndex::new(3));
        assert_eq!(m.row_of(third), RowIndex::new(5));
        assert_eq!(m.node(third).down, header);
        assert_eq!(m.columns[3].len, 3);
        for (c, len) in [2, 2, 2, 3, 2, 2, 3].into_iter().enumerate() {
            assert_eq!(m.columns[c].len, len);
            assert_eq!(ring_len(&m, c), len);
        }
    }

    #[test]
    #[should_panic(expected = "sorted ascending")]
    fn unsorted_row_columns_are_rejected() {
        let mut m: Matrix<char, ()> = Matrix::new(vec!['a', 'b', 'c']);
        m.add_row((), &[2, 0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_row_column_is_rejected() {
        let mut m: Matrix<char, ()> = Matrix::new(vec!['a', 'b', 'c']);
        m.add_row((), &[1, 3]);
    }

    #[test]
    fn cover_then_uncover_restores_links_exactly() {
        let mut m = knuth_matrix();
        let before = snapshot(&m);
        m.cover(ColumnIndex::new(0));
        m.cover(ColumnIndex::new(3));
        m.cover(ColumnIndex::new(6));
        assert_ne!(snapshot(&m), before);
        m.uncover(ColumnIndex::new(6));
        m.uncover(ColumnIndex::new(3));
        m.uncover(ColumnIndex::new(0));
        assert_eq!(snapshot(&m), before);
    }

    #[test]
    fn cover_removes_conflicting_rows() {
        let mut m = knuth_matrix();
        m.cover(ColumnIndex::new(0));
        // Rows 1 and 3 cover column 'a'; their nodes vanish from the other
        // columns' rings, but column 'a's own ring stays intact.
        assert_eq!(m.columns[3].len, 1); // 'd' lost rows 1 and 3
        assert_eq!(m.columns[5].len, 1); // 'f' lost row 3
        assert_eq!(m.columns[6].len, 2); // 'g' lost row 1
        assert_eq!(ring_len(&m, 3), 1);
        assert_eq!(ring_len(&m, 0), 2);
        // The header left the root's ring.
        assert_eq!(m.node(NodeIndex::ROOT).right, header_slot(ColumnIndex::new(1)));
        m.uncover(ColumnIndex::new(0));
    }

    #[test]
    fn live_counts_match_rings_after_balanced_operations() {
        let mut m = knuth_matrix();
        m.cover(ColumnIndex::new(1));
        for c in [0, 2, 3, 4, 5, 6] {
            assert_eq!(m.columns[c].len, ring_len(&m, c));
        }
        m.cover(ColumnIndex::new(4));
        for c in [0, 2, 3, 5, 6] {
            assert_eq!(m.columns[c].len, ring_len(&m, c));
        }
        m.uncover(ColumnIndex::new(4));
        m.uncover(ColumnIndex::new(1));
        for c in 0..7 {
            assert_eq!(m.columns[c].len, ring_len(&m, c));
        }
    }

    #[test]
    fn force_then_unselect_is_a_no_op() {
        let mut m = knuth_matrix();
        let before = snapshot(&m);
        let row = RowIndex::new(1); // a d g
        assert_eq!(m.force_row(row), Ok(()));
        assert_ne!(snapshot(&m), before);
        assert_eq!(m.unselect_row(row), Ok(()));
        assert_eq!(snapshot(&m), before);
    }

    #[test]
    fn forcing_a_hidden_row_fails_without_mutation() {
        let mut m = knuth_matrix();
        assert_eq!(m.force_row(RowIndex::new(1)), Ok(())); // a d g
        let after_force = snapshot(&m);
        // Row 3 (a d f) shares columns 'a' and 'd' with the forced row,
        // so it has been hidden.
        assert_eq!(
            m.force_row(RowIndex::new(3)),
            Err(SelectError::AlreadySelected)
        );
        assert_eq!(snapshot(&m), after_force);
        assert_eq!(m.unselect_row(RowIndex::new(1)), Ok(()));
    }

    #[test]
    fn unselecting_a_present_row_fails_without_mutation() {
        let mut m = knuth_matrix();
        let before = snapshot(&m);
        assert_eq!(
            m.unselect_row(RowIndex::new(2)),
            Err(SelectError::NotSelected)
        );
        assert_eq!(snapshot(&m), before);
    }

    #[test]
    fn lifo_force_unselect_stack_restores_state() {
        let mut m = knuth_matrix();
        let before = snapshot(&m);
        assert_eq!(m.force_row(RowIndex::new(0)), Ok(())); // c e
        assert_eq!(m.force_row(RowIndex::new(4)), Ok(())); // b g
        assert_eq!(m.unselect_row(RowIndex::new(4)), Ok(()));
        assert_eq!(m.unselect_row(RowIndex::new(0)), Ok(()));
        assert_eq!(snapshot(&m), before);
    }

    #[test]
    fn row_tags_are_reported_back() {
        let mut m: Matrix<char, &str> = Matrix::new(vec!['a', 'b']);
        let r0 = m.add_row("first", &[0]);
        let r1 = m.add_row("second", &[0, 1]);
        assert_eq!(m.row_tag(r0), Some(&"first"));
        assert_eq!(m.row_tag(r1), Some(&"second"));
        assert_eq!(m.row_tag(RowIndex::new(2)), None);
    }
}
