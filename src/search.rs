use crate::indices::{ColumnIndex, NodeIndex, RowIndex};
use crate::matrix::{header_slot, Matrix};
use log::{debug, trace};
use std::ops::ControlFlow;

/// One row selection along the path to a solution.
///
/// Besides the selected row, a choice records which column the row was picked
/// to satisfy (its *primary* column; the row usually covers others too, but
/// this is the one the heuristic branched on) and how many candidate rows
/// that column had at the moment of choice. A candidate count of 1 means the
/// choice was forced; large counts mark the branchy parts of the search.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Choice {
    /// The row included in the solution.
    pub row: RowIndex,
    /// The ordinal of the row's primary column; the column's identity token
    /// is available through [`Matrix::column_label`].
    pub column: usize,
    /// The number of candidate rows the primary column had when this choice
    /// was made, observed before covering.
    pub candidates: usize,
}

/// The mutable state threaded through every recursion frame of a search.
struct SearchContext {
    /// How many more full solutions the caller wants. Strictly positive on
    /// entry; decremented once per success; zero means stop everywhere.
    remaining: usize,
    /// One provisional [`Choice`] per recursion depth, overwritten across
    /// backtracking attempts and final only along the path that reaches the
    /// last wanted solution. Grows on demand up to the solution length.
    records: Vec<Choice>,
}

impl SearchContext {
    /// Records the provisional choice at the given depth.
    fn record(&mut self, depth: usize, choice: Choice) {
        if depth == self.records.len() {
            self.records.push(choice);
        } else {
            self.records[depth] = choice;
        }
    }
}

impl<C, R> Matrix<C, R> {
    /// Finds the active column with the fewest candidate rows, breaking ties
    /// in favor of the first one encountered in header-ring order from the
    /// root. Branching on the most constrained column keeps the branching
    /// factor minimal and prunes the search tree earliest; Knuth calls this
    /// the "S heuristic".
    ///
    /// Returns [`None`] only when the header ring is empty, i.e. the matrix
    /// is fully covered. A column with no candidates at all is returned
    /// immediately: it is surely the minimum, and branching on it fails
    /// at once.
    fn min_count_column(&self) -> Option<ColumnIndex> {
        let mut min: Option<(usize, ColumnIndex)> = None;
        let mut h = self.node(NodeIndex::ROOT).right;
        while h != NodeIndex::ROOT {
            let column = self.column_of(h);
            let len = self.columns[column.get()].len;
            if len == 0 {
                return Some(column);
            }
            if min.map_or(true, |(best, _)| len < best) {
                min = Some((len, column));
            }
            h = self.node(h).right;
        }
        min.map(|(_, column)| column)
    }

    /// One recursion frame of the backtracking search at depth `depth`.
    ///
    /// Returns `Break(len)` when the budget-exhausting solution of length
    /// `len` has been found, propagating the hard stop through every active
    /// frame; `Continue(())` when this subtree is exhausted. Either way, all
    /// covers this frame performed are undone before it returns, so a search
    /// leaves the matrix exactly as it found it.
    fn search(&mut self, depth: usize, ctx: &mut SearchContext) -> ControlFlow<usize> {
        if self.node(NodeIndex::ROOT).right == NodeIndex::ROOT {
            // No column remains to be covered: the choices made so far are
            // a solution of length `depth`.
            ctx.remaining -= 1;
            trace!(
                "found solution of length {depth}; {} more wanted",
                ctx.remaining
            );
            return if ctx.remaining == 0 {
                ControlFlow::Break(depth)
            } else {
                ControlFlow::Continue(())
            };
        }
        let column = match self.min_count_column() {
            Some(column) => column,
            // The base case above already handled the empty header ring.
            None => unreachable!("header ring is nonempty"),
        };
        let candidates = self.columns[column.get()].len;
        self.cover(column);

        // Try each candidate row of the column, top to bottom. If the column
        // has no candidates it cannot be covered, the loop body never runs,
        // and this subtree fails without any special casing.
        let mut result = ControlFlow::Continue(());
        let header = header_slot(column);
        let mut i = self.node(header).down;
        while i != header {
            self.cover_other_columns(i);
            ctx.record(
                depth,
                Choice {
                    row: self.row_of(i),
                    column: column.get(),
                    candidates,
                },
            );
            let outcome = self.search(depth + 1, ctx);
            self.uncover_other_columns(i);
            if outcome.is_break() {
                // The budget ran out somewhere below; this frame's choice is
                // final. Stop trying rows, but still uncover on the way out.
                result = outcome;
                break;
            }
            i = self.node(i).down;
        }
        self.uncover(column);
        result
    }

    /// Runs the backtracking exact cover search until the `remaining`-th
    /// solution is found or the search tree is exhausted, whichever comes
    /// first.
    ///
    /// `remaining` is decremented once per full solution encountered, never
    /// incremented. On success the result is the solution that brought it to
    /// zero, as one [`Choice`] per recursion depth; on exhaustion the result
    /// is [`None`] and `remaining` holds the initial value minus the number
    /// of solutions that exist. An initial value of zero asks for nothing
    /// and returns [`None`] without searching.
    ///
    /// The zero-column matrix is trivially covered: `solve` with a positive
    /// budget reports the empty solution `Some(vec![])`, which is distinct
    /// from the no-solution result [`None`].
    ///
    /// The matrix is mutated in place during the search and fully restored
    /// on return, so consecutive calls see identical state. Rows fixed by
    /// [`force_row`](Self::force_row) stay fixed across calls and are not
    /// repeated in the returned choices.
    pub fn solve(&mut self, remaining: &mut usize) -> Option<Vec<Choice>> {
        if *remaining == 0 {
            return None;
        }
        debug!(
            "solving exact cover instance with {} columns, {} rows; reporting solution #{remaining}",
            self.column_count(),
            self.row_count()
        );
        let mut ctx = SearchContext {
            remaining: *remaining,
            records: Vec::with_capacity(self.column_count()),
        };
        let outcome = self.search(0, &mut ctx);
        *remaining = ctx.remaining;
        match outcome {
            ControlFlow::Break(len) => {
                // Slots past the solution length are stale leftovers from
                // abandoned branches.
                ctx.records.truncate(len);
                Some(ctx.records)
            }
            ControlFlow::Continue(()) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Knuth's canonical instance: unique solution {0, 3, 4}.
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

    /// Four columns, three disjoint covers: {0, 1}, {2, 3} and {4}.
    fn three_solution_matrix() -> Matrix<usize, usize> {
        let mut m = Matrix::new(vec![0, 1, 2, 3]);
        m.add_row(0, &[0, 1]);
        m.add_row(1, &[2, 3]);
        m.add_row(2, &[0, 2]);
        m.add_row(3, &[1, 3]);
        m.add_row(4, &[0, 1, 2, 3]);
        m
    }

    fn sorted_rows(solution: &[Choice]) -> Vec<usize> {
        let mut rows: Vec<usize> = solution.iter().map(|c| c.row.get()).collect();
        rows.sort_unstable();
        rows
    }

    #[test]
    fn empty_matrix_has_the_empty_solution() {
        let mut m: Matrix<u8, ()> = Matrix::new(vec![]);
        let mut remaining = 1;
        let solution = m.solve(&mut remaining);
        assert_eq!(solution, Some(vec![]));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn zero_budget_does_not_search() {
        let mut m = knuth_matrix();
        let mut remaining = 0;
        assert_eq!(m.solve(&mut remaining), None);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn knuth_instance_has_unique_solution() {
        let mut m = knuth_matrix();
        let mut remaining = 1;
        let solution = m.solve(&mut remaining).expect("unique solution exists");
        assert_eq!(remaining, 0);
        assert_eq!(solution.len(), 3);
        assert_eq!(sorted_rows(&solution), [0, 3, 4]);
        // Every choice reports its primary column and candidate count.
        for choice in &solution {
            assert!(choice.column < m.column_count());
            assert!(choice.candidates >= 1);
        }

        // Asking for a second solution exhausts the tree after the first.
        let mut remaining = 2;
        assert_eq!(m.solve(&mut remaining), None);
        assert_eq!(remaining, 1);
    }

    /// Captures the complete link structure and live counts of a matrix.
    fn snapshot<C, R>(m: &Matrix<C, R>) -> (Vec<(usize, usize, usize, usize)>, Vec<usize>) {
        let links = m
            .nodes
            .iter()
            .map(|n| (n.left.get(), n.right.get(), n.up.get(), n.down.get()))
            .collect();
        let lens = m.columns.iter().map(|c| c.len).collect();
        (links, lens)
    }

    #[test]
    fn solve_restores_links_and_counts_exactly() {
        let mut m = knuth_matrix();
        let before = snapshot(&m);

        // A successful search stops mid-tree; an exhaustive one unwinds the
        // whole tree. Both must leave every link and live count untouched.
        let mut remaining = 1;
        assert!(m.solve(&mut remaining).is_some());
        assert_eq!(snapshot(&m), before);

        let mut remaining = usize::MAX;
        assert!(m.solve(&mut remaining).is_none());
        assert_eq!(snapshot(&m), before);
    }

    #[test]
    fn solve_is_idempotent() {
        let mut m = knuth_matrix();
        let mut first_budget = 1;
        let first = m.solve(&mut first_budget);
        let mut second_budget = 1;
        let second = m.solve(&mut second_budget);
        assert_eq!(first, second);
        assert_eq!(first_budget, second_budget);
    }

    #[test]
    fn dead_column_yields_no_solution() {
        // Column 2 has no candidate rows at all.
        let mut m = Matrix::new(vec!['x', 'y', 'z']);
        m.add_row(0, &[0]);
        m.add_row(1, &[1]);
        let mut remaining = 1;
        assert_eq!(m.solve(&mut remaining), None);
        assert_eq!(remaining, 1);
    }

    #[test]
    fn budget_selects_the_nth_solution() {
        let mut m = three_solution_matrix();
        let mut seen = Vec::new();
        for n in 1..=3 {
            let mut remaining = n;
            let solution = m.solve(&mut remaining).expect("three solutions exist");
            assert_eq!(remaining, 0);
            seen.push(sorted_rows(&solution));
        }
        seen.sort();
        assert_eq!(seen, [vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[test]
    fn over_budget_leaves_the_shortfall() {
        let mut m = three_solution_matrix();
        let mut remaining = 5;
        assert_eq!(m.solve(&mut remaining), None);
        // Three solutions were found and deducted; two were never there.
        assert_eq!(remaining, 2);
    }

    #[test]
    fn forced_row_appears_in_every_solution() {
        let mut m = three_solution_matrix();
        let forced = RowIndex::new(0); // {0, 1}
        m.force_row(forced).expect("row is present");

        // Only the cover {0, 1} + {2, 3} remains compatible with the
        // forced row.
        let mut remaining = 1;
        let solution = m.solve(&mut remaining).expect("one compatible cover");
        assert_eq!(sorted_rows(&solution), [1]);
        let mut remaining = 2;
        assert_eq!(m.solve(&mut remaining), None);
        assert_eq!(remaining, 1);

        // Unselecting restores the full solution set.
        m.unselect_row(forced).expect("row was forced");
        let mut remaining = 4;
        assert_eq!(m.solve(&mut remaining), None);
        assert_eq!(remaining, 1);
    }

    #[test]
    fn candidate_counts_are_observed_before_covering() {
        // One column, two candidate rows: whichever row is chosen first,
        // the recorded count must be 2.
        let mut m = Matrix::new(vec!['a']);
        m.add_row(0, &[0]);
        m.add_row(1, &[0]);
        let mut remaining = 1;
        let solution = m.solve(&mut remaining).expect("solutions exist");
        assert_eq!(solution.len(), 1);
        assert_eq!(solution[0].candidates, 2);
        assert_eq!(solution[0].column, 0);
    }
}
