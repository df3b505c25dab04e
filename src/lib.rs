//! This crate solves the _exact cover_ problem with D. E. Knuth's dancing
//! links technique.
//!
//! Given a binary matrix, the task is to find a subset of rows whose
//! 1-entries cover every column exactly once. Knuth's method, described in
//! the paper "Dancing Links", [arXiv:cs/0011047][dl] [cs.DS] (2000),
//! represents the matrix rows and columns as circular doubly linked rings so
//! that deleting an element and restoring it to its former place are both
//! O(1) link operations, and (crucially) exactly inverse to one another.
//! His backtracking scheme, Algorithm X, "waltzes" these links to visit all
//! exact covers in a recursive, depth-first manner: at each level it picks
//! the column with the fewest remaining candidate rows, tentatively selects
//! one of those rows, *covers* every column that row satisfies, and recurses;
//! on the way back it *uncovers* them in exact reverse order, leaving the
//! matrix as if nothing had happened. [See also Section 7.2.2.1 of
//! [_The Art of Computer Programming_ **4B** (2022)][taocp4b], Part 2, 65–70.]
//!
//! The central structure is [`Matrix`]: build it from columns and rows, then
//! call [`Matrix::solve`] with a solution-count budget to run the search.
//! Two refinements of plain Algorithm X are supported:
//!
//! - **Solution budgets.** `solve` takes the number of full solutions to
//!   visit and returns the one that exhausted the budget, so a caller can
//!   ask for the first solution, the $n$th solution, or (by passing a budget
//!   larger than the solution count) count every solution without keeping
//!   any of them.
//! - **Row pre-selection.** [`Matrix::force_row`] fixes a row into every
//!   solution discovered later, by covering its columns up front exactly as
//!   the search would; [`Matrix::unselect_row`] retracts it. This shrinks
//!   the search space deterministically without touching the search itself,
//!   which is handy for puzzle clues and other partial assignments.
//!
//! The [`read_matrix`] function builds a [`Matrix`] from the line-oriented
//! `'0'`/`'1'` text format, one row per line.
//!
//! # Examples
//!
//! Knuth opens the paper with a toy instance: cover seven columns
//! $a,\dots,g$ using six rows. The unique solution consists of the rows
//! "a d f", "b g" and "c e":
//!
//! ```
//! use dlx_cover::Matrix;
//!
//! //                           a    b    c    d    e    f    g
//! let mut matrix = Matrix::new(vec!['a', 'b', 'c', 'd', 'e', 'f', 'g']);
//! matrix.add_row("c e",   &[2, 4]);
//! matrix.add_row("a d g", &[0, 3, 6]);
//! matrix.add_row("b c f", &[1, 2, 5]);
//! matrix.add_row("a d f", &[0, 3, 5]);
//! matrix.add_row("b g",   &[1, 6]);
//! matrix.add_row("d e g", &[3, 4, 6]);
//!
//! let mut remaining = 1;
//! let solution = matrix.solve(&mut remaining).expect("a solution exists");
//! let mut rows: Vec<&str> = solution
//!     .iter()
//!     .map(|choice| *matrix.row_tag(choice.row).unwrap())
//!     .collect();
//! rows.sort();
//! assert_eq!(rows, ["a d f", "b g", "c e"]);
//!
//! // The budget reached zero on the first solution, and there is no second
//! // one: the matrix was fully restored, so we can just solve again.
//! assert_eq!(remaining, 0);
//! let mut remaining = 2;
//! assert_eq!(matrix.solve(&mut remaining), None);
//! assert_eq!(remaining, 1);
//! ```
//!
//! Forcing a row narrows the solution set to the covers that contain it:
//!
//! ```
//! use dlx_cover::Matrix;
//!
//! let mut matrix = Matrix::new(vec![0, 1, 2, 3]);
//! let top = matrix.add_row("top", &[0, 1]);
//! matrix.add_row("bottom", &[2, 3]);
//! matrix.add_row("left", &[0, 2]);
//! matrix.add_row("right", &[1, 3]);
//!
//! matrix.force_row(top).expect("row is still available");
//! let mut remaining = 1;
//! let solution = matrix.solve(&mut remaining).expect("bottom completes it");
//! assert_eq!(matrix.row_tag(solution[0].row), Some(&"bottom"));
//! matrix.unselect_row(top).expect("row was forced");
//! ```
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4

mod indices;
mod matrix;
mod reader;
mod search;

pub use indices::RowIndex;
pub use matrix::{Matrix, SelectError};
pub use reader::{read_matrix, ReadError};
pub use search::Choice;
