//! The following program finds all ways to put $2n$ numbers $\\{1,1,2,2,\dots,n,n\\}$
//! into $2n$ slots $s_1,\dots,s_{2n}$ so that there are exactly $i$ numbers
//! between the two appearances of $i$, for all $1\leq i\leq n$. This task is
//! known as _Langford's problem_, since it was first described by C. D. Langford
//! [[_The Mathematical Gazette_ 42 (October 1958), 228][mathgaz]]. Its encoding
//! as an exact cover problem is well explained in D. E. Knuth's book
//! [_The Art of Computer Programming_ 4B (2022)][taocp4b], Part 2, page 70.
//! His approach can be summarized as follows:
//!
//! Regard the $n$ values of $i$ and the $2n$ slots as the columns to be covered.
//! Then the legal rows for permuting the first $n$ integers into a Langford
//! sequence are $`i\\;s_j\\;s_k'$ for $1\leq i\leq n$, $1\leq j<k\leq 2n$, and
//! $k=i+j+1$. In this way the distance between slots $s_j$ and $s_k$ for number
//! $i$ is $k-j=i+j+1-j=i+1$, as desired.
//!
//! [mathgaz]: https://www.cambridge.org/core/journals/mathematical-gazette/article/abs/problem/557F7BBB739F5B3E0D152C270642B102
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4

use dlx_cover::Matrix;

/// A Langford pair can exist only when $n$ is congruent to 0 or 3 modulo 4.
/// This is because the two entries of an odd number must either both go in
/// even or in odd positions, while the entries of an even number must fall
/// in positions of different parity. There are $\lfloor n/2\rfloor$ even
/// numbers in $\\{1,\dots,n\\}$, so $n-\lfloor n/2\rfloor=\lceil n/2\rceil$
/// positions of each parity remain available for the odd numbers. Since these
/// come in pairs that occupy positions of the same parity, $\lceil n/2\rceil$
/// must be an even number. This happens only if $n\equiv 0$ or $n\equiv 3$
/// (modulo 4).
const N: usize = 11;

#[derive(Eq, PartialEq, Copy, Clone)]
enum Column {
    Number(usize),
    Slot(usize),
}

/// A row places both appearances of `number` into `first` and `second`.
#[derive(Copy, Clone)]
struct Placement {
    number: usize,
    first: usize,
    second: usize,
}

fn build_matrix() -> Matrix<Column, Placement> {
    let numbers = (1..=N).map(Column::Number);
    let slots = (1..=2 * N).map(Column::Slot);
    let mut matrix = Matrix::new(numbers.chain(slots).collect());

    // Column ordinals: number $i$ lives at $i-1$, slot $s_j$ at $n+j-1$.
    for i in 1..=N {
        // Optimization: half of the Langford pairs for a given value of $n$
        // are the reverses of the others. Reduce the search space by placing
        // the first 1 in position $1\leq s_j<n$.
        let first_slot_range = 1..if i == 1 { N } else { 2 * N - i };
        for j in first_slot_range {
            let k = i + j + 1;
            let tag = Placement {
                number: i,
                first: j,
                second: k,
            };
            matrix.add_row(tag, &[i - 1, N + j - 1, N + k - 1]);
        }
    }
    matrix
}

fn main() {
    let mut matrix = build_matrix();

    // Count every solution by handing the search an inexhaustible budget.
    let mut remaining = usize::MAX;
    assert_eq!(matrix.solve(&mut remaining), None);
    let count = usize::MAX - remaining;
    println!(
        "{} Langford pairings of {{1,1,...,{N},{N}}} (counted up to reversal)",
        count
    );

    // The search left the matrix intact, so run it again for a sample.
    let mut remaining = 1;
    if let Some(solution) = matrix.solve(&mut remaining) {
        let mut placement = [0usize; 2 * N];
        for choice in &solution {
            let p = matrix.row_tag(choice.row).unwrap();
            placement[p.first - 1] = p.number;
            placement[p.second - 1] = p.number;
        }
        // Print the found Langford sequence, and its reverse.
        println!("{:?}", placement);
        placement.reverse();
        println!("{:?}", placement);
    }
}
