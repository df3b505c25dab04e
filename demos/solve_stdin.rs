//! Reads a binary matrix in the `'0'`/`'1'` text format from standard input,
//! prints its dimensions, and prints the 0-indexed row numbers of the first
//! exact cover found (comma-separated), if any.
//!
//! ```text
//! $ printf '0010100\n1001001\n0110010\n1001010\n0100001\n0001101\n' \
//!     | cargo run --example solve_stdin
//! Dimensions: [6, 7]
//! 3,4,0
//! ```

use std::error::Error;
use std::io;
use std::process::ExitCode;

use dlx_cover::read_matrix;

fn try_main() -> Result<ExitCode, Box<dyn Error>> {
    let mut matrix = read_matrix(io::stdin().lock())?;
    println!(
        "Dimensions: [{}, {}]",
        matrix.row_count(),
        matrix.column_count()
    );

    let mut remaining = 1;
    match matrix.solve(&mut remaining) {
        Some(solution) => {
            let rows: Vec<String> = solution
                .iter()
                .map(|choice| matrix.row_tag(choice.row).unwrap().to_string())
                .collect();
            println!("{}", rows.join(","));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no solution found");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
