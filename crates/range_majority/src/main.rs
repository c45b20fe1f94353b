use std::io::{self, BufWriter};

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    range_majority::run(stdin.lock(), BufWriter::new(stdout.lock()))
}
