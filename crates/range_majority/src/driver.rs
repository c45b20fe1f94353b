use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::scheduler::{RangeQuery, solve};

/// Reads a whole batch and writes one answer line per query in input order.
///
/// Input tokens, whitespace-separated: `n q`, then `n` array values, then `q`
/// triples `l r k` with 1-based inclusive bounds, `1 <= l <= r <= n` and
/// `k >= 1`. The answer line is the smallest value occurring at least
/// `ceil((r - l + 1) / k)` times in `a[l..=r]`, or `-1` when none does.
/// Malformed or out-of-range input fails with `ErrorKind::InvalidData`.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let mut tokens = text.split_ascii_whitespace();

    let n: usize = next_token(&mut tokens)?;
    let q: usize = next_token(&mut tokens)?;

    let mut values: Vec<u64> = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(next_token(&mut tokens)?);
    }

    let mut queries: Vec<RangeQuery> = Vec::with_capacity(q);
    for _ in 0..q {
        let l: usize = next_token(&mut tokens)?;
        let r: usize = next_token(&mut tokens)?;
        let k: usize = next_token(&mut tokens)?;
        if l < 1 || r < l || r > n || k < 1 {
            return Err(invalid(format!("query out of range: l={l} r={r} k={k}")));
        }
        queries.push(RangeQuery::new(l - 1, r, k));
    }

    for answer in solve(&values, &queries) {
        match answer {
            Some(value) => writeln!(output, "{value}")?,
            None => writeln!(output, "-1")?,
        }
    }
    output.flush()
}

fn next_token<'a, T, I>(tokens: &mut I) -> io::Result<T>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| invalid("unexpected end of input".to_string()))?;
    token
        .parse()
        .map_err(|_| invalid(format!("malformed token: {token}")))
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

#[cfg(test)]
mod tests {
    use super::run;
    use std::io;

    fn run_to_string(input: &str) -> io::Result<String> {
        let mut output = Vec::new();
        run(input.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output).expect("output is ASCII"))
    }

    #[test]
    fn sample_batch() {
        let input = "7 3\n1 1 2 3 3 2 1\n1 7 3\n2 5 2\n3 3 1\n";
        assert_eq!(run_to_string(input).unwrap(), "1\n3\n2\n");
    }

    #[test]
    fn reports_minus_one_when_no_value_qualifies() {
        let input = "3 1\n1 2 3\n1 3 1\n";
        assert_eq!(run_to_string(input).unwrap(), "-1\n");
    }

    #[test]
    fn rejects_out_of_range_query() {
        for input in [
            "3 1\n1 2 3\n0 2 1\n",  // l < 1
            "3 1\n1 2 3\n2 1 1\n",  // r < l
            "3 1\n1 2 3\n1 4 1\n",  // r > n
            "3 1\n1 2 3\n1 3 0\n",  // k < 1
        ] {
            let err = run_to_string(input).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData, "input={input:?}");
        }
    }

    #[test]
    fn rejects_truncated_or_garbled_input() {
        for input in ["", "3", "3 1\n1 2\n", "3 1\n1 2 x\n1 3 1\n"] {
            let err = run_to_string(input).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData, "input={input:?}");
        }
    }
}
