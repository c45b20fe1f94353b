use crate::freq_index::FrequencyIndex;

/// One offline query: the smallest value occurring at least
/// `ceil((end - start) / k)` times in `values[start..end]`.
///
/// Bounds are 0-based and half-open; `k >= 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeQuery {
    pub start: usize,
    pub end: usize,
    pub k: usize,
}

impl RangeQuery {
    pub fn new(start: usize, end: usize, k: usize) -> Self {
        Self { start, end, k }
    }

    fn threshold(&self) -> usize {
        (self.end - self.start).div_ceil(self.k)
    }
}

struct OrderedQuery {
    block: usize,
    start: usize,
    end: usize,
    threshold: usize,
    index: usize,
}

/// Answers every query against the fixed `values` array, in original order.
/// `None` means no value meets the query's occurrence threshold.
///
/// Queries are grouped into `~sqrt(n)`-wide blocks by start index and sorted
/// by `(block, end)`, so the right endpoint only moves forward within a block
/// and the left endpoint drifts by at most a block width per query. The
/// window then slides one element at a time, mirroring every step into the
/// [`FrequencyIndex`], and each query is read off once the window matches its
/// exact bounds.
pub fn solve(values: &[u64], queries: &[RangeQuery]) -> Vec<Option<u64>> {
    let mut answers = vec![None; queries.len()];
    if queries.is_empty() {
        return answers;
    }

    let block = block_size(values.len());
    let mut ordered: Vec<OrderedQuery> = queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            debug_assert!(query.start <= query.end && query.end <= values.len());
            debug_assert!(query.k >= 1);
            OrderedQuery {
                block: query.start / block,
                start: query.start,
                end: query.end,
                threshold: query.threshold(),
                index,
            }
        })
        .collect();
    ordered.sort_by(|a, b| (a.block, a.end).cmp(&(b.block, b.end)));

    let mut freq = FrequencyIndex::new();
    let (mut l, mut r) = (0_usize, 0_usize);
    for query in &ordered {
        // Expand before contracting, so every decrement hits an element that
        // is still inside the window.
        while l > query.start {
            l -= 1;
            freq.increment(values[l]);
        }
        while r < query.end {
            freq.increment(values[r]);
            r += 1;
        }
        while l < query.start {
            freq.decrement(values[l]);
            l += 1;
        }
        while r > query.end {
            r -= 1;
            freq.decrement(values[r]);
        }

        answers[query.index] = freq.smallest_at_least(query.threshold);
    }
    answers
}

fn block_size(n: usize) -> usize {
    ((n as f64).sqrt().round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::{RangeQuery, solve};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn brute_force(values: &[u64], query: &RangeQuery) -> Option<u64> {
        let mut counts = HashMap::<u64, usize>::new();
        for &value in &values[query.start..query.end] {
            *counts.entry(value).or_insert(0) += 1;
        }
        let threshold = (query.end - query.start).div_ceil(query.k);
        counts
            .iter()
            .filter(|&(_, &count)| count >= threshold)
            .map(|(&value, _)| value)
            .min()
    }

    #[test]
    fn smallest_frequent_value_wins() {
        // threshold = ceil(7 / 3) = 3; both 1 and no other value reach it.
        let values = [1, 1, 2, 3, 3, 2, 1];
        let answers = solve(&values, &[RangeQuery::new(0, 7, 3)]);
        assert_eq!(answers, vec![Some(1)]);
    }

    #[test]
    fn unreachable_threshold_yields_none() {
        // threshold = ceil(3 / 1) = 3; every value occurs once.
        let values = [1, 2, 3];
        let answers = solve(&values, &[RangeQuery::new(0, 3, 1)]);
        assert_eq!(answers, vec![None]);
    }

    #[test]
    fn uniform_array_qualifies() {
        // threshold = ceil(4 / 4) = 1.
        let values = [5, 5, 5, 5];
        let answers = solve(&values, &[RangeQuery::new(0, 4, 4)]);
        assert_eq!(answers, vec![Some(5)]);
    }

    #[test]
    fn smaller_value_at_higher_count_wins() {
        // threshold = ceil(5 / 3) = 2; 2 occurs twice, 1 three times. Both
        // qualify and 1 must win even though 2 sits at the lower count.
        let values = [2, 2, 1, 1, 1];
        let answers = solve(&values, &[RangeQuery::new(0, 5, 3)]);
        assert_eq!(answers, vec![Some(1)]);
    }

    #[test]
    fn no_queries_no_answers() {
        assert_eq!(solve(&[1, 2, 3], &[]), Vec::new());
    }

    #[test]
    fn empty_range_yields_none() {
        let values = [4, 4, 4];
        let answers = solve(&values, &[RangeQuery::new(1, 1, 2)]);
        assert_eq!(answers, vec![None]);
    }

    #[test]
    fn answers_come_back_in_input_order() {
        let values = [2, 2, 1, 1, 1, 9];
        let queries = [
            RangeQuery::new(5, 6, 1),
            RangeQuery::new(0, 6, 2),
            RangeQuery::new(0, 2, 1),
        ];
        let answers = solve(&values, &queries);
        assert_eq!(answers, vec![Some(9), Some(1), Some(2)]);
    }

    #[test]
    fn qualifying_set_grows_with_k() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let len = values.len();
        let queries: Vec<RangeQuery> = (1..=len).map(|k| RangeQuery::new(0, len, k)).collect();
        let answers = solve(&values, &queries);

        // Larger k lowers the threshold, so the qualifying set only grows:
        // once an answer appears it stays present and never increases.
        let mut best: Option<u64> = None;
        for answer in answers {
            if let Some(previous) = best {
                let current = answer.expect("qualifying set shrank as k grew");
                assert!(current <= previous);
            }
            best = answer.or(best);
        }
    }

    #[test]
    fn random_queries_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2029);

        for round in 0..40_u64 {
            let n = rng.random_range(1..=200);
            // Small alphabets so thresholds are actually met.
            let distinct = 1 + round % 16;
            let values: Vec<u64> = (0..n).map(|_| rng.random_range(1..=distinct)).collect();

            let q = rng.random_range(1..=100);
            let queries: Vec<RangeQuery> = (0..q)
                .map(|_| {
                    let start = rng.random_range(0..n);
                    let end = rng.random_range(start + 1..=n);
                    let k = rng.random_range(1..=10);
                    RangeQuery::new(start, end, k)
                })
                .collect();

            let answers = solve(&values, &queries);
            for (query, answer) in queries.iter().zip(&answers) {
                assert_eq!(
                    *answer,
                    brute_force(&values, query),
                    "n={n} query={query:?}"
                );
            }
        }
    }
}
