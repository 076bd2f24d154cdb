/// Largest number of inversions a permutation of `n` items can have.
pub fn max_inversions(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Mahonian numbers T(n, k), grown one row at a time.
///
/// `rows[n]` holds T(n, 0..=n(n-1)/2). Entries saturate at `u128::MAX`, so
/// values are exact up to n = 34 and stay an upper bound beyond that.
#[derive(Debug, Clone)]
pub struct MahonianTable {
    rows: Vec<Vec<u128>>,
}

impl Default for MahonianTable {
    fn default() -> Self {
        Self { rows: vec![vec![1]] }
    }
}

impl MahonianTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the table until row `n` exists.
    pub fn ensure(&mut self, n: usize) {
        while self.rows.len() <= n {
            let size = self.rows.len();
            let next = next_row(&self.rows[size - 1], size);
            self.rows.push(next);
        }
    }

    /// `None` when row `n` has not been computed yet.
    pub fn get(&self, n: usize, k: usize) -> Option<u128> {
        self.rows.get(n).map(|row| row.get(k).copied().unwrap_or(0))
    }

    pub fn row(&self, n: usize) -> Option<&[u128]> {
        self.rows.get(n).map(Vec::as_slice)
    }

    /// Number of rows held, counting the n = 0 row.
    pub fn rows_cached(&self) -> usize {
        self.rows.len()
    }
}

// T(n, k) = sum_{j=0}^{min(n-1, k)} T(n-1, k-j)
fn next_row(prev: &[u128], n: usize) -> Vec<u128> {
    let len = max_inversions(n) + 1;
    let mut row = vec![0u128; len];
    for (k, slot) in row.iter_mut().enumerate() {
        let lo = k.saturating_sub(n - 1);
        let hi = k.min(prev.len() - 1);
        if lo > hi {
            continue;
        }
        *slot = prev[lo..=hi]
            .iter()
            .fold(0u128, |acc, &v| acc.saturating_add(v));
    }
    row
}
