pub mod mahonian;

pub use self::mahonian::{max_inversions, MahonianTable};
use crate::error::{invalid_input, ConsensusResult};
use crate::profile::{Alternative, Ranking};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Kendall-tau distance plus the Mahonian counts the consensus check needs.
///
/// The Mahonian table is grown lazily and lives as long as the engine. It sits
/// behind an `RwLock` so one engine can be shared across rayon workers.
#[derive(Debug, Default)]
pub struct InversionEngine {
    table: RwLock<MahonianTable>,
}

impl InversionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table up to `max_n` alternatives ahead of time.
    pub fn with_capacity(max_n: usize) -> Self {
        let mut table = MahonianTable::new();
        table.ensure(max_n);
        Self {
            table: RwLock::new(table),
        }
    }

    pub fn distance<A: Alternative>(&self, a: &Ranking<A>, b: &Ranking<A>) -> ConsensusResult<u64> {
        inversion_distance(a.as_slice(), b.as_slice())
    }

    /// T(n, k): permutations of `n` items with exactly `k` inversions.
    pub fn permutations_with_inversions(&self, n: usize, k: usize) -> u128 {
        if k == 0 {
            return 1;
        }
        if k > max_inversions(n) {
            return 0;
        }
        if let Some(v) = self.read().get(n, k) {
            return v;
        }
        let mut table = self.write();
        table.ensure(n);
        table.get(n, k).unwrap_or(0)
    }

    /// Permutations of `n` items with at most `k` inversions.
    pub fn permutations_with_at_most_inversions(&self, n: usize, k: usize) -> u128 {
        let upper = k.min(max_inversions(n));
        (0..=upper).fold(0u128, |acc, i| {
            acc.saturating_add(self.permutations_with_inversions(n, i))
        })
    }

    /// The full row T(n, 0..=n(n-1)/2).
    pub fn mahonian_row(&self, n: usize) -> Vec<u128> {
        if let Some(row) = self.read().row(n) {
            return row.to_vec();
        }
        let mut table = self.write();
        table.ensure(n);
        table.row(n).map(<[u128]>::to_vec).unwrap_or_default()
    }

    pub fn cached_rows(&self) -> usize {
        self.read().rows_cached()
    }

    /// Drops every memoized row.
    pub fn reset(&self) {
        *self.write() = MahonianTable::new();
    }

    // Rows are pushed whole, so a poisoned table is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, MahonianTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MahonianTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Number of pairs ordered oppositely in `a` and `b`.
///
/// Both orders must list the same alternatives exactly once. `b` is relabelled
/// by each item's rank in `a`, and the inversions of that sequence are counted
/// by merge sort.
pub fn inversion_distance<A: Alternative>(a: &[A], b: &[A]) -> ConsensusResult<u64> {
    if a.len() != b.len() {
        return Err(invalid_input(format!(
            "cannot compare orders of length {} and {}",
            a.len(),
            b.len()
        )));
    }

    let rank_in_a: HashMap<&A, usize> = a.iter().enumerate().map(|(i, x)| (x, i)).collect();
    if rank_in_a.len() != a.len() {
        return Err(invalid_input(format!("{:?} repeats an alternative", a)));
    }

    let mut seen = vec![false; a.len()];
    let mut relabelled = Vec::with_capacity(b.len());
    for x in b {
        let rank = *rank_in_a
            .get(x)
            .ok_or_else(|| invalid_input(format!("{:?} does not appear in {:?}", x, a)))?;
        if std::mem::replace(&mut seen[rank], true) {
            return Err(invalid_input(format!("{:?} repeats {:?}", b, x)));
        }
        relabelled.push(rank);
    }

    Ok(count_inversions(&relabelled))
}

/// Inversions of an integer sequence, O(n log n).
pub fn count_inversions(seq: &[usize]) -> u64 {
    let mut work = seq.to_vec();
    let mut buf = vec![0usize; work.len()];
    sort_count(&mut work, &mut buf)
}

fn sort_count(a: &mut [usize], buf: &mut [usize]) -> u64 {
    let len = a.len();
    if len < 2 {
        return 0;
    }
    let mid = len / 2;

    let mut count = {
        let (left, right) = a.split_at_mut(mid);
        let (buf_left, buf_right) = buf.split_at_mut(mid);
        sort_count(left, buf_left) + sort_count(right, buf_right)
    };

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < len {
        if a[i] <= a[j] {
            buf[k] = a[i];
            i += 1;
        } else {
            // a[j] jumps ahead of everything left in the first half
            buf[k] = a[j];
            j += 1;
            count += (mid - i) as u64;
        }
        k += 1;
    }
    let rest = mid - i;
    buf[k..k + rest].copy_from_slice(&a[i..mid]);
    k += rest;
    buf[k..].copy_from_slice(&a[j..]);
    a.copy_from_slice(buf);

    count
}
