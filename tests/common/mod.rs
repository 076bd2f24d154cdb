#![allow(dead_code)]

use consensus_axis::{Ranking, WeightedProfile};
use itertools::Itertools;

pub fn ranking(order: &[u32]) -> Ranking<u32> {
    Ranking::new(order.to_vec()).expect("valid ranking")
}

pub fn profile(pairs: &[(&[u32], u64)]) -> WeightedProfile<u32> {
    WeightedProfile::from_orders(pairs.iter().map(|(o, w)| (o.to_vec(), *w)))
        .expect("valid profile")
}

/// Pairs ordered differently in `a` and `b`, by brute force.
pub fn discordant_pairs(a: &[u32], b: &[u32]) -> u64 {
    let pos_b = |x: u32| b.iter().position(|&y| y == x).unwrap();
    let mut count = 0;
    for i in 0..a.len() {
        for j in i + 1..a.len() {
            if pos_b(a[i]) > pos_b(a[j]) {
                count += 1;
            }
        }
    }
    count
}

pub fn all_orders(n: usize) -> Vec<Vec<u32>> {
    (0..n as u32).permutations(n).collect()
}
