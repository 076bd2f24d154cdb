use crate::profile::{Alternative, Ranking, WeightedProfile};
use std::collections::HashMap;

/// Whether `ranking` is single-peaked on `axis`: every top-k prefix of the
/// ranking occupies a contiguous stretch of the axis.
pub fn is_single_peaked_on<A: Alternative>(ranking: &Ranking<A>, axis: &[A]) -> bool {
    if ranking.len() != axis.len() {
        return false;
    }
    let pos: HashMap<&A, usize> = axis.iter().enumerate().map(|(i, a)| (a, i)).collect();
    let mut spots = Vec::with_capacity(ranking.len());
    for alt in ranking.iter() {
        match pos.get(alt) {
            Some(&p) => spots.push(p),
            None => return false,
        }
    }
    contiguous_prefixes(&spots)
}

/// An axis on which every ranking of the profile is single-peaked, or `None`
/// when the support admits no such axis. Weights play no part.
pub fn single_peaked_axis<A: Alternative>(profile: &WeightedProfile<A>) -> Option<Vec<A>> {
    if profile.is_empty() {
        return None;
    }
    let alternatives = profile.alternatives();
    let label: HashMap<&A, usize> = alternatives
        .iter()
        .enumerate()
        .map(|(i, a)| (a, i))
        .collect();
    let votes: Vec<Vec<usize>> = profile
        .rankings()
        .map(|r| r.iter().filter_map(|a| label.get(a).copied()).collect())
        .collect();

    let mut search = AxisSearch {
        votes: &votes,
        removed: vec![false; alternatives.len()],
        left: Vec::new(),
        right: Vec::new(),
    };
    search
        .run()
        .map(|axis| axis.into_iter().map(|i| alternatives[i].clone()).collect())
}

pub fn is_single_peaked<A: Alternative>(profile: &WeightedProfile<A>) -> bool {
    single_peaked_axis(profile).is_some()
}

fn contiguous_prefixes(spots: &[usize]) -> bool {
    let Some(&peak) = spots.first() else {
        return true;
    };
    let (mut lo, mut hi) = (peak, peak);
    for &p in &spots[1..] {
        if p + 1 == lo {
            lo = p;
        } else if p == hi + 1 {
            hi = p;
        } else {
            return false;
        }
    }
    true
}

/// Builds the axis from both ends inwards. Restricted to the alternatives not
/// yet placed, each vote's worst alternative has to sit at one end of what is
/// left of the axis, so at most two distinct worst alternatives may show up
/// per step. Branches over which end each one takes.
struct AxisSearch<'a> {
    votes: &'a [Vec<usize>],
    removed: Vec<bool>,
    left: Vec<usize>,
    right: Vec<usize>,
}

impl AxisSearch<'_> {
    fn run(&mut self) -> Option<Vec<usize>> {
        let n = self.removed.len();
        let placed = self.left.len() + self.right.len();
        if placed == n {
            let axis: Vec<usize> = self
                .left
                .iter()
                .chain(self.right.iter().rev())
                .copied()
                .collect();
            return self.accepts(&axis).then_some(axis);
        }

        let worst = self.worst_remaining()?;
        // mirrored axes are equivalent, so the first step needs one branch
        let first = placed == 0;
        let options: Vec<(Option<usize>, Option<usize>)> = match worst[..] {
            [x] if first || n - placed == 1 => vec![(Some(x), None)],
            [x] => vec![(Some(x), None), (None, Some(x))],
            [x, y] if first => vec![(Some(x), Some(y))],
            [x, y] => vec![(Some(x), Some(y)), (Some(y), Some(x))],
            _ => return None,
        };

        for (to_left, to_right) in options {
            self.place(to_left, to_right, true);
            let found = self.run();
            self.place(to_left, to_right, false);
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Distinct last-ranked remaining alternatives, or `None` past two.
    fn worst_remaining(&self) -> Option<Vec<usize>> {
        let mut worst = Vec::with_capacity(2);
        for vote in self.votes {
            if let Some(&w) = vote.iter().rev().find(|&&a| !self.removed[a]) {
                if !worst.contains(&w) {
                    if worst.len() == 2 {
                        return None;
                    }
                    worst.push(w);
                }
            }
        }
        Some(worst)
    }

    fn place(&mut self, to_left: Option<usize>, to_right: Option<usize>, push: bool) {
        for (alt, side) in [(to_left, &mut self.left), (to_right, &mut self.right)] {
            if let Some(a) = alt {
                self.removed[a] = push;
                if push {
                    side.push(a);
                } else {
                    side.pop();
                }
            }
        }
    }

    fn accepts(&self, axis: &[usize]) -> bool {
        let mut pos = vec![0; axis.len()];
        for (i, &a) in axis.iter().enumerate() {
            pos[a] = i;
        }
        self.votes.iter().all(|vote| {
            let spots: Vec<usize> = vote.iter().map(|&a| pos[a]).collect();
            contiguous_prefixes(&spots)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_must_stay_contiguous() {
        assert!(contiguous_prefixes(&[2, 1, 3, 0, 4]));
        assert!(contiguous_prefixes(&[0, 1, 2]));
        assert!(!contiguous_prefixes(&[1, 3, 2, 0]));
        assert!(contiguous_prefixes(&[]));
    }
}
