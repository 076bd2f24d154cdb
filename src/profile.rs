use crate::error::{invalid_input, ConsensusError, ConsensusResult};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Anything that can be ranked: opaque, hashable, totally ordered.
pub trait Alternative: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync> Alternative for T {}

/// A strict total order over alternatives, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<A>", into = "Vec<A>")]
#[serde(bound(
    serialize = "A: Alternative + Serialize",
    deserialize = "A: Alternative + Deserialize<'de>"
))]
pub struct Ranking<A> {
    order: Vec<A>,
}

impl<A: Alternative> Ranking<A> {
    pub fn new(order: Vec<A>) -> ConsensusResult<Self> {
        let mut seen = HashSet::with_capacity(order.len());
        for alt in &order {
            if !seen.insert(alt) {
                return Err(invalid_input(format!(
                    "ranking {:?} lists alternative {:?} more than once",
                    order, alt
                )));
            }
        }
        Ok(Self { order })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[A] {
        &self.order
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.order.iter()
    }

    /// Maps each alternative to its 0-based rank.
    pub fn position_index(&self) -> HashMap<&A, usize> {
        self.order.iter().enumerate().map(|(i, a)| (a, i)).collect()
    }

    /// The alternatives in canonical (sorted) order.
    pub fn alternative_set(&self) -> Vec<A> {
        let mut set = self.order.clone();
        set.sort();
        set
    }
}

impl<A: Alternative> TryFrom<Vec<A>> for Ranking<A> {
    type Error = ConsensusError;

    fn try_from(order: Vec<A>) -> ConsensusResult<Self> {
        Ranking::new(order)
    }
}

impl<A> From<Ranking<A>> for Vec<A> {
    fn from(ranking: Ranking<A>) -> Self {
        ranking.order
    }
}

impl<A: fmt::Display> fmt::Display for Ranking<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.order.iter().join(", "))
    }
}

/// Serialized form of one profile line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "A: Alternative + Serialize",
    deserialize = "A: Alternative + Deserialize<'de>"
))]
pub struct ProfileEntry<A> {
    pub ranking: Ranking<A>,
    pub weight: u64,
}

/// Rankings mapped to positive weights, kept in insertion order.
///
/// Every ranking is a permutation of the same alternative set; the set is
/// fixed by the first ranking inserted. Weights are strictly positive and
/// re-inserting a ranking adds to its weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProfileEntry<A>>", into = "Vec<ProfileEntry<A>>")]
#[serde(bound(
    serialize = "A: Alternative + Serialize",
    deserialize = "A: Alternative + Deserialize<'de>"
))]
pub struct WeightedProfile<A> {
    entries: Vec<(Ranking<A>, u64)>,
    index: HashMap<Ranking<A>, usize>,
    alternatives: Vec<A>,
}

impl<A> Default for WeightedProfile<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            alternatives: Vec::new(),
        }
    }
}

impl<A: Alternative> WeightedProfile<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> ConsensusResult<Self>
    where
        I: IntoIterator<Item = (Ranking<A>, u64)>,
    {
        let mut profile = Self::new();
        for (ranking, weight) in pairs {
            profile.insert(ranking, weight)?;
        }
        Ok(profile)
    }

    /// Builds a profile from raw orders, validating each one as a ranking.
    pub fn from_orders<I>(pairs: I) -> ConsensusResult<Self>
    where
        I: IntoIterator<Item = (Vec<A>, u64)>,
    {
        let mut profile = Self::new();
        for (order, weight) in pairs {
            profile.insert(Ranking::new(order)?, weight)?;
        }
        Ok(profile)
    }

    pub fn insert(&mut self, ranking: Ranking<A>, weight: u64) -> ConsensusResult<()> {
        if weight == 0 {
            return Err(invalid_input(format!(
                "ranking {:?} has zero weight",
                ranking.as_slice()
            )));
        }

        if ranking.is_empty() {
            return Err(invalid_input("a ranking needs at least one alternative"));
        }

        if self.entries.is_empty() {
            self.alternatives = ranking.alternative_set();
        } else if ranking.len() != self.alternatives.len()
            || ranking.alternative_set() != self.alternatives
        {
            return Err(invalid_input(format!(
                "ranking {:?} is not a permutation of {:?}",
                ranking.as_slice(),
                self.alternatives
            )));
        }

        if let Some(&slot) = self.index.get(&ranking) {
            let entry = &mut self.entries[slot];
            entry.1 = entry.1.checked_add(weight).ok_or_else(|| {
                invalid_input(format!("weight of {:?} overflows", ranking.as_slice()))
            })?;
        } else {
            self.index.insert(ranking.clone(), self.entries.len());
            self.entries.push((ranking, weight));
        }
        Ok(())
    }

    pub fn add_vote(&mut self, ranking: Ranking<A>) -> ConsensusResult<()> {
        self.insert(ranking, 1)
    }

    /// Number of distinct rankings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ensure_non_empty(&self) -> ConsensusResult<()> {
        if self.is_empty() {
            Err(invalid_input("profile is empty"))
        } else {
            Ok(())
        }
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    /// The shared alternative set, sorted.
    pub fn alternatives(&self) -> &[A] {
        &self.alternatives
    }

    /// Sum of all weights, in u128 so any number of u64 weights fits.
    pub fn total_weight(&self) -> u128 {
        self.entries.iter().map(|(_, w)| u128::from(*w)).sum()
    }

    pub fn max_weight(&self) -> Option<u64> {
        self.entries.iter().map(|(_, w)| *w).max()
    }

    pub fn weight_of(&self, ranking: &Ranking<A>) -> Option<u64> {
        self.index.get(ranking).map(|&slot| self.entries[slot].1)
    }

    pub fn contains(&self, ranking: &Ranking<A>) -> bool {
        self.index.contains_key(ranking)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ranking<A>, u64)> + '_ {
        self.entries.iter().map(|(r, w)| (r, *w))
    }

    pub fn rankings(&self) -> impl Iterator<Item = &Ranking<A>> + '_ {
        self.entries.iter().map(|(r, _)| r)
    }
}

impl<A: Alternative> PartialEq for WeightedProfile<A> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<A: Alternative> Eq for WeightedProfile<A> {}

impl<A: Alternative> TryFrom<Vec<ProfileEntry<A>>> for WeightedProfile<A> {
    type Error = ConsensusError;

    fn try_from(entries: Vec<ProfileEntry<A>>) -> ConsensusResult<Self> {
        WeightedProfile::from_pairs(entries.into_iter().map(|e| (e.ranking, e.weight)))
    }
}

impl<A> From<WeightedProfile<A>> for Vec<ProfileEntry<A>> {
    fn from(profile: WeightedProfile<A>) -> Self {
        profile
            .entries
            .into_iter()
            .map(|(ranking, weight)| ProfileEntry { ranking, weight })
            .collect()
    }
}
