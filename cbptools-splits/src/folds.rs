use std::fmt::{self, Display};
use std::str::FromStr;

use rand::Rng;

use crate::consts::N_FOLDS;
use crate::errors::SplitsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldLabel {
    Train,
    Valid,
    Test,
}

impl Display for FoldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FoldLabel::Train => "train",
            FoldLabel::Valid => "valid",
            FoldLabel::Test => "test",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for FoldLabel {
    type Err = SplitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(FoldLabel::Train),
            "valid" => Ok(FoldLabel::Valid),
            "test" => Ok(FoldLabel::Test),
            _ => Err(SplitsError::InvalidFoldLabel(s.to_string())),
        }
    }
}

///
/// The label of one group in each of the folds. Exactly one fold holds the group
/// out (as `valid` or `test`); it is `train` everywhere else.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldAssignment {
    pub labels: [FoldLabel; N_FOLDS],
}

impl FoldAssignment {
    pub fn held_out(fold: usize, label: FoldLabel) -> Self {
        let mut labels = [FoldLabel::Train; N_FOLDS];
        labels[fold] = label;
        FoldAssignment { labels }
    }

    ///
    /// The held-out fold and its label, `None` if the group is train in every fold.
    ///
    pub fn held_out_fold(&self) -> Option<(usize, FoldLabel)> {
        self.labels
            .iter()
            .enumerate()
            .find(|(_, label)| **label != FoldLabel::Train)
            .map(|(fold, label)| (fold, *label))
    }

    pub fn n_held_out(&self) -> usize {
        self.labels
            .iter()
            .filter(|label| **label != FoldLabel::Train)
            .count()
    }
}

///
/// Hands out fold assignments to groups, one at a time, in ranked order.
///
/// The held-out label alternates strictly by parity of the number of groups seen
/// (even: `valid`, odd: `test`). The held-out fold is drawn uniformly from the folds
/// not yet used in the current round; a round is [N_FOLDS] groups, so each round
/// holds out every fold exactly once.
///
pub struct FoldAssigner<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    count: usize,
    used: Vec<usize>,
}

impl<'a, R: Rng + ?Sized> FoldAssigner<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        FoldAssigner {
            rng,
            count: 0,
            used: Vec::with_capacity(N_FOLDS),
        }
    }

    pub fn next_assignment(&mut self) -> FoldAssignment {
        let label = if self.count % 2 == 0 {
            FoldLabel::Valid
        } else {
            FoldLabel::Test
        };

        let available: Vec<usize> = (0..N_FOLDS).filter(|f| !self.used.contains(f)).collect();
        let fold = available[self.rng.random_range(0..available.len())];

        self.count += 1;
        self.used.push(fold);
        if self.used.len() == N_FOLDS {
            self.used.clear();
        }

        FoldAssignment::held_out(fold, label)
    }

    /// Number of groups assigned so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

///
/// Assign folds to `n_groups` groups that are already in ranked order.
///
pub fn assign_folds<R: Rng + ?Sized>(n_groups: usize, rng: &mut R) -> Vec<FoldAssignment> {
    let mut assigner = FoldAssigner::new(rng);
    (0..n_groups).map(|_| assigner.next_assignment()).collect()
}
