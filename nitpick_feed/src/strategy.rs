// Sampling and ranking strategies.
// Both are pure functions of their input, apart from the random choice in `Sampling`.

use itertools::Itertools;
use rand::seq::IteratorRandom;

use nitpick_core::{Tweet, Username};

use crate::settings::{FeedStrategy, RankingAlgorithm};

/// Users picked for one cycle, and the rotation cursor to keep for the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sample {
    pub users: Vec<Username>,
    pub cursor: Option<Username>,
}

impl FeedStrategy {
    /// Pick at most `width` users out of `users`, which must be sorted.
    /// `cursor` is the last user a sequential cycle pulled; `Sampling` leaves it untouched.
    pub(crate) fn sample(&self, users: &[Username], width: usize, cursor: Option<&str>) -> Sample {
        let width = width.min(users.len());
        if width == 0 {
            return Sample {
                users: Vec::new(),
                cursor: cursor.map(str::to_string),
            };
        }

        match self {
            FeedStrategy::Sampling => {
                let mut picked = users.iter().cloned().choose_multiple(&mut rand::thread_rng(), width);
                picked.sort();
                Sample {
                    users: picked,
                    cursor: cursor.map(str::to_string),
                }
            }
            FeedStrategy::Sequential => {
                // Resume right after the cursor; it may have been unfollowed since.
                let start = cursor
                    .map(|c| users.partition_point(|u| u.as_str() <= c))
                    .unwrap_or(0);
                let picked: Vec<Username> = users.iter().cycle().skip(start).take(width).cloned().collect();
                let cursor = picked.last().cloned();
                Sample { users: picked, cursor }
            }
        }
    }
}

impl RankingAlgorithm {
    pub fn rank<'a>(&self, tweets: impl IntoIterator<Item = &'a Tweet>) -> Vec<&'a Tweet> {
        match self {
            RankingAlgorithm::Chronological => tweets
                .into_iter()
                .sorted_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)))
                .collect(),
        }
    }
}
