//! Ranking and duration-budget selection.
//!
//! Candidates are ranked by course position, then score. A greedy pass
//! admits videos while the total stays under the bucket ceiling and the
//! playlist cap, stopping early once the bucket's stopping rule is met.
//! Bounded buckets that end up short get a second pass that ignores the
//! ceiling, and an empty pick falls back to the top few ranked videos.

use std::cmp::Ordering;

use learnpath_models::{DurationBucket, ScoredVideo};

/// Videos taken when no pass selected anything.
pub const EMPTY_FALLBACK_COUNT: usize = 3;

/// Which pass produced the final pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPass {
    /// The greedy pass alone was enough
    Budget,
    /// The under-fill pass added videos past the ceiling
    UnderFill,
    /// Nothing fit; the top ranked videos were taken
    TopRanked,
    /// No candidates to choose from
    Empty,
}

/// Outcome of selection.
#[derive(Debug, Clone)]
pub struct Selection {
    /// In rank order, never more than the playlist cap
    pub videos: Vec<ScoredVideo>,
    /// Minutes across the returned videos
    pub total_minutes: f64,
    pub pass: SelectionPass,
}

/// Sort by ascending course order, then descending score.
///
/// The sort is stable so ties keep discovery order.
pub fn rank(mut videos: Vec<ScoredVideo>) -> Vec<ScoredVideo> {
    videos.sort_by(rank_order);
    videos
}

fn rank_order(a: &ScoredVideo, b: &ScoredVideo) -> Ordering {
    a.course_order
        .cmp(&b.course_order)
        .then_with(|| b.learning_score.cmp(&a.learning_score))
}

/// Running pick over a ranked list, never holding more than `cap` videos.
struct Picks<'a> {
    ranked: &'a [ScoredVideo],
    picked: Vec<bool>,
    count: usize,
    total: f64,
    cap: usize,
}

impl<'a> Picks<'a> {
    fn new(ranked: &'a [ScoredVideo], cap: usize) -> Self {
        Self {
            ranked,
            picked: vec![false; ranked.len()],
            count: 0,
            total: 0.0,
            cap,
        }
    }

    /// Admit `idx` if the total stays within `limit`.
    ///
    /// Once the cap is reached, the shortest pick is swapped out for it
    /// when strictly shorter; among equals the lowest ranked one goes.
    fn offer(&mut self, idx: usize, limit: f64) -> bool {
        if self.picked[idx] {
            return false;
        }
        let minutes = self.ranked[idx].duration_minutes;

        if self.count < self.cap {
            if self.total + minutes > limit {
                return false;
            }
            self.picked[idx] = true;
            self.count += 1;
            self.total += minutes;
            return true;
        }

        let shortest = self
            .picked
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, keep)| **keep)
            .map(|(j, _)| j)
            .min_by(|a, b| {
                self.ranked[*a]
                    .duration_minutes
                    .total_cmp(&self.ranked[*b].duration_minutes)
            });

        match shortest {
            Some(out)
                if self.ranked[out].duration_minutes < minutes
                    && self.total - self.ranked[out].duration_minutes + minutes <= limit =>
            {
                self.picked[out] = false;
                self.picked[idx] = true;
                self.total += minutes - self.ranked[out].duration_minutes;
                true
            }
            _ => false,
        }
    }

    fn into_selection(self, pass: SelectionPass) -> Selection {
        let videos: Vec<ScoredVideo> = self
            .ranked
            .iter()
            .zip(self.picked)
            .filter(|(_, keep)| *keep)
            .map(|(video, _)| video.clone())
            .collect();
        let total_minutes = videos.iter().map(|v| v.duration_minutes).sum();

        Selection {
            videos,
            total_minutes,
            pass,
        }
    }
}

/// Pick at most `max_playlist` videos from a ranked list to fill the bucket.
///
/// The cap is enforced while picking, so a long video met after the cap is
/// full can still displace a shorter one when the stopping rule is unmet.
pub fn select(ranked: &[ScoredVideo], bucket: DurationBucket, max_playlist: usize) -> Selection {
    if ranked.is_empty() {
        return Selection {
            videos: Vec::new(),
            total_minutes: 0.0,
            pass: SelectionPass::Empty,
        };
    }

    let range = bucket.range();
    let ceiling = range.ceiling();
    let stopping_rule = bucket.stopping_rule();

    let mut picks = Picks::new(ranked, max_playlist);
    let mut pass = SelectionPass::Budget;

    for idx in 0..ranked.len() {
        picks.offer(idx, ceiling);
        if stopping_rule.should_stop(picks.count, picks.total) {
            break;
        }
    }

    if range.is_bounded() && picks.total < range.min {
        for idx in 0..ranked.len() {
            if picks.total >= range.min {
                break;
            }
            if picks.offer(idx, f64::INFINITY) {
                pass = SelectionPass::UnderFill;
            }
        }
    }

    if picks.count == 0 {
        for flag in picks
            .picked
            .iter_mut()
            .take(EMPTY_FALLBACK_COUNT.min(max_playlist))
        {
            *flag = true;
        }
        pass = SelectionPass::TopRanked;
    }

    picks.into_selection(pass)
}

/// Keep the playlist non-empty whenever the ranked pool is not.
///
/// An empty selection is replaced by the top `limit` ranked videos with no
/// regard for duration. Returns `true` when the replacement happened.
pub fn ensure_non_empty(
    selection: Selection,
    ranked: &[ScoredVideo],
    limit: usize,
) -> (Selection, bool) {
    if !selection.videos.is_empty() || ranked.is_empty() {
        return (selection, false);
    }

    let videos = top_ranked(ranked, limit);
    let total_minutes = videos.iter().map(|v| v.duration_minutes).sum();
    (
        Selection {
            videos,
            total_minutes,
            pass: SelectionPass::TopRanked,
        },
        true,
    )
}

/// Top `limit` ranked videos regardless of duration.
pub fn top_ranked(ranked: &[ScoredVideo], limit: usize) -> Vec<ScoredVideo> {
    ranked.iter().take(limit).cloned().collect()
}
