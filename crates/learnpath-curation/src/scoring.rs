//! Learning score heuristics.
//!
//! A video starts at [`BASE_SCORE`] and collects bonuses for fitting the
//! course length, the learning purpose, the sub-topic and the topic, plus
//! popularity, channel reputation, recency and quality cues. Each signal is
//! independent; the result is clamped to 0–100.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use learnpath_models::{
    decode_duration, Candidate, LearningPreferences, ScoredVideo, SearchResult, VideoDetails,
};

/// Score every video starts from.
pub const BASE_SCORE: i32 = 50;

/// Reasons kept per video.
pub const MAX_REASONS: usize = 4;

/// Videos younger than this many 30-day months earn the recency bonus.
const RECENT_MONTHS: f64 = 24.0;

/// Channel name fragments of well-known educational creators.
const TRUSTED_CHANNELS: &[&str] = &[
    "traversy",
    "academind",
    "net ninja",
    "fireship",
    "programming with mosh",
    "freecodecamp",
];

/// Words suggesting structured, in-depth material.
const QUALITY_WORDS: &[&str] = &[
    "complete",
    "full",
    "comprehensive",
    "step by step",
    "project",
    "hands-on",
];

/// How the duration signal is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationFit {
    /// Judge the video length on its own.
    Standalone,
    /// Judge the course total after adding this video to the given minutes.
    RunningTotal(f64),
}

/// Score and explanation for one video.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningScore {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// The video facts the heuristics look at.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub video: &'a SearchResult,
    pub view_count: u64,
    pub duration_minutes: f64,
    /// Sub-topic title the video was found for (the learner's topic for flat searches)
    pub sub_topic: &'a str,
}

/// Compute the learning score of one video.
///
/// Deterministic for identical inputs; `now` anchors the recency check.
pub fn score_video(
    input: &ScoreInput<'_>,
    preferences: &LearningPreferences,
    fit: DurationFit,
    now: DateTime<Utc>,
) -> LearningScore {
    let mut score = BASE_SCORE;
    let mut reasons: Vec<String> = Vec::new();

    let title = input.video.title.to_lowercase();
    let description = input.video.description.to_lowercase();
    let mentions = |needle: &str| title.contains(needle) || description.contains(needle);

    // Duration fit
    let range = preferences.duration.range();
    match fit {
        DurationFit::RunningTotal(running) => {
            let new_total = running + input.duration_minutes;
            if range.contains(new_total) {
                score += 20;
                reasons.push(format!(
                    "Contributes well to your {} hour course goal",
                    preferences.duration
                ));
            } else if new_total > range.max && new_total <= range.ceiling() {
                score += 10;
            }
        }
        DurationFit::Standalone => {
            let minutes = input.duration_minutes;
            if (10.0..=60.0).contains(&minutes) {
                score += 12;
                reasons.push(format!(
                    "Good length ({} min) for course content",
                    minutes.round()
                ));
            } else if minutes > 60.0 && minutes <= 120.0 {
                score += 8;
                reasons.push(format!(
                    "Longer video ({} min) - comprehensive content",
                    minutes.round()
                ));
            }
        }
    }

    // Purpose keywords
    let purpose = preferences.learning_purpose;
    if purpose.keywords().iter().any(|word| mentions(*word)) {
        score += 12;
        reasons.push(format!("Matches {} learning approach", purpose));
    }

    // Sub-topic relevance
    let sub_topic = input.sub_topic.trim().to_lowercase();
    if !sub_topic.is_empty() && mentions(sub_topic.as_str()) {
        score += 15;
        reasons.push(format!(
            "Highly relevant to course structure: {}",
            input.sub_topic.trim()
        ));
    }

    // Topic-word coverage
    let topic = preferences.topic.trim().to_lowercase();
    let words: Vec<&str> = topic.split_whitespace().collect();
    let matched = words.iter().filter(|&&word| mentions(word)).count();
    if !words.is_empty() && matched == words.len() {
        score += 10;
        reasons.push(format!("Highly relevant to \"{}\"", preferences.topic.trim()));
    } else if matched > 0 {
        score += 5;
    }

    // Popularity
    if input.view_count > 100_000 {
        score += 10;
        reasons.push("Highly popular and well-received by learners".to_string());
    } else if input.view_count > 10_000 {
        score += 5;
        reasons.push("Good engagement from the learning community".to_string());
    }

    // Trusted channel
    let channel = input.video.channel_name.to_lowercase();
    if TRUSTED_CHANNELS.iter().any(|c| channel.contains(*c)) {
        score += 10;
        reasons.push("From a trusted educational content creator".to_string());
    }

    // Recency
    if let Some(published) = input.video.published_at_utc() {
        let months_old = (now - published).num_seconds() as f64 / (60.0 * 60.0 * 24.0 * 30.0);
        if months_old <= RECENT_MONTHS {
            score += 8;
            reasons.push("Recent content with up-to-date information".to_string());
        }
    }

    // Quality cues
    if QUALITY_WORDS.iter().any(|word| mentions(*word)) {
        score += 8;
        reasons.push("Comprehensive and structured learning approach".to_string());
    }

    reasons.truncate(MAX_REASONS);

    LearningScore {
        score: score.clamp(0, 100) as u8,
        reasons,
    }
}

/// Attach metadata and scores to candidates.
///
/// Candidates without metadata are dropped. Flat-search candidates are
/// scored against the learner's topic.
pub fn score_candidates(
    candidates: Vec<Candidate>,
    details: &HashMap<String, VideoDetails>,
    preferences: &LearningPreferences,
    now: DateTime<Utc>,
) -> Vec<ScoredVideo> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let meta = details.get(&candidate.video.video_id)?.clone();
            let course_order = candidate.course_order();
            let course_topic = candidate
                .sub_topic
                .map(|tag| tag.title)
                .unwrap_or_else(|| preferences.topic.trim().to_string());
            let duration_minutes = decode_duration(&meta.duration_code);

            let LearningScore { score, reasons } = score_video(
                &ScoreInput {
                    video: &candidate.video,
                    view_count: meta.view_count,
                    duration_minutes,
                    sub_topic: &course_topic,
                },
                preferences,
                DurationFit::Standalone,
                now,
            );

            Some(ScoredVideo {
                video: candidate.video,
                details: meta,
                duration_minutes,
                learning_score: score,
                reasons,
                course_order,
                course_topic,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use learnpath_models::{DurationBucket, LearningPurpose};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn prefs(topic: &str, purpose: LearningPurpose, duration: DurationBucket) -> LearningPreferences {
        LearningPreferences {
            topic: topic.to_string(),
            learning_purpose: purpose,
            duration,
            language: "en".to_string(),
            intent: None,
        }
    }

    fn video(title: &str, channel: &str, published_at: &str, description: &str) -> SearchResult {
        SearchResult {
            video_id: "v1".to_string(),
            title: title.to_string(),
            channel_name: channel.to_string(),
            thumbnail_url: String::new(),
            published_at: published_at.to_string(),
            description: description.to_string(),
        }
    }

    fn bare_video() -> SearchResult {
        video("Untitled", "Someone", "2000-01-01T00:00:00Z", "")
    }

    fn score(input: ScoreInput<'_>, p: &LearningPreferences, fit: DurationFit) -> LearningScore {
        score_video(&input, p, fit, now())
    }

    #[test]
    fn test_bare_video_scores_base() {
        let v = bare_video();
        let p = prefs("Kubernetes", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let result = score(
            ScoreInput { video: &v, view_count: 0, duration_minutes: 5.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 50);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_standalone_duration_bands() {
        let v = bare_video();
        let p = prefs("Kubernetes", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let at = |minutes: f64| {
            score(
                ScoreInput { video: &v, view_count: 0, duration_minutes: minutes, sub_topic: "" },
                &p,
                DurationFit::Standalone,
            )
        };

        let focused = at(20.0);
        assert_eq!(focused.score, 62);
        assert_eq!(focused.reasons, vec!["Good length (20 min) for course content"]);

        assert_eq!(at(10.0).score, 62);
        assert_eq!(at(60.0).score, 62);
        assert_eq!(at(90.0).score, 58);
        assert_eq!(at(120.0).score, 58);
        assert_eq!(at(121.0).score, 50);
        assert_eq!(at(9.5).score, 50);
    }

    #[test]
    fn test_running_total_duration_fit() {
        let v = bare_video();
        let p = prefs("Kubernetes", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let with_total = |running: f64, minutes: f64| {
            score(
                ScoreInput { video: &v, view_count: 0, duration_minutes: minutes, sub_topic: "" },
                &p,
                DurationFit::RunningTotal(running),
            )
        };

        let in_range = with_total(50.0, 20.0);
        assert_eq!(in_range.score, 70);
        assert_eq!(in_range.reasons, vec!["Contributes well to your 1-2 hour course goal"]);

        let slightly_over = with_total(110.0, 20.0);
        assert_eq!(slightly_over.score, 60);
        assert!(slightly_over.reasons.is_empty());

        assert_eq!(with_total(140.0, 20.0).score, 50);
        assert_eq!(with_total(10.0, 20.0).score, 50);
    }

    #[test]
    fn test_running_total_unbounded_bucket() {
        let v = bare_video();
        let p = prefs("Kubernetes", LearningPurpose::Overview, DurationBucket::TenPlus);
        let result = score(
            ScoreInput { video: &v, view_count: 0, duration_minutes: 60.0, sub_topic: "" },
            &p,
            DurationFit::RunningTotal(5000.0),
        );
        assert_eq!(result.score, 70);
    }

    #[test]
    fn test_topic_word_coverage() {
        let p = prefs("React Hooks", LearningPurpose::Overview, DurationBucket::OneToTwo);

        let all = video("Learn REACT hooks today", "x", "2000-01-01T00:00:00Z", "");
        let result = score(
            ScoreInput { video: &all, view_count: 0, duration_minutes: 0.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 60);
        assert_eq!(result.reasons, vec!["Highly relevant to \"React Hooks\""]);

        let some = video("React basics", "x", "2000-01-01T00:00:00Z", "");
        let result = score(
            ScoreInput { video: &some, view_count: 0, duration_minutes: 0.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        // "basics" is an overview keyword
        assert_eq!(result.score, 50 + 12 + 5);
    }

    #[test]
    fn test_sub_topic_relevance() {
        let p = prefs("Rust", LearningPurpose::ProjectBased, DurationBucket::OneToTwo);
        let v = video("Ownership", "x", "2000-01-01T00:00:00Z", "All about the borrow checker");
        let result = score(
            ScoreInput { video: &v, view_count: 0, duration_minutes: 0.0, sub_topic: "Borrow Checker" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 65);
        assert_eq!(result.reasons, vec!["Highly relevant to course structure: Borrow Checker"]);
    }

    #[test]
    fn test_popularity_tiers() {
        let v = bare_video();
        let p = prefs("Go", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let views = |n: u64| {
            score(
                ScoreInput { video: &v, view_count: n, duration_minutes: 0.0, sub_topic: "" },
                &p,
                DurationFit::Standalone,
            )
            .score
        };
        assert_eq!(views(100_001), 60);
        assert_eq!(views(100_000), 55);
        assert_eq!(views(10_001), 55);
        assert_eq!(views(10_000), 50);
    }

    #[test]
    fn test_trusted_channel_case_insensitive() {
        let v = video("Untitled", "The Net Ninja", "2000-01-01T00:00:00Z", "");
        let p = prefs("Go", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let result = score(
            ScoreInput { video: &v, view_count: 0, duration_minutes: 0.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 60);
        assert_eq!(result.reasons, vec!["From a trusted educational content creator"]);
    }

    #[test]
    fn test_recency_uses_thirty_day_months() {
        let p = prefs("Go", LearningPurpose::Overview, DurationBucket::OneToTwo);

        // 700 days before `now`
        let recent = video("Untitled", "x", "2023-07-02T00:00:00Z", "");
        let result = score(
            ScoreInput { video: &recent, view_count: 0, duration_minutes: 0.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 58);

        // 730 days before `now`: past 24 months of 30 days
        let stale = video("Untitled", "x", "2023-06-02T00:00:00Z", "");
        let result = score(
            ScoreInput { video: &stale, view_count: 0, duration_minutes: 0.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 50);

        let unparseable = video("Untitled", "x", "yesterday", "");
        let result = score(
            ScoreInput { video: &unparseable, view_count: 0, duration_minutes: 0.0, sub_topic: "" },
            &p,
            DurationFit::Standalone,
        );
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_score_clamped_and_reasons_truncated() {
        let p = prefs("react hooks", LearningPurpose::Steps, DurationBucket::OneToTwo);
        let v = video(
            "React Hooks complete step by step tutorial",
            "Traversy Media",
            "2025-01-01T00:00:00Z",
            "useState deep dive",
        );
        let result = score(
            ScoreInput { video: &v, view_count: 2_000_000, duration_minutes: 30.0, sub_topic: "useState" },
            &p,
            DurationFit::Standalone,
        );

        // 50 + 12 + 12 + 15 + 10 + 10 + 10 + 8 + 8 = 135
        assert_eq!(result.score, 100);
        assert_eq!(result.reasons.len(), MAX_REASONS);
        assert_eq!(result.reasons[0], "Good length (30 min) for course content");
        assert_eq!(result.reasons[1], "Matches steps learning approach");
        assert_eq!(result.reasons[2], "Highly relevant to course structure: useState");
        assert_eq!(result.reasons[3], "Highly relevant to \"react hooks\"");
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let p = prefs("Docker", LearningPurpose::ProjectBased, DurationBucket::TwoToFive);
        let v = video("Build a Docker project", "fireship", "2024-12-01T00:00:00Z", "hands-on");
        let input = ScoreInput { video: &v, view_count: 55_000, duration_minutes: 42.0, sub_topic: "Images" };
        let first = score(input, &p, DurationFit::Standalone);
        let second = score(input, &p, DurationFit::Standalone);
        assert_eq!(first, second);
        assert!(first.score <= 100);
        assert!(first.reasons.len() <= MAX_REASONS);
    }

    #[test]
    fn test_score_candidates_drops_missing_metadata() {
        let p = prefs("Go", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let mut a = bare_video();
        a.video_id = "a".into();
        let mut b = bare_video();
        b.video_id = "b".into();

        let candidates = vec![Candidate::tagged(a, "Goroutines", 2), Candidate::untagged(b)];
        let mut details = HashMap::new();
        details.insert(
            "a".to_string(),
            VideoDetails { duration_code: "PT20M".into(), view_count: 5 },
        );

        let scored = score_candidates(candidates, &details, &p, now());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].course_order, 2);
        assert_eq!(scored[0].course_topic, "Goroutines");
        assert!((scored[0].duration_minutes - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_candidates_flat_uses_learner_topic() {
        let p = prefs("  Go  ", LearningPurpose::Overview, DurationBucket::OneToTwo);
        let v = bare_video();
        let mut details = HashMap::new();
        details.insert(
            "v1".to_string(),
            VideoDetails { duration_code: "PT5M".into(), view_count: 0 },
        );
        let scored = score_candidates(vec![Candidate::untagged(v)], &details, &p, now());
        assert_eq!(scored[0].course_topic, "Go");
        assert_eq!(scored[0].course_order, 0);
    }
}
