//! Mood history and the statistics drawn from it.
//!
//! The history is an append-only list of `(mood, timestamp)` records. Its JSON
//! form is a plain array,
//! `[{"mood":"happy","timestamp":"2024-03-09T16:00:00.000Z"}, ...]`, which is
//! what hosts keep in local storage. Millisecond timestamps also load.

use serde::{Deserialize, Serialize};

use crate::error::MoodError;
use crate::mood::Mood;

/// One recorded mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// The mood chosen or rolled
    pub mood: Mood,
    /// When it was recorded, in milliseconds since the Unix epoch
    #[serde(rename = "timestamp", with = "crate::timestamp::iso_millis")]
    pub timestamp_ms: u64,
}

/// Ordered list of recorded moods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodHistory {
    entries: Vec<MoodEntry>,
}

impl MoodHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&mut self, mood: Mood, timestamp_ms: u64) {
        self.entries.push(MoodEntry { mood, timestamp_ms });
    }

    /// All records, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The most recent record.
    #[must_use]
    pub fn latest(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    /// Tally the history.
    #[must_use]
    pub fn stats(&self) -> MoodStats {
        let mut counts: Vec<(Mood, u32)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.mood, 1)),
            }
        }
        MoodStats { counts }
    }

    /// Serialize to the storage JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`MoodError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, MoodError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the storage JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`MoodError::Json`] on malformed input or unknown moods.
    pub fn from_json(json: &str) -> Result<Self, MoodError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Extend<MoodEntry> for MoodHistory {
    fn extend<T: IntoIterator<Item = MoodEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

/// Per-mood counts, in order of first appearance in the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodStats {
    counts: Vec<(Mood, u32)>,
}

/// One slice of the mood chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodSlice {
    /// The mood
    pub mood: Mood,
    /// Times recorded
    pub count: u32,
    /// Fraction of all records, in `[0, 1]`
    pub share: f64,
    /// Chart colour from the catalog
    pub color: &'static str,
}

impl MoodSlice {
    /// Share as a whole percentage, rounded half away from zero.
    #[must_use]
    pub fn percent(&self) -> u32 {
        // share is within [0, 1], so the rounded value fits
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.share * 100.0).round() as u32;
        percent
    }
}

impl MoodStats {
    /// Total number of records.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// How often `mood` was recorded.
    #[must_use]
    pub fn count(&self, mood: Mood) -> u32 {
        self.counts
            .iter()
            .find(|(m, _)| *m == mood)
            .map_or(0, |(_, count)| *count)
    }

    /// Fraction of records that are `mood` (0 for an empty history).
    #[must_use]
    pub fn share(&self, mood: Mood) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            f64::from(self.count(mood)) / f64::from(total)
        }
    }

    /// The most frequent mood; ties go to the one that appeared first.
    #[must_use]
    pub fn most_common(&self) -> Option<Mood> {
        let mut best: Option<(Mood, u32)> = None;
        for &(mood, count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((mood, count));
            }
        }
        best.map(|(mood, _)| mood)
    }

    /// Chart slices in first-appearance order.
    #[must_use]
    pub fn slices(&self) -> Vec<MoodSlice> {
        self.counts
            .iter()
            .map(|&(mood, count)| MoodSlice {
                mood,
                count,
                share: self.share(mood),
                color: mood.data().color,
            })
            .collect()
    }

    /// True if there is nothing to chart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> MoodHistory {
        let mut history = MoodHistory::new();
        history.record(Mood::Sad, 1);
        history.record(Mood::Happy, 2);
        history.record(Mood::Sad, 3);
        history.record(Mood::Curious, 4);
        history
    }

    #[test]
    fn records_in_order() {
        let history = sample_history();
        assert_eq!(history.len(), 4);
        assert_eq!(history.entries()[0].mood, Mood::Sad);
        assert_eq!(history.latest().map(|e| e.timestamp_ms), Some(4));
    }

    #[test]
    fn stats_follow_first_appearance() {
        let stats = sample_history().stats();
        let order: Vec<Mood> = stats.slices().iter().map(|s| s.mood).collect();
        assert_eq!(order, vec![Mood::Sad, Mood::Happy, Mood::Curious]);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.count(Mood::Sad), 2);
        assert_eq!(stats.count(Mood::Angry), 0);
        assert!((stats.share(Mood::Sad) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn slices_carry_catalog_colors_and_percentages() {
        let slices = sample_history().stats().slices();
        assert_eq!(slices[0].color, "#BFDBFE");
        assert_eq!(slices[0].percent(), 50);
        assert_eq!(slices[1].percent(), 25);
        let total: f64 = slices.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn most_common_breaks_ties_by_first_appearance() {
        let mut history = MoodHistory::new();
        history.record(Mood::Tired, 1);
        history.record(Mood::Silly, 2);
        history.record(Mood::Silly, 3);
        history.record(Mood::Tired, 4);
        assert_eq!(history.stats().most_common(), Some(Mood::Tired));
    }

    #[test]
    fn empty_history_has_empty_stats() {
        let stats = MoodHistory::new().stats();
        assert!(stats.is_empty());
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.share(Mood::Happy), 0.0);
        assert_eq!(stats.most_common(), None);
    }

    #[test]
    fn clear_empties_history() {
        let mut history = sample_history();
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn json_matches_storage_shape() {
        let mut history = MoodHistory::new();
        history.record(Mood::Happy, 1_710_000_000_000);
        assert_eq!(
            history.to_json().unwrap(),
            r#"[{"mood":"happy","timestamp":"2024-03-09T16:00:00.000Z"}]"#
        );
    }

    #[test]
    fn json_loads_browser_timestamps() {
        let json = r#"[{"mood":"happy","timestamp":"2024-03-09T16:00:00.000Z"},
                       {"mood":"sad","timestamp":"2024-03-09T16:00:01.250Z"}]"#;
        let history = MoodHistory::from_json(json).unwrap();
        assert_eq!(history.entries()[0].timestamp_ms, 1_710_000_000_000);
        assert_eq!(history.entries()[1].timestamp_ms, 1_710_000_001_250);
    }

    #[test]
    fn json_rejects_bad_timestamps() {
        for json in [
            r#"[{"mood":"happy","timestamp":"yesterday"}]"#,
            r#"[{"mood":"happy","timestamp":"2024-02-30T00:00:00.000Z"}]"#,
            r#"[{"mood":"happy","timestamp":-5}]"#,
        ] {
            assert!(matches!(MoodHistory::from_json(json), Err(MoodError::Json(_))));
        }
    }

    #[test]
    fn json_loads_stored_history() {
        let json = r#"[{"mood":"angry","timestamp":5},{"mood":"peaceful","timestamp":9}]"#;
        let history = MoodHistory::from_json(json).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[1].mood, Mood::Peaceful);
        assert_eq!(MoodHistory::from_json(&history.to_json().unwrap()).unwrap(), history);
    }

    #[test]
    fn json_rejects_unknown_moods() {
        let json = r#"[{"mood":"grumpy","timestamp":5}]"#;
        assert!(matches!(MoodHistory::from_json(json), Err(MoodError::Json(_))));
    }
}
