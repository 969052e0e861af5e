//! Ground-truth and prediction collections keyed by video id.

use std::collections::btree_map::{self, BTreeMap};

use crate::{Error, Result};

/// Ground-truth tracks, exactly one per video.
#[derive(Debug, Clone)]
pub struct GroundTruthSet<T> {
    tracks: BTreeMap<usize, T>,
}

impl<T> Default for GroundTruthSet<T> {
    fn default() -> Self {
        Self { tracks: BTreeMap::new() }
    }
}

impl<T> GroundTruthSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an ordered list; the list index is the video id.
    pub fn from_tracks(tracks: Vec<T>) -> Self {
        Self {
            tracks: tracks.into_iter().enumerate().collect(),
        }
    }

    /// Add the ground truth of `video_id`.
    ///
    /// Fails with `Error::DuplicateGroundTruth` if the video already has one.
    pub fn insert(&mut self, video_id: usize, track: T) -> Result<()> {
        match self.tracks.entry(video_id) {
            btree_map::Entry::Occupied(_) => Err(Error::DuplicateGroundTruth { video_id }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(track);
                Ok(())
            }
        }
    }

    pub fn get(&self, video_id: usize) -> Option<&T> {
        self.tracks.get(&video_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate in ascending video id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.tracks.iter().map(|(&id, track)| (id, track))
    }
}

/// Scored predicted tracks, zero or more per video, in submission order.
#[derive(Debug, Clone)]
pub struct PredictionSet<T> {
    entries: Vec<(usize, T)>,
}

impl<T> Default for PredictionSet<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> PredictionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-video lists; the outer index is the video id.
    pub fn from_nested(predictions: Vec<Vec<T>>) -> Self {
        let entries = predictions
            .into_iter()
            .enumerate()
            .flat_map(|(video_id, preds)| preds.into_iter().map(move |p| (video_id, p)))
            .collect();
        Self { entries }
    }

    pub fn push(&mut self, video_id: usize, track: T) {
        self.entries.push((video_id, track));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(id, track)| (*id, track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_truth_from_tracks_uses_index() {
        let gt = GroundTruthSet::from_tracks(vec!["a", "b", "c"]);
        assert_eq!(gt.len(), 3);
        assert_eq!(gt.get(1), Some(&"b"));
        assert_eq!(gt.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_ground_truth_rejected() {
        let mut gt = GroundTruthSet::new();
        gt.insert(4, "first").unwrap();
        let err = gt.insert(4, "second").unwrap_err();
        assert!(matches!(err, Error::DuplicateGroundTruth { video_id: 4 }));
        assert_eq!(gt.get(4), Some(&"first"));
    }

    #[test]
    fn test_predictions_from_nested() {
        let preds = PredictionSet::from_nested(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(preds.len(), 3);
        assert_eq!(
            preds.iter().map(|(id, &p)| (id, p)).collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (2, 3)]
        );
    }

    #[test]
    fn test_empty_nested_predictions() {
        let preds: PredictionSet<u8> = PredictionSet::from_nested(vec![vec![], vec![]]);
        assert!(preds.is_empty());
    }
}
