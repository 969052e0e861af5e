//! Response tracks consumed by the recovery metrics.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Contract the metrics need from a track.
///
/// Ground-truth tracks only need `length`. Predicted tracks also carry a
/// confidence `score` used for winner selection.
pub trait Track {
    /// Number of frames spanned by the track.
    fn length(&self) -> usize;

    /// Confidence score of a predicted track.
    fn score(&self) -> f64;
}

/// A single bounding box on a given frame, format [x1, y1, x2, y2].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBox {
    pub frame_number: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl FrameBox {
    pub fn new(frame_number: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { frame_number, x1, y1, x2, y2 }
    }

    pub fn area(&self) -> f64 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

/// A spatio-temporal track: one box per frame over a contiguous frame range.
///
/// Boxes are kept in increasing frame order, without gaps, so the temporal
/// extent of the track is `[first_frame, last_frame]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResponseTrack")]
pub struct ResponseTrack {
    boxes: Vec<FrameBox>,
    score: Option<f64>,
}

#[derive(Deserialize)]
struct RawResponseTrack {
    boxes: Vec<FrameBox>,
    #[serde(default)]
    score: Option<f64>,
}

impl TryFrom<RawResponseTrack> for ResponseTrack {
    type Error = Error;

    fn try_from(raw: RawResponseTrack) -> Result<Self> {
        let track = Self::new(raw.boxes)?;
        Ok(match raw.score {
            Some(score) => track.with_score(score),
            None => track,
        })
    }
}

impl ResponseTrack {
    /// Create a new track from per-frame boxes.
    ///
    /// # Arguments
    /// * `boxes` - Boxes ordered by frame number, one per frame, no gaps
    ///
    /// # Returns
    /// A new ResponseTrack, or `Error::InvalidTrack` if the frames are not
    /// contiguous or a coordinate is not finite.
    pub fn new(boxes: Vec<FrameBox>) -> Result<Self> {
        for pair in boxes.windows(2) {
            if pair[1].frame_number != pair[0].frame_number + 1 {
                return Err(Error::InvalidTrack(format!(
                    "frame {} follows frame {}, expected contiguous frames",
                    pair[1].frame_number, pair[0].frame_number
                )));
            }
        }

        if let Some(b) = boxes.iter().find(|b| !b.is_finite()) {
            return Err(Error::InvalidTrack(format!(
                "non-finite box coordinates on frame {}",
                b.frame_number
            )));
        }

        Ok(Self { boxes, score: None })
    }

    /// Attach a confidence score (predicted tracks).
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn boxes(&self) -> &[FrameBox] {
        &self.boxes
    }

    pub fn first_frame(&self) -> Option<usize> {
        self.boxes.first().map(|b| b.frame_number)
    }

    pub fn last_frame(&self) -> Option<usize> {
        self.boxes.last().map(|b| b.frame_number)
    }

    /// Get the box on `frame`, if the track covers it.
    pub fn box_at(&self, frame: usize) -> Option<&FrameBox> {
        let first = self.first_frame()?;
        frame.checked_sub(first).and_then(|offset| self.boxes.get(offset))
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl Track for ResponseTrack {
    fn length(&self) -> usize {
        match (self.first_frame(), self.last_frame()) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }

    fn score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes(frames: std::ops::Range<usize>) -> Vec<FrameBox> {
        frames.map(|f| FrameBox::new(f, 0.0, 0.0, 10.0, 10.0)).collect()
    }

    #[test]
    fn test_length_is_temporal_extent() {
        let track = ResponseTrack::new(boxes(5..15)).unwrap();
        assert_eq!(track.length(), 10);
        assert_eq!(track.first_frame(), Some(5));
        assert_eq!(track.last_frame(), Some(14));
    }

    #[test]
    fn test_empty_track() {
        let track = ResponseTrack::new(vec![]).unwrap();
        assert_eq!(track.length(), 0);
        assert!(track.is_empty());
        assert!(track.box_at(0).is_none());
    }

    #[test]
    fn test_non_contiguous_frames_rejected() {
        let mut b = boxes(0..3);
        b.push(FrameBox::new(7, 0.0, 0.0, 1.0, 1.0));
        assert!(matches!(ResponseTrack::new(b), Err(Error::InvalidTrack(_))));
    }

    #[test]
    fn test_non_finite_box_rejected() {
        let b = vec![FrameBox::new(0, 0.0, f64::NAN, 1.0, 1.0)];
        assert!(ResponseTrack::new(b).is_err());
    }

    #[test]
    fn test_score_defaults_to_zero() {
        let track = ResponseTrack::new(boxes(0..2)).unwrap();
        assert_eq!(track.score(), 0.0);
        assert_eq!(track.with_score(0.7).score(), 0.7);
    }

    #[test]
    fn test_box_at() {
        let track = ResponseTrack::new(boxes(3..6)).unwrap();
        assert_eq!(track.box_at(4).map(|b| b.frame_number), Some(4));
        assert!(track.box_at(2).is_none());
        assert!(track.box_at(6).is_none());
    }

    #[test]
    fn test_deserialize_without_score() {
        let json = r#"{"boxes": [
            {"frame_number": 2, "x1": 0.0, "y1": 0.0, "x2": 4.0, "y2": 4.0}
        ]}"#;
        let track: ResponseTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.length(), 1);
        assert_eq!(track.boxes()[0].area(), 16.0);
    }

    #[test]
    fn test_deserialize_validates_frames() {
        let json = r#"{"boxes": [
            {"frame_number": 0, "x1": 0.0, "y1": 0.0, "x2": 1.0, "y2": 1.0},
            {"frame_number": 2, "x1": 0.0, "y1": 0.0, "x2": 1.0, "y2": 1.0}
        ], "score": 0.5}"#;
        assert!(serde_json::from_str::<ResponseTrack>(json).is_err());
    }
}
