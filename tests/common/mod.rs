//! Reference spatio-temporal overlap used by the integration tests.
//!
//! Per-frame IoU on the frames both tracks cover; the whole-track IoU is the
//! sum of per-frame IoU divided by the length of the temporal union.

#![allow(dead_code)]

use track_recovery::{FrameBox, FrameMatches, OverlapFunctions, ResponseTrack};

pub fn box_iou(a: &FrameBox, b: &FrameBox) -> f64 {
    let inter_w = (a.x2.min(b.x2) - a.x1.max(b.x1)).max(0.0);
    let inter_h = (a.y2.min(b.y2) - a.y1.max(b.y1)).max(0.0);
    let inter_area = inter_w * inter_h;
    let union_area = a.area() + b.area() - inter_area;

    if union_area > 0.0 {
        inter_area / union_area
    } else {
        0.0
    }
}

fn matches_against(track: &ResponseTrack, reference: &ResponseTrack) -> FrameMatches {
    track
        .boxes()
        .iter()
        .filter_map(|b| {
            let other = reference.box_at(b.frame_number)?;
            let iou = box_iou(b, other);
            (iou > 0.0).then_some((b.frame_number, iou))
        })
        .collect()
}

pub fn st_iou(track: &ResponseTrack, candidates: &[ResponseTrack]) -> Vec<f64> {
    candidates
        .iter()
        .map(|reference| {
            let bounds = track.first_frame().zip(track.last_frame());
            let ref_bounds = reference.first_frame().zip(reference.last_frame());
            match (bounds, ref_bounds) {
                (Some((s1, e1)), Some((s2, e2))) => {
                    let union = (e1.max(e2) - s1.min(s2) + 1) as f64;
                    matches_against(track, reference).values().sum::<f64>() / union
                }
                _ => 0.0,
            }
        })
        .collect()
}

pub fn st_iou_matches(track: &ResponseTrack, candidates: &[ResponseTrack]) -> Vec<FrameMatches> {
    candidates
        .iter()
        .map(|reference| matches_against(track, reference))
        .collect()
}

pub fn overlap() -> OverlapFunctions<ResponseTrack> {
    OverlapFunctions::new(st_iou, st_iou_matches)
}

/// Track over `frames` with the same box `[x1, y1, x2, y2]` on every frame.
pub fn track(frames: std::ops::Range<usize>, bbox: [f64; 4], score: f64) -> ResponseTrack {
    let boxes = frames
        .map(|f| FrameBox::new(f, bbox[0], bbox[1], bbox[2], bbox[3]))
        .collect();
    ResponseTrack::new(boxes).expect("contiguous frames").with_score(score)
}

/// Ground-truth box used throughout the tests.
pub const GT_BOX: [f64; 4] = [0.0, 0.0, 10.0, 10.0];

/// Box whose IoU with `GT_BOX` is `iou` (narrower, same height).
pub fn box_with_iou(iou: f64) -> [f64; 4] {
    [0.0, 0.0, 10.0 * iou, 10.0]
}
