/// Swing phase segmentation
///
/// Splits a swing into stance, load, stride, swing, contact and
/// follow-through. Segmentation sits behind [`PhaseBoundaryDetector`] so a
/// different algorithm can replace the velocity-peak heuristic without
/// touching the analysis pipeline.

use tracing::debug;

use crate::config::BattingSide;
use crate::models::{PoseSequence, SwingPhases};
use crate::services::kinematics::{self, DifferentialKinematics};

/// Fewer wrist-speed samples than this and the phases stay unknown
pub const MIN_VELOCITY_SAMPLES: usize = 11;

const STANCE_CAP: usize = 15;
const LOAD_CAP: usize = 20;
const STRIDE_CAP: usize = 30;
const CONTACT_FRAMES: usize = 3;
const FOLLOW_THROUGH_RESERVE: usize = 5;

/// Strategy for locating phase boundaries in a swing
pub trait PhaseBoundaryDetector: Send + Sync {
    /// Partition the sequence; an empty map means "phases unknown"
    fn segment(&self, sequence: &PoseSequence, kinematics: &DifferentialKinematics) -> SwingPhases;
}

/// Velocity-peak heuristic: the first wrist-speed peak above the mean speed
/// marks contact, the earlier phases get fixed capped fractions of the swing.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityPeakSegmenter {
    batting_side: BattingSide,
}

impl VelocityPeakSegmenter {
    pub fn new(batting_side: BattingSide) -> Self {
        Self { batting_side }
    }

    /// Phase map for a known contact frame
    pub fn phases_for_contact(total_frames: usize, contact_frame: usize) -> SwingPhases {
        let stance_end = (total_frames / 4).min(STANCE_CAP);
        let load_end = (total_frames / 3).min(LOAD_CAP);
        let stride_end = (total_frames / 2).min(STRIDE_CAP);
        let contact_end = (contact_frame + CONTACT_FRAMES)
            .min(total_frames.saturating_sub(FOLLOW_THROUGH_RESERVE));

        SwingPhases::from_boundaries(
            [stance_end, load_end, stride_end, contact_frame, contact_end],
            total_frames,
        )
    }
}

impl PhaseBoundaryDetector for VelocityPeakSegmenter {
    fn segment(&self, sequence: &PoseSequence, kinematics: &DifferentialKinematics) -> SwingPhases {
        let total_frames = sequence.len();
        if total_frames == 0 {
            debug!("Empty sequence, phases unknown");
            return SwingPhases::unknown();
        }

        let Some((wrist, positions)) = kinematics::wrist_trajectory(sequence, self.batting_side)
        else {
            debug!("No wrist trajectory, phases unknown");
            return SwingPhases::unknown();
        };

        let speeds = DifferentialKinematics::magnitudes(&kinematics.velocity(&positions));
        if speeds.len() < MIN_VELOCITY_SAMPLES {
            debug!(
                "Only {} {} speed samples, phases unknown",
                speeds.len(),
                wrist
            );
            return SwingPhases::unknown();
        }

        let threshold = kinematics::mean(&speeds).unwrap_or(0.0);
        let peaks = find_peaks(&speeds, threshold);
        let contact_frame = match peaks.first() {
            Some(peak) => *peak,
            None => total_frames * 2 / 3,
        };

        debug!(
            "Contact at frame {} ({} peaks above {:.3} m/s)",
            contact_frame,
            peaks.len(),
            threshold
        );

        Self::phases_for_contact(total_frames, contact_frame)
    }
}

/// Local maxima whose height is at least `min_height`.
///
/// A peak needs strictly smaller direct neighbours; flat tops report their
/// middle sample (rounded down), and the first and last samples never count.
pub fn find_peaks(values: &[f64], min_height: f64) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }

            if values[ahead] < values[i] {
                let peak = (i + ahead - 1) / 2;
                if values[peak] >= min_height {
                    peaks.push(peak);
                }
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}
