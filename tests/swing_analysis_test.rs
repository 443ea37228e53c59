mod common;

use std::io::Write;
use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use common::{posture_sequence, stepped_rotation_sequence, Posture};
use swing_coach::config::{AnalysisConfig, BattingSide, ReferenceRanges};
use swing_coach::error::AnalysisError;
use swing_coach::models::{
    EnergyTransfer, Issue, JointName, Landmark, PoseFrame, PoseSequence, SwingPhase,
};
use swing_coach::services::{SwingAnalysisService, SyntheticSwing};

#[test]
fn test_hips_lead_shoulders_by_three_frames() {
    let report = SwingAnalysisService::default().analyze(&stepped_rotation_sequence(60, 20, 23));
    let kinematic = &report.kinematic_sequence;

    assert_eq!(kinematic.hip_initiation_time, Some(20));
    assert_eq!(kinematic.shoulder_initiation_time, Some(23));
    assert_eq!(kinematic.lead_time, Some(3));
    assert_eq!(kinematic.energy_transfer, EnergyTransfer::Optimal);
    assert!((kinematic.sequence_efficiency - 30.0).abs() < 1e-9);

    // good posture, 2s swing: 0.4*95 + 0.4*100 + 0.2*60
    assert!(report.issues_detected.is_empty());
    assert!((report.performance_scores.overall_score - 90.0).abs() < 1e-9);
}

#[test]
fn test_shoulders_first_reports_reverse_sequence() {
    let report = SwingAnalysisService::default().analyze(&stepped_rotation_sequence(60, 26, 21));

    assert_eq!(
        report.kinematic_sequence.energy_transfer,
        EnergyTransfer::Reverse
    );
    assert_eq!(report.issues_detected, vec![Issue::ReverseKinematicSequence]);
    assert_eq!(report.recommendations[0].category, "Power Generation");
    assert_eq!(report.performance_scores.kinematic_sequence_score, 30.0);
    // kinematic issues do not count against spatial mechanics
    assert_eq!(report.performance_scores.spatial_mechanics_score, 100.0);
}

#[test]
fn test_simultaneous_initiation_is_poor_timing() {
    let report = SwingAnalysisService::default().analyze(&stepped_rotation_sequence(60, 22, 22));
    let kinematic = &report.kinematic_sequence;

    assert_eq!(kinematic.lead_time, Some(0));
    assert_eq!(kinematic.energy_transfer, EnergyTransfer::Poor);
    assert_eq!(
        report.issues_detected,
        vec![Issue::PoorKinematicSequenceTiming]
    );
    assert_eq!(
        report.feedback[0].issue,
        "Poor kinematic sequence timing"
    );
    assert_eq!(report.recommendations[0].category, "General Improvement");
    assert_eq!(report.performance_scores.kinematic_sequence_score, 60.0);
    assert_eq!(report.performance_scores.spatial_mechanics_score, 100.0);
}

#[test]
fn test_insufficient_separation_gets_kinematic_sequence_bundle() {
    let posture = Posture {
        separation: 0.05,
        ..Posture::default()
    };
    let report = SwingAnalysisService::default().analyze(&posture_sequence(30, posture));

    assert_eq!(
        report.issues_detected,
        vec![Issue::InsufficientHipShoulderSeparation]
    );
    assert_eq!(
        report.issues_detected[0].description(),
        "Insufficient 3D hip-shoulder separation"
    );
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].category, "Kinematic Sequence");
    assert_eq!(
        report.feedback[0].issue,
        "Insufficient 3D hip-shoulder separation"
    );
}

#[test]
fn test_stance_width_scenarios() {
    let service = SwingAnalysisService::default();
    let issues_for = |stance_width: f64| {
        let posture = Posture {
            stance_width,
            ..Posture::default()
        };
        service.analyze(&posture_sequence(20, posture)).issues_detected
    };

    assert_eq!(issues_for(0.9), vec![Issue::WideStance]);
    assert_eq!(issues_for(0.9)[0].description(), "Overly wide stance");
    assert_eq!(issues_for(0.2), vec![Issue::NarrowStance]);
    assert_eq!(issues_for(0.2)[0].description(), "Narrow stance detected");
    assert!(issues_for(0.5).is_empty());
}

#[test]
fn test_empty_sequence_degrades_without_error() {
    let report = SwingAnalysisService::default()
        .analyze_json(r#"{"pose_sequence": []}"#)
        .unwrap();

    assert_eq!(report.total_frames, 0);
    assert!(report.swing_phases.is_empty());
    assert!(report.spatial_analysis.hip_shoulder_separation.is_empty());
    assert_eq!(report.temporal_analysis.total_swing_time, 0.0);
    assert!(report.issues_detected.is_empty());
    assert_eq!(report.performance_scores.overall_score, 0.0);
    assert_eq!(report.performance_scores.kinematic_sequence_score, 0.0);
}

#[test]
fn test_legacy_poses_key_and_landmarks_alias() {
    let json = r#"{
        "poses": [
            {"frame_index": 0, "timestamp": 0.0, "landmarks": [
                {"joint_name": "left_ankle", "x": 0.2, "y": 0.0, "z": 0.1},
                {"joint_name": "right_ankle", "x": -0.2, "y": 0.0, "z": 0.1}
            ]},
            {"frame_index": 1, "timestamp": 0.0333, "landmarks": [
                {"joint_name": "left_ankle", "x": 0.2, "y": 0.0, "z": 0.1, "visibility": 0.8},
                {"joint_name": "right_ankle", "x": -0.2, "y": 0.0, "z": 0.1, "visibility": 0.8}
            ]}
        ]
    }"#;

    let report = SwingAnalysisService::default().analyze_json(json).unwrap();
    assert_eq!(report.total_frames, 2);
    assert_eq!(report.spatial_analysis.stance_width.len(), 2);
    assert!(report.spatial_analysis.spine_tilt.is_empty());
    assert!(report.issues_detected.is_empty());
}

#[test]
fn test_caller_contract_violations() {
    let service = SwingAnalysisService::default();

    let unknown_joint = r#"{"pose_sequence": [{"frame": 0, "timestamp": 0.0,
        "landmarks_3d": [{"joint_name": "tail", "x": 0, "y": 0, "z": 0}]}]}"#;
    assert_matches!(
        service.analyze_json(unknown_joint),
        Err(AnalysisError::MalformedInput(_))
    );

    let missing_coordinate = r#"{"pose_sequence": [{"frame": 0, "timestamp": 0.0,
        "landmarks_3d": [{"joint_name": "nose", "x": 0, "y": 0}]}]}"#;
    assert_matches!(
        service.analyze_json(missing_coordinate),
        Err(AnalysisError::MalformedInput(_))
    );

    let duplicate_joint = r#"{"pose_sequence": [{"frame": 0, "timestamp": 0.0,
        "landmarks_3d": [
            {"joint_name": "nose", "x": 0, "y": 0, "z": 1},
            {"joint_name": "nose", "x": 0, "y": 0, "z": 1}]}]}"#;
    assert_matches!(
        service.analyze_json(duplicate_joint),
        Err(AnalysisError::InvalidSequence(_))
    );

    let out_of_order = r#"{"pose_sequence": [
        {"frame": 3, "timestamp": 0.1, "landmarks_3d": []},
        {"frame": 2, "timestamp": 0.2, "landmarks_3d": []}]}"#;
    assert_matches!(
        service.analyze_json(out_of_order),
        Err(AnalysisError::InvalidSequence(_))
    );
}

#[test]
fn test_recorded_frame_rate_drives_durations() {
    let sequence = SyntheticSwing::new()
        .with_frames(120)
        .with_frame_rate(120.0)
        .generate();
    let report = SwingAnalysisService::default().analyze(&sequence);

    assert_eq!(report.frame_rate, 120.0);
    assert!((report.temporal_analysis.total_swing_time - 1.0).abs() < 1e-9);
    assert_eq!(report.performance_scores.temporal_efficiency_score, 90.0);
}

#[test]
fn test_every_other_frame_kept_halves_the_frame_rate() {
    // 30 fps camera, every second frame exported
    let frames = (0..60)
        .map(|i| {
            let frame = 2 * i as u64;
            PoseFrame::new(
                frame,
                frame as f64 / 30.0,
                vec![Landmark::new(JointName::RightWrist, 0.01 * i as f64, 0.0, 1.0, 0.9)],
            )
        })
        .collect();
    let sequence = PoseSequence::new(frames).with_frame_rate(30.0);
    let report = SwingAnalysisService::default().analyze(&sequence);

    assert_eq!(report.frame_rate, 15.0);
    assert!((report.temporal_analysis.total_swing_time - 4.0).abs() < 1e-9);
    assert!((report.temporal_analysis.peak_wrist_speed - 0.15).abs() < 1e-9);
}

#[test]
fn test_zero_recorded_frame_rate_uses_timestamps() {
    let sequence = posture_sequence(60, Posture::default()).with_frame_rate(0.0);
    let report = SwingAnalysisService::default().analyze(&sequence);

    assert_eq!(report.frame_rate, 30.0);
    assert!((report.temporal_analysis.total_swing_time - 2.0).abs() < 1e-9);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["temporal_analysis"]["total_swing_time"], 2.0);
}

#[test]
fn test_synthetic_swing_phases_tile_sequence() {
    let report = SwingAnalysisService::default().analyze(&SyntheticSwing::new().generate());

    let mut next_start = 0;
    for phase in SwingPhase::all() {
        let range = report.swing_phases.get(phase).unwrap();
        assert_eq!(range.start, next_start, "{} starts late", phase);
        next_start = range.end;
    }
    assert_eq!(next_start, report.total_frames);
}

#[test]
fn test_left_handed_batter_falls_back_to_available_wrist() {
    let right = SwingAnalysisService::default().analyze(&SyntheticSwing::new().generate());
    let left = SwingAnalysisService::default()
        .with_batting_side(BattingSide::Left)
        .analyze(&SyntheticSwing::new().generate());

    // both wrists sweep identically in the synthetic swing
    assert!(
        (right.temporal_analysis.peak_wrist_speed - left.temporal_analysis.peak_wrist_speed).abs()
            < 1e-9
    );
    assert!(!left.swing_phases.is_empty());
}

#[test]
fn test_single_wrist_sequence_uses_lead_wrist() {
    let mut sequence = SyntheticSwing::new().generate();
    for frame in &mut sequence.frames {
        frame
            .landmarks
            .retain(|lm| lm.joint_name != JointName::RightWrist);
    }

    let report = SwingAnalysisService::default().analyze(&sequence);
    assert!(report.temporal_analysis.peak_wrist_speed > 0.0);
    assert!(!report.swing_phases.is_empty());
}

#[test]
fn test_reference_range_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "hip_shoulder_separation_3d = [0.30, 0.60]").unwrap();

    let config = AnalysisConfig {
        reference_ranges_path: Some(file.path().to_path_buf()),
        ..AnalysisConfig::default()
    };
    let service = SwingAnalysisService::from_config(&config);
    let report = service.analyze(&posture_sequence(20, Posture::default()));

    assert_eq!(
        report.issues_detected,
        vec![Issue::InsufficientHipShoulderSeparation]
    );
    // untouched keys keep their defaults
    assert_eq!(service.reference_ranges().spine_tilt().min, 10.0);
}

#[test]
fn test_unreadable_reference_ranges_fall_back_to_defaults() {
    let config = AnalysisConfig {
        reference_ranges_path: Some("/nonexistent/ranges.toml".into()),
        ..AnalysisConfig::default()
    };
    let service = SwingAnalysisService::from_config(&config);

    assert_eq!(service.reference_ranges(), &ReferenceRanges::default());
    assert!(service
        .analyze(&posture_sequence(10, Posture::default()))
        .issues_detected
        .is_empty());
}

#[test]
fn test_independent_services_share_nothing() {
    let strict = {
        let mut ranges = ReferenceRanges::default();
        ranges.merge(
            [(
                "stance_width_m".to_string(),
                swing_coach::config::MetricRange::new(0.6, 0.8),
            )]
            .into_iter()
            .collect(),
        );
        SwingAnalysisService::new(Arc::new(ranges))
    };
    let lenient = SwingAnalysisService::default();
    let sequence = posture_sequence(10, Posture::default());

    assert_eq!(strict.analyze(&sequence).issues_detected, vec![Issue::NarrowStance]);
    assert!(lenient.analyze(&sequence).issues_detected.is_empty());
}

#[test]
fn test_report_is_reproducible() {
    let service = SwingAnalysisService::default();
    let sequence: PoseSequence = SyntheticSwing::new().generate();

    let first = serde_json::to_vec(&service.analyze(&sequence)).unwrap();
    let second = serde_json::to_vec(&service.analyze(&sequence)).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_batch_analysis_matches_single_analysis() {
    let service = SwingAnalysisService::default();
    let sequences = vec![
        stepped_rotation_sequence(60, 20, 23),
        posture_sequence(30, Posture::default()),
    ];

    let batch = service.analyze_batch(sequences.clone()).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], service.analyze(&sequences[0]));
    assert_eq!(batch[1], service.analyze(&sequences[1]));
}
