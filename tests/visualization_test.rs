mod common;

use common::{frame_with, make_hand};
use leap_markers::frame::Handedness;
use leap_markers::marker::{Marker, Point, Time};
use leap_markers::sink::MarkerSink;
use leap_markers::visualization::{arrow_group, arrow_groups, RerunSink};
use leap_markers::FrameToMarkersConverter;

fn one_hand_batch() -> leap_markers::marker::MarkerBatch {
    FrameToMarkersConverter::default()
        .convert(&frame_with(vec![make_hand(Handedness::Right)]), Time::from_nanos(1_000_000_000))
}

#[test]
fn test_one_group_per_namespace() {
    let groups = arrow_groups("/leap_markers", &one_hand_batch());
    let paths: Vec<&str> = groups.iter().map(|g| g.entity_path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "leap_markers/finger_arrow_0",
            "leap_markers/finger_arrow_1",
            "leap_markers/finger_arrow_2",
            "leap_markers/finger_arrow_3",
            "leap_markers/x_axis",
            "leap_markers/y_axis",
            "leap_markers/z_axis",
        ]
    );
    for g in &groups[..4] {
        assert_eq!(g.len(), 4);
    }
    for g in &groups[4..] {
        assert_eq!(g.len(), 1);
    }
}

#[test]
fn test_arrow_geometry_from_markers() {
    let groups = arrow_groups("/leap_markers", &one_hand_batch());

    let thumb = &groups[0];
    let [ox, oy, oz] = thumb.origins[0];
    let [vx, vy, vz] = thumb.vectors[0];
    assert!((ox - 0.01).abs() < 1e-6 && (oy - 0.02).abs() < 1e-6 && (oz - 0.03).abs() < 1e-6);
    assert!((vx - 0.03).abs() < 1e-6 && (vy - 0.03).abs() < 1e-6 && (vz - 0.03).abs() < 1e-6);
    assert!((thumb.radii[0] - 0.0025).abs() < 1e-7);
    assert_eq!(thumb.labels, vec!["0", "1", "2", "3"]);

    let x_axis = &groups[4];
    assert!((x_axis.vectors[0][0] - 0.01).abs() < 1e-6);
    assert!((x_axis.radii[0] - 0.05).abs() < 1e-7);
    assert_eq!(x_axis.colors[0], (255, 0, 0, 255));
}

#[test]
fn test_markers_without_two_points_are_dropped() {
    let good = Marker {
        ns: "x_axis".to_string(),
        points: vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)],
        ..Default::default()
    };
    let short = Marker {
        ns: "x_axis".to_string(),
        id: 1,
        points: vec![Point::new(0.0, 0.0, 0.0)],
        ..Default::default()
    };
    let group = arrow_group("x_axis".to_string(), &[&good, &short]);
    assert_eq!(group.len(), 1);
    assert_eq!(group.labels, vec!["0"]);
}

#[test]
fn test_rerun_sink_logs_batch() {
    let (recording, _storage) = rerun::RecordingStreamBuilder::new("test").memory().unwrap();
    let mut sink = RerunSink::new(recording);
    sink.publish("/leap_markers", &one_hand_batch()).unwrap();
    // empty batches log nothing
    sink.publish("/leap_markers", &Default::default()).unwrap();
}
