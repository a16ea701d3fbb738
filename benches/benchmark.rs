use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leap_markers::frame::{Frame, Handedness};
use leap_markers::marker::Time;
use leap_markers::source::synthetic_hand;
use leap_markers::FrameToMarkersConverter;

fn bench_convert(c: &mut Criterion) {
    let frame = Frame {
        hands: vec![
            synthetic_hand(1, Handedness::Right, 0.4),
            synthetic_hand(2, Handedness::Left, 0.4),
        ],
        ..Default::default()
    };
    let converter = FrameToMarkersConverter::default();

    c.bench_function("convert_two_hands", |b| {
        b.iter(|| converter.convert(black_box(&frame), Time::from_nanos(0)))
    });
}

fn bench_json_round(c: &mut Criterion) {
    let frame = Frame {
        hands: vec![synthetic_hand(1, Handedness::Right, 0.4)],
        ..Default::default()
    };
    let batch = FrameToMarkersConverter::default().convert(&frame, Time::from_nanos(0));

    c.bench_function("serialize_batch", |b| {
        b.iter(|| serde_json::to_string(black_box(&batch)))
    });
}

criterion_group!(benches, bench_convert, bench_json_round);
criterion_main!(benches);
