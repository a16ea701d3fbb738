use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rerun::{RecordingStream, TimeCell};

use crate::marker::{Marker, MarkerBatch};
use crate::sink::MarkerSink;

/// Publishes batches into a rerun recording, one `Arrows3D` entity per namespace.
pub struct RerunSink {
    recording: RecordingStream,
}

impl RerunSink {
    pub fn new(recording: RecordingStream) -> RerunSink {
        RerunSink { recording }
    }

    pub fn recording(&self) -> &RecordingStream {
        &self.recording
    }
}

/// rerun entity paths have no leading slash
pub fn entity_path(topic: &str, ns: &str) -> String {
    let topic = topic.trim_matches('/');
    if topic.is_empty() {
        ns.to_string()
    } else {
        format!("{}/{}", topic, ns)
    }
}

/// Arrows of one namespace, ready to log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrowGroup {
    pub entity_path: String,
    pub origins: Vec<[f32; 3]>,
    pub vectors: Vec<[f32; 3]>,
    pub colors: Vec<(u8, u8, u8, u8)>,
    pub radii: Vec<f32>,
    pub labels: Vec<String>,
}

impl ArrowGroup {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn to_arrows(&self) -> rerun::Arrows3D {
        rerun::Arrows3D::from_vectors(self.vectors.clone())
            .with_origins(self.origins.clone())
            .with_colors(self.colors.clone())
            .with_radii(self.radii.clone())
            .with_labels(self.labels.clone())
    }
}

/// Tail becomes the origin, head minus tail the vector, half the shaft
/// diameter the radius. Markers without two points are dropped.
pub fn arrow_group(entity_path: String, markers: &[&Marker]) -> ArrowGroup {
    let mut group = ArrowGroup {
        entity_path,
        ..Default::default()
    };
    for m in markers {
        let (Some(tail), Some(head)) = (m.tail(), m.head()) else {
            log::warn!("marker {}/{} has fewer than two points", m.ns, m.id);
            continue;
        };
        let tail = tail.to_dvec3().as_vec3();
        let head = head.to_dvec3().as_vec3();
        group.origins.push(tail.to_array());
        group.vectors.push((head - tail).to_array());
        group.colors.push(m.color.to_u8());
        group.radii.push((m.scale.x / 2.0) as f32);
        group.labels.push(m.id.to_string());
    }
    group
}

/// One group per namespace, ordered by namespace.
pub fn arrow_groups(topic: &str, batch: &MarkerBatch) -> Vec<ArrowGroup> {
    let mut by_ns: BTreeMap<&str, Vec<&Marker>> = BTreeMap::new();
    for m in batch.iter() {
        by_ns.entry(m.ns.as_str()).or_default().push(m);
    }
    by_ns
        .into_iter()
        .map(|(ns, markers)| arrow_group(entity_path(topic, ns), &markers))
        .filter(|g| !g.is_empty())
        .collect()
}

impl MarkerSink for RerunSink {
    fn publish(&mut self, topic: &str, batch: &MarkerBatch) -> Result<()> {
        let Some(first) = batch.markers.first() else {
            return Ok(());
        };
        self.recording.set_time(
            "stable",
            TimeCell::from_timestamp_nanos_since_epoch(first.header.stamp.as_nanos()),
        );
        for group in arrow_groups(topic, batch) {
            self.recording
                .log(group.entity_path.as_str(), &group.to_arrows())
                .with_context(|| format!("logging {}", group.entity_path))?;
        }
        Ok(())
    }
}
