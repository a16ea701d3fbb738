use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::marker::MarkerBatch;

/// Where finished batches go. One call per batch.
pub trait MarkerSink {
    fn publish(&mut self, topic: &str, batch: &MarkerBatch) -> Result<()>;
}

impl<S: MarkerSink + ?Sized> MarkerSink for Box<S> {
    fn publish(&mut self, topic: &str, batch: &MarkerBatch) -> Result<()> {
        (**self).publish(topic, batch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkKind {
    /// spawn a rerun viewer
    Rerun,
    /// save a rerun .rrd file
    Rrd,
    /// one JSON marker batch per line
    Jsonl,
}

impl SinkKind {
    pub fn default_output(self) -> PathBuf {
        match self {
            SinkKind::Rerun | SinkKind::Rrd => PathBuf::from("leap_markers.rrd"),
            SinkKind::Jsonl => PathBuf::from("leap_markers.jsonl"),
        }
    }
}

/// One line of a JSON-lines marker log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedBatch {
    pub topic: String,
    pub batch: MarkerBatch,
}

#[derive(Serialize)]
struct BorrowedBatch<'a> {
    topic: &'a str,
    batch: &'a MarkerBatch,
}

pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> JsonLinesSink<W> {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MarkerSink for JsonLinesSink<W> {
    fn publish(&mut self, topic: &str, batch: &MarkerBatch) -> Result<()> {
        let line = serde_json::to_string(&BorrowedBatch { topic, batch })?;
        writeln!(self.writer, "{}", line).context("writing marker batch")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps everything it is given.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub published: Vec<PublishedBatch>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }
}

impl MarkerSink for MemorySink {
    fn publish(&mut self, topic: &str, batch: &MarkerBatch) -> Result<()> {
        self.published.push(PublishedBatch {
            topic: topic.to_string(),
            batch: batch.clone(),
        });
        Ok(())
    }
}
