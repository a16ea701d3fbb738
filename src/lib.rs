pub mod config;
pub mod converter;
pub mod frame;
pub mod io;
pub mod listener;
pub mod marker;
pub mod rate_gate;
pub mod sink;
pub mod source;
pub mod visualization;

pub use config::MarkerConfig;
pub use converter::FrameToMarkersConverter;
pub use listener::{LeapListener, ListenerStats};
pub use rate_gate::RateGate;
