//! Display side: device traits, plain sinks, the [`Lcd`] front-end, marquee
//! scrolling and a simulated panel.

pub mod device;
pub mod grid;
pub mod lcd;
pub mod scroll;

pub use device::{CharDevice, CharSink, CountingSink, SliceSink};
pub use grid::TextGrid;
pub use lcd::Lcd;
pub use scroll::{SCROLL_INTERVAL_MS, ScrollSession};
