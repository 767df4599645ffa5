//! Event descriptors and the fixed segment definitions.
//!
//! An [`Event`] is the unit of persisted progress: one flag per [`Segment`],
//! each only ever flipping from `false` to `true`.

mod segment;
mod types;

pub use segment::{Segment, SegmentDefinition};
pub use types::Event;
