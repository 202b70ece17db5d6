//! Small numeric helpers shared by the extractor and the display layer.

pub mod rounding;
