use crate::reading::Unit;

/// What the renderer draws for one emitted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub pivot_index: usize,
}

impl Frame {
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            text: unit.text().to_string(),
            pivot_index: unit.pivot_index(),
        }
    }
}
