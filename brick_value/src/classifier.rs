//! Part identifier rules
//!
//! Identifiers are catalog tokens such as `3001`, `3069bpb012`, `alp001` or
//! `6775stk01`. Markers inside the token decide how a part is treated.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Minifigure ids: 2-6 letters then 2-6 digits, nothing else
    static ref FIGURE_RE: Regex = Regex::new(r"^[a-zA-Z]{2,6}\d{2,6}$").expect("valid figure pattern");
}

/// Sticker sheets; dropped from inventories entirely
pub const STICKER_MARKER: &str = "stk";

/// Printed or decorated variants; left out of weight totals
pub const PRINTED_MARKER: &str = "pb";

/// Which detail page carries an identifier's weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartClass {
    Figure,
    Part,
}

pub fn classify(part_id: &str) -> PartClass {
    if is_figure(part_id) {
        PartClass::Figure
    } else {
        PartClass::Part
    }
}

pub fn is_figure(part_id: &str) -> bool {
    FIGURE_RE.is_match(part_id)
}

pub fn is_sticker(part_id: &str) -> bool {
    part_id.contains(STICKER_MARKER)
}

pub fn is_printed(part_id: &str) -> bool {
    part_id.contains(PRINTED_MARKER)
}

/// Whether a part's weight is added to its set's total
pub fn counts_toward_weight(part_id: &str) -> bool {
    !is_printed(part_id) && !is_sticker(part_id)
}
