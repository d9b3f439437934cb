//! Format strategy
//!
//! A format turns parallel (tag, text value) sequences into one string
//! and back. Both directions require as many tags as values.

use herald_core::{HeraldError, HeraldResult};

/// Separator between the tag segment and the value segment
pub const SEPARATOR: char = ',';

/// Default delimiter between entries of a segment
pub const DEFAULT_DELIMITER: char = '~';

/// Pluggable text encoding for parameter lists
pub trait Format: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Encode parallel tags and values into one string
    fn encode(&self, tags: &[String], values: &[String]) -> HeraldResult<String>;

    /// Decode a string into parallel tags and values
    fn decode(&self, text: &str) -> HeraldResult<(Vec<String>, Vec<String>)>;
}

/// Fail with [`HeraldError::ArityMismatch`] unless both sides have the same length
#[inline]
pub fn check_arity(tags: usize, values: usize) -> HeraldResult<()> {
    if tags != values {
        return Err(HeraldError::ArityMismatch { tags, values });
    }
    Ok(())
}

/// Split `text` into exactly a tag segment and a value segment
pub(crate) fn split_segments(text: &str, separator: char) -> HeraldResult<(&str, &str)> {
    let mut parts = text.split(separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(tags), Some(values), None) => Ok((tags, values)),
        _ => Err(HeraldError::format(format!(
            "expected exactly two segments separated by {:?} in {:?}",
            separator, text
        ))),
    }
}
