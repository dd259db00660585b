//! Labeled-value extraction from decoded-summary text
//!
//! A decoded summary is free text such as
//! `"BMS_Status: Battery Current: -12.5 A, RSOC: 87 %, Temp: 31"`.
//! Two values are pulled out of it by pattern matching:
//! - the signed decimal after the current label (`[-+]?[0-9]*\.?[0-9]+`)
//! - the unsigned integer after the RSOC label (`[0-9]+`)
//!
//! Digits are ASCII only, matching what `f64` parsing accepts.
//! Each label may be followed by whitespace. The labels are matched
//! literally and case-sensitively, anywhere in the text and in any order.

use crate::types::{ExtractedFields, Result};
use regex::Regex;

/// Pulls the current and RSOC values out of decoded-summary strings
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    current: Regex,
    rsoc: Regex,
}

impl FieldExtractor {
    /// Compile the patterns for the given labels
    ///
    /// Labels are escaped, so characters such as `(` or `.` in a label are
    /// matched literally.
    pub fn new(current_label: &str, rsoc_label: &str) -> Result<Self> {
        let current = Regex::new(&format!(
            r"{}\s*([-+]?[0-9]*\.?[0-9]+)",
            regex::escape(current_label)
        ))?;
        let rsoc = Regex::new(&format!(r"{}\s*([0-9]+)", regex::escape(rsoc_label)))?;
        Ok(Self { current, rsoc })
    }

    /// Extract both values from one decoded-summary string
    ///
    /// A label that is absent, or not followed by a number, yields `None`
    /// for that value only.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            current: Self::capture_number(&self.current, text),
            rsoc: Self::capture_number(&self.rsoc, text),
        }
    }

    fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }
}
