//! Inspection Report

use crate::ErrorKind;
use std::fmt;

/// Contents observed by one [`GuardedBuffer::inspect`](crate::GuardedBuffer::inspect) call
#[derive(Debug, Clone, PartialEq)]
pub struct BufferReport<T> {
    /// Entries, oldest first
    pub entries: Vec<T>,
    /// Whether the entries were consumed (reject policy) or only observed
    pub drained: bool,
    /// Buffer capacity at the time of the report
    pub capacity: usize,
    /// Condition recorded since the previous inspection, taken and cleared
    /// in the same critical section that collected `entries`
    pub last_error: ErrorKind,
    /// Unit suffix used when rendering values
    pub unit: &'static str,
}

impl<T> BufferReport<T> {
    /// Create a report without a unit suffix
    pub fn new(entries: Vec<T>, drained: bool, capacity: usize) -> Self {
        Self {
            entries,
            drained,
            capacity,
            last_error: ErrorKind::None,
            unit: "",
        }
    }

    /// Attach the recorded condition
    pub fn with_last_error(mut self, last_error: ErrorKind) -> Self {
        self.last_error = last_error;
        self
    }

    /// Set the unit suffix (e.g. `°C`)
    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Number of entries reported
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the buffer was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for BufferReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "Buffer is empty");
        }

        for (i, value) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Reading {}: {:.2}{}", i + 1, value, self.unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let report = BufferReport::<f32>::new(Vec::new(), false, 10);
        assert_eq!(report.to_string(), "Buffer is empty");
        assert_eq!(report.capacity, 10);
        assert_eq!(report.last_error, ErrorKind::None);
    }

    #[test]
    fn test_render_entries() {
        let report = BufferReport::new(vec![21.5f32, 22.25], false, 10).with_unit("°C");
        assert_eq!(report.to_string(), "Reading 1: 21.50°C\nReading 2: 22.25°C");
    }
}
