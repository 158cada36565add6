//! FIFO data parsing
//!
//! Splits a raw byte dump of the FIFO (as produced by
//! [`St1vafe6axDriver::fifo_read_raw`](crate::St1vafe6axDriver::fifo_read_raw))
//! into tagged records. Every record is [`RECORD_SIZE`] bytes, so a buffer
//! that is not a whole number of records is rejected rather than guessed at.
//!
//! # Example
//!
//! ```ignore
//! # use st1vafe6ax::fifo::parser::FifoParser;
//! # let buffer = [0u8; 70];
//! let records = FifoParser::new().parse::<()>(&buffer)?;
//! # Ok::<(), st1vafe6ax::Error<()>>(())
//! ```

use super::{FifoRecord, RECORD_SIZE};
use crate::Error;

/// Maximum number of records returned by one [`FifoParser::parse`] call
pub const MAX_RECORDS: usize = 64;

/// FIFO data parser
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoParser {
    skip_empty: bool,
}

impl FifoParser {
    /// Create a parser that keeps every record, including empty ones
    pub const fn new() -> Self {
        Self { skip_empty: false }
    }

    /// Drop records whose tag decodes as empty
    #[must_use]
    pub const fn skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty = skip;
        self
    }

    /// Number of whole records in `len` bytes, if `len` is a whole number of records
    pub const fn record_count(len: usize) -> Option<usize> {
        if len % RECORD_SIZE == 0 {
            Some(len / RECORD_SIZE)
        } else {
            None
        }
    }

    /// Parse raw FIFO data into records
    ///
    /// # Arguments
    /// * `data` - Raw FIFO bytes, a whole number of 7-byte records
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the data length is not a multiple of
    /// [`RECORD_SIZE`] or holds more than [`MAX_RECORDS`] records.
    pub fn parse<E>(&self, data: &[u8]) -> Result<heapless::Vec<FifoRecord, MAX_RECORDS>, Error<E>> {
        let count = Self::record_count(data.len()).ok_or(Error::InvalidConfig)?;
        if count > MAX_RECORDS {
            return Err(Error::InvalidConfig);
        }

        let mut records = heapless::Vec::new();
        for chunk in data.chunks_exact(RECORD_SIZE) {
            let mut bytes = [0u8; RECORD_SIZE];
            bytes.copy_from_slice(chunk);
            let record = FifoRecord::from_bytes(&bytes);
            if self.skip_empty && record.is_empty() {
                continue;
            }
            records.push(record).map_err(|_| Error::InvalidConfig)?;
        }

        Ok(records)
    }
}
