//! Indexation payloads: arbitrary data filed under a short index.

use std::fmt;

use crate::codec::{LengthPrefix, Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::payload::INDEXATION_PAYLOAD_TYPE;
use crate::{INDEXATION_INDEX_MAX_LENGTH, INDEXATION_INDEX_MIN_LENGTH};

/// A payload which holds an index and associated data.
///
/// The index is raw bytes, 1 to 64 of them; the data is unconstrained here
/// and bounded only by the enclosing message's size cap.
#[derive(Clone, PartialEq, Eq)]
pub struct Indexation {
    pub index: Vec<u8>,
    pub data: Vec<u8>,
}

impl Indexation {
    /// Create a new indexation payload, checking the index bounds.
    pub fn new(index: Vec<u8>, data: Vec<u8>) -> Result<Self, Error> {
        let indexation = Self { index, data };
        indexation.check_index()?;
        Ok(indexation)
    }

    fn check_index(&self) -> Result<(), Error> {
        if self.index.len() < INDEXATION_INDEX_MIN_LENGTH {
            return Err(Error::MinNotReached {
                min: INDEXATION_INDEX_MIN_LENGTH,
                actual: self.index.len(),
            });
        }
        if self.index.len() > INDEXATION_INDEX_MAX_LENGTH {
            return Err(Error::MaxExceeded {
                max: INDEXATION_INDEX_MAX_LENGTH,
                actual: self.index.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let index = reader
            .read_prefixed_bytes(LengthPrefix::U16, INDEXATION_INDEX_MAX_LENGTH)?
            .to_vec();
        let data_len = reader.read_length(LengthPrefix::U32)?;
        let data = reader.read_bytes(data_len)?.to_vec();
        let indexation = Self { index, data };
        if mode.validating() {
            indexation.check_index()?;
        }
        Ok(indexation)
    }
}

impl fmt::Debug for Indexation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Indexation(index {}, {} data bytes)",
            hex::encode(&self.index),
            self.data.len()
        )
    }
}

impl WireFormat for Indexation {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let tag = reader.read_u32()?;
        if tag != INDEXATION_PAYLOAD_TYPE {
            return Err(Error::TypeMismatch {
                expected: INDEXATION_PAYLOAD_TYPE,
                actual: tag,
            });
        }
        Self::read_body(reader, mode)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        if mode.validating() {
            self.check_index()?;
        }
        writer.write_u32(INDEXATION_PAYLOAD_TYPE);
        writer.write_prefixed_bytes(LengthPrefix::U16, &self.index)?;
        writer.write_prefixed_bytes(LengthPrefix::U32, &self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_byte_layout() {
        let indexation =
            Indexation::new(b"IOTA".to_vec(), vec![0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        let bytes = indexation.to_bytes(Mode::Validate).unwrap();
        let expected = [
            0x02, 0x00, 0x00, 0x00, // payload type
            0x04, 0x00, // index length
            0x49, 0x4F, 0x54, 0x41, // "IOTA"
            0x04, 0x00, 0x00, 0x00, // data length
            0xDE, 0xAD, 0xBE, 0xEF,
        ];
        assert_eq!(bytes, expected);
        assert_eq!(
            Indexation::from_bytes(&bytes, Mode::Validate).unwrap(),
            indexation
        );
    }

    #[test]
    fn test_index_bounds() {
        assert!(matches!(
            Indexation::new(vec![], vec![]),
            Err(Error::MinNotReached { min: 1, actual: 0 })
        ));
        assert!(Indexation::new(vec![0x61], vec![]).is_ok());
        assert!(Indexation::new(vec![0x61; 64], vec![]).is_ok());
        assert!(matches!(
            Indexation::new(vec![0x61; 65], vec![]),
            Err(Error::MaxExceeded { max: 64, actual: 65 })
        ));
    }

    #[test]
    fn test_serialize_validates_index() {
        let empty = Indexation {
            index: vec![],
            data: vec![],
        };
        assert!(matches!(
            empty.to_bytes(Mode::Validate),
            Err(Error::MinNotReached { .. })
        ));
        // Structural serialization does not check, deserialization with
        // validation does.
        let bytes = empty.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            Indexation::from_bytes(&bytes, Mode::Validate),
            Err(Error::MinNotReached { .. })
        ));
    }

    #[test]
    fn test_oversized_index_on_wire_rejected() {
        let oversized = Indexation {
            index: vec![0x61; 65],
            data: vec![],
        };
        let bytes = oversized.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            Indexation::from_bytes(&bytes, Mode::Validate),
            Err(Error::LengthInvalid { len: 65, max: 64 })
        ));
    }

    #[test]
    fn test_empty_data_allowed() {
        let indexation = Indexation::new(b"idx".to_vec(), vec![]).unwrap();
        let bytes = indexation.to_bytes(Mode::Validate).unwrap();
        assert_eq!(
            Indexation::from_bytes(&bytes, Mode::Validate).unwrap(),
            indexation
        );
    }
}
