//! Transaction inputs.

use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::types::{MilestoneId, TransactionId};
use crate::UTXO_INDEX_MAX;

/// Wire tag of a UTXO input.
pub const UTXO_INPUT_TYPE: u8 = 0;

/// Wire tag of a treasury input.
pub const TREASURY_INPUT_TYPE: u8 = 1;

/// References an output of a previous transaction by transaction ID and
/// output index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtxoInput {
    pub transaction_id: TransactionId,
    pub output_index: u16,
}

impl UtxoInput {
    pub fn new(transaction_id: TransactionId, output_index: u16) -> Self {
        Self {
            transaction_id,
            output_index,
        }
    }

    fn check_index(&self) -> Result<(), Error> {
        if self.output_index > UTXO_INDEX_MAX {
            return Err(Error::InvalidUtxoIndex {
                index: self.output_index,
                max: UTXO_INDEX_MAX,
            });
        }
        Ok(())
    }

    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let input = Self {
            transaction_id: TransactionId::from_bytes(reader.read_fixed()?),
            output_index: reader.read_u16()?,
        };
        if mode.validating() {
            input.check_index()?;
        }
        Ok(input)
    }
}

impl WireFormat for UtxoInput {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let tag = reader.read_u8()?;
        if tag != UTXO_INPUT_TYPE {
            return Err(Error::TypeMismatch {
                expected: UTXO_INPUT_TYPE as u32,
                actual: tag as u32,
            });
        }
        Self::read_body(reader, mode)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        if mode.validating() {
            self.check_index()?;
        }
        writer.write_u8(UTXO_INPUT_TYPE);
        writer.write_bytes(self.transaction_id.as_bytes());
        writer.write_u16(self.output_index);
        Ok(())
    }
}

/// References the treasury output created by a previous milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreasuryInput {
    pub milestone_id: MilestoneId,
}

impl TreasuryInput {
    pub fn new(milestone_id: MilestoneId) -> Self {
        Self { milestone_id }
    }
}

/// An input of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Utxo(UtxoInput),
    Treasury(TreasuryInput),
}

impl Input {
    /// The wire tag of this input.
    pub fn kind(&self) -> u8 {
        match self {
            Input::Utxo(_) => UTXO_INPUT_TYPE,
            Input::Treasury(_) => TREASURY_INPUT_TYPE,
        }
    }
}

impl From<UtxoInput> for Input {
    fn from(input: UtxoInput) -> Self {
        Input::Utxo(input)
    }
}

impl From<TreasuryInput> for Input {
    fn from(input: TreasuryInput) -> Self {
        Input::Treasury(input)
    }
}

impl WireFormat for Input {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        match reader.read_u8()? {
            UTXO_INPUT_TYPE => Ok(Input::Utxo(UtxoInput::read_body(reader, mode)?)),
            TREASURY_INPUT_TYPE => Ok(Input::Treasury(TreasuryInput {
                milestone_id: MilestoneId::from_bytes(reader.read_fixed()?),
            })),
            tag => Err(Error::UnknownInputType(tag)),
        }
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        match self {
            Input::Utxo(input) => input.write_to(writer, mode),
            Input::Treasury(input) => {
                writer.write_u8(TREASURY_INPUT_TYPE);
                writer.write_bytes(input.milestone_id.as_bytes());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utxo_input_roundtrip() {
        let input = UtxoInput::new(TransactionId::from_bytes([0x9A; 32]), 42);
        let bytes = input.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes.len(), 1 + 32 + 2);
        assert_eq!(bytes[0], UTXO_INPUT_TYPE);
        assert_eq!(UtxoInput::from_bytes(&bytes, Mode::Validate).unwrap(), input);
    }

    #[test]
    fn test_utxo_index_bound() {
        let ok = UtxoInput::new(TransactionId::from_bytes([0x00; 32]), UTXO_INDEX_MAX);
        assert!(ok.to_bytes(Mode::Validate).is_ok());

        let over = UtxoInput::new(TransactionId::from_bytes([0x00; 32]), UTXO_INDEX_MAX + 1);
        assert!(matches!(
            over.to_bytes(Mode::Validate),
            Err(Error::InvalidUtxoIndex { index: 127, .. })
        ));
        // The structural mode still accepts it; validation on read rejects it.
        let bytes = over.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            UtxoInput::from_bytes(&bytes, Mode::Validate),
            Err(Error::InvalidUtxoIndex { .. })
        ));
        assert_eq!(
            UtxoInput::from_bytes(&bytes, Mode::NoValidation).unwrap(),
            over
        );
    }

    #[test]
    fn test_input_selector() {
        let treasury = Input::Treasury(TreasuryInput::new(MilestoneId::from_bytes([0x77; 32])));
        let bytes = treasury.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes[0], TREASURY_INPUT_TYPE);
        assert_eq!(Input::from_bytes(&bytes, Mode::Validate).unwrap(), treasury);

        let mut unknown = vec![0x09u8];
        unknown.extend_from_slice(&[0u8; 32]);
        assert!(matches!(
            Input::from_bytes(&unknown, Mode::Validate),
            Err(Error::UnknownInputType(0x09))
        ));
    }
}
