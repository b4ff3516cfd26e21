//! Treasury transactions: moving the network treasury between milestones.

use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::input::{Input, TreasuryInput, TREASURY_INPUT_TYPE};
use crate::output::{Output, TreasuryOutput, TREASURY_OUTPUT_TYPE};
use crate::payload::TREASURY_TRANSACTION_PAYLOAD_TYPE;

/// Consumes a treasury input and produces the new treasury output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasuryTransaction {
    pub input: TreasuryInput,
    pub output: TreasuryOutput,
}

impl TreasuryTransaction {
    pub fn new(input: TreasuryInput, output: TreasuryOutput) -> Self {
        Self { input, output }
    }

    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let input = match Input::read_from(reader, mode)? {
            Input::Treasury(input) => input,
            other => {
                return Err(Error::TypeMismatch {
                    expected: TREASURY_INPUT_TYPE as u32,
                    actual: other.kind() as u32,
                })
            }
        };
        let output = match Output::read_from(reader, mode)? {
            Output::Treasury(output) => output,
            other => {
                return Err(Error::TypeMismatch {
                    expected: TREASURY_OUTPUT_TYPE as u32,
                    actual: other.kind() as u32,
                })
            }
        };
        Ok(Self { input, output })
    }
}

impl WireFormat for TreasuryTransaction {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let tag = reader.read_u32()?;
        if tag != TREASURY_TRANSACTION_PAYLOAD_TYPE {
            return Err(Error::TypeMismatch {
                expected: TREASURY_TRANSACTION_PAYLOAD_TYPE,
                actual: tag,
            });
        }
        Self::read_body(reader, mode)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        writer.write_u32(TREASURY_TRANSACTION_PAYLOAD_TYPE);
        Input::Treasury(self.input).write_to(writer, mode)?;
        Output::Treasury(self.output).write_to(writer, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MilestoneId;

    #[test]
    fn test_roundtrip() {
        let transaction = TreasuryTransaction::new(
            TreasuryInput::new(MilestoneId::from_bytes([0x44; 32])),
            TreasuryOutput::new(1_000_000),
        );
        let bytes = transaction.to_bytes(Mode::Validate).unwrap();
        assert_eq!(
            &bytes[..4],
            &TREASURY_TRANSACTION_PAYLOAD_TYPE.to_le_bytes()
        );
        assert_eq!(bytes.len(), 4 + 33 + 9);
        assert_eq!(
            TreasuryTransaction::from_bytes(&bytes, Mode::Validate).unwrap(),
            transaction
        );
    }

    #[test]
    fn test_wrong_input_kind_rejected() {
        let transaction = TreasuryTransaction::new(
            TreasuryInput::new(MilestoneId::from_bytes([0x44; 32])),
            TreasuryOutput::new(0),
        );
        let mut bytes = transaction.to_bytes(Mode::Validate).unwrap();
        // Swap the treasury input tag for a UTXO input tag.
        bytes[4] = 0x00;
        assert!(matches!(
            TreasuryTransaction::from_bytes(&bytes, Mode::Validate),
            Err(Error::TypeMismatch { expected: 1, actual: 0 }) | Err(Error::NotEnoughData { .. })
        ));
    }
}
