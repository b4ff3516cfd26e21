//! Transactions: an essence plus the unlock blocks spending its inputs.

use crate::codec::{LengthPrefix, Mode, Reader, WireFormat, Writer};
use crate::crypto::Blake2bHash;
use crate::error::Error;
use crate::input::{Input, UtxoInput, TREASURY_INPUT_TYPE, UTXO_INPUT_TYPE};
use crate::output::{Output, TREASURY_OUTPUT_TYPE};
use crate::payload::{
    read_payload_slot, write_payload_slot, Payload, INDEXATION_PAYLOAD_TYPE,
    TRANSACTION_PAYLOAD_TYPE,
};
use crate::rules::{ArrayRules, ElementOrder};
use crate::types::TransactionId;
use crate::unlock::{validate_unlock_blocks, UnlockBlock};
use crate::{INPUT_COUNT_MAX, INPUT_COUNT_MIN, OUTPUT_COUNT_MAX, OUTPUT_COUNT_MIN, TOKEN_SUPPLY};

/// Wire tag of the normal transaction essence.
pub const TRANSACTION_ESSENCE_TYPE: u8 = 0;

const INPUTS_RULES: ArrayRules =
    ArrayRules::new(INPUT_COUNT_MIN, INPUT_COUNT_MAX, ElementOrder::Lexical, true);

const OUTPUTS_RULES: ArrayRules = ArrayRules::new(
    OUTPUT_COUNT_MIN,
    OUTPUT_COUNT_MAX,
    ElementOrder::Lexical,
    true,
);

/// The signed part of a transaction: inputs, outputs and an optional
/// indexation payload.
///
/// Inputs and outputs appear on the wire sorted by the byte-wise lexical
/// order of each element's own serialization, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEssence {
    pub inputs: Vec<UtxoInput>,
    pub outputs: Vec<Output>,
    pub payload: Option<Payload>,
}

impl TransactionEssence {
    fn check_payload(&self) -> Result<(), Error> {
        match &self.payload {
            None | Some(Payload::Indexation(_)) => Ok(()),
            Some(other) => Err(Error::TypeMismatch {
                expected: INDEXATION_PAYLOAD_TYPE,
                actual: other.kind(),
            }),
        }
    }

    fn check_outputs_sum(&self) -> Result<(), Error> {
        let sum = self.outputs.iter().map(Output::amount).sum::<u64>();
        if sum > TOKEN_SUPPLY {
            return Err(Error::OutputsSumExceedsSupply(sum));
        }
        Ok(())
    }

    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let input_count = reader.read_length(LengthPrefix::U16)?;
        let mut inputs = Vec::with_capacity(input_count);
        let mut input_spans = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            let mark = reader.mark();
            match Input::read_from(reader, mode)? {
                Input::Utxo(input) => inputs.push(input),
                Input::Treasury(_) => {
                    // Only UTXO inputs may appear within an essence.
                    return Err(Error::TypeMismatch {
                        expected: UTXO_INPUT_TYPE as u32,
                        actual: TREASURY_INPUT_TYPE as u32,
                    });
                }
            }
            input_spans.push(reader.since(mark));
        }

        let output_count = reader.read_length(LengthPrefix::U16)?;
        let mut outputs = Vec::with_capacity(output_count);
        let mut output_spans = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            let mark = reader.mark();
            let output = Output::read_from(reader, mode)?;
            if matches!(output, Output::Treasury(_)) {
                // The treasury output only lives in treasury transactions.
                return Err(Error::UnknownOutputType(TREASURY_OUTPUT_TYPE));
            }
            outputs.push(output);
            output_spans.push(reader.since(mark));
        }

        let payload = read_payload_slot(reader, mode)?;

        let essence = Self {
            inputs,
            outputs,
            payload,
        };
        if mode.validating() {
            INPUTS_RULES.check_count(input_count)?;
            INPUTS_RULES.check_elements(&input_spans)?;
            OUTPUTS_RULES.check_count(output_count)?;
            OUTPUTS_RULES.check_elements(&output_spans)?;
            essence.check_outputs_sum()?;
            essence.check_payload()?;
        }
        Ok(essence)
    }
}

impl WireFormat for TransactionEssence {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        match reader.read_u8()? {
            TRANSACTION_ESSENCE_TYPE => Self::read_body(reader, mode),
            tag => Err(Error::UnknownEssenceType(tag)),
        }
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        let mut input_bytes = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            input_bytes.push(input.to_bytes(mode)?);
        }
        let mut output_bytes = Vec::with_capacity(self.outputs.len());
        for output in &self.outputs {
            if matches!(output, Output::Treasury(_)) {
                return Err(Error::UnknownOutputType(TREASURY_OUTPUT_TYPE));
            }
            output_bytes.push(output.to_bytes(mode)?);
        }

        if mode.validating() {
            INPUTS_RULES.check(&input_bytes)?;
            OUTPUTS_RULES.check(&output_bytes)?;
            self.check_outputs_sum()?;
            self.check_payload()?;
        }

        writer.write_u8(TRANSACTION_ESSENCE_TYPE);
        writer.write_length(LengthPrefix::U16, input_bytes.len())?;
        for bytes in &input_bytes {
            writer.write_bytes(bytes);
        }
        writer.write_length(LengthPrefix::U16, output_bytes.len())?;
        for bytes in &output_bytes {
            writer.write_bytes(bytes);
        }
        write_payload_slot(writer, self.payload.as_ref(), mode)
    }
}

/// A transaction payload: the essence plus one unlock block per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub essence: TransactionEssence,
    pub unlock_blocks: Vec<UnlockBlock>,
}

impl Transaction {
    /// The transaction ID: the Blake2b-256 hash of the serialized payload.
    pub fn id(&self) -> Result<TransactionId, Error> {
        let bytes = self.to_bytes(Mode::NoValidation)?;
        Ok(TransactionId::from_bytes(Blake2bHash::hash(&bytes).0))
    }

    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let essence = TransactionEssence::read_from(reader, mode)?;
        let block_count = reader.read_length(LengthPrefix::U16)?;
        let mut unlock_blocks = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            unlock_blocks.push(UnlockBlock::read_from(reader, mode)?);
        }
        let transaction = Self {
            essence,
            unlock_blocks,
        };
        if mode.validating() {
            validate_unlock_blocks(&transaction.unlock_blocks, transaction.essence.inputs.len())?;
        }
        Ok(transaction)
    }
}

impl WireFormat for Transaction {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let tag = reader.read_u32()?;
        if tag != TRANSACTION_PAYLOAD_TYPE {
            return Err(Error::TypeMismatch {
                expected: TRANSACTION_PAYLOAD_TYPE,
                actual: tag,
            });
        }
        Self::read_body(reader, mode)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        if mode.validating() {
            validate_unlock_blocks(&self.unlock_blocks, self.essence.inputs.len())?;
        }
        writer.write_u32(TRANSACTION_PAYLOAD_TYPE);
        self.essence.write_to(writer, mode)?;
        writer.write_length(LengthPrefix::U16, self.unlock_blocks.len())?;
        for block in &self.unlock_blocks {
            block.write_to(writer, mode)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{Address, Ed25519Address};
    use crate::indexation::Indexation;
    use crate::output::SigLockedSingleOutput;
    use crate::signature::{Ed25519Signature, Signature};
    use crate::unlock::SignatureUnlockBlock;

    fn input(fill: u8) -> UtxoInput {
        UtxoInput::new(TransactionId::from_bytes([fill; 32]), 0)
    }

    fn output(fill: u8, amount: u64) -> Output {
        Output::SigLockedSingle(SigLockedSingleOutput::new(
            Address::Ed25519(Ed25519Address::from_bytes([fill; 32])),
            amount,
        ))
    }

    fn sig_block(key: u8) -> UnlockBlock {
        UnlockBlock::Signature(SignatureUnlockBlock::new(Signature::Ed25519(
            Ed25519Signature::new([key; 32], [0xAB; 64]),
        )))
    }

    fn essence() -> TransactionEssence {
        TransactionEssence {
            inputs: vec![input(0x01), input(0x02)],
            outputs: vec![output(0x01, 100), output(0x02, 200)],
            payload: None,
        }
    }

    #[test]
    fn test_essence_roundtrip() {
        let essence = essence();
        let bytes = essence.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes[0], TRANSACTION_ESSENCE_TYPE);
        assert_eq!(
            TransactionEssence::from_bytes(&bytes, Mode::Validate).unwrap(),
            essence
        );
    }

    #[test]
    fn test_unsorted_inputs_rejected() {
        let mut unsorted = essence();
        unsorted.inputs.swap(0, 1);
        assert!(matches!(
            unsorted.to_bytes(Mode::Validate),
            Err(Error::OrderViolation { index: 1 })
        ));
        let bytes = unsorted.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            TransactionEssence::from_bytes(&bytes, Mode::Validate),
            Err(Error::OrderViolation { index: 1 })
        ));
    }

    #[test]
    fn test_duplicate_outputs_rejected() {
        let mut dup = essence();
        dup.outputs = vec![output(0x01, 100), output(0x01, 100)];
        assert!(matches!(
            dup.to_bytes(Mode::Validate),
            Err(Error::UniquenessViolation { index: 1 })
        ));
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let mut empty = essence();
        empty.inputs.clear();
        assert!(matches!(
            empty.to_bytes(Mode::Validate),
            Err(Error::MinNotReached { min: 1, actual: 0 })
        ));
    }

    #[test]
    fn test_outputs_sum_capped_by_supply() {
        let mut over = essence();
        over.outputs = vec![output(0x01, 1), output(0x02, TOKEN_SUPPLY)];
        assert!(matches!(
            over.to_bytes(Mode::Validate),
            Err(Error::OutputsSumExceedsSupply(_))
        ));
        let bytes = over.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            TransactionEssence::from_bytes(&bytes, Mode::Validate),
            Err(Error::OutputsSumExceedsSupply(_))
        ));
    }

    #[test]
    fn test_essence_payload_must_be_indexation() {
        let mut essence = essence();
        essence.payload = Some(Payload::Indexation(
            Indexation::new(b"ok".to_vec(), vec![]).unwrap(),
        ));
        let bytes = essence.to_bytes(Mode::Validate).unwrap();
        assert_eq!(
            TransactionEssence::from_bytes(&bytes, Mode::Validate).unwrap(),
            essence
        );

        essence.payload = Some(Payload::TreasuryTransaction(
            crate::treasury::TreasuryTransaction {
                input: crate::input::TreasuryInput::new(crate::types::MilestoneId::from_bytes(
                    [0x00; 32],
                )),
                output: crate::output::TreasuryOutput::new(7),
            },
        ));
        assert!(matches!(
            essence.to_bytes(Mode::Validate),
            Err(Error::TypeMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_essence_type_rejected() {
        let bytes = [0x03u8, 0x00, 0x00];
        assert!(matches!(
            TransactionEssence::from_bytes(&bytes, Mode::Validate),
            Err(Error::UnknownEssenceType(0x03))
        ));
    }

    #[test]
    fn test_transaction_roundtrip() {
        let transaction = Transaction {
            essence: essence(),
            unlock_blocks: vec![sig_block(0x01), sig_block(0x02)],
        };
        let bytes = transaction.to_bytes(Mode::Validate).unwrap();
        assert_eq!(&bytes[..4], &TRANSACTION_PAYLOAD_TYPE.to_le_bytes());
        assert_eq!(
            Transaction::from_bytes(&bytes, Mode::Validate).unwrap(),
            transaction
        );
    }

    #[test]
    fn test_unlock_block_count_must_match_inputs() {
        let transaction = Transaction {
            essence: essence(),
            unlock_blocks: vec![sig_block(0x01)],
        };
        assert!(matches!(
            transaction.to_bytes(Mode::Validate),
            Err(Error::UnlockBlocksValidation(_))
        ));
        let bytes = transaction.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            Transaction::from_bytes(&bytes, Mode::Validate),
            Err(Error::UnlockBlocksValidation(_))
        ));
    }

    #[test]
    fn test_transaction_id_is_stable() {
        let transaction = Transaction {
            essence: essence(),
            unlock_blocks: vec![sig_block(0x01), sig_block(0x02)],
        };
        let id1 = transaction.id().unwrap();
        let id2 = transaction.id().unwrap();
        assert_eq!(id1, id2);
    }
}
