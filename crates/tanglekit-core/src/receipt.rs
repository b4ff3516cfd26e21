//! Receipts: listings of funds migrated from the legacy network.

use crate::codec::{LengthPrefix, Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::payload::{
    read_payload_slot, write_payload_slot, Payload, RECEIPT_PAYLOAD_TYPE,
    TREASURY_TRANSACTION_PAYLOAD_TYPE,
};
use crate::rules::{ArrayRules, ElementOrder};
use crate::treasury::TreasuryTransaction;
use crate::{address::Address, MIGRATED_FUNDS_COUNT_MAX, MIGRATED_FUNDS_COUNT_MIN};

/// Byte length of a legacy tail transaction hash.
pub const TAIL_TRANSACTION_HASH_LENGTH: usize = 49;

const FUNDS_RULES: ArrayRules = ArrayRules::new(
    MIGRATED_FUNDS_COUNT_MIN,
    MIGRATED_FUNDS_COUNT_MAX,
    ElementOrder::Lexical,
    true,
);

/// A single migrated funds entry within a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigratedFundsEntry {
    /// The tail transaction hash of the legacy bundle the funds moved from.
    pub tail_transaction_hash: [u8; TAIL_TRANSACTION_HASH_LENGTH],
    /// The target address.
    pub address: Address,
    /// The migrated amount.
    pub deposit: u64,
}

impl WireFormat for MigratedFundsEntry {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        Ok(Self {
            tail_transaction_hash: reader.read_fixed()?,
            address: Address::read_from(reader, mode)?,
            deposit: reader.read_u64()?,
        })
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        writer.write_bytes(&self.tail_transaction_hash);
        self.address.write_to(writer, mode)?;
        writer.write_u64(self.deposit);
        Ok(())
    }
}

/// A receipt payload, embedded in a milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The legacy milestone index at which the funds were migrated.
    pub migrated_at: u32,
    /// Whether this is the final receipt for that index.
    pub is_final: bool,
    /// The migrated funds, lexically ordered by serialized bytes.
    pub funds: Vec<MigratedFundsEntry>,
    /// The treasury transaction accounting for the migration.
    pub transaction: TreasuryTransaction,
}

impl Receipt {
    pub(crate) fn read_body(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let migrated_at = reader.read_u32()?;
        let is_final = reader.read_bool()?;

        let funds_count = reader.read_length(LengthPrefix::U16)?;
        let mut funds = Vec::with_capacity(funds_count);
        let mut fund_spans = Vec::with_capacity(funds_count);
        for _ in 0..funds_count {
            let mark = reader.mark();
            funds.push(MigratedFundsEntry::read_from(reader, mode)?);
            fund_spans.push(reader.since(mark));
        }

        let transaction = match read_payload_slot(reader, mode)? {
            Some(Payload::TreasuryTransaction(transaction)) => transaction,
            Some(other) => {
                return Err(Error::TypeMismatch {
                    expected: TREASURY_TRANSACTION_PAYLOAD_TYPE,
                    actual: other.kind(),
                })
            }
            None => return Err(Error::ReceiptMissingTreasuryTransaction),
        };

        if mode.validating() {
            FUNDS_RULES.check_count(funds_count)?;
            FUNDS_RULES.check_elements(&fund_spans)?;
        }
        Ok(Self {
            migrated_at,
            is_final,
            funds,
            transaction,
        })
    }
}

impl WireFormat for Receipt {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let tag = reader.read_u32()?;
        if tag != RECEIPT_PAYLOAD_TYPE {
            return Err(Error::TypeMismatch {
                expected: RECEIPT_PAYLOAD_TYPE,
                actual: tag,
            });
        }
        Self::read_body(reader, mode)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        let mut fund_bytes = Vec::with_capacity(self.funds.len());
        for entry in &self.funds {
            fund_bytes.push(entry.to_bytes(mode)?);
        }
        if mode.validating() {
            FUNDS_RULES.check(&fund_bytes)?;
        }

        writer.write_u32(RECEIPT_PAYLOAD_TYPE);
        writer.write_u32(self.migrated_at);
        writer.write_bool(self.is_final);
        writer.write_length(LengthPrefix::U16, fund_bytes.len())?;
        for bytes in &fund_bytes {
            writer.write_bytes(bytes);
        }
        let transaction = Payload::TreasuryTransaction(self.transaction);
        write_payload_slot(writer, Some(&transaction), mode)
    }
}
