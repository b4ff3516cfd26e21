//! The payload sum type and the length-prefixed payload slot.

use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::indexation::Indexation;
use crate::milestone::Milestone;
use crate::receipt::Receipt;
use crate::transaction::Transaction;
use crate::treasury::TreasuryTransaction;

/// Wire tag of a transaction payload.
pub const TRANSACTION_PAYLOAD_TYPE: u32 = 0;

/// Wire tag of a milestone payload.
pub const MILESTONE_PAYLOAD_TYPE: u32 = 1;

/// Wire tag of an indexation payload.
pub const INDEXATION_PAYLOAD_TYPE: u32 = 2;

/// Wire tag of a receipt payload.
pub const RECEIPT_PAYLOAD_TYPE: u32 = 3;

/// Wire tag of a treasury transaction payload.
pub const TREASURY_TRANSACTION_PAYLOAD_TYPE: u32 = 4;

/// A payload of any supported kind.
///
/// Each variant serializes with its own leading u32 type tag; reading
/// dispatches on that tag to the concrete variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Transaction(Box<Transaction>),
    Milestone(Box<Milestone>),
    Indexation(Indexation),
    Receipt(Box<Receipt>),
    TreasuryTransaction(TreasuryTransaction),
}

impl Payload {
    /// The wire tag of this payload.
    pub fn kind(&self) -> u32 {
        match self {
            Payload::Transaction(_) => TRANSACTION_PAYLOAD_TYPE,
            Payload::Milestone(_) => MILESTONE_PAYLOAD_TYPE,
            Payload::Indexation(_) => INDEXATION_PAYLOAD_TYPE,
            Payload::Receipt(_) => RECEIPT_PAYLOAD_TYPE,
            Payload::TreasuryTransaction(_) => TREASURY_TRANSACTION_PAYLOAD_TYPE,
        }
    }
}

impl From<Transaction> for Payload {
    fn from(transaction: Transaction) -> Self {
        Payload::Transaction(Box::new(transaction))
    }
}

impl From<Milestone> for Payload {
    fn from(milestone: Milestone) -> Self {
        Payload::Milestone(Box::new(milestone))
    }
}

impl From<Indexation> for Payload {
    fn from(indexation: Indexation) -> Self {
        Payload::Indexation(indexation)
    }
}

impl From<Receipt> for Payload {
    fn from(receipt: Receipt) -> Self {
        Payload::Receipt(Box::new(receipt))
    }
}

impl From<TreasuryTransaction> for Payload {
    fn from(transaction: TreasuryTransaction) -> Self {
        Payload::TreasuryTransaction(transaction)
    }
}

impl WireFormat for Payload {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        match reader.read_u32()? {
            TRANSACTION_PAYLOAD_TYPE => Ok(Payload::Transaction(Box::new(
                Transaction::read_body(reader, mode)?,
            ))),
            MILESTONE_PAYLOAD_TYPE => Ok(Payload::Milestone(Box::new(Milestone::read_body(
                reader, mode,
            )?))),
            INDEXATION_PAYLOAD_TYPE => {
                Ok(Payload::Indexation(Indexation::read_body(reader, mode)?))
            }
            RECEIPT_PAYLOAD_TYPE => Ok(Payload::Receipt(Box::new(Receipt::read_body(
                reader, mode,
            )?))),
            TREASURY_TRANSACTION_PAYLOAD_TYPE => Ok(Payload::TreasuryTransaction(
                TreasuryTransaction::read_body(reader, mode)?,
            )),
            tag => Err(Error::UnknownPayloadType(tag)),
        }
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        match self {
            Payload::Transaction(transaction) => transaction.write_to(writer, mode),
            Payload::Milestone(milestone) => milestone.write_to(writer, mode),
            Payload::Indexation(indexation) => indexation.write_to(writer, mode),
            Payload::Receipt(receipt) => receipt.write_to(writer, mode),
            Payload::TreasuryTransaction(transaction) => transaction.write_to(writer, mode),
        }
    }
}

/// Reads a u32-length-prefixed payload slot. A length of zero means the slot
/// is empty; otherwise the payload must consume the advertised bytes exactly.
pub(crate) fn read_payload_slot(
    reader: &mut Reader<'_>,
    mode: Mode,
) -> Result<Option<Payload>, Error> {
    let len = reader.read_u32()? as usize;
    if len == 0 {
        return Ok(None);
    }
    let mut slot = reader.sub_reader(len)?;
    let payload = Payload::read_from(&mut slot, mode)?;
    if slot.remaining() > 0 {
        return Err(Error::NotAllConsumed {
            remaining: slot.remaining(),
        });
    }
    Ok(Some(payload))
}

/// Writes a u32-length-prefixed payload slot. An absent payload is written as
/// a zero length; an empty typed payload is never emitted.
pub(crate) fn write_payload_slot(
    writer: &mut Writer,
    payload: Option<&Payload>,
    mode: Mode,
) -> Result<(), Error> {
    match payload {
        None => {
            writer.write_u32(0);
            Ok(())
        }
        Some(payload) => {
            let bytes = payload.to_bytes(mode)?;
            writer.write_u32(bytes.len() as u32);
            writer.write_bytes(&bytes);
            Ok(())
        }
    }
}
