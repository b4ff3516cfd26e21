//! JSON representations of the wire types.
//!
//! Every wire type has a JSON form with an integer `type` discriminator;
//! fixed-size byte fields are hex strings, and 64-bit integers that exceed
//! JSON number precision (network ID, nonce) travel as strings. The
//! structural invariants are those of the binary model: conversions go
//! through the core types, which enforce them on (de)serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use tanglekit_core::payload::{
    INDEXATION_PAYLOAD_TYPE, MILESTONE_PAYLOAD_TYPE, RECEIPT_PAYLOAD_TYPE,
    TRANSACTION_PAYLOAD_TYPE, TREASURY_TRANSACTION_PAYLOAD_TYPE,
};
use tanglekit_core::{
    Address, Ed25519Address, Ed25519Signature, Indexation, Message, MessageId, MigratedFundsEntry,
    Milestone, MilestoneId, Output, Payload, Receipt, ReferenceUnlockBlock, Signature,
    SigLockedDustAllowanceOutput, SigLockedSingleOutput, SignatureUnlockBlock, Transaction,
    TransactionEssence, TransactionId, TreasuryInput, TreasuryOutput, TreasuryTransaction,
    UnlockBlock, UtxoInput,
};

use crate::error::ClientError;

fn hex_to_array<const N: usize>(field: &str, s: &str) -> Result<[u8; N], ClientError> {
    let bytes = hex::decode(s)?;
    bytes
        .try_into()
        .map_err(|_| ClientError::Dto(format!("{field} must be {N} hex-encoded bytes")))
}

fn parse_u64(field: &str, s: &str) -> Result<u64, ClientError> {
    s.parse()
        .map_err(|_| ClientError::Dto(format!("{field} is not a decimal u64")))
}

/// JSON form of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub network_id: String,
    pub parent_message_ids: Vec<String>,
    pub payload: Option<PayloadDto>,
    pub nonce: String,
}

/// JSON form of a payload, discriminated by its `type` field.
#[derive(Debug, Clone)]
pub enum PayloadDto {
    Transaction(TransactionPayloadDto),
    Milestone(MilestonePayloadDto),
    Indexation(IndexationPayloadDto),
    Receipt(ReceiptPayloadDto),
    TreasuryTransaction(TreasuryTransactionPayloadDto),
}

impl Serialize for PayloadDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PayloadDto::Transaction(dto) => dto.serialize(serializer),
            PayloadDto::Milestone(dto) => dto.serialize(serializer),
            PayloadDto::Indexation(dto) => dto.serialize(serializer),
            PayloadDto::Receipt(dto) => dto.serialize(serializer),
            PayloadDto::TreasuryTransaction(dto) => dto.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PayloadDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| serde::de::Error::custom("payload is missing its type discriminator"))?;
        let payload = match kind as u32 {
            TRANSACTION_PAYLOAD_TYPE => serde_json::from_value(value).map(PayloadDto::Transaction),
            MILESTONE_PAYLOAD_TYPE => serde_json::from_value(value).map(PayloadDto::Milestone),
            INDEXATION_PAYLOAD_TYPE => serde_json::from_value(value).map(PayloadDto::Indexation),
            RECEIPT_PAYLOAD_TYPE => serde_json::from_value(value).map(PayloadDto::Receipt),
            TREASURY_TRANSACTION_PAYLOAD_TYPE => {
                serde_json::from_value(value).map(PayloadDto::TreasuryTransaction)
            }
            other => {
                return Err(serde::de::Error::custom(format!(
                    "unknown payload type {other}"
                )))
            }
        };
        payload.map_err(serde::de::Error::custom)
    }
}

/// JSON form of a transaction payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayloadDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub essence: TransactionEssenceDto,
    pub unlock_blocks: Vec<UnlockBlockDto>,
}

/// JSON form of a transaction essence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEssenceDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub inputs: Vec<UtxoInputDto>,
    pub outputs: Vec<OutputDto>,
    pub payload: Option<IndexationPayloadDto>,
}

/// JSON form of a UTXO input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoInputDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub transaction_id: String,
    pub transaction_output_index: u16,
}

/// JSON form of an output, discriminated by its `type` field.
#[derive(Debug, Clone)]
pub enum OutputDto {
    SigLockedSingle(SigLockedSingleOutputDto),
    SigLockedDustAllowance(SigLockedDustAllowanceOutputDto),
    Treasury(TreasuryOutputDto),
}

impl Serialize for OutputDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutputDto::SigLockedSingle(dto) => dto.serialize(serializer),
            OutputDto::SigLockedDustAllowance(dto) => dto.serialize(serializer),
            OutputDto::Treasury(dto) => dto.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for OutputDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| serde::de::Error::custom("output is missing its type discriminator"))?;
        let output = match kind {
            0 => serde_json::from_value(value).map(OutputDto::SigLockedSingle),
            1 => serde_json::from_value(value).map(OutputDto::SigLockedDustAllowance),
            2 => serde_json::from_value(value).map(OutputDto::Treasury),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "unknown output type {other}"
                )))
            }
        };
        output.map_err(serde::de::Error::custom)
    }
}

/// JSON form of a signature-locked single output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigLockedSingleOutputDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub address: AddressDto,
    pub amount: u64,
}

/// JSON form of a signature-locked dust allowance output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigLockedDustAllowanceOutputDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub address: AddressDto,
    pub amount: u64,
}

/// JSON form of a treasury output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryOutputDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub amount: u64,
}

/// JSON form of an address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub address: String,
}

/// JSON form of an unlock block, discriminated by its `type` field.
#[derive(Debug, Clone)]
pub enum UnlockBlockDto {
    Signature(SignatureUnlockBlockDto),
    Reference(ReferenceUnlockBlockDto),
}

impl Serialize for UnlockBlockDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UnlockBlockDto::Signature(dto) => dto.serialize(serializer),
            UnlockBlockDto::Reference(dto) => dto.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for UnlockBlockDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value.get("type").and_then(serde_json::Value::as_u64).ok_or_else(|| {
            serde::de::Error::custom("unlock block is missing its type discriminator")
        })?;
        let block = match kind {
            0 => serde_json::from_value(value).map(UnlockBlockDto::Signature),
            1 => serde_json::from_value(value).map(UnlockBlockDto::Reference),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "unknown unlock block type {other}"
                )))
            }
        };
        block.map_err(serde::de::Error::custom)
    }
}

/// JSON form of a signature unlock block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureUnlockBlockDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub signature: SignatureDto,
}

/// JSON form of a reference unlock block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceUnlockBlockDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub reference: u16,
}

/// JSON form of an Ed25519 signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub public_key: String,
    pub signature: String,
}

/// JSON form of a milestone payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePayloadDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub index: u32,
    pub timestamp: u64,
    pub parent_message_ids: Vec<String>,
    pub inclusion_merkle_proof: String,
    pub public_keys: Vec<String>,
    pub receipt: Option<ReceiptPayloadDto>,
    pub signatures: Vec<String>,
}

/// JSON form of an indexation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexationPayloadDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub index: String,
    pub data: String,
}

/// JSON form of a receipt payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayloadDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub migrated_at: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub funds: Vec<MigratedFundsEntryDto>,
    pub transaction: TreasuryTransactionPayloadDto,
}

/// JSON form of a migrated funds entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedFundsEntryDto {
    pub tail_transaction_hash: String,
    pub address: AddressDto,
    pub deposit: u64,
}

/// JSON form of a treasury transaction payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryTransactionPayloadDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub input: TreasuryInputDto,
    pub output: TreasuryOutputDto,
}

/// JSON form of a treasury input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryInputDto {
    #[serde(rename = "type")]
    pub kind: u32,
    pub milestone_id: String,
}

// ── Core → DTO ───────────────────────────────────────────────────────────

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            network_id: message.network_id.to_string(),
            parent_message_ids: message.parents.iter().map(MessageId::to_hex).collect(),
            payload: message.payload.as_ref().map(PayloadDto::from),
            nonce: message.nonce.to_string(),
        }
    }
}

impl From<&Payload> for PayloadDto {
    fn from(payload: &Payload) -> Self {
        match payload {
            Payload::Transaction(transaction) => {
                PayloadDto::Transaction(transaction.as_ref().into())
            }
            Payload::Milestone(milestone) => PayloadDto::Milestone(milestone.as_ref().into()),
            Payload::Indexation(indexation) => PayloadDto::Indexation(indexation.into()),
            Payload::Receipt(receipt) => PayloadDto::Receipt(receipt.as_ref().into()),
            Payload::TreasuryTransaction(transaction) => {
                PayloadDto::TreasuryTransaction(transaction.into())
            }
        }
    }
}

impl From<&Transaction> for TransactionPayloadDto {
    fn from(transaction: &Transaction) -> Self {
        Self {
            kind: TRANSACTION_PAYLOAD_TYPE,
            essence: (&transaction.essence).into(),
            unlock_blocks: transaction.unlock_blocks.iter().map(Into::into).collect(),
        }
    }
}

impl From<&TransactionEssence> for TransactionEssenceDto {
    fn from(essence: &TransactionEssence) -> Self {
        Self {
            kind: 0,
            inputs: essence.inputs.iter().map(Into::into).collect(),
            outputs: essence.outputs.iter().map(Into::into).collect(),
            payload: essence.payload.as_ref().and_then(|payload| match payload {
                Payload::Indexation(indexation) => Some(indexation.into()),
                _ => None,
            }),
        }
    }
}

impl From<&UtxoInput> for UtxoInputDto {
    fn from(input: &UtxoInput) -> Self {
        Self {
            kind: 0,
            transaction_id: input.transaction_id.to_hex(),
            transaction_output_index: input.output_index,
        }
    }
}

impl From<&Output> for OutputDto {
    fn from(output: &Output) -> Self {
        match output {
            Output::SigLockedSingle(output) => OutputDto::SigLockedSingle(SigLockedSingleOutputDto {
                kind: 0,
                address: (&output.address).into(),
                amount: output.amount,
            }),
            Output::SigLockedDustAllowance(output) => {
                OutputDto::SigLockedDustAllowance(SigLockedDustAllowanceOutputDto {
                    kind: 1,
                    address: (&output.address).into(),
                    amount: output.amount,
                })
            }
            Output::Treasury(output) => OutputDto::Treasury(TreasuryOutputDto {
                kind: 2,
                amount: output.amount,
            }),
        }
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        let Address::Ed25519(ed25519) = address;
        Self {
            kind: 0,
            address: ed25519.to_hex(),
        }
    }
}

impl From<&UnlockBlock> for UnlockBlockDto {
    fn from(block: &UnlockBlock) -> Self {
        match block {
            UnlockBlock::Signature(block) => {
                let Signature::Ed25519(signature) = &block.signature;
                UnlockBlockDto::Signature(SignatureUnlockBlockDto {
                    kind: 0,
                    signature: SignatureDto {
                        kind: 0,
                        public_key: hex::encode(signature.public_key),
                        signature: hex::encode(signature.signature),
                    },
                })
            }
            UnlockBlock::Reference(block) => UnlockBlockDto::Reference(ReferenceUnlockBlockDto {
                kind: 1,
                reference: block.reference,
            }),
        }
    }
}

impl From<&Milestone> for MilestonePayloadDto {
    fn from(milestone: &Milestone) -> Self {
        Self {
            kind: MILESTONE_PAYLOAD_TYPE,
            index: milestone.index,
            timestamp: milestone.timestamp,
            parent_message_ids: milestone.parents.iter().map(MessageId::to_hex).collect(),
            inclusion_merkle_proof: hex::encode(milestone.inclusion_merkle_proof),
            public_keys: milestone.public_keys.iter().map(hex::encode).collect(),
            receipt: milestone.receipt.as_ref().map(Into::into),
            signatures: milestone.signatures.iter().map(hex::encode).collect(),
        }
    }
}

impl From<&Indexation> for IndexationPayloadDto {
    fn from(indexation: &Indexation) -> Self {
        Self {
            kind: INDEXATION_PAYLOAD_TYPE,
            index: hex::encode(&indexation.index),
            data: hex::encode(&indexation.data),
        }
    }
}

impl From<&Receipt> for ReceiptPayloadDto {
    fn from(receipt: &Receipt) -> Self {
        Self {
            kind: RECEIPT_PAYLOAD_TYPE,
            migrated_at: receipt.migrated_at,
            is_final: receipt.is_final,
            funds: receipt.funds.iter().map(Into::into).collect(),
            transaction: (&receipt.transaction).into(),
        }
    }
}

impl From<&MigratedFundsEntry> for MigratedFundsEntryDto {
    fn from(entry: &MigratedFundsEntry) -> Self {
        Self {
            tail_transaction_hash: hex::encode(entry.tail_transaction_hash),
            address: (&entry.address).into(),
            deposit: entry.deposit,
        }
    }
}

impl From<&TreasuryTransaction> for TreasuryTransactionPayloadDto {
    fn from(transaction: &TreasuryTransaction) -> Self {
        Self {
            kind: TREASURY_TRANSACTION_PAYLOAD_TYPE,
            input: TreasuryInputDto {
                kind: 1,
                milestone_id: transaction.input.milestone_id.to_hex(),
            },
            output: TreasuryOutputDto {
                kind: 2,
                amount: transaction.output.amount,
            },
        }
    }
}

// ── DTO → Core ───────────────────────────────────────────────────────────

impl TryFrom<&MessageDto> for Message {
    type Error = ClientError;

    fn try_from(dto: &MessageDto) -> Result<Self, Self::Error> {
        let mut parents = Vec::with_capacity(dto.parent_message_ids.len());
        for parent in &dto.parent_message_ids {
            parents.push(MessageId::from_bytes(hex_to_array("parent message ID", parent)?));
        }
        Ok(Self {
            network_id: parse_u64("networkId", &dto.network_id)?,
            parents,
            payload: dto.payload.as_ref().map(Payload::try_from).transpose()?,
            nonce: parse_u64("nonce", &dto.nonce)?,
        })
    }
}

impl TryFrom<&PayloadDto> for Payload {
    type Error = ClientError;

    fn try_from(dto: &PayloadDto) -> Result<Self, Self::Error> {
        Ok(match dto {
            PayloadDto::Transaction(dto) => Payload::Transaction(Box::new(dto.try_into()?)),
            PayloadDto::Milestone(dto) => Payload::Milestone(Box::new(dto.try_into()?)),
            PayloadDto::Indexation(dto) => Payload::Indexation(dto.try_into()?),
            PayloadDto::Receipt(dto) => Payload::Receipt(Box::new(dto.try_into()?)),
            PayloadDto::TreasuryTransaction(dto) => Payload::TreasuryTransaction(dto.try_into()?),
        })
    }
}

impl TryFrom<&TransactionPayloadDto> for Transaction {
    type Error = ClientError;

    fn try_from(dto: &TransactionPayloadDto) -> Result<Self, Self::Error> {
        let mut unlock_blocks = Vec::with_capacity(dto.unlock_blocks.len());
        for block in &dto.unlock_blocks {
            unlock_blocks.push(block.try_into()?);
        }
        Ok(Self {
            essence: (&dto.essence).try_into()?,
            unlock_blocks,
        })
    }
}

impl TryFrom<&TransactionEssenceDto> for TransactionEssence {
    type Error = ClientError;

    fn try_from(dto: &TransactionEssenceDto) -> Result<Self, Self::Error> {
        let mut inputs = Vec::with_capacity(dto.inputs.len());
        for input in &dto.inputs {
            inputs.push(input.try_into()?);
        }
        let mut outputs = Vec::with_capacity(dto.outputs.len());
        for output in &dto.outputs {
            outputs.push(output.try_into()?);
        }
        Ok(Self {
            inputs,
            outputs,
            payload: dto
                .payload
                .as_ref()
                .map(|payload| Indexation::try_from(payload).map(Payload::Indexation))
                .transpose()?,
        })
    }
}

impl TryFrom<&UtxoInputDto> for UtxoInput {
    type Error = ClientError;

    fn try_from(dto: &UtxoInputDto) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_id: TransactionId::from_bytes(hex_to_array(
                "transactionId",
                &dto.transaction_id,
            )?),
            output_index: dto.transaction_output_index,
        })
    }
}

impl TryFrom<&OutputDto> for Output {
    type Error = ClientError;

    fn try_from(dto: &OutputDto) -> Result<Self, Self::Error> {
        Ok(match dto {
            OutputDto::SigLockedSingle(dto) => Output::SigLockedSingle(SigLockedSingleOutput {
                address: (&dto.address).try_into()?,
                amount: dto.amount,
            }),
            OutputDto::SigLockedDustAllowance(dto) => {
                Output::SigLockedDustAllowance(SigLockedDustAllowanceOutput {
                    address: (&dto.address).try_into()?,
                    amount: dto.amount,
                })
            }
            OutputDto::Treasury(dto) => Output::Treasury(TreasuryOutput { amount: dto.amount }),
        })
    }
}

impl TryFrom<&AddressDto> for Address {
    type Error = ClientError;

    fn try_from(dto: &AddressDto) -> Result<Self, Self::Error> {
        if dto.kind != 0 {
            return Err(ClientError::Dto(format!(
                "unknown address type {}",
                dto.kind
            )));
        }
        Ok(Address::Ed25519(Ed25519Address::from_bytes(hex_to_array(
            "address",
            &dto.address,
        )?)))
    }
}

impl TryFrom<&UnlockBlockDto> for UnlockBlock {
    type Error = ClientError;

    fn try_from(dto: &UnlockBlockDto) -> Result<Self, Self::Error> {
        Ok(match dto {
            UnlockBlockDto::Signature(dto) => {
                if dto.signature.kind != 0 {
                    return Err(ClientError::Dto(format!(
                        "unknown signature type {}",
                        dto.signature.kind
                    )));
                }
                UnlockBlock::Signature(SignatureUnlockBlock::new(Signature::Ed25519(
                    Ed25519Signature::new(
                        hex_to_array("publicKey", &dto.signature.public_key)?,
                        hex_to_array("signature", &dto.signature.signature)?,
                    ),
                )))
            }
            UnlockBlockDto::Reference(dto) => {
                UnlockBlock::Reference(ReferenceUnlockBlock::new(dto.reference))
            }
        })
    }
}

impl TryFrom<&MilestonePayloadDto> for Milestone {
    type Error = ClientError;

    fn try_from(dto: &MilestonePayloadDto) -> Result<Self, Self::Error> {
        let mut parents = Vec::with_capacity(dto.parent_message_ids.len());
        for parent in &dto.parent_message_ids {
            parents.push(MessageId::from_bytes(hex_to_array("parent message ID", parent)?));
        }
        let mut public_keys = Vec::with_capacity(dto.public_keys.len());
        for public_key in &dto.public_keys {
            public_keys.push(hex_to_array("public key", public_key)?);
        }
        let mut signatures = Vec::with_capacity(dto.signatures.len());
        for signature in &dto.signatures {
            signatures.push(hex_to_array("signature", signature)?);
        }
        Ok(Self {
            index: dto.index,
            timestamp: dto.timestamp,
            parents,
            inclusion_merkle_proof: hex_to_array(
                "inclusionMerkleProof",
                &dto.inclusion_merkle_proof,
            )?,
            public_keys,
            receipt: dto.receipt.as_ref().map(Receipt::try_from).transpose()?,
            signatures,
        })
    }
}

impl TryFrom<&IndexationPayloadDto> for Indexation {
    type Error = ClientError;

    fn try_from(dto: &IndexationPayloadDto) -> Result<Self, Self::Error> {
        Ok(Self {
            index: hex::decode(&dto.index)?,
            data: hex::decode(&dto.data)?,
        })
    }
}

impl TryFrom<&ReceiptPayloadDto> for Receipt {
    type Error = ClientError;

    fn try_from(dto: &ReceiptPayloadDto) -> Result<Self, Self::Error> {
        let mut funds = Vec::with_capacity(dto.funds.len());
        for entry in &dto.funds {
            funds.push(entry.try_into()?);
        }
        Ok(Self {
            migrated_at: dto.migrated_at,
            is_final: dto.is_final,
            funds,
            transaction: (&dto.transaction).try_into()?,
        })
    }
}

impl TryFrom<&MigratedFundsEntryDto> for MigratedFundsEntry {
    type Error = ClientError;

    fn try_from(dto: &MigratedFundsEntryDto) -> Result<Self, Self::Error> {
        Ok(Self {
            tail_transaction_hash: hex_to_array(
                "tailTransactionHash",
                &dto.tail_transaction_hash,
            )?,
            address: (&dto.address).try_into()?,
            deposit: dto.deposit,
        })
    }
}

impl TryFrom<&TreasuryTransactionPayloadDto> for TreasuryTransaction {
    type Error = ClientError;

    fn try_from(dto: &TreasuryTransactionPayloadDto) -> Result<Self, Self::Error> {
        Ok(Self {
            input: TreasuryInput::new(MilestoneId::from_bytes(hex_to_array(
                "milestoneId",
                &dto.input.milestone_id,
            )?)),
            output: TreasuryOutput::new(dto.output.amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanglekit_core::{Mode, WireFormat};

    fn sample_message() -> Message {
        Message {
            network_id: 7_436_434_947_536_399_255,
            parents: vec![
                MessageId::from_bytes([0x11; 32]),
                MessageId::from_bytes([0x22; 32]),
            ],
            payload: Some(Payload::Indexation(
                Indexation::new(b"dto".to_vec(), vec![0xCA, 0xFE]).unwrap(),
            )),
            nonce: u64::MAX,
        }
    }

    #[test]
    fn test_message_dto_roundtrip() {
        let message = sample_message();
        let dto = MessageDto::from(&message);
        assert_eq!(dto.network_id, message.network_id.to_string());
        assert_eq!(dto.nonce, "18446744073709551615");

        let back = Message::try_from(&dto).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_json_discriminators() {
        let message = sample_message();
        let json = serde_json::to_value(MessageDto::from(&message)).unwrap();
        assert_eq!(json["payload"]["type"], 2);
        assert_eq!(json["payload"]["index"], "64746f");

        let parsed: MessageDto = serde_json::from_value(json).unwrap();
        assert_eq!(Message::try_from(&parsed).unwrap(), message);
    }

    #[test]
    fn test_transaction_dto_roundtrip() {
        use tanglekit_core::{Ed25519Signature, SignatureUnlockBlock};

        let transaction = Transaction {
            essence: TransactionEssence {
                inputs: vec![UtxoInput::new(TransactionId::from_bytes([0x01; 32]), 3)],
                outputs: vec![Output::SigLockedSingle(SigLockedSingleOutput::new(
                    Address::Ed25519(Ed25519Address::from_bytes([0x02; 32])),
                    999,
                ))],
                payload: None,
            },
            unlock_blocks: vec![UnlockBlock::Signature(SignatureUnlockBlock::new(
                Signature::Ed25519(Ed25519Signature::new([0x03; 32], [0x04; 64])),
            ))],
        };
        let dto = TransactionPayloadDto::from(&transaction);
        let back = Transaction::try_from(&dto).unwrap();
        assert_eq!(back, transaction);

        // The JSON form and the wire form describe the same entity.
        let wire = transaction.to_bytes(Mode::Validate).unwrap();
        assert_eq!(back.to_bytes(Mode::Validate).unwrap(), wire);
    }

    #[test]
    fn test_bad_hex_rejected() {
        let dto = MessageDto {
            network_id: "1".to_string(),
            parent_message_ids: vec!["zz".to_string()],
            payload: None,
            nonce: "0".to_string(),
        };
        assert!(matches!(
            Message::try_from(&dto),
            Err(ClientError::Hex(_))
        ));
    }

    #[test]
    fn test_wrong_length_hex_rejected() {
        let dto = MessageDto {
            network_id: "1".to_string(),
            parent_message_ids: vec!["aabb".to_string()],
            payload: None,
            nonce: "0".to_string(),
        };
        assert!(matches!(Message::try_from(&dto), Err(ClientError::Dto(_))));
    }

    #[test]
    fn test_unknown_payload_type_in_json_rejected() {
        let json = serde_json::json!({ "type": 9 });
        assert!(serde_json::from_value::<PayloadDto>(json).is_err());
    }

    #[test]
    fn test_non_decimal_nonce_rejected() {
        let dto = MessageDto {
            network_id: "1".to_string(),
            parent_message_ids: vec![],
            payload: None,
            nonce: "0x10".to_string(),
        };
        assert!(matches!(Message::try_from(&dto), Err(ClientError::Dto(_))));
    }
}
