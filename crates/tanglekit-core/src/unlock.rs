//! Unlock blocks: the proofs satisfying the spending conditions of inputs.

use std::collections::HashMap;

use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::signature::Signature;

/// Wire tag of a signature unlock block.
pub const SIGNATURE_UNLOCK_BLOCK_TYPE: u8 = 0;

/// Wire tag of a reference unlock block.
pub const REFERENCE_UNLOCK_BLOCK_TYPE: u8 = 1;

/// Unlocks an input with a direct signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureUnlockBlock {
    pub signature: Signature,
}

impl SignatureUnlockBlock {
    pub fn new(signature: Signature) -> Self {
        Self { signature }
    }
}

/// Unlocks an input by pointing at an earlier signature unlock block in the
/// same transaction.
///
/// The reference is only checkable with its siblings in view, which is why
/// validation happens in [`validate_unlock_blocks`] rather than here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceUnlockBlock {
    pub reference: u16,
}

impl ReferenceUnlockBlock {
    pub fn new(reference: u16) -> Self {
        Self { reference }
    }
}

/// An unlock block of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockBlock {
    Signature(SignatureUnlockBlock),
    Reference(ReferenceUnlockBlock),
}

impl UnlockBlock {
    /// The wire tag of this unlock block.
    pub fn kind(&self) -> u8 {
        match self {
            UnlockBlock::Signature(_) => SIGNATURE_UNLOCK_BLOCK_TYPE,
            UnlockBlock::Reference(_) => REFERENCE_UNLOCK_BLOCK_TYPE,
        }
    }
}

impl From<SignatureUnlockBlock> for UnlockBlock {
    fn from(block: SignatureUnlockBlock) -> Self {
        UnlockBlock::Signature(block)
    }
}

impl From<ReferenceUnlockBlock> for UnlockBlock {
    fn from(block: ReferenceUnlockBlock) -> Self {
        UnlockBlock::Reference(block)
    }
}

impl WireFormat for UnlockBlock {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        match reader.read_u8()? {
            SIGNATURE_UNLOCK_BLOCK_TYPE => Ok(UnlockBlock::Signature(SignatureUnlockBlock {
                signature: Signature::read_from(reader, mode)?,
            })),
            REFERENCE_UNLOCK_BLOCK_TYPE => Ok(UnlockBlock::Reference(ReferenceUnlockBlock {
                reference: reader.read_u16()?,
            })),
            tag => Err(Error::UnknownUnlockBlockType(tag)),
        }
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        writer.write_u8(self.kind());
        match self {
            UnlockBlock::Signature(block) => block.signature.write_to(writer, mode),
            UnlockBlock::Reference(block) => {
                writer.write_u16(block.reference);
                Ok(())
            }
        }
    }
}

/// Validates an unlock block list in the context of its transaction.
///
/// Rules:
/// - the list holds exactly one block per input;
/// - signature unlock blocks carry pairwise distinct public keys;
/// - a reference unlock block at position i points at some j < i which is
///   itself a signature unlock block.
pub fn validate_unlock_blocks(blocks: &[UnlockBlock], input_count: usize) -> Result<(), Error> {
    if blocks.len() != input_count {
        return Err(Error::UnlockBlocksValidation(format!(
            "{} unlock blocks for {} inputs",
            blocks.len(),
            input_count
        )));
    }

    let mut seen_keys: HashMap<[u8; 32], usize> = HashMap::new();
    for (pos, block) in blocks.iter().enumerate() {
        match block {
            UnlockBlock::Signature(sig_block) => {
                let Signature::Ed25519(signature) = sig_block.signature;
                if let Some(prev) = seen_keys.insert(signature.public_key, pos) {
                    return Err(Error::UnlockBlocksValidation(format!(
                        "signature unlock blocks at positions {prev} and {pos} share a public key"
                    )));
                }
            }
            UnlockBlock::Reference(ref_block) => {
                let target = ref_block.reference as usize;
                if target >= pos {
                    return Err(Error::UnlockBlocksValidation(format!(
                        "reference unlock block at position {pos} points forward to {target}"
                    )));
                }
                if !matches!(blocks[target], UnlockBlock::Signature(_)) {
                    return Err(Error::UnlockBlocksValidation(format!(
                        "reference unlock block at position {pos} points at a non-signature block"
                    )));
                }
            }
        }
    }
    Ok(())
}
