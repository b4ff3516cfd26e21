//! Transaction outputs.

use crate::address::Address;
use crate::codec::{Mode, Reader, WireFormat, Writer};
use crate::error::Error;
use crate::{DUST_ALLOWANCE_MIN_AMOUNT, TOKEN_SUPPLY};

/// Wire tag of a signature-locked single output.
pub const SIG_LOCKED_SINGLE_OUTPUT_TYPE: u8 = 0;

/// Wire tag of a signature-locked dust allowance output.
pub const SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE: u8 = 1;

/// Wire tag of a treasury output.
pub const TREASURY_OUTPUT_TYPE: u8 = 2;

/// Deposits an amount onto a single address, unlockable by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigLockedSingleOutput {
    pub address: Address,
    pub amount: u64,
}

impl SigLockedSingleOutput {
    pub fn new(address: Address, amount: u64) -> Self {
        Self { address, amount }
    }

    fn check_amount(&self) -> Result<(), Error> {
        if self.amount == 0 {
            return Err(Error::AmountZero);
        }
        if self.amount > TOKEN_SUPPLY {
            return Err(Error::AmountExceedsSupply(self.amount));
        }
        Ok(())
    }
}

/// Like a single output, but its presence raises the number of dust outputs
/// permitted against its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigLockedDustAllowanceOutput {
    pub address: Address,
    pub amount: u64,
}

impl SigLockedDustAllowanceOutput {
    pub fn new(address: Address, amount: u64) -> Self {
        Self { address, amount }
    }

    fn check_amount(&self) -> Result<(), Error> {
        if self.amount == 0 {
            return Err(Error::AmountZero);
        }
        if self.amount < DUST_ALLOWANCE_MIN_AMOUNT {
            return Err(Error::AmountBelowDustMinimum {
                amount: self.amount,
                min: DUST_ALLOWANCE_MIN_AMOUNT,
            });
        }
        if self.amount > TOKEN_SUPPLY {
            return Err(Error::AmountExceedsSupply(self.amount));
        }
        Ok(())
    }
}

/// Holds the funds residing in the network treasury.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasuryOutput {
    pub amount: u64,
}

impl TreasuryOutput {
    pub fn new(amount: u64) -> Self {
        Self { amount }
    }

    fn check_amount(&self) -> Result<(), Error> {
        if self.amount > TOKEN_SUPPLY {
            return Err(Error::AmountExceedsSupply(self.amount));
        }
        Ok(())
    }
}

/// An output of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    SigLockedSingle(SigLockedSingleOutput),
    SigLockedDustAllowance(SigLockedDustAllowanceOutput),
    Treasury(TreasuryOutput),
}

impl Output {
    /// The wire tag of this output.
    pub fn kind(&self) -> u8 {
        match self {
            Output::SigLockedSingle(_) => SIG_LOCKED_SINGLE_OUTPUT_TYPE,
            Output::SigLockedDustAllowance(_) => SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE,
            Output::Treasury(_) => TREASURY_OUTPUT_TYPE,
        }
    }

    /// The deposited amount.
    pub fn amount(&self) -> u64 {
        match self {
            Output::SigLockedSingle(output) => output.amount,
            Output::SigLockedDustAllowance(output) => output.amount,
            Output::Treasury(output) => output.amount,
        }
    }
}

impl From<SigLockedSingleOutput> for Output {
    fn from(output: SigLockedSingleOutput) -> Self {
        Output::SigLockedSingle(output)
    }
}

impl From<SigLockedDustAllowanceOutput> for Output {
    fn from(output: SigLockedDustAllowanceOutput) -> Self {
        Output::SigLockedDustAllowance(output)
    }
}

impl From<TreasuryOutput> for Output {
    fn from(output: TreasuryOutput) -> Self {
        Output::Treasury(output)
    }
}

impl WireFormat for Output {
    fn read_from(reader: &mut Reader<'_>, mode: Mode) -> Result<Self, Error> {
        let output = match reader.read_u8()? {
            SIG_LOCKED_SINGLE_OUTPUT_TYPE => Output::SigLockedSingle(SigLockedSingleOutput {
                address: Address::read_from(reader, mode)?,
                amount: reader.read_u64()?,
            }),
            SIG_LOCKED_DUST_ALLOWANCE_OUTPUT_TYPE => {
                Output::SigLockedDustAllowance(SigLockedDustAllowanceOutput {
                    address: Address::read_from(reader, mode)?,
                    amount: reader.read_u64()?,
                })
            }
            TREASURY_OUTPUT_TYPE => Output::Treasury(TreasuryOutput {
                amount: reader.read_u64()?,
            }),
            tag => return Err(Error::UnknownOutputType(tag)),
        };
        if mode.validating() {
            output.check_amount()?;
        }
        Ok(output)
    }

    fn write_to(&self, writer: &mut Writer, mode: Mode) -> Result<(), Error> {
        if mode.validating() {
            self.check_amount()?;
        }
        writer.write_u8(self.kind());
        match self {
            Output::SigLockedSingle(output) => {
                output.address.write_to(writer, mode)?;
                writer.write_u64(output.amount);
            }
            Output::SigLockedDustAllowance(output) => {
                output.address.write_to(writer, mode)?;
                writer.write_u64(output.amount);
            }
            Output::Treasury(output) => writer.write_u64(output.amount),
        }
        Ok(())
    }
}

impl Output {
    fn check_amount(&self) -> Result<(), Error> {
        match self {
            Output::SigLockedSingle(output) => output.check_amount(),
            Output::SigLockedDustAllowance(output) => output.check_amount(),
            Output::Treasury(output) => output.check_amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Ed25519Address;

    fn address() -> Address {
        Address::Ed25519(Ed25519Address::from_bytes([0x21; 32]))
    }

    #[test]
    fn test_single_output_roundtrip() {
        let output = Output::SigLockedSingle(SigLockedSingleOutput::new(address(), 1337));
        let bytes = output.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes.len(), 1 + 33 + 8);
        assert_eq!(Output::from_bytes(&bytes, Mode::Validate).unwrap(), output);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let output = Output::SigLockedSingle(SigLockedSingleOutput::new(address(), 0));
        assert!(matches!(
            output.to_bytes(Mode::Validate),
            Err(Error::AmountZero)
        ));
        let bytes = output.to_bytes(Mode::NoValidation).unwrap();
        assert!(matches!(
            Output::from_bytes(&bytes, Mode::Validate),
            Err(Error::AmountZero)
        ));
    }

    #[test]
    fn test_amount_above_supply_rejected() {
        let output = Output::SigLockedSingle(SigLockedSingleOutput::new(address(), TOKEN_SUPPLY + 1));
        assert!(matches!(
            output.to_bytes(Mode::Validate),
            Err(Error::AmountExceedsSupply(_))
        ));
    }

    #[test]
    fn test_dust_allowance_minimum() {
        let low = Output::SigLockedDustAllowance(SigLockedDustAllowanceOutput::new(
            address(),
            DUST_ALLOWANCE_MIN_AMOUNT - 1,
        ));
        assert!(matches!(
            low.to_bytes(Mode::Validate),
            Err(Error::AmountBelowDustMinimum { .. })
        ));

        let ok = Output::SigLockedDustAllowance(SigLockedDustAllowanceOutput::new(
            address(),
            DUST_ALLOWANCE_MIN_AMOUNT,
        ));
        let bytes = ok.to_bytes(Mode::Validate).unwrap();
        assert_eq!(Output::from_bytes(&bytes, Mode::Validate).unwrap(), ok);
    }

    #[test]
    fn test_treasury_output_roundtrip() {
        let output = Output::Treasury(TreasuryOutput::new(0));
        let bytes = output.to_bytes(Mode::Validate).unwrap();
        assert_eq!(bytes.len(), 1 + 8);
        assert_eq!(Output::from_bytes(&bytes, Mode::Validate).unwrap(), output);
    }

    #[test]
    fn test_unknown_output_type_rejected() {
        assert!(matches!(
            Output::from_bytes(&[0x08, 0, 0, 0, 0, 0, 0, 0, 0], Mode::Validate),
            Err(Error::UnknownOutputType(0x08))
        ));
    }
}
