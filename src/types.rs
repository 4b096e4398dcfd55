//! Shared types returned by the instruction assemblers.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::instruction::AccountMeta;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;

use crate::error::{Result, RwaSdkError};
use crate::pda;

/// Instructions ready to be packed into a transaction, plus any ephemeral
/// signers the caller must co-sign with (e.g. a fresh mint keypair).
#[derive(Debug)]
pub struct IxReturn {
    pub instructions: Vec<solana_sdk::instruction::Instruction>,
    pub signers: Vec<Keypair>,
}

/// Probe result for a token account that may not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAccountState {
    Missing,
    Exists { requires_memo: bool },
}

/// Prefix an 8-byte instruction tag to a borsh-encoded argument payload.
pub(crate) fn anchor_ix_data<T: BorshSerialize>(tag: [u8; 8], args: &T) -> Result<Vec<u8>> {
    let mut data = tag.to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

/// Check an account's 8-byte tag and decode the payload behind it. Trailing
/// bytes are allowed; accounts carry realloc padding.
pub(crate) fn decode_anchor_account<T: BorshDeserialize>(tag: [u8; 8], data: &[u8]) -> Result<T> {
    if data.len() < 8 || data[..8] != tag {
        return Err(RwaSdkError::InvalidAccountData(
            "account tag mismatch".to_string(),
        ));
    }
    let mut payload = &data[8..];
    T::deserialize(&mut payload).map_err(|e| RwaSdkError::InvalidAccountData(e.to_string()))
}

/// Event authority and program accounts appended at the tail of instructions
/// that emit CPI events.
pub(crate) fn event_cpi_accounts(program_id: &Pubkey) -> [AccountMeta; 2] {
    [
        AccountMeta::new_readonly(pda::event_authority_pda(program_id), false),
        AccountMeta::new_readonly(*program_id, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ix_data_is_tag_then_payload() {
        let data = anchor_ix_data([1, 2, 3, 4, 5, 6, 7, 8], &42u64).unwrap();
        assert_eq!(&data[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&data[8..], &42u64.to_le_bytes());
    }
}
