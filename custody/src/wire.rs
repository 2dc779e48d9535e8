//! Transaction <-> base64 wire encoding used by the signing endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use solana_sdk::packet::PACKET_DATA_SIZE;
use solana_sdk::sanitize::Sanitize;
use solana_sdk::transaction::Transaction;

use crate::error::{CustodyError, Result};

/// Check that a transaction is structurally sound: the message sanitizes and
/// there is exactly one signature slot per required signer. Slots may still
/// hold default (unsigned) signatures.
pub fn check_transaction(tx: &Transaction) -> Result<()> {
    tx.sanitize()
        .map_err(|e| CustodyError::InvalidInput(format!("malformed transaction: {e}")))?;
    let required = tx.message.header.num_required_signatures as usize;
    if tx.signatures.len() != required {
        return Err(CustodyError::InvalidInput(format!(
            "transaction has {} signature slots, message requires {required}",
            tx.signatures.len()
        )));
    }
    Ok(())
}

/// Serialize a transaction to base64 wire bytes without verifying signatures.
pub fn encode_transaction(tx: &Transaction) -> Result<String> {
    check_transaction(tx)?;
    let bytes = bincode::serialize(tx)?;
    if bytes.len() > PACKET_DATA_SIZE {
        return Err(CustodyError::InvalidInput(format!(
            "transaction is {} bytes, limit is {PACKET_DATA_SIZE}",
            bytes.len()
        )));
    }
    Ok(STANDARD.encode(bytes))
}

/// Decode a base64 wire transaction.
pub fn decode_transaction(encoded: &str) -> Result<Transaction> {
    let bytes = STANDARD.decode(encoded.trim())?;
    let tx: Transaction = bincode::deserialize(&bytes)?;
    check_transaction(&tx)?;
    Ok(tx)
}
