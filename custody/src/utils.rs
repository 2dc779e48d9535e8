use solana_sdk::signature::Keypair;
use solana_sdk::signer::keypair::keypair_from_seed;

use crate::error::{CustodyError, Result};

/// Parse a private key from a bs58 string.
///
/// Accepts either a 32-byte secret or a 64-byte keypair (secret followed by
/// public key).
pub fn keypair_from_private_key(key: &str) -> Result<Keypair> {
    let bytes = bs58::decode(key.trim())
        .into_vec()
        .map_err(|e| CustodyError::Validation(format!("bs58 decode error: {e}")))?;

    match bytes.len() {
        64 => Keypair::from_bytes(&bytes)
            .map_err(|e| CustodyError::Validation(format!("invalid keypair: {e}"))),
        32 => keypair_from_seed(&bytes)
            .map_err(|e| CustodyError::Validation(format!("invalid secret key: {e}"))),
        n => Err(CustodyError::Validation(format!(
            "unexpected key length: {n}"
        ))),
    }
}

/// Shorten a base58 address to `ABCD...WXYZ` for display.
pub fn abbreviate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    // ---- keypair_from_private_key ----

    #[test]
    fn test_keypair_from_private_key_64_bytes() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let parsed = keypair_from_private_key(&encoded).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_keypair_from_private_key_32_bytes() {
        let keypair = Keypair::new();
        let secret = &keypair.to_bytes()[..32];
        let encoded = bs58::encode(secret).into_string();
        let parsed = keypair_from_private_key(&encoded).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_keypair_from_private_key_bad_length() {
        let bad = bs58::encode(&[0u8; 16]).into_string();
        assert!(keypair_from_private_key(&bad).is_err());
    }

    #[test]
    fn test_keypair_from_private_key_invalid_bs58() {
        assert!(keypair_from_private_key("!!!invalid!!!").is_err());
    }

    // ---- abbreviate_address ----

    #[test]
    fn test_abbreviate_address() {
        assert_eq!(
            abbreviate_address("9n4nbM75f5Ui33ZbPYXn59EwSgE8CGsHtAeTH5YFeJ9E"),
            "9n4n...eJ9E"
        );
        assert_eq!(abbreviate_address("short"), "short");
    }
}
