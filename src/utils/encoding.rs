//! Decoding of the data payload attached to token transfers

use crate::types::*;

/// Widest payload accepted, matching a 256-bit word
pub const MAX_PAYLOAD_BYTES: usize = 32;

/// Interpret `data` as a big-endian unsigned integer.
///
/// Payloads longer than a 256-bit word are rejected, as are values that do not
/// fit in 128 bits.
pub fn bytes_to_uint(data: &[u8]) -> BankResult<u128> {
    if data.is_empty() {
        return Err(BankError::InvalidParameters(
            "Transfer payload is empty".to_string(),
        ));
    }

    if data.len() > MAX_PAYLOAD_BYTES {
        return Err(BankError::InvalidParameters(format!(
            "Transfer payload is {} bytes, at most {} allowed",
            data.len(),
            MAX_PAYLOAD_BYTES
        )));
    }

    data.iter().try_fold(0u128, |acc, byte| {
        acc.checked_mul(256)
            .and_then(|shifted| shifted.checked_add(u128::from(*byte)))
            .ok_or_else(|| {
                BankError::InvalidParameters("Transfer payload value overflows".to_string())
            })
    })
}

/// Lock duration in months carried by a deposit transfer payload
pub fn months_from_payload(data: &[u8]) -> BankResult<u32> {
    let value = bytes_to_uint(data)?;
    u32::try_from(value).map_err(|_| {
        BankError::InvalidParameters(format!("Lock duration {} months is out of range", value))
    })
}

/// Decode a web3-style hex string such as `0x1` or `0x0c`
pub fn decode_hex_payload(payload: &str) -> BankResult<Vec<u8>> {
    let digits = payload
        .strip_prefix("0x")
        .or_else(|| payload.strip_prefix("0X"))
        .unwrap_or(payload);

    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    hex::decode(padded)
        .map_err(|e| BankError::InvalidParameters(format!("Invalid hex payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_uint_is_big_endian() {
        assert_eq!(bytes_to_uint(&[0x01]).unwrap(), 1);
        assert_eq!(bytes_to_uint(&[0x01, 0x00]).unwrap(), 256);
        assert_eq!(bytes_to_uint(&[0x00, 0x00, 0x0c]).unwrap(), 12);

        let mut word = [0u8; 32];
        word[31] = 36;
        assert_eq!(bytes_to_uint(&word).unwrap(), 36);
    }

    #[test]
    fn test_bytes_to_uint_rejects_bad_payloads() {
        assert!(bytes_to_uint(&[]).is_err());
        assert!(bytes_to_uint(&[0u8; 33]).is_err());

        let mut too_wide = [0u8; 32];
        too_wide[15] = 1;
        assert!(bytes_to_uint(&too_wide).is_err());
    }

    #[test]
    fn test_months_from_payload() {
        assert_eq!(months_from_payload(&[0x01]).unwrap(), 1);
        assert!(months_from_payload(&[0x01, 0x00, 0x00, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_decode_hex_payload() {
        assert_eq!(decode_hex_payload("0x1").unwrap(), vec![0x01]);
        assert_eq!(decode_hex_payload("0x0c").unwrap(), vec![0x0c]);
        assert_eq!(decode_hex_payload("0100").unwrap(), vec![0x01, 0x00]);
        assert!(decode_hex_payload("0xzz").is_err());
    }
}
