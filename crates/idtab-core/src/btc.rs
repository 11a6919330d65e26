//! # Bitcoin Address Decoding
//!
//! Cryptocurrency chain links bind an identity to a bitcoin address. The
//! classifier only accepts the binding when the address decodes: valid
//! base58, 25 bytes, a double-SHA-256 checksum that matches, and a version
//! byte that is P2PKH or P2SH on the configured network.
//!
//! Decoding sits behind `AddressDecoder` so callers can substitute a
//! stricter or network-aware implementation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AddressError;

const DECODED_LEN: usize = 25;
const CHECKSUM_LEN: usize = 4;

/// Which bitcoin network addresses are checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
}

impl BitcoinNetwork {
    /// Version bytes accepted on this network (P2PKH, P2SH).
    pub fn versions(self) -> [u8; 2] {
        match self {
            Self::Mainnet => [0x00, 0x05],
            Self::Testnet => [0x6f, 0xc4],
        }
    }
}

impl std::fmt::Display for BitcoinNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        })
    }
}

impl std::str::FromStr for BitcoinNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            other => Err(format!("unknown bitcoin network {other:?}")),
        }
    }
}

/// Result of decoding an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Version byte.
    pub version: u8,
    /// 20-byte public-key (or script) hash.
    pub pkhash: Vec<u8>,
}

/// Decodes and checksums a cryptocurrency address.
pub trait AddressDecoder: Send + Sync {
    /// Decode `address` for `network`.
    fn decode(
        &self,
        address: &str,
        network: BitcoinNetwork,
    ) -> Result<DecodedAddress, AddressError>;
}

/// Base58Check decoder for legacy bitcoin addresses.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base58CheckDecoder;

impl AddressDecoder for Base58CheckDecoder {
    fn decode(
        &self,
        address: &str,
        network: BitcoinNetwork,
    ) -> Result<DecodedAddress, AddressError> {
        let raw = bs58::decode(address)
            .into_vec()
            .map_err(|e| AddressError::Base58 {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        if raw.len() != DECODED_LEN {
            return Err(AddressError::BadLength {
                address: address.to_string(),
                len: raw.len(),
            });
        }

        let (body, checksum) = raw.split_at(DECODED_LEN - CHECKSUM_LEN);
        let digest = Sha256::digest(Sha256::digest(body));
        if digest[..CHECKSUM_LEN] != *checksum {
            return Err(AddressError::BadChecksum(address.to_string()));
        }

        let version = body[0];
        if !network.versions().contains(&version) {
            return Err(AddressError::BadVersion {
                address: address.to_string(),
                version,
                network: network.to_string(),
            });
        }

        Ok(DecodedAddress {
            version,
            pkhash: body[1..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_decode_p2pkh_mainnet() {
        let d = Base58CheckDecoder.decode(GENESIS, BitcoinNetwork::Mainnet).unwrap();
        assert_eq!(d.version, 0x00);
        assert_eq!(hex(&d.pkhash), "62e907b15cbf27d5425399ebf6f0fb50ebb88f18");
    }

    #[test]
    fn test_decode_p2sh_mainnet() {
        let d = Base58CheckDecoder
            .decode("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy", BitcoinNetwork::Mainnet)
            .unwrap();
        assert_eq!(d.version, 0x05);
        assert_eq!(d.pkhash.len(), 20);
    }

    #[test]
    fn test_bad_checksum() {
        let err = Base58CheckDecoder
            .decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb", BitcoinNetwork::Mainnet)
            .unwrap_err();
        assert!(matches!(err, AddressError::BadChecksum(_)));
    }

    #[test]
    fn test_bad_base58() {
        let err = Base58CheckDecoder
            .decode("0OIl", BitcoinNetwork::Mainnet)
            .unwrap_err();
        assert!(matches!(err, AddressError::Base58 { .. }));
    }

    #[test]
    fn test_bad_length() {
        let err = Base58CheckDecoder.decode("1111", BitcoinNetwork::Mainnet).unwrap_err();
        assert!(matches!(err, AddressError::BadLength { len: 4, .. }));
    }

    #[test]
    fn test_mainnet_address_rejected_on_testnet() {
        let err = Base58CheckDecoder.decode(GENESIS, BitcoinNetwork::Testnet).unwrap_err();
        assert!(matches!(err, AddressError::BadVersion { version: 0x00, .. }));
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("Mainnet".parse::<BitcoinNetwork>().unwrap(), BitcoinNetwork::Mainnet);
        assert_eq!("test".parse::<BitcoinNetwork>().unwrap(), BitcoinNetwork::Testnet);
        assert!("regtest".parse::<BitcoinNetwork>().is_err());
    }
}
