// rfpoller/src/types.rs
//! Identities and small enums shared by discovery, activation and exchange.

use std::convert::TryFrom;
use std::fmt;

use bitflags::bitflags;

use crate::Error;

/// Contactless technology handled by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    /// NFC-A (ISO14443A)
    A,
    /// NFC-B (ISO14443B)
    B,
    /// NFC-F (FeliCa)
    F,
    /// NFC-V (ISO15693 vicinity)
    V,
}

impl Technology {
    /// Fixed scan order mandated by the activity model: A before B before F
    /// before V, so a multi-technology tag is never enumerated twice.
    pub const SCAN_ORDER: [Technology; 4] =
        [Technology::A, Technology::B, Technology::F, Technology::V];

    /// The discovery-mask flag for this technology.
    pub fn flag(self) -> TechnologyMask {
        match self {
            Technology::A => TechnologyMask::A,
            Technology::B => TechnologyMask::B,
            Technology::F => TechnologyMask::F,
            Technology::V => TechnologyMask::V,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Technology::A => "NFC-A",
            Technology::B => "NFC-B",
            Technology::F => "NFC-F",
            Technology::V => "NFC-V",
        };
        f.write_str(s)
    }
}

bitflags! {
    /// Set of technologies flagged present by one detection pass.
    ///
    /// Produced once per discovery cycle and consumed by collision
    /// resolution in the same cycle; never persisted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TechnologyMask: u8 {
        /// NFC-A device detected
        const A = 0x01;
        /// NFC-B device detected
        const B = 0x02;
        /// NFC-F device detected
        const F = 0x04;
        /// NFC-V device detected
        const V = 0x08;
    }
}

/// Transport interface negotiated by activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfInterface {
    /// Raw RF frames, no higher-layer protocol
    RawRf,
    /// ISO-DEP (ISO14443-4)
    IsoDep,
    /// NFC-DEP (peer-to-peer)
    NfcDep,
}

/// NFC-A sub-type declared during discovery; drives activation branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfcaType {
    /// Type 1 Tag, raw interface
    T1t,
    /// Type 2 Tag, raw interface
    T2t,
    /// Type 4 Tag, ISO-DEP capable
    T4t,
    /// Peer-to-peer capable
    NfcDep,
    /// Both ISO-DEP and peer-to-peer capable; P2P is preferred
    T4tNfcDep,
}

/// Bit rates the driver accepts for technology init and activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitrate {
    /// 212 kbit/s
    Kb212,
    /// 424 kbit/s
    Kb424,
}

/// NFC-A identifier (NFCID1), 4, 7 or 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NfcId1 {
    bytes: [u8; 10],
    len: u8,
}

impl NfcId1 {
    /// Build from a slice; only cascade lengths 4, 7 and 10 are valid.
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        match bytes.len() {
            4 | 7 | 10 => {
                let mut arr = [0u8; 10];
                arr[..bytes.len()].copy_from_slice(bytes);
                Ok(Self {
                    bytes: arr,
                    len: bytes.len() as u8,
                })
            }
            n => Err(Error::InvalidLength {
                expected: 4,
                actual: n,
            }),
        }
    }

    /// The valid identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Identifier length in bytes (4, 7 or 10).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a constructed NFCID1 has at least 4 bytes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Compact hex rendering for logs.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for NfcId1 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

/// NFC-B identifier (NFCID0), 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NfcId0([u8; 4]);

impl NfcId0 {
    /// Build from exactly 4 bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The identifier bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Compact hex rendering for logs.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for NfcId0 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 4 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// NFC-F identifier (NFCID2), 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NfcId2([u8; 8]);

impl NfcId2 {
    /// Build from exactly 8 bytes.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// The identifier bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Compact hex rendering for logs.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for NfcId2 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// NFC-V UID, 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VicinityUid([u8; 8]);

impl VicinityUid {
    /// Build from exactly 8 bytes.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// The UID bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Compact hex rendering for logs.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for VicinityUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_order_is_a_b_f_v() {
        assert_eq!(
            Technology::SCAN_ORDER,
            [Technology::A, Technology::B, Technology::F, Technology::V]
        );
    }

    #[test]
    fn technology_flags_are_distinct() {
        let mut mask = TechnologyMask::empty();
        for tech in Technology::SCAN_ORDER {
            assert!(!mask.contains(tech.flag()));
            mask |= tech.flag();
        }
        assert_eq!(mask, TechnologyMask::all());
    }

    #[test]
    fn nfcid1_valid_lengths() {
        for len in [4usize, 7, 10] {
            let bytes: Vec<u8> = (0..len as u8).collect();
            let id = NfcId1::from_bytes(&bytes).unwrap();
            assert_eq!(id.as_bytes(), &bytes[..]);
            assert_eq!(id.len(), len);
        }
    }

    #[test]
    fn nfcid1_rejects_other_lengths() {
        assert!(NfcId1::from_bytes(&[1, 2, 3]).is_err());
        assert!(NfcId1::from_bytes(&[0; 11]).is_err());
        assert!(NfcId1::from_bytes(&[]).is_err());
    }

    #[test]
    fn nfcid2_try_from() {
        let b = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let id = NfcId2::try_from(&b[..]).unwrap();
        assert_eq!(id.as_bytes(), &b);
        assert!(NfcId2::try_from(&b[..5]).is_err());
    }

    #[test]
    fn vicinity_uid_hex() {
        let uid = VicinityUid::from_bytes([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22]);
        assert_eq!(uid.to_hex(), "aabbccddeeff1122");
    }
}
