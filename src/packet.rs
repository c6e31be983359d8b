// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Provisioning communication packets.
//!
//! A packet wraps an encoded record for transport to the device:
//!
//! ```text
//! offset 0:     8 bytes  - token, `mbedprov` as a little-endian u64
//! offset 8:     4 bytes  - payload length, little-endian u32
//! offset 12:    N bytes  - payload
//! offset 12+N:  32 bytes - SHA-256 of the payload
//! ```
//!
//! [`Packet::frame()`] produces a consistent packet; the `override_*`
//! functions then break it field by field. Nothing here rejects an
//! inconsistent packet: [`Packet::inspect()`] only reports on one.

use core::convert::TryFrom as _;

use crate::crypto::hash;
use crate::crypto::hash::EngineExt as _;
use crate::io;
use crate::io::Read as _;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The packet token, the ASCII string `mbedprov` read as a little-endian
/// integer.
pub const TOKEN: u64 = 0x766f_7270_6465_626d;

/// The length of the token and length fields.
pub const HEADER_LEN: usize = 12;

/// The length of a well-formed signature.
pub const SIGNATURE_LEN: usize = hash::SHA256_LEN;

/// An error from building or parsing a packet.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates a payload whose length does not fit in the length field.
    PayloadTooLarge,

    /// Indicates a serialized packet too short to hold a header.
    Truncated,

    /// Indicates a failure in the hashing engine.
    Hash(hash::Error),

    /// Indicates a failure writing the packet out.
    Io(io::Error),
}

impl From<hash::Error> for Error {
    fn from(e: hash::Error) -> Self {
        Self::Hash(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// A communication packet, possibly inconsistent.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Packet {
    token: u64,
    length: u32,
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl Packet {
    /// Frames `payload`, setting every other field to match it.
    pub fn frame<E: hash::Engine + ?Sized>(
        payload: impl Into<Vec<u8>>,
        engine: &mut E,
    ) -> Result<Self, Error> {
        let payload = payload.into();
        let length = match u32::try_from(payload.len()) {
            Ok(len) => len,
            Err(_) => return fail!(Error::PayloadTooLarge),
        };
        let signature = engine.sha256(&payload)?.to_vec();
        trace!("framed {}-byte payload", length);

        Ok(Self {
            token: TOKEN,
            length,
            payload,
            signature,
        })
    }

    /// Replaces the token.
    pub fn override_token(&mut self, token: u64) -> &mut Self {
        self.token = token;
        self
    }

    /// Replaces the length field, leaving the payload alone.
    pub fn override_length(&mut self, length: u32) -> &mut Self {
        self.length = length;
        self
    }

    /// Replaces the payload, leaving the length and signature alone.
    pub fn override_payload(&mut self, payload: impl Into<Vec<u8>>) -> &mut Self {
        self.payload = payload.into();
        self
    }

    /// Replaces the signature, which need not be 32 bytes long.
    pub fn override_signature(
        &mut self,
        signature: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.signature = signature.into();
        self
    }

    /// Returns the token.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Returns the length field.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the signature.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Returns the serialized length of this packet.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.payload.len() + self.signature.len()
    }

    /// Serializes this packet to `w`.
    pub fn write_to(&self, mut w: impl io::Write) -> Result<(), Error> {
        w.write_le(self.token)?;
        w.write_le(self.length)?;
        w.write_bytes(&self.payload)?;
        w.write_bytes(&self.signature)?;
        Ok(())
    }

    /// Serializes this packet into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        // Writes to a `Vec` only fail on allocation failure, which aborts.
        let _ = self.write_to(&mut out);
        out
    }

    /// Splits a serialized packet into its fields.
    ///
    /// The signature is the trailing [`SIGNATURE_LEN`] bytes and the payload
    /// is everything between the header and the signature, whatever the
    /// length field claims. Input too short to hold a full signature after
    /// the header parses as an empty payload and a short signature.
    pub fn parse(mut bytes: &[u8]) -> Result<Self, Error> {
        check!(bytes.len() >= HEADER_LEN, Error::Truncated);
        let token = bytes.read_le::<u64>()?;
        let length = bytes.read_le::<u32>()?;

        let payload_len = bytes.remaining_data().saturating_sub(SIGNATURE_LEN);
        if payload_len != length as usize {
            warn!(
                "packet claims {} payload bytes, {} present",
                length, payload_len
            );
        }

        let mut payload = vec![0; payload_len];
        bytes.read_bytes(&mut payload)?;
        Ok(Self {
            token,
            length,
            payload,
            signature: bytes.to_vec(),
        })
    }

    /// Checks which of the packet's invariants hold.
    pub fn inspect<E: hash::Engine + ?Sized>(
        &self,
        engine: &mut E,
    ) -> Result<Inspection, Error> {
        let digest = engine.sha256(&self.payload)?;
        Ok(Inspection {
            token: self.token,
            length: self.length,
            payload_len: self.payload.len(),
            signature_len: self.signature.len(),
            token_ok: self.token == TOKEN,
            length_ok: self.length as usize == self.payload.len(),
            signature_ok: self.signature == digest,
        })
    }
}

/// A report on a packet's consistency, from [`Packet::inspect()`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Inspection {
    /// The token field.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::serde::se_hex"))]
    pub token: u64,
    /// The length field.
    pub length: u32,
    /// The number of payload bytes actually present.
    pub payload_len: usize,
    /// The number of signature bytes actually present.
    pub signature_len: usize,
    /// Whether the token is [`TOKEN`].
    pub token_ok: bool,
    /// Whether the length field matches the payload.
    pub length_ok: bool,
    /// Whether the signature is the SHA-256 of the payload.
    pub signature_ok: bool,
}

impl Inspection {
    /// Returns whether every invariant holds.
    pub fn is_valid(&self) -> bool {
        self.token_ok && self.length_ok && self.signature_ok
    }
}

#[cfg(all(test, feature = "ring"))]
mod test {
    use super::*;
    use crate::crypto::ring;
    use pretty_assertions::assert_eq;

    #[test]
    fn fifty_byte_payload() {
        let mut e = ring::hash::Engine::new();
        let payload = vec![0x5a; 50];
        let packet = Packet::frame(payload.clone(), &mut e).unwrap();
        let bytes = packet.to_bytes();

        assert_eq!(bytes.len(), 8 + 4 + 50 + 32);
        assert_eq!(packet.encoded_len(), bytes.len());
        assert_eq!(&bytes[..8], b"mbedprov");
        assert_eq!(&bytes[8..12], &[50, 0, 0, 0]);
        assert_eq!(&bytes[12..62], &payload[..]);
        assert_eq!(&bytes[62..], &e.sha256(&payload).unwrap()[..]);

        let report = packet.inspect(&mut e).unwrap();
        assert!(report.is_valid());
        assert_eq!(Packet::parse(&bytes), Ok(packet));
    }

    #[test]
    fn overrides_leave_other_fields() {
        let mut e = ring::hash::Engine::new();
        let payload = vec![0xa5; 100];
        let framed = Packet::frame(payload.clone(), &mut e).unwrap();

        let mut short = framed.clone();
        short.override_length(10);
        assert_eq!(short.payload(), &payload[..]);
        assert_eq!(short.signature(), framed.signature());
        let report = short.inspect(&mut e).unwrap();
        assert!(report.token_ok && report.signature_ok);
        assert!(!report.length_ok);

        let mut long = framed.clone();
        long.override_payload(&b"0x452345"[..]).override_length(2);
        assert_eq!(long.to_bytes().len(), 12 + 8 + 32);
        let report = long.inspect(&mut e).unwrap();
        assert!(!report.length_ok && !report.signature_ok);

        let mut forged = framed.clone();
        forged.override_signature(&b"3423445452"[..]).override_token(0);
        let report = forged.inspect(&mut e).unwrap();
        assert!(report.length_ok);
        assert!(!report.token_ok && !report.signature_ok);
        assert_eq!(forged.encoded_len(), 12 + 100 + 10);
    }

    #[test]
    fn parse_inconsistent() {
        let mut e = ring::hash::Engine::new();
        let payload = vec![0xa5; 100];
        let mut packet = Packet::frame(payload.clone(), &mut e).unwrap();

        packet.override_length(10);
        let parsed = Packet::parse(&packet.to_bytes()).unwrap();
        assert_eq!(parsed, packet);
        assert_eq!(parsed.length(), 10);
        assert_eq!(parsed.payload(), &payload[..]);
        let report = parsed.inspect(&mut e).unwrap();
        assert!(report.token_ok && report.signature_ok);
        assert!(!report.length_ok);
        assert_eq!(report.payload_len, 100);

        packet.override_length(1000);
        let parsed = Packet::parse(&packet.to_bytes()).unwrap();
        assert_eq!(parsed.payload(), &payload[..]);
        assert!(!parsed.inspect(&mut e).unwrap().length_ok);

        packet.override_length(100).override_signature(&b"short"[..]);
        let parsed = Packet::parse(&packet.to_bytes()).unwrap();
        assert_eq!(parsed.payload().len(), 100 + 5 - SIGNATURE_LEN);
        assert_eq!(parsed.signature().len(), SIGNATURE_LEN);
        let report = parsed.inspect(&mut e).unwrap();
        assert!(!report.length_ok && !report.signature_ok);

        let tiny = Packet::parse(b"mbedprov\x00\x00\x00\x00abc").unwrap();
        assert!(tiny.payload().is_empty());
        assert_eq!(tiny.signature(), b"abc");
        assert_eq!(tiny.to_bytes(), b"mbedprov\x00\x00\x00\x00abc");

        assert_eq!(Packet::parse(&[0; 11]), Err(Error::Truncated));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn inspection_json() {
        let mut e = ring::hash::Engine::new();
        let packet = Packet::frame(vec![], &mut e).unwrap();
        let json = serde_json::to_value(&packet.inspect(&mut e).unwrap()).unwrap();
        assert_eq!(json["token"], "0x766f72706465626d");
        assert_eq!(json["length"], 0);
        assert_eq!(json["signature_ok"], true);
    }
}
