// Copyright (c) 2019 Alain Brenzikofer
// This file is part of Encointer
//
// Encointer is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Encointer is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Encointer.  If not, see <http://www.gnu.org/licenses/>.

//! Public signals of a payment proof.
//!
//! A proof attesting an off-chain payment exposes 26 public signals:
//!
//! | index    | content                                   |
//! |----------|-------------------------------------------|
//! | 0..3     | payer id, packed                          |
//! | 3..6     | payee id, packed                          |
//! | 6..9     | order id, packed                          |
//! | 9..25    | modulus of the attesting key (trust anchor)|
//! | 25       | passed to the verifier only               |
//!
//! Circuits can only expose field elements, so each id is a decimal string whose bytes are
//! packed 7 per signal, least significant byte first.

use crate::{
	numeric::parse_decimal,
	ramp::{OrderIdType, PaymentIdType},
};
use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};
use sp_core::U256;
use sp_std::vec::Vec;

pub const BYTES_PER_CHUNK: usize = 7;
pub const CHUNKS_PER_ID: usize = 3;
/// maximum number of payload bytes a packed id can carry
pub const MAX_ID_BYTES: usize = BYTES_PER_CHUNK * CHUNKS_PER_ID;
pub const ID_SIGNALS_LEN: usize = 3 * CHUNKS_PER_ID;
pub const TRUST_ANCHOR_LEN: usize = 16;
pub const PUBLIC_SIGNALS_LEN: usize = 26;

pub type PackedChunks = [U256; CHUNKS_PER_ID];
pub type PublicSignals = [U256; PUBLIC_SIGNALS_LEN];
pub type TrustAnchor = [U256; TRUST_ANCHOR_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, thiserror::Error)]
pub enum SignalError {
	#[error("public signals do not carry the trusted key")]
	UntrustedKey,
	#[error("proof verification failed")]
	InvalidProof,
	#[error("packed signal is not a single closed run of non-zero bytes")]
	InvalidSignalLayout,
	#[error("packed payload exceeds its maximum length")]
	PayloadTooLong,
	#[error("decimal id does not fit")]
	Overflow,
}

/// Groth16 proof on BN254 as affine coordinates.
///
/// `b` is a G2 point given as `[[x.c0, x.c1], [y.c0, y.c1]]`.
#[derive(
	Encode,
	Decode,
	DecodeWithMemTracking,
	Default,
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	TypeInfo,
	MaxEncodedLen,
)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
pub struct Groth16Proof {
	pub a: [U256; 2],
	pub b: [[U256; 2]; 2],
	pub c: [U256; 2],
}

/// The succinct proof verifier.
pub trait VerifyProof {
	/// Must be free of side effects and deterministic for a given verifying key.
	fn verify(proof: &Groth16Proof, signals: &PublicSignals) -> bool;
}

/// The ids a valid proof attests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedIds {
	pub payer_id: PaymentIdType,
	pub payee_id: PaymentIdType,
	pub order_id: OrderIdType,
}

/// Extract the single contiguous run of non-zero bytes packed into `chunks`.
///
/// The run must be followed by at least one zero byte. Leading zero bytes are allowed.
pub fn decode_packed(chunks: &PackedChunks, max_bytes: usize) -> Result<Vec<u8>, SignalError> {
	let mut payload = Vec::with_capacity(MAX_ID_BYTES);
	// 0: before the run, 1: inside the run, 2: after the run
	let mut state = 0u8;
	for chunk in chunks.iter() {
		for i in 0..BYTES_PER_CHUNK {
			let byte = chunk.byte(i);
			if byte != 0 {
				if state == 2 {
					return Err(SignalError::InvalidSignalLayout);
				}
				payload.push(byte);
				if state % 2 == 0 {
					state += 1;
				}
			} else if state % 2 == 1 {
				state += 1;
			}
		}
	}
	if state != 2 {
		return Err(SignalError::InvalidSignalLayout);
	}
	if payload.len() > max_bytes {
		return Err(SignalError::PayloadTooLong);
	}
	Ok(payload)
}

pub fn decode_packed_id(chunks: &PackedChunks) -> Result<u64, SignalError> {
	decode_packed(chunks, MAX_ID_BYTES).and_then(|payload| parse_decimal(&payload))
}

/// Inverse of [`decode_packed`]. Returns `None` if `bytes` does not fit.
pub fn pack_bytes(bytes: &[u8]) -> Option<PackedChunks> {
	if bytes.len() > MAX_ID_BYTES {
		return None;
	}
	let mut words = [0u64; CHUNKS_PER_ID];
	for (i, byte) in bytes.iter().enumerate() {
		words[i / BYTES_PER_CHUNK] |= u64::from(*byte) << (8 * (i % BYTES_PER_CHUNK));
	}
	Some(words.map(U256::from))
}

/// Pack the decimal representation of `id`.
pub fn pack_id(id: u64) -> PackedChunks {
	let mut digits = [0u8; 20];
	let mut n = id;
	let mut len = 0;
	loop {
		digits[len] = b'0' + (n % 10) as u8;
		n /= 10;
		len += 1;
		if n == 0 {
			break;
		}
	}
	digits[..len].reverse();
	// 20 digits always fit into 21 bytes
	pack_bytes(&digits[..len]).unwrap_or_default()
}

fn id_chunks(signals: &PublicSignals, group: usize) -> PackedChunks {
	let start = group * CHUNKS_PER_ID;
	[signals[start], signals[start + 1], signals[start + 2]]
}

/// Check that the signals were produced under `trust_anchor`, verify the proof and return
/// the attested ids.
///
/// The trust anchor is compared before the verifier runs. Ids are only decoded once the
/// proof is known to be valid.
pub fn validate_and_extract<V: VerifyProof>(
	proof: &Groth16Proof,
	signals: &PublicSignals,
	trust_anchor: &TrustAnchor,
) -> Result<ExtractedIds, SignalError> {
	if signals[ID_SIGNALS_LEN..ID_SIGNALS_LEN + TRUST_ANCHOR_LEN] != trust_anchor[..] {
		return Err(SignalError::UntrustedKey);
	}
	if !V::verify(proof, signals) {
		return Err(SignalError::InvalidProof);
	}
	Ok(ExtractedIds {
		payer_id: decode_packed_id(&id_chunks(signals, 0))?,
		payee_id: decode_packed_id(&id_chunks(signals, 1))?,
		order_id: decode_packed_id(&id_chunks(signals, 2))?,
	})
}

/// Assemble public signals as a circuit would expose them. Used by tests, benchmarks and
/// clients.
pub fn compose_signals(
	payer: &PackedChunks,
	payee: &PackedChunks,
	order: &PackedChunks,
	trust_anchor: &TrustAnchor,
) -> PublicSignals {
	let mut signals = [U256::zero(); PUBLIC_SIGNALS_LEN];
	signals[0..3].copy_from_slice(payer);
	signals[3..6].copy_from_slice(payee);
	signals[6..9].copy_from_slice(order);
	signals[ID_SIGNALS_LEN..ID_SIGNALS_LEN + TRUST_ANCHOR_LEN].copy_from_slice(trust_anchor);
	signals
}
