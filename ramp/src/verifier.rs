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

//! Groth16 verification of payment proofs on the BN254 curve.
//!
//! Proof coordinates and public signals arrive as little-endian 256 bit words. Coordinates
//! outside the base field and points off the curve or outside the prime order subgroup
//! make the proof invalid. So do signals outside the scalar field.

use ark_bn254::{g1::G1Affine, g2::G2Affine, Bn254, Fq, Fq2, Fr};
use ark_ff::{BigInt, PrimeField};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, VerifyingKey};
use ark_serialize::CanonicalDeserialize;
use encointer_primitives::signals::{Groth16Proof, PublicSignals, VerifyProof, PUBLIC_SIGNALS_LEN};
use frame_support::traits::Get;
use sp_core::U256;
use sp_std::{marker::PhantomData, vec::Vec};

use crate::LOG;

fn to_fq(word: &U256) -> Option<Fq> {
	Fq::from_bigint(BigInt::new(word.0))
}

fn to_fr(word: &U256) -> Option<Fr> {
	Fr::from_bigint(BigInt::new(word.0))
}

fn to_g1(point: &[U256; 2]) -> Option<G1Affine> {
	let p = G1Affine::new_unchecked(to_fq(&point[0])?, to_fq(&point[1])?);
	(p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()).then_some(p)
}

fn to_g2(point: &[[U256; 2]; 2]) -> Option<G2Affine> {
	let x = Fq2::new(to_fq(&point[0][0])?, to_fq(&point[0][1])?);
	let y = Fq2::new(to_fq(&point[1][0])?, to_fq(&point[1][1])?);
	let p = G2Affine::new_unchecked(x, y);
	(p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()).then_some(p)
}

/// Convert to arkworks Proof type
pub fn to_ark_proof(proof: &Groth16Proof) -> Option<Proof<Bn254>> {
	Some(Proof { a: to_g1(&proof.a)?, b: to_g2(&proof.b)?, c: to_g1(&proof.c)? })
}

/// Verify a Groth16 proof against the public signals of the payment circuit.
///
/// Returns `true` if the proof is valid, `false` otherwise.
pub fn verify_groth16_proof(
	vk: &VerifyingKey<Bn254>,
	proof: &Groth16Proof,
	signals: &PublicSignals,
) -> bool {
	if vk.gamma_abc_g1.len() != PUBLIC_SIGNALS_LEN + 1 {
		return false;
	}
	let Some(ark_proof) = to_ark_proof(proof) else { return false };
	let Some(inputs) = signals.iter().map(to_fr).collect::<Option<Vec<Fr>>>() else {
		return false;
	};

	let pvk: PreparedVerifyingKey<Bn254> = vk.clone().into();
	Groth16::<Bn254>::verify_proof(&pvk, &ark_proof, &inputs).unwrap_or(false)
}

/// [`VerifyProof`] against the compressed verifying key supplied by `K`.
pub struct Groth16Verifier<K>(PhantomData<K>);

impl<K: Get<Vec<u8>>> VerifyProof for Groth16Verifier<K> {
	fn verify(proof: &Groth16Proof, signals: &PublicSignals) -> bool {
		match VerifyingKey::<Bn254>::deserialize_compressed(K::get().as_slice()) {
			Ok(vk) => verify_groth16_proof(&vk, proof, signals),
			Err(e) => {
				log::error!(target: LOG, "cannot deserialize verifying key: {:?}", e);
				false
			},
		}
	}
}
