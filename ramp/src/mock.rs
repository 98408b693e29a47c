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

//! Mock runtime for the encointer_ramp module

use crate as dut;
use encointer_primitives::signals::{
	Groth16Proof, PublicSignals, TrustAnchor, VerifyProof, TRUST_ANCHOR_LEN,
};
use frame_support::{derive_impl, parameter_types, PalletId};
use sp_core::U256;
use sp_runtime::BuildStorage;
use test_utils::*;

frame_support::construct_runtime!(
	pub enum TestRuntime
	{
		System: frame_system,
		Timestamp: pallet_timestamp,
		Balances: pallet_balances,
		EncointerRamp: dut,
	}
);

parameter_types! {
	pub const RampPalletId: PalletId = PalletId(*b"encramp_");
	pub const ClaimExpirationPeriod: Moment = ONE_DAY;
	pub static ProofValid: bool = true;
	pub static VerifierCalls: u32 = 0;
}

/// Accepts or rejects every proof depending on [`ProofValid`] and counts its invocations.
pub struct MockVerifier;
impl VerifyProof for MockVerifier {
	fn verify(_proof: &Groth16Proof, _signals: &PublicSignals) -> bool {
		VerifierCalls::set(VerifierCalls::get() + 1);
		ProofValid::get()
	}
}

impl dut::Config for TestRuntime {
	type RuntimeEvent = RuntimeEvent;
	type Currency = Balances;
	type ProofVerifier = MockVerifier;
	type PalletId = RampPalletId;
	type ClaimExpirationPeriod = ClaimExpirationPeriod;
	type WeightInfo = ();
	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = ();
}

#[cfg(feature = "runtime-benchmarks")]
impl dut::BenchmarkHelper for () {
	fn proof_for(_signals: &PublicSignals) -> Groth16Proof {
		Groth16Proof::default()
	}
}

// boilerplate
impl_frame_system!(TestRuntime);
impl_timestamp!(TestRuntime);
impl_balances!(TestRuntime, System);

pub const INITIAL_BALANCE: Balance = 1_000;

pub fn trust_anchor() -> TrustAnchor {
	let mut anchor = [U256::zero(); TRUST_ANCHOR_LEN];
	for (i, word) in anchor.iter_mut().enumerate() {
		*word = U256::from(0x7a11_0000u64 + i as u64);
	}
	anchor
}

// genesis values
pub fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = frame_system::GenesisConfig::<TestRuntime>::default().build_storage().unwrap();
	pallet_balances::GenesisConfig::<TestRuntime> {
		balances: [
			Sr25519Keyring::Alice,
			Sr25519Keyring::Bob,
			Sr25519Keyring::Charlie,
			Sr25519Keyring::Dave,
		]
		.into_iter()
		.map(|k| (k.to_account_id(), INITIAL_BALANCE))
		.collect(),
		..Default::default()
	}
	.assimilate_storage(&mut t)
	.unwrap();
	dut::GenesisConfig::<TestRuntime> { trust_anchor: trust_anchor(), ..Default::default() }
		.assimilate_storage(&mut t)
		.unwrap();

	let mut ext: sp_io::TestExternalities = t.into();
	ext.execute_with(|| {
		System::set_block_number(1);
		Timestamp::set_timestamp(GENESIS_TIME);
	});
	ext
}
