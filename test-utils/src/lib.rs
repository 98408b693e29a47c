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

//! Boilerplate shared by the mock runtimes of the pallets in this repository.

use frame_support::parameter_types;
use sp_runtime::{traits::IdentifyAccount, MultiSignature};

// convenience reexport such that the tests do not need to put sp-keyring in the Cargo.toml.
pub use sp_keyring::Sr25519Keyring;

// reexports for macro resolution
pub use frame_support;
pub use frame_system;
pub use pallet_balances;
pub use pallet_timestamp;
pub use sp_runtime;

pub use sp_core::H256;
pub use sp_runtime::traits::{BlakeTwo256, Verify};

pub mod helpers;

pub const GENESIS_TIME: u64 = 1_585_058_843_000;
pub const ONE_DAY: u64 = 86_400_000;
pub const BLOCKTIME: u64 = 6_000; // 6s per block

/// The signature type used by accounts/transactions.
pub type Signature = MultiSignature;
/// An identifier for an account on this system.
pub type AccountId = <<MultiSignature as Verify>::Signer as IdentifyAccount>::AccountId;

pub type BlockNumber = u64;
pub type Balance = u64;
pub type Moment = u64;

parameter_types! {
	pub const MinimumPeriod: Moment = BLOCKTIME / 2;
}

#[macro_export]
macro_rules! impl_frame_system {
	($t:ident) => {
		#[frame_support::derive_impl(frame_system::config_preludes::TestDefaultConfig)]
		impl frame_system::Config for $t {
			type Block = frame_system::mocking::MockBlock<$t>;
			type AccountId = $crate::AccountId;
			type Lookup = sp_runtime::traits::IdentityLookup<Self::AccountId>;
			type AccountData = pallet_balances::AccountData<$crate::Balance>;
		}
	};
}

#[macro_export]
macro_rules! impl_timestamp {
	($t:ident) => {
		impl pallet_timestamp::Config for $t {
			type Moment = $crate::Moment;
			type OnTimestampSet = ();
			type MinimumPeriod = $crate::MinimumPeriod;
			type WeightInfo = ();
		}
	};
}

#[macro_export]
macro_rules! impl_balances {
	($t:ident, $system:ident) => {
		#[frame_support::derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
		impl pallet_balances::Config for $t {
			type Balance = $crate::Balance;
			type ExistentialDeposit = frame_support::traits::ConstU64<1>;
			type AccountStore = $system;
		}
	};
}
