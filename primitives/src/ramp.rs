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

//! Orders and claims of the ramp escrow.

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};
use sp_core::RuntimeDebug;
use sp_std::vec::Vec;

/// Ids travel through proofs as decimal strings of at most 20 digits. Ids above
/// `u64::MAX` are rejected with an overflow error.
pub type OrderIdType = u64;

/// Account identifier on the off-chain payment network.
///
/// Like [`OrderIdType`], 20 digit ids above `u64::MAX` are rejected with an overflow error.
pub type PaymentIdType = u64;

pub type ClaimerIndexType = u64;

#[derive(
	Encode, Decode, Default, RuntimeDebug, Clone, Copy, PartialEq, Eq, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
pub enum OrderStatus {
	/// the order id has never been assigned
	#[default]
	Unopened,
	Open,
	Filled,
	Canceled,
}

impl OrderStatus {
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Filled | OrderStatus::Canceled)
	}
}

#[derive(
	Encode, Decode, Default, RuntimeDebug, Clone, Copy, PartialEq, Eq, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
pub enum ClaimStatus {
	/// the claimant has never claimed the order
	#[default]
	Unsubmitted,
	/// funds are locked in escrow
	Submitted,
	/// the claim settled the order
	Used,
	/// the claimant reclaimed the escrowed funds
	Clawback,
}

/// A request of an on-ramper to receive `amount_to_receive` in exchange for an off-chain
/// payment of at most `max_amount_to_pay`.
#[derive(Encode, Decode, RuntimeDebug, Clone, PartialEq, Eq, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_derive", serde(rename_all = "camelCase"))]
pub struct Order<AccountId, Balance> {
	pub on_ramper: AccountId,
	pub amount_to_receive: Balance,
	/// advisory only. Never checked against anything.
	pub max_amount_to_pay: Balance,
	pub status: OrderStatus,
}

impl<AccountId, Balance> Order<AccountId, Balance> {
	pub fn new(on_ramper: AccountId, amount_to_receive: Balance, max_amount_to_pay: Balance) -> Self {
		Self { on_ramper, amount_to_receive, max_amount_to_pay, status: OrderStatus::Open }
	}
}

/// The escrow lock of an off-ramper against a specific order.
#[derive(
	Encode, Decode, Default, RuntimeDebug, Clone, Copy, PartialEq, Eq, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_derive", serde(rename_all = "camelCase"))]
pub struct OrderClaim<Moment> {
	pub claimant_payment_id: PaymentIdType,
	pub status: ClaimStatus,
	/// after this time, a submitted claim on an open order can be clawed back
	pub claim_expiration_time: Moment,
}

#[derive(Encode, Decode, RuntimeDebug, Clone, PartialEq, Eq, TypeInfo)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_derive", serde(rename_all = "camelCase"))]
pub struct OrderWithId<AccountId, Balance> {
	pub id: OrderIdType,
	pub order: Order<AccountId, Balance>,
	pub claimers: Vec<AccountId>,
}

#[derive(Encode, Decode, RuntimeDebug, Clone, PartialEq, Eq, TypeInfo)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_derive", serde(rename_all = "camelCase"))]
pub struct ClaimWithClaimant<AccountId, Moment> {
	pub claimant: AccountId,
	pub claim: OrderClaim<Moment>,
}
