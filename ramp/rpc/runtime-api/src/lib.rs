//! Runtime API definition required by Ramp RPC extensions.

#![cfg_attr(not(feature = "std"), no_std)]

use encointer_primitives::ramp::{ClaimWithClaimant, OrderIdType, OrderWithId};
use parity_scale_codec::{Decode, Encode};
use sp_std::vec::Vec;

sp_api::decl_runtime_apis! {
	pub trait RampApi<AccountId, Balance, Moment>
	where
		AccountId: Encode + Decode,
		Balance: Encode + Decode,
		Moment: Encode + Decode,
	{
		fn list_orders() -> Vec<OrderWithId<AccountId, Balance>>;
		fn list_claims(order_id: OrderIdType) -> Vec<ClaimWithClaimant<AccountId, Moment>>;
	}
}
