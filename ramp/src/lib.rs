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

//! # Encointer Ramp Module
//!
//! Peer-to-peer escrow between on-rampers, who want to buy the stablecoin for fiat, and
//! off-rampers, who sell it. An on-ramper posts an order. Off-rampers claim it by locking
//! `amount_to_receive` in the pallet's escrow account. Once the off-ramper has been paid
//! off-chain, the on-ramper submits a succinct proof of that payment and receives the
//! escrowed funds. Claims on orders that are never settled can be clawed back after
//! `ClaimExpirationPeriod`.
//!
//! Payment proofs carry their ids packed into public signals. See
//! [`encointer_primitives::signals`] for the layout.

#![cfg_attr(not(feature = "std"), no_std)]

use core::marker::PhantomData;
use encointer_primitives::{
	ramp::{
		ClaimStatus, ClaimWithClaimant, ClaimerIndexType, Order, OrderClaim, OrderIdType,
		OrderStatus, OrderWithId, PaymentIdType,
	},
	signals::{
		validate_and_extract, Groth16Proof, PublicSignals, SignalError,
		TrustAnchor as TrustAnchorType, VerifyProof,
	},
};
use frame_support::{
	traits::{Currency, ExistenceRequirement::AllowDeath, Get},
	PalletId,
};
use log::{debug, info, warn};
use sp_runtime::{
	traits::{AccountIdConversion, Saturating, Zero},
	DispatchError, DispatchResult,
};
use sp_std::vec::Vec;

// Logger target
const LOG: &str = "encointer::ramp";

pub use order_store::OrderStore;
pub use pallet::*;
pub use weights::WeightInfo;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
#[cfg(test)]
mod mock;

pub mod order_store;
pub mod verifier;
pub mod weights;

pub type BalanceOf<T> =
	<<T as Config>::Currency as Currency<<T as frame_system::Config>::AccountId>>::Balance;
pub type MomentOf<T> = <T as pallet_timestamp::Config>::Moment;
pub type OrderOf<T> = Order<<T as frame_system::Config>::AccountId, BalanceOf<T>>;
pub type OrderClaimOf<T> = OrderClaim<MomentOf<T>>;

/// Supplies proofs the configured verifier accepts, so that `on_ramp` can be benchmarked.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper {
	fn proof_for(signals: &PublicSignals) -> Groth16Proof;
}

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::pallet_prelude::*;
	use frame_system::pallet_prelude::*;

	#[pallet::pallet]
	pub struct Pallet<T>(PhantomData<T>);

	#[pallet::config]
	pub trait Config: frame_system::Config + pallet_timestamp::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// The stablecoin which is held in escrow.
		type Currency: Currency<Self::AccountId>;

		/// Checks payment proofs against the circuit's verifying key.
		type ProofVerifier: VerifyProof;

		/// Derives the escrow account.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// Minimum time a submitted claim on an open order stays locked.
		#[pallet::constant]
		type ClaimExpirationPeriod: Get<Self::Moment>;

		type WeightInfo: WeightInfo;

		#[cfg(feature = "runtime-benchmarks")]
		type BenchmarkHelper: BenchmarkHelper;
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Bind the caller's account to its `payment_id` on the off-chain payment network.
		///
		/// An account can register once. A payment id which is registered again is taken
		/// over by the new account.
		#[pallet::call_index(0)]
		#[pallet::weight(<T as Config>::WeightInfo::register())]
		pub fn register(origin: OriginFor<T>, payment_id: PaymentIdType) -> DispatchResult {
			let sender = ensure_signed(origin)?;
			ensure!(
				!AccountPaymentIds::<T>::contains_key(&sender),
				Error::<T>::AlreadyRegistered
			);

			if let Some(previous) = PaymentIdAccounts::<T>::get(payment_id) {
				warn!(
					target: LOG,
					"payment id {} is taken over by {:?} from {:?}", payment_id, sender, previous
				);
			}
			AccountPaymentIds::<T>::insert(&sender, payment_id);
			PaymentIdAccounts::<T>::insert(payment_id, &sender);

			info!(target: LOG, "registered payment id {} for {:?}", payment_id, sender);
			Self::deposit_event(Event::Registered { who: sender, payment_id });
			Ok(())
		}

		/// Open an order to receive `amount_to_receive` in exchange for an off-chain payment.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as Config>::WeightInfo::post_order())]
		pub fn post_order(
			origin: OriginFor<T>,
			amount_to_receive: BalanceOf<T>,
			max_amount_to_pay: BalanceOf<T>,
		) -> DispatchResult {
			let sender = ensure_signed(origin)?;
			Self::registered_payment_id(&sender)?;
			ensure!(
				!amount_to_receive.is_zero() && !max_amount_to_pay.is_zero(),
				Error::<T>::InvalidAmount
			);

			let order_id =
				OrderStore::<T>::create_order(&sender, amount_to_receive, max_amount_to_pay)?;

			info!(target: LOG, "order {} posted by {:?}", order_id, sender);
			Self::deposit_event(Event::OrderPosted {
				order_id,
				on_ramper: sender,
				amount_to_receive,
				max_amount_to_pay,
			});
			Ok(())
		}

		/// Lock `amount_to_receive` of an open order in escrow, offering to be paid off-chain.
		#[pallet::call_index(2)]
		#[pallet::weight(<T as Config>::WeightInfo::claim_order())]
		pub fn claim_order(origin: OriginFor<T>, order_id: OrderIdType) -> DispatchResult {
			let sender = ensure_signed(origin)?;
			let claimant_payment_id = Self::registered_payment_id(&sender)?;
			let order = Self::open_order(order_id)?;
			ensure!(
				OrderStore::<T>::get_claim(order_id, &sender).status == ClaimStatus::Unsubmitted,
				Error::<T>::AlreadyClaimed
			);
			ensure!(order.on_ramper != sender, Error::<T>::SelfClaim);

			let claim_expiration_time = pallet_timestamp::Pallet::<T>::get()
				.saturating_add(T::ClaimExpirationPeriod::get());
			OrderStore::<T>::set_claim(
				order_id,
				&sender,
				OrderClaim { claimant_payment_id, status: ClaimStatus::Submitted, claim_expiration_time },
			);
			OrderStore::<T>::append_claimer(order_id, &sender)?;

			Self::transfer(&sender, &Self::account_id(), order.amount_to_receive)?;

			info!(target: LOG, "order {} claimed by {:?}", order_id, sender);
			Self::deposit_event(Event::OrderClaimed {
				order_id,
				claimant: sender,
				claim_expiration_time,
			});
			Ok(())
		}

		/// Settle an order with a proof that the on-ramper paid the off-ramper.
		///
		/// The escrowed funds of the paid off-ramper go to the order's owner. Anybody
		/// registered may submit the proof.
		#[pallet::call_index(3)]
		#[pallet::weight(<T as Config>::WeightInfo::on_ramp())]
		pub fn on_ramp(
			origin: OriginFor<T>,
			proof: Groth16Proof,
			public_signals: PublicSignals,
		) -> DispatchResult {
			let sender = ensure_signed(origin)?;
			Self::registered_payment_id(&sender)?;

			let ids = validate_and_extract::<T::ProofVerifier>(
				&proof,
				&public_signals,
				&TrustAnchor::<T>::get(),
			)
			.map_err(|e| {
				debug!(target: LOG, "rejecting proof submitted by {:?}: {}", sender, e);
				Error::<T>::from(e)
			})?;

			let order = Self::open_order(ids.order_id)?;
			let off_ramper =
				PaymentIdAccounts::<T>::get(ids.payee_id).ok_or(Error::<T>::ClaimNotSubmitted)?;
			let mut claim = OrderStore::<T>::get_claim(ids.order_id, &off_ramper);
			ensure!(claim.status == ClaimStatus::Submitted, Error::<T>::ClaimNotSubmitted);
			ensure!(
				AccountPaymentIds::<T>::get(&order.on_ramper) == Some(ids.payer_id),
				Error::<T>::PayerMismatch
			);

			claim.status = ClaimStatus::Used;
			OrderStore::<T>::set_claim(ids.order_id, &off_ramper, claim);
			OrderStore::<T>::set_order_status(ids.order_id, OrderStatus::Filled);

			Self::transfer(&Self::account_id(), &order.on_ramper, order.amount_to_receive)?;

			info!(
				target: LOG,
				"order {} on-ramped, {:?} paid by {:?}", ids.order_id, off_ramper, order.on_ramper
			);
			Self::deposit_event(Event::OrderOnRamped {
				order_id: ids.order_id,
				on_ramper: order.on_ramper,
				off_ramper,
				amount: order.amount_to_receive,
			});
			Ok(())
		}

		/// Withdraw an open order. Claimants keep their locks until they claw them back.
		#[pallet::call_index(4)]
		#[pallet::weight(<T as Config>::WeightInfo::cancel_order())]
		pub fn cancel_order(origin: OriginFor<T>, order_id: OrderIdType) -> DispatchResult {
			let sender = ensure_signed(origin)?;
			let order = Self::open_order(order_id)?;
			ensure!(order.on_ramper == sender, Error::<T>::NotOwner);

			OrderStore::<T>::set_order_status(order_id, OrderStatus::Canceled);

			info!(target: LOG, "order {} canceled", order_id);
			Self::deposit_event(Event::OrderCanceled { order_id });
			Ok(())
		}

		/// Reclaim the funds the caller locked for `order_id`.
		///
		/// Possible once the order is settled or canceled, or once the claim has expired.
		#[pallet::call_index(5)]
		#[pallet::weight(<T as Config>::WeightInfo::clawback())]
		pub fn clawback(origin: OriginFor<T>, order_id: OrderIdType) -> DispatchResult {
			let sender = ensure_signed(origin)?;
			let mut claim = OrderStore::<T>::get_claim(order_id, &sender);
			ensure!(claim.status == ClaimStatus::Submitted, Error::<T>::ClaimNotReclaimable);
			let order = OrderStore::<T>::get_order(order_id).ok_or(Error::<T>::ClaimNotReclaimable)?;
			if !order.status.is_terminal() {
				ensure!(
					pallet_timestamp::Pallet::<T>::get() >= claim.claim_expiration_time,
					Error::<T>::ClaimNotExpired
				);
			}

			claim.status = ClaimStatus::Clawback;
			OrderStore::<T>::set_claim(order_id, &sender, claim);

			Self::transfer(&Self::account_id(), &sender, order.amount_to_receive)?;

			info!(target: LOG, "{:?} clawed back its claim on order {}", sender, order_id);
			Self::deposit_event(Event::ClaimClawedBack {
				order_id,
				claimant: sender,
				amount: order.amount_to_receive,
			});
			Ok(())
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// an account registered its payment id
		Registered { who: T::AccountId, payment_id: PaymentIdType },
		/// an order has been opened
		OrderPosted {
			order_id: OrderIdType,
			on_ramper: T::AccountId,
			amount_to_receive: BalanceOf<T>,
			max_amount_to_pay: BalanceOf<T>,
		},
		/// funds have been locked in escrow against an order
		OrderClaimed {
			order_id: OrderIdType,
			claimant: T::AccountId,
			claim_expiration_time: MomentOf<T>,
		},
		/// an order has been settled by a payment proof
		OrderOnRamped {
			order_id: OrderIdType,
			on_ramper: T::AccountId,
			off_ramper: T::AccountId,
			amount: BalanceOf<T>,
		},
		/// an order has been withdrawn by its owner
		OrderCanceled { order_id: OrderIdType },
		/// escrowed funds have been returned to their claimant
		ClaimClawedBack { order_id: OrderIdType, claimant: T::AccountId, amount: BalanceOf<T> },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// the account has already registered a payment id
		AlreadyRegistered,
		/// the account has not registered a payment id
		NotRegistered,
		/// amounts must be non-zero
		InvalidAmount,
		/// the order does not exist or is no longer open
		OrderNotOpen,
		/// the account already holds a claim on this order
		AlreadyClaimed,
		/// an on-ramper cannot claim its own order
		SelfClaim,
		/// only the on-ramper can cancel its order
		NotOwner,
		/// there is no submitted claim to claw back
		ClaimNotReclaimable,
		/// the claim is still locked
		ClaimNotExpired,
		/// the paid account holds no submitted claim on the order
		ClaimNotSubmitted,
		/// the proven payer is not the on-ramper of the order
		PayerMismatch,
		/// no more order ids can be assigned
		OrderIdOverflow,
		/// no more claimer indices can be assigned for the order
		ClaimerIndexOverflow,
		/// the proof was generated under an untrusted key
		UntrustedKey,
		/// the proof did not verify
		InvalidProof,
		/// a packed id in the public signals is malformed
		InvalidSignalLayout,
		/// a packed id in the public signals is too long
		PayloadTooLong,
		/// a decimal id in the public signals does not fit
		Overflow,
		/// moving funds from or to escrow failed
		TransferFailed,
	}

	/// The public key of the payment network's signing authority, as exposed by the circuit.
	#[pallet::storage]
	pub type TrustAnchor<T: Config> = StorageValue<_, TrustAnchorType, ValueQuery>;

	#[pallet::storage]
	pub type AccountPaymentIds<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, PaymentIdType, OptionQuery>;

	/// Reverse lookup of [`AccountPaymentIds`]. The latest registration of an id wins.
	#[pallet::storage]
	pub type PaymentIdAccounts<T: Config> =
		StorageMap<_, Blake2_128Concat, PaymentIdType, T::AccountId, OptionQuery>;

	/// The last order id which has been assigned. Ids start at 1.
	#[pallet::storage]
	pub(crate) type OrderCount<T: Config> = StorageValue<_, OrderIdType, ValueQuery>;

	#[pallet::storage]
	pub(crate) type Orders<T: Config> =
		StorageMap<_, Blake2_128Concat, OrderIdType, OrderOf<T>, OptionQuery>;

	#[pallet::storage]
	pub(crate) type OrderClaims<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		OrderIdType,
		Blake2_128Concat,
		T::AccountId,
		OrderClaimOf<T>,
		ValueQuery,
	>;

	/// Every account which has ever claimed an order, in order of their first claim.
	/// caution: index starts with 1, not 0!
	#[pallet::storage]
	pub(crate) type OrderClaimerRegistry<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		OrderIdType,
		Blake2_128Concat,
		ClaimerIndexType,
		T::AccountId,
		OptionQuery,
	>;

	#[pallet::storage]
	pub(crate) type OrderClaimerCount<T: Config> =
		StorageMap<_, Blake2_128Concat, OrderIdType, ClaimerIndexType, ValueQuery>;

	#[derive(frame_support::DefaultNoBound)]
	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub trust_anchor: TrustAnchorType,
		#[serde(skip)]
		pub _config: PhantomData<T>,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			TrustAnchor::<T>::put(self.trust_anchor);

			// the escrow account must survive holding nothing but the claims' funds
			let escrow = Pallet::<T>::account_id();
			let min = T::Currency::minimum_balance();
			if T::Currency::free_balance(&escrow) < min {
				let _ = T::Currency::make_free_balance_be(&escrow, min);
			}
		}
	}
}

impl<T: Config> Pallet<T> {
	/// The account holding all escrowed funds.
	pub fn account_id() -> T::AccountId {
		T::PalletId::get().into_account_truncating()
	}

	pub fn payment_id_of(account: &T::AccountId) -> Option<PaymentIdType> {
		AccountPaymentIds::<T>::get(account)
	}

	pub fn account_of(payment_id: PaymentIdType) -> Option<T::AccountId> {
		PaymentIdAccounts::<T>::get(payment_id)
	}

	pub fn trust_anchor() -> TrustAnchorType {
		TrustAnchor::<T>::get()
	}

	/// All orders ever posted, including settled and canceled ones, in ascending id order.
	pub fn list_orders() -> Vec<OrderWithId<T::AccountId, BalanceOf<T>>> {
		OrderStore::<T>::list_orders()
	}

	/// The claims on `order_id`, in order of their first submission.
	pub fn list_claims(order_id: OrderIdType) -> Vec<ClaimWithClaimant<T::AccountId, MomentOf<T>>> {
		OrderStore::<T>::list_claims(order_id)
	}

	fn registered_payment_id(account: &T::AccountId) -> Result<PaymentIdType, Error<T>> {
		Self::payment_id_of(account).ok_or(Error::<T>::NotRegistered)
	}

	fn open_order(order_id: OrderIdType) -> Result<OrderOf<T>, Error<T>> {
		OrderStore::<T>::get_order(order_id)
			.filter(|order| order.status == OrderStatus::Open)
			.ok_or(Error::<T>::OrderNotOpen)
	}

	fn transfer(from: &T::AccountId, to: &T::AccountId, amount: BalanceOf<T>) -> DispatchResult {
		T::Currency::transfer(from, to, amount, AllowDeath).map_err(|e| {
			warn!(
				target: LOG,
				"transfer of {:?} from {:?} to {:?} failed: {:?}", amount, from, to, e
			);
			DispatchError::from(Error::<T>::TransferFailed)
		})
	}
}

impl<T: Config> From<SignalError> for Error<T> {
	fn from(e: SignalError) -> Self {
		match e {
			SignalError::UntrustedKey => Error::UntrustedKey,
			SignalError::InvalidProof => Error::InvalidProof,
			SignalError::InvalidSignalLayout => Error::InvalidSignalLayout,
			SignalError::PayloadTooLong => Error::PayloadTooLong,
			SignalError::Overflow => Error::Overflow,
		}
	}
}
