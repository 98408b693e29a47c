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

//! Keyed storage of orders and claims.
//!
//! All order and claim state is changed through [`OrderStore`]. Absent entries read as
//! `Unopened` orders and `Unsubmitted` claims.

use crate::{
	BalanceOf, Config, Error, MomentOf, OrderClaimOf, OrderClaimerCount, OrderClaimerRegistry,
	OrderClaims, OrderCount, OrderOf, Orders,
};
use core::marker::PhantomData;
use encointer_primitives::ramp::{
	ClaimWithClaimant, ClaimerIndexType, Order, OrderIdType, OrderStatus, OrderWithId,
};
use sp_std::vec::Vec;

pub struct OrderStore<T>(PhantomData<T>);

impl<T: Config> OrderStore<T> {
	/// Store a new open order under the next free id and return that id.
	pub fn create_order(
		on_ramper: &T::AccountId,
		amount_to_receive: BalanceOf<T>,
		max_amount_to_pay: BalanceOf<T>,
	) -> Result<OrderIdType, Error<T>> {
		let order_id = OrderCount::<T>::get().checked_add(1).ok_or(Error::<T>::OrderIdOverflow)?;
		Orders::<T>::insert(
			order_id,
			Order::new(on_ramper.clone(), amount_to_receive, max_amount_to_pay),
		);
		OrderCount::<T>::put(order_id);
		Ok(order_id)
	}

	pub fn last_order_id() -> OrderIdType {
		OrderCount::<T>::get()
	}

	pub fn get_order(order_id: OrderIdType) -> Option<OrderOf<T>> {
		Orders::<T>::get(order_id)
	}

	pub fn order_status(order_id: OrderIdType) -> OrderStatus {
		Self::get_order(order_id).map(|order| order.status).unwrap_or_default()
	}

	/// No-op for ids which have never been assigned.
	pub fn set_order_status(order_id: OrderIdType, status: OrderStatus) {
		Orders::<T>::mutate(order_id, |maybe_order| {
			if let Some(order) = maybe_order {
				order.status = status;
			}
		});
	}

	pub fn get_claim(order_id: OrderIdType, claimant: &T::AccountId) -> OrderClaimOf<T> {
		OrderClaims::<T>::get(order_id, claimant)
	}

	pub fn set_claim(order_id: OrderIdType, claimant: &T::AccountId, claim: OrderClaimOf<T>) {
		OrderClaims::<T>::insert(order_id, claimant, claim);
	}

	/// Register `claimant` under the next claimer index of `order_id`.
	pub fn append_claimer(order_id: OrderIdType, claimant: &T::AccountId) -> Result<(), Error<T>> {
		let index = OrderClaimerCount::<T>::get(order_id)
			.checked_add(1)
			.ok_or(Error::<T>::ClaimerIndexOverflow)?;
		OrderClaimerRegistry::<T>::insert(order_id, index, claimant);
		OrderClaimerCount::<T>::insert(order_id, index);
		Ok(())
	}

	pub fn claimer_count(order_id: OrderIdType) -> ClaimerIndexType {
		OrderClaimerCount::<T>::get(order_id)
	}

	pub fn claimers(order_id: OrderIdType) -> Vec<T::AccountId> {
		(1..=Self::claimer_count(order_id))
			.filter_map(|index| OrderClaimerRegistry::<T>::get(order_id, index))
			.collect()
	}

	pub fn list_orders() -> Vec<OrderWithId<T::AccountId, BalanceOf<T>>> {
		(1..=Self::last_order_id())
			.filter_map(|id| {
				Self::get_order(id).map(|order| OrderWithId {
					id,
					order,
					claimers: Self::claimers(id),
				})
			})
			.collect()
	}

	pub fn list_claims(order_id: OrderIdType) -> Vec<ClaimWithClaimant<T::AccountId, MomentOf<T>>> {
		Self::claimers(order_id)
			.into_iter()
			.map(|claimant| {
				let claim = Self::get_claim(order_id, &claimant);
				ClaimWithClaimant { claimant, claim }
			})
			.collect()
	}
}
