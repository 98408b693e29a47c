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

use crate::*;
use encointer_primitives::signals::{compose_signals, pack_id};
use frame_benchmarking::{account, benchmarks, impl_benchmark_test_suite};
use frame_system::RawOrigin;

const ON_RAMPER_ID: PaymentIdType = 100;
const OFF_RAMPER_ID: PaymentIdType = 200;

fn amount<T: Config>() -> BalanceOf<T> {
	T::Currency::minimum_balance().saturating_mul(10u32.into())
}

fn registered_account<T: Config>(name: &'static str, payment_id: PaymentIdType) -> T::AccountId {
	let who: T::AccountId = account(name, 0, 0);
	T::Currency::make_free_balance_be(&who, amount::<T>().saturating_mul(100u32.into()));
	Pallet::<T>::register(RawOrigin::Signed(who.clone()).into(), payment_id).unwrap();
	who
}

/// Registers both parties and lets the off-ramper claim a fresh order.
fn claimed_order<T: Config>() -> (T::AccountId, T::AccountId, OrderIdType) {
	T::Currency::make_free_balance_be(&Pallet::<T>::account_id(), T::Currency::minimum_balance());
	let on_ramper = registered_account::<T>("on_ramper", ON_RAMPER_ID);
	let off_ramper = registered_account::<T>("off_ramper", OFF_RAMPER_ID);
	Pallet::<T>::post_order(RawOrigin::Signed(on_ramper.clone()).into(), amount::<T>(), amount::<T>())
		.unwrap();
	let order_id = OrderStore::<T>::last_order_id();
	Pallet::<T>::claim_order(RawOrigin::Signed(off_ramper.clone()).into(), order_id).unwrap();
	(on_ramper, off_ramper, order_id)
}

benchmarks! {
	register {
		let caller: T::AccountId = account("caller", 0, 0);
	}: _(RawOrigin::Signed(caller.clone()), ON_RAMPER_ID)
	verify {
		assert_eq!(AccountPaymentIds::<T>::get(&caller), Some(ON_RAMPER_ID));
	}

	post_order {
		let on_ramper = registered_account::<T>("on_ramper", ON_RAMPER_ID);
	}: _(RawOrigin::Signed(on_ramper), amount::<T>(), amount::<T>())
	verify {
		assert_eq!(OrderStore::<T>::order_status(1), OrderStatus::Open);
	}

	claim_order {
		T::Currency::make_free_balance_be(&Pallet::<T>::account_id(), T::Currency::minimum_balance());
		let on_ramper = registered_account::<T>("on_ramper", ON_RAMPER_ID);
		let off_ramper = registered_account::<T>("off_ramper", OFF_RAMPER_ID);
		Pallet::<T>::post_order(RawOrigin::Signed(on_ramper).into(), amount::<T>(), amount::<T>())?;
	}: _(RawOrigin::Signed(off_ramper.clone()), 1)
	verify {
		assert_eq!(OrderStore::<T>::get_claim(1, &off_ramper).status, ClaimStatus::Submitted);
	}

	on_ramp {
		let (_, off_ramper, order_id) = claimed_order::<T>();
		let signals = compose_signals(
			&pack_id(ON_RAMPER_ID),
			&pack_id(OFF_RAMPER_ID),
			&pack_id(order_id),
			&TrustAnchor::<T>::get(),
		);
		let proof = T::BenchmarkHelper::proof_for(&signals);
	}: _(RawOrigin::Signed(off_ramper), proof, signals)
	verify {
		assert_eq!(OrderStore::<T>::order_status(order_id), OrderStatus::Filled);
	}

	cancel_order {
		let (on_ramper, _, order_id) = claimed_order::<T>();
	}: _(RawOrigin::Signed(on_ramper), order_id)
	verify {
		assert_eq!(OrderStore::<T>::order_status(order_id), OrderStatus::Canceled);
	}

	clawback {
		let (_, off_ramper, order_id) = claimed_order::<T>();
		let claim = OrderStore::<T>::get_claim(order_id, &off_ramper);
		pallet_timestamp::Pallet::<T>::set_timestamp(claim.claim_expiration_time);
	}: _(RawOrigin::Signed(off_ramper.clone()), order_id)
	verify {
		assert_eq!(OrderStore::<T>::get_claim(order_id, &off_ramper).status, ClaimStatus::Clawback);
	}
}

impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::TestRuntime);
