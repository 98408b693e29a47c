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

use crate::AccountId;
use sp_keyring::Sr25519Keyring;

pub fn account_id(keyring: Sr25519Keyring) -> AccountId {
	keyring.to_account_id()
}

/// The last event deposited in the current block, converted into the runtime event type.
pub fn last_event<T: frame_system::Config>() -> Option<T::RuntimeEvent> {
	frame_system::Pallet::<T>::events().pop().map(|record| record.event)
}
