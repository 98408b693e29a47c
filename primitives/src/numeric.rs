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

use crate::signals::SignalError;

/// Parse the ASCII decimal digits contained in `bytes` into an integer.
///
/// Bytes which are not ASCII digits are skipped. Fails with [`SignalError::Overflow`] at the
/// first digit that does not fit into the result type.
pub fn parse_decimal(bytes: &[u8]) -> Result<u64, SignalError> {
	bytes.iter().filter(|b| b.is_ascii_digit()).try_fold(0u64, |acc, b| {
		acc.checked_mul(10)
			.and_then(|acc| acc.checked_add(u64::from(b - b'0')))
			.ok_or(SignalError::Overflow)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[rstest(input, expected,
		case(b"0", 0),
		case(b"7", 7),
		case(b"1234567890", 1_234_567_890),
		case(b"0042", 42),
		case(b"18446744073709551615", u64::MAX),
		case(b"", 0),
		case(b"12-34 56", 123_456),
	)]
	fn parse_decimal_works(input: &[u8], expected: u64) {
		assert_eq!(parse_decimal(input), Ok(expected));
	}

	#[rstest(input,
		case(b"18446744073709551616"),
		case(b"99999999999999999999"),
		case(b"100000000000000000000"),
	)]
	fn parse_decimal_detects_overflow(input: &[u8]) {
		assert_eq!(parse_decimal(input), Err(SignalError::Overflow));
	}
}
