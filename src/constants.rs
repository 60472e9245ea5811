// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All floating-point constants *must* be double precision.
 */

/// The number of text lines making up an XST header, including the start and
/// stop markers.
pub const XST_HEADER_NUM_LINES: usize = 5;

/// The first line of every XST header.
pub const XST_HEADER_START: &[u8] = b"HeaderStart\n";

/// The last line of every XST header.
pub const XST_HEADER_STOP: &[u8] = b"HeaderStop\n";

/// The header tag listing the frequencies of each subband [MHz].
pub const XST_TAG_FREQS: &str = "Freq.List";

/// The header tag listing the mini-array indices, in correlator order.
pub const XST_TAG_MINI_ARRAYS: &str = "Mr.List";

/// The header tag holding the number of accumulated correlator samples.
pub const XST_TAG_ACCUMULATION: &str = "accumulation";

/// The number of bytes used by the Julian date leading every XST record.
pub const XST_TIMESTAMP_BYTES: usize = 8;

/// The number of bytes in a single packed visibility (two `f32`s).
pub const XST_VIS_BYTES: usize = 8;

/// NenuFAR latitude [degrees].
pub const NENUFAR_LAT_DEG: f64 = 47.375944;

/// NenuFAR longitude [degrees].
pub const NENUFAR_LONG_DEG: f64 = 2.193361;

/// NenuFAR height above sea level [metres].
pub const NENUFAR_HEIGHT_M: f64 = 136.195;
