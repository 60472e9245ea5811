// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinate and time helpers for looking at XST data on the sky.
//!
//! All of these are stateless. Angles going in and out are in degrees unless
//! the name says otherwise. Precession and nutation are ignored.


use hifitime::{Duration, Epoch};
use marlu::{constants::VEL_C, precession::get_lmst, AzEl, HADec, LatLngHeight, RADec};
use ndarray::prelude::*;

/// The local mean sidereal time at `longitude_rad` \[degrees\], in [0, 360).
pub fn lst_deg(epoch: Epoch, longitude_rad: f64, dut1: Duration) -> f64 {
    get_lmst(longitude_rad, epoch, dut1)
        .to_degrees()
        .rem_euclid(360.0)
}

/// The local hour angle of `ra_deg` \[degrees\]. The result is wrapped into
/// [0, 360).
pub fn lha_deg(epoch: Epoch, longitude_rad: f64, ra_deg: f64, dut1: Duration) -> f64 {
    (lst_deg(epoch, longitude_rad, dut1) - ra_deg).rem_euclid(360.0)
}

/// The equatorial coordinates of the zenith above `array_pos` at `epoch`.
pub fn eq_zenith(epoch: Epoch, array_pos: LatLngHeight, dut1: Duration) -> RADec {
    let lst_rad = get_lmst(array_pos.longitude_rad, epoch, dut1);
    RADec::from_hadec(HADec::from_radians(0.0, array_pos.latitude_rad), lst_rad)
}

/// The equatorial coordinates of an azimuth-elevation pointing.
pub fn to_radec(azel: AzEl, epoch: Epoch, array_pos: LatLngHeight, dut1: Duration) -> RADec {
    let lst_rad = get_lmst(array_pos.longitude_rad, epoch, dut1);
    RADec::from_hadec(azel.to_hadec(array_pos.latitude_rad), lst_rad)
}

/// Rotate an (N, 3) array of positions by `angle_deg` about the z axis. Each
/// row is treated as a row vector, i.e. the result is `xyz . R`.
pub fn rotz(xyz: ArrayView2<f64>, angle_deg: f64) -> Array2<f64> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let rot = array![[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]];
    xyz.dot(&rot)
}

/// Convert a frequency \[MHz\] to a wavelength \[metres\].
pub fn wavelength_m(freq_mhz: f64) -> f64 {
    VEL_C / (freq_mhz * 1e6)
}
