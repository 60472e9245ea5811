// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpful functions for tests: synthetic XST files.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use byteorder::{LittleEndian, WriteBytesExt};
use itertools::Itertools;
use marlu::c32;
use ndarray::prelude::*;
use tempfile::{NamedTempFile, TempPath};

use crate::math::num_packed_vis;

/// The shape and contents of a synthetic XST file.
pub(crate) struct SyntheticXst {
    pub(crate) freqs_mhz: Vec<f64>,
    pub(crate) mini_arrays: Vec<u16>,
    pub(crate) accumulation: u32,
    pub(crate) timestamps_jd: Vec<f64>,
}

impl SyntheticXst {
    pub(crate) fn header(&self) -> String {
        format!(
            "HeaderStart\nFreq.List={}\nMr.List={}\naccumulation={}\nHeaderStop\n",
            self.freqs_mhz.iter().join(","),
            self.mini_arrays.iter().join(","),
            self.accumulation,
        )
    }

    /// Raw (un-normalised) visibilities with dimensions (num_timesteps,
    /// num_subbands, num_packed_vis). Each value is unique and encodes its
    /// indices, so mistakes in decoding are obvious.
    pub(crate) fn raw_vis(&self) -> Array3<c32> {
        let num_vis = num_packed_vis(self.mini_arrays.len());
        Array3::from_shape_fn(
            (self.timestamps_jd.len(), self.freqs_mhz.len(), num_vis),
            |(t, f, v)| c32::new((t * 10000 + f * 1000 + v) as f32, -((v + 1) as f32)),
        )
    }

    /// Write the header and records into `writer`.
    pub(crate) fn write<W: Write>(&self, writer: &mut W) {
        writer.write_all(self.header().as_bytes()).unwrap();
        let vis = self.raw_vis();
        for (jd, vis_fv) in self.timestamps_jd.iter().zip(vis.outer_iter()) {
            writer.write_f64::<LittleEndian>(*jd).unwrap();
            for v in vis_fv.iter() {
                writer.write_f32::<LittleEndian>(v.re).unwrap();
                writer.write_f32::<LittleEndian>(v.im).unwrap();
            }
        }
    }

    pub(crate) fn write_to_file(&self, file: &Path) {
        let mut f = BufWriter::new(File::create(file).unwrap());
        self.write(&mut f);
        f.flush().unwrap();
    }

    pub(crate) fn write_to_tempfile(&self) -> TempPath {
        let temp_path = NamedTempFile::new().unwrap().into_temp_path();
        self.write_to_file(&temp_path);
        temp_path
    }
}

impl Default for SyntheticXst {
    fn default() -> Self {
        SyntheticXst {
            freqs_mhz: vec![30.0, 42.5, 55.0],
            mini_arrays: vec![0, 1, 3, 7],
            accumulation: 2,
            timestamps_jd: vec![2458800.5, 2458800.50001, 2458800.50002, 2458800.50003],
        }
    }
}

/// Write arbitrary bytes to a temporary file.
pub(crate) fn write_bytes_to_tempfile(bytes: &[u8]) -> TempPath {
    let (mut temp_file, temp_path) = NamedTempFile::new().unwrap().into_parts();
    temp_file.write_all(bytes).unwrap();
    temp_file.flush().unwrap();
    temp_path
}
