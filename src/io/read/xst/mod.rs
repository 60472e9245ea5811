// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read NenuFAR-TV cross-correlation statistics ("XST") snapshots.
//!
//! An XST file is a 5-line ASCII header (see [`XstHeader`]) followed by
//! fixed-size little-endian records:
//!
//! ```text
//! f64                          Julian date (UTC)
//! [f32; 2][n_sb][2n^2 + n]     (re, im) packed visibilities per subband
//! ```
//!
//! The number of records is not stored anywhere; it is however many whole
//! records fit after the header.

mod error;
mod header;
mod iter;

pub use error::XstReadError;
pub use header::XstHeader;
pub use iter::CrossCorrIter;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};
use hifitime::Epoch;
use log::{debug, trace};
use marlu::c32;
use memmap2::Mmap;
use ndarray::prelude::*;
use vec1::Vec1;

use crate::{
    constants::XST_TIMESTAMP_BYTES,
    instrument::baselines,
    math::{closest_index, cross_correlation_matrix, CrossCorrError, Polarisation},
};

/// A fully-decoded XST snapshot. Everything is read when the reader is
/// created; nothing about the reader changes afterwards, unless it's
/// [reloaded](XstReader::reload) from another file.
#[derive(Debug, Clone)]
pub struct XstReader {
    /// The (absolute) path to the XST file.
    file: PathBuf,

    /// Metadata from the file's header.
    header: XstHeader,

    /// The Julian date (UTC) of each record.
    timestamps_jd: Vec1<f64>,

    /// Packed visibilities, already divided by the accumulation count. The
    /// dimensions are (num_timesteps, num_subbands, num_packed_vis).
    data: Array3<c32>,
}

impl XstReader {
    /// Read an XST file.
    pub fn new<P: AsRef<Path>>(file: P) -> Result<XstReader, XstReadError> {
        let file = file.as_ref();
        if file.as_os_str().is_empty() {
            return Err(XstReadError::InvalidPath {
                path: file.display().to_string(),
            });
        }
        if !file.exists() {
            return Err(XstReadError::DoesNotExist {
                path: file.display().to_string(),
            });
        }
        if !file.is_file() {
            return Err(XstReadError::InvalidPath {
                path: file.display().to_string(),
            });
        }
        let file = file.canonicalize()?;
        let file_str = file.display().to_string();
        debug!("Reading XST file {file_str}");

        let mut bin_file = BufReader::new(File::open(&file)?);
        let header = header::read_header(&mut bin_file, &file_str)?;

        // The mapping is read-only, and the file must not be modified while
        // it's alive. It's dropped before this function returns.
        let mmap = unsafe { Mmap::map(bin_file.get_ref())? };
        let body = mmap.get(header.header_bytes..).unwrap_or(&[]);
        let (timestamps_jd, data) = decode_records(body, &header, &file_str)?;

        Ok(XstReader {
            file,
            header,
            timestamps_jd,
            data,
        })
    }

    /// Replace everything in this reader with the contents of another XST
    /// file. If reading the new file fails, the reader is left untouched.
    pub fn reload<P: AsRef<Path>>(&mut self, file: P) -> Result<(), XstReadError> {
        *self = XstReader::new(file)?;
        Ok(())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn header(&self) -> &XstHeader {
        &self.header
    }

    /// The frequency of each subband \[MHz\].
    pub fn freqs_mhz(&self) -> &Vec1<f64> {
        &self.header.freqs_mhz
    }

    /// The mini-array indices, in correlator order.
    pub fn mini_arrays(&self) -> &Vec1<u16> {
        &self.header.mini_arrays
    }

    pub fn num_timesteps(&self) -> usize {
        self.timestamps_jd.len()
    }

    /// The Julian date (UTC) of each timestep.
    pub fn timestamps_jd(&self) -> &Vec1<f64> {
        &self.timestamps_jd
    }

    /// The timestamps as [`Epoch`]s.
    pub fn timestamps(&self) -> Vec1<Epoch> {
        self.timestamps_jd.mapped_ref(|&jd| Epoch::from_jde_utc(jd))
    }

    /// Normalised packed visibilities with dimensions (num_timesteps,
    /// num_subbands, num_packed_vis).
    pub fn data(&self) -> ArrayView3<c32> {
        self.data.view()
    }

    /// All ordered pairs of the mini-arrays in this file (see
    /// [`crate::instrument::baselines`]).
    pub fn baselines(&self) -> Vec<(u16, u16)> {
        baselines(&self.header.mini_arrays)
    }

    /// Reconstruct the cross-correlation matrix of a single polarisation. If
    /// `vis` isn't supplied, the first timestep and subband are used.
    ///
    /// Only the lower triangle of the returned matrix (including the diagonal)
    /// is populated; the upper triangle is zero.
    pub fn cross_corr<'a>(
        &'a self,
        vis: Option<ArrayView1<'a, c32>>,
        pol: Polarisation,
    ) -> Result<Array2<c32>, CrossCorrError> {
        let vis = vis.unwrap_or_else(|| self.data.slice(s![0, 0, ..]));
        cross_correlation_matrix(vis, self.header.num_mini_arrays(), pol)
    }

    /// Get the index of the subband with the frequency closest to `freq_mhz`.
    /// Ties go to the lower index.
    pub fn closest_subband(&self, freq_mhz: f64) -> usize {
        closest_index(&self.header.freqs_mhz, freq_mhz)
    }

    /// Iterate over the cross-correlation matrices of every timestep at a
    /// single frequency. The subband closest to `freq_mhz` is used (the first
    /// subband if it's `None`). Each call returns a new iterator starting at
    /// the first timestep.
    pub fn iter_cross_corr(
        &self,
        freq_mhz: Option<f64>,
        pol: Polarisation,
    ) -> CrossCorrIter<'_> {
        let subband = freq_mhz.map(|f| self.closest_subband(f)).unwrap_or(0);
        self.iter_cross_corr_subband(subband, pol)
    }

    /// Like [`XstReader::iter_cross_corr`], but for a subband index that has
    /// already been resolved. Panics if `subband` is out of range.
    pub(crate) fn iter_cross_corr_subband(
        &self,
        subband: usize,
        pol: Polarisation,
    ) -> CrossCorrIter<'_> {
        trace!(
            "Iterating over {pol} matrices of subband {subband} ({} MHz)",
            self.header.freqs_mhz[subband]
        );
        CrossCorrIter::new(
            self.data.view(),
            self.header.num_mini_arrays(),
            subband,
            pol,
        )
    }
}

/// Decode all of the records in `body`. `body` must hold a whole number of
/// records, and at least one.
fn decode_records(
    body: &[u8],
    header: &XstHeader,
    file: &str,
) -> Result<(Vec1<f64>, Array3<c32>), XstReadError> {
    let record_bytes = header.record_bytes();
    if body.len() % record_bytes != 0 {
        return Err(XstReadError::BodySize {
            file: file.to_string(),
            body_bytes: body.len(),
            record_bytes,
        });
    }
    let num_timesteps = body.len() / record_bytes;
    // Don't allocate anything for a shape that has no data behind it.
    if num_timesteps == 0 {
        return Err(XstReadError::NoTimesteps {
            file: file.to_string(),
        });
    }
    let num_subbands = header.num_subbands();
    let num_vis = header.num_packed_vis();
    debug!("{file}: {num_timesteps} records of {record_bytes} bytes");

    let accumulation = f64::from(header.accumulation);
    let mut timestamps_jd = Vec::with_capacity(num_timesteps);
    let mut data = Array3::zeros((num_timesteps, num_subbands, num_vis));
    let mut floats = vec![0.0; 2 * num_subbands * num_vis];
    for (record, mut data_fv) in body
        .chunks_exact(record_bytes)
        .zip(data.outer_iter_mut())
    {
        let (jd_bytes, vis_bytes) = record.split_at(XST_TIMESTAMP_BYTES);
        timestamps_jd.push(LittleEndian::read_f64(jd_bytes));
        LittleEndian::read_f32_into(vis_bytes, &mut floats);
        data_fv
            .iter_mut()
            .zip(floats.chunks_exact(2))
            .for_each(|(d, re_im)| {
                *d = c32::new(
                    (f64::from(re_im[0]) / accumulation) as f32,
                    (f64::from(re_im[1]) / accumulation) as f32,
                );
            });
    }

    let timestamps_jd = Vec1::try_from_vec(timestamps_jd).map_err(|_| XstReadError::NoTimesteps {
        file: file.to_string(),
    })?;
    Ok((timestamps_jd, data))
}
