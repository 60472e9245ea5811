// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse the ASCII header that leads every XST snapshot file.
//!
//! The header is always 5 lines. The first and last lines are structural
//! markers; the lines in between hold "<Tag>=v1,v2,...,vn" lists. Only three
//! tags are needed to decode the binary body that follows.

use std::io::BufRead;
use std::str::FromStr;

use log::{debug, trace};
use vec1::Vec1;

use super::XstReadError;
use crate::constants::*;

/// Metadata extracted from the header of an XST file.
#[derive(Debug, Clone, PartialEq)]
pub struct XstHeader {
    /// The frequency of each subband \[MHz\]. The number of subbands in each
    /// record is the length of this list.
    pub freqs_mhz: Vec1<f64>,

    /// The mini-array indices. Their order is the order of the antennas in
    /// the packed correlation matrices.
    pub mini_arrays: Vec1<u16>,

    /// The number of correlator samples accumulated into each visibility.
    /// Raw visibilities are divided by this.
    pub accumulation: u32,

    /// The total number of bytes occupied by the header lines, i.e. the
    /// offset to the first record.
    pub header_bytes: usize,
}

impl XstHeader {
    /// The number of subbands (frequency channels) in each record.
    pub fn num_subbands(&self) -> usize {
        self.freqs_mhz.len()
    }

    /// The number of mini-arrays (antennas).
    pub fn num_mini_arrays(&self) -> usize {
        self.mini_arrays.len()
    }

    /// The number of packed visibilities per subband.
    pub fn num_packed_vis(&self) -> usize {
        crate::math::num_packed_vis(self.num_mini_arrays())
    }

    /// The number of bytes in a single record (timestamp + visibilities).
    /// Headers from [`read_header`] are guaranteed not to overflow here.
    pub fn record_bytes(&self) -> usize {
        XST_TIMESTAMP_BYTES + self.num_subbands() * self.num_packed_vis() * XST_VIS_BYTES
    }
}

/// Read exactly [`XST_HEADER_NUM_LINES`] lines from `reader` and parse them.
/// The markers are checked before anything else is done with the lines; on
/// success, `reader` is positioned at the start of the binary body.
pub(crate) fn read_header<R: BufRead>(
    reader: &mut R,
    file: &str,
) -> Result<XstHeader, XstReadError> {
    let mut raw_lines: Vec<Vec<u8>> = Vec::with_capacity(XST_HEADER_NUM_LINES);
    for i_line in 0..XST_HEADER_NUM_LINES {
        let mut line = vec![];
        let num_read = reader.read_until(b'\n', &mut line)?;
        if num_read == 0 {
            return Err(XstReadError::HeaderTooShort {
                file: file.to_string(),
                expected: XST_HEADER_NUM_LINES,
                lines: i_line,
            });
        }
        if i_line == 0 && line != XST_HEADER_START {
            return Err(XstReadError::HeaderStart {
                file: file.to_string(),
                got: String::from_utf8_lossy(&line).trim_end().to_string(),
            });
        }
        raw_lines.push(line);
    }
    // Safe to index; exactly XST_HEADER_NUM_LINES lines were read.
    let last = &raw_lines[XST_HEADER_NUM_LINES - 1];
    if last != XST_HEADER_STOP {
        return Err(XstReadError::HeaderStop {
            file: file.to_string(),
            got: String::from_utf8_lossy(last).trim_end().to_string(),
        });
    }

    let header_bytes = raw_lines.iter().map(|l| l.len()).sum();
    let lines = raw_lines
        .into_iter()
        .map(String::from_utf8)
        .collect::<Result<Vec<String>, _>>()
        .map_err(|_| XstReadError::HeaderNotUtf8 {
            file: file.to_string(),
        })?;
    for line in &lines {
        trace!("XST header line: {}", line.trim_end());
    }

    let freqs_mhz: Vec1<f64> = parse_tag(&lines, XST_TAG_FREQS, "freq", file)?;
    let mini_arrays: Vec1<u16> = parse_tag(&lines, XST_TAG_MINI_ARRAYS, "ma", file)?;
    let accumulation: Vec1<i64> = parse_tag(&lines, XST_TAG_ACCUMULATION, "accu", file)?;
    let accumulation = match accumulation.as_slice() {
        [a] if *a > 0 && *a <= i64::from(u32::MAX) => *a as u32,
        other => {
            return Err(XstReadError::BadAccumulation {
                file: file.to_string(),
                got: other.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(","),
            })
        }
    };

    if checked_record_bytes(freqs_mhz.len(), mini_arrays.len()).is_none() {
        return Err(XstReadError::ShapeTooLarge {
            file: file.to_string(),
            num_subbands: freqs_mhz.len(),
            num_mini_arrays: mini_arrays.len(),
        });
    }

    debug!(
        "{file}: {} subbands, {} mini-arrays, accumulation {accumulation}, header is {header_bytes} bytes",
        freqs_mhz.len(),
        mini_arrays.len(),
    );

    Ok(XstHeader {
        freqs_mhz,
        mini_arrays,
        accumulation,
        header_bytes,
    })
}

/// The size of a record \[bytes\], or `None` if it can't be addressed. Both
/// counts come straight from the header, so they can't be trusted.
fn checked_record_bytes(num_subbands: usize, num_mini_arrays: usize) -> Option<usize> {
    let num_vis = num_mini_arrays
        .checked_mul(num_mini_arrays)?
        .checked_mul(2)?
        .checked_add(num_mini_arrays)?;
    let record_bytes = num_subbands
        .checked_mul(num_vis)?
        .checked_mul(XST_VIS_BYTES)?
        .checked_add(XST_TIMESTAMP_BYTES)?;
    // Records are decoded into arrays, which can't exceed isize::MAX bytes.
    if record_bytes > isize::MAX as usize {
        None
    } else {
        Some(record_bytes)
    }
}

/// Find the (last) header line containing `tag` and parse the comma-separated
/// values after its `=`. Empty entries (e.g. from a trailing comma) are
/// skipped.
fn parse_tag<T: FromStr>(
    lines: &[String],
    tag: &'static str,
    key: &'static str,
    file: &str,
) -> Result<Vec1<T>, XstReadError> {
    let line = lines
        .iter()
        .rev()
        .find_map(|l| l.find(tag).map(|i| &l[i..]))
        .ok_or_else(|| XstReadError::MissingKey {
            file: file.to_string(),
            tag,
            key,
        })?;

    let values = line
        .split('=')
        .nth(1)
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<T>().map_err(|_| XstReadError::ParseValue {
                file: file.to_string(),
                tag,
                value: v.to_string(),
            })
        })
        .collect::<Result<Vec<T>, _>>()?;

    Vec1::try_from_vec(values).map_err(|_| XstReadError::EmptyKey {
        file: file.to_string(),
        tag,
    })
}
