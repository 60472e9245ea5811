// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Reader for cross-correlation statistics ("XST") snapshots produced by the
NenuFAR radio telescope.

```no_run
use nenufar_xst::{Polarisation, XstReader};

let reader = XstReader::new("/data/20191111_xst.dat")?;
for matrix in reader.iter_cross_corr(Some(55.0), Polarisation::XX) {
    println!("{}", matrix[(1, 0)]);
}
# Ok::<(), nenufar_xst::XstReadError>(())
```
 */

pub mod cli;
pub mod constants;
pub mod coord;
pub mod instrument;
pub mod io;
pub mod math;

#[cfg(test)]
mod tests;

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI
/// code.
static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use cli::{NenufarXst, XstError};
pub use io::read::{CrossCorrIter, XstHeader, XstReadError, XstReader};
pub use math::{CrossCorrError, Polarisation, PolarisationError};
