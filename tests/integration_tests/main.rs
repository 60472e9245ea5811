// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod cross_corr;
mod info;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use byteorder::{LittleEndian, WriteBytesExt};

fn nenufar_xst() -> Command {
    Command::cargo_bin("nenufar-xst").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Frequencies [MHz] of the synthetic XST file.
const FREQS: [f64; 2] = [40.0, 60.0];
/// Mini-array indices of the synthetic XST file.
const MINI_ARRAYS: [u16; 3] = [2, 5, 11];
const ACCUMULATION: u32 = 4;
const JDS: [f64; 3] = [2459000.5, 2459000.5001, 2459000.5002];

/// Write a small XST file into `dir`. Every raw visibility is `4 + 4i`, so
/// every decoded visibility is `1 + i`.
fn write_xst(dir: &Path) -> PathBuf {
    let file = dir.join("snapshot_xst.dat");
    let mut f = BufWriter::new(File::create(&file).unwrap());
    write!(
        f,
        "HeaderStart\nFreq.List={},{}\nMr.List={},{},{}\naccumulation={ACCUMULATION}\nHeaderStop\n",
        FREQS[0], FREQS[1], MINI_ARRAYS[0], MINI_ARRAYS[1], MINI_ARRAYS[2]
    )
    .unwrap();

    let n = MINI_ARRAYS.len();
    let num_vis = 2 * n * n + n;
    for jd in JDS {
        f.write_f64::<LittleEndian>(jd).unwrap();
        for _ in 0..FREQS.len() * num_vis {
            f.write_f32::<LittleEndian>(ACCUMULATION as f32).unwrap();
            f.write_f32::<LittleEndian>(ACCUMULATION as f32).unwrap();
        }
    }
    f.flush().unwrap();
    file
}
