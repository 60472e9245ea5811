// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print out the metadata of an XST file.

use std::path::PathBuf;

use clap::Parser;
use hifitime::Duration;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP};
use crate::{
    coord::{eq_zenith, lst_deg, wavelength_m},
    instrument::nenufar_position,
    io::read::XstReader,
    XstError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct InfoArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    /// Path to the XST file to be inspected.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT DATA")]
    pub(super) data: Option<PathBuf>,
}

impl InfoArgs {
    pub(super) fn merge(self) -> Result<InfoArgs, XstError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let InfoArgs { args_file: _, data } = unpack_arg_file!(arg_file);

            Ok(InfoArgs {
                args_file: None,
                data: cli_args.data.or(data),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Reading and printing are all `info` does, so a dry run is the same as a
    /// normal run.
    pub(super) fn run(self, _dry_run: bool) -> Result<(), XstError> {
        let file = self.data.ok_or_else(|| {
            XstError::XstPath("No XST file was supplied; use --data".to_string())
        })?;
        let reader = XstReader::new(file)?;
        let header = reader.header();
        let timestamps = reader.timestamps();
        let jds = reader.timestamps_jd();

        let mut printer = InfoPrinter::new(format!("XST file {}", reader.file().display()).into());
        printer.push_block(vec![
            format!("Header:  {} bytes", header.header_bytes).into(),
            format!("Records: {} x {} bytes", reader.num_timesteps(), header.record_bytes()).into(),
        ]);

        // Frequencies aren't guaranteed to be sorted.
        let (min_freq, max_freq) = header
            .freqs_mhz
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &f| {
                (lo.min(f), hi.max(f))
            });
        printer.push_block(vec![
            format!(
                "{} subbands: {min_freq} MHz to {max_freq} MHz",
                header.num_subbands()
            )
            .into(),
            format!(
                "Wavelengths: {:.3} m to {:.3} m",
                wavelength_m(max_freq),
                wavelength_m(min_freq)
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("{} mini-arrays", header.num_mini_arrays()).into(),
            format!("[{}]", header.mini_arrays.iter().join(", ")).into(),
            format!("{} baselines (including autos)", reader.baselines().len()).into(),
        ]);
        printer.push_line(format!("Accumulation: {}", header.accumulation).into());

        let first = *timestamps.first();
        let last = *timestamps.last();
        printer.push_block(vec![
            format!("First timestamp: {first} (JD {})", jds.first()).into(),
            format!("Last timestamp:  {last} (JD {})", jds.last()).into(),
        ]);

        let pos = nenufar_position();
        let dut1 = Duration::default();
        let zenith = eq_zenith(first, pos, dut1);
        printer.push_block(vec![
            format!(
                "LST at first timestamp: {:.4}°",
                lst_deg(first, pos.longitude_rad, dut1)
            )
            .into(),
            format!(
                "Zenith at first timestamp: RA {:.4}°, Dec {:.4}°",
                zenith.ra.to_degrees(),
                zenith.dec.to_degrees()
            )
            .into(),
        ]);
        printer.display();

        if jds.windows(2).any(|w| w[1] < w[0]) {
            "Timestamps are not in increasing order".warn();
        }
        display_warnings();

        Ok(())
    }
}
