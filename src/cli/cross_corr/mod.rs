// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reconstruct cross-correlation matrices from an XST file and write them out
//! as JSON lines.


use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info, trace};
use marlu::c32;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use super::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP, POL_HELP};
use crate::{
    io::read::XstReader,
    math::{Polarisation, PolarisationError},
    XstError, PROGRESS_BARS,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct CrossCorrArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    /// Path to the XST file.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT DATA")]
    pub(super) data: Option<PathBuf>,

    /// The frequency to use [MHz]. The subband closest to this frequency is
    /// used. Default: the first subband.
    #[clap(short, long, help_heading = "INPUT DATA")]
    pub(super) freq: Option<f64>,

    #[clap(short, long, help = POL_HELP.as_str(), help_heading = "INPUT DATA")]
    pub(super) pol: Option<String>,

    /// The timesteps to use (zero indexed). Default: all timesteps.
    #[clap(short, long, multiple_values(true), help_heading = "INPUT DATA")]
    pub(super) timesteps: Option<Vec<usize>>,

    /// The file to write JSON lines to. Default: stdout.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl CrossCorrArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    pub(super) fn merge(self) -> Result<CrossCorrArgs, XstError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let CrossCorrArgs {
                args_file: _,
                data,
                freq,
                pol,
                timesteps,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(CrossCorrArgs {
                args_file: None,
                data: cli_args.data.or(data),
                freq: cli_args.freq.or(freq),
                pol: cli_args.pol.or(pol),
                timesteps: cli_args.timesteps.or(timesteps),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<CrossCorrParams, XstError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            data,
            freq,
            pol,
            timesteps,
            output,
        } = self;

        let file = data.ok_or(CrossCorrArgsError::NoData)?;
        let pol = match pol {
            Some(p) => Polarisation::parse(&p).map_err(CrossCorrArgsError::from)?,
            None => Polarisation::default(),
        };
        let reader = XstReader::new(file)?;

        let subband = match freq {
            Some(f) => {
                let subband = reader.closest_subband(f);
                let actual = reader.freqs_mhz()[subband];
                if (actual - f).abs() > f64::EPSILON {
                    format!("Requested {f} MHz; using subband {subband} at {actual} MHz").warn();
                }
                subband
            }
            None => 0,
        };

        let num_timesteps = reader.num_timesteps();
        let timesteps = match timesteps {
            Some(mut ts) => {
                ts.sort_unstable();
                ts.dedup();
                if let Some(&bad) = ts.iter().find(|&&t| t >= num_timesteps) {
                    return Err(CrossCorrArgsError::TimestepOutOfRange {
                        got: bad,
                        max: num_timesteps - 1,
                    }
                    .into());
                }
                // An empty list on the command line isn't possible, but it is
                // in an argument file.
                Vec1::try_from_vec(ts).map_err(|_| CrossCorrArgsError::NoTimesteps)?
            }
            None => Vec1::try_from_vec((0..num_timesteps).collect())
                .map_err(|_| CrossCorrArgsError::NoTimesteps)?,
        };

        let mut printer = InfoPrinter::new("Cross-correlation matrices".into());
        printer.push_line(format!("File: {}", reader.file().display()).into());
        printer.push_line(
            format!(
                "Subband {subband} ({} MHz), {pol}",
                reader.freqs_mhz()[subband]
            )
            .into(),
        );
        printer.push_line(
            format!(
                "{} of {num_timesteps} timesteps, {} mini-arrays",
                timesteps.len(),
                reader.header().num_mini_arrays()
            )
            .into(),
        );
        printer.push_line(
            match &output {
                Some(o) => format!("Writing to {}", o.display()),
                None => "Writing to stdout".to_string(),
            }
            .into(),
        );
        printer.display();
        display_warnings();

        Ok(CrossCorrParams {
            reader,
            subband,
            pol,
            timesteps,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), XstError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()
    }
}

struct CrossCorrParams {
    reader: XstReader,
    subband: usize,
    pol: Polarisation,
    /// Sorted and unique.
    timesteps: Vec1<usize>,
    output: Option<PathBuf>,
}

/// A single line of output.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CrossCorrRecord {
    pub(crate) timestep: usize,
    pub(crate) jd: f64,
    pub(crate) freq_mhz: f64,
    pub(crate) subband: usize,
    pub(crate) polarisation: Polarisation,
    /// Row-major (re, im) pairs.
    pub(crate) matrix: Vec<Vec<[f32; 2]>>,
}

impl CrossCorrRecord {
    fn new(
        timestep: usize,
        jd: f64,
        freq_mhz: f64,
        subband: usize,
        polarisation: Polarisation,
        matrix: ArrayView2<c32>,
    ) -> CrossCorrRecord {
        CrossCorrRecord {
            timestep,
            jd,
            freq_mhz,
            subband,
            polarisation,
            matrix: matrix
                .outer_iter()
                .map(|row| row.iter().map(|v| [v.re, v.im]).collect())
                .collect(),
        }
    }
}

impl CrossCorrParams {
    fn run(self) -> Result<(), XstError> {
        let CrossCorrParams {
            reader,
            subband,
            pol,
            timesteps,
            output,
        } = self;

        let mut writer: Box<dyn Write> = match &output {
            Some(o) => Box::new(BufWriter::new(File::create(o)?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        };

        let pb = ProgressBar::with_draw_target(
            Some(timesteps.len() as _),
            if PROGRESS_BARS.load() && output.is_some() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:17}: [{wide_bar:.blue}] {pos:2}/{len:2} timesteps ({elapsed_precise}<{eta_precise})")
                .unwrap()
                .progress_chars("=> "),
        )
        .with_position(0)
        .with_message("Cross correlating");

        let freq_mhz = reader.freqs_mhz()[subband];
        let jds = reader.timestamps_jd();
        let mut iter = reader.iter_cross_corr_subband(subband, pol);
        let mut next_timestep = 0;
        for &timestep in timesteps.iter() {
            let matrix = match iter.nth(timestep - next_timestep) {
                Some(m) => m,
                None => break,
            };
            next_timestep = timestep + 1;
            trace!("Writing timestep {timestep}");

            let record = CrossCorrRecord::new(
                timestep,
                jds[timestep],
                freq_mhz,
                subband,
                pol,
                matrix.view(),
            );
            serde_json::to_writer(&mut writer, &record)?;
            writer.write_all(b"\n")?;
            pb.inc(1);
        }
        writer.flush()?;
        pb.finish_with_message("Finished");

        info!("Wrote {} matrices", timesteps.len());
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum CrossCorrArgsError {
    #[error("No XST file was supplied; use --data")]
    NoData,

    #[error("No timesteps were selected")]
    NoTimesteps,

    #[error(transparent)]
    Polarisation(#[from] PolarisationError),

    #[error("Timestep {got} was requested, but the last available timestep is {max}")]
    TimestepOutOfRange { got: usize, max: usize },
}
