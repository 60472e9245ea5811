// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::read_to_string;

use serde_json::Value;
use tempfile::TempDir;

use crate::{get_cmd_output, nenufar_xst, write_xst, JDS, MINI_ARRAYS};

fn read_lines(file: &std::path::Path) -> Vec<Value> {
    read_to_string(file)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_cross_corr_to_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let xst = write_xst(tmp_dir.path());
    let output = tmp_dir.path().join("matrices.jsonl");

    #[rustfmt::skip]
    let cmd = nenufar_xst()
        .args([
            "cross-corr",
            "--data", &xst.display().to_string(),
            "--freq", "59",
            "--pol", "YY",
            "--output", &output.display().to_string(),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "cross-corr failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    let lines = read_lines(&output);
    assert_eq!(lines.len(), JDS.len());
    let n = MINI_ARRAYS.len();
    for (timestep, line) in lines.iter().enumerate() {
        assert_eq!(line["timestep"], timestep);
        assert_eq!(line["jd"], JDS[timestep]);
        assert_eq!(line["subband"], 1);
        assert_eq!(line["freq_mhz"], 60.0);
        assert_eq!(line["polarisation"], "yy");

        let matrix = line["matrix"].as_array().unwrap();
        assert_eq!(matrix.len(), n);
        for (i, row) in matrix.iter().enumerate() {
            let row = row.as_array().unwrap();
            assert_eq!(row.len(), n);
            for (j, v) in row.iter().enumerate() {
                // The lower triangle holds the (normalised) data, the upper
                // triangle is zero.
                let expected = if j <= i { [1.0, 1.0] } else { [0.0, 0.0] };
                assert_eq!(v[0], expected[0], "({i}, {j})");
                assert_eq!(v[1], expected[1], "({i}, {j})");
            }
        }
    }
}

#[test]
fn test_cross_corr_with_arg_file_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let xst = write_xst(tmp_dir.path());
    let output = tmp_dir.path().join("matrices.jsonl");
    let arg_file = tmp_dir.path().join("args.toml");
    std::fs::write(
        &arg_file,
        format!(
            "data = \"{}\"\noutput = \"{}\"\ntimesteps = [2]\n",
            xst.display(),
            output.display()
        ),
    )
    .unwrap();
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = nenufar_xst()
        .args([
            "cross-corr",
            &arg_file.display().to_string(),
            "--pol", "xy",
            "--save-toml", &saved.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "cross-corr failed: {}", cmd.err().unwrap());

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["timestep"], 2);
    assert_eq!(lines[0]["subband"], 0);
    assert_eq!(lines[0]["polarisation"], "xy");

    let saved = read_to_string(saved).unwrap();
    assert!(saved.contains("pol = \"xy\""), "{saved}");
    assert!(saved.contains("timesteps = [2]"), "{saved}");
}

#[test]
fn test_cross_corr_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let xst = write_xst(tmp_dir.path());
    let output = tmp_dir.path().join("matrices.jsonl");

    #[rustfmt::skip]
    let cmd = nenufar_xst()
        .args([
            "cross-corr",
            "--data", &xst.display().to_string(),
            "--output", &output.display().to_string(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "cross-corr failed: {}", cmd.err().unwrap());
    assert!(!output.exists());
}

#[test]
fn test_cross_corr_bad_pol() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let xst = write_xst(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = nenufar_xst()
        .args([
            "cross-corr",
            "--data", &xst.display().to_string(),
            "--pol", "RR",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("RR"), "{stderr}");
}
