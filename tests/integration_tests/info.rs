// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, nenufar_xst, write_xst};

#[test]
fn test_info() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let xst = write_xst(tmp_dir.path());

    let cmd = nenufar_xst()
        .args(["info", "--data", &xst.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "info failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("2 subbands: 40 MHz to 60 MHz"), "{stdout}");
    assert!(stdout.contains("3 mini-arrays"), "{stdout}");
    assert!(stdout.contains("[2, 5, 11]"), "{stdout}");
    assert!(stdout.contains("Accumulation: 4"), "{stdout}");
    assert!(stdout.contains("JD 2459000.5"), "{stdout}");
}

#[test]
fn test_info_missing_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let missing = tmp_dir.path().join("nothing.dat");

    let cmd = nenufar_xst()
        .args(["info", "--data", &missing.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unable to find"), "{stderr}");
}

#[test]
fn test_info_garbage_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let garbage = tmp_dir.path().join("garbage.dat");
    std::fs::write(&garbage, b"SIMPLE  =                    T\n").unwrap();

    let cmd = nenufar_xst()
        .args(["info", "--data", &garbage.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("HeaderStart"), "{stderr}");
}
