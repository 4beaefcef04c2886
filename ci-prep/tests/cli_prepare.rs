//! CLI tests for the `ci-prep` binary.
//!
//! Spawns the binary in a scratch directory with an explicit `WARPX_*`
//! environment and checks the written `ci-tests.ini`, stdout and exit code.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use ci_prep::core::flags::{
    ARCH_VAR, CCACHE_VAR, EB_VAR, NUM_MAKE_JOBS_VAR, OPENPMD_VAR, PSATD_VAR, PYTHON_MAIN_VAR,
    QED_VAR, REGULAR_CARTESIAN_2D_VAR, REGULAR_CARTESIAN_3D_VAR, RZ_OR_NOMPI_VAR,
    SINGLE_PRECISION_VAR,
};
use ci_prep::exit_codes;
use ci_prep::io::files::{INPUT_FILE, OUTPUT_FILE};
use ci_prep::test_support::{sample_document, scratch_dir_with};

const ALL_VARS: [&str; 12] = [
    ARCH_VAR,
    REGULAR_CARTESIAN_2D_VAR,
    REGULAR_CARTESIAN_3D_VAR,
    PSATD_VAR,
    PYTHON_MAIN_VAR,
    SINGLE_PRECISION_VAR,
    RZ_OR_NOMPI_VAR,
    QED_VAR,
    EB_VAR,
    OPENPMD_VAR,
    CCACHE_VAR,
    NUM_MAKE_JOBS_VAR,
];

fn run_in(dir: &Path, env: &[(&str, &str)], args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ci-prep"));
    command.current_dir(dir).args(args).env_remove("RUST_LOG");
    for var in ALL_VARS {
        command.env_remove(var);
    }
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("run ci-prep")
}

fn output_text(dir: &Path) -> String {
    fs::read_to_string(dir.join(OUTPUT_FILE)).expect("read ci-tests.ini")
}

#[test]
fn default_run_keeps_every_test_with_psatd() {
    let temp = scratch_dir_with(&sample_document());
    let output = run_in(temp.path(), &[], &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Compiling for CPU\n");

    let text = output_text(temp.path());
    assert!(text.contains("[Langmuir_2d]\ndoComparison = 0\nbuildDir = ."));
    assert!(text.contains("addToCompileString = USE_PSATD=TRUE "));
    assert!(!text.contains("USE_PSATD=FALSE"));
    assert!(text.contains("numthreads = 1"));
    assert!(text.contains("sendEmailWhenFail = 0"));
    assert!(text.contains("numMakeJobs = 8"));
    assert!(!text.contains("/home/regtester/AMReX_RegTesting"));
    assert!(!text.contains("[Python_Langmuir]"));
    assert!(!text.contains("[Langmuir_x]"));
}

#[test]
fn gpu_regular_3d_run() {
    let temp = scratch_dir_with(&sample_document());
    let output = run_in(
        temp.path(),
        &[
            (ARCH_VAR, "GPU"),
            (REGULAR_CARTESIAN_3D_VAR, "TRUE"),
            (NUM_MAKE_JOBS_VAR, "2"),
        ],
        &["--list"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Compiling for GPU\nSelecting tests without dim = 2\n"));
    assert!(stdout.ends_with("test: Langmuir_3d\n"));

    let text = output_text(temp.path());
    assert!(text.contains("COMP = pgi"));
    assert!(text.contains("numMakeJobs = 2"));
    assert!(text.contains("USE_GPU=TRUE USE_OMP=FALSE USE_ACC=TRUE"));
    assert!(!text.contains("[qed_2d]"));
    assert!(!text.contains("[serial_3d]"));
}

#[test]
fn rz_or_nompi_run_lists_both_groups() {
    let temp = scratch_dir_with(&sample_document());
    let output = run_in(temp.path(), &[(RZ_OR_NOMPI_VAR, "TRUE")], &["--list"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with("test: rz_laser\ntest: serial_3d\n"));
}

#[test]
fn custom_paths_are_honoured() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("nightly.ini"), sample_document()).expect("write input");
    let output = run_in(
        temp.path(),
        &[(QED_VAR, "TRUE")],
        &["--input", "nightly.ini", "--output", "qed.ini"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let text = fs::read_to_string(temp.path().join("qed.ini")).expect("read qed.ini");
    assert!(text.contains("[qed_2d]"));
    assert!(!text.contains("[Langmuir_2d]"));
    assert!(!temp.path().join(OUTPUT_FILE).exists());
}

#[test]
fn missing_input_exits_invalid_without_output() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_in(temp.path(), &[], &[]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains(INPUT_FILE));
    assert!(!temp.path().join(OUTPUT_FILE).exists());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp = scratch_dir_with(&sample_document());
    let env = [(ARCH_VAR, "GPU"), (EB_VAR, "TRUE")];
    run_in(temp.path(), &env, &[]);
    let first = output_text(temp.path());
    run_in(temp.path(), &env, &[]);
    assert_eq!(first, output_text(temp.path()));
}
