//! Test-only helpers for building configuration documents and flag sets.

use std::fs;

use tempfile::TempDir;

use crate::core::flags::{Arch, CiFlags};
use crate::io::files::INPUT_FILE;

/// A small nightly configuration covering every selection marker.
const SAMPLE_DOCUMENT: &str = "\
[main]
testTopDir = /home/regtester/AMReX_RegTesting/rt-WarpX/
webTopDir = /home/regtester/AMReX_RegTesting/rt-WarpX/web

sourceTree = C_Src
numMakeJobs = 8
COMP = g++
add_to_c_make_command = TEST=TRUE USE_ASSERTION=TRUE
purge_output = 1
numthreads = 2
sendEmailWhenFail = 1
emailTo = regtester@example.org

[AMReX]
dir = /home/regtester/AMReX_RegTesting/amrex/
branch = development

[source]
dir = /home/regtester/AMReX_RegTesting/warpx
branch = development

[Langmuir_2d]
buildDir = .
inputFile = Examples/Langmuir/inputs_2d
dim = 2
addToCompileString =
runtime_params = warpx.do_dynamic_scheduling=0

[Langmuir_x]
buildDir = .
inputFile = Examples/Langmuir/inputs_3d
dim = 3
addToCompileString =
runtime_params = warpx.do_dynamic_scheduling=0

[Langmuir_y]
buildDir = .
inputFile = Examples/Langmuir/inputs_3d
dim = 3
addToCompileString =
runtime_params = warpx.do_dynamic_scheduling=0

[Python_Langmuir]
buildDir = .
inputFile = Examples/Langmuir/PICMI_inputs.py
dim = 3
addToCompileString = USE_PYTHON_MAIN=TRUE PYTHON_MAIN=TRUE
runtime_params =

[Langmuir_3d]
buildDir = .
inputFile = Examples/Langmuir/inputs_3d
dim = 3
addToCompileString = USE_PSATD=FALSE
runtime_params =

[qed_2d]
buildDir = .
inputFile = Examples/QED/inputs_2d
dim = 2
addToCompileString = QED=TRUE
runtime_params =

[rz_laser]
buildDir = .
inputFile = Examples/Laser/inputs_rz
dim = 2
addToCompileString = USE_RZ=TRUE
runtime_params =

[serial_3d]
buildDir = .
inputFile = Examples/Serial/inputs_3d
dim = 3
useMPI = 0
addToCompileString =
runtime_params =

[eb_3d]
buildDir = .
inputFile = Examples/EB/inputs_3d
dim = 3
addToCompileString = USE_EB=TRUE
runtime_params =

[single_precision_3d]
buildDir = .
inputFile = Examples/Precision/inputs_3d
dim = 3
addToCompileString = PRECISION=FLOAT USE_SINGLE_PRECISION_PARTICLES=TRUE
runtime_params =

[python_3d]
buildDir = .
inputFile = Examples/Python/PICMI_inputs_3d.py
dim = 3
addToCompileString = USE_PYTHON_MAIN=TRUE PYTHON_MAIN=TRUE
runtime_params =
";

/// The sample nightly configuration as an owned string.
pub fn sample_document() -> String {
    SAMPLE_DOCUMENT.to_string()
}

/// CPU build with every optional toggle off (including PSATD).
pub fn cpu_flags() -> CiFlags {
    CiFlags {
        arch: Arch::Cpu,
        ..CiFlags::default()
    }
}

/// Build a test block named `name` with extra body `lines`.
pub fn test_block(name: &str, lines: &[&str]) -> String {
    let mut block = format!("[{name}]\nbuildDir = .\ninputFile = inputs_{name}\n");
    for line in lines {
        block.push_str(line);
        block.push('\n');
    }
    block
}

/// Temp directory holding `contents` as the nightly configuration.
pub fn scratch_dir_with(contents: &str) -> TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join(INPUT_FILE), contents).expect("write input");
    temp
}
