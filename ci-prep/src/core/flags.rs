//! Environment flags controlling the CI configuration rewrite.
//!
//! Flags are resolved once at startup into an immutable [`CiFlags`] and passed
//! explicitly to every transformation. Boolean flags are enabled only by the
//! exact string `TRUE`; anything else falls through to the default.

use std::fmt;

use tracing::warn;

pub const ARCH_VAR: &str = "WARPX_TEST_ARCH";
pub const REGULAR_CARTESIAN_2D_VAR: &str = "WARPX_CI_REGULAR_CARTESIAN_2D";
pub const REGULAR_CARTESIAN_3D_VAR: &str = "WARPX_CI_REGULAR_CARTESIAN_3D";
pub const PSATD_VAR: &str = "WARPX_CI_PSATD";
pub const PYTHON_MAIN_VAR: &str = "WARPX_CI_PYTHON_MAIN";
pub const SINGLE_PRECISION_VAR: &str = "WARPX_CI_SINGLE_PRECISION";
pub const RZ_OR_NOMPI_VAR: &str = "WARPX_CI_RZ_OR_NOMPI";
pub const QED_VAR: &str = "WARPX_CI_QED";
pub const EB_VAR: &str = "WARPX_CI_EB";
pub const OPENPMD_VAR: &str = "WARPX_CI_OPENPMD";
pub const CCACHE_VAR: &str = "WARPX_CI_CCACHE";
pub const NUM_MAKE_JOBS_VAR: &str = "WARPX_CI_NUM_MAKE_JOBS";

const TRUE_VALUE: &str = "TRUE";

/// Target architecture for the compiled tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Arch {
    #[default]
    Cpu,
    Gpu,
    /// Unrecognised value; behaves like [`Arch::Cpu`] but keeps the raw text
    /// for the `Compiling for ...` message.
    Other(String),
}

impl Arch {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "CPU" => Arch::Cpu,
            "GPU" => Arch::Gpu,
            other => Arch::Other(other.to_string()),
        }
    }

    pub fn is_gpu(&self) -> bool {
        matches!(self, Arch::Gpu)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::Cpu => f.write_str("CPU"),
            Arch::Gpu => f.write_str("GPU"),
            Arch::Other(raw) => f.write_str(raw),
        }
    }
}

/// Top-level test-selection policies, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    RegularCartesian2d,
    RegularCartesian3d,
    PythonMain,
    SinglePrecision,
    RzOrNoMpi,
    Qed,
    EmbeddedBoundary,
}

impl Scenario {
    pub const ALL: [Scenario; 7] = [
        Scenario::RegularCartesian2d,
        Scenario::RegularCartesian3d,
        Scenario::PythonMain,
        Scenario::SinglePrecision,
        Scenario::RzOrNoMpi,
        Scenario::Qed,
        Scenario::EmbeddedBoundary,
    ];

    pub fn env_var(self) -> &'static str {
        match self {
            Scenario::RegularCartesian2d => REGULAR_CARTESIAN_2D_VAR,
            Scenario::RegularCartesian3d => REGULAR_CARTESIAN_3D_VAR,
            Scenario::PythonMain => PYTHON_MAIN_VAR,
            Scenario::SinglePrecision => SINGLE_PRECISION_VAR,
            Scenario::RzOrNoMpi => RZ_OR_NOMPI_VAR,
            Scenario::Qed => QED_VAR,
            Scenario::EmbeddedBoundary => EB_VAR,
        }
    }
}

/// Resolved flag set for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiFlags {
    pub arch: Arch,
    pub regular_cartesian_2d: bool,
    pub regular_cartesian_3d: bool,
    pub python_main: bool,
    pub single_precision: bool,
    pub rz_or_nompi: bool,
    pub qed: bool,
    pub eb: bool,
    /// Always build with PSATD support unless explicitly turned off.
    pub psatd: bool,
    pub openpmd: bool,
    pub ccache: bool,
    /// Free-form override for `numMakeJobs`; `None` keeps the file's value.
    pub num_make_jobs: Option<String>,
}

impl CiFlags {
    /// Resolve flags from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve flags through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| is_true(name, lookup(name).as_deref());
        Self {
            arch: lookup(ARCH_VAR)
                .map(|raw| Arch::parse(&raw))
                .unwrap_or_default(),
            regular_cartesian_2d: flag(REGULAR_CARTESIAN_2D_VAR),
            regular_cartesian_3d: flag(REGULAR_CARTESIAN_3D_VAR),
            python_main: flag(PYTHON_MAIN_VAR),
            single_precision: flag(SINGLE_PRECISION_VAR),
            rz_or_nompi: flag(RZ_OR_NOMPI_VAR),
            qed: flag(QED_VAR),
            eb: flag(EB_VAR),
            psatd: is_true(
                PSATD_VAR,
                Some(lookup(PSATD_VAR).as_deref().unwrap_or(TRUE_VALUE)),
            ),
            openpmd: flag(OPENPMD_VAR),
            ccache: flag(CCACHE_VAR),
            num_make_jobs: lookup(NUM_MAKE_JOBS_VAR),
        }
    }

    pub fn scenario_enabled(&self, scenario: Scenario) -> bool {
        match scenario {
            Scenario::RegularCartesian2d => self.regular_cartesian_2d,
            Scenario::RegularCartesian3d => self.regular_cartesian_3d,
            Scenario::PythonMain => self.python_main,
            Scenario::SinglePrecision => self.single_precision,
            Scenario::RzOrNoMpi => self.rz_or_nompi,
            Scenario::Qed => self.qed,
            Scenario::EmbeddedBoundary => self.eb,
        }
    }

    /// Enabled scenarios in application order.
    pub fn scenarios(&self) -> Vec<Scenario> {
        Scenario::ALL
            .into_iter()
            .filter(|scenario| self.scenario_enabled(*scenario))
            .collect()
    }
}

fn is_true(name: &str, value: Option<&str>) -> bool {
    match value {
        Some(TRUE_VALUE) => true,
        Some(other) => {
            if other.eq_ignore_ascii_case("true") || other == "1" || other.eq_ignore_ascii_case("on")
            {
                warn!(
                    var = name,
                    value = other,
                    "flag only recognises the exact value TRUE; treating as false"
                );
            }
            false
        }
        None => false,
    }
}
