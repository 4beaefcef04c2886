//! Deterministic selection of the test blocks a CI job runs.
//!
//! Selection is a fixed sequence of substring filters per enabled scenario.
//! Scenarios compose sequentially: each one filters the output of the one
//! before it.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, Result, bail};

use crate::core::flags::{CiFlags, Scenario};

pub const DIM_2: &str = "dim = 2";
pub const USE_RZ: &str = "USE_RZ=TRUE";
pub const PYTHON_MAIN: &str = "PYTHON_MAIN=TRUE";
pub const PRECISION_FLOAT: &str = "PRECISION=FLOAT";
pub const SINGLE_PRECISION_PARTICLES: &str = "USE_SINGLE_PRECISION_PARTICLES=TRUE";
pub const NO_MPI: &str = "useMPI = 0";
pub const QED: &str = "QED=TRUE";
pub const USE_EB: &str = "USE_EB=TRUE";

const SINGLE_PRECISION: &[&str] = &[PRECISION_FLOAT, SINGLE_PRECISION_PARTICLES];

/// Whether a filter keeps or drops matching blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Keep only blocks containing every match string.
    Include,
    /// Drop every block containing any match string.
    Exclude,
}

impl FromStr for SelectMode {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "true" | "include" => Ok(SelectMode::Include),
            "false" | "exclude" => Ok(SelectMode::Exclude),
            other => bail!("select mode must be true/include or false/exclude, got {other:?}"),
        }
    }
}

impl From<bool> for SelectMode {
    fn from(keep: bool) -> Self {
        if keep {
            SelectMode::Include
        } else {
            SelectMode::Exclude
        }
    }
}

/// One substring filter applied during selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStep {
    pub match_string: &'static str,
    pub mode: SelectMode,
}

impl fmt::Display for FilterStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SelectMode::Include => write!(f, "Selecting tests with {}", self.match_string),
            SelectMode::Exclude => write!(f, "Selecting tests without {}", self.match_string),
        }
    }
}

/// Selected blocks plus the filters applied, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub blocks: Vec<String>,
    pub steps: Vec<FilterStep>,
}

/// Filter `blocks` by literal, case-sensitive substring matches.
///
/// Match strings are applied one at a time, so an empty list keeps every block
/// in either mode.
pub fn select_tests(blocks: &[String], match_strings: &[&str], mode: SelectMode) -> Vec<String> {
    blocks
        .iter()
        .filter(|block| match mode {
            SelectMode::Include => match_strings.iter().all(|m| block.contains(m)),
            SelectMode::Exclude => !match_strings.iter().any(|m| block.contains(m)),
        })
        .cloned()
        .collect()
}

/// Apply every enabled scenario to `blocks`.
pub fn select_blocks(blocks: &[String], flags: &CiFlags) -> Selection {
    let mut selection = Selection {
        blocks: blocks.to_vec(),
        steps: Vec::new(),
    };
    for scenario in flags.scenarios() {
        selection.apply_scenario(scenario);
    }
    selection
}

impl Selection {
    fn filter(&mut self, match_strings: &[&'static str], mode: SelectMode) {
        let current = std::mem::take(&mut self.blocks);
        self.blocks = self.filtered(&current, match_strings, mode);
    }

    fn filtered(
        &mut self,
        blocks: &[String],
        match_strings: &[&'static str],
        mode: SelectMode,
    ) -> Vec<String> {
        self.steps
            .extend(match_strings.iter().map(|&match_string| FilterStep {
                match_string,
                mode,
            }));
        select_tests(blocks, match_strings, mode)
    }

    fn apply_scenario(&mut self, scenario: Scenario) {
        use SelectMode::{Exclude, Include};

        match scenario {
            Scenario::RegularCartesian2d | Scenario::RegularCartesian3d => {
                let dim_mode = if scenario == Scenario::RegularCartesian2d {
                    Include
                } else {
                    Exclude
                };
                self.filter(&[DIM_2], dim_mode);
                self.filter(&[USE_RZ], Exclude);
                self.filter(&[PYTHON_MAIN], Exclude);
                self.filter(SINGLE_PRECISION, Exclude);
                self.filter(&[NO_MPI], Exclude);
                self.filter(&[QED], Exclude);
                self.filter(&[USE_EB], Exclude);
            }
            Scenario::PythonMain => {
                self.filter(&[PYTHON_MAIN], Include);
                self.filter(&[USE_EB], Exclude);
            }
            Scenario::SinglePrecision => self.filter(SINGLE_PRECISION, Include),
            Scenario::RzOrNoMpi => {
                self.filter(&[PYTHON_MAIN], Exclude);
                // Concatenation, not union: a block that is both RZ and
                // no-MPI is emitted twice.
                let base = self.blocks.clone();
                let mut rz = self.filtered(&base, &[USE_RZ], Include);
                let no_mpi = self.filtered(&base, &[NO_MPI], Include);
                rz.extend(no_mpi);
                self.blocks = rz;
            }
            Scenario::Qed => self.filter(&[QED], Include),
            Scenario::EmbeddedBoundary => self.filter(&[USE_EB], Include),
        }
    }
}
