use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::warn;

use crate::error::{MxvError, Result};

/// Which kernel family a sweep runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Sequential,
    SharedNaive,
    DistributedNaive,
    SharedTiled,
    DistributedTiled,
}

impl Strategy {
    /// In menu order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Sequential,
        Strategy::SharedNaive,
        Strategy::DistributedNaive,
        Strategy::SharedTiled,
        Strategy::DistributedTiled,
    ];

    /// Map a menu choice in 1..=5 to a strategy.
    pub fn from_choice(choice: u32) -> Result<Self> {
        match choice {
            1..=5 => Ok(Self::ALL[choice as usize - 1]),
            _ => Err(MxvError::InvalidSelector(format!(
                "{choice} is not between 1 and 5"
            ))),
        }
    }

    pub fn choice(self) -> u32 {
        match self {
            Self::Sequential => 1,
            Self::SharedNaive => 2,
            Self::DistributedNaive => 3,
            Self::SharedTiled => 4,
            Self::DistributedTiled => 5,
        }
    }

    /// Label written to the results file.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::SharedNaive => "OpenMP",
            Self::DistributedNaive => "MPI",
            Self::SharedTiled => "OpenMP Tiled",
            Self::DistributedTiled => "MPI Tiled",
        }
    }

    fn menu_name(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::SharedNaive => "Shared-memory Naive",
            Self::DistributedNaive => "Distributed Naive",
            Self::SharedTiled => "Shared-memory Tiled",
            Self::DistributedTiled => "Distributed Tiled",
        }
    }

    /// True for the kernels that need a process group.
    pub fn is_distributed(self) -> bool {
        matches!(self, Self::DistributedNaive | Self::DistributedTiled)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = MxvError;

    fn from_str(s: &str) -> Result<Self> {
        let choice = s
            .trim()
            .parse::<u32>()
            .map_err(|_| MxvError::InvalidSelector(format!("{:?} is not a number", s.trim())))?;
        Self::from_choice(choice)
    }
}

/// Print the strategy menu to `out` and read choices from `input` until one
/// is valid.
///
/// # Errors
///
/// `InvalidSelector` if input ends before a valid choice, `Io` on read or
/// write failure.
pub fn prompt_strategy<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<Strategy> {
    writeln!(out, "Choose a program to run:")?;
    for s in Strategy::ALL {
        writeln!(out, "{}. {}", s.choice(), s.menu_name())?;
    }
    out.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(MxvError::InvalidSelector(
                "input ended before a strategy was chosen".into(),
            ));
        }
        match line.parse::<Strategy>() {
            Ok(strategy) => return Ok(strategy),
            Err(_) => {
                write!(out, "Invalid choice! Please enter a number between 1 and 5: ")?;
                out.flush()?;
            }
        }
    }
}

/// Use `given` when it names a valid strategy, otherwise fall back to
/// [`prompt_strategy`]. An invalid `given` is reported on `out` first.
pub fn resolve_strategy<R: BufRead, W: Write>(
    given: Option<&str>,
    input: R,
    mut out: W,
) -> Result<Strategy> {
    if let Some(given) = given {
        match given.parse::<Strategy>() {
            Ok(strategy) => return Ok(strategy),
            Err(e) => {
                warn!("--strategy rejected: {}", e);
                writeln!(out, "Invalid choice {:?}, pick from the menu instead.", given)?;
            }
        }
    }
    prompt_strategy(input, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_round_trip() {
        for s in Strategy::ALL {
            assert_eq!(Strategy::from_choice(s.choice()).unwrap(), s);
        }
        assert!(Strategy::from_choice(0).is_err());
        assert!(Strategy::from_choice(6).is_err());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = Strategy::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            ["Sequential", "OpenMP", "MPI", "OpenMP Tiled", "MPI Tiled"]
        );
    }

    #[test]
    fn test_prompt_reprompts_until_valid() {
        let input = b"abc\n9\n\n4\n".as_slice();
        let mut out = Vec::new();
        let s = prompt_strategy(input, &mut out).unwrap();
        assert_eq!(s, Strategy::SharedTiled);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Choose a program to run:\n1. Sequential\n"));
        assert_eq!(text.matches("Invalid choice!").count(), 3);
    }

    #[test]
    fn test_prompt_eof() {
        let err = prompt_strategy(b"7\n".as_slice(), Vec::new()).unwrap_err();
        assert!(matches!(err, MxvError::InvalidSelector(_)));
    }

    #[test]
    fn test_valid_flag_skips_menu() {
        let mut out = Vec::new();
        let s = resolve_strategy(Some("3"), b"".as_slice(), &mut out).unwrap();
        assert_eq!(s, Strategy::DistributedNaive);
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_flag_falls_back_to_menu() {
        let mut out = Vec::new();
        let s = resolve_strategy(Some("7"), b"x\n2\n".as_slice(), &mut out).unwrap();
        assert_eq!(s, Strategy::SharedNaive);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Invalid choice \"7\""));
        assert!(text.contains("Choose a program to run:"));
        assert_eq!(text.matches("Please enter a number").count(), 1);
    }

    #[test]
    fn test_no_flag_prompts() {
        let s = resolve_strategy(None, b"5\n".as_slice(), Vec::new()).unwrap();
        assert_eq!(s, Strategy::DistributedTiled);
    }
}
