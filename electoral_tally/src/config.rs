// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A named subdivision (a state, a province) with a fixed number of electors.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Region {
    pub name: String,
    pub electors: u64,
}

impl Region {
    pub fn new(name: &str, electors: u64) -> Region {
        Region {
            name: name.to_string(),
            electors,
        }
    }
}

/// A candidate and the regions claimed as won, in the order they were listed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub regions: Vec<String>,
}

impl Candidate {
    pub fn new(name: &str, regions: &[&str]) -> Candidate {
        Candidate {
            name: name.to_string(),
            regions: regions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ******** Output data structures *********

/// The percentage reported for every candidate when no candidate owns
/// any elector.
pub const ZERO_TOTAL_PERCENTAGE: f64 = 0.0;

#[derive(PartialEq, Debug, Clone)]
pub struct CandidateTally {
    pub name: String,
    pub electors: u64,
    /// Share of the combined total of all candidates, between 0 and 100.
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct TallyResult {
    /// In configuration order.
    pub candidates: Vec<CandidateTally>,
    /// Sum of the electors of all the regions, claimed or not.
    pub total_electors: u64,
    /// Sum of the totals of all the candidates.
    pub combined_total: u64,
    pub majority_threshold: u64,
    /// The majority threshold as a percentage of all the electors.
    pub threshold_percentage: f64,
    pub winner: Option<String>,
    pub unassigned: Vec<String>,
}

/// Errors that prevent building a tally, or querying it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    EmptyRegionName,
    DuplicateRegion(String),
    EmptyCandidateName,
    DuplicateCandidate(String),
    UnknownRegion {
        candidate: String,
        region: String,
    },
    /// The same region is claimed by two candidates, `first` being the one
    /// listed first.
    OverlappingRegion {
        region: String,
        first: String,
        second: String,
    },
    UnknownCandidate(String),
    /// The electors add up to more than a `u64` can hold.
    ElectorOverflow,
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::EmptyRegionName => write!(f, "a region has an empty name"),
            TallyErrors::DuplicateRegion(name) => {
                write!(f, "region {:?} is defined more than once", name)
            }
            TallyErrors::EmptyCandidateName => write!(f, "a candidate has an empty name"),
            TallyErrors::DuplicateCandidate(name) => {
                write!(f, "candidate {:?} is defined more than once", name)
            }
            TallyErrors::UnknownRegion { candidate, region } => write!(
                f,
                "candidate {:?} claims region {:?} which is not in the region table",
                candidate, region
            ),
            TallyErrors::OverlappingRegion {
                region,
                first,
                second,
            } => write!(
                f,
                "region {:?} is claimed by both {:?} and {:?}",
                region, first, second
            ),
            TallyErrors::UnknownCandidate(name) => write!(f, "unknown candidate {:?}", name),
            TallyErrors::ElectorOverflow => write!(f, "the total number of electors is too large"),
        }
    }
}

// ********* Configuration **********

/// What to do when two candidates claim the same region.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OverlapPolicy {
    /// Refuse to build the tally.
    Reject,
    /// The region goes to the candidate listed first. The other claims are
    /// dropped and do not count toward any total.
    FirstListed,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyRules {
    pub overlap_policy: OverlapPolicy,
}

impl TallyRules {
    pub const DEFAULT_RULES: TallyRules = TallyRules {
        overlap_policy: OverlapPolicy::Reject,
    };
}

impl Default for TallyRules {
    fn default() -> Self {
        TallyRules::DEFAULT_RULES
    }
}
