/*!

Tally of a winner-take-all electoral contest.

Each region carries a fixed number of electors and is won as a whole by at most
one candidate. From the region table and the list of regions won by each
candidate, this crate computes the elector totals, the share of each candidate
and the majority threshold, and tells which candidate won a given region.

```
use electoral_tally::*;

let regions = vec![Region::new("A", 10), Region::new("B", 20), Region::new("C", 5)];
let candidates = vec![Candidate::new("X", &["A"]), Candidate::new("Y", &["B", "C"])];

let tally = Tally::new(&regions, &candidates, &TallyRules::DEFAULT_RULES)?;
assert_eq!(tally.total_for("Y")?, 25);
assert_eq!(tally.classify("A"), Some("X"));
assert_eq!(tally.classify("Z"), None);
# Ok::<(), TallyErrors>(())
```
*/

pub mod builder;
mod config;
pub mod manual;

use log::{debug, info, warn};

use std::collections::HashMap;

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct RegionId(u32);

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CandidateId(u32);

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct ElectorCount(u64);

impl ElectorCount {
    const EMPTY: ElectorCount = ElectorCount(0);

    fn checked_add(self, rhs: ElectorCount) -> Result<ElectorCount, TallyErrors> {
        self.0
            .checked_add(rhs.0)
            .map(ElectorCount)
            .ok_or(TallyErrors::ElectorOverflow)
    }
}

// Sums without wrapping or panicking.
fn checked_sum<I: Iterator<Item = ElectorCount>>(iter: I) -> Result<ElectorCount, TallyErrors> {
    iter.fold(Ok(ElectorCount::EMPTY), |acc, ec| acc?.checked_add(ec))
}

/// A validated contest, indexed for lookups.
///
/// The regions and the candidates keep the order in which they were given.
/// Once built, a tally is immutable and every query is a pure function of
/// the input tables.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Tally {
    // Indexed by RegionId.
    regions: Vec<(String, ElectorCount)>,
    region_ids: HashMap<String, RegionId>,
    // Indexed by CandidateId.
    candidates: Vec<String>,
    candidate_ids: HashMap<String, CandidateId>,
    // Invariant: a region has at most one owner.
    owners: HashMap<RegionId, CandidateId>,
    // Indexed by CandidateId.
    totals: Vec<ElectorCount>,
    // Sum of the electors of all the regions.
    total_count: ElectorCount,
    // Sum of the totals. Never above total_count.
    combined_count: ElectorCount,
}

impl Tally {
    /// Validates the tables and builds the tally.
    ///
    /// Arguments:
    /// * `regions` the region table. Names must be unique and non-empty.
    /// * `candidates` the candidates, with the regions they won. Every claimed
    /// region must be in the region table.
    /// * `rules` how to treat regions claimed by more than one candidate.
    pub fn new(
        regions: &[Region],
        candidates: &[Candidate],
        rules: &TallyRules,
    ) -> Result<Tally, TallyErrors> {
        debug!(
            "Tally::new: {} regions, {} candidates, rules: {:?}",
            regions.len(),
            candidates.len(),
            rules
        );
        let (region_table, region_ids) = check_regions(regions)?;
        let (candidate_names, candidate_ids) = check_candidates(candidates)?;
        let owners = assign_regions(candidates, &region_ids, rules.overlap_policy)?;

        let total_count = checked_sum(region_table.iter().map(|(_, ec)| *ec))?;
        let mut totals: Vec<ElectorCount> = vec![ElectorCount::EMPTY; candidate_names.len()];
        for (rid, cid) in owners.iter() {
            let idx = cid.0 as usize;
            totals[idx] = totals[idx].checked_add(region_table[rid.0 as usize].1)?;
        }
        let combined_count = checked_sum(totals.iter().cloned())?;

        Ok(Tally {
            regions: region_table,
            region_ids,
            candidates: candidate_names,
            candidate_ids,
            owners,
            totals,
            total_count,
            combined_count,
        })
    }

    /// The candidate who won the region, or `None` if nobody claimed it.
    ///
    /// Names that are not in the region table are unassigned as well.
    pub fn classify(&self, region: &str) -> Option<&str> {
        let rid = self.region_ids.get(region)?;
        let cid = self.owners.get(rid)?;
        Some(self.candidates[cid.0 as usize].as_str())
    }

    /// The number of electors of the regions won by this candidate.
    pub fn total_for(&self, candidate: &str) -> Result<u64, TallyErrors> {
        let cid = self.candidate_id(candidate)?;
        Ok(self.totals[cid.0 as usize].0)
    }

    /// The share of this candidate in the combined total of all the
    /// candidates, between 0 and 100.
    ///
    /// When no candidate holds any elector, returns `ZERO_TOTAL_PERCENTAGE`.
    pub fn percentage_for(&self, candidate: &str) -> Result<f64, TallyErrors> {
        let cid = self.candidate_id(candidate)?;
        Ok(percentage(self.totals[cid.0 as usize], self.combined_count()))
    }

    /// The majority threshold, as a percentage of all the electors.
    ///
    /// This is where the needle sits on a results bar.
    pub fn threshold(&self) -> f64 {
        percentage(
            ElectorCount(self.majority_threshold()),
            self.total_count(),
        )
    }

    /// The smallest number of electors that wins the contest: strictly more
    /// than half of all the electors.
    pub fn majority_threshold(&self) -> u64 {
        get_threshold(self.total_count()).0
    }

    /// The sum of the electors of all the regions, claimed or not.
    pub fn total_electors(&self) -> u64 {
        self.total_count().0
    }

    /// The sum of the totals of all the candidates.
    pub fn combined_total(&self) -> u64 {
        self.combined_count().0
    }

    /// The first candidate, in configuration order, who reached the majority
    /// threshold.
    pub fn winner(&self) -> Option<&str> {
        let threshold = get_threshold(self.total_count());
        if threshold == ElectorCount::EMPTY {
            return None;
        }
        self.candidates
            .iter()
            .zip(self.totals.iter())
            .find(|(_, total)| **total >= threshold)
            .map(|(name, _)| name.as_str())
    }

    /// The regions claimed by nobody, in configuration order.
    pub fn unassigned(&self) -> Vec<&str> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.owners.contains_key(&RegionId(*idx as u32)))
            .map(|(_, (name, _))| name.as_str())
            .collect()
    }

    /// The candidate names, in configuration order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|s| s.as_str())
    }

    /// The regions and their electors, in configuration order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, u64)> {
        self.regions.iter().map(|(name, ec)| (name.as_str(), ec.0))
    }

    /// All the derived figures at once.
    pub fn result(&self) -> TallyResult {
        let combined = self.combined_count();
        let candidates = self
            .candidates
            .iter()
            .zip(self.totals.iter())
            .map(|(name, total)| CandidateTally {
                name: name.clone(),
                electors: total.0,
                percentage: percentage(*total, combined),
            })
            .collect();
        TallyResult {
            candidates,
            total_electors: self.total_electors(),
            combined_total: combined.0,
            majority_threshold: self.majority_threshold(),
            threshold_percentage: self.threshold(),
            winner: self.winner().map(|s| s.to_string()),
            unassigned: self.unassigned().iter().map(|s| s.to_string()).collect(),
        }
    }

    fn candidate_id(&self, candidate: &str) -> Result<CandidateId, TallyErrors> {
        self.candidate_ids
            .get(candidate)
            .cloned()
            .ok_or_else(|| TallyErrors::UnknownCandidate(candidate.to_string()))
    }

    fn total_count(&self) -> ElectorCount {
        self.total_count
    }

    fn combined_count(&self) -> ElectorCount {
        self.combined_count
    }
}

/// Runs the tally over the given tables.
///
/// Arguments:
/// * `regions` the region table
/// * `candidates` the candidates and the regions they won
/// * `rules` the rules that govern this contest
pub fn run_tally(
    regions: &[Region],
    candidates: &[Candidate],
    rules: &TallyRules,
) -> Result<TallyResult, TallyErrors> {
    info!(
        "run_tally: Processing {:?} regions, {:?} candidates",
        regions.len(),
        candidates.len()
    );
    let tally = Tally::new(regions, candidates, rules)?;
    let res = tally.result();
    info!(
        "Total electors: {} (majority threshold: {})",
        res.total_electors, res.majority_threshold
    );
    for ct in res.candidates.iter() {
        info!(
            "{:>8} {:>6.2}% {}",
            ct.electors, ct.percentage, ct.name
        );
    }
    if !res.unassigned.is_empty() {
        info!("Unassigned regions: {:?}", res.unassigned);
    }
    match &res.winner {
        Some(name) => info!("Winner: {}", name),
        None => info!("No candidate reached the majority threshold"),
    }
    Ok(res)
}

fn percentage(count: ElectorCount, total: ElectorCount) -> f64 {
    if total == ElectorCount::EMPTY {
        ZERO_TOTAL_PERCENTAGE
    } else {
        (count.0 as f64) / (total.0 as f64) * 100.0
    }
}

fn get_threshold(total_count: ElectorCount) -> ElectorCount {
    if total_count == ElectorCount::EMPTY {
        ElectorCount::EMPTY
    } else {
        ElectorCount((total_count.0 / 2) + 1)
    }
}

type RegionTable = (Vec<(String, ElectorCount)>, HashMap<String, RegionId>);

fn check_regions(regions: &[Region]) -> Result<RegionTable, TallyErrors> {
    let mut table: Vec<(String, ElectorCount)> = Vec::new();
    let mut ids: HashMap<String, RegionId> = HashMap::new();
    for r in regions.iter() {
        if r.name.is_empty() {
            return Err(TallyErrors::EmptyRegionName);
        }
        if ids.contains_key(&r.name) {
            return Err(TallyErrors::DuplicateRegion(r.name.clone()));
        }
        ids.insert(r.name.clone(), RegionId(table.len() as u32));
        table.push((r.name.clone(), ElectorCount(r.electors)));
    }
    Ok((table, ids))
}

fn check_candidates(
    candidates: &[Candidate],
) -> Result<(Vec<String>, HashMap<String, CandidateId>), TallyErrors> {
    let mut names: Vec<String> = Vec::new();
    let mut ids: HashMap<String, CandidateId> = HashMap::new();
    for c in candidates.iter() {
        if c.name.is_empty() {
            return Err(TallyErrors::EmptyCandidateName);
        }
        if ids.contains_key(&c.name) {
            return Err(TallyErrors::DuplicateCandidate(c.name.clone()));
        }
        ids.insert(c.name.clone(), CandidateId(names.len() as u32));
        names.push(c.name.clone());
    }
    Ok((names, ids))
}

// Candidates are visited in configuration order, which is what makes the
// FirstListed policy deterministic.
fn assign_regions(
    candidates: &[Candidate],
    region_ids: &HashMap<String, RegionId>,
    policy: OverlapPolicy,
) -> Result<HashMap<RegionId, CandidateId>, TallyErrors> {
    let mut owners: HashMap<RegionId, CandidateId> = HashMap::new();
    for (idx, c) in candidates.iter().enumerate() {
        let cid = CandidateId(idx as u32);
        for region in c.regions.iter() {
            let rid = *region_ids
                .get(region)
                .ok_or_else(|| TallyErrors::UnknownRegion {
                    candidate: c.name.clone(),
                    region: region.clone(),
                })?;
            match owners.get(&rid) {
                None => {
                    debug!("assign_regions: {} -> {}", region, c.name);
                    owners.insert(rid, cid);
                }
                Some(prev) if *prev == cid => {
                    warn!(
                        "assign_regions: candidate {} lists region {} more than once, counting it once",
                        c.name, region
                    );
                }
                Some(prev) => {
                    let first = candidates[prev.0 as usize].name.clone();
                    match policy {
                        OverlapPolicy::Reject => {
                            return Err(TallyErrors::OverlappingRegion {
                                region: region.clone(),
                                first,
                                second: c.name.clone(),
                            });
                        }
                        OverlapPolicy::FirstListed => {
                            warn!(
                                "assign_regions: region {} claimed by {} and {}, keeping {}",
                                region, first, c.name, first
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(owners)
}
