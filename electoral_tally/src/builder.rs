pub use crate::config::*;
use crate::Tally;

/// A builder for assembling a contest one region and one candidate at a time.
///
/// ```
/// pub use electoral_tally::builder::Builder;
/// pub use electoral_tally::TallyRules;
/// # use electoral_tally::TallyErrors;
///
/// let mut builder = Builder::new(&TallyRules::DEFAULT_RULES)?
///     .regions(&[("Ohio".to_string(), 18), ("Utah".to_string(), 6)])?;
///
/// builder.add_region("Iowa", 6)?;
/// builder.add_candidate("Anna", &["Ohio".to_string()])?;
/// builder.add_candidate("Bob", &["Utah".to_string(), "Iowa".to_string()])?;
///
/// let tally = builder.build()?;
/// assert_eq!(tally.total_for("Bob")?, 12);
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: TallyRules,
    pub(crate) _regions: Vec<Region>,
    pub(crate) _candidates: Vec<Candidate>,
}

impl Builder {
    pub fn new(rules: &TallyRules) -> Result<Builder, TallyErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _regions: Vec::new(),
            _candidates: Vec::new(),
        })
    }

    /// Replaces the region table.
    pub fn regions(self, regions: &[(String, u64)]) -> Result<Builder, TallyErrors> {
        Ok(Builder {
            _rules: self._rules,
            _regions: regions
                .iter()
                .map(|(name, electors)| Region {
                    name: name.clone(),
                    electors: *electors,
                })
                .collect(),
            _candidates: self._candidates,
        })
    }

    /// Adds a region to the table.
    ///
    /// Duplicate names are caught here already, the other checks happen in `build`.
    pub fn add_region(&mut self, name: &str, electors: u64) -> Result<(), TallyErrors> {
        if self._regions.iter().any(|r| r.name == name) {
            return Err(TallyErrors::DuplicateRegion(name.to_string()));
        }
        self._regions.push(Region::new(name, electors));
        Ok(())
    }

    /// Adds a candidate with the regions they won.
    ///
    /// The order of the calls is the configuration order of the candidates.
    pub fn add_candidate(&mut self, name: &str, regions: &[String]) -> Result<(), TallyErrors> {
        if self._candidates.iter().any(|c| c.name == name) {
            return Err(TallyErrors::DuplicateCandidate(name.to_string()));
        }
        self._candidates.push(Candidate {
            name: name.to_string(),
            regions: regions.to_vec(),
        });
        Ok(())
    }

    pub fn build(&self) -> Result<Tally, TallyErrors> {
        Tally::new(&self._regions, &self._candidates, &self._rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_duplicates() -> Result<(), TallyErrors> {
        let mut builder = Builder::new(&TallyRules::DEFAULT_RULES)?;
        builder.add_region("A", 3)?;
        assert_eq!(
            builder.add_region("A", 4),
            Err(TallyErrors::DuplicateRegion("A".to_string()))
        );
        builder.add_candidate("X", &["A".to_string()])?;
        assert_eq!(
            builder.add_candidate("X", &[]),
            Err(TallyErrors::DuplicateCandidate("X".to_string()))
        );
        let tally = builder.build()?;
        assert_eq!(tally.classify("A"), Some("X"));
        Ok(())
    }

    #[test]
    fn builder_follows_overlap_policy() -> Result<(), TallyErrors> {
        let rules = TallyRules {
            overlap_policy: OverlapPolicy::FirstListed,
        };
        let mut builder =
            Builder::new(&rules)?.regions(&[("A".to_string(), 10), ("B".to_string(), 20)])?;
        builder.add_candidate("X", &["A".to_string(), "B".to_string()])?;
        builder.add_candidate("Y", &["B".to_string()])?;
        let tally = builder.build()?;
        assert_eq!(tally.classify("B"), Some("X"));
        assert_eq!(tally.total_for("Y")?, 0);
        Ok(())
    }
}
