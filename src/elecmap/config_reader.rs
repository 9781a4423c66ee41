// Reading the contest configuration and reference summaries.

use std::collections::BTreeMap;

use crate::elecmap::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "neutralColor")]
    pub neutral_color: Option<String>,
    #[serde(rename = "photoUrls")]
    pub photo_urls: Option<BTreeMap<String, String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub threshold: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MapRegion {
    pub name: String,
    pub electors: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MapCandidate {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub party: Option<String>,
    pub color: Option<String>,
    pub photo: Option<String>,
    pub regions: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MapRules {
    #[serde(rename = "overlapPolicy")]
    pub overlap_policy: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub regions: Vec<MapRegion>,
    pub candidates: Vec<MapCandidate>,
    pub rules: Option<MapRules>,
}

impl MapConfig {
    pub fn tally_regions(&self) -> Vec<Region> {
        self.regions
            .iter()
            .map(|r| Region::new(&r.name, r.electors))
            .collect()
    }

    pub fn tally_candidates(&self) -> Vec<Candidate> {
        self.candidates
            .iter()
            .map(|c| Candidate {
                name: c.name.clone(),
                regions: c.regions.clone(),
            })
            .collect()
    }
}

pub fn read_config(path: &str) -> ElecMapResult<MapConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> ElecMapResult<MapConfig> {
    let config: MapConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> ElecMapResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let js = r#"{
            "outputSettings": { "contestName": "Test" },
            "regions": [ { "name": "A", "electors": 10 } ],
            "candidates": [ { "name": "X", "regions": ["A"] } ]
        }"#;
        let config = parse_config(js).unwrap();
        assert_eq!(config.output_settings.contest_name, "Test");
        assert_eq!(config.output_settings.output_path, None);
        assert_eq!(config.rules, None);
        assert_eq!(config.tally_regions(), vec![Region::new("A", 10)]);
        assert_eq!(config.tally_candidates(), vec![Candidate::new("X", &["A"])]);
    }

    #[test]
    fn full_config() {
        let js = r#"{
            "outputSettings": {
                "contestName": "Test",
                "outputPath": "out.json",
                "neutralColor": "silver",
                "photoUrls": { "x.jpg": "https://example.org/x.jpg" }
            },
            "regions": [ { "name": "A", "electors": 10 } ],
            "candidates": [
                { "name": "X", "displayName": "Xavier", "party": "Blue",
                  "color": "navy", "photo": "x.jpg", "regions": ["A"] }
            ],
            "rules": { "overlapPolicy": "firstListed" }
        }"#;
        let config = parse_config(js).unwrap();
        let c = &config.candidates[0];
        assert_eq!(c.display_name, Some("Xavier".to_string()));
        assert_eq!(c.color, Some("navy".to_string()));
        assert_eq!(
            config.rules.and_then(|r| r.overlap_policy),
            Some("firstListed".to_string())
        );
        assert_eq!(
            config
                .output_settings
                .photo_urls
                .unwrap()
                .get("x.jpg")
                .cloned(),
            Some("https://example.org/x.jpg".to_string())
        );
    }

    #[test]
    fn negative_electors_are_rejected() {
        let js = r#"{
            "outputSettings": { "contestName": "Test" },
            "regions": [ { "name": "A", "electors": -1 } ],
            "candidates": []
        }"#;
        assert!(matches!(
            parse_config(js),
            Err(ElecMapError::ParsingJson { .. })
        ));
    }
}
