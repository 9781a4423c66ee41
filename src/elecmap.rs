use log::{debug, info, warn};

use electoral_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::elecmap::config_reader::*;
use crate::elecmap::styles::*;

pub mod config_reader;
pub mod styles;

#[derive(Debug, Snafu)]
pub enum ElecMapError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the map summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Unknown overlap policy {value:?}, expected reject or firstListed"))]
    InvalidRules { value: String },
    #[snafu(display("Invalid contest: {source}"))]
    Tally { source: TallyErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type ElecMapResult<T> = Result<T, ElecMapError>;

/// Where the map summary goes.
#[derive(Eq, PartialEq, Debug, Clone)]
enum OutputTarget {
    Stdout,
    File(PathBuf),
}

fn validate_rules(rules: &Option<MapRules>) -> ElecMapResult<TallyRules> {
    let policy = rules.as_ref().and_then(|r| r.overlap_policy.clone());
    let res = TallyRules {
        overlap_policy: match policy.as_deref() {
            None | Some("reject") => OverlapPolicy::Reject,
            Some("firstListed") => OverlapPolicy::FirstListed,
            Some(x) => {
                return InvalidRulesSnafu { value: x }.fail();
            }
        },
    };
    Ok(res)
}

fn output_target(
    config_path: &Path,
    settings: &OutputSettings,
    out: Option<String>,
) -> ElecMapResult<OutputTarget> {
    match out.as_deref() {
        Some("stdout") => Ok(OutputTarget::Stdout),
        Some(p) => Ok(OutputTarget::File(PathBuf::from(p))),
        None => match settings.output_path.as_deref() {
            None | Some("") => Ok(OutputTarget::Stdout),
            Some("stdout") => Ok(OutputTarget::Stdout),
            Some(p) => {
                let root_p = config_path.parent().context(MissingParentDirSnafu {})?;
                Ok(OutputTarget::File(root_p.join(p)))
            }
        },
    }
}

fn format_percentage(x: f64) -> String {
    format!("{:.2}", x)
}

fn build_summary_js(
    config: &MapConfig,
    result: &TallyResult,
    candidates: &[CandidateStyle],
    regions: &[RegionStyle],
) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        threshold: Some(result.majority_threshold.to_string()),
    };

    let mut candidates_js: Vec<JSValue> = Vec::new();
    for (ct, cs) in result.candidates.iter().zip(candidates.iter()) {
        candidates_js.push(json!({
            "name": ct.name,
            "displayName": cs.display_name,
            "party": cs.party,
            "color": cs.color,
            "photo": cs.photo,
            "electors": ct.electors.to_string(),
            "percentage": format_percentage(ct.percentage),
        }));
    }

    let regions_js: Vec<JSValue> = regions
        .iter()
        .map(|rs| {
            json!({
                "name": rs.name,
                "electors": rs.electors.to_string(),
                "winner": rs.winner,
                "color": rs.color,
                "label": rs.label,
                "photo": rs.photo,
            })
        })
        .collect();

    json!({
        "config": c,
        "results": {
            "totalElectors": result.total_electors.to_string(),
            "combinedTotal": result.combined_total.to_string(),
            "majorityThreshold": result.majority_threshold.to_string(),
            "thresholdPercentage": format_percentage(result.threshold_percentage),
            "winner": result.winner,
            "candidates": candidates_js,
        },
        "regions": regions_js,
    })
}

/// Computes the map summary of the contest described by this configuration.
fn summarize(config: &MapConfig) -> ElecMapResult<JSValue> {
    let rules = validate_rules(&config.rules)?;
    let tally = Tally::new(
        &config.tally_regions(),
        &config.tally_candidates(),
        &rules,
    )
    .context(TallySnafu {})?;
    let result = tally.result();
    info!(
        "Total electors: {} (majority threshold: {}, needle at {:.2}%)",
        result.total_electors, result.majority_threshold, result.threshold_percentage
    );
    for ct in result.candidates.iter() {
        info!("{:>8} {:>6.2}% {}", ct.electors, ct.percentage, ct.name);
    }
    if !result.unassigned.is_empty() {
        info!("Unassigned regions: {:?}", result.unassigned);
    }

    let candidates = candidate_styles(config);
    let neutral_color = config
        .output_settings
        .neutral_color
        .clone()
        .unwrap_or_else(|| NEUTRAL_COLOR.to_string());
    let regions = region_styles(&tally, &candidates, &neutral_color);

    Ok(build_summary_js(config, &result, &candidates, &regions))
}

fn check_reference(pretty_js_stats: &str, summary_p: &str) -> ElecMapResult<()> {
    let summary_ref = read_summary(summary_p)?;
    debug!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    info!("The summary matches the reference {}", summary_p);
    Ok(())
}

pub fn run_map(
    config_path: String,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> ElecMapResult<()> {
    info!("Reading contest configuration {:?}", config_path);
    let config = read_config(&config_path)?;
    debug!("config: {:?}", config);

    let summary_js = summarize(&config)?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    match output_target(Path::new(&config_path), &config.output_settings, out)? {
        OutputTarget::Stdout => {
            println!("{}", pretty_js_stats);
        }
        OutputTarget::File(p) => {
            let path = p.display().to_string();
            info!("Writing map summary to {:?}", path);
            fs::write(&p, &pretty_js_stats).context(WritingOutputSnafu { path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        check_reference(&pretty_js_stats, &summary_p)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path(name: &str) -> String {
        format!("{}/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const SMALL_CONFIG: &str = r#"{
        "outputSettings": { "contestName": "Small" },
        "regions": [
            { "name": "A", "electors": 10 },
            { "name": "B", "electors": 20 },
            { "name": "C", "electors": 5 }
        ],
        "candidates": [
            { "name": "X", "color": "blue", "regions": ["A"] },
            { "name": "Y", "color": "red", "regions": ["B", "C"] }
        ]
    }"#;

    #[test]
    fn rules_validation() {
        assert_eq!(
            validate_rules(&None).unwrap().overlap_policy,
            OverlapPolicy::Reject
        );
        let rules = |s: &str| {
            Some(MapRules {
                overlap_policy: Some(s.to_string()),
            })
        };
        assert_eq!(
            validate_rules(&rules("reject")).unwrap().overlap_policy,
            OverlapPolicy::Reject
        );
        assert_eq!(
            validate_rules(&rules("firstListed")).unwrap().overlap_policy,
            OverlapPolicy::FirstListed
        );
        assert!(matches!(
            validate_rules(&rules("random")),
            Err(ElecMapError::InvalidRules { .. })
        ));
    }

    #[test]
    fn output_resolution() {
        let settings = |p: Option<&str>| OutputSettings {
            contest_name: "Test".to_string(),
            output_path: p.map(|s| s.to_string()),
            neutral_color: None,
            photo_urls: None,
        };
        let config_p = Path::new("/data/contest.json");
        assert_eq!(
            output_target(config_p, &settings(None), None).unwrap(),
            OutputTarget::Stdout
        );
        assert_eq!(
            output_target(config_p, &settings(Some("map.json")), None).unwrap(),
            OutputTarget::File(PathBuf::from("/data/map.json"))
        );
        assert_eq!(
            output_target(
                config_p,
                &settings(Some("map.json")),
                Some("stdout".to_string())
            )
            .unwrap(),
            OutputTarget::Stdout
        );
        assert_eq!(
            output_target(
                config_p,
                &settings(Some("map.json")),
                Some("other.json".to_string())
            )
            .unwrap(),
            OutputTarget::File(PathBuf::from("other.json"))
        );
    }

    #[test]
    fn small_summary() {
        init();
        let config = parse_config(SMALL_CONFIG).unwrap();
        let js = summarize(&config).unwrap();
        assert_eq!(js["config"]["contest"], json!("Small"));
        assert_eq!(js["config"]["threshold"], json!("18"));
        assert_eq!(js["results"]["winner"], json!("Y"));
        assert_eq!(js["results"]["candidates"][0]["electors"], json!("10"));
        assert_eq!(js["results"]["candidates"][0]["percentage"], json!("28.57"));
        assert_eq!(js["results"]["candidates"][1]["percentage"], json!("71.43"));
        assert_eq!(js["regions"][2]["color"], json!("red"));
        assert_eq!(js["regions"][2]["label"], json!("C (5)"));
    }

    #[test]
    fn overlapping_contest_is_rejected() {
        let config = parse_config(
            r#"{
            "outputSettings": { "contestName": "Overlap" },
            "regions": [ { "name": "A", "electors": 10 } ],
            "candidates": [
                { "name": "X", "regions": ["A"] },
                { "name": "Y", "regions": ["A"] }
            ]
        }"#,
        )
        .unwrap();
        assert!(matches!(
            summarize(&config),
            Err(ElecMapError::Tally {
                source: TallyErrors::OverlappingRegion { .. }
            })
        ));
    }

    #[test]
    fn oversized_contest_is_rejected() {
        let config = parse_config(
            r#"{
            "outputSettings": { "contestName": "Oversized" },
            "regions": [
                { "name": "A", "electors": 18446744073709551615 },
                { "name": "B", "electors": 1 }
            ],
            "candidates": [
                { "name": "X", "regions": ["A"] },
                { "name": "Y", "regions": ["B"] }
            ]
        }"#,
        )
        .unwrap();
        assert!(matches!(
            summarize(&config),
            Err(ElecMapError::Tally {
                source: TallyErrors::ElectorOverflow
            })
        ));
    }

    #[test]
    fn us_2036_matches_reference() {
        init();
        let res = run_map(
            data_path("us_2036_config.json"),
            Some("stdout".to_string()),
            Some(data_path("us_2036_expected_summary.json")),
        );
        if let Err(e) = res {
            panic!("run_map failed: {}", e);
        }
    }

    #[test]
    fn missing_config() {
        assert!(matches!(
            run_map(data_path("does_not_exist.json"), None, None),
            Err(ElecMapError::OpeningJson { .. })
        ));
    }
}
