// Per-region colors and labels handed to the map renderer.

use std::collections::BTreeMap;

use crate::elecmap::config_reader::*;
use crate::elecmap::*;

pub const NEUTRAL_COLOR: &str = "gray";

/// Colors given by position to the candidates that do not declare one.
pub const FALLBACK_PALETTE: [&str; 6] = ["blue", "red", "green", "orange", "purple", "brown"];

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateStyle {
    pub name: String,
    pub display_name: String,
    pub party: Option<String>,
    pub color: String,
    pub photo: Option<String>,
}

/// Everything the renderer needs to draw one region.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegionStyle {
    pub name: String,
    pub electors: u64,
    pub winner: Option<String>,
    pub color: String,
    pub label: String,
    pub photo: Option<String>,
}

pub fn candidate_styles(config: &MapConfig) -> Vec<CandidateStyle> {
    let photo_urls = &config.output_settings.photo_urls;
    config
        .candidates
        .iter()
        .enumerate()
        .map(|(idx, c)| CandidateStyle {
            name: c.name.clone(),
            display_name: c.display_name.clone().unwrap_or_else(|| c.name.clone()),
            party: c.party.clone(),
            color: match c.color.clone() {
                Some(x) if !x.is_empty() => x,
                _ => FALLBACK_PALETTE[idx % FALLBACK_PALETTE.len()].to_string(),
            },
            photo: c.photo.as_ref().map(|p| resolve_photo(p, photo_urls)),
        })
        .collect()
}

/// The styles of all the regions, in the order of the region table.
///
/// Regions won by nobody get the neutral color and the photo of the first candidate.
pub fn region_styles(
    tally: &Tally,
    candidates: &[CandidateStyle],
    neutral_color: &str,
) -> Vec<RegionStyle> {
    let by_name: BTreeMap<&str, &CandidateStyle> =
        candidates.iter().map(|cs| (cs.name.as_str(), cs)).collect();
    let default_photo: Option<String> = candidates.first().and_then(|cs| cs.photo.clone());

    tally
        .regions()
        .map(|(name, electors)| {
            let winner = tally.classify(name);
            let style = winner.and_then(|w| by_name.get(w));
            debug!("region_styles: {} -> {:?}", name, winner);
            RegionStyle {
                name: name.to_string(),
                electors,
                winner: winner.map(|w| w.to_string()),
                color: style
                    .map(|cs| cs.color.clone())
                    .unwrap_or_else(|| neutral_color.to_string()),
                label: region_label(name, electors),
                photo: match style {
                    Some(cs) => cs.photo.clone(),
                    None => default_photo.clone(),
                },
            }
        })
        .collect()
}

pub fn region_label(name: &str, electors: u64) -> String {
    format!("{} ({})", name, electors)
}

fn resolve_photo(photo: &str, photo_urls: &Option<BTreeMap<String, String>>) -> String {
    photo_urls
        .as_ref()
        .and_then(|urls| urls.get(photo))
        .cloned()
        .unwrap_or_else(|| photo.to_string())
}
