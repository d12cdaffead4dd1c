//! Short route descriptions built from the turn-by-turn instructions of a
//! calculated route.
//!
//! Maneuver instructions embed markup such as
//! `Take <span class="number">(A1)</span> toward <span class="next-street">Bremen</span>`.
//! Steps without usable markup are skipped.

use serde::{Deserialize, Serialize};

const ROAD_NUMBER_CLASS: &str = "number";
const NEXT_STREET_CLASS: &str = "next-street";
const SPAN_CLOSE: &str = "</span>";
const SEPARATOR: &str = "; ";

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Maneuver {
    #[serde(default)]
    pub instruction: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublicTransportLine {
    pub line_name: String,
    pub destination: String,
}

/// Text of the first `<span class="{class}">…</span>` in `instruction`, with
/// parentheses removed. `None` when the span is missing, unterminated or
/// empty.
pub fn extract_span(instruction: &str, class: &str) -> Option<String> {
    let open = format!("<span class=\"{}\">", class);
    let start = instruction.find(&open)? + open.len();
    let rest = &instruction[start..];
    let end = rest.find(SPAN_CLOSE)?;

    let text: String = rest[..end].chars().filter(|c| !matches!(c, '(' | ')')).collect();

    if text.is_empty() { None } else { Some(text) }
}

/// Joins entries, dropping an entry equal to the one right before it.
fn join_deduplicated(entries: impl Iterator<Item = String>) -> String {
    let mut kept: Vec<String> = Vec::new();
    for entry in entries {
        if kept.last() != Some(&entry) {
            kept.push(entry);
        }
    }
    kept.join(SEPARATOR)
}

/// Summary for car and truck routes: `"<number> - <street>"` or `"<number>"`.
pub fn summarize_vehicle_maneuvers(maneuvers: &[Maneuver]) -> String {
    join_deduplicated(maneuvers.iter().filter_map(|maneuver| {
        let number = extract_span(&maneuver.instruction, ROAD_NUMBER_CLASS)?;
        match extract_span(&maneuver.instruction, NEXT_STREET_CLASS) {
            Some(street) => Some(format!("{} - {}", number, street)),
            None => Some(number),
        }
    }))
}

/// Summary for pedestrian and bicycle routes, street names only.
pub fn summarize_non_vehicle_maneuvers(maneuvers: &[Maneuver]) -> String {
    join_deduplicated(
        maneuvers
            .iter()
            .filter_map(|maneuver| extract_span(&maneuver.instruction, NEXT_STREET_CLASS)),
    )
}

/// Summary for public transport routes. Every line is kept, repeated lines
/// included.
pub fn summarize_public_transport_lines(lines: &[PublicTransportLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{} - {}", line.line_name, line.destination))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maneuvers(instructions: &[&str]) -> Vec<Maneuver> {
        instructions
            .iter()
            .map(|instruction| Maneuver {
                instruction: instruction.to_string(),
            })
            .collect()
    }

    fn road(number: &str) -> String {
        format!("Take <span class=\"number\">{}</span>.", number)
    }

    #[test]
    fn test_extract_span() {
        let instruction = "Turn onto <span class=\"next-street\">(Main Street)</span> now";
        assert_eq!(
            extract_span(instruction, NEXT_STREET_CLASS).as_deref(),
            Some("Main Street")
        );
        assert_eq!(extract_span(instruction, ROAD_NUMBER_CLASS), None);
    }

    #[test]
    fn test_extract_span_malformed() {
        assert_eq!(
            extract_span("<span class=\"number\">A1 without end", ROAD_NUMBER_CLASS),
            None
        );
        assert_eq!(extract_span("<span class=\"number\"></span>", ROAD_NUMBER_CLASS), None);
        assert_eq!(extract_span("<span class=\"number\">()</span>", ROAD_NUMBER_CLASS), None);
        assert_eq!(extract_span("", ROAD_NUMBER_CLASS), None);
    }

    #[test]
    fn test_vehicle_number_and_street() {
        let steps = maneuvers(&[
            "Head north on <span class=\"street\">Invalidenstr.</span>.",
            "Take <span class=\"number\">(A100)</span> toward <span class=\"next-street\">Dreieck Funkturm</span>.",
            "Continue on <span class=\"number\">A115</span>.",
        ]);

        assert_eq!(
            summarize_vehicle_maneuvers(&steps),
            "A100 - Dreieck Funkturm; A115"
        );
    }

    #[test]
    fn test_vehicle_street_without_number_is_skipped() {
        let steps = maneuvers(&["Turn onto <span class=\"next-street\">Main Street</span>."]);
        assert_eq!(summarize_vehicle_maneuvers(&steps), "");
    }

    #[test]
    fn test_consecutive_duplicates_are_dropped() {
        let steps = maneuvers(&[road("A1").as_str(), road("A1").as_str(), road("B2").as_str()]);
        assert_eq!(summarize_vehicle_maneuvers(&steps), "A1; B2");
    }

    #[test]
    fn test_non_consecutive_duplicates_are_kept() {
        let steps = maneuvers(&[road("A1").as_str(), road("B2").as_str(), road("A1").as_str()]);
        assert_eq!(summarize_vehicle_maneuvers(&steps), "A1; B2; A1");
    }

    #[test]
    fn test_no_consecutive_equal_entries() {
        let steps = maneuvers(&[
            road("A1").as_str(),
            "no markup at all",
            road("A1").as_str(),
            road("A7").as_str(),
            road("A7").as_str(),
            "<span class=\"number\">broken",
            road("A7").as_str(),
        ]);
        let summary = summarize_vehicle_maneuvers(&steps);
        let entries: Vec<&str> = summary.split(SEPARATOR).collect();

        assert_eq!(entries, vec!["A1", "A7"]);
        assert!(entries.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_non_vehicle() {
        let steps = maneuvers(&[
            "Head toward <span class=\"next-street\">Park Lane</span>.",
            "Keep walking.",
            "Turn onto <span class=\"next-street\">Park Lane</span>.",
            "Turn onto <span class=\"next-street\">(Oxford Street)</span>.",
            "Take <span class=\"number\">A4</span>.",
        ]);

        assert_eq!(
            summarize_non_vehicle_maneuvers(&steps),
            "Park Lane; Oxford Street"
        );
    }

    #[test]
    fn test_public_transport_lines() {
        let lines: Vec<PublicTransportLine> = serde_json::from_value(serde_json::json!([
            {"lineName": "U1", "destination": "X"},
            {"lineName": "U2", "destination": "Y"}
        ]))
        .unwrap();

        assert_eq!(summarize_public_transport_lines(&lines), "U1 - X; U2 - Y");
    }

    #[test]
    fn test_public_transport_lines_keep_duplicates() {
        let line = PublicTransportLine {
            line_name: "S5".to_string(),
            destination: "Spandau".to_string(),
        };
        assert_eq!(
            summarize_public_transport_lines(&[line.clone(), line]),
            "S5 - Spandau; S5 - Spandau"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize_vehicle_maneuvers(&[]), "");
        assert_eq!(summarize_non_vehicle_maneuvers(&[]), "");
        assert_eq!(summarize_public_transport_lines(&[]), "");
    }
}
