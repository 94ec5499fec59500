//! JSON input files for `cut` and `replay`.

use anyhow::{Context, Result};
use barcut::cutting::{CuttingCfg, Event};
use barcut::Point2D;
use serde::{de::DeserializeOwned, Deserialize};
use std::path::Path;

/// Calibration and break points of one system, as recorded by a UI.
#[derive(Clone, Debug, Deserialize)]
pub struct SystemInput {
    pub page: u32,
    pub top_left: Option<Point2D>,
    pub top_right: Option<Point2D>,
    pub staff_height: Option<Point2D>,
    #[serde(default)]
    pub break_points: Vec<Point2D>,
}

/// Already-calibrated systems; no cutting configuration applies.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CutInput {
    pub systems: Vec<SystemInput>,
}

/// Pointer events recorded on one page.
#[derive(Clone, Debug, Deserialize)]
pub struct PageEvents {
    pub page: u32,
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReplayInput {
    #[serde(default)]
    pub cfg: Option<CuttingCfg>,
    pub pages: Vec<PageEvents>,
}

pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_cut_input_with_missing_points() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cut.json");
        std::fs::write(
            &path,
            r#"{
                "systems": [
                    {"page": 1, "top_left": [0, 0], "top_right": [100, 0],
                     "staff_height": [50, 10], "break_points": [[30, 5], [70, 5]]},
                    {"page": 1, "top_left": [0, 40], "top_right": null, "staff_height": null}
                ]
            }"#,
        )
        .unwrap();
        let input: CutInput = read_json(&path).unwrap();
        assert_eq!(input.systems.len(), 2);
        assert_eq!(input.systems[0].break_points.len(), 2);
        assert!(input.systems[1].top_right.is_none());
        assert!(input.systems[1].break_points.is_empty());
    }

    #[test]
    fn cut_input_rejects_a_cutting_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cut.json");
        std::fs::write(&path, r#"{"cfg": {"finish_threshold": 0.9}, "systems": []}"#).unwrap();
        let err = read_json::<CutInput, _>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("cfg"));
    }

    #[test]
    fn parses_replay_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("replay.json");
        std::fs::write(
            &path,
            r#"{
                "cfg": {"finish_threshold": 0.95},
                "pages": [{"page": 2, "events": [
                    {"kind": "pointer_move", "at": [1, 1]},
                    {"kind": "click", "at": [1, 1]}
                ]}]
            }"#,
        )
        .unwrap();
        let input: ReplayInput = read_json(&path).unwrap();
        assert_eq!(input.cfg.map(|c| c.finish_threshold), Some(0.95));
        assert_eq!(input.pages[0].events.len(), 2);
    }

    #[test]
    fn reports_the_failing_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_json::<CutInput, _>(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
