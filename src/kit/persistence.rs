// Saves the kit on quit, restores it on startup. Anything wrong with the
// blob (missing, truncated, hand-edited into nonsense) falls back to the
// compiled-in default kit; startup never fails because of this file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::NUM_PADS;

use super::pad::Pad;
use super::presets::default_kit;

const PULSEPAD_DIR: &str = ".pulsepad";
const KIT_FILE: &str = "kit.json";

// The original blob had no version field; one is written defensively so a
// future format change can tell old files apart. Unknown versions still get
// a best-effort parse.
const KIT_BLOB_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct KitBlob {
    version: u32,
    pads: Vec<Pad>,
}

// <project_dir>/.pulsepad/kit.json
fn kit_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PULSEPAD_DIR).join(KIT_FILE)
}

/// Strict load: None on any problem, caller decides the fallback.
pub fn load_kit(project_dir: &Path) -> Option<[Pad; NUM_PADS]> {
    let path = kit_file_path(project_dir);
    let data = std::fs::read_to_string(&path).ok()?;
    let blob: KitBlob = serde_json::from_str(&data).ok()?;
    if blob.version != KIT_BLOB_VERSION {
        log::warn!("kit blob version {} (expected {KIT_BLOB_VERSION})", blob.version);
    }
    let mut pads = blob.pads;
    if pads.len() != NUM_PADS {
        return None;
    }
    for p in pads.iter_mut() {
        p.normalize();
    }
    pads.try_into().ok()
}

/// What main actually calls: the saved kit or the stock one.
pub fn load_kit_or_default(project_dir: &Path) -> [Pad; NUM_PADS] {
    match load_kit(project_dir) {
        Some(pads) => pads,
        None => {
            log::info!("no usable saved kit, using the default");
            default_kit()
        }
    }
}

pub fn save_kit(project_dir: &Path, pads: &[Pad; NUM_PADS]) -> anyhow::Result<()> {
    let path = kit_file_path(project_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let blob = KitBlob { version: KIT_BLOB_VERSION, pads: pads.to_vec() };
    let json = serde_json::to_string_pretty(&blob)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_api::InstrumentKind;

    #[test]
    fn round_trip_reproduces_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut pads = default_kit();
        pads[0].pitch = 1.7;
        pads[5].tone = Some(330.0);
        pads[9].label = "Rimshot".into();

        save_kit(dir.path(), &pads).unwrap();
        let loaded = load_kit(dir.path()).unwrap();
        assert_eq!(pads, loaded);
    }

    #[test]
    fn corrupt_blob_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PULSEPAD_DIR);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join(KIT_FILE), "{not json at all").unwrap();

        assert!(load_kit(dir.path()).is_none());
        assert_eq!(load_kit_or_default(dir.path()), default_kit());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_kit_or_default(dir.path()), default_kit());
    }

    #[test]
    fn wrong_pad_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pads = default_kit();
        save_kit(dir.path(), &pads).unwrap();

        // rewrite the blob with a truncated pad list
        let path = kit_file_path(dir.path());
        let data = std::fs::read_to_string(&path).unwrap();
        let mut blob: serde_json::Value = serde_json::from_str(&data).unwrap();
        blob["pads"].as_array_mut().unwrap().truncate(3);
        std::fs::write(&path, blob.to_string()).unwrap();

        assert!(load_kit(dir.path()).is_none());
    }

    #[test]
    fn unknown_instrument_type_loads_as_fallback_kind() {
        let dir = tempfile::tempdir().unwrap();
        save_kit(dir.path(), &default_kit()).unwrap();

        let path = kit_file_path(dir.path());
        let data = std::fs::read_to_string(&path).unwrap();
        let patched = data.replacen("\"kick\"", "\"theremin\"", 1);
        std::fs::write(&path, patched).unwrap();

        let loaded = load_kit(dir.path()).unwrap();
        assert!(loaded.iter().any(|p| p.kind == InstrumentKind::Unknown));
    }

    #[test]
    fn loaded_pads_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        save_kit(dir.path(), &default_kit()).unwrap();

        let path = kit_file_path(dir.path());
        let data = std::fs::read_to_string(&path).unwrap();
        let patched = data.replacen("\"pitch\": 1.0", "\"pitch\": -3.0", 1);
        std::fs::write(&path, patched).unwrap();

        let loaded = load_kit(dir.path()).unwrap();
        assert!(loaded.iter().all(|p| p.pitch > 0.0));
    }
}
