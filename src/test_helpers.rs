//! Shared test utilities.
//!
//! Builders for coordinators backed by a [`RecordingSink`], assertions that
//! check the coordinator's view and the sink's view agree, and a temp-dir
//! fixture for config loading.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut coord = coordinator_with_default("#ffffff");
//! coord.register_section("hero", "#000000");
//! coord.set_visibility("hero", true);
//! assert_resolved(&coord, "#000000", BarStyle::Translucent);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::coordinator::{CoordinatorConfig, StatusBarCoordinator};
use crate::sink::RecordingSink;
use crate::types::BarStyle;

// =========================================================================
// Coordinator builders
// =========================================================================

/// A day-mode coordinator with the given default color.
pub fn coordinator_with_default(color: &str) -> StatusBarCoordinator<RecordingSink> {
    StatusBarCoordinator::new(
        RecordingSink::new(),
        CoordinatorConfig {
            default_color: color.to_string(),
            night_mode: false,
        },
    )
}

// =========================================================================
// Assertions: panic with both views on mismatch
// =========================================================================

/// Assert the last applied pair, as seen by the coordinator and by the sink.
pub fn assert_resolved(
    coord: &StatusBarCoordinator<RecordingSink>,
    color: &str,
    style: BarStyle,
) {
    let last = coord.last_resolution();
    assert_eq!(
        (last.color.as_str(), last.style),
        (color, style),
        "coordinator resolved {:?} from {}",
        last.color,
        last.source
    );
    assert_eq!(
        coord.sink().last(),
        Some((color, style)),
        "sink calls: {:?}",
        coord.sink().calls
    );
}

// =========================================================================
// Config fixtures
// =========================================================================

/// A temp directory holding `config.toml` with the given contents.
pub fn site_with_config(toml: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), toml);
    tmp
}

pub fn write_config(dir: &Path, toml: &str) {
    std::fs::write(dir.join("config.toml"), toml).unwrap();
}
