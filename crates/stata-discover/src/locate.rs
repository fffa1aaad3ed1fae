//! First-existing-candidate walk over the ranked install locations.

use std::path::PathBuf;

use log::debug;

use crate::platform::{candidate_paths, HostPlatform};

/// Find an installed Stata executable by probing the ranked candidate
/// locations for the platform.
///
/// Candidates are probed in table order, so a newer release wins over an
/// older one and a fuller edition wins within a release. Returns `None`
/// when no candidate exists on disk; callers decide how to fall back.
pub fn find_stata(platform: HostPlatform) -> Option<PathBuf> {
    first_existing(candidate_paths(platform).iter().map(PathBuf::from))
}

/// Return the first path in `paths` that exists on disk, preserving the
/// caller's ordering.
pub fn first_existing<I>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    for path in paths {
        if path.exists() {
            debug!("found candidate at {:?}", path);
            return Some(path);
        }
    }
    None
}
