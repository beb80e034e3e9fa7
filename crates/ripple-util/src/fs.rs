use std::path::{Path, PathBuf};

use crate::errors::RippleError;

/// The nearest directory at or above `start` that holds `manifest`.
///
/// Solutions live in sub-folders of the project, so commands run from inside
/// one still find the shared fact file.
pub fn find_project_root(start: &Path, manifest: &str) -> Result<PathBuf, RippleError> {
    match start.ancestors().find(|dir| dir.join(manifest).is_file()) {
        Some(root) => {
            tracing::debug!("Using {manifest} in {}", root.display());
            Ok(root.to_path_buf())
        }
        None => Err(RippleError::Manifest {
            message: format!(
                "Could not find {manifest} in {} or any parent directory",
                start.display()
            ),
        }),
    }
}
