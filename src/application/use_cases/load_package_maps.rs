use crate::ports::outbound::PackageMapReader;
use crate::ros_generation::domain::PackageMap;
use crate::shared::Result;
use anyhow::Context;
use std::path::Path;

/// Reads every source in order and merges it over `base`
///
/// Later sources replace whole entries of earlier ones; keys that only an
/// earlier source defines survive. `on_source` is called before each read
/// with the 1-based position, the total and the path.
///
/// # Errors
/// Fails on the first source that cannot be read or parsed.
pub fn merge_package_maps<MR, P>(
    reader: &MR,
    base: PackageMap,
    sources: &[P],
    mut on_source: impl FnMut(usize, usize, &Path),
) -> Result<PackageMap>
where
    MR: PackageMapReader + ?Sized,
    P: AsRef<Path>,
{
    let mut merged = base;
    let total = sources.len();

    for (index, source) in sources.iter().enumerate() {
        let path = source.as_ref();
        on_source(index + 1, total, path);

        let map = reader
            .read_package_map(path)
            .with_context(|| format!("while loading package map {}", path.display()))?;
        let entries = map.len();
        let overridden = merged.merge(map);
        tracing::debug!(
            path = %path.display(),
            entries,
            overridden,
            "package map merged"
        );
    }

    Ok(merged)
}
