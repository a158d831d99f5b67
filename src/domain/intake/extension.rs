use std::path::Path;

/// File extensions the viewer accepts, lower case, without the dot.
pub const RECOGNIZED_EXTENSIONS: [&str; 6] = ["h5", "hdf5", "hdf", "nxs", "nx", "nexus"];

/// Case-insensitive check of a path or bare file name against the allow-list.
pub fn has_recognized_extension(name: impl AsRef<Path>) -> bool {
    name.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
