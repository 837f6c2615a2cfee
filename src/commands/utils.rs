use std::path::{Path, PathBuf};

use tagtrace::{TagTraceError, TagTraceResult, Tracer};

use crate::cli::{GlobalOptions, ThresholdArgs};

/// The convenience function to build a Tracer from the global and threshold options.
pub fn build_tracer(global: &GlobalOptions, threshold: &ThresholdArgs) -> Tracer {
    Tracer::new()
        .with_threshold(threshold.threshold)
        .with_invert(threshold.invert)
        .with_step_limit(global.step_limit)
}

/// Derive an SVG file path by changing the extension to "svg".
pub fn derive_svg_path(input: &Path) -> PathBuf {
    let mut path = input.to_path_buf();
    path.set_extension("svg");
    path
}

/// Path of the rendered file for tag `index` of `family`.
pub fn tag_path(dir: &Path, family: &str, index: usize, extension: &str) -> PathBuf {
    dir.join(format!("{family}_{index:05}.{extension}"))
}

/// Edge length of a PNG drawn with `module_px` output pixels per tag pixel.
pub fn png_side(width: u32, module_px: u32) -> TagTraceResult<u32> {
    width.checked_mul(module_px).ok_or_else(|| {
        TagTraceError::InvalidSize(format!(
            "{width} tag pixels at {module_px} px each do not fit in an image"
        ))
    })
}
