use std::fs;

use image::imageops::{self, FilterType};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tagtrace::units::mm_to_pixel;
use tagtrace::{FamilyBlock, FamilyRegistry, Size, SvgOptions, TagTraceResult, Tracer};

use crate::cli::{GlobalOptions, RenderCommand};

use super::utils::{png_side, tag_path};

/// The main function to run the render command.
pub fn run(global: &GlobalOptions, cmd: RenderCommand) -> TagTraceResult<()> {
    let registry = FamilyRegistry::new(&cmd.family_dir);
    debug!(dir = %registry.dir().display(), "resolving families");
    let blocks = cmd
        .blocks
        .iter()
        .map(|spec| FamilyBlock::parse(spec, &registry))
        .collect::<TagTraceResult<Vec<_>>>()?;
    let total: usize = blocks.iter().map(FamilyBlock::tag_count).sum();

    fs::create_dir_all(&cmd.output)?;
    let tracer = Tracer::new().with_step_limit(global.step_limit);

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    for block in &blocks {
        info!(tags = block.tag_count(), "rendering {}", block.label());
        pb.set_message(block.family.name.clone());
        let module_px = match cmd.dpi {
            Some(dpi) => mm_to_pixel(dpi, block.size_mm) / block.family.total_width.max(1),
            None => cmd.scale,
        }
        .max(1);
        let svg_options = SvgOptions::default()
            .with_background(Some([255, 255, 255, 255]))
            .with_physical_size_mm(Some(Size::new(block.size_mm, block.size_mm)));

        for index in block.indices() {
            let bitmap = block.family.render_tag(index)?;
            if cmd.format.png() {
                let gray = bitmap.to_gray();
                let side = png_side(gray.width(), module_px)?;
                let path = tag_path(&cmd.output, &block.family.name, index, "png");
                imageops::resize(&gray, side, side, FilterType::Nearest).save(&path)?;
                debug!(path = %path.display(), "wrote png");
            }
            if cmd.format.svg() {
                let handle = tracer.for_bitmap(bitmap).contours()?;
                let path = tag_path(&cmd.output, &block.family.name, index, "svg");
                handle.save_svg(&path, &svg_options)?;
                debug!(path = %path.display(), "wrote svg");
            }
            pb.inc(1);
        }
    }

    pb.finish_with_message("done");
    println!("{total} tags written to {}", cmd.output.display());
    Ok(())
}
