use tracing::info;

use tagtrace::{SvgOptions, TagTraceResult};

use crate::cli::{GlobalOptions, TraceCommand};

use super::utils::{build_tracer, derive_svg_path};

/// The main function to run the trace command.
pub fn run(global: &GlobalOptions, cmd: TraceCommand) -> TagTraceResult<()> {
    let tracer = build_tracer(global, &cmd.threshold);
    let bitmap = tracer.for_image(&cmd.input)?;
    if let Some(path) = &cmd.export_bitmap {
        bitmap.save(path)?;
        println!("Bitmap PNG saved to {}", path.display());
    }
    let handle = bitmap.contours()?;
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_svg_path(&cmd.input));

    if cmd.verify {
        handle.verify()?;
        info!("outline reproduces {}", cmd.input.display());
    }

    let options = SvgOptions::default()
        .with_foreground(cmd.foreground)
        .with_scale(cmd.scale)
        .with_physical_size_mm(cmd.size_mm)
        .with_background(cmd.background.then_some([255, 255, 255, 255]));
    handle.save_svg(&output_path, &options)?;
    info!(polygons = handle.polygons().len(), "traced {}", cmd.input.display());
    println!("SVG saved to {}", output_path.display());

    Ok(())
}
