use tagtrace::TagTraceResult;

use crate::cli::{GlobalOptions, InspectCommand};

use super::utils::build_tracer;

/// The main function to run the inspect command.
pub fn run(global: &GlobalOptions, cmd: InspectCommand) -> TagTraceResult<()> {
    let handle = build_tracer(global, &cmd.threshold)
        .for_image(&cmd.input)?
        .contours()?;
    let (width, height) = handle.contours().dimensions();

    println!("{}: {width}x{height}, {} polygons", cmd.input.display(), handle.polygons().len());
    for (i, polygon) in handle.polygons().iter().enumerate() {
        println!("{i:4}: {polygon}");
    }

    Ok(())
}
