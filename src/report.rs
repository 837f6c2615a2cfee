use tagtrace::TagTraceError;

pub fn report_error(err: &TagTraceError) {
    match err {
        TagTraceError::UnknownFamily { name, path } => {
            eprintln!("Unknown family '{name}': {} does not exist", path.display());
            eprintln!();
            eprintln!("Please point to the directory holding the family JSON files:");
            eprintln!("  - Use --family-dir <dir>");
            eprintln!(
                "  - Or set environment variable {} to that directory",
                tagtrace::ENV_FAMILY_DIR
            );
        }
        TagTraceError::TracerStalled { .. } => {
            eprintln!("{err}");
            eprintln!();
            eprintln!("Raise the ceiling with --step-limit <steps> if the image is very large.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
