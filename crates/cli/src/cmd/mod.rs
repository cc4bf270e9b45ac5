pub mod extract;
pub mod tags;
pub mod update;

/// Print `Error: <e>` to stderr and exit with status 1.
pub(crate) fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    crate::logging::flush();
    std::process::exit(1);
}
