use miette::Result;

/// Main entry point for the deadlock-lens CLI tool
fn main() -> Result<()> {
    // Install miette's panic hook for readable panic reports
    miette::set_panic_hook();

    deadlock_lens::run()
}
