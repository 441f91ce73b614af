//! `PoECV` command-line entry point

fn main() -> anyhow::Result<()> {
    poecv::cli::run_cli()
}
