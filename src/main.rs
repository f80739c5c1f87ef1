fn main() -> anyhow::Result<()> {
    segrouter::cli::run_cli()
}
