fn main() -> anyhow::Result<()> {
    souk::cli::main()
}
