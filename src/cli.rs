use rangepicker::application::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
