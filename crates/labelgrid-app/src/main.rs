//! Command-line entry point.

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting LabelGrid");

    labelgrid_app::run()
}
