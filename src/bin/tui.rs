use anyhow::Result;

fn main() -> Result<()> {
    taskdeck::tui::run()
}
