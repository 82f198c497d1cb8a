mod command;
mod logging;
mod storage;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
