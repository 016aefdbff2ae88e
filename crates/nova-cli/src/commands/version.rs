use anyhow::Result;
use console::style;

pub fn execute(assistant_name: &str) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "{} - version {}",
        style(format!("{} CLI", assistant_name)).bold().green(),
        style(version).bold()
    );
    Ok(())
}
