mod cli;
mod driver;
mod effects;
mod intake;
mod logging;
mod settings;

use clap::Parser;
use cloudpdf_core::ToolKind;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    logging::initialize(args.log.destination());

    if args.list_tools {
        print_catalog();
        return Ok(());
    }

    let tool: ToolKind = args.tool.as_deref().unwrap_or_default().parse()?;
    let inputs = intake::load_inputs(&args.inputs)?;
    let cwd = std::env::current_dir()?;
    let settings = settings::load(&cwd);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir.clone());

    driver::run(tool, inputs, &settings, &output_dir)
}

fn print_catalog() {
    println!("{:<14} {:<9} {:<14} description", "id", "category", "title");
    for tool in ToolKind::ALL {
        println!(
            "{:<14} {:<9} {:<14} {}",
            tool.id(),
            tool.category().label(),
            tool.title(),
            tool.blurb()
        );
    }
}
