use argh::FromArgs;
use colored::Colorize;
use std::path::{Path, PathBuf};

use iro_render::{default_output_path, render_with_config, resolve_config, Error, RenderSettings};

#[derive(Debug, FromArgs)]
#[argh(
    description = "Renders a raw little-endian RGB555 dump to PNG.\nSettings are read from an iro.toml next to the input unless --config is given:\n\t[render]\n\twidth = 240\n\theight = 160\n\tformat = \"rgb555\"\t# Optional\n\tbrighten = 4\t\t# Optional, 0 to 16\n\tdarken = 0\t\t# Optional, 0 to 16\n"
)]
struct Args {
    /// raw pixel file to render
    #[argh(positional)]
    input: String,
    /// output path
    #[argh(option, short = 'o')]
    output: Option<String>,
    /// config file
    #[argh(option, short = 'c')]
    config: Option<String>,
    /// frame width in pixels
    #[argh(option)]
    width: Option<u32>,
    /// frame height in pixels
    #[argh(option)]
    height: Option<u32>,
    /// brighten toward white, 0 to 16
    #[argh(option)]
    brighten: Option<u32>,
    /// darken toward black, 0 to 16
    #[argh(option)]
    darken: Option<u32>,
}

fn main() -> Result<(), Error> {
    let args: Args = argh::from_env();
    let input = PathBuf::from(&args.input);

    let overrides = RenderSettings {
        width: args.width,
        height: args.height,
        format: None,
        brighten: args.brighten,
        darken: args.darken,
        output: args.output,
    };
    let config = resolve_config(&input, args.config.as_deref().map(Path::new), overrides)?;

    let output_path = config
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&input));
    let output_file = output_path.display().to_string();

    render_with_config(&input, &output_path, config)?;
    println!("Wrote {}! {}", output_file.green(), "".clear());

    Ok(())
}
