use std::{fs, path::PathBuf};

use anyhow::{Context, bail};
use shader_types::graphics::wgsl::{WgslOptions, generate_wgsl};

const USAGE: &str = "usage: shader_types [--no-bindings] [OUTPUT]";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut options = WgslOptions::default();
    let mut output: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-bindings" => options.bindings = false,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            flag if flag.starts_with('-') => bail!("unknown flag '{flag}'\n{USAGE}"),
            path if output.is_none() => output = Some(PathBuf::from(path)),
            _ => bail!("more than one output given\n{USAGE}"),
        }
    }

    let source = generate_wgsl(&options);
    match output {
        Some(path) => {
            fs::write(&path, &source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote WGSL prelude to {}", path.display());
        }
        None => print!("{source}"),
    }

    Ok(())
}
