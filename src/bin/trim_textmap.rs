use std::path::PathBuf;

use clap::Parser;
use textmap_trim::{TrimOptions, run};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Filter a localisation text map down to the entries referenced by one or more excel config tables."
)]
struct Cli {
    /// The config tables to collect nameTextMapHash values from
    #[arg(
        short = 's',
        long = "source",
        value_name = "JSON",
        num_args = 1..,
        default_value = "DisplayItemExcelConfigData.json"
    )]
    sources: Vec<PathBuf>,

    /// The text map to filter in place
    #[arg(
        short = 't',
        long = "textmap",
        value_name = "JSON",
        default_value = "TextMapEN.json"
    )]
    textmap: PathBuf,

    /// The suffix appended to the text map name for the pre-filter backup
    #[arg(long, value_name = "SUFFIX", default_value = ".bak")]
    backup_suffix: String,
}

fn main() {
    let cli = Cli::parse();

    let options = TrimOptions {
        sources: cli.sources,
        textmap: cli.textmap,
        backup_suffix: cli.backup_suffix,
    };

    match run(&options) {
        Ok(summary) => {
            println!(
                "Filtered {}. Kept {} entries.",
                options.textmap.display(),
                summary.kept
            );
        }
        Err(e) => {
            eprintln!("{}", e);

            error_exit();
        }
    }
}

fn error_exit() -> ! {
    eprintln!("\nUnable to continue.");

    std::process::exit(1);
}
