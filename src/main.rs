use clap::{Parser, Subcommand, ValueEnum};
use ratemap::liftover::{run_liftover, LiftoverConfig};
use ratemap::output::DirSink;
use ratemap::plot::{BitmapRenderer, PlotRenderer};
use ratemap::report::{run_report, ReportOptions};
use ratemap::{RateMapError, Track};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const INFO: &str = "\
ratemap: derive recombination rate maps from genetic linkage maps
usage: ratemap [--help] <subcommand>

Subcommands:

  rates: calculate cM/Mb rates, write per-chromosome HapMap files and a rate plot.
  liftover: run the external liftover catalog tool.

";

#[derive(Parser)]
#[clap(name = "ratemap")]
#[clap(about = INFO)]
struct Cli {
    /// Increase logging verbosity (-d info, -dd debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TrackArg {
    SexAvg,
    Male,
    Female,
}

impl From<TrackArg> for Track {
    fn from(track: TrackArg) -> Self {
        match track {
            TrackArg::SexAvg => Track::SexAvg,
            TrackArg::Male => Track::Male,
            TrackArg::Female => Track::Female,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate local recombination rates from a sex-specific genetic map.
    ///
    /// The input is a TSV with the columns chr, pos, male, female and Sex_avg
    /// (physical position in bp, genetic positions in cM). One HapMap-formatted
    /// file per chromosome is written to the output directory, with columns:
    ///
    ///  - Chromosome
    ///  - Position(bp)
    ///  - Rate(cM/Mb)  (sex-averaged)
    ///  - Map(cM)      (sex-averaged)
    ///
    /// Y and MT get a single all-zero row if they have no markers.
    ///
    /// Example:
    ///
    ///  $ ratemap rates FileS2 --outdir Littrell2018_rn6 --plot rn6_map.png
    Rates {
        /// the input genetic map (TSV, optionally gzip-compressed)
        #[arg(required = true)]
        input: String,
        /// the output directory for per-chromosome files
        #[arg(long, default_value = "Littrell2018_rn6")]
        outdir: PathBuf,
        /// the rate plot image path
        #[arg(long, default_value = "rn6_map.png")]
        plot: PathBuf,
        /// skip drawing the rate plot
        #[arg(long, default_value_t = false)]
        no_plot: bool,
        /// the rate track to plot
        #[arg(long, value_enum, default_value = "sex-avg")]
        track: TrackArg,
        /// do not add placeholder Y and MT files
        #[arg(long, default_value_t = false)]
        no_placeholders: bool,
        /// gzip-compress the output files
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Lift a genetic map to another assembly with the liftover catalog tool.
    Liftover {
        /// the interpreter for the script
        #[arg(long, default_value = "python")]
        python: String,
        /// the liftover catalog script
        #[arg(long, default_value = "/maintenance/liftOver_catalog.py")]
        script: String,
        #[arg(long, default_value = "RatNor")]
        species: String,
        /// the catalog genetic map name
        #[arg(long, default_value = "Littrelletal2018_rn6")]
        map: String,
        /// chain file from the source to the target assembly
        #[arg(long, default_value = "rn6ToRn7.over.chain.gz")]
        chain_file: String,
        /// chain file from the target back to the source assembly
        #[arg(long, default_value = "rn7ToRn6.over.chain.gz")]
        validation_chain: String,
        /// window length in bp
        #[arg(long, default_value_t = 1000)]
        win_len: u64,
        /// average adjacent windows (on by default)
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        use_adjacent_avg: bool,
        /// keep intermediate files (on by default)
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        retain_intermediates: bool,
        /// gap threshold in bp
        #[arg(long, default_value_t = 1_000_000)]
        gap_thresh: u64,
        /// print the command instead of running it
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn calc_rates(input: &str, options: &ReportOptions) -> Result<(), RateMapError> {
    let mut sink = DirSink::new(&options.outdir, options.gzip);
    let mut renderer = options.plot.as_ref().map(BitmapRenderer::new);
    let report = run_report(
        input,
        options,
        &mut sink,
        renderer.as_mut().map(|r| r as &mut dyn PlotRenderer),
    )?;
    for (chrom, table) in report.partitioned.iter() {
        println!("{}\t{}", chrom, table.len());
    }
    Ok(())
}

fn run() -> Result<(), RateMapError> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match cli.command {
        Some(Commands::Rates {
            input,
            outdir,
            plot,
            no_plot,
            track,
            no_placeholders,
            gzip,
        }) => {
            let options = ReportOptions {
                outdir,
                plot: (!no_plot).then_some(plot),
                track: track.into(),
                placeholders: !no_placeholders,
                gzip,
            };
            calc_rates(&input, &options)
        }
        Some(Commands::Liftover {
            python,
            script,
            species,
            map,
            chain_file,
            validation_chain,
            win_len,
            use_adjacent_avg,
            retain_intermediates,
            gap_thresh,
            dry_run,
        }) => {
            let config = LiftoverConfig {
                interpreter: python,
                script,
                species,
                map,
                chain_file,
                validation_chain,
                win_len,
                use_adjacent_avg,
                retain_intermediates,
                gap_thresh,
            };
            if dry_run {
                println!("{}", config.command_line());
                Ok(())
            } else {
                run_liftover(&config)
            }
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
