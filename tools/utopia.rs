/// Utopia: print one or more randomly assembled micro-utopias.
///
/// Usage: utopia [--theme <theme>] [--n <count>] [--seed <n>] [--pools <file.ron>]
use clap::Parser;
use micro_utopia::core::generator::Generator;
use micro_utopia::core::pools::PoolSet;
use micro_utopia::core::render::{now_stamp, write_batch};
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Générateur de micro utopies, pour penser sans s'endormir.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Ex: travail, démocratie, IA, école, ville...
    #[arg(long, default_value = "")]
    theme: String,

    /// Nombre de propositions à générer
    #[arg(long, default_value_t = 1)]
    n: usize,

    /// Graine du générateur, pour une sortie reproductible
    #[arg(long)]
    seed: Option<u64>,

    /// Fichier RON remplaçant tout ou partie des listes intégrées
    #[arg(long)]
    pools: Option<PathBuf>,
}

fn main() {
    micro_utopia::logging::init();
    let args = Args::parse();

    let mut pools = PoolSet::builtin();
    if let Some(ref path) = args.pools {
        match PoolSet::load_from_ron(path) {
            Ok(overrides) => {
                info!("Loaded pools: {}", path.display());
                pools.merge(overrides);
            }
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    let mut builder = Generator::builder().with_pools(pools);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut generator = builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_batch(&mut generator, Some(args.theme.as_str()), args.n, &mut out, &now_stamp) {
        // Reader went away early, e.g. piped into `head`.
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
