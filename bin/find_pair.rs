use std::env;
use std::fs;
use std::process::exit;

use clap::Parser;
use log::{error, info};

use nucpair_analysis::events::{EventSink, JsonEventRecorder, NullSink};
use nucpair_analysis::{find_pair, format_pair_list, AnalysisConfig};
use nucpair_structure::{Atom, Structure, TemplateLibrary};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Finds base pairs and helices in a nucleic-acid structure
/// say find_pair -h to see options
struct Args {
    /// input file name (PDB format)
    #[clap(long, short = 'i', required = true)]
    infile: String,
    /// directory with the standard base templates
    #[clap(long, short = 't', default_value = "resources/templates")]
    templates: String,
    /// output file for the pair list; written to stdout when absent
    #[clap(long, short = 'o')]
    outfile: Option<String>,
    /// record the analysis event stream into a JSON file
    #[clap(long)]
    json_events: Option<String>,
    /// be more verbose and log program actions on the screen
    #[clap(long, short = 'v')]
    verbose: bool,
}

fn load_structure(path: &str) -> std::io::Result<Structure> {
    let content = fs::read_to_string(path)?;
    let mut atoms = vec![];
    for line in content.lines() {
        if !line.starts_with("ATOM") && !line.starts_with("HETATM") { continue; }
        // keep the primary alternate location only
        let alt_loc = line.chars().nth(16).unwrap_or(' ');
        if alt_loc != ' ' && alt_loc != 'A' { continue; }
        match Atom::from_atom_line(line) {
            Ok(atom) => atoms.push(atom),
            Err(e) => error!("skipping a coordinate line: {}", e),
        }
    }
    return Ok(Structure::from_atoms(path, atoms));
}

fn main() {
    let args = Args::parse();
    unsafe {
        if env::var("RUST_LOG").is_err() { env::set_var("RUST_LOG", "info") }
        if args.verbose { env::set_var("RUST_LOG", "debug"); }
    }
    env_logger::init();

    let templates = match TemplateLibrary::open(&args.templates) {
        Ok(t) => t,
        Err(e) => {
            error!("can't load base templates: {}", e);
            exit(1);
        }
    };
    let mut structure = match load_structure(&args.infile) {
        Ok(s) => s,
        Err(e) => {
            error!("can't read {}: {}", args.infile, e);
            exit(1);
        }
    };

    let config = AnalysisConfig::default();
    let mut recorder = JsonEventRecorder::new();
    let mut null_sink = NullSink;
    let sink: &mut dyn EventSink = if args.json_events.is_some() { &mut recorder } else { &mut null_sink };

    let outcome = match find_pair(&mut structure, &templates, &config, sink) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("find_pair failed: {}", e);
            exit(1);
        }
    };

    for (helix_no, helix) in outcome.helices.iter().enumerate() {
        info!("helix {:>3}: {:>4} pairs{}{}{}", helix_no + 1, helix.len(),
              if helix.is_circular { ", circular" } else { "" },
              if helix.has_break { ", broken" } else { "" },
              if helix.is_z_form { ", Z-form" } else { "" });
    }

    let listing = format_pair_list(&outcome.pairs, &outcome.strand_swapped);
    match &args.outfile {
        Some(path) => {
            if let Err(e) = fs::write(path, listing) {
                error!("can't write {}: {}", path, e);
                exit(1);
            }
        }
        None => print!("{}", listing),
    }

    if let Some(path) = &args.json_events {
        if let Err(e) = fs::write(path, recorder.to_json().to_string()) {
            error!("can't write {}: {}", path, e);
            exit(1);
        }
    }
}
