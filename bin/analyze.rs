use std::env;
use std::fs;
use std::process::exit;

use clap::Parser;
use log::error;

use nucpair_analysis::events::NullSink;
use nucpair_analysis::{analyze, parse_pair_list, AnalysisConfig};
use nucpair_structure::{Atom, Structure, TemplateLibrary};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Calculates base-pair step and helical parameters along a pair list
/// say analyze -h to see options
struct Args {
    /// input file name (PDB format)
    #[clap(long, short = 'i', required = true)]
    infile: String,
    /// pair list produced by find_pair
    #[clap(long, short = 'p', required = true)]
    pairs: String,
    /// directory with the standard base templates
    #[clap(long, short = 't', default_value = "resources/templates")]
    templates: String,
    /// first step to report, 1-based
    #[clap(long, short = 's', default_value_t = 1)]
    start: usize,
    /// stride between reported steps
    #[clap(long, short = 'k', default_value_t = 1)]
    stride: usize,
    /// be more verbose and log program actions on the screen
    #[clap(long, short = 'v')]
    verbose: bool,
}

fn load_structure(path: &str) -> std::io::Result<Structure> {
    let content = fs::read_to_string(path)?;
    let mut atoms = vec![];
    for line in content.lines() {
        if !line.starts_with("ATOM") && !line.starts_with("HETATM") { continue; }
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
    let pair_text = match fs::read_to_string(&args.pairs) {
        Ok(text) => text,
        Err(e) => {
            error!("can't read {}: {}", args.pairs, e);
            exit(1);
        }
    };
    let pair_list = match parse_pair_list(&pair_text) {
        Ok(list) => list,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };

    let config = AnalysisConfig::default();
    let start = args.start.saturating_sub(1);
    let outcome = match analyze(&mut structure, &pair_list, &templates, &config,
                                start, args.stride.max(1), &mut NullSink) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("analyze failed: {}", e);
            exit(1);
        }
    };

    println!("{:>4} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
             "step", "shift", "slide", "rise", "tilt", "roll", "twist");
    for record in &outcome.steps {
        let p = &record.parameters;
        println!("{:>4} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                 record.step_index + 1, p.shift, p.slide, p.rise, p.tilt, p.roll, p.twist);
    }
    println!();
    println!("{:>4} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
             "step", "x-disp", "y-disp", "h-rise", "incl", "tip", "h-twist");
    for record in &outcome.steps {
        let h = &record.helical;
        println!("{:>4} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                 record.step_index + 1, h.x_displacement, h.y_displacement, h.h_rise,
                 h.inclination, h.tip, h.h_twist);
    }
}
