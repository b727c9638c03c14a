use cipher_core::persistence::{
    self, load_frequency_file, read_mapping, write_blank_map, write_mapping, SessionState,
};
use cipher_core::{Charset, Codec, Cryptanalyzer, FrequencyTable, SubstitutionMap};
use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{stdin, stdout, Write};
use std::path::Path;

const SESSION_PATH: &str = "session.bin";

struct Workbench {
    charset: Charset,
    mapping: SubstitutionMap,
    reference: Option<FrequencyTable>,
    ciphertext: Option<String>,
    codec: Codec,
}

fn main() {
    let mut bench = match persistence::load_session(Path::new(SESSION_PATH)) {
        Ok(state) => Workbench {
            charset: state.charset,
            mapping: state.mapping,
            reference: None,
            ciphertext: None,
            codec: Codec::default(),
        },
        Err(_) => Workbench {
            charset: Charset::from_preset("alpha_low").expect("builtin preset"),
            mapping: SubstitutionMap::blank(),
            reference: None,
            ciphertext: None,
            codec: Codec::default(),
        },
    };

    println!("{}", "Substitution Cipher Workbench".bold());
    println!("Type 'help' for commands, 'exit' to save and quit.");

    loop {
        print!("\n> ");
        stdout().flush().ok();
        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            break;
        }
        let input = input.trim();
        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        let outcome = match cmd {
            "exit" => break,
            "help" => {
                print_help();
                Ok(())
            }
            "charset" => set_charset(&mut bench, arg),
            "text" => load_text(&mut bench, arg),
            "freq" => load_reference(&mut bench, arg),
            "map" => load_map(&mut bench, arg),
            "blankmap" => write_blank_map(&bench.charset, Path::new(arg)).map(|_| {
                println!("Blank map written to '{}'", arg);
            }),
            "savemap" => write_mapping(&bench.charset, &bench.mapping, Path::new(arg)).map(|_| {
                println!("Mapping written to '{}'", arg);
            }),
            "scramble" => {
                let seed: u64 = arg.parse().unwrap_or(0);
                bench.mapping = SubstitutionMap::random(&bench.charset, &mut StdRng::seed_from_u64(seed));
                println!("Random key generated (seed {}).", seed);
                Ok(())
            }
            "decode" => {
                let decoded = bench.codec.decode(arg, &bench.mapping, &bench.charset);
                println!("{}", decoded);
                Ok(())
            }
            "encode" => bench.codec.encode(arg, &bench.mapping).map(|encoded| {
                println!("{}", encoded);
            }),
            "crack" => crack(&mut bench),
            "show" => {
                show(&bench);
                Ok(())
            }
            "" => Ok(()),
            other => {
                println!("Unknown command '{}'. Type 'help'.", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "[ERROR]".red(), e);
        }
    }

    let state = SessionState {
        charset: bench.charset,
        mapping: bench.mapping,
    };
    if let Err(e) = persistence::save_session(&state, Path::new(SESSION_PATH)) {
        eprintln!("{} Could not save session: {}", "[ERROR]".red(), e);
    } else {
        println!("Session saved to '{}'", SESSION_PATH);
    }
}

fn print_help() {
    println!("  charset <preset|keyword>   pick an alphabet (e.g. alpha_low) or build one from a keyword");
    println!("  text <file>                load ciphertext from a file");
    println!("  freq <file>                load a reference frequency table (symbol:probability lines)");
    println!("  map <file>                 read a mapping file (cipher:plain lines)");
    println!("  blankmap <file>            write an empty mapping template for the current charset");
    println!("  savemap <file>             write the current mapping");
    println!("  scramble [seed]            generate a random key over the current charset");
    println!("  decode <text>              decode text under the current mapping");
    println!("  encode <text>              encode text under the current mapping");
    println!("  crack                      recover a mapping from the loaded ciphertext");
    println!("  show                       decode and print the loaded ciphertext");
    println!("  exit                       save the session and quit");
}

fn set_charset(bench: &mut Workbench, arg: &str) -> cipher_core::Result<()> {
    bench.charset = match Charset::from_preset(arg) {
        Ok(charset) => charset,
        Err(_) => {
            println!("No preset '{}', treating it as a keyword.", arg);
            Charset::from_keyword(arg)
        }
    };
    bench.mapping = SubstitutionMap::blank();
    println!("Charset set ({} symbols).", bench.charset.len());
    Ok(())
}

fn load_text(bench: &mut Workbench, arg: &str) -> cipher_core::Result<()> {
    let text = std::fs::read_to_string(arg)?;
    println!("Loaded {} symbols of ciphertext.", text.chars().count());
    bench.ciphertext = Some(text);
    Ok(())
}

fn load_reference(bench: &mut Workbench, arg: &str) -> cipher_core::Result<()> {
    let table = load_frequency_file(Path::new(arg))?;
    println!("Loaded reference table with {} entries.", table.len());
    bench.reference = Some(table);
    Ok(())
}

fn load_map(bench: &mut Workbench, arg: &str) -> cipher_core::Result<()> {
    bench.mapping = read_mapping(Path::new(arg))?;
    println!("Loaded mapping with {} entries.", bench.mapping.len());
    Ok(())
}

fn crack(bench: &mut Workbench) -> cipher_core::Result<()> {
    let Some(ciphertext) = bench.ciphertext.clone() else {
        println!("Load ciphertext first ('text <file>').");
        return Ok(());
    };
    let Some(reference) = bench.reference.clone() else {
        println!("Load a reference frequency table first ('freq <file>').");
        return Ok(());
    };

    let analyzer = Cryptanalyzer::new(bench.charset.clone(), reference).with_codec(bench.codec);
    let analysis = analyzer.analyze(&ciphertext)?;
    println!(
        "Search finished after {} iteration(s) ({:?}), chi-squared {:.4}",
        analysis.iterations, analysis.termination, analysis.score
    );
    bench.mapping = analysis.mapping;
    show(bench);
    Ok(())
}

fn show(bench: &Workbench) {
    match &bench.ciphertext {
        Some(text) => {
            println!("{}", "--- decoded ---".bold());
            println!("{}", bench.codec.decode(text, &bench.mapping, &bench.charset));
        }
        None => println!("No ciphertext loaded."),
    }
}
