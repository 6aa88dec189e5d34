// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, bail, Context, Result};
use musicology::config::TheoryConfig;
use musicology::music::{
    Chord, ChordType, GlyphSet, HarmonicField, Interval, Key, Notation, Pitch, Scale, Spelling,
};
use std::env;
use tracing::Level;

fn print_usage() {
    println!("musicology - Music theory spelling and harmony");
    println!();
    println!("Usage: musicology [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  scale [ROOT TYPE]           Spell a scale (defaults from config)");
    println!("  field ROOT TYPE [SIZE]      Harmonic field: triad, seventh, ninth, eleventh, thirteenth");
    println!("  chord ROOT INTERVAL...      Name the chord built from intervals (e.g. C P1 M3 P5 m7)");
    println!("  pitch PITCH                 Show MIDI number and frequency of a pitch (e.g. F#3)");
    println!("  nearest HZ                  Find the nearest pitch to a frequency");
    println!("  interval PITCH PITCH        Name the interval between two pitches");
    println!();
    println!("Options:");
    println!("  --config <PATH>             Load settings from a YAML or TOML file");
    println!("  --flats                     Prefer flats when spelling bare semitones");
    println!("  --ascii                     Render accidentals as # and b");
    println!("  --verbose                   Enable debug logging");
    println!("  --help                      Show this help message");
}

/// Settings resolved from the config file and command-line flags
struct Session {
    config: TheoryConfig,
    notation: Notation,
    spelling: Spelling,
}

impl Session {
    fn key(&self, key: Key) -> String {
        key.render(&self.notation)
    }

    fn keys(&self, keys: &[Key]) -> String {
        keys.iter()
            .map(|&k| self.key(k))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn pitch(&self, pitch: Pitch) -> String {
        pitch.render(&self.notation)
    }

    fn scale(&self, root: Option<&String>, name: Option<&String>) -> Result<Scale> {
        match (root, name) {
            (Some(root), Some(name)) => {
                let root: Key = root.parse()?;
                self.config
                    .registry()
                    .get_scale(root, name)
                    .ok_or_else(|| anyhow!("Unknown scale type: {}", name))
            }
            (None, None) => self.config.configured_scale(),
            _ => bail!("Expected both a root and a scale type"),
        }
    }
}

fn show_scale(session: &Session, args: &[String]) -> Result<()> {
    let scale = session.scale(args.first(), args.get(1))?;
    println!(
        "{} {}: {}",
        session.key(scale.root()),
        scale.scale_type(),
        session.keys(scale.keys())
    );
    let labels: Vec<String> = scale.intervals().iter().map(|i| i.label()).collect();
    println!("Intervals: {}", labels.join(" "));
    Ok(())
}

fn show_field(session: &Session, args: &[String]) -> Result<()> {
    if args.len() < 2 {
        bail!("field requires a root and a scale type");
    }
    let scale = session.scale(args.first(), args.get(1))?;
    let size: HarmonicField = match args.get(2) {
        Some(size) => size.parse()?,
        None => HarmonicField::default(),
    };

    for (degree, chord) in scale.harmonic_field(size).iter().enumerate() {
        match chord {
            Some(chord) => {
                let numeral = chord.roman_numeral(&scale).unwrap_or_default();
                println!(
                    "{:>2}  {:<6} {:<10} {}",
                    degree + 1,
                    numeral,
                    chord.render(&session.notation),
                    session.keys(&chord.keys())
                );
            }
            None => println!("{:>2}  -", degree + 1),
        }
    }
    Ok(())
}

fn show_chord(session: &Session, args: &[String]) -> Result<()> {
    let (root, intervals) = args
        .split_first()
        .ok_or_else(|| anyhow!("chord requires a root and intervals"))?;
    let root: Key = root.parse()?;
    let intervals = intervals
        .iter()
        .map(|label| label.parse::<Interval>())
        .collect::<Result<Vec<_>, _>>()?;

    let chord_type = ChordType::from_intervals(&intervals)
        .ok_or_else(|| anyhow!("No chord type matches those intervals"))?;
    let chord = Chord::new(chord_type, root);
    println!(
        "{}: {}",
        chord.render(&session.notation),
        session.keys(&chord.keys())
    );
    for inversion in chord.inversions().iter().skip(1) {
        let voicing: Vec<String> = inversion
            .pitches(4)
            .into_iter()
            .map(|p| session.pitch(p))
            .collect();
        println!("  {}: {}", inversion.render(&session.notation), voicing.join(" "));
    }
    Ok(())
}

fn show_pitch(session: &Session, args: &[String]) -> Result<()> {
    let text = args.first().ok_or_else(|| anyhow!("pitch requires a pitch"))?;
    let pitch: Pitch = text.parse()?;
    println!(
        "{}: MIDI {}, {:.2} Hz",
        session.pitch(pitch),
        pitch.midi(),
        pitch.frequency_with(session.config.reference_pitch)
    );
    Ok(())
}

fn show_nearest(session: &Session, args: &[String]) -> Result<()> {
    let text = args.first().ok_or_else(|| anyhow!("nearest requires a frequency"))?;
    let frequency: f64 = text
        .parse()
        .with_context(|| format!("Invalid frequency: {}", text))?;
    let pitch = Pitch::nearest_with(frequency, session.config.reference_pitch, session.spelling)
        .ok_or_else(|| anyhow!("Frequency must be positive: {}", text))?;
    let exact = pitch.frequency_with(session.config.reference_pitch);
    println!(
        "{}: MIDI {}, {:.2} Hz ({:+.1} cents)",
        session.pitch(pitch),
        pitch.midi(),
        exact,
        1200.0 * (frequency / exact).log2()
    );
    Ok(())
}

fn show_interval(session: &Session, args: &[String]) -> Result<()> {
    if args.len() < 2 {
        bail!("interval requires two pitches");
    }
    let from: Pitch = args[0].parse()?;
    let to: Pitch = args[1].parse()?;
    let interval = from.interval_to(&to);
    println!(
        "{} -> {}: {} ({}, {} semitones)",
        session.pitch(from),
        session.pitch(to),
        interval.label(),
        interval.name(),
        interval.semitones()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        println!("musicology - Music theory spelling and harmony");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let mut config_path = None;
    let mut flats = false;
    let mut ascii = false;
    let mut verbose = false;
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = iter.next() else {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                };
                config_path = Some(path);
            }
            "--flats" => flats = true,
            "--ascii" => ascii = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = match config_path {
        Some(path) => TheoryConfig::load(&path)?,
        None => TheoryConfig::default(),
    };

    let mut notation = config.notation;
    if ascii {
        notation.glyphs = GlyphSet::Ascii;
    }
    let spelling = if flats { Spelling::Flats } else { config.spelling };
    let session = Session {
        config,
        notation,
        spelling,
    };

    let Some((command, rest)) = positional.split_first() else {
        eprintln!("Error: no command given");
        print_usage();
        std::process::exit(1);
    };

    match command.as_str() {
        "scale" => show_scale(&session, rest)?,
        "field" => show_field(&session, rest)?,
        "chord" => show_chord(&session, rest)?,
        "pitch" => show_pitch(&session, rest)?,
        "nearest" => show_nearest(&session, rest)?,
        "interval" => show_interval(&session, rest)?,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
