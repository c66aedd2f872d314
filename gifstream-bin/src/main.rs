// main.rs      gifstream command
//
// Copyright (c) 2019-2026  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gifstream::encode::FrameEnc;
use gifstream::{ColorTable, Encoder, Region};
use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &'static str = std::env!("CARGO_PKG_VERSION");

/// Black, red, green, blue
#[rustfmt::skip]
const STRIPE_COLORS: [u8; 12] = [
    0x00, 0x00, 0x00,
    0xFF, 0x00, 0x00,
    0x00, 0xFF, 0x00,
    0x00, 0x00, 0xFF,
];

/// White, purple, black, black
#[rustfmt::skip]
const BAR_COLORS: [u8; 12] = [
    0xFF, 0xFF, 0xFF,
    0xDA, 0x09, 0xFF,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Always);
    match create_app().get_matches().subcommand() {
        ("stripes", Some(matches)) => stripes(&mut out, matches)?,
        ("bars", Some(matches)) => bars(&mut out, matches)?,
        _ => unreachable!(),
    }
    out.reset()?;
    Ok(())
}

/// Create an argument for a numeric option
fn number_arg(name: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .validator(|v| {
            u16::from_str(&v).map(|_| ()).map_err(|e| e.to_string())
        })
        .help(help)
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("gifstream")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("Animated GIF writer")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("stripes")
                .about("Write diagonal color stripes")
                .arg(Arg::with_name("file").required(true).help("output file"))
                .arg(number_arg("width", "canvas width (120)"))
                .arg(number_arg("height", "canvas height (90)"))
                .arg(number_arg("frames", "number of frames (8)"))
                .arg(number_arg("delay", "frame delay, centiseconds (10)")),
        )
        .subcommand(
            SubCommand::with_name("bars")
                .about("Write a moving bar over a transparent background")
                .arg(Arg::with_name("file").required(true).help("output file"))
                .arg(number_arg("frames", "number of frames (100)"))
                .arg(number_arg("delay", "frame delay, centiseconds (5)")),
        )
}

/// Get a numeric option value
fn number(matches: &ArgMatches, name: &str, dflt: u16) -> u16 {
    matches
        .value_of(name)
        .and_then(|v| u16::from_str(v).ok())
        .unwrap_or(dflt)
}

/// Handle stripes subcommand
fn stripes(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let path = Path::new(matches.value_of_os("file").unwrap());
    let width = number(matches, "width", 120);
    let height = number(matches, "height", 90);
    let n_frames = number(matches, "frames", 8);
    let delay = number(matches, "delay", 10);
    let mut enc = Encoder::create(path)?
        .with_depth(2)
        .with_color_table(ColorTable::with_colors(&STRIPE_COLORS))
        .with_loop_count(Some(0))
        .into_frame_enc(width, height)?;
    let mut regions = vec![];
    for i in 0..usize::from(n_frames) {
        for (j, p) in enc.frame_mut().iter_mut().enumerate() {
            *p = ((i * 3 + j) / 6 % 4) as u8;
        }
        regions.push(add_frame(&mut enc, delay)?);
    }
    let size = enc.finish()?;
    show_summary(out, path, size, &regions)
}

/// Handle bars subcommand
fn bars(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let path = Path::new(matches.value_of_os("file").unwrap());
    let n_frames = usize::from(number(matches, "frames", 100));
    let delay = number(matches, "delay", 5);
    let mut enc = Encoder::create(path)?
        .with_depth(2)
        .with_color_table(ColorTable::with_colors(&BAR_COLORS))
        .with_background(Some(0))
        .with_loop_count(Some(0))
        .into_frame_enc(100, 100)?;
    let mut regions = vec![];
    for t in 0..n_frames {
        let frame = enc.frame_mut();
        frame.fill(0);
        for y in 11..90 {
            frame[y * 100 + 11..y * 100 + 50].fill(1);
        }
        // bar grows, then shrinks
        let top = t.min(100usize.saturating_sub(t));
        for y in (top + 1)..=50 {
            frame[y * 100 + 60..y * 100 + 65].fill(1);
        }
        regions.push(add_frame(&mut enc, delay)?);
    }
    let size = enc.finish()?;
    show_summary(out, path, size, &regions)
}

/// Add a frame, returning its encoded region
fn add_frame<W: Write>(
    enc: &mut FrameEnc<W>,
    delay: u16,
) -> Result<Region, Box<dyn Error>> {
    enc.add_frame(delay)?;
    Ok(enc.region().unwrap_or_default())
}

/// Show a summary of the written file
fn show_summary(
    out: &mut StandardStream,
    path: &Path,
    size: u64,
    regions: &[Region],
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    out.set_color(&magenta)?;
    writeln!(out, "{:?}", path)?;
    out.set_color(&bold)?;
    writeln!(out, "frames: {}, bytes: {}", regions.len(), size)?;
    let frame_digits = digits(regions.len()).max(3);
    out.set_color(&yellow)?;
    writeln!(out, " {:>w$} {:>9} {:>9}", "Fr#", "Size", "X,Y", w = frame_digits)?;
    let full = regions.first().copied().unwrap_or_default();
    for (n, region) in regions.iter().enumerate() {
        out.set_color(&bold)?;
        write!(out, " {:>w$}", n, w = frame_digits)?;
        if region.width == full.width && region.height == full.height {
            out.set_color(&dflt)?;
        }
        let sz = format!("{}x{}", region.width, region.height);
        let pos = format!("{},{}", region.left, region.top);
        writeln!(out, " {:>9} {:>9}", sz, pos)?;
    }
    Ok(())
}

/// Calculate digits in a number
fn digits(v: usize) -> usize {
    match v {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        1000..=9999 => 4,
        _ => 5,
    }
}
