extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::output::write_png;
use mandelbrot::progress::TerminalProgress;
use mandelbrot::{ChannelWeights, Config, Error, Renderer};
use std::str::FromStr;
use std::time::{Duration, Instant};

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const FILE: &str = "file";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const RED: &str = "red";
const GREEN: &str = "green";
const BLUE: &str = "blue";
const THREADS: &str = "threads";
const POLL: &str = "poll";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version("0.1.0")
        .about("Parallel escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(FILE)
                .long(FILE)
                .short("f")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Destination filename"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("2560")
                .validator(|s| validate_number::<u32>(&s, "Could not parse image width"))
                .help("Image width in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .short("h")
                .takes_value(true)
                .default_value("2560")
                .validator(|s| validate_number::<u32>(&s, "Could not parse image height"))
                .help("Image height in pixels"),
        )
        .arg(
            Arg::with_name(RED)
                .long(RED)
                .short("r")
                .takes_value(true)
                .default_value("2")
                .allow_hyphen_values(true)
                .validator(|s| validate_number::<i64>(&s, "Could not parse red weight"))
                .help("Color scheme (red)"),
        )
        .arg(
            Arg::with_name(GREEN)
                .long(GREEN)
                .short("g")
                .takes_value(true)
                .default_value("3")
                .allow_hyphen_values(true)
                .validator(|s| validate_number::<i64>(&s, "Could not parse green weight"))
                .help("Color scheme (green)"),
        )
        .arg(
            Arg::with_name(BLUE)
                .long(BLUE)
                .short("b")
                .takes_value(true)
                .default_value("1")
                .allow_hyphen_values(true)
                .validator(|s| validate_number::<i64>(&s, "Could not parse blue weight"))
                .help("Color scheme (blue)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range::<usize>(
                        &s,
                        1,
                        4096,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 4096",
                    )
                })
                .help("Number of worker threads (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(POLL)
                .long(POLL)
                .short("p")
                .takes_value(true)
                .default_value("10")
                .validator(|s| validate_number::<u64>(&s, "Could not parse poll interval"))
                .help("Progress poll interval in milliseconds"),
        )
        .get_matches()
}

/// Every value has either a default or a validator, so parsing here
/// only fails if the two disagree.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T
where
    T: Default,
{
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .unwrap_or_default()
}

fn config(matches: &ArgMatches) -> Result<Config, Error> {
    let threads = match matches.value_of(THREADS) {
        Some(_) => value(matches, THREADS),
        None => num_cpus::get(),
    };
    Config::new(
        matches.value_of(FILE).unwrap_or("mandelbrot.png"),
        value(matches, WIDTH),
        value(matches, HEIGHT),
        ChannelWeights::new(value(matches, RED), value(matches, GREEN), value(matches, BLUE)),
        threads,
        Duration::from_millis(value(matches, POLL)),
    )
}

fn run(config: &Config) -> Result<(), Error> {
    let renderer = Renderer::from_config(config)?;
    let mut progress = TerminalProgress::stdout();
    let framebuffer = renderer.render(config.workers(), config.poll, &mut progress)?;
    write_png(&config.output, &framebuffer)
}

fn main() {
    env_logger::init();
    let start = Instant::now();
    let matches = args();

    let result = config(&matches).and_then(|config| {
        debug!("{:?}", config);
        run(&config).map(|_| config)
    });

    match result {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(config) => {
            let elapsed = start.elapsed();
            info!("wrote {} in {:?}", config.output.display(), elapsed);
            println!(
                "\x1b[2Jimage saved to {} after {:?}",
                config.output.display(),
                elapsed
            );
        }
    }
}
