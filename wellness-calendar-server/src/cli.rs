use std::env;
use std::net::SocketAddr;
use std::process;

use chrono::Weekday;
use getopts::Options;
use wellness_calendar::{DayGrid, DEFAULT_HOUR_HEIGHT};

pub const ADDR_ENV: &str = "WELLNESS_CALENDAR_ADDR";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub address: SocketAddr,
    pub grid: DayGrid,
    pub week_start: Weekday,
    pub seed: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        concat!(
            "Socket address (IP and port) to listen on, falls back to $WELLNESS_CALENDAR_ADDR ",
            "[Default: 127.0.0.1:8080]"
        ),
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "",
        "hour-height",
        "Pixel height of one hour row in day layouts [Default: 60]",
        "PIXELS",
    );
    opts.optopt(
        "",
        "week-start",
        "Weekday shown in the first month grid column [Default: sun]",
        "WEEKDAY",
    );
    opts.optflag(
        "",
        "no-seed",
        "Start with an empty calendar instead of a sample day",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    match try_parse(&opts, args, env::var(ADDR_ENV).ok()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// `Ok(None)` means help was requested.
fn try_parse(
    opts: &Options,
    args: Vec<String>,
    env_address: Option<String>,
) -> Result<Option<Args>, String> {
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(None);
    }

    let default_address = match env_address {
        Some(value) => value
            .parse()
            .map_err(|err| format!("Failed to parse `{ADDR_ENV}` environment variable: {err}"))?,
        None => SocketAddr::from(([127, 0, 0, 1], 8080)),
    };

    let address = matches
        .opt_get_default("address", default_address)
        .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?;

    let hour_height: f32 = matches
        .opt_get_default("hour-height", DEFAULT_HOUR_HEIGHT)
        .map_err(|err| format!("Provided value for option 'hour-height' is invalid: {err}"))?;

    if !hour_height.is_finite() || hour_height <= 0.0 {
        return Err(format!(
            "Provided value for option 'hour-height' must be positive, got {hour_height}"
        ));
    }

    let week_start = matches
        .opt_get_default("week-start", Weekday::Sun)
        .map_err(|err| format!("Provided value for option 'week-start' is invalid: {err}"))?;

    Ok(Some(Args {
        address,
        grid: DayGrid::new(hour_height),
        week_start,
        seed: !matches.opt_present("no-seed"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str], env_address: Option<&str>) -> Result<Option<Args>, String> {
        try_parse(
            &opts(),
            args.iter().map(|arg| arg.to_string()).collect(),
            env_address.map(str::to_string),
        )
    }

    #[test]
    fn defaults() {
        let args = parse_args(&[], None).unwrap().unwrap();
        assert_eq!(args.address, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(args.grid, DayGrid::default());
        assert_eq!(args.week_start, Weekday::Sun);
        assert!(args.seed);
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse_args(
            &[
                "--address",
                "0.0.0.0:9000",
                "--hour-height",
                "90",
                "--week-start",
                "mon",
                "--no-seed",
            ],
            Some("127.0.0.1:7000"),
        )
        .unwrap()
        .unwrap();

        assert_eq!(args.address, SocketAddr::from(([0, 0, 0, 0], 9000)));
        assert_eq!(args.grid.hour_height, 90.0);
        assert_eq!(args.grid.min_height, 30.0);
        assert_eq!(args.week_start, Weekday::Mon);
        assert!(!args.seed);
    }

    #[test]
    fn environment_address_is_the_fallback() {
        let args = parse_args(&[], Some("127.0.0.1:7000")).unwrap().unwrap();
        assert_eq!(args.address, SocketAddr::from(([127, 0, 0, 1], 7000)));
        assert!(parse_args(&[], Some("nope")).is_err());
    }

    #[test]
    fn help_and_invalid_values() {
        assert_eq!(parse_args(&["--help"], None), Ok(None));
        assert!(parse_args(&["--hour-height", "-4"], None).is_err());
        assert!(parse_args(&["--hour-height", "tall"], None).is_err());
        assert!(parse_args(&["--week-start", "someday"], None).is_err());
        assert!(parse_args(&["--bogus"], None).is_err());
    }
}
