use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use weather_checker::models::location::DEFAULT_MAP_ZOOM;
use weather_checker::timezone::system_timezone;
use weather_checker::{
    App, Clock, FavoriteOutcome, LocalTimeDisplay, LocationTimezone, Settings, SettingsStore,
    SystemClock, TemperatureUnit, WeatherApiClient, WeatherCheckConfig, WeatherReport,
    dual_local_times,
};

/// Current weather, local time at destination and favorite cities
#[derive(Debug, Parser)]
#[command(name = "weather-checker", version, about)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up the current weather for a place
    Weather(WeatherArgs),
    /// Manage favorite places
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Show or change preferences
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Show the current time in two timezones side by side
    Time {
        /// Your IANA timezone, e.g. Europe/Berlin
        user_timezone: String,
        /// The other IANA timezone, e.g. America/Chicago
        location_timezone: String,
    },
}

#[derive(Debug, Args)]
struct WeatherArgs {
    /// City name or "lat,lon"; the default location is used when omitted
    place: Option<String>,

    /// Look up the favorite at this position (see `favorites list`)
    #[arg(short, long, conflicts_with = "place")]
    favorite: Option<usize>,

    /// Display temperatures in this unit
    #[arg(short, long, value_enum)]
    unit: Option<UnitArg>,

    /// Add the place to the favorites after a successful lookup
    #[arg(short, long)]
    save: bool,

    /// Hide the map link
    #[arg(long)]
    no_map: bool,
}

#[derive(Debug, Subcommand)]
enum FavoritesCommand {
    /// List favorites, oldest first
    List,
    /// Add a favorite (the oldest is dropped when there are already five)
    Add { place: String },
    /// Remove a favorite
    Remove { place: String },
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        /// Place used when `weather` is run without one
        #[arg(long, conflicts_with = "clear_default")]
        default_location: Option<String>,
        /// Forget the default location
        #[arg(long)]
        clear_default: bool,
        /// Unit used for lookups
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Celsius => TemperatureUnit::Celsius,
            UnitArg::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = WeatherCheckConfig::load_from_path(cli.config)?;
    weather_checker::logging::init(&config.logging, cli.verbose)?;
    tracing::debug!("Using settings file {}", config.settings_path().display());

    if let Command::Time {
        user_timezone,
        location_timezone,
    } = &cli.command
    {
        return Ok(print_dual_time(user_timezone, location_timezone));
    }

    let user_timezone = config
        .display
        .user_timezone
        .clone()
        .unwrap_or_else(system_timezone);
    let mut app = App::new(
        WeatherApiClient::new(&config)?,
        SettingsStore::new(config.settings_path()),
        Box::new(SystemClock),
        user_timezone,
    );

    let code = match cli.command {
        Command::Weather(args) => run_weather(&mut app, args),
        Command::Favorites(command) => run_favorites(&mut app, command),
        Command::Settings(command) => run_settings(&mut app, command),
        Command::Time { .. } => ExitCode::SUCCESS,
    };

    for notice in app.take_notices() {
        eprintln!("Warning: {notice}");
    }
    Ok(code)
}

fn run_weather(app: &mut App<WeatherApiClient>, args: WeatherArgs) -> ExitCode {
    let unit = args.unit.map(TemperatureUnit::from);
    let result = match args.favorite {
        Some(position) => app.check_favorite(position, unit),
        None => app.check_weather(args.place.as_deref(), unit),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    print_report(&report, !args.no_map);

    if args.save {
        match app.add_favorite(&report.query) {
            Ok(FavoriteOutcome::Added) => println!("\nAdded {} to favorites.", report.query),
            Ok(FavoriteOutcome::AlreadyPresent) => {
                println!("\n{} is already a favorite.", report.query);
            }
            Err(e) => eprintln!("{}", e.user_message()),
        }
    } else if !report.is_favorite {
        println!("\nTip: add --save to keep {} in your favorites.", report.query);
    }
    ExitCode::SUCCESS
}

fn print_report(report: &WeatherReport, show_map: bool) {
    let record = &report.record;
    println!("Weather data for {}:", record.place_label());
    println!("  Temperature: {}", record.format_temperature());
    println!("  Humidity:    {}", record.format_humidity());
    println!("  Condition:   {}", record.display_description());

    match &report.local_time {
        LocalTimeDisplay::Zoned(times) => {
            println!("  Your time:   {}", times.user_time);
            println!(
                "  Local time:  {} ({})",
                times.location_time, times.location_timezone
            );
        }
        LocalTimeDisplay::Offset { .. } => {
            println!("  Local time:  {}", report.local_time.location_time());
        }
    }

    if let Some(icon) = record.icon_url() {
        println!("  Icon:        {icon}");
    }
    if show_map {
        println!("  Map:         {}", record.coordinates.map_url(DEFAULT_MAP_ZOOM));
    }
}

fn run_favorites(app: &mut App<WeatherApiClient>, command: FavoritesCommand) -> ExitCode {
    match command {
        FavoritesCommand::List => print_favorites(app.settings()),
        FavoritesCommand::Add { place } => match app.add_favorite(&place) {
            Ok(FavoriteOutcome::Added) => println!("Added {} to favorites.", place.trim()),
            Ok(FavoriteOutcome::AlreadyPresent) => {
                println!("{} is already a favorite.", place.trim());
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                return ExitCode::FAILURE;
            }
        },
        FavoritesCommand::Remove { place } => {
            let place = place.trim();
            if app.remove_favorite(place) {
                println!("Removed {place} from favorites.");
            } else {
                eprintln!("{place} is not a favorite.");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn print_favorites(settings: &Settings) {
    if settings.favorites.is_empty() {
        println!("No favorites yet. Add one with `favorites add <PLACE>`.");
        return;
    }
    for (index, name) in settings.favorites.iter().enumerate() {
        println!("{}. {}", index + 1, name);
    }
}

fn run_settings(app: &mut App<WeatherApiClient>, command: SettingsCommand) -> ExitCode {
    match command {
        SettingsCommand::Show => {}
        SettingsCommand::Set {
            default_location,
            clear_default,
            unit,
        } => {
            if clear_default {
                app.set_default_location(None);
            } else if default_location.is_some() {
                app.set_default_location(default_location);
            }
            if let Some(unit) = unit {
                app.set_temperature_unit(unit.into());
            }
        }
    }

    let settings = app.settings();
    println!(
        "Default location: {}",
        settings.default_location.as_deref().unwrap_or("(none)")
    );
    println!("Temperature unit: {:?}", settings.temperature_unit);
    println!("Favorites:");
    print_favorites(settings);
    ExitCode::SUCCESS
}

fn print_dual_time(user_timezone: &str, location_timezone: &str) -> ExitCode {
    let location = LocationTimezone::Named(location_timezone.to_string());
    match dual_local_times(user_timezone, &location, SystemClock.now()) {
        Ok(times) => {
            println!("Your time ({user_timezone}): {}", times.user_time);
            println!("{location_timezone}: {}", times.location_time);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
