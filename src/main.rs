use league_scheduler::config::AppConfig;
use league_scheduler::display::{print_schedule, print_standings, write_schedule_to_file, write_standings_to_file};
use league_scheduler::parser::{load_result_rows, load_schedule_request, parse_date, LoadError};
use league_scheduler::{aggregate_standings, generate_schedule, web};

const USAGE: &str = "Usage:
  league-scheduler schedule <data_dir> <league_id> <start YYYY-MM-DD> <end YYYY-MM-DD> <match_minutes>
  league-scheduler standings <results.csv>
  league-scheduler web [port]";

fn arg<'a>(args: &'a [String], index: usize, field: &'static str) -> Result<&'a str, LoadError> {
    args.get(index)
        .map(String::as_str)
        .ok_or(LoadError::MissingArgument(field))
}

fn parse_number(field: &'static str, value: &str) -> Result<i64, LoadError> {
    value.trim().parse().map_err(|_| LoadError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn run_schedule(args: &[String], config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = arg(args, 2, "data_dir")?;
    let league_id = parse_number("league_id", arg(args, 3, "league_id")?)?;
    let start_date = parse_date("start", arg(args, 4, "start")?)?;
    let end_date = parse_date("end", arg(args, 5, "end")?)?;
    let match_minutes = parse_number("match_minutes", arg(args, 6, "match_minutes")?)?;

    println!("Loading league data from {}...", data_dir);
    let request = load_schedule_request(data_dir, league_id, start_date, end_date, match_minutes)?;
    println!(
        "Loaded {} teams, {} courts, {} open weekdays",
        request.teams.len(),
        request.courts.len(),
        request.hours.len()
    );

    let matches = generate_schedule(&request)?;
    print_schedule(league_id, &matches);

    let path = config.output_dir.join(format!("schedule_league_{}.csv", league_id));
    write_schedule_to_file(&matches, &path)?;
    println!("\nSchedule saved to {}", path.display());

    Ok(())
}

fn run_standings(args: &[String], config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let results_path = arg(args, 2, "results.csv")?;

    println!("Loading results from {}...", results_path);
    let rows = load_result_rows(results_path)?;
    println!("Loaded {} result rows", rows.len());

    let standings = aggregate_standings(&rows)?;
    print_standings("Standings", &standings);

    let path = config.output_dir.join("standings.txt");
    write_standings_to_file("Standings", &standings, &path)?;
    println!("\nStandings saved to {}", path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::from_env();

    match args.get(1).map(String::as_str) {
        Some("web") => {
            let config = config.with_port_arg(args.get(2).map(String::as_str));
            println!("Starting web server on port {}...", config.port);
            web::start_server(&config).await?;
        }
        Some("schedule") => run_schedule(&args, &config)?,
        Some("standings") => run_standings(&args, &config)?,
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
