use log::error;
use std::path::PathBuf;

use shift_dashboard::config::DashboardConfig;
use shift_dashboard::display::{
    format_nurse_schedule, format_slot_staff, print_report, write_report_to_file,
};
use shift_dashboard::parser::load_matrix;
use shift_dashboard::schedule::{CoverageThresholds, Roster};
use shift_dashboard::web;

/// Command-line options layered over the configuration file
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    web: bool,
    port: Option<u16>,
    csv_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    no_headers: bool,
    thresholds: Option<String>,
    nurse: Option<String>,
    slot: Option<(String, String)>,
    out: Option<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter().peekable();

    if iter.peek().map(|a| a.as_str()) == Some("web") {
        iter.next();
        cli.web = true;
        if let Some(port) = iter.peek().and_then(|p| p.parse::<u16>().ok()) {
            cli.port = Some(port);
            iter.next();
        }
    }

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--config" => cli.config_path = Some(PathBuf::from(value("--config")?)),
            "--no-headers" => cli.no_headers = true,
            "--thresholds" => cli.thresholds = Some(value("--thresholds")?),
            "--nurse" => cli.nurse = Some(value("--nurse")?),
            "--out" => cli.out = Some(value("--out")?),
            "--slot" => {
                let spec = value("--slot")?;
                let (day, shift) = spec
                    .split_once(',')
                    .ok_or_else(|| format!("--slot expects DAY,SHIFT, got '{}'", spec))?;
                cli.slot = Some((day.trim().to_string(), shift.trim().to_string()));
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
            path => cli.csv_path = Some(PathBuf::from(path)),
        }
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let mut config = DashboardConfig::discover(cli.config_path.as_deref())?;
    if let Some(path) = &cli.csv_path {
        config.input.path = path.clone();
    }
    if cli.no_headers {
        config.input.has_headers = false;
    }
    let thresholds = match &cli.thresholds {
        Some(spec) => CoverageThresholds::parse(spec)?,
        None => config.coverage.thresholds()?,
    };

    println!("Loading assignment matrix from {}...", config.input.path.display());
    let roster = load_matrix(&config.input.path, config.input.has_headers)
        .and_then(|matrix| Roster::new(matrix, config.slot_layout()?, &config.layout.nurse_prefix))
        .map_err(|e| {
            error!("Cannot build the dashboard: {}", e);
            e
        })?;

    if cli.web {
        let port = cli.port.unwrap_or(config.server.port);
        println!("Starting dashboard on port {}...", port);
        println!("Access the site at http://localhost:{}", port);

        let state = web::AppState { roster, thresholds };
        web::start_server(state, &config.server.bind, port).await?;
        return Ok(());
    }

    print_report(&roster, &thresholds);

    if let Some(nurse) = &cli.nurse {
        println!("--- Nurse schedule ---");
        print!("{}", format_nurse_schedule(&roster, nurse));
    }

    if let Some((day, shift)) = &cli.slot {
        println!("--- Shift staffing ---");
        match roster.layout().find_slot(day, shift) {
            Some(slot) => print!("{}", format_slot_staff(&roster, slot)),
            None => println!("Unknown day/shift: {} {}", day, shift),
        }
    }

    if let Some(out) = &cli.out {
        write_report_to_file(&roster, &thresholds, out)?;
        println!("Report saved to {}", out);
    }

    Ok(())
}
