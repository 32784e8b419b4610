use std::fs;

use anyhow::{Context, Result};

use cachecraft::{
    compare,
    config::Config,
    render::{self, Timeline},
    simulate,
    trace::parse_accesses,
    Policy, SimulationResult,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();

    let mut config = if let Some(config_str) = args.opt_value_from_str::<_, String>("--config")? {
        Config::from_json(&config_str).context("could not parse --config")?
    } else if let Some(config_path) = args.opt_value_from_str::<_, String>("-p")? {
        Config::from_path(&config_path)
            .with_context(|| format!("could not load config {config_path}"))?
    } else {
        Config::default()
    };

    if let Some(capacity) = args.opt_value_from_str(["-c", "--capacity"])? {
        config.capacity = capacity;
    }
    if let Some(policy) = args.opt_value_from_str("--policy")? {
        config.policy = policy;
    }
    if let Some(accesses) = args.opt_value_from_str::<_, String>(["-a", "--accesses"])? {
        config.accesses = Some(parse_accesses(&accesses)?);
    }
    if let Some(trace) = args.opt_value_from_str("-t")? {
        config.trace = Some(trace);
    }
    let stats_path: Option<String> = args.opt_value_from_str("--json")?;
    let compare_all = args.contains("--compare");
    let color = args.contains("--color");
    let timeline = !args.contains("--no-timeline");

    let leftover = args.finish();
    if !leftover.is_empty() {
        anyhow::bail!("unexpected arguments: {leftover:?}");
    }

    let run = config.to_run()?;
    let results = if compare_all {
        compare(&run.accesses, run.capacity, &Policy::ALL)?
    } else {
        vec![simulate(&run.accesses, run.capacity, run.policy)?]
    };

    for result in &results {
        print_result(result, compare_all, timeline, color);
    }

    if let Some(stats_path) = stats_path {
        let stats_file = fs::File::create(&stats_path)
            .with_context(|| format!("cannot open output file {stats_path}"))?;
        if compare_all {
            serde_json::to_writer_pretty(stats_file, &results)?;
        } else {
            serde_json::to_writer_pretty(stats_file, &results[0])?;
        }
        log::info!("wrote results to {stats_path}");
    }
    Ok(())
}

fn print_result(result: &SimulationResult<i64>, header: bool, timeline: bool, color: bool) {
    if header {
        println!("== {} (capacity {})", result.policy, result.capacity);
    }
    for line in render::log_lines(result) {
        println!("{line}");
    }
    println!();
    println!("{}", render::summary(result));
    if timeline && !result.steps.is_empty() {
        println!();
        print!("{}", Timeline::new(result).color(color));
    }
    if header {
        println!();
    }
}
