use average::{Estimate, Mean};
use clap::{Arg, ArgMatches, Command, value_parser};
use log::info;
use rand::prelude::*;
use sched_sim::{Job, Policy, SimError, SimResult, Ticks, sim::input};
use std::{error::Error, fs, process::ExitCode};

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("sched_sim")
        .about("Simulate uniprocessor CPU scheduling policies")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Process list: header line, then `name arrival burst [priority [queue]]`"),
        )
        .arg(
            Arg::new("policy")
                .short('p')
                .long("policy")
                .default_value("all")
                .help("One of fcfs, sjf, srtf, prio, prio-p, rr, mlq, mlfq, or all"),
        )
        .arg(
            Arg::new("quantum")
                .short('q')
                .long("quantum")
                .value_parser(value_parser!(u64))
                .default_value("2")
                .help("Time slice for round-robin"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .default_value("0")
                .help("Seed for the random workload used when no input is given"),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .value_parser(value_parser!(u64))
                .default_value("20")
                .help("Arrival horizon of the random workload"),
        )
        .get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let quantum = *matches.get_one::<Ticks>("quantum").expect("defaulted");
    let policy = matches.get_one::<String>("policy").expect("defaulted");

    let jobs = match matches.get_one::<String>("input") {
        Some(path) => input::parse_processes(&fs::read_to_string(path)?)?,
        None => {
            let seed = *matches.get_one::<u64>("seed").expect("defaulted");
            let ticks = *matches.get_one::<u64>("ticks").expect("defaulted");
            bernoulli_jobs(ticks, 0.3, 0.4, 2, 6, seed)
        }
    };
    info!("loaded {} processes", jobs.len());

    let policies = if policy == "all" {
        Policy::all(quantum).to_vec()
    } else {
        vec![Policy::parse(policy, quantum)?]
    };

    for policy in policies {
        println!("== {policy}");
        match policy.simulate(jobs.clone()) {
            Ok(result) => report(&result),
            Err(SimError::Unsupported { policy }) => println!("{policy} is not implemented\n"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn report(result: &SimResult) {
    print!("{}", result.timeline);
    println!(
        "{:<8} {:>7} {:>5} {:>5} {:>10} {:>10} {:>7} {:>8}",
        "name", "arrival", "burst", "start", "completion", "turnaround", "waiting", "response"
    );
    for p in &result.processes {
        println!(
            "{:<8} {:>7} {:>5} {:>5} {:>10} {:>10} {:>7} {:>8}",
            p.name,
            p.arrival,
            p.burst,
            p.start_time.unwrap_or_default(),
            p.completion_time.unwrap_or_default(),
            p.turnaround_time.unwrap_or_default(),
            p.waiting_time.unwrap_or_default(),
            p.response_time.unwrap_or_default(),
        );
    }

    let turnaround = result.processes.iter().filter_map(|p| p.turnaround_time);
    let waiting = result.processes.iter().filter_map(|p| p.waiting_time);
    let response = result.processes.iter().filter_map(|p| p.response_time);
    println!("Average turnaround time: {:.2} ticks", avg(turnaround));
    println!("Average waiting time: {:.2} ticks", avg(waiting));
    println!("Average response time: {:.2} ticks", avg(response));
    println!("Makespan: {} ticks\n", result.makespan());
}

fn bernoulli_jobs(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            let job = Job::new(format!("P{}", jobs.len() + 1), t, burst)
                .with_priority(rng.random_range(0..5))
                .with_queue(rng.random_range(0..3));
            jobs.push(job);
        }
    }

    jobs
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|t| t as f64).collect::<Mean>().estimate()
}
