// Demonstration: run the swerve environment and evaluate a baseline policy.
//
// Build/run from this repo root:
//   cargo run --example swerve_demo -- --policy goal --agents 4 --steps 2000 --render text

use std::env;
use std::process;

use swerve_env::{
    EvaluationMetrics, GoalSeekingPolicy, Policy, RandomPolicy, RenderMode, SwerveConfig,
    SwerveEnv,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("goal");
    let agents: usize = arg_value(&args, "--agents")
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);
    let steps: usize = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1200);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let render_mode: RenderMode = match arg_value(&args, "--render").unwrap_or("none").parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{e}; expected 'none', 'text' or 'plot'.");
            process::exit(2);
        }
    };

    let mut policy: Box<dyn Policy> = match policy_name {
        "random" => Box::new(RandomPolicy::new(seed)),
        "goal" => Box::new(GoalSeekingPolicy::default()),
        other => {
            eprintln!("Unknown --policy '{}'; expected 'goal' or 'random'.", other);
            process::exit(2);
        }
    };

    if let Err(e) = run(agents, steps, seed, render_mode, policy.as_mut()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(
    agents: usize,
    steps: usize,
    seed: u64,
    render_mode: RenderMode,
    policy: &mut dyn Policy,
) -> swerve_env::Result<()> {
    let mut env = SwerveEnv::native(agents, render_mode, 11, SwerveConfig::default(), seed)?;

    if render_mode != RenderMode::None {
        env.reset(Some(seed))?;
        for _ in 0..60 {
            let obs = env.buffers().observations().to_vec();
            let actions = policy.select_actions(&obs, agents);
            env.step(&actions)?;
            env.render()?;
        }
    }

    let metrics = EvaluationMetrics::evaluate(&mut env, policy, steps, Some(seed))?;
    println!("{}", metrics);
    env.close()
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
