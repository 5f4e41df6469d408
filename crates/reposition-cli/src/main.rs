// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use reposition_model::prelude::RequestLoader;
use reposition_solver::prelude::{OptimizationEngine, OptimizationResponse, OptimizerConfig};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

const USAGE: &str = "Usage: reposition <input_json_file> [--time-limit <secs>] [--horizon <days>] \
[--vehicle-capacity <n>] [--record <path>]";

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    input: PathBuf,
    time_limit: Option<Duration>,
    horizon: Option<usize>,
    vehicle_capacity: Option<u32>,
    record: Option<PathBuf>,
}

impl CliArgs {
    fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut input = None;
        let mut time_limit = None;
        let mut horizon = None;
        let mut vehicle_capacity = None;
        let mut record = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--time-limit" => {
                    let secs: f64 = flag_value(&arg, args.next())?;
                    if !secs.is_finite() || secs <= 0.0 {
                        return Err(format!("--time-limit must be positive, got {}", secs));
                    }
                    time_limit = Some(Duration::from_secs_f64(secs));
                }
                "--horizon" => {
                    let days: usize = flag_value(&arg, args.next())?;
                    if days == 0 {
                        return Err("--horizon must be at least one day".to_string());
                    }
                    horizon = Some(days);
                }
                "--vehicle-capacity" => vehicle_capacity = Some(flag_value(&arg, args.next())?),
                "--record" => {
                    let path = args.next().ok_or_else(|| format!("{} needs a value", arg))?;
                    record = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => {
                    tracing::warn!("Ignoring unknown flag {}", flag);
                }
                _ if input.is_none() => input = Some(PathBuf::from(&arg)),
                _ => tracing::warn!("Ignoring extra argument {}", arg),
            }
        }

        Ok(Self {
            input: input.ok_or_else(|| "missing input file".to_string())?,
            time_limit,
            horizon,
            vehicle_capacity,
            record,
        })
    }

    fn config(&self) -> OptimizerConfig {
        let mut cfg = OptimizerConfig::default();
        if let Some(limit) = self.time_limit {
            cfg = cfg.with_time_limit(limit);
        }
        if let Some(days) = self.horizon {
            cfg = cfg.with_horizon_days(days);
        }
        if let Some(capacity) = self.vehicle_capacity {
            cfg = cfg.with_vehicle_capacity(capacity);
        }
        cfg
    }
}

fn flag_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let raw = value.ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid value {:?} for {}", raw, flag))
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Serialize)]
struct RunRecord {
    optimization_type: String,
    filename: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    status: &'static str,
    cost: Option<f64>,
}

fn append_record(path: &Path, record: &RunRecord) -> std::io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut f, record)?;
    writeln!(f)
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{}", serde_json::json!({ "error": message }));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    enable_tracing();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    let start_ts = Utc::now();
    let t0 = Instant::now();

    let request = match RequestLoader::new().from_path(&args.input) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", args.input.display(), e);
            return fail("Failed to load input data");
        }
    };
    tracing::info!(
        "Loaded {}: {} optimization over {} ports, {} containers, {} routes",
        args.input.display(),
        request.kind(),
        request.network().port_count(),
        request.network().containers().len(),
        request.network().routes().len()
    );

    let engine = OptimizationEngine::new(args.config());
    let response: OptimizationResponse = match catch_unwind(AssertUnwindSafe(|| engine.run(&request))) {
        Ok(response) => response,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unexpected failure during optimization".to_string());
            tracing::error!("Optimization aborted: {}", message);
            return fail(&message);
        }
    };

    let rendered = match serde_json::to_string_pretty(&response) {
        Ok(s) => s,
        Err(e) => return fail(&e.to_string()),
    };
    println!("{}", rendered);

    let runtime = t0.elapsed();
    tracing::info!(
        "Finished {} with status {} in {:?}",
        request.kind(),
        response.status(),
        runtime
    );

    if let Some(path) = &args.record {
        let record = RunRecord {
            optimization_type: request.kind().to_string(),
            filename: args.input.display().to_string(),
            start_ts,
            end_ts: Utc::now(),
            runtime_ms: runtime.as_millis(),
            status: response.status(),
            cost: response.cost(),
        };
        match append_record(path, &record) {
            Ok(()) => tracing::info!("Appended run record to {}", path.display()),
            Err(e) => tracing::error!("Failed to write run record to {}: {}", path.display(), e),
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_only() {
        let parsed = CliArgs::parse(args(&["input.json"])).unwrap();
        assert_eq!(parsed.input, PathBuf::from("input.json"));
        assert_eq!(parsed.config(), OptimizerConfig::default());
        assert!(parsed.record.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let parsed = CliArgs::parse(args(&[
            "--horizon",
            "5",
            "in.json",
            "--time-limit",
            "2.5",
            "--vehicle-capacity",
            "40",
            "--record",
            "runs.jsonl",
            "--verbose",
        ]))
        .unwrap();

        let cfg = parsed.config();
        assert_eq!(cfg.horizon_days, 5);
        assert_eq!(cfg.time_limit, Duration::from_millis(2500));
        assert_eq!(cfg.vehicle_capacity, 40);
        assert_eq!(parsed.record, Some(PathBuf::from("runs.jsonl")));
        assert_eq!(parsed.input, PathBuf::from("in.json"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(CliArgs::parse(args(&[])).is_err());
        assert!(CliArgs::parse(args(&["in.json", "--horizon"])).is_err());
        assert!(CliArgs::parse(args(&["in.json", "--horizon", "0"])).is_err());
        assert!(CliArgs::parse(args(&["in.json", "--vehicle-capacity", "lots"])).is_err());
        assert!(CliArgs::parse(args(&["in.json", "--time-limit", "-1"])).is_err());
    }

    #[test]
    fn test_records_are_appended_as_lines() {
        let path = std::env::temp_dir().join(format!("reposition-runs-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);

        for cost in [Some(12.5), None] {
            let now = Utc::now();
            let record = RunRecord {
                optimization_type: "redistribution".to_string(),
                filename: "in.json".to_string(),
                start_ts: now,
                end_ts: now,
                runtime_ms: 3,
                status: if cost.is_some() { "optimal" } else { "fallback" },
                cost,
            };
            append_record(&path, &record).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["cost"], 12.5);
        assert_eq!(lines[1]["status"], "fallback");
        assert!(lines[1]["cost"].is_null());

        let _ = std::fs::remove_file(&path);
    }
}
