//! Example: Analyze multiple I-V data files in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] [--json] [--area A] [--illum L] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each file analysis is still single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use rayon::prelude::*;
use serde::Serialize;
use solar_iv::io::loader::load_data;
use solar_iv::{analyze_sweep, AnalysisConfig, ParameterRecord, Severity};
use std::env;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn next_value<T: std::str::FromStr>(
    args: &mut Vec<String>,
    flag: &str,
) -> Result<T, Box<dyn std::error::Error>>
where
    T::Err: std::error::Error + 'static,
{
    if args.is_empty() {
        return Err(format!("{} requires a value", flag).into());
    }
    Ok(args.remove(0).parse::<T>()?)
}

#[derive(Serialize)]
struct ItemOut {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    forward: Option<ParameterRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reverse: Option<ParameterRecord>,
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut area = 1.0;
    let mut illum = 100.0;
    let mut paths: Vec<String> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => jobs = Some(std::cmp::max(1, next_value::<usize>(&mut args, "--jobs")?)),
            "--area" => area = next_value::<f64>(&mut args, "--area")?,
            "--illum" => illum = next_value::<f64>(&mut args, "--illum")?,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] [--json] [--area A] [--illum L] <file1> <file2> ...\n\
                     \n\
                     --jobs N    Parallel workers (default: CPU-1)\n\
                     --json      Emit one JSON object per line (JSONL)\n\
                     --area A    Device area in cm2 (default: 1.0)\n\
                     --illum L   Illumination in mW/cm2 (default: 100)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one data file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = AnalysisConfig::default();

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let analyzed = load_data(path)
                    .map_err(|e| format!("load failed: {e}"))
                    .and_then(|data| {
                        analyze_sweep(&data, area, illum, &config)
                            .map_err(|e| format!("analysis failed: {e}"))
                    });
                match analyzed {
                    Ok(sweep) => ItemOut {
                        file: path.clone(),
                        forward: sweep.forward.as_ref().map(|s| s.params),
                        reverse: sweep.reverse.as_ref().map(|s| s.params),
                        warnings: sweep
                            .diagnostics()
                            .filter(|d| d.severity >= Severity::Warning)
                            .map(|d| d.message.clone())
                            .collect(),
                        error: None,
                    },
                    Err(error) => ItemOut {
                        file: path.clone(),
                        forward: None,
                        reverse: None,
                        warnings: vec![],
                        error: Some(error),
                    },
                }
            })
            .collect()
    });

    if json {
        for o in &outs {
            println!("{}", serde_json::to_string(o)?);
        }
    } else {
        for (idx, o) in outs.iter().enumerate() {
            let prefix = format!("[{}/{}] {}", idx + 1, outs.len(), o.file);
            if let Some(error) = &o.error {
                println!("{}: ERROR: {}", prefix, error);
                continue;
            }
            for (label, record) in [("fwd", &o.forward), ("rev", &o.reverse)] {
                if let Some(p) = record {
                    println!(
                        "{} {}: V_oc={:.4} J_sc={:.3} FF={:.2}% PCE={:.3}%",
                        prefix, label, p.v_oc, p.j_sc, p.ff, p.pce
                    );
                }
            }
            for warning in &o.warnings {
                println!("{}: warning: {}", prefix, warning);
            }
        }
    }

    let ok = outs.iter().filter(|o| o.error.is_none()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
