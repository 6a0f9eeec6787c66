//! Example: Analyze a single I-V data file
//!
//! Usage:
//!   cargo run --example analyze_file -- <data.csv> [area_cm2] [illum_mw_cm2] [--json]

use solar_iv::io::loader::load_data;
use solar_iv::{analyze_sweep, AnalysisConfig, ScanAnalysis};
use std::env;

fn print_scan(label: &str, scan: &ScanAnalysis) {
    let p = &scan.params;
    println!("{} scan ({} samples):", label, scan.metadata.sample_count);
    println!("  V_oc:      {:.4} V", p.v_oc);
    println!("  J_sc:      {:.4} mA/cm2", p.j_sc);
    println!("  R_sh:      {:.2} ohm", p.r_sh);
    println!("  R_s:       {:.2} ohm", p.r_s);
    println!("  P_max:     {:.4} mW/cm2", p.max_power);
    println!("  V_mpp:     {:.4} V", p.v_mpp);
    println!("  I_mpp:     {:.4} mA/cm2", p.i_mpp);
    println!("  PCE:       {:.3} %", p.pce);
    println!("  FF:        {:.2} %", p.ff);
    println!("  Processing time: {:.3} ms", scan.metadata.processing_time_ms);
    for diagnostic in &scan.diagnostics {
        println!("  {}", diagnostic);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut json = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    let path = match positional.first() {
        Some(p) => p.clone(),
        None => {
            eprintln!("Usage: analyze_file <data.csv> [area_cm2] [illum_mw_cm2] [--json]");
            std::process::exit(2);
        }
    };
    let area: f64 = positional.get(1).map(|s| s.parse()).transpose()?.unwrap_or(1.0);
    let illum: f64 = positional.get(2).map(|s| s.parse()).transpose()?.unwrap_or(100.0);

    let data = load_data(&path)?;
    let config = AnalysisConfig::default();
    let sweep = analyze_sweep(&data, area, illum, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sweep)?);
        return Ok(());
    }

    println!("{}", path);
    if let Some(forward) = &sweep.forward {
        print_scan("Forward", forward);
    }
    if let Some(reverse) = &sweep.reverse {
        print_scan("Reverse", reverse);
    }
    if sweep.forward.is_none() && sweep.reverse.is_none() {
        println!("  no samples");
    }

    Ok(())
}
