//! # Beam Analysis CLI
//!
//! Runs a saved analysis case and prints a text report followed by the JSON
//! result.
//!
//! ```text
//! beam_cli analyze <case.json>   analyze a saved case
//! beam_cli demo [<case.json>]    analyze the built-in case, optionally saving it
//! ```
//!
//! Set `RUST_LOG=debug` for per-query logging.

use std::path::Path;
use std::process::ExitCode;

use beam_core::calculations::beam::{
    BeamInput, BeamResult, CrackInput, LimitsInput, LoadInput, QueryPoint,
};
use beam_core::calculations::internal_forces::Side;
use beam_core::supports::Supports;
use beam_core::units::{n_to_kn, pa_to_mpa};
use beam_core::{load_case, save_case, AnalysisCase, CalcError};

fn usage() {
    eprintln!("usage: beam_cli analyze <case.json>");
    eprintln!("       beam_cli demo [<case.json>]");
}

/// 4 m beam, 200 x 300 mm, with one load of each kind and a midspan crack
fn demo_case() -> AnalysisCase {
    let beam = BeamInput {
        label: "Demo beam".to_string(),
        length_m: 4.0,
        width_mm: 200.0,
        height_mm: 300.0,
        supports: Supports::new(4.0, 0.0),
        loads: vec![
            LoadInput::Point {
                position_m: 2.0,
                magnitude_kn: -10.0,
            },
            LoadInput::Distributed {
                start_m: 1.0,
                end_m: 3.0,
                intensity_knpm: -2.0,
            },
            LoadInput::Moment {
                position_m: 3.0,
                magnitude_knm: 1.5,
            },
        ],
        cracks: vec![CrackInput {
            position_m: 2.0,
            depth_mm: 150.0,
        }],
        limits: Some(LimitsInput {
            tensile_mpa: 3.0,
            compressive_mpa: 30.0,
            shear_mpa: 2.0,
        }),
        queries: vec![
            QueryPoint::new(2.0, 149.0, 0.0),
            QueryPoint::new(2.0, -149.0, 0.0),
            QueryPoint::new(1.0, 0.0, 0.0),
            QueryPoint::new(3.0, -150.0, 0.0),
        ],
        diagram_points: 81,
    };
    AnalysisCase::new("Demo Engineer", "DEMO-001", beam)
}

fn print_report(case: &AnalysisCase, result: &BeamResult) {
    let beam = &case.beam;
    println!("═══════════════════════════════════════");
    println!("  BEAM ANALYSIS: {}", result.label);
    println!("═══════════════════════════════════════");
    println!("Job {} ({})", case.meta.job_id, case.meta.engineer);
    println!();
    println!("Section:");
    println!("  L = {:.3} m, b x h = {:.0} x {:.0} mm", beam.length_m, beam.width_mm, beam.height_mm);
    println!("  A = {:.4e} m², I = {:.4e} m⁴", result.section.area_m2, result.section.moment_of_inertia_m4);
    println!();
    println!("Reactions:");
    for reaction in result.reactions.iter() {
        println!(
            "  {:<6} x = {:.3} m  {:>10.3} kN  ({})",
            reaction.kind.display_name(),
            reaction.position_m,
            n_to_kn(reaction.force_n),
            reaction.direction
        );
    }
    println!("  applied load  {:>10.3} kN", n_to_kn(result.total_load_n));
    println!();
    println!("Diagrams:");
    println!(
        "  V_max = {:.3} kN at x = {:.3} m",
        n_to_kn(result.extremes.max_shear_n),
        result.extremes.max_shear_position_m
    );
    println!(
        "  M_max = {:.3} kN·m at x = {:.3} m",
        n_to_kn(result.extremes.max_moment_nm),
        result.extremes.max_moment_position_m
    );

    for q in &result.queries {
        println!();
        println!(
            "Point x = {:.3} m, y = {:.1} mm, z = {:.1} mm{}",
            q.x_m,
            q.y_m * 1000.0,
            q.z_m * 1000.0,
            if q.crack.is_some() { "  [cracked section]" } else { "" }
        );
        println!(
            "  left  V = {:>9.3} kN  M = {:>9.3} kN·m",
            n_to_kn(q.forces.left.shear_n),
            n_to_kn(q.forces.left.moment_nm)
        );
        println!(
            "  right V = {:>9.3} kN  M = {:>9.3} kN·m",
            n_to_kn(q.forces.right.shear_n),
            n_to_kn(q.forces.right.moment_nm)
        );
        println!(
            "  using {} side",
            match q.forces.governing {
                Side::Left => "left",
                Side::Right => "right",
            }
        );
        if q.in_crack {
            println!("  point lies in the crack: no stress");
        }
        println!(
            "  σxx = {:.4} MPa, τxy = {:.4} MPa",
            q.sigma_xx_mpa(),
            q.tau_xy_mpa()
        );
        println!(
            "  σ1 = {:.4} MPa, σ2 = {:.4} MPa, τmax = {:.4} MPa",
            pa_to_mpa(q.sigma_1_pa),
            pa_to_mpa(q.sigma_2_pa),
            pa_to_mpa(q.mohr.max_shear_pa)
        );
        if let Some(check) = &q.safety {
            println!(
                "  tension {:.2} {}  compression {:.2} {}  shear {:.2} {}  => {}",
                check.tension.unity_ratio,
                status_icon(check.tension.passes),
                check.compression.unity_ratio,
                status_icon(check.compression.passes),
                check.shear.unity_ratio,
                status_icon(check.shear.passes),
                check.verdict
            );
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    match result.governing_ratio() {
        Some(ratio) => println!(
            "  RESULT: {} (governing ratio {:.2})",
            if result.passes() { "PASS" } else { "FAIL" },
            ratio
        ),
        None => println!("  RESULT: no stress limits given"),
    }
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn run(case: &AnalysisCase) -> ExitCode {
    match case.run() {
        Ok(result) => {
            print_report(case, &result);
            println!();
            println!("JSON Output:");
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: could not serialize result: {}", e);
                    return ExitCode::from(1);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("analyze") if args.len() == 3 => {
            let path = Path::new(&args[2]);
            log::info!("loading case from {}", path.display());
            match load_case(path) {
                Ok(case) => run(&case),
                Err(e) => {
                    report_error(&e);
                    ExitCode::from(1)
                }
            }
        }
        Some("demo") if args.len() <= 3 => {
            let case = demo_case();
            if let Some(path) = args.get(2) {
                if let Err(e) = save_case(&case, Path::new(path)) {
                    report_error(&e);
                    return ExitCode::from(1);
                }
                println!("Demo case written to {}", path);
                println!();
            }
            run(&case)
        }
        _ => {
            usage();
            ExitCode::from(2)
        }
    }
}
