//! # Fibermech CLI
//!
//! Command-line front end for `composite_core`. Each command prints a short
//! human-readable table followed by the full result as pretty JSON.
//!
//! ```text
//! composite_cli [--settings FILE] <command> [args]
//!
//!   curve <fiber> <matrix> <fvf%>            properties + load-deflection curve
//!   summary <fiber> <matrix>                 standard FVF sweep
//!   compare <fiber> <matrix> <fvf list>      e.g. "10, 30,50"
//!   convert <v2w|w2v> <fraction> <ρf> <ρm>   volume/weight fraction
//!   mix <property> <vf> <fiber> <matrix>     rule of mixtures value
//!   stress-strain <fiber> <matrix> <vf>      catalog constituents, all phases
//!   bounds <fiber> <matrix>                  modulus bounds vs volume fraction
//!   materials                                constituent catalog
//!   stats <dataset> [--fiber X] [--matrix Y] [--orientation Z]
//!   options <dataset>                        selectable labels in a dataset
//!   import <records.json> <dataset>          build a dataset from a record array
//! ```
//!
//! Set `RUST_LOG=debug` for calculation traces.

use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;

use composite_core::calculations::comparison::parse_fvf_list;
use composite_core::calculations::stress_strain::Phase;
use composite_core::equations::mixtures::{FractionConversion, MixtureProperty};
use composite_core::errors::{CompositeError, CompositeResult};
use composite_core::file_io::{import_samples, load_dataset, load_settings, save_dataset};
use composite_core::materials::ConstituentCatalog;
use composite_core::samples::{SampleFilter, SampleQuery, StatisticsSummary};
use composite_core::{CompositeEngine, EngineSettings};

const USAGE: &str = "\
Usage: composite_cli [--settings FILE] <command> [args]

Commands:
  curve <fiber> <matrix> <fvf%>
  summary <fiber> <matrix>
  compare <fiber> <matrix> <fvf list>
  convert <v2w|w2v> <fraction> <rho_f> <rho_m>
  mix <density|longitudinal|transverse|strength> <vf> <fiber value> <matrix value>
  stress-strain <fiber> <matrix> <vf>
  bounds <fiber> <matrix>
  materials
  stats <dataset> [--fiber X] [--matrix Y] [--orientation Z]
  options <dataset>
  import <records.json> <dataset>";

#[derive(Debug)]
enum Command {
    Curve { fiber: String, matrix: String, fvf: f64 },
    Summary { fiber: String, matrix: String },
    Compare { fiber: String, matrix: String, fvfs: Vec<f64> },
    Convert { kind: FractionConversion, fraction: f64, rho_f: f64, rho_m: f64 },
    Mix { kind: MixtureProperty, vf: f64, value_f: f64, value_m: f64 },
    StressStrain { fiber: String, matrix: String, vf: f64 },
    Bounds { fiber: String, matrix: String },
    Materials,
    Stats { dataset: PathBuf, filter: SampleFilter },
    Options { dataset: PathBuf },
    Import { records: PathBuf, dataset: PathBuf },
}

#[derive(Debug)]
struct Invocation {
    settings: Option<PathBuf>,
    command: Command,
}

fn parse_number(field: &str, raw: &str) -> CompositeResult<f64> {
    raw.trim()
        .parse()
        .map_err(|_| CompositeError::invalid_input(field, raw, "Expected a number"))
}

fn positional(args: &[String], index: usize, field: &str) -> CompositeResult<String> {
    args.get(index).cloned().ok_or_else(|| CompositeError::missing_field(field))
}

fn parse_filter(flags: &[String]) -> CompositeResult<SampleFilter> {
    let mut filter = SampleFilter::new();
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| CompositeError::missing_field(flag.clone()))?;
        filter = match flag.as_str() {
            "--fiber" => filter.with_fiber_type(value.clone()),
            "--matrix" => filter.with_matrix_type(value.clone()),
            "--orientation" => filter.with_orientation(value.clone()),
            other => return Err(CompositeError::invalid_input("flag", other, "Unknown filter flag")),
        };
    }
    Ok(filter)
}

fn parse_args(mut args: Vec<String>) -> CompositeResult<Invocation> {
    let mut settings = None;
    if args.first().map(String::as_str) == Some("--settings") {
        if args.len() < 2 {
            return Err(CompositeError::missing_field("--settings"));
        }
        settings = Some(PathBuf::from(args.remove(1)));
        args.remove(0);
    }

    let name = positional(&args, 0, "command")?;
    let rest = &args[1..];
    let command = match name.as_str() {
        "curve" => Command::Curve {
            fiber: positional(rest, 0, "fiber")?,
            matrix: positional(rest, 1, "matrix")?,
            fvf: parse_number("fvf", &positional(rest, 2, "fvf")?)?,
        },
        "summary" => Command::Summary {
            fiber: positional(rest, 0, "fiber")?,
            matrix: positional(rest, 1, "matrix")?,
        },
        "compare" => Command::Compare {
            fiber: positional(rest, 0, "fiber")?,
            matrix: positional(rest, 1, "matrix")?,
            fvfs: parse_fvf_list(&positional(rest, 2, "fvf_list")?)?,
        },
        "convert" => {
            let raw = positional(rest, 0, "kind")?;
            Command::Convert {
                kind: FractionConversion::from_str_flexible(&raw)
                    .ok_or_else(|| CompositeError::invalid_input("kind", raw.as_str(), "Expected v2w or w2v"))?,
                fraction: parse_number("fraction", &positional(rest, 1, "fraction")?)?,
                rho_f: parse_number("rho_f", &positional(rest, 2, "rho_f")?)?,
                rho_m: parse_number("rho_m", &positional(rest, 3, "rho_m")?)?,
            }
        }
        "mix" => {
            let raw = positional(rest, 0, "property")?;
            Command::Mix {
                kind: MixtureProperty::from_str_flexible(&raw)
                    .ok_or_else(|| CompositeError::invalid_input("property", raw.as_str(), "Unknown property"))?,
                vf: parse_number("vf", &positional(rest, 1, "vf")?)?,
                value_f: parse_number("fiber value", &positional(rest, 2, "fiber value")?)?,
                value_m: parse_number("matrix value", &positional(rest, 3, "matrix value")?)?,
            }
        }
        "stress-strain" => Command::StressStrain {
            fiber: positional(rest, 0, "fiber")?,
            matrix: positional(rest, 1, "matrix")?,
            vf: parse_number("vf", &positional(rest, 2, "vf")?)?,
        },
        "bounds" => Command::Bounds {
            fiber: positional(rest, 0, "fiber")?,
            matrix: positional(rest, 1, "matrix")?,
        },
        "materials" => Command::Materials,
        "stats" => Command::Stats {
            dataset: PathBuf::from(positional(rest, 0, "dataset")?),
            filter: parse_filter(rest.get(1..).unwrap_or_default())?,
        },
        "options" => Command::Options {
            dataset: PathBuf::from(positional(rest, 0, "dataset")?),
        },
        "import" => Command::Import {
            records: PathBuf::from(positional(rest, 0, "records")?),
            dataset: PathBuf::from(positional(rest, 1, "dataset")?),
        },
        other => return Err(CompositeError::invalid_input("command", other, "Unknown command")),
    };

    Ok(Invocation { settings, command })
}

fn print_json<T: Serialize>(value: &T) -> CompositeResult<()> {
    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

fn run(engine: &CompositeEngine, command: Command) -> CompositeResult<()> {
    match command {
        Command::Curve { fiber, matrix, fvf } => {
            let report = engine.curve_report(&fiber, &matrix, fvf)?;
            let p = &report.properties;
            banner(&format!("{} / {} at {}% FVF", fiber, matrix, fvf));
            println!("  Max load:          {:>10.2} N", p.max_load_n);
            println!("  Max deflection:    {:>10.2} mm", p.max_deflection_mm);
            println!("  Linear region end: {:>10.2} mm", p.linear_region_end_mm);
            println!("  Flexural strength: {:>10.2} MPa", p.flexural_strength_mpa);
            println!("  Flexural modulus:  {:>10.2} GPa", p.flexural_modulus_gpa);
            println!("  Curve samples:     {:>10}", report.curve_data.len());
            print_json(&report)
        }
        Command::Summary { fiber, matrix } => {
            let report = engine.summary(&fiber, &matrix)?;
            let g = report.specimen_dimensions;
            banner(&format!("{} / {} summary", fiber, matrix));
            println!(
                "  Specimen {} x {} mm, span {} mm",
                g.thickness_mm, g.width_mm, g.span_mm
            );
            println!();
            println!("  {:>6} {:>10} {:>8} {:>10} {:>9}", "FVF %", "Load N", "δ mm", "σf MPa", "Ef GPa");
            for row in &report.summary {
                println!(
                    "  {:>6} {:>10.2} {:>8.2} {:>10.2} {:>9.2}",
                    row.fiber_volume_fraction,
                    row.max_load_n,
                    row.max_deflection_mm,
                    row.flexural_strength_mpa,
                    row.flexural_modulus_gpa
                );
            }
            print_json(&report)
        }
        Command::Compare { fiber, matrix, fvfs } => {
            let report = engine.compare(&fiber, &matrix, &fvfs)?;
            banner(&format!("{} / {} comparison", fiber, matrix));
            for entry in &report.comparisons {
                println!(
                    "  {:>6}%  P = {:>9.2} N   σf = {:>8.2} MPa",
                    entry.fvf, entry.properties.max_load_n, entry.properties.flexural_strength_mpa
                );
            }
            print_json(&report)
        }
        Command::Convert { kind, fraction, rho_f, rho_m } => {
            let value = engine.convert_fraction(kind, fraction, rho_f, rho_m);
            println!("{:?}({}) = {:.6}", kind, fraction, value);
            Ok(())
        }
        Command::Mix { kind, vf, value_f, value_m } => {
            let value = engine.rule_of_mixtures(kind, vf, value_f, value_m);
            println!("{} at Vf = {}: {:.6}", kind.display_name(), vf, value);
            Ok(())
        }
        Command::StressStrain { fiber, matrix, vf } => {
            let catalog = ConstituentCatalog::standard();
            let fiber = catalog.find_fiber(&fiber)?;
            let matrix = catalog.find_matrix(&matrix)?;
            banner(&format!("{} / {} stress-strain at Vf = {}", fiber.name, matrix.name, vf));
            let mut curves = Vec::new();
            for phase in Phase::ALL {
                let curve = engine.stress_strain(phase, vf, fiber, matrix)?;
                if let Some(last) = curve.last() {
                    println!(
                        "  {:<10} failure at {:>6.3} % strain, {:>8.2} MPa",
                        phase.display_name(),
                        last.strain_percent,
                        last.stress_mpa
                    );
                }
                curves.push((phase, curve));
            }
            print_json(&curves)
        }
        Command::Bounds { fiber, matrix } => {
            let catalog = ConstituentCatalog::standard();
            let fiber = catalog.find_fiber(&fiber)?;
            let matrix = catalog.find_matrix(&matrix)?;
            let sweep = engine.modulus_bounds(fiber.elastic_modulus_gpa, matrix.elastic_modulus_gpa);
            banner(&format!("{} / {} modulus bounds (GPa)", fiber.name, matrix.name));
            for p in &sweep {
                println!(
                    "  Vf {:>5.1} %  E1 = {:>8.2}  E2 = {:>7.2}",
                    p.volume_fraction_percent, p.longitudinal, p.transverse
                );
            }
            print_json(&sweep)
        }
        Command::Materials => {
            let catalog = ConstituentCatalog::standard();
            banner("Constituent catalog");
            println!("  {:<16} {:>6} {:>8} {:>8} {:>6}", "Name", "ρ", "σ MPa", "E GPa", "ε %");
            for c in catalog.fibers().chain(catalog.matrices()) {
                println!(
                    "  {:<16} {:>6.2} {:>8.0} {:>8.1} {:>6.1}",
                    c.name, c.density_g_cm3, c.tensile_strength_mpa, c.elastic_modulus_gpa, c.max_strain_percent
                );
            }
            print_json(catalog)
        }
        Command::Stats { dataset, filter } => {
            let store = load_dataset(&dataset)?;
            let stats = engine.statistics_for(&store, &filter)?;
            banner("Sample statistics");
            match &stats {
                StatisticsSummary::Empty { message, .. } => println!("  {}", message),
                StatisticsSummary::Populated(s) => {
                    println!("  Samples:          {}", s.count);
                    println!(
                        "  Tensile strength: {:.2} / {:.2} / {:.2} MPa (min/avg/max)",
                        s.tensile_strength.min, s.tensile_strength.avg, s.tensile_strength.max
                    );
                    println!(
                        "  Young's modulus:  {:.2} / {:.2} / {:.2} GPa (min/avg/max)",
                        s.youngs_modulus.min, s.youngs_modulus.avg, s.youngs_modulus.max
                    );
                    println!(
                        "  Fiber content:    {:.1} - {:.1} %",
                        s.fiber_content_range.min, s.fiber_content_range.max
                    );
                }
            }
            print_json(&stats)
        }
        Command::Options { dataset } => {
            let store = load_dataset(&dataset)?;
            let options = engine.selection_options(&store)?;
            banner("Selection options");
            println!("  Fiber types:  {}", options.fiber_types.join(", "));
            println!("  Matrix types: {}", options.matrix_types.join(", "));
            println!("  Orientations: {}", options.orientations.join(", "));
            println!();
            for c in store.combination_counts() {
                println!("  {:<12} {:<16} {:<6} {:>4}", c.fiber_type, c.matrix_type, c.orientation, c.count);
            }
            print_json(&options)
        }
        Command::Import { records, dataset } => {
            let store = import_samples(&records)?;
            save_dataset(&store, &dataset)?;
            println!("Imported {} samples into {}", store.len(), dataset.display());
            print_json(&store.selection_options()?)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help" | "help") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let result = parse_args(args).and_then(|invocation| {
        let settings = match &invocation.settings {
            Some(path) => load_settings(path)?,
            None => EngineSettings::default(),
        };
        let engine = CompositeEngine::new(settings)?;
        log::debug!("running {:?}", invocation.command);
        run(&engine, invocation.command)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            eprintln!();
            eprintln!("{}", USAGE);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_curve() {
        let inv = parse_args(args(&["curve", "Carbon", "Epoxy", "50"])).unwrap();
        assert!(inv.settings.is_none());
        match inv.command {
            Command::Curve { fiber, matrix, fvf } => {
                assert_eq!(fiber, "Carbon");
                assert_eq!(matrix, "Epoxy");
                assert_eq!(fvf, 50.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_settings_flag() {
        let inv = parse_args(args(&["--settings", "cfg.json", "summary", "Glass", "Epoxy"])).unwrap();
        assert_eq!(inv.settings, Some(PathBuf::from("cfg.json")));
        assert!(matches!(inv.command, Command::Summary { .. }));
    }

    #[test]
    fn test_parse_compare_list() {
        let inv = parse_args(args(&["compare", "Glass", "Epoxy", "10, 30,50"])).unwrap();
        match inv.command {
            Command::Compare { fvfs, .. } => assert_eq!(fvfs, vec![10.0, 30.0, 50.0]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_stats_filter() {
        let inv = parse_args(args(&["stats", "data.json", "--fiber", "Carbon", "--orientation", "90"])).unwrap();
        match inv.command {
            Command::Stats { dataset, filter } => {
                assert_eq!(dataset, PathBuf::from("data.json"));
                assert_eq!(filter, SampleFilter::new().with_fiber_type("Carbon").with_orientation("90"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_args(args(&["curve", "Carbon"])).unwrap_err().error_code(), "MISSING_FIELD");
        assert_eq!(
            parse_args(args(&["curve", "Carbon", "Epoxy", "lots"])).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        assert!(parse_args(args(&["fly"])).is_err());
        assert!(parse_args(args(&["convert", "sideways", "0.5", "1", "1"])).is_err());
        assert!(parse_args(args(&["stats", "d.json", "--fiber"])).is_err());
    }

    #[test]
    fn test_parse_mix() {
        let inv = parse_args(args(&["mix", "transverse", "0.6", "230", "3.5"])).unwrap();
        match inv.command {
            Command::Mix { kind, vf, .. } => {
                assert_eq!(kind, MixtureProperty::TransverseModulus);
                assert_eq!(vf, 0.6);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
