//! apigen CLI
//!
//! Generates API client classes from a JSON service manifest.

use std::path::Path;

use apigen_client::generate_client;
use apigen_model::{ServiceManifest, SourceFileContext};
use apigen_php::BasicFormatter;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "generate" => {
            // Parse options, handling --out-dir specially (needs lookahead)
            let mut manifest_path: Option<String> = None;
            let mut out_dir: Option<String> = None;
            let mut verbose = false;
            let mut i = 2;
            while i < args.len() {
                if args[i] == "--out-dir" && i + 1 < args.len() {
                    out_dir = Some(args[i + 1].clone());
                    i += 2;
                } else if args[i] == "--verbose" || args[i] == "-v" {
                    verbose = true;
                    i += 1;
                } else if !args[i].starts_with('-') && manifest_path.is_none() {
                    manifest_path = Some(args[i].clone());
                    i += 1;
                } else {
                    eprintln!("error: unknown option '{}'", args[i]);
                    std::process::exit(1);
                }
            }

            let Some(path) = manifest_path else {
                eprintln!("error: missing manifest path");
                eprintln!("Usage: apigen generate <manifest.json> [--out-dir <dir>] [-v]");
                std::process::exit(1);
            };

            init_tracing(verbose);
            if !generate(&path, out_dir.as_deref().map(Path::new)) {
                std::process::exit(1);
            }
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: apigen check <manifest.json>");
                std::process::exit(1);
            }
            init_tracing(false);
            if !check(&args[2]) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("apigen {}", env!("CARGO_PKG_VERSION"));
        }
        command => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_manifest(path: &str) -> Option<ServiceManifest> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            eprintln!("error: invalid manifest {path}: {err}");
            None
        }
    }
}

fn generate(path: &str, out_dir: Option<&Path>) -> bool {
    let Some(manifest) = load_manifest(path) else {
        return false;
    };
    let services = match manifest.to_services() {
        Ok(services) => services,
        Err(err) => {
            eprintln!("error: {err}");
            return false;
        }
    };

    if let Some(dir) = out_dir {
        if let Err(err) = std::fs::create_dir_all(dir) {
            eprintln!("error: cannot create {}: {err}", dir.display());
            return false;
        }
    }

    let mut ok = true;
    for service in &services {
        let mut ctx = SourceFileContext::new(service.client_namespace.clone());
        match generate_client(&mut ctx, service, &BasicFormatter) {
            Ok(text) => match out_dir {
                Some(dir) => {
                    let file = dir.join(format!("{}.php", service.client_class_name));
                    if let Err(err) = std::fs::write(&file, text) {
                        eprintln!("error: cannot write {}: {err}", file.display());
                        ok = false;
                    } else {
                        println!("wrote {}", file.display());
                    }
                }
                None => print!("{text}"),
            },
            Err(err) => {
                // One bad service never blocks the others.
                eprintln!("error: {}: {err}", service.client_class_name);
                ok = false;
            }
        }
    }
    ok
}

fn check(path: &str) -> bool {
    let Some(manifest) = load_manifest(path) else {
        return false;
    };
    match manifest.to_services() {
        Ok(services) => {
            println!("{path}: {} service(s) OK", services.len());
            true
        }
        Err(err) => {
            eprintln!("error: {err}");
            false
        }
    }
}

fn print_usage() {
    println!("apigen (API client generator)");
    println!();
    println!("Usage: apigen <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <manifest.json>  Generate one client class per service");
    println!("  check <manifest.json>     Validate a manifest without generating");
    println!("  help                      Show this help message");
    println!("  version                   Show version information");
    println!();
    println!("Generate options:");
    println!("  --out-dir <dir>     Write <ClientName>.php files here (default: stdout)");
    println!("  --verbose, -v       Show generation progress");
    println!();
    println!("Examples:");
    println!("  apigen check echo.json");
    println!("  apigen generate echo.json --out-dir src/Gapic");
    println!("  apigen generate echo.json                # print to stdout");
}
