use std::{
    env,
    io::{self, IsTerminal},
    path::PathBuf,
    process,
};

use slot_metrics::{
    config::ConfigManager,
    init,
    pipeline::MetricsEngine,
    report::{self, ReportStyle},
    sales::SlotClassifier,
    utils::build_info,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    let manager = ConfigManager::from_default_location();

    match command.as_str() {
        "summary" | "rows" => {
            let mut path = None;
            let mut json = false;
            for arg in args {
                match arg.as_str() {
                    "--json" => json = true,
                    _ => path = Some(PathBuf::from(arg)),
                }
            }
            let path = path.unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });

            let config = manager.load()?;
            let style = ReportStyle::from_config(&config).with_color(io::stdout().is_terminal());
            let mut engine = MetricsEngine::new(config)?;
            let sales_report = engine.process_file(&path)?;

            if json {
                println!("{}", report::to_json(&sales_report)?);
            } else if command == "summary" {
                print!("{}", report::render_summary(&sales_report, &style));
            } else {
                print!("{}", report::render_rows(&sales_report, &style));
            }
        }
        "classify" => {
            let text = args.collect::<Vec<_>>().join(" ");
            let config = manager.load()?;
            let classifier = SlotClassifier::from_config(&config.classifier)?;
            let outcome = classifier.classify_detailed(Some(text.as_str()));
            match outcome.rule {
                Some(rule) => println!("{} slot(s) [{}]", outcome.slots, rule),
                None => println!("{} slot(s) [no rule matched]", outcome.slots),
            }
        }
        "config" => match args.next().as_deref() {
            Some("path") => println!("{}", manager.config_path().display()),
            Some("show") => {
                let config = manager.load()?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            Some("init") => {
                let config = manager.load()?;
                manager.save(&config)?;
                println!("Wrote {}", manager.config_path().display());
            }
            _ => {
                print_usage();
                process::exit(1);
            }
        },
        "version" | "--version" => println!("{}", build_info::current()),
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: slot_metrics_cli <command>\n\
         Commands:\n  \
         summary <export.xlsx|csv|json> [--json]\n  \
         rows <export.xlsx|csv|json> [--json]\n  \
         classify <description...>\n  \
         config path|show|init\n  \
         version"
    );
}
