use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use thrall_db::{
    cli::{Cli, Commands},
    schema::{class_names, get_class, ThrallClass},
    ui::{ConsoleUi, Phase, SilentUi, Tally, Ui, UiApp},
    writer::{collect_input_files, import_files, resolve_db_path, ThrallStore},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();
    let db = cli.db;

    match cli.command {
        Commands::Classes => {
            println!("Thrall classes:\n");
            for name in class_names() {
                println!("  {}", name);
            }
        }

        Commands::Init => {
            let (_, db_path) = open_store(db)?;
            println!("Database ready at {:?}", db_path);
        }

        Commands::Import { paths, tui, quiet } => {
            let (store, _) = open_store(db)?;
            run_import(&store, &paths, tui, quiet)?;
        }

        Commands::List { class } => {
            let class = parse_class(&class)?;
            let (store, _) = open_store(db)?;
            let names = store
                .list_names(class)
                .with_context(|| format!("Error loading names for {}", class))?;
            print_names(&names);
        }

        Commands::Search { class, query } => {
            let class = parse_class(&class)?;
            let (store, _) = open_store(db)?;
            let names = store
                .search(class, &query)
                .with_context(|| format!("Search error in {}", class))?;
            print_names(&names);
        }

        Commands::Show { class, name, json } => {
            let class = parse_class(&class)?;
            let (store, _) = open_store(db)?;
            let record = store.get_record(class, &name)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let width = record.labelled().map(|(label, _)| label.len()).max().unwrap_or(0);
                for (label, value) in record.labelled() {
                    println!("{:>width$}: {}", label, value, width = width);
                }
            }
        }
    }

    Ok(())
}

fn open_store(db: Option<PathBuf>) -> Result<(ThrallStore, PathBuf)> {
    let db_path = resolve_db_path(db)?;
    let store = ThrallStore::open(&db_path)
        .with_context(|| format!("Failed to open database {:?}", db_path))?;
    Ok((store, db_path))
}

fn parse_class(name: &str) -> Result<ThrallClass> {
    get_class(name).ok_or_else(|| {
        anyhow!(
            "Unknown thrall class {:?} (expected one of: {})",
            name,
            class_names().join(", ")
        )
    })
}

fn print_names(names: &[String]) {
    if names.is_empty() {
        println!("No results found.");
    }
    for name in names {
        println!("{}", name);
    }
}

fn run_import(store: &ThrallStore, paths: &[PathBuf], tui: bool, quiet: bool) -> Result<()> {
    let start = Instant::now();
    let files = collect_input_files(paths)?;

    if files.is_empty() {
        println!("No thrall files found");
        return Ok(());
    }

    let tally = if tui {
        let mut ui = UiApp::new()?;
        ui.set_phase(Phase::Scanning);
        ui.set_info(format!("Found {} file(s)", files.len()));
        import_files(store, &files, &mut ui);
        ui.finish()?
    } else if quiet {
        let reports = import_files(store, &files, &mut SilentUi::new());
        for report in reports.iter().filter(|r| !r.outcome.is_success()) {
            eprintln!("{}", report);
        }
        Tally::from_reports(&reports)
    } else {
        let reports = import_files(store, &files, &mut ConsoleUi::new());
        Tally::from_reports(&reports)
    };

    if !quiet {
        println!(
            "\nImported {} of {} file(s) in {:.1}s ({})",
            tally.succeeded,
            tally.total(),
            start.elapsed().as_secs_f64(),
            tally
        );
    }
    log::info!("Import finished: {}", tally);
    Ok(())
}
