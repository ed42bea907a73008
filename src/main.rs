//! pup CLI - find dog-friendly breweries and plan pub crawls.

use clap::Parser;
use pupcrawl::cli::{
    Cli, Commands, ConfigCommands, FilterCommands, LocationCommands, PlanCommands,
};
use pupcrawl::commands::{self, Output, WithToast};
use pupcrawl::config::{self, ConfigOverrides, OutputFormat, ResolvedConfig};
use pupcrawl::models::NewLocation;
use pupcrawl::share::SystemClipboard;
use pupcrawl::PupCrawl;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling log verbosity (e.g. `PUP_LOG=debug`).
const LOG_ENV: &str = "PUP_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let file_config = config::load_config();
    let overrides = ConfigOverrides {
        output_format: cli.human_readable.then_some(OutputFormat::Human),
        dataset: cli.dataset.clone(),
        ..ConfigOverrides::default()
    };
    let resolved = config::resolve_config(&file_config, &overrides);
    let human = resolved.output_format() == OutputFormat::Human;

    let result = run_command(cli.command, cli.data_dir.as_deref(), &resolved, human);

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_command(
    command: Option<Commands>,
    data_dir: Option<&Path>,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), pupcrawl::Error> {
    if let Some(Commands::Config { command }) = &command {
        match command {
            ConfigCommands::Show => output(&commands::config::show(config), human),
        }
        return Ok(());
    }

    let mut app = commands::open_app(data_dir, config)?;

    match command {
        None => finish(&app, commands::status(&app), human),
        Some(Commands::Location { command }) => run_location(&mut app, command, human)?,
        Some(Commands::Filter { command }) => run_filter(&mut app, command, human)?,
        Some(Commands::Plan { command }) => run_plan(&mut app, command, config, human)?,
        Some(Commands::Config { .. }) => {}
    }
    Ok(())
}

fn run_location(
    app: &mut PupCrawl,
    command: LocationCommands,
    human: bool,
) -> Result<(), pupcrawl::Error> {
    use commands::location;

    match command {
        LocationCommands::List { all } => {
            let result = location::list(app, all);
            finish(app, result, human);
        }
        LocationCommands::Show { id } => {
            let result = location::show(app, &id)?;
            finish(app, result, human);
        }
        LocationCommands::Add {
            name,
            lat,
            lng,
            category,
            rating,
            address,
            review_link,
            notes,
        } => {
            let mut candidate = NewLocation::new(name.trim(), [lat, lng], category, rating);
            candidate.address = address;
            candidate.review_link = review_link;
            candidate.notes = notes;
            let result = location::add(app, candidate)?;
            finish(app, result, human);
        }
        LocationCommands::Rate { id, rating } => {
            let result = location::rate(app, &id, rating)?;
            finish(app, result, human);
        }
        LocationCommands::Categorize { id, category } => {
            let result = location::categorize(app, &id, category)?;
            finish(app, result, human);
        }
        LocationCommands::Note { id, content } => {
            let result = location::note(app, &id, &content)?;
            finish(app, result, human);
        }
        LocationCommands::Report { id, issue, email } => {
            let result = location::report(app, &id, &issue, email.as_deref())?;
            finish(app, result, human);
        }
    }
    Ok(())
}

fn run_filter(
    app: &mut PupCrawl,
    command: FilterCommands,
    human: bool,
) -> Result<(), pupcrawl::Error> {
    use commands::filter;

    let result = match command {
        FilterCommands::Show => filter::show(app),
        FilterCommands::Set {
            category,
            min_rating,
        } => filter::set(app, category, min_rating)?,
        FilterCommands::Reset => filter::reset(app)?,
        FilterCommands::ToggleRating { rating } => filter::toggle_rating(app, rating)?,
    };
    finish(app, result, human);
    Ok(())
}

fn run_plan(
    app: &mut PupCrawl,
    command: PlanCommands,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), pupcrawl::Error> {
    use commands::plan;

    match command {
        PlanCommands::Create { name } => {
            let result = plan::create(app, &name)?;
            finish(app, result, human);
        }
        PlanCommands::List => {
            let result = plan::list(app);
            finish(app, result, human);
        }
        PlanCommands::Show { id } => {
            let result = plan::show(app, &id)?;
            finish(app, result, human);
        }
        PlanCommands::Add {
            plan_id,
            location_id,
        } => {
            let result = plan::add(app, &plan_id, &location_id)?;
            finish(app, result, human);
        }
        PlanCommands::Remove {
            plan_id,
            location_id,
        } => {
            let result = plan::remove(app, &plan_id, &location_id)?;
            finish(app, result, human);
        }
        PlanCommands::Move { plan_id, from, to } => {
            let result = plan::move_stop(app, &plan_id, from, to)?;
            finish(app, result, human);
        }
        PlanCommands::Notes { plan_id, text } => {
            let result = plan::notes(app, &plan_id, &text)?;
            finish(app, result, human);
        }
        PlanCommands::Rename { plan_id, name } => {
            let result = plan::rename(app, &plan_id, &name)?;
            finish(app, result, human);
        }
        PlanCommands::Delete { plan_id } => {
            let result = plan::delete(app, &plan_id)?;
            finish(app, result, human);
        }
        PlanCommands::Share {
            plan_id,
            origin,
            no_copy,
        } => {
            let origin = origin.as_deref().unwrap_or(config.share_origin());
            let mut clipboard = SystemClipboard::default();
            let clipboard: Option<&mut dyn pupcrawl::share::Clipboard> = if no_copy {
                None
            } else {
                Some(&mut clipboard)
            };
            let result = plan::share(app, &plan_id, origin, clipboard)?;
            finish(app, result, human);
        }
        PlanCommands::Open { link } => {
            let result = plan::open(app, &link)?;
            finish(app, result, human);
        }
        PlanCommands::Export { plan_id, base_url } => {
            let base_url = base_url.as_deref().unwrap_or(config.directions_url());
            let result = plan::export(app, &plan_id, base_url)?;
            finish(app, result, human);
        }
    }
    Ok(())
}

/// Print a command result along with any toast it raised.
fn finish<T: Output>(app: &PupCrawl, result: T, human: bool) {
    output(&WithToast::capture(result, app), human);
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
