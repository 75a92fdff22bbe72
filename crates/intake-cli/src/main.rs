mod wizard;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use intake_spec::{
    AlcoholBand, ApplyOutcome, AssembleError, FormState, FormStore, FormUpdate, ReferenceCatalog,
    Step, ToggleOutcome, YesNo, assemble, build_summary, counters, render_json_ui, render_text,
    step_complete, validate,
};
use wizard::{AnswerParseError, ScreenPresenter, Verbosity};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Text-based onboarding intake wizard",
    long_about = "Runs the DailyVita onboarding flow in a text shell and provides validation and assembly helpers for saved answer files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CatalogKind {
    Concerns,
    Diets,
    Allergies,
}

#[derive(Subcommand)]
enum Command {
    /// Run the onboarding flow interactively in a text shell.
    Wizard {
        /// Optional JSON file containing an initial form state; screens that
        /// are already complete are skipped.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Show verbose output (progress, tooltips, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit the payload as pretty JSON on completion.
        #[arg(long)]
        answers_json: bool,
        /// Render output mode for the final summary.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Validate a saved form state against the submission requirements.
    Validate {
        /// Path to the form state JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Assemble the submission payload from a saved form state.
    Assemble {
        /// Path to the form state JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Write the payload here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the bundled reference catalogs.
    Catalog {
        /// Limit output to one catalog.
        #[arg(long, value_enum)]
        kind: Option<CatalogKind>,
    },
    /// Print the JSON Schema of the submission payload.
    Schema,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard {
            answers,
            verbose,
            answers_json,
            format,
        } => run_wizard(answers, verbose, answers_json, format),
        Command::Validate { answers } => run_validate(&answers),
        Command::Assemble { answers, out } => run_assemble(&answers, out),
        Command::Catalog { kind } => run_catalog(kind),
        Command::Schema => run_schema(),
    }
}

fn run_wizard(
    answers: Option<PathBuf>,
    verbose: bool,
    answers_json: bool,
    format: RenderMode,
) -> CliResult<()> {
    let catalog = ReferenceCatalog::bundled()?;
    let seeded = answers.is_some();
    let initial = match &answers {
        Some(path) => load_form(path)?,
        None => FormState::default(),
    };
    let mut store = FormStore::with_state(&catalog, initial);
    let presenter = ScreenPresenter::new(Verbosity::from_verbose(verbose), answers_json);

    presenter.show_welcome();
    prompt_line("Press Enter to get started.")?;

    if !(seeded && step_complete(store.state(), Step::HealthConcerns)) {
        presenter.show_step(Step::HealthConcerns, &counters(store.state()));
        run_concern_screen(&mut store, &catalog, &presenter)?;
    }
    if !(seeded && step_complete(store.state(), Step::DietSelection)) {
        presenter.show_step(Step::DietSelection, &counters(store.state()));
        run_diet_screen(&mut store, &catalog, &presenter)?;
    }
    if !seeded {
        presenter.show_step(Step::Allergies, &counters(store.state()));
        run_allergy_screen(&mut store, &catalog, &presenter)?;
    }
    if !(seeded && step_complete(store.state(), Step::Questionnaire)) {
        presenter.show_step(Step::Questionnaire, &counters(store.state()));
        run_questionnaire(&mut store, &presenter)?;
    }

    presenter.show_step(Step::Summary, &counters(store.state()));
    let summary = build_summary(store.state());
    match format {
        RenderMode::Text => println!("{}", render_text(&summary)?),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&summary))?),
    }

    let payload = assemble(store.state(), &catalog)?;
    presenter.show_completion(&payload);
    Ok(())
}

fn run_concern_screen(
    store: &mut FormStore<'_>,
    catalog: &ReferenceCatalog,
    presenter: &ScreenPresenter,
) -> CliResult<()> {
    presenter.show_concern_catalog(catalog.health_concerns());
    loop {
        presenter.show_board(&store.state().concerns);
        let input = prompt_line(">")?;
        if input.eq_ignore_ascii_case("done") {
            if store.state().concerns.selected().is_empty() {
                presenter.show_parse_error(&AnswerParseError::new(
                    "select at least one health concern",
                    None,
                ));
                continue;
            }
            break;
        }
        match input.parse::<u32>() {
            Ok(id) => match store.apply(FormUpdate::ToggleConcern { id }) {
                Ok(ApplyOutcome::Toggle(ToggleOutcome::AtCapacity)) => {
                    presenter.show_parse_error(&AnswerParseError::new(
                        "selection is already at five concerns",
                        None,
                    ));
                }
                Ok(_) => {}
                Err(err) => {
                    presenter.show_parse_error(&AnswerParseError::new(err.to_string(), None));
                }
            },
            Err(_) => presenter.show_parse_error(&AnswerParseError::new(
                format!("'{}' is not a concern id", input),
                Some("an integer id from the list".into()),
            )),
        }
    }

    if store.state().concerns.selected().len() > 1 {
        presenter.show_priority_list(&store.state().concerns);
        loop {
            let input = prompt_line("New order (comma-separated ids, blank to keep):")?;
            if input.is_empty() {
                break;
            }
            match parse_id_list(&input) {
                Ok(order) => match store.apply(FormUpdate::ReorderConcerns { order }) {
                    Ok(_) => {
                        presenter.show_priority_list(&store.state().concerns);
                        break;
                    }
                    Err(err) => presenter.show_parse_error(&AnswerParseError::new(
                        err.to_string(),
                        Some("a permutation of the selected ids".into()),
                    )),
                },
                Err(error) => presenter.show_parse_error(&error),
            }
        }
    }
    Ok(())
}

fn run_diet_screen(
    store: &mut FormStore<'_>,
    catalog: &ReferenceCatalog,
    presenter: &ScreenPresenter,
) -> CliResult<()> {
    presenter.show_diet_catalog(catalog.diets());
    loop {
        let input = prompt_line(">")?;
        if input.eq_ignore_ascii_case("done") {
            if store.state().diets.is_empty() {
                presenter.show_parse_error(&AnswerParseError::new(
                    "please select at least one diet",
                    None,
                ));
                continue;
            }
            break;
        }
        match catalog.diet_by_name(&input) {
            Some(diet) => {
                store.apply(FormUpdate::ToggleDiet {
                    name: diet.name.clone(),
                })?;
                println!("Diets: {}", store.state().diets.names().join(", "));
            }
            None => presenter.show_parse_error(&AnswerParseError::new(
                format!("'{}' is not a diet from the list", input),
                Some("a diet name exactly as listed".into()),
            )),
        }
    }
    Ok(())
}

fn run_allergy_screen(
    store: &mut FormStore<'_>,
    catalog: &ReferenceCatalog,
    presenter: &ScreenPresenter,
) -> CliResult<()> {
    presenter.show_allergy_catalog(catalog.allergies());
    loop {
        presenter.show_tags(store.state().allergies.names());
        let input = prompt_line(">")?;
        if input.eq_ignore_ascii_case("done") {
            break;
        }
        if let Some(name) = input.strip_prefix("remove ") {
            store.apply(FormUpdate::RemoveAllergy {
                name: name.trim().to_string(),
            })?;
            continue;
        }
        if input.is_empty() {
            continue;
        }
        let outcome = store.apply(FormUpdate::AllergyText { text: input })?;
        if let ApplyOutcome::Text(intake) = outcome
            && !intake.pending.is_empty()
        {
            // Enter finalizes the trailing token.
            store.apply(FormUpdate::AddAllergy {
                name: intake.pending,
            })?;
        }
    }
    Ok(())
}

fn run_questionnaire(store: &mut FormStore<'_>, presenter: &ScreenPresenter) -> CliResult<()> {
    let sun = prompt_yes_no(presenter, "Is your daily exposure to sun limited? (yes/no)")?;
    store.apply(FormUpdate::SetSunExposure { answer: sun })?;

    let smoking = prompt_yes_no(
        presenter,
        "Do you currently smoke (tobacco or marijuana)? (yes/no)",
    )?;
    store.apply(FormUpdate::SetSmoking { answer: smoking })?;

    let band = loop {
        let input = prompt_line(
            "On average, how many alcoholic beverages do you have in a week? (0-1/2-5/5+)",
        )?;
        match AlcoholBand::from_label(input.trim()) {
            Some(band) => break band,
            None => presenter.show_parse_error(&AnswerParseError::new(
                format!("'{}' is not one of the listed bands", input),
                Some("0-1, 2-5, 5+".into()),
            )),
        }
    };
    store.apply(FormUpdate::SetAlcohol { band })?;
    Ok(())
}

fn run_validate(answers: &Path) -> CliResult<()> {
    let form = load_form(answers)?;
    let result = validate(&form);
    if result.valid {
        println!("Form is valid.");
        return Ok(());
    }
    for field in &result.missing_required {
        println!("missing: {}", field);
    }
    for error in &result.errors {
        println!("invalid: {}", error.message);
    }
    Err("validation failed".into())
}

fn run_assemble(answers: &Path, out: Option<PathBuf>) -> CliResult<()> {
    let catalog = ReferenceCatalog::bundled()?;
    let form = load_form(answers)?;
    match assemble(&form, &catalog) {
        Ok(payload) => {
            let pretty = payload.to_json_pretty()?;
            match out {
                Some(path) => {
                    fs::write(&path, pretty)?;
                    println!("Payload written to {}", path.display());
                }
                None => println!("{}", pretty),
            }
            Ok(())
        }
        Err(AssembleError::Invalid(validation)) => {
            println!("{}", validation);
            Err("form is not ready for submission".into())
        }
    }
}

fn run_catalog(kind: Option<CatalogKind>) -> CliResult<()> {
    let described: Value = serde_json::from_str(&component_intake::describe())?;
    if let Some(error) = described.get("error") {
        return Err(format!("catalog unavailable: {}", error).into());
    }

    if kind.is_none() || kind == Some(CatalogKind::Concerns) {
        println!("Health concerns:");
        print_named_entries(&described["health_concerns"]);
    }
    if kind.is_none() || kind == Some(CatalogKind::Diets) {
        println!("Diets:");
        print_named_entries(&described["diets"]);
    }
    if kind.is_none() || kind == Some(CatalogKind::Allergies) {
        println!("Allergies:");
        print_named_entries(&described["allergies"]);
    }
    Ok(())
}

fn print_named_entries(entries: &Value) {
    for entry in entries.as_array().map(Vec::as_slice).unwrap_or_default() {
        let id = entry["id"].as_u64().unwrap_or_default();
        let name = entry["name"].as_str().unwrap_or_default();
        match entry["tool_tip"].as_str() {
            Some(tool_tip) => println!("  {}. {} ({})", id, name, tool_tip),
            None => println!("  {}. {}", id, name),
        }
    }
}

fn run_schema() -> CliResult<()> {
    println!("{}", component_intake::submission_schema_json());
    Ok(())
}

fn load_form(path: &Path) -> CliResult<FormState> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let form = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err))?;
    Ok(form)
}

fn prompt_line(label: &str) -> CliResult<String> {
    print!("{} ", label);
    io::stdout().flush()?;
    let mut buffer = String::new();
    let read = io::stdin().read_line(&mut buffer)?;
    if read == 0 {
        return Err("input ended before the wizard finished".into());
    }
    Ok(buffer.trim().to_string())
}

fn prompt_yes_no(presenter: &ScreenPresenter, question: &str) -> CliResult<YesNo> {
    loop {
        let input = prompt_line(question)?;
        match parse_yes_no(&input) {
            Ok(answer) => return Ok(answer),
            Err(error) => presenter.show_parse_error(&error),
        }
    }
}

fn parse_yes_no(input: &str) -> Result<YesNo, AnswerParseError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(YesNo::Yes),
        "n" | "no" | "false" => Ok(YesNo::No),
        other => Err(AnswerParseError::new(
            format!("'{}' is not a yes/no answer", other),
            Some("yes/no, y/n, true/false".into()),
        )),
    }
}

fn parse_id_list(input: &str) -> Result<Vec<u32>, AnswerParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| {
                AnswerParseError::new(
                    format!("'{}' is not a concern id", token),
                    Some("comma-separated integer ids".into()),
                )
            })
        })
        .collect()
}
