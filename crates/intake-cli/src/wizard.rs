use std::fmt::Write;

use intake_spec::{
    Allergy, ConcernBoard, Diet, HealthConcern, ProgressCounters, Step, SubmissionPayload,
};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: prompts and selections only.
    Clean,
    /// Verbose output: progress, tooltips, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints the wizard's screens once the engine yields the next one.
pub struct ScreenPresenter {
    verbosity: Verbosity,
    show_answers_json: bool,
}

impl ScreenPresenter {
    pub fn new(verbosity: Verbosity, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            show_answers_json,
        }
    }

    pub fn show_welcome(&self) {
        println!("Welcome to DailyVita");
        println!("Hello, we are here to make your life healthier and happier.");
        println!("We will ask couple of questions to better understand your vitamin need.");
    }

    pub fn show_step(&self, step: Step, progress: &ProgressCounters) {
        let title = match step {
            Step::Welcome => "Welcome",
            Step::HealthConcerns => "Select the top health concerns * (up to 5)",
            Step::DietSelection => "Select the diets you follow *",
            Step::Allergies => {
                "Write any specific allergies or sensitivity towards specific things. (optional)"
            }
            Step::Questionnaire => "A few lifestyle questions",
            Step::Summary => "Your Selections",
        };
        println!();
        println!("{}", title);
        if self.verbosity.is_verbose() {
            println!("Progress: {}/{}", progress.answered, progress.total);
        }
    }

    pub fn show_concern_catalog(&self, concerns: &[HealthConcern]) {
        for concern in concerns {
            println!("  {}. {}", concern.id, concern.name);
        }
        println!("Toggle a concern by id; 'done' to continue.");
    }

    pub fn show_board(&self, board: &ConcernBoard) {
        let selected = board
            .prioritized()
            .iter()
            .map(|concern| concern.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if selected.is_empty() {
            println!("Selected: (none)");
        } else {
            println!("Selected: {}", selected);
        }
        if board.is_at_capacity() {
            println!("Selection is full; deselect before adding another.");
        }
    }

    pub fn show_priority_list(&self, board: &ConcernBoard) {
        println!("Prioritize");
        for (index, concern) in board.prioritized().iter().enumerate() {
            println!("  {}. {} (id {})", index + 1, concern.name, concern.id);
        }
    }

    pub fn show_diet_catalog(&self, diets: &[Diet]) {
        for diet in diets {
            if self.verbosity.is_verbose() {
                println!("  {} ({})", diet.name, diet.tool_tip);
            } else {
                println!("  {}", diet.name);
            }
        }
        println!("Toggle a diet by name; 'done' to continue.");
    }

    pub fn show_allergy_catalog(&self, allergies: &[Allergy]) {
        let names = allergies
            .iter()
            .map(|allergy| allergy.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("Common allergies: {}", names);
        println!("Type allergies (comma or space separated), 'remove <name>' to drop one, 'done' to continue.");
    }

    pub fn show_tags(&self, names: &[String]) {
        if names.is_empty() {
            println!("Allergies: (none)");
        } else {
            println!("Allergies: {}", names.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, payload: &SubmissionPayload) {
        println!("Done ✅");
        match payload.to_cbor() {
            Ok(bytes) => {
                println!("Payload (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize payload to CBOR: {}", err);
            }
        }
        if self.show_answers_json {
            match payload.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize payload to JSON: {}", err);
                }
            }
        }
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}
