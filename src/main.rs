use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use career_quiz::config::{load_config, validate_config, Config};
use career_quiz::export::append_result;
use career_quiz::output;
use career_quiz::quiz::{lint_quiz, validate_quiz};
use career_quiz::scoring::{Answers, Recommendation};
use career_quiz::QuizModel;

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_INPUT: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the quiz interactively (default if no subcommand)
    Take {
        /// Number of recommendations to show
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Do not ask for a name or append the result to the results log
        #[arg(long)]
        no_export: bool,
    },
    /// Score answers given on the command line or in a file
    Score {
        /// Answer as QUESTION_ID=LABEL, e.g. Q1=B (repeatable)
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answer: Vec<(String, String)>,

        /// YAML or JSON file mapping question ids to labels
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Number of recommendations to show
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Respondent name, required with --export
        #[arg(long)]
        name: Option<String>,

        /// Append the result to the results log
        #[arg(long)]
        export: bool,

        /// Score even if some questions are unanswered
        #[arg(long)]
        partial: bool,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// List loaded questions
    Questions,
    /// Load quiz data and report problems
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "career-quiz")]
#[command(about = "Career quiz scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/career-quiz/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Career profile JSON (overrides config)
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    /// Question CSV (overrides config)
    #[arg(long, global = true)]
    questions: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_answer(s: &str) -> Result<(String, String), String> {
    let (id, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION_ID=LABEL, got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing question id in '{}'", s));
    }
    Ok((id.to_string(), label.trim().to_uppercase()))
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "career_quiz=debug"
    } else {
        "career_quiz=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read an answers file: a mapping of question id to option label.
fn read_answers_file(path: &Path) -> anyhow::Result<Answers> {
    use anyhow::Context;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file at {}", path.display()))?;
    let answers: IndexMap<String, String> = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse answers file {}", path.display()))?;
    Ok(answers)
}

fn exit_if_not_ready(model: &QuizModel) {
    if model.is_ready() {
        return;
    }
    eprintln!("Quiz data could not be loaded. Check the question and profile files.");
    for error in model.load_errors() {
        eprintln!("  - {}", error);
    }
    std::process::exit(EXIT_CONFIG);
}

fn score_and_print(
    model: &QuizModel,
    answers: &Answers,
    top_n: usize,
    verbose: bool,
    tsv: bool,
) -> Vec<Recommendation> {
    let use_colors = !tsv && output::should_use_colors();
    let report = model.score_answers(answers);
    let recs = model.get_recommendations(&report.scores, top_n);

    if tsv {
        println!("{}", output::format_tsv(&recs));
        return recs;
    }

    if verbose {
        println!("Answers:");
        println!("{}", output::format_breakdown(&report, use_colors));
        println!();
        println!("Scores:");
        println!(
            "{}",
            output::format_score_table(&report.scores, model.profiles(), use_colors)
        );
        println!();
    }

    println!("Recommended careers:");
    println!("{}", output::format_recommendations(&recs, use_colors));
    recs
}

fn export_result(config: &Config, name: &str, recs: &[Recommendation], verbose: bool) {
    let careers: Vec<String> = recs.iter().map(|r| r.name.clone()).collect();
    if let Err(e) = append_result(&config.results_log, name, &careers) {
        eprintln!("Failed to save result: {}", e);
        std::process::exit(EXIT_IO);
    }
    if verbose {
        eprintln!("Saved result to {}", config.results_log.display());
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Take {
        top: None,
        no_export: false,
    });

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(p) = cli.profiles {
        config.profiles = p;
    }
    if let Some(q) = cli.questions {
        config.questions = q;
    }

    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let model = QuizModel::load(&config.profiles, &config.questions);
    let required = config.required_questions.as_deref();

    match command {
        Commands::Check => {
            println!(
                "Loaded {} career profiles from {}",
                model.profiles().len(),
                config.profiles.display()
            );
            println!(
                "Loaded {} questions from {}",
                model.questions().len(),
                config.questions.display()
            );

            for finding in lint_quiz(&model) {
                eprintln!("warning: {}", finding);
            }

            if let Err(errors) = validate_quiz(&model, required) {
                eprintln!("Quiz is not ready:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }
            println!("Quiz is ready.");
        }
        Commands::Questions => {
            exit_if_not_ready(&model);
            let use_colors = output::should_use_colors();
            if cli.verbose {
                for question in model.questions() {
                    println!("{}", output::format_question(question, use_colors));
                    println!();
                }
            } else {
                println!("{}", output::format_question_list(model.questions(), use_colors));
            }
        }
        Commands::Score {
            answer,
            answers,
            top,
            name,
            export,
            partial,
            tsv,
        } => {
            exit_if_not_ready(&model);

            if export && name.as_deref().map_or(true, |n| n.trim().is_empty()) {
                eprintln!("--export needs a respondent --name.");
                std::process::exit(EXIT_INPUT);
            }

            let mut all_answers = match answers {
                Some(path) => match read_answers_file(&path) {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                None => Answers::new(),
            };
            // Flags override file entries
            all_answers.extend(answer);

            if !partial {
                let missing = model.missing_answers(&all_answers, required);
                if !missing.is_empty() {
                    eprintln!("Unanswered questions: {}", missing.join(", "));
                    eprintln!("Answer them or pass --partial to score anyway.");
                    std::process::exit(EXIT_INPUT);
                }
            }

            let top_n = top.unwrap_or(config.top_n);
            let recs = score_and_print(&model, &all_answers, top_n, cli.verbose, tsv);

            if export {
                if let Some(ref name) = name {
                    export_result(&config, name, &recs, cli.verbose);
                }
            }
        }
        Commands::Take { top, no_export } => {
            exit_if_not_ready(&model);

            let use_colors = output::should_use_colors();
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();

            let submission = match career_quiz::take::run_quiz(
                &model,
                &mut input,
                &mut out,
                !no_export,
                use_colors,
            ) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let top_n = top.unwrap_or(config.top_n);
            let recs = score_and_print(&model, &submission.answers, top_n, cli.verbose, false);

            if let Some(ref name) = submission.name {
                println!();
                println!("Thanks for taking the quiz, {}!", name);
                export_result(&config, name, &recs, cli.verbose);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
