use std::io::{self, Write};

use t5_translator::config::TranslatorConfig;
use t5_translator::selftest::run_self_test;
use t5_translator::{Mode, Translator, available_languages};
use tracing_subscriber::EnvFilter;

const DEFAULT_LANGUAGE: &str = "French";

struct CliConfig {
    language: String,
    mode_label: String,
    text: Option<String>,
    action: CliAction,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CliAction {
    Translate,
    ShowLanguages,
    SelfTest,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut cli = parse_config(std::env::args().skip(1).collect())?;
    let translator = Translator::from_config(&TranslatorConfig::from_env()?)?;

    match cli.action {
        CliAction::ShowLanguages => {
            println!("{}", available_languages());
            return Ok(());
        }
        CliAction::SelfTest => {
            let mode = cli
                .mode_label
                .parse::<Mode>()
                .map_err(|error| error.display_text())?;
            println!("{}", run_self_test(&translator, mode).await);
            return Ok(());
        }
        CliAction::Translate => {}
    }

    if let Some(text) = cli.text.take() {
        println!(
            "{}",
            translator
                .translate_display(&text, &cli.language, &cli.mode_label)
                .await
        );
        return Ok(());
    }

    eprintln!(
        "translate_cli: to={}, mode={}, commands=/languages /selftest /to /mode /exit /quit",
        cli.language, cli.mode_label
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes = stdin.read_line(&mut input)?;
        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("/exit") || line.eq_ignore_ascii_case("/quit") {
            break;
        }

        if line.eq_ignore_ascii_case("/languages") {
            println!("{}", available_languages());
            continue;
        }

        if line.eq_ignore_ascii_case("/selftest") {
            match cli.mode_label.parse::<Mode>() {
                Ok(mode) => println!("{}", run_self_test(&translator, mode).await),
                Err(error) => println!("{}", error.display_text()),
            }
            continue;
        }

        if let Some(language) = line.strip_prefix("/to ") {
            cli.language = language.trim().to_string();
            println!("(target language: {})", cli.language);
            continue;
        }

        if let Some(mode_label) = line.strip_prefix("/mode ") {
            cli.mode_label = mode_label.trim().to_string();
            println!("(mode: {})", cli.mode_label);
            continue;
        }

        println!(
            "{}",
            translator
                .translate_display(line, &cli.language, &cli.mode_label)
                .await
        );
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_config(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut language = std::env::var("T5_TRANSLATOR_CLI_LANGUAGE")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let mut mode_label = std::env::var("T5_TRANSLATOR_CLI_MODE")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Mode::Remote.label().to_string());

    let mut text = None;
    let mut action = CliAction::Translate;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--to" => {
                language = args
                    .get(i + 1)
                    .ok_or("missing value for --to (French|German|Romanian)")?
                    .to_string();
                i += 2;
            }
            "--mode" => {
                mode_label = args
                    .get(i + 1)
                    .ok_or("missing value for --mode (API-Based|Local-Based)")?
                    .to_string();
                i += 2;
            }
            "--text" => {
                text = Some(
                    args.get(i + 1)
                        .ok_or("missing value for --text")?
                        .to_string(),
                );
                i += 2;
            }
            "--languages" => {
                action = CliAction::ShowLanguages;
                i += 1;
            }
            "--self-test" => {
                action = CliAction::SelfTest;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(format!("unknown argument: {other}").into());
            }
        }
    }

    Ok(CliConfig {
        language,
        mode_label,
        text,
        action,
    })
}

fn print_help() {
    println!(
        "Usage:\n  cargo run --bin translate_cli -- [--to LANGUAGE] [--mode API-Based|Local-Based] [--text TEXT] [--languages] [--self-test]\n\nEnv:\n  HF_API_TOKEN\n  T5_TRANSLATOR_API_URL / T5_TRANSLATOR_LOCAL_URL\n  T5_TRANSLATOR_TIMEOUT_MS / T5_TRANSLATOR_MAX_ATTEMPTS / T5_TRANSLATOR_MAX_LENGTH\n  T5_TRANSLATOR_CLI_LANGUAGE / T5_TRANSLATOR_CLI_MODE\n  RUST_LOG\n\nCommands:\n  /languages    list supported languages\n  /selftest     run the built-in checks for the current mode\n  /to LANGUAGE  change the target language\n  /mode LABEL   change the mode\n  /exit         quit\n  /quit         quit"
    );
}
