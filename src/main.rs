use std::borrow::Cow;
use std::io::Read;

use clap::{Parser, ValueEnum};
use fineprint::page::{cap_length, is_legal_document, normalize_whitespace, Sensitivity};
use fineprint::{AnalysisOrchestrator, AnalysisRequest, AnalysisResult, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SensitivityArg {
    Low,
    Medium,
    High,
}

impl From<SensitivityArg> for Sensitivity {
    fn from(arg: SensitivityArg) -> Self {
        match arg {
            SensitivityArg::Low => Sensitivity::Low,
            SensitivityArg::Medium => Sensitivity::Medium,
            SensitivityArg::High => Sensitivity::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Parser)]
#[command(
    name = "fineprint",
    about = "Grade the transparency of Terms of Service and Privacy Policy documents",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<String>,

    /// Document title; titles containing "Privacy" are graded as privacy policies
    #[arg(long, default_value = "")]
    title: String,

    /// Page URL the document was taken from
    #[arg(long, default_value = "")]
    url: String,

    /// Skip remote models and use rule-based analysis only
    #[arg(long)]
    offline: bool,

    /// How eagerly the URL and title are recognized as a legal document
    #[arg(long, value_enum, default_value_t = SensitivityArg::Medium)]
    sensitivity: SensitivityArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let orchestrator = if cli.offline {
        AnalysisOrchestrator::new()
    } else {
        AnalysisOrchestrator::from_config(&config)
    };
    tracing::debug!(strategies = ?orchestrator.strategy_names(), "strategy chain ready");

    if (!cli.url.is_empty() || !cli.title.is_empty())
        && !is_legal_document(&cli.url, &cli.title, cli.sensitivity.into())
    {
        tracing::warn!(
            url = %cli.url,
            title = %cli.title,
            "page does not look like a terms of service or privacy policy"
        );
    }

    let mut documents: Vec<String> = Vec::new();
    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .expect("Failed to read stdin");
        documents.push(input);
    } else {
        for path in &cli.files {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading {path}: {e}");
                std::process::exit(1);
            });
            documents.push(text);
        }
    }

    for raw in &documents {
        let normalized = normalize_whitespace(raw);
        let text = cap_length(&normalized);
        if let Cow::Owned(_) = text {
            tracing::warn!(
                chars = normalized.chars().count(),
                "document truncated before analysis"
            );
        }
        let request = AnalysisRequest::new(&text)
            .with_url(&cli.url)
            .with_title(&cli.title)
            .with_credentials(config.api_key.as_deref());
        let result = orchestrator.analyze_text(&request);
        match cli.format {
            Format::Json => println!(
                "{}",
                serde_json::to_string_pretty(&result).expect("analysis results serialize to JSON")
            ),
            Format::Text => print_report(&result),
        }
    }
}

fn print_report(result: &AnalysisResult) {
    let grade = result.transparency_grade;
    println!(
        "Grade {grade}: {} ({})",
        grade.description(),
        grade.risk_level().title()
    );
    if let Some(score) = result.score {
        println!("Score: {score}/100");
    }
    for line in &result.summary {
        println!("  - {line}");
    }
    if result.red_flags.is_empty() {
        println!("No major red flags detected");
    } else {
        println!("Red flags:");
        for flag in &result.red_flags {
            println!("  [{}] {}", flag.severity.as_str(), flag.description);
            println!("      \"{}\"", flag.clause);
        }
    }
    println!("{}", result.user_insight);
}
