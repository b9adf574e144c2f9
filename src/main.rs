use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use vocab_tokenizer::demo::{print_round_trip, round_trip, DEFAULT_PROMPT};
use vocab_tokenizer::tokenizer::{
    MergePolicy, TokenId, Tokenizer, TokenizerFile, WordTokenizer, TOKENIZER_FILE_NAME,
};

#[derive(Parser, Debug)]
#[command(version, about = "Word-level tokenizer over a tokenizer.json vocabulary")]
struct Cli {
    /// Path to tokenizer.json, or a directory containing one
    #[arg(
        long,
        env = "VOCAB_TOKENIZER_PATH",
        default_value = "data/tokenizer.json"
    )]
    tokenizer: PathBuf,

    /// How added tokens and the base vocabulary are combined
    #[arg(long, value_enum, default_value_t = Policy::OverrideBase)]
    merge_policy: Policy,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a prompt and decode it back
    Demo {
        #[arg(long, default_value = DEFAULT_PROMPT)]
        prompt: String,
    },
    /// Print the ids of the given text as a JSON array
    Encode {
        #[arg(required = true)]
        text: Vec<String>,
        /// Print words missing from the vocabulary to stderr
        #[arg(long)]
        show_misses: bool,
    },
    /// Print the text for the given ids
    Decode {
        #[arg(required = true)]
        ids: Vec<TokenId>,
    },
    /// Summarize the tokenizer file
    Inspect,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Policy {
    OverrideBase,
    AddedOnly,
}

impl From<Policy> for MergePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::OverrideBase => MergePolicy::OverrideBase,
            Policy::AddedOnly => MergePolicy::AddedOnly,
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(TOKENIZER_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = resolve_path(&cli.tokenizer);
    let file = TokenizerFile::from_file(&path)
        .with_context(|| format!("could not read tokenizer at {}", path.display()))?;

    let policy = MergePolicy::from(cli.merge_policy);
    let build = || {
        WordTokenizer::from_tokenizer_file(&file, policy)
            .with_context(|| format!("could not build vocabulary from {}", path.display()))
    };

    match cli.command {
        Command::Demo { prompt } => print_round_trip(&round_trip(&build()?, &prompt)),
        Command::Encode { text, show_misses } => {
            let encoding = build()?.encode_with_misses(&text.join(" "));
            println!("{}", serde_json::to_string(&encoding.ids)?);
            if show_misses {
                for word in &encoding.misses {
                    eprintln!("missing: {word}");
                }
            }
        }
        Command::Decode { ids } => println!("{}", build()?.decode(&ids)),
        Command::Inspect => inspect(&file),
    }

    Ok(())
}

fn inspect(file: &TokenizerFile) {
    println!("version      = {:?}", file.version);
    match &file.model {
        Some(model) => {
            println!("model type   = {:?}", model.kind);
            println!("base vocab   = {}", model.vocab.len());
        }
        None => println!("model        = <absent>"),
    }
    println!("added tokens = {}", file.added_tokens.len());
    for token in file.special_tokens() {
        println!("  {:>8}  {}", token.id, token.content);
    }
}
