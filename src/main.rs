use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use em_quiz::protocol::DEFAULT_PORT;
use em_quiz::{client, load_bank, server, Quiz, QuizError};
use env_logger::{Env, Target};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Write logs to this file instead of stderr (the quiz screens own the terminal)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take the quiz locally (default)
    Play {
        /// JSON file to load the questions from; the built-in bank otherwise
        #[arg(short, long)]
        questions: Option<PathBuf>,
    },

    /// Host independent quiz sessions for remote players
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// JSON file to load the questions from; the built-in bank otherwise
        #[arg(short, long)]
        questions: Option<PathBuf>,
    },

    /// Take the quiz on a remote server
    Connect {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn run(command: Command) -> Result<(), QuizError> {
    match command {
        Command::Play { questions } => {
            let bank = load_bank(questions.as_deref())?;
            Quiz::new(bank).run()
        }
        Command::Serve { port, questions } => {
            let bank = load_bank(questions.as_deref())?;
            Runtime::new()?.block_on(server::run(port, bank))
        }
        Command::Connect { host, port } => Runtime::new()?.block_on(client::run(host, port)),
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let command = args.command.unwrap_or(Command::Play { questions: None });
    if let Err(e) = run(command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
