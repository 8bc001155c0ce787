/*!
 * Cortex CLI - console shell for the assistant engine
 *
 * Reads one utterance per line, speaks replies on stdout, and runs the
 * periodic reminder check between cycles. Voice capture and TTS live
 * behind the same traits and can replace the console without touching
 * the engine.
 */

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};

use cortex_core::logging::{self, LogLevel};
use cortex_core::{
    Assistant, ConsoleInput, ConsoleOutput, JsonFileStorage, SystemOpener, VoiceInput, VoiceOutput,
};

#[derive(Parser)]
#[command(name = "cortex")]
#[command(about = "Cortex - voice-driven personal task and reminder assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive assistant session
    Run {
        /// Directory for the JSON documents (default: ~/.cortex)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Append structured log lines to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Delay between cycles in seconds
        #[arg(long, default_value_t = 60)]
        poll_secs: u64,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data_dir,
            log_file,
            poll_secs,
        } => run(data_dir, log_file, poll_secs),
        Commands::Version => {
            println!("cortex v{}", env!("CARGO_PKG_VERSION"));
        }
    }
}

fn run(data_dir: Option<PathBuf>, log_file: Option<PathBuf>, poll_secs: u64) {
    logging::init(log_file, LogLevel::Info);

    let storage = match data_dir {
        Some(dir) => JsonFileStorage::with_dir(dir),
        None => JsonFileStorage::new(),
    };
    let mut assistant = Assistant::boot(storage, Box::new(SystemOpener));
    let mut input = ConsoleInput::new();
    let mut output = ConsoleOutput::new();

    speak_all(&mut output, &assistant.open_session().replies);

    loop {
        let Some(utterance) = input.next_utterance() else {
            // Input stream is gone; nothing more to do.
            break;
        };

        // Empty means "nothing understood" - skip dispatch for this cycle.
        if !utterance.is_empty() {
            let turn = assistant.handle_utterance(&utterance, Local::now().naive_local());
            speak_all(&mut output, &turn.replies);
            if turn.end {
                std::process::exit(0);
            }
        }

        let fired = assistant.check_reminders(Local::now().naive_local());
        speak_all(&mut output, &fired);

        if poll_secs > 0 {
            thread::sleep(Duration::from_secs(poll_secs));
        }
    }
}

fn speak_all(output: &mut ConsoleOutput, messages: &[String]) {
    for message in messages {
        if let Err(e) = output.say(message) {
            logging::error("SPEECH", "say", &e.to_string());
        }
    }
}
