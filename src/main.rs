use clap::{Parser, Subcommand};

use quizgen::protocol::{DEFAULT_COUNT, DEFAULT_LANGUAGE, DEFAULT_PORT};
use quizgen::{Difficulty, GenerationError, GenerationOptions, Quiz, QuizClient};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the quiz generation server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Generate a quiz and play it in the terminal
    Play {
        /// Base URL of a running generation server
        #[arg(long, default_value_t = format!("http://127.0.0.1:{DEFAULT_PORT}"))]
        server: String,

        /// Number of questions to request (1 to 10)
        #[arg(short, long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// fácil, médio, difícil or misto
        #[arg(short, long, default_value = "misto", value_parser = Difficulty::parse)]
        difficulty: Difficulty,

        /// Topic to focus on (repeatable)
        #[arg(short, long = "topic")]
        topics: Vec<String>,

        /// Output language for the questions
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve { port } => quizgen::server::run(port).await,
        Command::Play {
            server,
            count,
            difficulty,
            topics,
            language,
        } => {
            let options = GenerationOptions {
                count,
                difficulty,
                topics,
                language,
            };
            play(server, options).await
        }
    };

    if let Err(e) = result {
        eprintln!("Erro: {}", e);
        std::process::exit(1);
    }
}

async fn play(server: String, options: GenerationOptions) -> Result<(), GenerationError> {
    println!("Gerando {} perguntas...", options.count);

    let client = QuizClient::new(server);
    let questions = client.generate_quiz_questions(&options).await?;

    Quiz::new(questions).run()
}
