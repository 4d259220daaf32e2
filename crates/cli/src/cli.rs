use analyst::analyst::Question;
use analyst::config::Config;
use analyst::db::Database;
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cli_chat::{CliChat, print_answer};

#[derive(Parser)]
#[command(name = "Ad Agent CLI")]
#[command(about = "Seed and query the ad metrics database from the command line")]
pub struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Drop and recreate the campaigns table with demo data")]
    Seed,
    #[command(about = "Ask a single question")]
    Ask {
        question: String,
        /// Where the answer will be posted, e.g. `slack`
        #[arg(long)]
        platform: Option<String>,
    },
    #[command(about = "Chat with the analyst interactively")]
    Chat {
        /// Print the generated SQL for each answer
        #[arg(long)]
        show_sql: bool,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::from_env()?;
        match &self.command {
            Some(Commands::Seed) => {
                let db = Database::open(&config.db_path).await?;
                let rows = db.seed().await?;
                println!(
                    "Seeded {} campaigns into {}",
                    rows,
                    config.db_path.display()
                );
            }
            Some(Commands::Ask { question, platform }) => {
                let chat = CliChat::new(&config, true).await?;
                let mut question = Question::new(question.as_str());
                question.platform = platform.clone();
                let answer = chat.ask(&question).await;
                print_answer(&answer, true);
            }
            Some(Commands::Chat { show_sql }) => {
                let mut chat = CliChat::new(&config, *show_sql).await?;
                chat.run().await?;
            }
            None => {
                println!("No command provided");
            }
        }
        Ok(())
    }
}
