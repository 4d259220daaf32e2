use analyst::analyst::{Analyst, AnalystBuilder, Answer, AnswerMode, Question};
use analyst::config::Config;
use analyst::db::Database;
use analyst::llm::OpenAiModel;
use anyhow::Result;
use console::style;
use dialoguer::Input;
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::Duration;

pub struct CliChat {
    analyst: Analyst,
    show_sql: bool,
}

impl CliChat {
    pub async fn new(config: &Config, show_sql: bool) -> Result<Self> {
        let db = Database::open(&config.db_path).await?;
        if config.auto_seed && !db.has_table("campaigns").await? {
            db.seed().await?;
        }
        let analyst = AnalystBuilder::default()
            .model(Arc::new(OpenAiModel::from_config(config)))
            .db(db)
            .build()?;
        Ok(Self { analyst, show_sql })
    }

    pub async fn ask(&self, question: &Question) -> Answer {
        let spinner = ProgressBar::new_spinner().with_message("Thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let answer = self.analyst.answer(question).await;
        spinner.finish_and_clear();
        answer
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("Ask about ROAS, spend or campaign performance. Ctrl-C to quit.");
        loop {
            self.run_one().await?;
        }
    }

    async fn run_one(&mut self) -> Result<()> {
        let msg = Input::<String>::new()
            .with_prompt("message")
            .interact_text()?;
        let answer = self.ask(&Question::new(msg)).await;
        print_answer(&answer, self.show_sql);
        Ok(())
    }
}

pub fn print_answer(answer: &Answer, show_sql: bool) {
    if show_sql {
        if let Some(sql) = &answer.sql {
            println!("{}", style(sql).dim());
        }
    }

    match answer.mode {
        AnswerMode::Fallback => println!("{} {}", style("→ [backup]").yellow(), answer.text),
        _ => println!("→ {}", answer.text),
    }

    if let Some(chart) = answer.chart() {
        let max = chart.max_value();
        let width = chart.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        println!("  {} by {}", chart.value_key, chart.label_key);
        for bar in &chart.bars {
            let len = if max > 0.0 {
                ((bar.value / max) * 30.0).round() as usize
            } else {
                0
            };
            println!(
                "  {:width$} {} {}",
                bar.label,
                style("█".repeat(len)).magenta(),
                bar.value,
                width = width
            );
        }
    }
}
