use crate::app::report::{format_combined, format_intake, format_profile};
use crate::core::extractor::LookupOutcome;
use crate::core::persistence::OutputFormat;
use crate::core::session::{ResultLog, Session};
use crate::core::{ActivityLevel, BiometricInput, FoodSource, Gender, Storage};
use crate::utils::error::{NutriError, Result};
use crate::utils::validation::{parse_age, parse_count, parse_positive_f64};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const MENU_OPTIONS: [&str; 5] = [
    "1. Search for a single food item",
    "2. Search for multiple food items and calculate combined macros",
    "3. Save results to a file (CSV or JSON)",
    "4. Enter personal details for recommended daily intake comparison",
    "5. Exit",
];

enum Flow {
    Continue,
    Exit,
}

/// Interactive console loop around a [`Session`].
pub struct Menu<F: FoodSource, S: Storage, R: AsyncBufRead + Unpin, W: Write> {
    session: Session<F, S>,
    input: Lines<R>,
    out: W,
    default_format: OutputFormat,
}

impl<F, S, R, W> Menu<F, S, R, W>
where
    F: FoodSource,
    S: Storage,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(session: Session<F, S>, input: R, out: W, default_format: OutputFormat) -> Self {
        Self {
            session,
            input: input.lines(),
            out,
            default_format,
        }
    }

    /// 執行直到使用者選擇離開或輸入結束，回傳本次的結果紀錄
    pub async fn run(mut self) -> Result<(ResultLog, W)> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ").await? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.single_lookup().await?,
                "2" => self.combined_lookup().await?,
                "3" => self.save_results().await?,
                "4" => self.recommended_intake().await?,
                "5" => {
                    writeln!(self.out, "Exiting the program. Goodbye!")?;
                    Flow::Exit
                }
                other => {
                    tracing::debug!("Invalid menu choice '{}'", other);
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        self.out.flush()?;
        Ok((self.session.into_log(), self.out))
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- Nutrition App Menu ---")?;
        writeln!(self.out, "{}", MENU_OPTIONS.join("\n"))?;
        Ok(())
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(self.input.next_line().await?)
    }

    fn report_error(&mut self, err: &NutriError) -> Result<()> {
        tracing::debug!("Operation aborted: {}", err);
        writeln!(self.out, "{}", err.user_friendly_message())?;
        Ok(())
    }

    async fn single_lookup(&mut self) -> Result<Flow> {
        let Some(food) = self.prompt("Enter the food item: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Enter the quantity (in grams): ").await? else {
            return Ok(Flow::Exit);
        };

        match self.session.lookup(&food, &quantity).await {
            Ok(LookupOutcome::Found(profile)) => {
                writeln!(self.out, "\n{}", format_profile(&profile))?;
            }
            Ok(LookupOutcome::NotFound) => {
                writeln!(
                    self.out,
                    "Food item not found in the USDA API. Please try again."
                )?;
            }
            Ok(LookupOutcome::Failed(message)) => {
                writeln!(self.out, "Error fetching data: {}", message)?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    async fn combined_lookup(&mut self) -> Result<Flow> {
        let Some(count) = self
            .prompt("How many food items would you like to search? ")
            .await?
        else {
            return Ok(Flow::Exit);
        };
        let count = match parse_count("number of items", &count) {
            Ok(count) => count,
            Err(e) => {
                self.report_error(&e)?;
                return Ok(Flow::Continue);
            }
        };

        let mut items = Vec::new();
        for _ in 0..count {
            let Some(food) = self.prompt("Enter the food item: ").await? else {
                return Ok(Flow::Exit);
            };
            let Some(quantity) = self.prompt("Enter the quantity (in grams): ").await? else {
                return Ok(Flow::Exit);
            };
            items.push((food, quantity));
        }

        let report = self.session.combine(&items).await;
        writeln!(self.out, "\n{}", format_combined(&report))?;
        Ok(Flow::Continue)
    }

    async fn save_results(&mut self) -> Result<Flow> {
        if self.session.results().is_empty() {
            writeln!(self.out, "No results to save. Search for food items first.")?;
            return Ok(Flow::Continue);
        }

        let question = format!(
            "How would you like to save the file? (csv/json) [{}]: ",
            self.default_format
        );
        let Some(format) = self.prompt(&question).await? else {
            return Ok(Flow::Exit);
        };
        let format = match format.trim() {
            "" => self.default_format.to_string(),
            other => other.to_string(),
        };
        let Some(name) = self
            .prompt("Enter the file name (without extension): ")
            .await?
        else {
            return Ok(Flow::Exit);
        };

        match self.session.save(&format, &name).await {
            Ok(path) => writeln!(self.out, "Results saved to {}", path)?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    async fn recommended_intake(&mut self) -> Result<Flow> {
        let prompts = [
            "Enter your age: ",
            "Enter your weight (kg): ",
            "Enter your height (cm): ",
            "Enter your gender (male/female): ",
            "Enter your activity level (sedentary, light, moderate, active, very active): ",
        ];
        let mut answers = Vec::with_capacity(prompts.len());
        for text in prompts {
            let Some(answer) = self.prompt(text).await? else {
                return Ok(Flow::Exit);
            };
            answers.push(answer);
        }

        match parse_biometrics(&answers[0], &answers[1], &answers[2], &answers[3], &answers[4]) {
            Ok(input) => {
                let recommendation = self.session.recommend(&input);
                writeln!(self.out, "\n{}", format_intake(&recommendation))?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }
}

/// Parses free-text biometric answers; activity falls back to sedentary.
pub fn parse_biometrics(
    age: &str,
    weight: &str,
    height: &str,
    gender: &str,
    activity: &str,
) -> Result<BiometricInput> {
    let age = parse_age(age)?;
    let weight = parse_positive_f64("weight", weight)?;
    let height = parse_positive_f64("height", height)?;
    let gender: Gender = gender.parse()?;
    let activity = ActivityLevel::parse_lenient(activity);
    BiometricInput::new(age, weight, height, gender, activity)
}
