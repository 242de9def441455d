use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::info;

use nutriscan::analysis::{analyze, AnalysisResult};
use nutriscan::batch::{analyze_csv, write_summary_csv};
use nutriscan::cli::{parse_args, Cli, Command, ProfileAction, ProfileArgs};
use nutriscan::config::AppConfig;
use nutriscan::label::{extract_from_frame, NutritionRecord, PlainTextRecognizer};
use nutriscan::profile::{ProfileStore, UserProfile};
use nutriscan::recommendations::write_table_csv;
use nutriscan::report::{render_text, ScanReport};
use nutriscan::scan_store::ScanStore;

fn effective_profile(store: &ProfileStore, overrides: &ProfileArgs) -> UserProfile {
    store.snapshot().merged(&overrides.to_update())
}

fn print_result(json: bool, profile: &UserProfile, record: &NutritionRecord, result: &AnalysisResult) -> Result<()> {
    if json {
        let report = ScanReport { profile, record, analysis: result };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(profile, record, result));
    }
    Ok(())
}

fn print_profile(json: bool, profile: &UserProfile) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
    } else {
        println!(
            "gender: {}\nage: {}\nactivity: {}",
            profile.gender.as_str(),
            profile.age_band.as_str(),
            profile.activity_level.as_str()
        );
    }
    Ok(())
}

async fn read_label(text_file: Option<&Path>) -> Result<NutritionRecord> {
    match text_file {
        Some(path) => {
            let frame = fs::read(path)
                .await
                .with_context(|| format!("Failed to read label text file '{}'", path.display()))?;
            extract_from_frame(&PlainTextRecognizer, &frame)
                .with_context(|| format!("Could not read label from '{}', try again", path.display()))
        }
        None => Ok(NutritionRecord::sample()),
    }
}

async fn write_output(output: Option<&Path>, bytes: Vec<u8>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, bytes)
            .await
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            print!("{}", String::from_utf8_lossy(&bytes));
            Ok(())
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let data_dir = cli.data_dir.clone().unwrap_or(config.data_dir);
    let profiles = ProfileStore::open(&data_dir)
        .with_context(|| format!("Failed to open profile store in '{}'", data_dir.display()))?;
    let scans = ScanStore::new(&data_dir);

    match cli.command {
        Command::Scan { text_file, sample: _, profile } => {
            let record = read_label(text_file.as_deref()).await?;
            let profile = effective_profile(&profiles, &profile);
            let result = analyze(&record, &profile)
                .with_context(|| format!("Could not analyze '{}'", record.product_name))?;
            scans.save_last_scan(&record).context("Failed to save last scan")?;
            info!(product = %record.product_name, grade = result.grade.as_str(), "scan analyzed");
            print_result(cli.json, &profile, &record, &result)
        }
        Command::Results { profile } => {
            let record = scans
                .load_last_scan()
                .context("Failed to load last scan")?
                .ok_or_else(|| anyhow!("No scan saved yet, run `nutriscan scan` first"))?;
            let profile = effective_profile(&profiles, &profile);
            let result = analyze(&record, &profile)
                .with_context(|| format!("Could not analyze '{}'", record.product_name))?;
            print_result(cli.json, &profile, &record, &result)
        }
        Command::Profile { action } => {
            let profile = match action {
                ProfileAction::Show => profiles.snapshot(),
                ProfileAction::Set { profile } => {
                    let update = profile.to_update();
                    if update.is_empty() {
                        return Err(anyhow!("Nothing to change, pass --gender, --age or --activity"));
                    }
                    profiles.update(&update).context("Failed to save profile")?
                }
            };
            print_profile(cli.json, &profile)
        }
        Command::Batch { input, output, profile } => {
            let csv_bytes = fs::read(&input)
                .await
                .with_context(|| format!("Failed to read batch input '{}'", input.display()))?;
            let profile = effective_profile(&profiles, &profile);
            let outcomes = analyze_csv(csv_bytes.as_slice(), &profile)
                .with_context(|| format!("Failed to parse batch input '{}'", input.display()))?;
            let mut summary = Vec::new();
            write_summary_csv(&outcomes, &mut summary)?;
            write_output(output.as_deref(), summary).await
        }
        Command::Table { output } => {
            let mut table = Vec::new();
            write_table_csv(&mut table)?;
            write_output(output.as_deref(), table).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    config.init_logging();

    let cli = parse_args();
    run(cli, config).await
}
