//! appraise - house price prediction from the command line
//!
//! ```text
//! appraise fields
//! appraise schema
//! appraise predict --set LotArea=8450 --select MSZoning=RL --features
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::EnvFilter;

use appraise_core::{AppraiseConfig, AppraiseError, Appraiser, FormSchema, RawInput};

#[derive(Parser)]
#[command(name = "appraise", version, about = "Predict a house price from a few features")]
struct Cli {
    /// Config file (default: ~/.appraise/config.toml, then ./.appraise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model artifact, overriding the config
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List form fields, bounds, and options
    Fields,
    /// Print the expected feature columns in order
    Schema,
    /// Predict a price; unset fields keep their defaults
    Predict {
        /// Numeric field, e.g. LotArea=8450 (clamped to the field's bounds)
        #[arg(long = "set", value_name = "NAME=INT")]
        numeric: Vec<String>,
        /// Selector option, e.g. "Exterior=Wd Sdng"
        #[arg(long = "select", value_name = "FIELD=OPTION")]
        selections: Vec<String>,
        /// Also print the encoded feature row
        #[arg(long)]
        features: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        config,
        model,
        command,
    } = Cli::parse();

    match command {
        Command::Fields => print_fields(&FormSchema::housing()),
        Command::Schema => {
            let appraiser = load_appraiser(config, model)?;
            for column in appraiser.schema().columns() {
                println!("{column}");
            }
        }
        Command::Predict {
            numeric,
            selections,
            features,
            json,
        } => {
            let appraiser = load_appraiser(config, model)?;
            let form = appraiser.form();
            let mut input = form.default_input();
            apply_assignments(form, &mut input, &numeric, &selections)?;

            let appraisal = appraiser.appraise(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&appraisal)?);
            } else {
                if features {
                    let mut table = Table::new();
                    table.load_preset(UTF8_FULL).set_header(vec!["Column", "Value"]);
                    for (column, value) in appraisal.encoding.row.iter() {
                        table.add_row(vec![column.to_string(), value.to_string()]);
                    }
                    println!("{table}");
                    if !appraisal.encoding.zero_filled.is_empty() {
                        println!("zero-filled: {}", appraisal.encoding.zero_filled.join(", "));
                    }
                    if !appraisal.encoding.dropped.is_empty() {
                        println!("dropped: {}", appraisal.encoding.dropped.join(", "));
                    }
                    println!();
                }
                println!("{appraisal}");
            }
        }
    }

    Ok(())
}

fn load_appraiser(
    config: Option<PathBuf>,
    model: Option<PathBuf>,
) -> Result<Appraiser, AppraiseError> {
    let cwd = std::env::current_dir().ok();
    let mut config = AppraiseConfig::load_standard(config.as_deref(), cwd.as_deref())?;
    if let Some(model) = model {
        config.model_path = model;
    }
    Appraiser::from_config(&config)
}

fn apply_assignments(
    form: &FormSchema,
    input: &mut RawInput,
    numeric: &[String],
    selections: &[String],
) -> Result<(), AppraiseError> {
    for assignment in numeric {
        let (name, value) = split_assignment(assignment)?;
        input.set_numeric_text(form, name, value)?;
    }
    for assignment in selections {
        let (name, value) = split_assignment(assignment)?;
        input.select(form, name, value)?;
    }
    Ok(())
}

fn split_assignment(assignment: &str) -> Result<(&str, &str), AppraiseError> {
    assignment
        .split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .ok_or_else(|| AppraiseError::InvalidAssignment(assignment.to_string()))
}

fn print_fields(form: &FormSchema) {
    let (numeric, options) = field_tables(form);
    println!("{numeric}");
    println!("{options}");
}

/// Numeric fields with bounds, then every selector option with its column.
fn field_tables(form: &FormSchema) -> (Table, Table) {
    let mut numeric = Table::new();
    numeric
        .load_preset(UTF8_FULL)
        .set_header(vec!["Field", "Label", "Min", "Max", "Default"]);
    for field in &form.numeric {
        numeric.add_row(vec![
            field.name.clone(),
            field.label.clone(),
            field.min.to_string(),
            field.max.to_string(),
            field.default.to_string(),
        ]);
    }

    let mut options = Table::new();
    options
        .load_preset(UTF8_FULL)
        .set_header(vec!["Selector", "Column", "Option", "Description"]);
    for field in &form.categorical {
        for option in &field.options {
            options.add_row(vec![
                field.name.clone(),
                field.indicator_column(&option.label),
                option.label.clone(),
                option.description.clone(),
            ]);
        }
    }
    (numeric, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_assignment_trims() {
        assert_eq!(split_assignment(" LotArea = 8450 ").unwrap(), ("LotArea", "8450"));
        assert_eq!(
            split_assignment("Exterior=Wd Sdng").unwrap(),
            ("Exterior", "Wd Sdng")
        );
    }

    #[test]
    fn split_assignment_without_equals() {
        let err = split_assignment("LotArea").unwrap_err();
        assert!(matches!(err, AppraiseError::InvalidAssignment(text) if text == "LotArea"));
    }

    #[test]
    fn apply_assignments_clamps_and_selects() {
        let form = FormSchema::housing();
        let mut input = form.default_input();
        apply_assignments(
            &form,
            &mut input,
            &["LotArea=99999999999999999999".to_string()],
            &["MSZoning=RL".to_string()],
        )
        .unwrap();
        assert_eq!(input.numeric("LotArea"), Some(215245));
        assert_eq!(input.selection("MSZoning"), Some("RL"));
    }

    #[test]
    fn field_tables_list_bounds_and_columns() {
        let (numeric, options) = field_tables(&FormSchema::housing());
        let numeric = numeric.to_string();
        assert!(numeric.contains("LotArea"));
        assert!(numeric.contains("215245"));

        let options = options.to_string();
        assert!(options.contains("Exterior1st_Wd Sdng"));
        assert!(options.contains("Residential Low Density"));
    }

    #[test]
    fn cli_parses_predict() {
        let cli = Cli::try_parse_from([
            "appraise",
            "--model",
            "m.json",
            "predict",
            "--set",
            "LotArea=8450",
            "--select",
            "MSZoning=RL",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("m.json")));
        match cli.command {
            Command::Predict {
                numeric,
                selections,
                json,
                features,
            } => {
                assert_eq!(numeric, vec!["LotArea=8450".to_string()]);
                assert_eq!(selections, vec!["MSZoning=RL".to_string()]);
                assert!(json);
                assert!(!features);
            }
            _ => panic!("expected predict"),
        }
    }
}
