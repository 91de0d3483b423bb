use std::process;

use clap::{Parser, ValueEnum};
use knap_dp::{DpTable, KnapsackError, KnapsackProblem, Selection};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Solve a 0/1 knapsack instance and print its DP table.
#[derive(Debug, Parser)]
#[command(name = "knapsack", version)]
struct Args {
    /// Item weights, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    weights: Vec<usize>,

    /// Item values, comma separated, same order as the weights.
    #[arg(long, value_delimiter = ',', required = true)]
    values: Vec<u64>,

    /// Bag capacity.
    #[arg(long)]
    capacity: usize,

    /// How to print the table.
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,

    /// Also print one optimal set of items.
    #[arg(long)]
    select: bool,

    /// Print only the optimal value, without building the table.
    #[arg(long, conflicts_with = "select")]
    max_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tsv,
    Csv,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Knapsack(#[from] KnapsackError),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Knapsack(_) => 2,
            CliError::Encode(_) => 1,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    capacity: usize,
    rows: Vec<&'a [u64]>,
    optimal_value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<&'a Selection>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("knapsack: {err}");
            process::exit(err.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let problem = KnapsackProblem::from_slices(&args.weights, &args.values, args.capacity)?;
    tracing::info!(
        items = problem.num_items(),
        capacity = problem.capacity(),
        "solving knapsack instance"
    );

    if args.max_only {
        return Ok(format!("{}\n", problem.max_value()));
    }

    let table = problem.table();
    let selection = args.select.then(|| table.selection(&problem));
    render(&table, selection.as_ref(), args.format)
}

fn render(
    table: &DpTable,
    selection: Option<&Selection>,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Tsv => {
            let mut out = table.to_string();
            if let Some(sel) = selection {
                out.push_str(&selection_line(sel));
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut out = String::from("item");
            for budget in 0..table.width() {
                out.push_str(&format!(",{budget}"));
            }
            out.push('\n');
            for (i, row) in table.rows().enumerate() {
                out.push_str(&i.to_string());
                for cell in row {
                    out.push_str(&format!(",{cell}"));
                }
                out.push('\n');
            }
            if let Some(sel) = selection {
                out.push_str(&selection_line(sel));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let report = JsonReport {
                capacity: table.capacity(),
                rows: table.rows().collect(),
                optimal_value: table.optimal_value(),
                selection,
            };
            encode_json(&report)
        }
    }
}

fn encode_json<T: Serialize>(report: &T) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(format!("{json}\n"))
}

fn selection_line(sel: &Selection) -> String {
    let items: Vec<String> = sel.items.iter().map(usize::to_string).collect();
    format!(
        "selected items: [{}] weight={} value={}\n",
        items.join(", "),
        sel.total_weight,
        sel.total_value
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("knapsack").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    const REFERENCE: [&str; 6] = [
        "--weights",
        "1,3,4",
        "--values",
        "15,20,30",
        "--capacity",
        "4",
    ];

    #[test]
    fn tsv_is_the_default() {
        let args = parse(&REFERENCE);
        assert_eq!(args.format, OutputFormat::Tsv);
        assert_eq!(
            run(&args).unwrap(),
            "0\t15\t15\t15\t15\n0\t15\t15\t20\t35\n0\t15\t15\t20\t35\n"
        );
    }

    #[test]
    fn csv_has_budget_header() {
        let mut argv = REFERENCE.to_vec();
        argv.extend(["--format", "csv", "--select"]);
        let out = run(&parse(&argv)).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("item,0,1,2,3,4"));
        assert_eq!(lines.next(), Some("0,0,15,15,15,15"));
        assert_eq!(out.lines().last(), Some("selected items: [0, 1] weight=4 value=35"));
    }

    #[test]
    fn json_report_carries_rows() {
        let mut argv = REFERENCE.to_vec();
        argv.extend(["--format", "json"]);
        let out = run(&parse(&argv)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["optimal_value"], 35);
        assert_eq!(value["rows"][1][4], 35);
        assert!(value.get("selection").is_none());
    }

    #[test]
    fn max_only_skips_the_table() {
        let mut argv = REFERENCE.to_vec();
        argv.push("--max-only");
        assert_eq!(run(&parse(&argv)).unwrap(), "35\n");
    }

    #[test]
    fn mismatched_lists_are_reported() {
        let args = parse(&["--weights", "1,2", "--values", "1", "--capacity", "5"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(&err, CliError::Knapsack(e) if e.is_invalid_input()));
        assert_eq!(err.exit_code(), 2);
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cell out of range"))
        }
    }

    #[test]
    fn encode_failure_is_an_error_not_empty_output() {
        let err = encode_json(&Unencodable).unwrap_err();
        assert!(matches!(err, CliError::Encode(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("cell out of range"));
    }

    #[test]
    fn max_only_conflicts_with_select() {
        let mut argv = vec!["knapsack"];
        argv.extend(REFERENCE);
        argv.extend(["--max-only", "--select"]);
        assert!(Args::try_parse_from(argv).is_err());
    }
}
