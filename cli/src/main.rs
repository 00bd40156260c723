//! follower-graph CLI: analytics over a follower edge list
//!
//! Reads a headerless two-column file (follower, target), builds the graph
//! in parallel and prints the requested report as a table, JSON or CSV.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use follower_graph::algo::{Convergence, DegreeStats};
use follower_graph::{delimited_rows, Analysis, AnalysisConfig, Edge, FrequencyReport, NodeId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "follower-graph", version, about = "Follower network analytics")]
struct Cli {
    /// Headerless edge list, one `follower,target` pair per line
    #[arg(long, short, env = "FOLLOWER_GRAPH_INPUT")]
    input: PathBuf,

    /// Field delimiter of the edge list
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Analysis settings (YAML, or JSON with a .json extension)
    #[arg(long, global = true, env = "FOLLOWER_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Parallel build workers
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Rows per ranked table (1-100)
    #[arg(long, global = true)]
    top: Option<usize>,

    /// Wall-clock budget per solver run, in seconds
    #[arg(long, global = true)]
    time_budget: Option<f64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts
    Summary,
    /// Most active followers and the distribution of following counts
    Followers,
    /// Most followed targets and the distribution of follower counts
    Targets,
    /// Most influential users by degree centrality
    Centrality,
    /// Most influential users by PageRank
    Pagerank {
        #[arg(long)]
        damping: Option<f64>,
        #[arg(long)]
        max_iterations: Option<usize>,
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Top hubs and authorities
    Hits {
        #[arg(long)]
        max_iterations: Option<usize>,
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Targets of a follower and followers of a target
    Edges {
        node: NodeId,
        /// Reject ids outside 1..=MAX_NODE_ID
        #[arg(long)]
        max_node_id: Option<NodeId>,
    },
    /// Bidirectional view of a user: everything it follows and everyone following it
    Ego {
        node: NodeId,
        #[arg(long)]
        max_node_id: Option<NodeId>,
    },
}

/// One printable table
struct Section {
    title: String,
    columns: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(mut cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(top) = cli.top {
        config.top = top;
    }
    if cli.time_budget.is_some() {
        config.time_budget_secs = cli.time_budget;
    }
    apply_solver_overrides(&mut cli.command, &mut config);

    let text = read_input(&cli.input)?;
    let rows = delimited_rows(&text, cli.delimiter);
    info!(rows = rows.len(), path = %cli.input.display(), "edge list loaded");

    let analysis = Analysis::from_records(&rows, config)
        .with_context(|| format!("failed to build graph from {}", cli.input.display()))?;
    let top = analysis.config().top;

    match cli.command {
        Commands::Summary => {
            let graph = analysis.graph();
            let summary = Summary {
                nodes: graph.node_count(),
                edges: graph.edge_count(),
            };
            let section = Section {
                title: "Global Statistics of the Network".into(),
                columns: vec!["Metric", "Value"],
                rows: vec![
                    vec!["Nodes".into(), summary.nodes.to_string()],
                    vec!["Edges".into(), summary.edges.to_string()],
                ],
            };
            emit(cli.format, &summary, &[section])
        }
        Commands::Followers => {
            let report = analysis.most_active_followers();
            let sections = frequency_sections(
                &report,
                format!("Top {} Most Active Followers", top),
                "Follower",
                "Summary of Following Count",
            );
            emit(cli.format, &report, &sections)?;
            if let (OutputFormat::Table, Some(stats)) = (cli.format, report.stats) {
                println!("A follower has an average of {:.4} targets", stats.mean);
            }
            Ok(())
        }
        Commands::Targets => {
            let report = analysis.most_followed_targets();
            let sections = frequency_sections(
                &report,
                format!("Top {} Most Followed Targets", top),
                "Target",
                "Summary of Target Count",
            );
            emit(cli.format, &report, &sections)?;
            if let (OutputFormat::Table, Some(stats)) = (cli.format, report.stats) {
                println!("A target has an average of {:.4} followers", stats.mean);
            }
            Ok(())
        }
        Commands::Centrality => {
            let ranked = analysis.top_degree_centrality();
            let section = score_section(
                format!("Top {} Influential Users by Degree Centrality", top),
                "DegreeCentrality",
                &ranked,
            );
            emit(cli.format, &ranked, &[section])
        }
        Commands::Pagerank { .. } => {
            let report = analysis.top_page_rank()?;
            let section = score_section(
                format!(
                    "Top {} Influential Users by PageRank ({})",
                    top,
                    describe(report.convergence)
                ),
                "Pagerank",
                &report.top,
            );
            emit(cli.format, &report, &[section])
        }
        Commands::Hits { .. } => {
            let report = analysis.top_hits()?;
            let status = describe(report.convergence);
            let sections = [
                score_section(
                    format!("Top {} Hubs ({})", top, status),
                    "HubScore",
                    &report.hubs,
                ),
                score_section(
                    format!("Top {} Authorities ({})", top, status),
                    "AuthorityScore",
                    &report.authorities,
                ),
            ];
            emit(cli.format, &report, &sections)
        }
        Commands::Edges { node, max_node_id } => {
            check_node_range(node, max_node_id)?;
            let edges = analysis.graph().edges_of(node);
            let sections = [
                edge_section(format!("Targets of follower {}", node), &edges.outgoing),
                edge_section(format!("Followers of target {}", node), &edges.incoming),
            ];
            emit(cli.format, &edges, &sections)
        }
        Commands::Ego { node, max_node_id } => {
            check_node_range(node, max_node_id)?;
            let ego = analysis.graph().edges_of(node).all();
            let section = edge_section(format!("Bidirectional view of user {}", node), &ego);
            emit(cli.format, &ego, &[section])
        }
    }
}

#[derive(Serialize)]
struct Summary {
    nodes: usize,
    edges: usize,
}

fn apply_solver_overrides(command: &mut Commands, config: &mut AnalysisConfig) {
    match command {
        Commands::Pagerank {
            damping,
            max_iterations,
            tolerance,
        } => {
            if let Some(d) = damping.take() {
                config.pagerank.damping_factor = d;
            }
            if let Some(m) = max_iterations.take() {
                config.pagerank.max_iterations = m;
            }
            if let Some(t) = tolerance.take() {
                config.pagerank.tolerance = t;
            }
        }
        Commands::Hits {
            max_iterations,
            tolerance,
        } => {
            if let Some(m) = max_iterations.take() {
                config.hits.max_iterations = m;
            }
            if let Some(t) = tolerance.take() {
                config.hits.tolerance = t;
            }
        }
        _ => {}
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Dataset-specific id range check; the library accepts any id
fn check_node_range(node: NodeId, max_node_id: Option<NodeId>) -> Result<()> {
    if let Some(max) = max_node_id {
        if !(1..=max).contains(&node) {
            bail!("User ID must be between 1 and {}", max);
        }
    }
    Ok(())
}

fn describe(convergence: Convergence) -> String {
    match convergence {
        Convergence::Converged { iterations } => format!("converged in {} iterations", iterations),
        Convergence::NotReached { iterations, .. } => {
            format!("not converged after {} iterations", iterations)
        }
    }
}

fn frequency_sections(
    report: &FrequencyReport,
    title: String,
    node_column: &'static str,
    stats_title: &str,
) -> Vec<Section> {
    let mut sections = vec![Section {
        title,
        columns: vec![node_column, "Frequency"],
        rows: report
            .top
            .iter()
            .map(|(node, count)| vec![node.to_string(), count.to_string()])
            .collect(),
    }];
    if let Some(stats) = report.stats {
        sections.push(Section {
            title: stats_title.to_string(),
            columns: vec!["Statistic", "Value"],
            rows: stats_rows(&stats),
        });
    }
    if let (Some(first), Some(last)) = (report.bucket_edges.first(), report.bucket_edges.last()) {
        sections.push(Section {
            title: "Log-Scale Histogram Buckets".into(),
            columns: vec!["Edges", "From", "To"],
            rows: vec![vec![
                report.bucket_edges.len().to_string(),
                first.to_string(),
                last.to_string(),
            ]],
        });
    }
    sections
}

fn stats_rows(stats: &DegreeStats) -> Vec<Vec<String>> {
    [
        ("count", stats.count as f64),
        ("mean", stats.mean),
        ("std", stats.std),
        ("min", stats.min),
        ("25%", stats.p25),
        ("50%", stats.median),
        ("75%", stats.p75),
        ("max", stats.max),
    ]
    .iter()
    .map(|(name, value)| vec![name.to_string(), format!("{:.6}", value)])
    .collect()
}

fn score_section(title: String, score_column: &'static str, ranked: &[(NodeId, f64)]) -> Section {
    Section {
        title,
        columns: vec!["User", score_column],
        rows: ranked
            .iter()
            .map(|(node, score)| vec![node.to_string(), format!("{:.8}", score)])
            .collect(),
    }
}

fn edge_section(title: String, edges: &[Edge]) -> Section {
    Section {
        title,
        columns: vec!["Follower", "Target"],
        rows: edges
            .iter()
            .map(|e| vec![e.follower.to_string(), e.target.to_string()])
            .collect(),
    }
}

fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, sections: &[Section]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Csv => {
            for (i, section) in sections.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", section.columns.join(","));
                for row in &section.rows {
                    println!("{}", row.join(","));
                }
            }
        }
        OutputFormat::Table => {
            for section in sections {
                println!("### {}", section.title);
                if section.rows.is_empty() {
                    println!("(no results)\n");
                    continue;
                }

                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(&section.columns);
                for row in &section.rows {
                    table.add_row(row);
                }

                println!("{}", table);
                println!("{} row(s)\n", section.rows.len());
            }
        }
    }

    Ok(())
}
