use crate::report::{run_compliance_report, run_gap_report, GapReportArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use staff_compliance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Staff Training Compliance",
    about = "Serve and report on staff training compliance from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Produce compliance reports from a roster CSV export
    Compliance {
        #[command(subcommand)]
        command: ComplianceCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ComplianceCommand {
    /// Dashboard rollups by risk tier, staff type, category and job title
    Report(ReportArgs),
    /// Prioritized list of overdue, due-soon and missing training
    Gaps(GapReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Compliance {
            command: ComplianceCommand::Report(args),
        } => run_compliance_report(args),
        Command::Compliance {
            command: ComplianceCommand::Gaps(args),
        } => run_gap_report(args),
    }
}
