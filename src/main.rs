use bidboard::cli;
use bidboard::error::BidResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bidboard")]
#[command(about = "Bid-result board builder: .xlsb bid sheets in, color-coded Google Sheets board out.")]
#[command(long_about = "Bidboard - bid-result board builder

Reads bid-result spreadsheets (.xlsb) from a folder, extracts each file's
rank/company/amount/ratio table, groups files into zones by the 제N공구 marker
in their names, color-codes companies via an auxiliary .xlsx workbook, and
publishes the assembled board (plus a per-group ratio summary) to a Google
Sheets worksheet - or to a local .xlsx for offline review.

COMMANDS:
  process  - Parse a folder of .xlsb files and publish the board
  inspect  - Preview the raw rows and parsed table of one file
  colors   - Show the company color map of a color workbook

EXAMPLES:
  bidboard process ./입찰결과분석 --sheet-id 1Zwmf...XrU
  bidboard process ./입찰결과분석 --dry-run --export board.xlsx
  bidboard inspect 제3공구_입찰결과_상세.xlsb
  bidboard colors 업체분류.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Parse every .xlsb file in a folder and publish the board.

Each file contributes one zone (derived from the 제N공구 marker in its name;
files without a marker share the 기타 bucket). Zones are laid out side by
side, companies are colored by their group from the color workbook, and a
per-group average-ratio summary is appended below the table.

The target worksheet is cleared (created when absent) and rewritten wholesale:
one bulk values write, one bulk formatting call.

Settings come from defaults, then an optional JSON config file, then flags:

  {
    \"folder\": \"E:/입찰결과분석\",
    \"credentials\": \"credentials.json\",
    \"sheet_id\": \"1Zwmf...XrU\",
    \"worksheet\": \"입찰결과정리\",
    \"color_file\": \"업체분류.xlsx\"
  }

Use --dry-run to assemble without the remote write, and --export to also
render the board into a local .xlsx.")]
    /// Parse a folder of .xlsb bid-result files and publish the board
    Process {
        /// Folder with .xlsb bid-result files (defaults to the config value)
        folder: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Service-account credential file
        #[arg(long)]
        credentials: Option<PathBuf>,

        /// Target spreadsheet document id
        #[arg(long)]
        sheet_id: Option<String>,

        /// Target worksheet name
        #[arg(long)]
        worksheet: Option<String>,

        /// Company color workbook (.xlsx)
        #[arg(long)]
        color_file: Option<PathBuf>,

        /// Also render the board into a local .xlsx file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Assemble only - skip the Google Sheets write
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show per-file progress
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Preview one .xlsb source file.

Prints the zone key derived from the file name, the first rows of the raw
sheet (no header interpretation, fixed column positions), and the bid table
parsed from below the 순위 marker.

EXAMPLE:
  bidboard inspect 제3공구_입찰결과_상세.xlsb --rows 30")]
    /// Preview the raw rows and parsed table of one .xlsb file
    Inspect {
        /// Path to an .xlsb bid-result file
        file: PathBuf,

        /// Raw rows to print
        #[arg(short, long, default_value_t = 20)]
        rows: usize,
    },

    #[command(long_about = "Show the company color map of a color workbook.

Scans every cell of the active sheet; text cells filled with one of the three
mapped accent themes are listed under their group. Useful to verify the
workbook before a run.")]
    /// Show the company color map of an .xlsx color workbook
    Colors {
        /// Path to the color workbook (.xlsx)
        file: PathBuf,
    },
}

fn main() -> BidResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            folder,
            config,
            credentials,
            sheet_id,
            worksheet,
            color_file,
            export,
            dry_run,
            verbose,
        } => cli::process(
            folder,
            config,
            credentials,
            sheet_id,
            worksheet,
            color_file,
            export,
            dry_run,
            verbose,
        ),

        Commands::Inspect { file, rows } => cli::inspect(file, rows),

        Commands::Colors { file } => cli::colors(file),
    }
}
