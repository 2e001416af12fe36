use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for sitegrid
/// Construction schedule grid backed by SQLite
#[derive(Parser)]
#[command(
    name = "sitegrid",
    version = env!("CARGO_PKG_VERSION"),
    about = "Construction schedule grid: CSV backfill, block reads and cell writes on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log table")]
        print: bool,
    },

    /// Backfill a sheet from a CSV export of the schedule spreadsheet
    Import {
        #[arg(long = "csv", value_name = "FILE")]
        csv: String,

        /// Sheet name; created on first reference
        #[arg(long = "sheet")]
        sheet: String,

        #[arg(long = "dry", help = "Scan and count without committing anything")]
        dry: bool,

        #[arg(long = "debug-scan", help = "Print every detected section and cell")]
        debug_scan: bool,

        #[arg(long = "print-headers", help = "Show the detected column layout and stop")]
        print_headers: bool,

        #[arg(
            long = "dump-names",
            value_name = "N",
            help = "Print the first N names from the chosen label column and stop"
        )]
        dump_names: Option<usize>,

        #[arg(
            long = "name-col-index",
            value_name = "INDEX",
            help = "Force the label/section column index (0-based)"
        )]
        name_col_index: Option<usize>,

        /// Actor recorded in the audit log
        #[arg(long = "user")]
        user: Option<String>,
    },

    /// List sheets
    Sheets,

    /// List the canonical sections
    Sections {
        /// Accepted for symmetry with the other listings; the list is fixed
        #[arg(long = "sheet")]
        sheet: Option<i64>,
    },

    /// List the subsections of a section
    Subsections {
        #[arg(long = "sheet")]
        sheet: i64,

        #[arg(long = "section")]
        section: String,
    },

    /// Read a rows × days block of a section
    Block {
        #[arg(long = "sheet")]
        sheet: i64,

        #[arg(long = "section")]
        section: String,

        #[arg(long = "subsection")]
        subsection: Option<String>,

        #[arg(long = "start", help = "First day (default from config)")]
        start: Option<u32>,

        #[arg(long = "end", help = "Last day (default from config)")]
        end: Option<u32>,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Apply a batch of cell writes read as JSON `{"records": [...]}`
    Write {
        #[arg(long, value_name = "FILE", help = "JSON file, or '-' for stdin")]
        file: String,

        /// Actor recorded in the audit log
        #[arg(long = "user")]
        user: Option<String>,
    },
}
