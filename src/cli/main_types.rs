use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "utilkit")]
#[command(about = "Command line toolkit of everyday file, image, PDF, text, network, data, and date/time helpers")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// File operations: copy, move, delete, archive
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Image operations: resize, convert, compress, thumbnails
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// PDF operations: download, merge, split, rasterize
    Pdf {
        #[command(subcommand)]
        command: PdfCommands,
    },
    /// Text transformations
    Text {
        #[command(subcommand)]
        command: TextCommands,
    },
    /// Network probes and URL helpers
    Net {
        #[command(subcommand)]
        command: NetCommands,
    },
    /// JSON/CSV data helpers
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
    /// Date and time helpers
    Time {
        #[command(subcommand)]
        command: TimeCommands,
    },
    /// Command catalog and subprocess execution
    Cmd {
        #[command(subcommand)]
        command: CmdCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Copy files into a directory
    Copy {
        /// Files to copy
        sources: Vec<PathBuf>,
        /// Destination directory (created if absent)
        #[arg(long)]
        dest: PathBuf,
        /// Overwrite existing destination files
        #[arg(long)]
        overwrite: bool,
    },
    /// Move files into a directory
    Move {
        /// Files to move
        sources: Vec<PathBuf>,
        /// Destination directory (created if absent)
        #[arg(long)]
        dest: PathBuf,
        /// Overwrite existing destination files
        #[arg(long)]
        overwrite: bool,
    },
    /// Delete files (asks for confirmation unless --yes)
    Delete {
        /// Files to delete
        paths: Vec<PathBuf>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Compress a folder into an archive
    Compress {
        /// Folder to compress
        folder: PathBuf,
        /// Output archive path
        output: PathBuf,
        /// Archive format: zip or tar.gz
        #[arg(long, default_value = "zip")]
        format: String,
    },
    /// Extract an archive into a directory
    Extract {
        /// Archive file (.zip, .tar.gz, .tgz, .tar)
        archive: PathBuf,
        /// Destination directory (created if absent)
        dest: PathBuf,
    },
    /// Show the size of a file
    Size {
        /// File to inspect
        path: PathBuf,
        /// Print the raw byte count instead of a human-readable size
        #[arg(long)]
        bytes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Resize an image
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Force the exact size, distorting the aspect ratio
        #[arg(long)]
        exact: bool,
    },
    /// Convert an image to another format
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Target format (png, jpeg, webp, ...); inferred from the output
        /// extension when omitted
        #[arg(long)]
        format: Option<String>,
    },
    /// Rewrite DPI metadata without touching pixels (PNG output only)
    Dpi {
        input: PathBuf,
        output: PathBuf,
        /// Horizontal and vertical DPI
        #[arg(long)]
        dpi: u32,
    },
    /// Recompress an image at a quality level
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Quality from 1 (smallest) to 100 (best)
        #[arg(long, default_value = "85")]
        quality: u8,
    },
    /// Create a thumbnail bounded within a square
    Thumbnail {
        input: PathBuf,
        output: PathBuf,
        /// Maximum size of either axis; the config default applies when omitted
        #[arg(long)]
        max_size: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PdfCommands {
    /// Download a PDF over HTTP
    Download {
        url: String,
        output: PathBuf,
        /// Request timeout in seconds; the config default applies when omitted
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Merge PDFs into one document, in argument order
    Merge {
        /// Input documents
        inputs: Vec<PathBuf>,
        /// Merged output path
        #[arg(long)]
        output: PathBuf,
    },
    /// Split a PDF into numbered parts
    Split {
        input: PathBuf,
        /// Directory for split_N.pdf outputs
        output_dir: PathBuf,
        #[arg(long, default_value = "1")]
        pages_per_file: usize,
    },
    /// Rasterize every page to an image
    ToImages {
        input: PathBuf,
        /// Directory for page_N outputs
        output_dir: PathBuf,
        /// Resolution; the config default applies when omitted
        #[arg(long)]
        dpi: Option<u32>,
        /// Output format: png or jpeg
        #[arg(long, default_value = "png")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TextCommands {
    /// Count whitespace-delimited words
    Words { text: String },
    /// Count characters
    Chars {
        text: String,
        /// Exclude space characters from the count
        #[arg(long)]
        no_spaces: bool,
    },
    /// Convert between case styles
    Case {
        text: String,
        /// Target style: snake, kebab, camel, or title
        #[arg(long)]
        to: String,
    },
    /// Extract email addresses
    Emails { text: String },
    /// Extract http/https URLs
    Urls { text: String },
    /// Truncate to a maximum length
    Truncate {
        text: String,
        #[arg(long)]
        max: usize,
        #[arg(long, default_value = "...")]
        suffix: String,
    },
    /// Strip HTML tags
    StripHtml { text: String },
}

#[derive(Subcommand, Debug)]
pub enum NetCommands {
    /// Probe internet reachability with a TCP connect
    Check {
        #[arg(long, default_value = "8.8.8.8")]
        host: String,
        #[arg(long, default_value = "53")]
        port: u16,
        /// Timeout in seconds
        #[arg(long, default_value = "3")]
        timeout: u64,
    },
    /// Show the local IP address
    Ip,
    /// Show the machine hostname
    Hostname,
    /// Split a URL into components
    Parse { url: String },
    /// Append query parameters to a base URL
    Build {
        base: String,
        /// Parameters in key=value format
        #[arg(long, action = clap::ArgAction::Append)]
        param: Vec<String>,
    },
    /// Percent-encode a string
    Encode { value: String },
    /// Decode a percent-encoded string
    Decode { value: String },
    /// Check whether a TCP port is open
    Port {
        host: String,
        port: u16,
        /// Timeout in seconds
        #[arg(long, default_value = "2")]
        timeout: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Pretty-print a JSON file
    Pretty { path: PathBuf },
    /// Flatten a nested JSON object into dotted keys
    Flatten {
        path: PathBuf,
        #[arg(long, default_value = ".")]
        sep: String,
    },
    /// Merge JSON objects; later files win on key conflicts
    Merge { paths: Vec<PathBuf> },
    /// Keep only the listed keys of a JSON object
    Filter {
        path: PathBuf,
        /// Comma-separated key allowlist
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Convert a JSON array of flat objects to CSV
    JsonToCsv { input: PathBuf, output: PathBuf },
    /// Convert a CSV file (with header) to a JSON array
    CsvToJson { input: PathBuf, output: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum TimeCommands {
    /// Current timestamp in ISO form
    Now,
    /// Current date
    Date {
        #[arg(long, default_value = "%Y-%m-%d")]
        format: String,
    },
    /// Current time
    Clock {
        #[arg(long, default_value = "%H:%M:%S")]
        format: String,
    },
    /// Add days to a date
    AddDays {
        /// Date in YYYY-MM-DD form
        date: String,
        days: i64,
    },
    /// Age in whole years for a birth date
    Age {
        /// Birth date in YYYY-MM-DD form
        birth: String,
    },
    /// Whole days between two dates
    Between {
        /// Dates in YYYY-MM-DD form
        first: String,
        second: String,
    },
    /// Whether a date falls on a weekend
    Weekend {
        /// Date in YYYY-MM-DD form
        date: String,
    },
    /// Humanize how long ago a timestamp was
    Ago {
        /// Timestamp in "YYYY-MM-DD HH:MM:SS" form
        timestamp: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CmdCommands {
    /// Print the command catalog, optionally one category
    List {
        /// Category name, e.g. git or file_operations
        category: Option<String>,
    },
    /// Execute a shell command and report the structured result
    Exec {
        command: String,
        /// Stream output to the terminal instead of capturing it
        #[arg(long)]
        no_capture: bool,
    },
    /// Show system information
    Sysinfo,
}
