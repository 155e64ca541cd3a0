use crate::cli::main_types::{
    CmdCommands, Commands, DataCommands, FileCommands, ImageCommands, NetCommands, PdfCommands,
    TextCommands, TimeCommands,
};
use crate::display::table;
use crate::error::{AppError, DateTimeError, ImageError};
use crate::ops::{command, data, datetime, file, image, network, pdf, text};
use crate::storage::config::Config;
use crate::utils::logging::{self, VerboseLogger};
use chrono::NaiveDateTime;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Routes parsed CLI commands to operations and prints the outcome.
/// Interactive concerns (the delete confirmation prompt) live here, so the
/// operations stay prompt-free.
pub struct Dispatcher {
    config: Config,
    logger: VerboseLogger,
}

impl Dispatcher {
    pub fn new(config: Config, verbose: bool) -> Self {
        Self {
            config,
            logger: VerboseLogger::new(verbose),
        }
    }

    pub async fn dispatch(&self, command: Commands) -> crate::Result<()> {
        match command {
            Commands::File { command } => self.handle_file(command),
            Commands::Image { command } => self.handle_image(command),
            Commands::Pdf { command } => self.handle_pdf(command).await,
            Commands::Text { command } => self.handle_text(command),
            Commands::Net { command } => self.handle_net(command),
            Commands::Data { command } => self.handle_data(command),
            Commands::Time { command } => self.handle_time(command),
            Commands::Cmd { command } => self.handle_cmd(command),
        }
    }

    fn handle_file(&self, command: FileCommands) -> crate::Result<()> {
        match command {
            FileCommands::Copy {
                sources,
                dest,
                overwrite,
            } => {
                let outcome = file::copy_files(&sources, &dest, overwrite)?;
                print_batch_outcome("Copied", &outcome);
            }
            FileCommands::Move {
                sources,
                dest,
                overwrite,
            } => {
                let outcome = file::move_files(&sources, &dest, overwrite)?;
                print_batch_outcome("Moved", &outcome);
            }
            FileCommands::Delete { paths, yes } => {
                let confirmed =
                    yes || !self.config.confirm_deletes || confirm_deletion(&paths)?;
                let outcome = file::delete_files(&paths, confirmed)?;
                if outcome.cancelled {
                    println!("Cancelled, nothing deleted");
                } else {
                    print_batch_outcome("Deleted", &outcome);
                }
            }
            FileCommands::Compress {
                folder,
                output,
                format,
            } => {
                let format = file::ArchiveFormat::parse(&format)?;
                self.logger
                    .log(&format!("compressing {} to {}", folder.display(), output.display()));
                let size = file::compress_folder(&folder, &output, format)?;
                println!(
                    "Created {} ({})",
                    output.display(),
                    file::format_size(size)
                );
            }
            FileCommands::Extract { archive, dest } => {
                file::extract_archive(&archive, &dest)?;
                println!("Extracted {} to {}", archive.display(), dest.display());
            }
            FileCommands::Size { path, bytes } => {
                let size = file::get_file_size(&path)?;
                if bytes {
                    println!("{size}");
                } else {
                    println!("{}", file::format_size(size));
                }
            }
        }
        Ok(())
    }

    fn handle_image(&self, command: ImageCommands) -> crate::Result<()> {
        match command {
            ImageCommands::Resize {
                input,
                output,
                width,
                height,
                exact,
            } => {
                image::resize_image(&input, &output, width, height, !exact)?;
                println!("Resized {} to {}", input.display(), output.display());
            }
            ImageCommands::Convert {
                input,
                output,
                format,
            } => {
                let format = format.as_deref().map(parse_image_format).transpose()?;
                image::convert_image(&input, &output, format)?;
                println!("Converted {} to {}", input.display(), output.display());
            }
            ImageCommands::Dpi { input, output, dpi } => {
                image::update_resolution(&input, &output, (dpi, dpi))?;
                println!("Wrote {} at {dpi} DPI", output.display());
            }
            ImageCommands::Compress {
                input,
                output,
                quality,
            } => {
                let stats = image::compress_image(&input, &output, quality)?;
                println!(
                    "Compressed {} ({} -> {}, {:.1}% reduction)",
                    output.display(),
                    file::format_size(stats.original),
                    file::format_size(stats.compressed),
                    stats.reduction_pct()
                );
            }
            ImageCommands::Thumbnail {
                input,
                output,
                max_size,
            } => {
                let bound = max_size.unwrap_or(self.config.thumbnail_bound);
                image::create_thumbnail(&input, &output, bound, bound)?;
                println!("Created thumbnail {}", output.display());
            }
        }
        Ok(())
    }

    async fn handle_pdf(&self, command: PdfCommands) -> crate::Result<()> {
        match command {
            PdfCommands::Download {
                url,
                output,
                timeout,
            } => {
                let timeout =
                    Duration::from_secs(timeout.unwrap_or(self.config.http_timeout_secs));
                self.logger.log(&format!("downloading {url}"));
                let written = pdf::download_pdf(&url, &output, timeout).await?;
                println!(
                    "Downloaded {} ({})",
                    output.display(),
                    file::format_size(written)
                );
            }
            PdfCommands::Merge { inputs, output } => {
                pdf::merge_pdfs(&inputs, &output)?;
                println!("Merged {} inputs into {}", inputs.len(), output.display());
            }
            PdfCommands::Split {
                input,
                output_dir,
                pages_per_file,
            } => {
                let count = pdf::split_pdf(&input, &output_dir, pages_per_file)?;
                println!("Wrote {count} files to {}", output_dir.display());
            }
            PdfCommands::ToImages {
                input,
                output_dir,
                dpi,
                format,
            } => {
                // Probe before spawning so the user gets the install hint
                // up front instead of after argument validation.
                if !pdf::rasterizer_available() {
                    return Err(crate::error::PdfError::RasterizerMissing.into());
                }
                let format = pdf::RasterFormat::parse(&format)?;
                let dpi = dpi.unwrap_or(self.config.default_dpi);
                self.logger
                    .log(&format!("rasterizing {} at {dpi} DPI", input.display()));
                let pages = pdf::pdf_to_images(&input, &output_dir, dpi, format)?;
                println!("Wrote {pages} pages to {}", output_dir.display());
            }
        }
        Ok(())
    }

    fn handle_text(&self, command: TextCommands) -> crate::Result<()> {
        match command {
            TextCommands::Words { text } => println!("{}", text::count_words(&text)),
            TextCommands::Chars { text, no_spaces } => {
                println!("{}", text::count_characters(&text, !no_spaces));
            }
            TextCommands::Case { text, to } => {
                let converted = match to.as_str() {
                    "snake" => text::to_snake_case(&text),
                    "kebab" => text::to_kebab_case(&text),
                    "camel" => text::to_camel_case(&text),
                    "title" => text::to_title_case(&text),
                    other => {
                        return Err(AppError::Validation(format!(
                            "unknown case style '{other}' (expected snake, kebab, camel, or title)"
                        )));
                    }
                };
                println!("{converted}");
            }
            TextCommands::Emails { text } => {
                for email in text::extract_emails(&text) {
                    println!("{email}");
                }
            }
            TextCommands::Urls { text } => {
                for url in text::extract_urls(&text) {
                    println!("{url}");
                }
            }
            TextCommands::Truncate { text, max, suffix } => {
                println!("{}", text::truncate_text(&text, max, &suffix));
            }
            TextCommands::StripHtml { text } => {
                println!("{}", text::remove_html_tags(&text));
            }
        }
        Ok(())
    }

    fn handle_net(&self, command: NetCommands) -> crate::Result<()> {
        match command {
            NetCommands::Check {
                host,
                port,
                timeout,
            } => {
                let timeout = Duration::from_secs(timeout);
                if network::check_internet_connection(&host, port, timeout) {
                    println!("Online ({host}:{port} reachable)");
                } else {
                    println!("Offline ({host}:{port} unreachable)");
                }
            }
            NetCommands::Ip => match network::get_ip_address() {
                Some(ip) => println!("{ip}"),
                None => println!("No local IP address detected"),
            },
            NetCommands::Hostname => println!("{}", network::get_hostname()),
            NetCommands::Parse { url } => {
                let parsed = network::parse_url(&url)?;
                println!("scheme:    {}", parsed.scheme);
                println!("authority: {}", parsed.authority);
                println!("path:      {}", parsed.path);
                println!("params:    {}", parsed.params);
                println!("query:     {}", parsed.query);
                println!("fragment:  {}", parsed.fragment);
            }
            NetCommands::Build { base, param } => {
                let mut pairs = Vec::new();
                for item in &param {
                    match item.split_once('=') {
                        Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
                        None => logging::log_warning(&format!(
                            "ignoring '{item}', expected key=value"
                        )),
                    }
                }
                println!("{}", network::build_url(&base, &pairs));
            }
            NetCommands::Encode { value } => println!("{}", network::encode_url(&value)),
            NetCommands::Decode { value } => println!("{}", network::decode_url(&value)),
            NetCommands::Port {
                host,
                port,
                timeout,
            } => {
                let timeout = Duration::from_secs(timeout);
                if network::is_port_open(&host, port, timeout) {
                    println!("{host}:{port} is open");
                } else {
                    println!("{host}:{port} is closed");
                }
            }
        }
        Ok(())
    }

    fn handle_data(&self, command: DataCommands) -> crate::Result<()> {
        match command {
            DataCommands::Pretty { path } => {
                let value = data::read_json(&path)?;
                println!("{}", data::pretty_json(&value)?);
            }
            DataCommands::Flatten { path, sep } => {
                let map = read_json_object(&path)?;
                let flat = data::flatten_dict(&map, &sep);
                println!("{}", data::pretty_json(&serde_json::Value::Object(flat))?);
            }
            DataCommands::Merge { paths } => {
                let mut maps = Vec::new();
                for path in &paths {
                    maps.push(read_json_object(path)?);
                }
                let merged = data::merge_dicts(&maps);
                println!("{}", data::pretty_json(&serde_json::Value::Object(merged))?);
            }
            DataCommands::Filter { path, keys } => {
                let map = read_json_object(&path)?;
                let filtered = data::filter_dict(&map, &keys);
                println!(
                    "{}",
                    data::pretty_json(&serde_json::Value::Object(filtered))?
                );
            }
            DataCommands::JsonToCsv { input, output } => {
                data::json_to_csv(&input, &output)?;
                println!("Wrote {}", output.display());
            }
            DataCommands::CsvToJson { input, output } => {
                data::csv_to_json(&input, &output)?;
                println!("Wrote {}", output.display());
            }
        }
        Ok(())
    }

    fn handle_time(&self, command: TimeCommands) -> crate::Result<()> {
        match command {
            TimeCommands::Now => println!("{}", datetime::current_timestamp()),
            TimeCommands::Date { format } => println!("{}", datetime::current_date(&format)?),
            TimeCommands::Clock { format } => println!("{}", datetime::current_time(&format)?),
            TimeCommands::AddDays { date, days } => {
                let date = datetime::parse_date(&date, datetime::DEFAULT_DATE_FORMAT)?;
                let shifted = datetime::add_days(date, days)?;
                println!(
                    "{}",
                    datetime::format_date(shifted, datetime::DEFAULT_DATE_FORMAT)?
                );
            }
            TimeCommands::Age { birth } => {
                let birth = datetime::parse_date(&birth, datetime::DEFAULT_DATE_FORMAT)?;
                println!("{}", datetime::calculate_age_now(birth));
            }
            TimeCommands::Between { first, second } => {
                let first = datetime::parse_date(&first, datetime::DEFAULT_DATE_FORMAT)?;
                let second = datetime::parse_date(&second, datetime::DEFAULT_DATE_FORMAT)?;
                println!("{}", datetime::days_between(first, second));
            }
            TimeCommands::Weekend { date } => {
                let parsed = datetime::parse_date(&date, datetime::DEFAULT_DATE_FORMAT)?;
                let name = datetime::day_name(parsed);
                if datetime::is_weekend(parsed) {
                    println!("{date} is a weekend ({name})");
                } else {
                    println!("{date} is a weekday ({name})");
                }
            }
            TimeCommands::Ago { timestamp } => {
                let parsed = NaiveDateTime::parse_from_str(&timestamp, "%Y-%m-%d %H:%M:%S")
                    .map_err(|source| DateTimeError::Parse {
                        value: timestamp.clone(),
                        source,
                    })?;
                println!("{}", datetime::time_ago_now(parsed));
            }
        }
        Ok(())
    }

    fn handle_cmd(&self, command: CmdCommands) -> crate::Result<()> {
        match command {
            CmdCommands::List { category } => match category {
                Some(name) => {
                    let category = command::category_by_name(&name)?;
                    println!("{}", table::render_category(&category));
                }
                None => {
                    println!("{}", table::render_catalog(&command::common_commands()));
                }
            },
            CmdCommands::Exec {
                command: cmd,
                no_capture,
            } => {
                self.logger.log(&format!("executing: {cmd}"));
                let result = command::execute_command(&cmd, !no_capture);
                if let Some(stdout) = &result.stdout {
                    print!("{stdout}");
                }
                if let Some(stderr) = &result.stderr {
                    eprint!("{stderr}");
                }
                if !result.success {
                    println!("Command failed with exit code {}", result.exit_code);
                }
            }
            CmdCommands::Sysinfo => {
                println!("{}", table::render_system_info(&command::get_system_info()));
            }
        }
        Ok(())
    }
}

/// List the targets and read a y/n answer from stdin. Anything other than
/// "y" or "yes" declines.
fn confirm_deletion(paths: &[PathBuf]) -> crate::Result<bool> {
    println!("About to delete {} file(s):", paths.len());
    for path in paths {
        println!("  {}", path.display());
    }
    print!("Proceed? [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| AppError::Validation(format!("stdout unavailable: {e}")))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| AppError::Validation(format!("stdin unavailable: {e}")))?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn print_batch_outcome(verb: &str, outcome: &file::BatchOutcome) {
    if outcome.skipped.is_empty() {
        println!("{verb} {} file(s)", outcome.processed);
    } else {
        println!(
            "{verb} {} file(s), skipped {}",
            outcome.processed,
            outcome.skipped.len()
        );
    }
}

fn parse_image_format(name: &str) -> Result<image::ImageFormat, ImageError> {
    image::ImageFormat::from_extension(name).ok_or_else(|| ImageError::UnknownFormat {
        path: name.to_string(),
    })
}

fn read_json_object(path: &std::path::Path) -> crate::Result<data::JsonMap> {
    match data::read_json(path)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(AppError::Validation(format!(
            "{} does not contain a JSON object",
            path.display()
        ))),
    }
}
