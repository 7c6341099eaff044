use crate::colormap::{self, ColorMap};
use crate::config::{Config, SOURCE_EXTENSION};
use crate::error::{BidError, BidResult};
use crate::parser;
use crate::publish::{GoogleSheetsPublisher, SheetPublisher, XlsxPublisher};
use crate::report;
use crate::types::{BidRow, GroupKey};
use crate::zone;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Execute the process command: parse every source file, assemble the board
/// and hand it to the configured publishers.
#[allow(clippy::too_many_arguments)]
pub fn process(
    folder: Option<PathBuf>,
    config_path: Option<PathBuf>,
    credentials: Option<PathBuf>,
    sheet_id: Option<String>,
    worksheet: Option<String>,
    color_file: Option<PathBuf>,
    export: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
) -> BidResult<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(folder) = folder {
        config.folder = folder;
    }
    if let Some(credentials) = credentials {
        config.credentials = credentials;
    }
    if let Some(sheet_id) = sheet_id {
        config.sheet_id = sheet_id;
    }
    if let Some(worksheet) = worksheet {
        config.worksheet = worksheet;
    }
    if let Some(color_file) = color_file {
        config.color_file = color_file;
    }

    println!("{}", "📊 Bidboard - Building the bid-result board".bold().green());
    println!("   Folder: {}", config.folder.display());
    println!();

    if dry_run {
        println!("{}", "📋 DRY RUN MODE - No remote write\n".yellow());
    }

    let files = list_source_files(&config.folder);
    if files.is_empty() {
        println!("{}", "⚠️  No .xlsb files found - nothing to publish".yellow());
        return Ok(());
    }

    // One file at a time; a bad file degrades to an empty zone, never aborts
    let mut zones: BTreeMap<String, Vec<BidRow>> = BTreeMap::new();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let zone_key = zone::zone_for_file(&name);

        match parser::read_bid_file(path) {
            Ok(rows) => {
                if verbose {
                    println!("   {} → {} ({} rows)", name.cyan(), zone_key, rows.len());
                }
                if zones.contains_key(&zone_key) {
                    println!(
                        "{}",
                        format!("⚠️  Zone '{}' seen twice - '{}' replaces the earlier file", zone_key, name)
                            .yellow()
                    );
                }
                zones.insert(zone_key, rows);
            }
            Err(e) => {
                println!("{}", format!("⚠️  Skipping '{}': {}", name, e).yellow());
                zones.entry(zone_key).or_default();
            }
        }
    }

    let colors = load_colors(&config.color_file, verbose);
    let board = report::build(&zones, &colors);

    println!();
    println!("{}", "✅ Board assembled:".bold().green());
    println!("   Zones: {}", zones.len());
    println!(
        "   Grid: {} rows x {} columns",
        board.grid.row_count(),
        board.grid.width()
    );
    println!("   Style ops: {}", board.styles.len());

    if let Some(path) = export {
        let mut publisher = XlsxPublisher::new(&path);
        publisher.publish(&board.grid, &board.styles)?;
        println!("{}", format!("💾 Board exported to {}", path.display()).green());
    }

    if dry_run {
        println!("{}", "📋 Dry run - Google Sheets write skipped".yellow());
        return Ok(());
    }

    if config.sheet_id.is_empty() {
        return Err(BidError::Config(
            "No sheet id configured (set --sheet-id or the config file)".to_string(),
        ));
    }

    println!();
    println!("{}", "🌐 Publishing to Google Sheets...".cyan());
    let mut publisher =
        GoogleSheetsPublisher::connect(&config.credentials, &config.sheet_id, &config.worksheet)?;
    publisher.publish(&board.grid, &board.styles)?;
    println!(
        "{}",
        format!("✅ Published to worksheet '{}'", config.worksheet).bold().green()
    );
    Ok(())
}

/// Execute the inspect command: dump raw rows and the parsed table of one file
pub fn inspect(file: PathBuf, rows: usize) -> BidResult<()> {
    println!("{}", "🔍 Bidboard - Inspecting source file".bold().green());
    println!("   File: {}", file.display());

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("   Zone: {}", zone::zone_for_file(&name).cyan());
    println!();

    let range = parser::read_sheet_range(&file)?;
    let Some((end_row, end_col)) = range.end() else {
        println!("{}", "⚠️  Sheet is empty".yellow());
        return Ok(());
    };
    let start_row = range.start().map(|(r, _)| r).unwrap_or(0);

    println!("{}", format!("--- First {} rows ---", rows).cyan());
    for row in start_row..=end_row.min(start_row + rows.saturating_sub(1) as u32) {
        let cells: Vec<String> = (0..=end_col)
            .map(|col| {
                range
                    .get_value((row, col))
                    .map(parser::cell_text)
                    .unwrap_or_default()
            })
            .collect();
        println!("   [{:>3}] {}", row, cells.join(" | "));
    }

    let parsed = parser::parse_bid_table(&range);
    println!();
    if parsed.is_empty() {
        println!("{}", "⚠️  No bid table found (missing '순위' marker?)".yellow());
        return Ok(());
    }
    println!("{}", format!("--- Parsed rows ({}) ---", parsed.len()).cyan());
    for bid in &parsed {
        println!(
            "   {:>2}  {:<24} {:>10.2}억  {:>8.4}%",
            bid.rank, bid.company, bid.amount, bid.ratio
        );
    }
    Ok(())
}

/// Execute the colors command: print the loaded company color map
pub fn colors(file: PathBuf) -> BidResult<()> {
    println!("{}", "🎨 Bidboard - Company color map".bold().green());
    println!("   File: {}", file.display());
    println!();

    let map = colormap::load_color_map(&file)?;
    if map.is_empty() {
        println!("{}", "⚠️  No themed company cells found".yellow());
        return Ok(());
    }

    for group in GroupKey::ALL {
        let members: Vec<_> = map.entries().iter().filter(|e| e.group == group).collect();
        println!("   {} ({})", group.label().bold(), members.len());
        for entry in members {
            println!("      {}", entry.company);
        }
    }
    println!();
    println!("   Total: {} companies", map.len());
    Ok(())
}

/// All .xlsb files of the folder, sorted by name for output stability.
/// An unreadable folder is reported and degrades to an empty list.
fn list_source_files(folder: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            println!(
                "{}",
                format!("⚠️  Cannot read folder '{}': {}", folder.display(), e).yellow()
            );
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Color map, degrading to empty (with a warning) when the file is missing
/// or unreadable. Only the remote credential file is ever fatal.
fn load_colors(path: &Path, verbose: bool) -> ColorMap {
    if !path.exists() {
        println!(
            "{}",
            format!("⚠️  Color file '{}' not found - companies stay uncolored", path.display())
                .yellow()
        );
        return ColorMap::default();
    }
    match colormap::load_color_map(path) {
        Ok(map) => {
            if verbose {
                println!("   Color map: {} companies", map.len());
            }
            map
        }
        Err(e) => {
            println!("{}", format!("⚠️  {}", e).yellow());
            ColorMap::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_source_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b_제2공구.xlsb", "a_제1공구.xlsb", "notes.txt", "old.XLSB"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let files = list_source_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_제1공구.xlsb", "b_제2공구.xlsb", "old.XLSB"]);
    }

    #[test]
    fn test_list_source_files_missing_folder_is_empty() {
        assert!(list_source_files(Path::new("/no/such/folder")).is_empty());
    }

    #[test]
    fn test_load_colors_missing_file_degrades_to_empty() {
        let map = load_colors(Path::new("/no/such/colors.xlsx"), false);
        assert!(map.is_empty());
    }

    #[test]
    fn test_process_with_no_sources_succeeds_without_network() {
        let dir = TempDir::new().unwrap();
        // A stray non-xlsb file only; the folder has no sources
        std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        process(
            Some(dir.path().to_path_buf()),
            None,
            None,
            None,
            None,
            None,
            None,
            false,
            false,
        )
        .unwrap();
    }
}
