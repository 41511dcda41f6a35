//! The `crosswalk` command-line interface.
//!
//! Parses arguments, loads sources and profiles, and hands the work to the library. Failures
//! are reported here and nowhere else.

use std::path::{Path, PathBuf};

use clap::Parser;
use walkdir::WalkDir;

use crate::cli::args::{Command, CrosswalkArgs};
use crate::cli::output::{print_error, print_file, print_status, print_summary, Status};
use crate::diagnostics::TranslateError;
use crate::profile::{TargetLanguage, TargetProfile};
use crate::syntax;
use crate::translator::{write_outputs, SourceInput, Translator};

pub mod args;
pub mod output;

/// Runs the CLI and returns the process exit code.
pub fn run() -> i32 {
    let args = CrosswalkArgs::parse();
    let result = match args.command {
        Command::Translate {
            paths,
            target,
            out,
            profile,
        } => handle_translate(&paths, target, Some(&out), profile.as_deref()),
        Command::Check {
            paths,
            target,
            profile,
        } => handle_translate(&paths, target, None, profile.as_deref()),
        Command::Show {
            file,
            target,
            profile,
        } => handle_show(&file, target, profile.as_deref()),
        Command::Ast { file } => handle_ast(&file),
        Command::Profile { target } => handle_profile(target),
    };

    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            print_error(e);
            1
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

/// Translates every source; writes outputs when `out` is given. Returns whether every file
/// succeeded.
fn handle_translate(
    paths: &[PathBuf],
    target: TargetLanguage,
    out: Option<&Path>,
    profile: Option<&Path>,
) -> Result<bool, TranslateError> {
    let translator = Translator::new(load_profile(target, profile)?);
    let files = collect_java_files(paths)?;

    let mut failed = 0;
    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        match SourceInput::read(file) {
            Ok(source) => sources.push(source),
            Err(e) => {
                failed += 1;
                print_status(Status::Failed, &file.display().to_string());
                print_error(e);
            }
        }
    }

    let mut succeeded = 0;
    for outcome in translator.translate_batch(&sources) {
        let written = outcome.result.and_then(|outputs| match out {
            Some(dir) => write_outputs(dir, &outputs).map(|paths| paths.len()),
            None => Ok(outputs.len()),
        });
        match written {
            Ok(count) => {
                succeeded += 1;
                print_status(Status::Ok, &format!("{} ({} outputs)", outcome.name, count));
            }
            Err(e) => {
                failed += 1;
                print_status(Status::Failed, &outcome.name);
                print_error(e);
            }
        }
    }

    print_summary(succeeded, failed);
    Ok(failed == 0)
}

fn handle_show(
    file: &Path,
    target: TargetLanguage,
    profile: Option<&Path>,
) -> Result<bool, TranslateError> {
    let translator = Translator::new(load_profile(target, profile)?);
    let source = SourceInput::read(file)?;
    let parsed = syntax::parse(&source.name, &source.text)?;
    let outputs = translator.translate_file(&parsed)?;
    let with_header = outputs.len() > 1;
    for output in &outputs {
        print_file(&output.file_name, &output.contents, with_header);
    }
    Ok(true)
}

fn handle_ast(file: &Path) -> Result<bool, TranslateError> {
    let source = SourceInput::read(file)?;
    let parsed = syntax::parse(&source.name, &source.text)?;
    let json = serde_json::to_string_pretty(&parsed.unit)
        .map_err(|e| TranslateError::io("cannot serialize AST", e.into()))?;
    println!("{}", json);
    Ok(true)
}

fn handle_profile(target: TargetLanguage) -> Result<bool, TranslateError> {
    print!("{}", TargetProfile::for_language(target).to_yaml()?);
    Ok(true)
}

// ============================================================================
// HELPERS
// ============================================================================

fn load_profile(target: TargetLanguage, path: Option<&Path>) -> Result<TargetProfile, TranslateError> {
    match path {
        Some(path) => TargetProfile::load(target, path),
        None => Ok(TargetProfile::for_language(target)),
    }
}

/// Expands directories into the `.java` files below them, sorted; plain files pass through.
fn collect_java_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, TranslateError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| {
                let message = format!("cannot walk {}", path.display());
                match e.into_io_error() {
                    Some(io) => TranslateError::io(message, io),
                    None => crate::err_msg!(Config, "{}: filesystem loop", message),
                }
            })?;
            let is_java = entry.path().extension().map_or(false, |ext| ext == "java");
            if entry.file_type().is_file() && is_java {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}
