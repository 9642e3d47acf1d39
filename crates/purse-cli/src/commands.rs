use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use purse_compiler::{flatten_rules, Compiler};
use purse_hash::ContentHasher;
use purse_registry::{RegistryConfig, SheetSink, StyleRegistry};
use purse_types::{StyleElement, StyleEntry, StyleObject};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Compile(args) => cmd_compile(args, &cli.format),
        Command::Sheet(args) => cmd_sheet(args, config.registry, &cli.format),
        Command::Hash(args) => cmd_hash(args, &cli.format),
    }
}

fn read_style_object(path: &Path) -> anyhow::Result<StyleObject> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    StyleObject::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

fn compile_files(
    compiler: &mut Compiler,
    files: &[PathBuf],
) -> anyhow::Result<Vec<(PathBuf, Arc<StyleElement>)>> {
    files
        .iter()
        .map(|path| {
            let object = read_style_object(path)?;
            let element = compiler
                .build([object])
                .with_context(|| format!("compiling {}", path.display()))?;
            tracing::debug!(file = %path.display(), class = %element.class_name, "compiled");
            Ok((path.clone(), element))
        })
        .collect()
}

fn cmd_compile(args: CompileArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut compiler = Compiler::new();
    let compiled = compile_files(&mut compiler, &args.files)?;

    match format {
        OutputFormat::Json => {
            let out: Vec<_> = compiled
                .iter()
                .map(|(path, element)| {
                    serde_json::json!({
                        "file": path.display().to_string(),
                        "className": element.class_name,
                        "rules": flatten_rules(element),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for (path, element) in &compiled {
                let class_name = if element.class_name.is_empty() {
                    "(empty)".dimmed().to_string()
                } else {
                    element.class_name.cyan().bold().to_string()
                };
                println!("{} {}", path.display().to_string().bold(), class_name);
                for rule in flatten_rules(element) {
                    println!("  {}", rule);
                }
            }
        }
    }
    Ok(())
}

fn cmd_sheet(args: SheetArgs, config: RegistryConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let mut compiler = Compiler::new();
    let compiled = compile_files(&mut compiler, &args.files)?;
    let mut registry = StyleRegistry::with_config(SheetSink::new(), config);

    let mut registrations = Vec::with_capacity(compiled.len());
    for (path, element) in &compiled {
        let registration = registry
            .insert(element)
            .with_context(|| format!("inserting {}", path.display()))?;
        registrations.push(registration);
    }

    let mut globals = Vec::new();
    if let Some(path) = &args.globals {
        let object = read_style_object(path)?;
        for (selector, entry) in object.iter() {
            let StyleEntry::Nested(declarations) = entry else {
                tracing::warn!(selector, "global entry is not a declaration block; skipped");
                continue;
            };
            let rule = compiler.render_global_rule(selector, declarations);
            globals.push(registry.insert_global(&rule)?);
        }
    }

    let css = registry.sink().to_css();
    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "classes": compiled
                    .iter()
                    .map(|(_, element)| element.class_name.as_str())
                    .collect::<Vec<_>>(),
                "liveClassNames": registry.len(),
                "css": css,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print!("{css}");
            eprintln!(
                "{} {} rules from {} files ({} class names)",
                "✓".green().bold(),
                registry.sink().len(),
                compiled.len(),
                registry.len(),
            );
        }
    }

    for registration in registrations {
        registry.release(registration);
    }
    for registration in globals {
        registry.release_global(registration);
    }
    Ok(())
}

fn cmd_hash(args: HashArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let hasher = ContentHasher::default();
    let code = hasher.hash_str(&args.text);
    let name = hasher.identifier(&args.text)?;
    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "hash": code, "className": name });
            println!("{}", serde_json::to_string(&out)?);
        }
        OutputFormat::Text => println!("{} {}", name.as_str().cyan().bold(), code),
    }
    Ok(())
}
