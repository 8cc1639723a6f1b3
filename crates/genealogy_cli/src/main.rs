//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `genealogy_core` linkage.
//! - Exercise one delete/undo/redo cycle with deterministic output.
//!
//! # Configuration
//! - `GENEALOGY_LOG_DIR`: absolute directory; enables file logging when set.
//! - `GENEALOGY_LOG_LEVEL`: overrides the build-default log level.

use genealogy_core::{
    default_log_level, init_logging, Command, DeleteMarriageCommand, Gender, GenealogyGraph,
    Marriage, Person,
};
use log::info;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var("GENEALOGY_LOG_DIR") {
        let level =
            env::var("GENEALOGY_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("genealogy_cli logging disabled: {err}");
        }
    }

    println!("genealogy_core version={}", genealogy_core::core_version());
    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("genealogy_cli demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo() -> Result<(), genealogy_core::CommandError> {
    let graph = GenealogyGraph::new();
    let marriage = Marriage::with_year(1950);
    graph.add_marriage(&marriage);
    for (gender, name) in [
        (Gender::Male, "John"),
        (Gender::Female, "Mary"),
        (Gender::Female, "Ann"),
    ] {
        let person = Person::new(gender);
        person.set_name(name);
        graph.add_person(&person);
        match name {
            "Ann" => marriage.add_offspring(&person),
            _ => person.set_marriage(Some(&marriage)),
        };
    }
    info!(
        "event=demo_ready module=cli people={} marriages={}",
        graph.people().len(),
        graph.marriages().len()
    );

    let mut command = DeleteMarriageCommand::new(graph.clone(), marriage.clone());
    print_state("initial", &graph, &marriage);
    command.execute()?;
    print_state("after execute", &graph, &marriage);
    command.undo()?;
    print_state("after undo", &graph, &marriage);
    command.redo()?;
    print_state("after redo", &graph, &marriage);
    Ok(())
}

fn print_state(step: &str, graph: &GenealogyGraph, marriage: &Marriage) {
    println!(
        "{step}: marriages={} spouses={} offspring={}",
        graph.marriages().len(),
        [marriage.husband(), marriage.wife()].iter().flatten().count(),
        marriage.offspring().len()
    );
}
