//! Parse command implementation.
//!
//! Shows how filenames will be read, without contacting TMDB. Series
//! overrides from the current directory are applied like in `run`.

use crate::core::normalizer::normalize;
use crate::core::parser;
use crate::models::media::ParseResult;
use crate::models::overrides::SeriesOverrides;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the parse command.
pub fn parse(filenames: &[String]) -> Result<()> {
    let overrides = SeriesOverrides::load(Path::new("."))?;

    for raw in filenames {
        let filename = normalize(raw);
        println!("{}", filename.bold());

        match parser::parse(&filename, &overrides) {
            Ok(ParseResult::Movie(query)) => {
                println!("  {} movie", "Kind:".bold());
                print_field("Title", &query.title);
                print_optional("Year", query.year);
                print_optional("TMDB id", query.explicit_id);
                print_field("Remainder", &query.remainder);
                print_field("Extension", &query.extension);
            }
            Ok(ParseResult::Episode(query)) => {
                println!("  {} episode", "Kind:".bold());
                print_field("Show", &query.title);
                print_optional("Year", query.year);
                print_optional("TMDB id", query.explicit_id);
                print_field("Episode", &format!("S{:02}E{:02}", query.season, query.episode));
                print_field("Title guess", &query.episode_title_guess);
                print_field("Remainder", &query.remainder);
                print_field("Extension", &query.extension);
            }
            Err(e) => println!("  {} {}", "[SKIP]".red(), e),
        }
        println!();
    }

    Ok(())
}

fn print_field(label: &str, value: &str) {
    println!("  {} {}", format!("{}:", label).bold(), value);
}

fn print_optional<T: std::fmt::Display>(label: &str, value: Option<T>) {
    if let Some(value) = value {
        print_field(label, &value.to_string());
    }
}
