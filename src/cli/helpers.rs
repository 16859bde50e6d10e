//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Parse a `name=value` assignment from the command line
///
/// Only the first `=` splits, so values may contain `=`; the value may be
/// empty.
pub fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

/// Print a serializable value as JSON or YAML
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Print a property's validation outcome for humans
pub fn print_validation(prop: &str, errors: &[String]) {
    if errors.is_empty() {
        println!("{} {} is valid", style("✓").green(), style(prop).bold());
    } else {
        println!(
            "{} {} has {} error(s)",
            style("✗").red(),
            style(prop).bold(),
            errors.len()
        );
        for error in errors {
            println!("  {} {}", style("•").red(), error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("age=30"),
            Ok(("age".to_string(), "30".to_string()))
        );
        assert_eq!(
            parse_assignment("firstname="),
            Ok(("firstname".to_string(), String::new()))
        );
        assert_eq!(
            parse_assignment("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert!(parse_assignment("age").is_err());
        assert!(parse_assignment("=30").is_err());
    }
}
