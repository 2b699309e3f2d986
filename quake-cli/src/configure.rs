use anyhow::{Context, Result};
use inquire::{Confirm, CustomUserError, Select, Text, validator::Validation};
use quake_core::{Config, config::ORDER_BY_CHOICES};

/// Walks the user through every query setting, starting from `config`.
pub fn prompt(mut config: Config) -> Result<Config> {
    config.min_magnitude = Text::new("Minimum magnitude:")
        .with_default(&config.min_magnitude)
        .with_validator(|s: &str| number_validation::<f64>(s, "a number such as 4.5"))
        .prompt()
        .context("Failed to read minimum magnitude")?;

    config.limit = Text::new("Maximum number of earthquakes:")
        .with_default(&config.limit)
        .with_validator(|s: &str| number_validation::<u32>(s, "a whole number such as 20"))
        .prompt()
        .context("Failed to read limit")?;

    let start = ORDER_BY_CHOICES.iter().position(|o| *o == config.order_by).unwrap_or(0);
    config.order_by = Select::new("Order by:", ORDER_BY_CHOICES.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read sort order")?
        .to_string();

    config.use_utc = Confirm::new("Show times in UTC?")
        .with_default(config.use_utc)
        .prompt()
        .context("Failed to read time zone choice")?;

    Ok(config)
}

fn number_validation<T: std::str::FromStr>(
    input: &str,
    expected: &str,
) -> Result<Validation, CustomUserError> {
    if input.trim().parse::<T>().is_ok() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(format!("Expected {expected}").into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers() {
        assert!(matches!(number_validation::<f64>("4.5", "x"), Ok(Validation::Valid)));
        assert!(matches!(number_validation::<u32>(" 20 ", "x"), Ok(Validation::Valid)));
    }

    #[test]
    fn rejects_text() {
        assert!(matches!(number_validation::<f64>("big", "x"), Ok(Validation::Invalid(_))));
        assert!(matches!(number_validation::<u32>("-3", "x"), Ok(Validation::Invalid(_))));
    }
}
