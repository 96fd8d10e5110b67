use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&success_body(message))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

fn success_body(message: &str) -> Value {
    json!({
        "success": true,
        "message": message
    })
}

fn error_body(message: &str, error_code: Option<&str>) -> Value {
    let mut response = json!({
        "success": false,
        "message": message
    });

    if let Some(code) = error_code {
        response["code"] = json!(code);
    }
    response
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&error_body(message, error_code))?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a titled record: pretty JSON, or one `label: value` line per field
pub fn output_record(
    output_format: OutputFormat,
    title: &str,
    fields: &[(&str, String)],
    data: Value,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Text => {
            println!("{}", title);
            let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, value) in fields {
                println!("  {:<width$}  {}", label, value, width = width);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_carries_only_the_message() {
        assert_eq!(
            success_body("Database is reachable"),
            json!({ "success": true, "message": "Database is reachable" })
        );
    }

    #[test]
    fn error_body_adds_code_when_given() {
        assert_eq!(
            error_body("down", Some("DATABASE_UNAVAILABLE")),
            json!({ "success": false, "message": "down", "code": "DATABASE_UNAVAILABLE" })
        );
        assert_eq!(error_body("down", None), json!({ "success": false, "message": "down" }));
    }
}
