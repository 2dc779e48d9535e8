use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// What `whoami` reports about the active wallet.
#[derive(Debug, Serialize)]
pub struct WalletReport {
    pub wallet: String,
    pub custodial: bool,
    pub connected: bool,
    pub address: Option<String>,
    pub short_address: Option<String>,
    /// Saved login payload; any `token` inside is redacted on output.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_redacted"
    )]
    pub profile: Option<serde_json::Value>,
}

const REDACTED: &str = "<redacted>";

/// Copy of `value` with every `token` field replaced.
fn redact_tokens(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(fields) => fields
            .iter()
            .map(|(key, field)| {
                let field = if key == "token" {
                    serde_json::Value::String(REDACTED.into())
                } else {
                    redact_tokens(field)
                };
                (key.clone(), field)
            })
            .collect(),
        serde_json::Value::Array(items) => items.iter().map(redact_tokens).collect(),
        other => other.clone(),
    }
}

fn serialize_redacted<S: serde::Serializer>(
    profile: &Option<serde_json::Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    profile.as_ref().map(redact_tokens).serialize(serializer)
}

/// What `amount` reports about a deposit input.
#[derive(Debug, Serialize)]
pub struct AmountReport {
    pub input: String,
    pub placeholder: String,
    pub native_amount: u64,
    pub display_amount: String,
    pub max_native: u64,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<&'static str>,
}

/// Write one value, either as a JSON line or as `key\tvalue` lines.
pub fn write_report<W: Write, T: Serialize>(
    writer: &mut W,
    report: &T,
    json_mode: bool,
) -> Result<(), CliError> {
    let value = serde_json::to_value(report)?;
    if json_mode {
        serde_json::to_writer(&mut *writer, &value)?;
        writer.write_all(b"\n")?;
    } else if let serde_json::Value::Object(fields) = value {
        for (key, field) in fields {
            match field {
                serde_json::Value::Null => writeln!(writer, "{key}\t-")?,
                serde_json::Value::String(s) => writeln!(writer, "{key}\t{s}")?,
                other => writeln!(writer, "{key}\t{other}")?,
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write signed transactions, one base64 string per line (or a JSON array).
pub fn write_transactions<W: Write>(
    writer: &mut W,
    encoded: &[String],
    json_mode: bool,
) -> Result<(), CliError> {
    if json_mode {
        serde_json::to_writer(&mut *writer, encoded)?;
        writer.write_all(b"\n")?;
    } else {
        for tx in encoded {
            writeln!(writer, "{tx}")?;
        }
    }
    writer.flush()?;
    Ok(())
}
