//! Outcome reporting.

use serde::Serialize;

use crate::cli::output;
use crate::core::policy::Reason;
use crate::core::provision::Outcome;
use crate::error::Result;

/// JSON report: the outcome plus when it was produced.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    outcome: &'a Outcome,
    generated_at: String,
}

/// Print the outcome, human-readable or as JSON.
pub fn print(outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        let report = Report {
            outcome,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match outcome {
        Outcome::Generated {
            algorithm,
            reason,
            previous,
            private_key,
            public_key,
            fingerprint,
            verified,
        } => {
            output::success(&format!(
                "generated {} key pair ({})",
                algorithm,
                algorithm.jwt_alg()
            ));
            output::kv("private key", private_key.display());
            output::kv("public key", public_key.display());
            output::kv("sha256", fingerprint);
            if *verified {
                output::success("private key matches public key");
            }
            match reason {
                Reason::Fresh => {}
                Reason::Repair => {
                    output::warn(&format!("replaced incomplete key pair ({})", previous))
                }
                Reason::Rotate => output::warn(
                    "previous key pair replaced; tokens signed with it will no longer verify",
                ),
            }
        }
        Outcome::AlreadyProvisioned {
            private_key,
            public_key,
            fingerprint,
            verified,
        } => {
            output::warn("keys already exist, nothing to do");
            output::kv("private key", private_key.display());
            output::kv("public key", public_key.display());
            if let Some(fingerprint) = fingerprint {
                output::kv("sha256", fingerprint);
            }
            if *verified {
                output::success("private key matches public key");
            }
        }
    }

    Ok(())
}
