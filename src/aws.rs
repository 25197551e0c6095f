use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::process::Command;

use crate::error::{PatchError, Result};

/// Envelope returned by `aws cloudfront get-distribution-config`. Only the
/// ETag and the config object are decoded; everything inside the config is
/// carried as-is.
#[derive(Debug, Deserialize)]
pub struct DistributionConfigEnvelope {
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "DistributionConfig")]
    pub distribution_config: Map<String, Value>,
}

/// Thin wrapper over the pre-authenticated `aws` CLI. Commands are spawned
/// with an argument vector, never through a shell.
pub struct AwsCli {
    bin: String,
}

impl AwsCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub async fn get_distribution_config(&self, id: &str) -> Result<DistributionConfigEnvelope> {
        let stdout = self
            .run(&["cloudfront", "get-distribution-config", "--id", id])
            .await?;
        let envelope = serde_json::from_str(&stdout)?;
        Ok(envelope)
    }

    /// Submits the config file, conditional on the remote ETag still matching
    /// the one captured at fetch time. The CLI's success output is returned
    /// verbatim and never parsed.
    pub async fn update_distribution(&self, id: &str, config_file: &str, etag: &str) -> Result<String> {
        let file_arg = format!("file://{config_file}");
        self.run(&[
            "cloudfront",
            "update-distribution",
            "--id",
            id,
            "--distribution-config",
            &file_arg,
            "--if-match",
            etag,
        ])
        .await
        .map_err(|err| match err {
            PatchError::CommandFailed { detail, .. } => PatchError::UpdateRejected {
                id: id.to_string(),
                detail,
            },
            other => other,
        })
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.bin, args.join(" "));
        debug!("running: {command}");

        let output = Command::new(&self.bin)
            .args(args)
            .output()
            .await
            .map_err(|err| PatchError::CommandFailed {
                command: command.clone(),
                detail: err.to_string(),
            })?;

        if !output.status.success() {
            return Err(PatchError::CommandFailed {
                command,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_etag_and_config() {
        let raw = r#"{"ETag":"E123","DistributionConfig":{"Foo":"bar"}}"#;
        let envelope: DistributionConfigEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.etag, "E123");
        assert_eq!(envelope.distribution_config["Foo"], "bar");
    }

    #[test]
    fn envelope_requires_etag() {
        let raw = r#"{"DistributionConfig":{}}"#;
        assert!(serde_json::from_str::<DistributionConfigEnvelope>(raw).is_err());
    }

    #[test]
    fn envelope_requires_object_config() {
        let raw = r#"{"ETag":"E123","DistributionConfig":42}"#;
        assert!(serde_json::from_str::<DistributionConfigEnvelope>(raw).is_err());
    }
}
